use log::{Level, LevelFilter, Log, Metadata, Record};

/// 把 `log` 记录转发到浏览器控制台。
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.level(), record.args());
        match record.level() {
            Level::Error => web_sys::console::error_1(&line.into()),
            Level::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }
    }

    fn flush(&self) {}
}

/// 安装控制台日志，重复调用无副作用。
pub fn init_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// 按整数前缀解析输入框文本：允许前导空白和正负号，之后至少一位数字。
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// JS 中能精确表示的最大整数（`Number.MAX_SAFE_INTEGER`）。
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// 把 JS 传入的数字转为整数；非有限值、带小数或超出安全整数范围时返回 `None`。
pub fn js_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER as f64 {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_numbers_convert_only_when_integral_and_safe() {
        assert_eq!(js_integer(3_000_000_000.0), Some(3_000_000_000));
        assert_eq!(js_integer(-5.0), Some(-5));
        assert_eq!(js_integer(0.0), Some(0));
        assert_eq!(js_integer(MAX_SAFE_INTEGER as f64), Some(MAX_SAFE_INTEGER));
        assert_eq!(js_integer(2.5), None);
        assert_eq!(js_integer(f64::NAN), None);
        assert_eq!(js_integer(f64::INFINITY), None);
        assert_eq!(js_integer(2f64.powi(60)), None);
    }

    #[test]
    fn parses_integer_prefixes() {
        assert_eq!(parse_int("500"), Some(500));
        assert_eq!(parse_int("  42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("3.9"), Some(3));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" + 5"), None);
        assert_eq!(parse_int("99999999999999999999999"), None);
    }
}
