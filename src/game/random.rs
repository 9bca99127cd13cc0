use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 引擎使用的随机数来源，测试时可替换为确定性的实现。
pub trait RandomSource {
    /// `[0, 1)` 区间内的均匀浮点数。
    fn unit(&mut self) -> f64;

    /// `[low, high]` 闭区间内的均匀整数。
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64;
}

pub struct SmallRngSource {
    rng: SmallRng,
}

impl SmallRngSource {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SmallRngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SmallRngSource {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}
