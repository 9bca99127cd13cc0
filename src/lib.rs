pub mod config;
pub mod game;
pub mod utils;

use gloo_timers::future::TimeoutFuture;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::{Promise, JSON};

pub use config::GameConfig;
pub use game::{
    BrowserStorage, GameEvent, GameState, InputField, MemorySlot, RandomSource, RuleEngine,
    RuleError, RuleResolution, SaveSlot, SmallRngSource, SpendAction, StatusItem, StatusRange,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    utils::init_logger();
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn make_resolution_json(resolution: RuleResolution) -> Result<String, JsValue> {
    serde_json::to_string(&resolution).map_err(serde_to_js_error)
}

fn parse_input(raw: Option<String>) -> Option<i64> {
    raw.as_deref().and_then(utils::parse_int)
}

/// 浏览器端持有的唯一游戏实例：状态加规则引擎。
#[wasm_bindgen]
pub struct CasinoGame {
    state: GameState,
    engine: RuleEngine,
}

#[wasm_bindgen]
impl CasinoGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        initial_state_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<CasinoGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(serde_to_js_error)?,
            None => GameConfig::default(),
        };
        let engine = RuleEngine::with_config(config);
        let state = match initial_state_json {
            Some(json) => game::parse_snapshot(&json).map_err(serde_to_js_error)?,
            None => engine.new_game(),
        };
        Ok(CasinoGame { state, engine })
    }

    fn resolve(&self, result: Result<GameEvent, RuleError>) -> Result<String, JsValue> {
        let expires_after_ms = self.engine.config().message_duration_ms;
        make_resolution_json(RuleResolution::new(
            self.state.clone(),
            result,
            expires_after_ms,
        ))
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(serde_to_js_error)
    }

    /// 经由 JSON 转换，超过 2^53 的数值只会丢精度而不会报错。
    pub fn state(&self) -> Result<JsValue, JsValue> {
        JSON::parse(&self.state_json()?)
    }

    pub fn spin(&mut self) -> Result<String, JsValue> {
        let result = self.engine.spin(&mut self.state);
        self.resolve(result)
    }

    pub fn buy_luck(&mut self) -> Result<String, JsValue> {
        let result = self.engine.buy_luck(&mut self.state);
        self.resolve(result)
    }

    pub fn take_credit(&mut self, raw_amount: Option<String>) -> Result<String, JsValue> {
        let result = self
            .engine
            .take_credit(&mut self.state, parse_input(raw_amount));
        self.resolve(result)
    }

    pub fn repay_credit(&mut self, raw_amount: Option<String>) -> Result<String, JsValue> {
        let result = self
            .engine
            .repay_credit(&mut self.state, parse_input(raw_amount));
        self.resolve(result)
    }

    pub fn buy_item(&mut self, item: &str) -> Result<String, JsValue> {
        let result = self.engine.buy_item(&mut self.state, item);
        self.resolve(result)
    }

    pub fn play_roulette(
        &mut self,
        raw_chips: Option<String>,
        raw_bet_number: Option<String>,
    ) -> Result<String, JsValue> {
        let result = self.engine.play_roulette(
            &mut self.state,
            parse_input(raw_chips),
            parse_input(raw_bet_number),
        );
        self.resolve(result)
    }

    pub fn export_state(&self) -> Result<String, JsValue> {
        game::export_json(&game::export_state(&self.state)).map_err(serde_to_js_error)
    }

    pub fn import_state(&mut self, snapshot_json: Option<String>) -> Result<String, JsValue> {
        let result = game::import_json(&mut self.state, snapshot_json.as_deref());
        self.resolve(result)
    }

    pub fn save_game(&mut self) -> Result<String, JsValue> {
        let result = BrowserStorage::open(self.engine.config().save_key.as_str())
            .and_then(|mut slot| game::save_game(&self.state, &mut slot));
        self.resolve(result)
    }

    pub fn load_game(&mut self) -> Result<String, JsValue> {
        let result = BrowserStorage::open(self.engine.config().save_key.as_str())
            .and_then(|slot| game::load_game(&mut self.state, &slot));
        self.resolve(result)
    }

    /// 解锁码正确时返回 `PrivilegedUnlocked` 事件，由前端显示特权面板。
    pub fn unlock(&self, code: &str) -> Result<String, JsValue> {
        self.resolve(self.engine.privileged_unlock(code))
    }

    pub fn add_balance(&mut self, amount: f64) -> Result<String, JsValue> {
        let result = self
            .engine
            .try_grant_balance(&mut self.state, utils::js_integer(amount));
        self.resolve(result)
    }

    pub fn add_luck(&mut self, amount: f64) -> Result<String, JsValue> {
        let result = self
            .engine
            .try_grant_luck(&mut self.state, utils::js_integer(amount));
        self.resolve(result)
    }

    pub fn set_guaranteed_win(&mut self) -> Result<String, JsValue> {
        let event = self.engine.force_guaranteed_win(&mut self.state);
        self.resolve(Ok(event))
    }

    /// 提示文案的展示时长结束后 resolve，前端据此清空提示。
    pub fn message_expiry(&self) -> Promise {
        let duration = self.engine.config().message_duration_ms;
        future_to_promise(async move {
            if duration > 0 {
                TimeoutFuture::new(duration).await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }
}

/// 返回一个新开局的游戏状态，方便前端调试或初始化。
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state() -> Result<JsValue, JsValue> {
    to_value(&GameState::default()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config() -> Result<JsValue, JsValue> {
    to_value(&GameConfig::default()).map_err(JsValue::from)
}

/// 校验传入的存档快照是否包含完整且合法的七个字段。
#[wasm_bindgen(js_name = "validateSnapshot")]
pub fn validate_snapshot(snapshot: JsValue) -> Result<(), JsValue> {
    let _: GameState = from_value(snapshot).map_err(JsValue::from)?;
    Ok(())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
