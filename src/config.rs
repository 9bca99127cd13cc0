use serde::{Deserialize, Serialize};

/// 赌场规则中所有可调的常量，默认值即为标准玩法。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub starting_balance: i64,
    pub spin_cost: i64,
    pub spin_win_threshold: f64,
    pub spin_min_payout: i64,
    pub spin_max_payout: i64,
    pub initial_luck_cost: i64,
    pub credit_min: i64,
    pub credit_max: i64,
    pub credit_debt_multiplier: i64,
    pub roulette_min_chips: i64,
    pub roulette_max_chips: i64,
    pub chip_price: i64,
    pub roulette_max_number: i64,
    pub roulette_payout_base: i64,
    pub roulette_payout_span: i64,
    pub unlock_code: String,
    pub message_duration_ms: u32,
    pub save_key: String,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 筹码数量对应的轮盘下注成本。
    pub fn roulette_cost(&self, chips: i64) -> i64 {
        chips.saturating_mul(self.chip_price)
    }

    pub fn credit_in_range(&self, amount: i64) -> bool {
        (self.credit_min..=self.credit_max).contains(&amount)
    }

    pub fn chips_in_range(&self, chips: i64) -> bool {
        (self.roulette_min_chips..=self.roulette_max_chips).contains(&chips)
    }

    pub fn bet_in_range(&self, number: i64) -> bool {
        (0..=self.roulette_max_number).contains(&number)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            spin_cost: 100,
            spin_win_threshold: 0.5,
            spin_min_payout: 100,
            spin_max_payout: 1000,
            initial_luck_cost: 1000,
            credit_min: 100,
            credit_max: 10_000,
            credit_debt_multiplier: 3,
            roulette_min_chips: 1,
            roulette_max_chips: 5,
            chip_price: 1000,
            roulette_max_number: 36,
            roulette_payout_base: 20,
            roulette_payout_span: 2_500_000,
            unlock_code: "7432".into(),
            message_duration_ms: 3000,
            save_key: "casinoGameState".into(),
        }
    }
}
