use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

use super::{
    items::StatusItem,
    random::{RandomSource, SmallRngSource},
    state::{GameEvent, GameState},
};

/// 需要检查余额的消费行为。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpendAction {
    Spin,
    BuyLuck,
    BuyItem,
    RepayCredit,
    PlayRoulette,
}

impl fmt::Display for SpendAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpendAction::Spin => "spin",
            SpendAction::BuyLuck => "buy luck",
            SpendAction::BuyItem => "buy item",
            SpendAction::RepayCredit => "repay credit",
            SpendAction::PlayRoulette => "play roulette",
        })
    }
}

/// 由调用方提供的数值参数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    CreditAmount,
    RepaymentAmount,
    ChipCount,
    BetNumber,
    BalanceGrant,
    LuckGrant,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputField::CreditAmount => "credit amount",
            InputField::RepaymentAmount => "repayment amount",
            InputField::ChipCount => "number of chips",
            InputField::BetNumber => "bet number",
            InputField::BalanceGrant => "balance amount",
            InputField::LuckGrant => "luck amount",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[serde(tag = "type")]
pub enum RuleError {
    #[error("Not enough balance to {action}.")]
    InsufficientFunds {
        action: SpendAction,
        required: i64,
        available: i64,
    },
    #[error("Invalid {field}.")]
    InvalidInput { field: InputField },
    #[error("Invalid item.")]
    UnknownItem { key: String },
    #[error("No saved game found.")]
    PersistenceMiss,
    #[error("Saved game is malformed: {reason}")]
    MalformedSnapshot { reason: String },
    #[error("Save slot unavailable: {reason}")]
    StorageUnavailable { reason: String },
    #[error("Incorrect code.")]
    AuthFailure,
}

/// 每次操作后交给展示层的结果：最新状态、事件或错误、提示文案及其展示时长。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: GameState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<GameEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RuleError>,
    pub message: String,
    pub expires_after_ms: u32,
}

impl RuleResolution {
    pub fn new(
        state: GameState,
        result: Result<GameEvent, RuleError>,
        expires_after_ms: u32,
    ) -> Self {
        match result {
            Ok(event) => Self {
                state,
                message: event.message(),
                event: Some(event),
                error: None,
                expires_after_ms,
            },
            Err(error) => Self {
                state,
                message: error.to_string(),
                event: None,
                error: Some(error),
                expires_after_ms,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct RuleEngine<R = SmallRngSource> {
    config: GameConfig,
    rng: R,
}

impl RuleEngine<SmallRngSource> {
    pub fn new() -> Self {
        Self::with_source(GameConfig::default(), SmallRngSource::new())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::with_source(config, SmallRngSource::new())
    }
}

impl Default for RuleEngine<SmallRngSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> RuleEngine<R> {
    pub fn with_source(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn new_game(&self) -> GameState {
        GameState::new(&self.config)
    }

    fn ensure_funds(state: &GameState, action: SpendAction, required: i64) -> Result<(), RuleError> {
        if !state.can_afford(required) {
            return Err(RuleError::InsufficientFunds {
                action,
                required,
                available: state.balance,
            });
        }
        Ok(())
    }

    fn ensure_input(
        value: Option<i64>,
        field: InputField,
        valid: impl FnOnce(i64) -> bool,
    ) -> Result<i64, RuleError> {
        match value {
            Some(value) if valid(value) => Ok(value),
            _ => Err(RuleError::InvalidInput { field }),
        }
    }

    pub fn spin(&mut self, state: &mut GameState) -> Result<GameEvent, RuleError> {
        let cost = self.config.spin_cost;
        Self::ensure_funds(state, SpendAction::Spin, cost)?;
        state.debit(cost);

        // 幸运加成会把比较值放大到超过 1，胜率随之趋近于必胜
        let win_chance = self.rng.unit() * state.luck_multiplier();
        if win_chance > self.config.spin_win_threshold || state.guaranteed_win {
            let payout = self
                .rng
                .range_inclusive(self.config.spin_min_payout, self.config.spin_max_payout);
            let winnings = payout.saturating_add(state.bonus);
            state.credit(winnings);
            debug!("spin won {winnings} (comparator {win_chance:.3})");
            Ok(GameEvent::SpinWon { winnings })
        } else {
            debug!("spin lost (comparator {win_chance:.3})");
            Ok(GameEvent::SpinLost)
        }
    }

    pub fn buy_luck(&self, state: &mut GameState) -> Result<GameEvent, RuleError> {
        let cost = state.luck_cost;
        Self::ensure_funds(state, SpendAction::BuyLuck, cost)?;
        state.debit(cost);
        state.luck_bonus = state.luck_bonus.saturating_add(1);
        state.luck_cost = cost.saturating_mul(2);
        info!("luck raised to {}%, next costs {}", state.luck_bonus, state.luck_cost);
        Ok(GameEvent::LuckPurchased {
            luck_bonus: state.luck_bonus,
            next_cost: state.luck_cost,
        })
    }

    pub fn take_credit(
        &self,
        state: &mut GameState,
        amount: Option<i64>,
    ) -> Result<GameEvent, RuleError> {
        let amount = Self::ensure_input(amount, InputField::CreditAmount, |value| {
            self.config.credit_in_range(value)
        })?;
        state.credit(amount);
        state.credit_debt = state
            .credit_debt
            .saturating_add(amount.saturating_mul(self.config.credit_debt_multiplier));
        info!("credit of {amount} issued, debt now {}", state.credit_debt);
        Ok(GameEvent::CreditTaken {
            amount,
            debt: state.credit_debt,
        })
    }

    /// 还款金额没有下限，债务也可以被还成负数。
    pub fn repay_credit(
        &self,
        state: &mut GameState,
        amount: Option<i64>,
    ) -> Result<GameEvent, RuleError> {
        let amount = Self::ensure_input(amount, InputField::RepaymentAmount, |_| true)?;
        Self::ensure_funds(state, SpendAction::RepayCredit, amount)?;
        state.debit(amount);
        state.credit_debt = state.credit_debt.saturating_sub(amount);
        info!("repaid {amount}, debt now {}", state.credit_debt);
        Ok(GameEvent::CreditRepaid {
            amount,
            remaining_debt: state.credit_debt,
        })
    }

    pub fn buy_item(&self, state: &mut GameState, key: &str) -> Result<GameEvent, RuleError> {
        let item = StatusItem::from_str(key).map_err(|_| RuleError::UnknownItem {
            key: key.to_string(),
        })?;
        let price = item.price();
        Self::ensure_funds(state, SpendAction::BuyItem, price)?;
        state.debit(price);
        state.status_range = item.status();
        state.bonus = item.bonus();
        info!("bought {} for {price}, status {}", item.key(), state.status_range);
        Ok(GameEvent::ItemPurchased { item, price })
    }

    /// 下注成本在检查下注号码之前就已扣除，号码无效时不退还。
    pub fn play_roulette(
        &mut self,
        state: &mut GameState,
        chips: Option<i64>,
        bet_number: Option<i64>,
    ) -> Result<GameEvent, RuleError> {
        let chips = Self::ensure_input(chips, InputField::ChipCount, |value| {
            self.config.chips_in_range(value)
        })?;
        let cost = self.config.roulette_cost(chips);
        Self::ensure_funds(state, SpendAction::PlayRoulette, cost)?;
        state.debit(cost);

        let winning_number = self
            .rng
            .range_inclusive(0, self.config.roulette_max_number);
        let bet_number = match bet_number {
            Some(number) if self.config.bet_in_range(number) => number,
            _ => {
                warn!("invalid roulette bet, wager of {cost} forfeited");
                return Err(RuleError::InvalidInput {
                    field: InputField::BetNumber,
                });
            }
        };

        if bet_number == winning_number || state.guaranteed_win {
            let draw = self
                .rng
                .range_inclusive(0, self.config.roulette_payout_span - 1);
            let winnings = draw.saturating_add(self.config.roulette_payout_base);
            state.credit(winnings);
            debug!("roulette hit {winning_number}, paid {winnings}");
            Ok(GameEvent::RouletteWon {
                winning_number,
                winnings,
            })
        } else {
            debug!("roulette landed {winning_number}, bet was {bet_number}");
            Ok(GameEvent::RouletteLost { winning_number })
        }
    }

    /// 只校验解锁码，是否展示特权操作由展示层决定。
    pub fn privileged_unlock(&self, code: &str) -> Result<GameEvent, RuleError> {
        if code != self.config.unlock_code {
            return Err(RuleError::AuthFailure);
        }
        Ok(GameEvent::PrivilegedUnlocked)
    }

    pub fn grant_balance(&self, state: &mut GameState, amount: i64) -> GameEvent {
        state.credit(amount);
        warn!("granted {amount} balance");
        GameEvent::BalanceGranted { amount }
    }

    pub fn grant_luck(&self, state: &mut GameState, amount: u32) -> GameEvent {
        state.luck_bonus = state.luck_bonus.saturating_add(amount);
        warn!("granted {amount}% luck");
        GameEvent::LuckGranted { amount }
    }

    /// 带校验的余额赠送，`None` 表示调用方给出的不是整数。
    pub fn try_grant_balance(
        &self,
        state: &mut GameState,
        amount: Option<i64>,
    ) -> Result<GameEvent, RuleError> {
        let amount = Self::ensure_input(amount, InputField::BalanceGrant, |_| true)?;
        Ok(self.grant_balance(state, amount))
    }

    /// 幸运加成不能为负，也不能超出 `u32`。
    pub fn try_grant_luck(
        &self,
        state: &mut GameState,
        amount: Option<i64>,
    ) -> Result<GameEvent, RuleError> {
        let amount = amount
            .and_then(|value| u32::try_from(value).ok())
            .ok_or(RuleError::InvalidInput {
                field: InputField::LuckGrant,
            })?;
        Ok(self.grant_luck(state, amount))
    }

    pub fn force_guaranteed_win(&self, state: &mut GameState) -> GameEvent {
        state.guaranteed_win = true;
        warn!("guaranteed win enabled");
        GameEvent::GuaranteedWinSet
    }
}
