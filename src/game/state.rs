use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

use super::items::StatusItem;

/// 玩家当前持有的身份等级，只保留最近一次购买的物品。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusRange {
    #[default]
    None,
    #[serde(rename = "Small Rich")]
    SmallRich,
    #[serde(rename = "Big Rich")]
    BigRich,
    Millionaire,
}

impl StatusRange {
    pub fn label(&self) -> &'static str {
        match self {
            StatusRange::None => "None",
            StatusRange::SmallRich => "Small Rich",
            StatusRange::BigRich => "Big Rich",
            StatusRange::Millionaire => "Millionaire",
        }
    }
}

impl fmt::Display for StatusRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 一次操作产生的结果事件，同时携带展示给玩家的文案。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    SpinWon {
        winnings: i64,
    },
    SpinLost,
    LuckPurchased {
        luck_bonus: u32,
        next_cost: i64,
    },
    CreditTaken {
        amount: i64,
        debt: i64,
    },
    CreditRepaid {
        amount: i64,
        remaining_debt: i64,
    },
    ItemPurchased {
        item: StatusItem,
        price: i64,
    },
    RouletteWon {
        winning_number: i64,
        winnings: i64,
    },
    RouletteLost {
        winning_number: i64,
    },
    GameSaved,
    GameLoaded,
    PrivilegedUnlocked,
    BalanceGranted {
        amount: i64,
    },
    LuckGranted {
        amount: u32,
    },
    GuaranteedWinSet,
}

impl GameEvent {
    pub fn message(&self) -> String {
        match self {
            GameEvent::SpinWon { winnings } => format!("You won ${winnings}!"),
            GameEvent::SpinLost => "You lost this spin.".into(),
            GameEvent::LuckPurchased { luck_bonus, .. } => {
                format!("Luck increased! New luck: {luck_bonus}%")
            }
            GameEvent::CreditTaken { amount, debt } => {
                format!("Credit taken: ${amount}. You owe: ${debt}")
            }
            GameEvent::CreditRepaid {
                amount,
                remaining_debt,
            } => format!("Credit repaid: ${amount}. Remaining debt: ${remaining_debt}"),
            GameEvent::ItemPurchased { item, price } => {
                format!("You bought a {} for ${price}.", item.key())
            }
            GameEvent::RouletteWon { winnings, .. } => {
                format!("You won ${winnings} on roulette!")
            }
            GameEvent::RouletteLost { .. } => "You lost the roulette bet.".into(),
            GameEvent::GameSaved => "Game saved.".into(),
            GameEvent::GameLoaded => "Game loaded.".into(),
            GameEvent::PrivilegedUnlocked => "Mod menu unlocked.".into(),
            GameEvent::BalanceGranted { amount } => format!("Added ${amount} to balance."),
            GameEvent::LuckGranted { amount } => format!("Added {amount}% luck."),
            GameEvent::GuaranteedWinSet => "Guaranteed win set.".into(),
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(
            self,
            GameEvent::SpinWon { .. } | GameEvent::RouletteWon { .. }
        )
    }
}

/// 游戏整体状态，也是存档快照的格式（七个字段缺一不可）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub balance: i64,
    pub luck_bonus: u32,
    pub credit_debt: i64,
    pub luck_cost: i64,
    pub status_range: StatusRange,
    pub bonus: i64,
    pub guaranteed_win: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            balance: config.starting_balance,
            luck_bonus: 0,
            credit_debt: 0,
            luck_cost: config.initial_luck_cost,
            status_range: StatusRange::default(),
            bonus: 0,
            guaranteed_win: false,
        }
    }

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub fn can_afford(&self, price: i64) -> bool {
        self.balance >= price
    }

    pub fn debit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_sub(amount);
    }

    pub fn credit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// 幸运加成放大后的胜率比较值，幸运越高越容易超过阈值。
    pub fn luck_multiplier(&self) -> f64 {
        1.0 + f64::from(self.luck_bonus) / 100.0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
