use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::StatusRange;

/// 可购买的身份物品，固定目录。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusItem {
    Car,
    Jewelry,
    House,
}

impl StatusItem {
    pub const ALL: [StatusItem; 3] = [StatusItem::Car, StatusItem::Jewelry, StatusItem::House];

    pub fn key(&self) -> &'static str {
        match self {
            StatusItem::Car => "car",
            StatusItem::Jewelry => "jewelry",
            StatusItem::House => "house",
        }
    }

    pub fn price(&self) -> i64 {
        match self {
            StatusItem::Car => 5_000,
            StatusItem::Jewelry => 50_000,
            StatusItem::House => 1_000_000,
        }
    }

    pub fn status(&self) -> StatusRange {
        match self {
            StatusItem::Car => StatusRange::SmallRich,
            StatusItem::Jewelry => StatusRange::BigRich,
            StatusItem::House => StatusRange::Millionaire,
        }
    }

    /// 每次赢得旋转时额外获得的奖金。
    pub fn bonus(&self) -> i64 {
        match self {
            StatusItem::Car => 200,
            StatusItem::Jewelry => 2_000,
            StatusItem::House => 25_000,
        }
    }
}

impl FromStr for StatusItem {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(StatusItem::Car),
            "jewelry" => Ok(StatusItem::Jewelry),
            "house" => Ok(StatusItem::House),
            _ => Err(()),
        }
    }
}
