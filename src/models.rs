// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what} '{value}', expected one of: {expected}")]
pub struct ParseKindError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

macro_rules! text_enum {
    ($name:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseKindError {
                        what: $what,
                        value: s.to_string(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }
    };
}

text_enum!(TxType, "transaction type", { Income => "income", Expense => "expense" });
text_enum!(Method, "payment method", { Cash => "cash", Gcash => "gcash", Bank => "bank" });
text_enum!(BalanceKind, "balance kind", { Cash => "cash", Bank => "bank" });

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub r#type: TxType,
    pub category: Option<String>,
    pub method: Method,
    pub amount: Decimal, // magnitude; sign comes from `type`
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub id: i64,
    pub label: String,
    pub kind: BalanceKind,
    pub balance: Decimal,
    pub updated_at: NaiveDateTime,
}

/// A stock item counted at cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub unit_cost: Decimal,
    pub qty_on_hand: i64,
    pub created_at: NaiveDateTime,
}

impl InventoryItem {
    /// `unit_cost × qty_on_hand`, saturating at `Decimal::MAX`.
    pub fn total_value(&self) -> Decimal {
        self.unit_cost.saturating_mul(Decimal::from(self.qty_on_hand))
    }
}

/// Inclusive calendar range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Builds a range from user text. Bounds that are empty or fail to parse
    /// as `YYYY-MM-DD` are dropped rather than rejected.
    pub fn from_text(from: Option<&str>, to: Option<&str>) -> Self {
        fn bound(side: &str, raw: Option<&str>) -> Option<NaiveDate> {
            let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    tracing::warn!(side, value = raw, "ignoring unparseable range bound");
                    None
                }
            }
        }
        Self {
            from: bound("from", from),
            to: bound("to", to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|f| date >= f) && self.to.is_none_or(|t| date <= t)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "…".into());
        write!(f, "{} → {}", show(self.from), show(self.to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub expense: Decimal, // cogs + every other expense
    pub net: Decimal,
    pub days: i64,
    pub avg_sales_per_day: Decimal,
    pub avg_gross_profit_per_day: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: String, // YYYY-MM
    pub sales: Decimal,
    pub orders: u64,
    pub gross_profit: Decimal,
    pub opex: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeGrowth {
    pub sales_growth_pct: Decimal,
    pub avg_sales_growth_pct: Decimal,
    pub gross_profit_growth_pct: Decimal,
    pub avg_gross_profit_growth_pct: Decimal,
    pub net_growth_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeComparison {
    pub a: KpiSummary,
    pub b: KpiSummary,
    pub growth: RangeGrowth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePosition {
    pub beginning: Decimal,
    pub current: Decimal,
    pub total: Decimal,
}
