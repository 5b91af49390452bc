// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

/// Semantic bucket for an expense row, derived from its free-text category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseClass {
    Cogs,
    StockReplenishment,
    OperatingExpense,
}

type Rule = (fn(Option<&str>) -> bool, ExpenseClass);

/// Evaluated top to bottom; first match wins. Anything unmatched is opex.
const RULES: &[Rule] = &[
    (is_cogs, ExpenseClass::Cogs),
    (is_stock_replenishment, ExpenseClass::StockReplenishment),
];

pub fn is_cogs(category: Option<&str>) -> bool {
    category.is_some_and(|c| c.trim().eq_ignore_ascii_case("cogs"))
}

pub fn is_stock_replenishment(category: Option<&str>) -> bool {
    category.is_some_and(|c| {
        let c = c.to_lowercase();
        c.contains("stock") || c.contains("inventory")
    })
}

pub fn classify(category: Option<&str>) -> ExpenseClass {
    RULES
        .iter()
        .find(|(matches, _)| matches(category))
        .map(|(_, class)| *class)
        .unwrap_or(ExpenseClass::OperatingExpense)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cogs_is_exact_after_trim() {
        assert!(is_cogs(Some("COGS")));
        assert!(is_cogs(Some("  cogs ")));
        assert!(is_cogs(Some("CoGs")));
        assert!(!is_cogs(Some("cogs - flour")));
        assert!(!is_cogs(Some("")));
        assert!(!is_cogs(None));
    }

    #[test]
    fn stock_matches_substrings() {
        assert!(is_stock_replenishment(Some("Restock")));
        assert!(is_stock_replenishment(Some("INVENTORY top-up")));
        assert!(is_stock_replenishment(Some("stockroom")));
        assert!(!is_stock_replenishment(Some("Rent")));
        assert!(!is_stock_replenishment(None));
    }

    #[test]
    fn rules_apply_in_order() {
        assert_eq!(classify(Some(" cogs ")), ExpenseClass::Cogs);
        assert_eq!(classify(Some("Stock purchase")), ExpenseClass::StockReplenishment);
        assert_eq!(classify(Some("Electricity")), ExpenseClass::OperatingExpense);
        assert_eq!(classify(Some("\u{0}??")), ExpenseClass::OperatingExpense);
        assert_eq!(classify(None), ExpenseClass::OperatingExpense);
    }
}
