// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::calc::{month_key, percent_delta};
use super::classify::{ExpenseClass, classify};
use crate::models::{MonthlyRow, Transaction, TxType};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Default)]
struct MonthAcc {
    sales: Decimal,
    orders: u64,
    cogs: Decimal,
    opex: Decimal,
}

/// Per-month roll-up, oldest month first.
///
/// Totals saturate at `Decimal::MAX` rather than overflow.
///
/// Monthly `opex` is every non-COGS expense (stock replenishment included),
/// which differs from the headline `expense` total that also folds in COGS.
pub fn build_monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthlyRow> {
    // BTreeMap keeps YYYY-MM keys in chronological order.
    let mut map: BTreeMap<String, MonthAcc> = BTreeMap::new();
    for t in transactions {
        let acc = map.entry(month_key(t.date)).or_default();
        match t.r#type {
            TxType::Income => {
                acc.sales = acc.sales.saturating_add(t.amount);
                acc.orders += 1;
            }
            TxType::Expense => match classify(t.category.as_deref()) {
                ExpenseClass::Cogs => acc.cogs = acc.cogs.saturating_add(t.amount),
                ExpenseClass::StockReplenishment | ExpenseClass::OperatingExpense => {
                    acc.opex = acc.opex.saturating_add(t.amount)
                }
            },
        }
    }

    map.into_iter()
        .map(|(month, acc)| MonthlyRow {
            month,
            sales: acc.sales,
            orders: acc.orders,
            gross_profit: acc.sales.saturating_sub(acc.cogs),
            opex: acc.opex,
            net_profit: acc.sales.saturating_sub(acc.cogs.saturating_add(acc.opex)),
        })
        .collect()
}

/// Sales growth of the latest month over the one before it.
pub fn month_over_month_growth(rows: &[MonthlyRow]) -> Decimal {
    match rows {
        [.., prev, last] => percent_delta(last.sales, prev.sales),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Method;
    use chrono::NaiveDate;

    fn tx(date: &str, kind: TxType, category: Option<&str>, amount: i64) -> Transaction {
        Transaction {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            r#type: kind,
            category: category.map(String::from),
            method: Method::Bank,
            amount: Decimal::from(amount),
            notes: None,
        }
    }

    fn row(month: &str, sales: i64, orders: u64, gp: i64, opex: i64, net: i64) -> MonthlyRow {
        MonthlyRow {
            month: month.into(),
            sales: sales.into(),
            orders,
            gross_profit: gp.into(),
            opex: opex.into(),
            net_profit: net.into(),
        }
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(build_monthly_breakdown(&[]).is_empty());
        assert_eq!(month_over_month_growth(&[]), Decimal::ZERO);
    }

    #[test]
    fn two_month_scenario() {
        let rows = build_monthly_breakdown(&[
            tx("2024-02-02", TxType::Income, None, 500),
            tx("2024-01-05", TxType::Income, None, 1000),
            tx("2024-01-10", TxType::Expense, Some("COGS"), 300),
        ]);
        assert_eq!(
            rows,
            vec![
                row("2024-01", 1000, 1, 700, 0, 700),
                row("2024-02", 500, 1, 500, 0, 500),
            ]
        );
        assert_eq!(month_over_month_growth(&rows), Decimal::from(-50));
    }

    #[test]
    fn opex_excludes_cogs_but_keeps_stock() {
        let rows = build_monthly_breakdown(&[
            tx("2024-05-01", TxType::Income, None, 1000),
            tx("2024-05-02", TxType::Income, None, 200),
            tx("2024-05-03", TxType::Expense, Some(" cogs "), 400),
            tx("2024-05-04", TxType::Expense, Some("Inventory restock"), 150),
            tx("2024-05-05", TxType::Expense, Some("Rent"), 100),
        ]);
        assert_eq!(rows, vec![row("2024-05", 1200, 2, 800, 250, 550)]);
    }

    #[test]
    fn months_ascend_across_years() {
        let rows = build_monthly_breakdown(&[
            tx("2025-01-01", TxType::Income, None, 1),
            tx("2024-12-31", TxType::Income, None, 1),
            tx("2024-02-15", TxType::Expense, Some("Rent"), 1),
        ]);
        let months: Vec<_> = rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, ["2024-02", "2024-12", "2025-01"]);
        assert_eq!(rows[0].orders, 0);
        assert_eq!(rows[0].net_profit, Decimal::from(-1));
    }

    #[test]
    fn huge_amounts_saturate() {
        let mut rows = vec![
            tx("2024-07-01", TxType::Income, None, 0),
            tx("2024-07-02", TxType::Income, None, 0),
            tx("2024-07-03", TxType::Expense, Some("COGS"), 0),
            tx("2024-07-04", TxType::Expense, Some("Rent"), 0),
        ];
        for t in rows.iter_mut() {
            t.amount = Decimal::MAX;
        }
        let out = build_monthly_breakdown(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sales, Decimal::MAX);
        assert_eq!(out[0].orders, 2);
        assert_eq!(out[0].gross_profit, Decimal::ZERO);
        assert_eq!(out[0].net_profit, Decimal::ZERO);
    }

    #[test]
    fn single_month_has_no_growth() {
        let rows = build_monthly_breakdown(&[tx("2024-01-01", TxType::Income, None, 10)]);
        assert_eq!(month_over_month_growth(&rows), Decimal::ZERO);
    }

    #[test]
    fn growth_uses_last_two_months_only() {
        let rows = vec![
            row("2024-01", 10, 1, 10, 0, 10),
            row("2024-02", 0, 0, 0, 0, 0),
            row("2024-03", 300, 3, 300, 0, 300),
            row("2024-04", 450, 4, 450, 0, 450),
        ];
        assert_eq!(month_over_month_growth(&rows), Decimal::from(50));
        assert_eq!(month_over_month_growth(&rows[..3]), Decimal::ZERO);
    }
}
