// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::calc::{days_between_inclusive, sum};
use super::classify::is_cogs;
use crate::models::{DateRange, KpiSummary, Transaction, TxType};
use rust_decimal::Decimal;

/// Headline figures for `transactions`, optionally limited to `range`.
///
/// The per-day denominator always comes from `range`, even when the caller
/// already narrowed the rows upstream. An open or missing range counts as
/// one day.
pub fn compute_kpis(transactions: &[Transaction], range: Option<&DateRange>) -> KpiSummary {
    let in_range = |t: &&Transaction| range.is_none_or(|r| r.contains(t.date));
    let rows: Vec<&Transaction> = transactions.iter().filter(in_range).collect();

    let revenue = sum(rows
        .iter()
        .filter(|t| t.r#type == TxType::Income)
        .map(|t| t.amount));
    let expenses = || rows.iter().filter(|t| t.r#type == TxType::Expense);
    let cogs = sum(expenses()
        .filter(|t| is_cogs(t.category.as_deref()))
        .map(|t| t.amount));
    let expense = sum(expenses().map(|t| t.amount));

    let gross_profit = revenue.saturating_sub(cogs);
    let net = revenue.saturating_sub(expense);
    let days = days_between_inclusive(range.and_then(|r| r.from), range.and_then(|r| r.to)).max(1);
    let per_day = Decimal::from(days);

    tracing::debug!(rows = rows.len(), days, %revenue, %expense, "computed kpis");

    KpiSummary {
        revenue,
        cogs,
        gross_profit,
        expense,
        net,
        days,
        avg_sales_per_day: revenue / per_day,
        avg_gross_profit_per_day: gross_profit / per_day,
    }
}
