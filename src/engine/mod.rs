// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over already-fetched ledger records.
//!
//! Nothing in here touches the database or fails: every function returns a
//! defined figure (zero, a one-day floor, an empty vector) for sparse input.

pub mod balances;
pub mod calc;
pub mod classify;
pub mod compare;
pub mod kpi;
pub mod monthly;

pub use balances::reduce_balance_snapshots;
pub use calc::{days_between_inclusive, month_key, percent_delta, sum};
pub use classify::{ExpenseClass, classify, is_cogs, is_stock_replenishment};
pub use compare::compare_ranges;
pub use kpi::compute_kpis;
pub use monthly::{build_monthly_breakdown, month_over_month_growth};
