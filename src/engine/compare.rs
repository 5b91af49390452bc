// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::calc::percent_delta;
use super::kpi::compute_kpis;
use crate::models::{DateRange, RangeComparison, RangeGrowth, Transaction};

/// KPIs for two caller-chosen ranges and the growth of A relative to B.
///
/// The ranges may overlap or come in any chronological order.
pub fn compare_ranges(
    rows_a: &[Transaction],
    range_a: Option<&DateRange>,
    rows_b: &[Transaction],
    range_b: Option<&DateRange>,
) -> RangeComparison {
    let a = compute_kpis(rows_a, range_a);
    let b = compute_kpis(rows_b, range_b);
    let growth = RangeGrowth {
        sales_growth_pct: percent_delta(a.revenue, b.revenue),
        avg_sales_growth_pct: percent_delta(a.avg_sales_per_day, b.avg_sales_per_day),
        gross_profit_growth_pct: percent_delta(a.gross_profit, b.gross_profit),
        avg_gross_profit_growth_pct: percent_delta(
            a.avg_gross_profit_per_day,
            b.avg_gross_profit_per_day,
        ),
        net_growth_pct: percent_delta(a.net, b.net),
    };
    RangeComparison { a, b, growth }
}
