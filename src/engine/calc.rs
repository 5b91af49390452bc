// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Number of calendar days from `from` to `to`, both ends counted.
///
/// Returns 0 when either bound is missing or when `to` precedes `from`.
pub fn days_between_inclusive(from: Option<NaiveDate>, to: Option<NaiveDate>) -> i64 {
    let (Some(from), Some(to)) = (from, to) else {
        return 0;
    };
    let d = (to - from).num_days() + 1;
    d.max(0)
}

/// Growth of `current` relative to `baseline`, in percent.
///
/// A zero baseline yields 0 instead of an unbounded ratio; so does an
/// intermediate overflow. Not symmetric: swapping arguments changes the result.
pub fn percent_delta(current: Decimal, baseline: Decimal) -> Decimal {
    if baseline.is_zero() {
        return Decimal::ZERO;
    }
    current
        .checked_sub(baseline)
        .and_then(|diff| diff.checked_div(baseline))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Left fold from zero. A total past `Decimal::MAX`/`MIN` saturates there.
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).unwrap_or_else(|| {
            tracing::warn!(%acc, %v, "sum overflowed, saturating");
            acc.saturating_add(v)
        })
    })
}

/// `YYYY-MM` for the date's own calendar month.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
