// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::calc::sum;
use crate::models::{BalancePosition, BalanceSnapshot};
use chrono::NaiveDateTime;

/// Opening and latest cash/bank position.
///
/// `snapshots` must already be ordered by `updated_at`, oldest first; the
/// first and last elements define the earliest and latest timestamps.
pub fn reduce_balance_snapshots(snapshots: &[BalanceSnapshot]) -> BalancePosition {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return BalancePosition::default();
    };
    let at = |ts: NaiveDateTime| {
        sum(snapshots
            .iter()
            .filter(move |s| s.updated_at == ts)
            .map(|s| s.balance))
    };
    BalancePosition {
        beginning: at(first.updated_at),
        current: at(last.updated_at),
        total: sum(snapshots.iter().map(|s| s.balance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BalanceKind;
    use rust_decimal::Decimal;

    fn snap(balance: i64, at: &str) -> BalanceSnapshot {
        BalanceSnapshot {
            id: 0,
            label: "Drawer".into(),
            kind: BalanceKind::Cash,
            balance: Decimal::from(balance),
            updated_at: NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(reduce_balance_snapshots(&[]), BalancePosition::default());
    }

    #[test]
    fn groups_earliest_and_latest_timestamps() {
        let t1 = "2024-01-01 08:00:00";
        let t2 = "2024-01-31 18:00:00";
        let p = reduce_balance_snapshots(&[snap(100, t1), snap(50, t1), snap(200, t2)]);
        assert_eq!(p.beginning, Decimal::from(150));
        assert_eq!(p.current, Decimal::from(200));
        assert_eq!(p.total, Decimal::from(350));
    }

    #[test]
    fn single_timestamp_gives_equal_ends() {
        let t = "2024-03-03 12:00:00";
        let p = reduce_balance_snapshots(&[snap(10, t), snap(-4, t)]);
        assert_eq!(p.beginning, Decimal::from(6));
        assert_eq!(p.current, p.beginning);
    }

    #[test]
    fn middle_snapshots_only_count_toward_total() {
        let p = reduce_balance_snapshots(&[
            snap(1, "2024-01-01 00:00:00"),
            snap(1000, "2024-01-02 00:00:00"),
            snap(7, "2024-01-03 00:00:00"),
        ]);
        assert_eq!(p.beginning, Decimal::from(1));
        assert_eq!(p.current, Decimal::from(7));
        assert_eq!(p.total, Decimal::from(1008));
    }
}
