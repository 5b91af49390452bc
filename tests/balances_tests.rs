// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use shopledger::commands::balances;
use shopledger::models::BalanceKind;
use shopledger::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["shopledger", "balance"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    balances::handle(conn, matches.subcommand_matches("balance").unwrap())
}

#[test]
fn fetch_orders_oldest_first() {
    let conn = setup();
    conn.execute_batch(
        "INSERT INTO balances(label,kind,balance,updated_at) VALUES ('B','bank','2','2024-03-01 00:00:00');
         INSERT INTO balances(label,kind,balance,updated_at) VALUES ('A','cash','1','2024-01-01 00:00:00');",
    )
    .unwrap();
    let rows = balances::fetch_balances(&conn).unwrap();
    assert_eq!(rows[0].label, "A");
    assert_eq!(rows[1].label, "B");
    assert_eq!(rows[1].kind, BalanceKind::Bank);
}

#[test]
fn add_edit_remove() {
    let conn = setup();
    run(&conn, &["add", "--label", "Cash Drawer", "--balance", "-20.5"]).unwrap();
    let rows = balances::fetch_balances(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, BalanceKind::Cash);
    assert_eq!(rows[0].balance, Decimal::new(-205, 1));

    let id = rows[0].id.to_string();
    run(&conn, &["edit", "--id", &id, "--kind", "bank", "--balance", "75"]).unwrap();
    let rows = balances::fetch_balances(&conn).unwrap();
    assert_eq!(rows[0].label, "Cash Drawer");
    assert_eq!(rows[0].kind, BalanceKind::Bank);
    assert_eq!(rows[0].balance, Decimal::from(75));

    run(&conn, &["rm", "--id", &id]).unwrap();
    assert!(balances::fetch_balances(&conn).unwrap().is_empty());
    assert!(run(&conn, &["edit", "--id", &id, "--label", "x"]).is_err());
}

#[test]
fn add_rejects_blank_label() {
    let conn = setup();
    let err = run(&conn, &["add", "--label", "  ", "--balance", "1"]).unwrap_err();
    assert!(err.to_string().contains("Label"));
}

#[test]
fn snapshots_within_one_second_stay_distinct() {
    let conn = setup();
    conn.execute_batch(
        "INSERT INTO balances(label,kind,balance,updated_at) VALUES ('Drawer','cash','100','2024-05-01 09:00:00.120');
         INSERT INTO balances(label,kind,balance,updated_at) VALUES ('Bank','bank','40','2024-05-01 09:00:00.870');",
    )
    .unwrap();
    let rows = balances::fetch_balances(&conn).unwrap();
    assert!(rows[0].updated_at < rows[1].updated_at);
    let pos = shopledger::engine::reduce_balance_snapshots(&rows);
    assert_eq!(pos.beginning, Decimal::from(100));
    assert_eq!(pos.current, Decimal::from(40));
}
