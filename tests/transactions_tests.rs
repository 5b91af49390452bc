// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use shopledger::commands::transactions::{self, TxFilter};
use shopledger::models::{Method, TxType};
use shopledger::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        ("2025-01-01", "income", Some("Sales"), "cash", "100", Some("walk-in")),
        ("2025-01-02", "expense", Some("COGS"), "bank", "40", None),
        ("2025-01-03", "income", None, "gcash", "60", Some("Online ORDER #7")),
        ("2025-01-04", "expense", Some("Rent"), "cash", "25", Some("january rent")),
    ];
    for (d, t, c, m, a, n) in rows {
        conn.execute(
            "INSERT INTO transactions(date,type,category,method,amount,notes) VALUES (?1,?2,?3,?4,?5,?6)",
            params![d, t, c, m, a, n],
        )
        .unwrap();
    }
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["shopledger", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(conn, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn list_filter(args: &[&str]) -> TxFilter {
    let mut argv = vec!["shopledger", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let tx_m = matches.subcommand_matches("tx").unwrap();
    TxFilter::from_matches(tx_m.subcommand_matches("list").unwrap()).unwrap()
}

#[test]
fn list_limit_respected_newest_first() {
    let conn = setup();
    let rows = transactions::fetch_transactions(&conn, &list_filter(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-04");
    assert_eq!(rows[1].date.to_string(), "2025-01-03");
}

#[test]
fn list_filters_by_type_and_method() {
    let conn = setup();
    let rows =
        transactions::fetch_transactions(&conn, &list_filter(&["--type", "expense"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|t| t.r#type == TxType::Expense));

    let rows = transactions::fetch_transactions(
        &conn,
        &list_filter(&["--type", "income", "--method", "gcash"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].method, Method::Gcash);
}

#[test]
fn notes_search_is_case_insensitive() {
    let conn = setup();
    let rows = transactions::fetch_transactions(&conn, &list_filter(&["--q", "order"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::from(60));
}

#[test]
fn notes_search_folds_non_ascii_case() {
    let conn = setup();
    for (d, n) in [
        ("2025-01-05", "Pagbayad ÑINO"),
        ("2025-01-06", "bayad kay ñino ulit"),
        ("2025-01-07", "Straße delivery"),
    ] {
        conn.execute(
            "INSERT INTO transactions(date,type,method,amount,notes) VALUES (?1,'income','cash','1',?2)",
            params![d, n],
        )
        .unwrap();
    }
    let rows = transactions::fetch_transactions(&conn, &list_filter(&["--q", "ÑINO"])).unwrap();
    assert_eq!(rows.len(), 2);
    let rows = transactions::fetch_transactions(&conn, &list_filter(&["--q", "STRASSE"])).unwrap();
    assert!(rows.is_empty());
    let rows = transactions::fetch_transactions(&conn, &list_filter(&["--q", "STRAßE"])).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn limit_applies_after_notes_search() {
    let conn = setup();
    let rows = transactions::fetch_transactions(
        &conn,
        &list_filter(&["--q", "walk", "--limit", "1"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].notes.as_deref(), Some("walk-in"));
}

#[test]
fn date_bounds_are_inclusive_and_bad_bounds_ignored() {
    let conn = setup();
    let rows = transactions::fetch_transactions(
        &conn,
        &list_filter(&["--from", "2025-01-02", "--to", "2025-01-03"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);

    let rows = transactions::fetch_transactions(
        &conn,
        &list_filter(&["--from", "not-a-date", "--to", "2025-01-01"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn add_edit_remove_roundtrip() {
    let conn = setup();
    run(
        &conn,
        &[
            "add", "--date", "2025-02-01", "--type", "expense", "--method", "bank", "--amount",
            "12.50", "--category", " Restock ", "--notes", "flour",
        ],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    let t = transactions::get_transaction(&conn, id).unwrap();
    assert_eq!(t.category.as_deref(), Some("Restock"));
    assert_eq!(t.amount, Decimal::new(1250, 2));

    let id_s = id.to_string();
    run(
        &conn,
        &["edit", "--id", &id_s, "--amount", "15", "--category", "", "--type", "income"],
    )
    .unwrap();
    let t = transactions::get_transaction(&conn, id).unwrap();
    assert_eq!(t.amount, Decimal::from(15));
    assert_eq!(t.category, None);
    assert_eq!(t.r#type, TxType::Income);
    assert_eq!(t.notes.as_deref(), Some("flour"));

    run(&conn, &["rm", "--id", &id_s]).unwrap();
    assert!(transactions::get_transaction(&conn, id).is_err());
    assert!(run(&conn, &["rm", "--id", &id_s]).is_err());
}

#[test]
fn add_rejects_negative_amount() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "add", "--date", "2025-02-01", "--type", "expense", "--method", "cash", "--amount=-5",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
}

#[test]
fn add_rejects_bad_date() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "add", "--date", "01/02/2025", "--type", "income", "--method", "cash", "--amount", "5",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("expected YYYY-MM-DD"));
}
