// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BalanceKind, BalanceSnapshot};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_decimal, parse_timestamp, pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// All snapshots, oldest `updated_at` first (ties by insertion order).
pub fn fetch_balances(conn: &Connection) -> Result<Vec<BalanceSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, label, kind, balance, updated_at FROM balances ORDER BY updated_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, label, kind, balance, updated_at) = row?;
        data.push(BalanceSnapshot {
            id,
            label,
            kind: kind.parse()?,
            balance: parse_decimal(&balance)
                .with_context(|| format!("Invalid balance on record {}", id))?,
            updated_at: parse_timestamp(&updated_at)?,
        });
    }
    tracing::debug!(count = data.len(), "fetched balances");
    Ok(data)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let label = sub.get_one::<String>("label").unwrap().trim().to_string();
    if label.is_empty() {
        bail!("Label must not be empty");
    }
    let kind: BalanceKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    conn.execute(
        "INSERT INTO balances(label, kind, balance) VALUES (?1, ?2, ?3)",
        params![label, kind.as_str(), balance.to_string()],
    )?;
    tracing::info!(%label, %kind, %balance, "balance recorded");
    println!(
        "Saved {} balance '{}' = {}",
        kind,
        label,
        fmt_money(&balance, &get_currency(conn)?)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut data = fetch_balances(conn)?;
    data.reverse();
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No balances recorded yet.");
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let total = crate::engine::sum(data.iter().map(|b| b.balance));
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.label.clone(),
                b.kind.to_string(),
                fmt_money(&b.balance, &ccy),
                b.updated_at.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Label", "Kind", "Balance", "Updated"], rows)
    );
    println!("Total: {}", fmt_money(&total, &ccy));
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (mut label, kind, balance): (String, String, String) = conn
        .query_row(
            "SELECT label, kind, balance FROM balances WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .with_context(|| format!("Balance {} not found", id))?;
    let mut kind: BalanceKind = kind.parse()?;
    let mut balance = parse_decimal(&balance)?;

    if let Some(l) = sub.get_one::<String>("label") {
        label = l.trim().to_string();
        if label.is_empty() {
            bail!("Label must not be empty");
        }
    }
    if let Some(k) = sub.get_one::<String>("kind") {
        kind = k.parse()?;
    }
    if let Some(b) = sub.get_one::<String>("balance") {
        balance = parse_decimal(b)?;
    }

    conn.execute(
        "UPDATE balances SET label=?1, kind=?2, balance=?3,
         updated_at=strftime('%Y-%m-%d %H:%M:%f','now') WHERE id=?4",
        params![label, kind.as_str(), balance.to_string(), id],
    )?;
    tracing::info!(id, "balance updated");
    println!("Updated balance #{}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM balances WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Balance {} not found", id);
    }
    tracing::info!(id, "balance removed");
    println!("Removed balance #{}", id);
    Ok(())
}
