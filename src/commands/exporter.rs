// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::balances::fetch_balances;
use crate::commands::inventory::{ValuedItem, fetch_inventory};
use crate::commands::reports::monthly_report;
use crate::commands::transactions::{TxFilter, fetch_transactions};
use crate::models::DateRange;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

impl Format {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => bail!("Unknown format: {} (use csv|json)", other),
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("balances", sub)) => export_balances(conn, sub),
        Some(("monthly", sub)) => export_monthly(conn, sub),
        Some(("inventory", sub)) => export_inventory(conn, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> Result<(Format, String)> {
    let fmt = Format::parse(sub.get_one::<String>("format").unwrap())?;
    let out = sub.get_one::<String>("out").unwrap().trim().to_string();
    Ok((fmt, out))
}

fn range(sub: &clap::ArgMatches) -> DateRange {
    DateRange::from_text(
        sub.get_one::<String>("from").map(String::as_str),
        sub.get_one::<String>("to").map(String::as_str),
    )
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let mut txs = fetch_transactions(conn, &TxFilter::with_range(range(sub)))?;
    txs.reverse();
    write_rows(
        fmt,
        &out,
        &["date", "type", "category", "method", "amount", "notes"],
        &txs,
        |t| {
            vec![
                t.date.to_string(),
                t.r#type.to_string(),
                t.category.clone().unwrap_or_default(),
                t.method.to_string(),
                t.amount.to_string(),
                t.notes.clone().unwrap_or_default(),
            ]
        },
    )?;
    println!("Exported transactions to {}", out);
    Ok(())
}

fn export_balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let mut snapshots = fetch_balances(conn)?;
    snapshots.reverse();
    write_rows(
        fmt,
        &out,
        &["label", "kind", "balance", "updated_at"],
        &snapshots,
        |b| {
            vec![
                b.label.clone(),
                b.kind.to_string(),
                b.balance.to_string(),
                b.updated_at.to_string(),
            ]
        },
    )?;
    println!("Exported balances to {}", out);
    Ok(())
}

fn export_monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let months = monthly_report(conn, range(sub))?.months;
    write_rows(
        fmt,
        &out,
        &["month", "sales", "orders", "gross_profit", "opex", "net_profit"],
        &months,
        |r| {
            vec![
                r.month.clone(),
                r.sales.to_string(),
                r.orders.to_string(),
                r.gross_profit.to_string(),
                r.opex.to_string(),
                r.net_profit.to_string(),
            ]
        },
    )?;
    println!("Exported monthly breakdown to {}", out);
    Ok(())
}

fn export_inventory(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let items = fetch_inventory(conn)?;
    let valued: Vec<ValuedItem> = items.iter().map(ValuedItem::from).collect();
    write_rows(
        fmt,
        &out,
        &["sku", "name", "unit_cost", "qty_on_hand", "total_value", "created_at"],
        &valued,
        |v| {
            vec![
                v.item.sku.clone(),
                v.item.name.clone(),
                v.item.unit_cost.to_string(),
                v.item.qty_on_hand.to_string(),
                v.total_value.to_string(),
                v.item.created_at.to_string(),
            ]
        },
    )?;
    println!("Exported inventory to {}", out);
    Ok(())
}

/// CSV uses `headers` and `record`; JSON serializes the typed rows as-is.
/// Nothing is written when `rows` is empty.
fn write_rows<T, F>(
    fmt: Format,
    out: &str,
    headers: &[&str],
    rows: &[T],
    record: F,
) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    if rows.is_empty() {
        bail!("No data to export.");
    }
    match fmt {
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(headers)?;
            for r in rows {
                wtr.write_record(record(r))?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    tracing::info!(path = out, ?fmt, count = rows.len(), "export written");
    Ok(())
}
