// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::InventoryItem;
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_decimal, parse_timestamp, pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

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

/// An item together with its stock value, as listed and exported.
#[derive(Debug, Serialize)]
pub struct ValuedItem<'a> {
    #[serde(flatten)]
    pub item: &'a InventoryItem,
    pub total_value: Decimal,
}

impl<'a> From<&'a InventoryItem> for ValuedItem<'a> {
    fn from(item: &'a InventoryItem) -> Self {
        Self {
            item,
            total_value: item.total_value(),
        }
    }
}

/// Newest first, like the stock listing.
pub fn fetch_inventory(conn: &Connection) -> Result<Vec<InventoryItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, sku, name, unit_cost, qty_on_hand, created_at FROM inventory
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, i64>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, sku, name, unit_cost, qty_on_hand, created_at) = row?;
        data.push(InventoryItem {
            id,
            sku,
            name,
            unit_cost: parse_decimal(&unit_cost)
                .with_context(|| format!("Invalid unit cost on item {}", id))?,
            qty_on_hand,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    tracing::debug!(count = data.len(), "fetched inventory");
    Ok(data)
}

fn required_text(field: &str, v: &str) -> Result<String> {
    let v = v.trim();
    if v.is_empty() {
        bail!("{} must not be empty", field);
    }
    Ok(v.to_string())
}

fn unit_cost(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        bail!("Unit cost '{}' must not be negative", s);
    }
    Ok(d)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let sku = required_text("SKU", sub.get_one::<String>("sku").unwrap())?;
    let name = required_text("Name", sub.get_one::<String>("name").unwrap())?;
    let cost = unit_cost(sub.get_one::<String>("unit-cost").unwrap())?;
    let qty = *sub.get_one::<i64>("qty").unwrap();
    conn.execute(
        "INSERT INTO inventory(sku, name, unit_cost, qty_on_hand) VALUES (?1, ?2, ?3, ?4)",
        params![sku, name, cost.to_string(), qty],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, %sku, qty, "inventory item added");
    println!("Added {} '{}' x{} (#{})", sku, name, qty, id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let items = fetch_inventory(conn)?;
    let valued: Vec<ValuedItem> = items.iter().map(ValuedItem::from).collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &valued)? {
        return Ok(());
    }
    if valued.is_empty() {
        println!("No items yet.");
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let total = crate::engine::sum(valued.iter().map(|v| v.total_value));
    let rows: Vec<Vec<String>> = valued
        .iter()
        .map(|v| {
            vec![
                v.item.id.to_string(),
                v.item.sku.clone(),
                v.item.name.clone(),
                fmt_money(&v.item.unit_cost, &ccy),
                v.item.qty_on_hand.to_string(),
                fmt_money(&v.total_value, &ccy),
                v.item.created_at.date().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "SKU", "Name", "Unit Cost", "Qty", "Value", "Added"],
            rows
        )
    );
    println!("Stock value: {}", fmt_money(&total, &ccy));
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (mut sku, mut name, cost, mut qty): (String, String, String, i64) = conn
        .query_row(
            "SELECT sku, name, unit_cost, qty_on_hand FROM inventory WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .with_context(|| format!("Item {} not found", id))?;
    let mut cost = parse_decimal(&cost)?;

    if let Some(s) = sub.get_one::<String>("sku") {
        sku = required_text("SKU", s)?;
    }
    if let Some(n) = sub.get_one::<String>("name") {
        name = required_text("Name", n)?;
    }
    if let Some(c) = sub.get_one::<String>("unit-cost") {
        cost = unit_cost(c)?;
    }
    if let Some(q) = sub.get_one::<i64>("qty") {
        qty = *q;
    }

    conn.execute(
        "UPDATE inventory SET sku=?1, name=?2, unit_cost=?3, qty_on_hand=?4 WHERE id=?5",
        params![sku, name, cost.to_string(), qty, id],
    )?;
    tracing::info!(id, "inventory item updated");
    println!("Updated item #{}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM inventory WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Item {} not found", id);
    }
    tracing::info!(id, "inventory item removed");
    println!("Removed item #{}", id);
    Ok(())
}
