// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DateRange, Method, Transaction, TxType};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, Row, params};

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

/// What the transaction fetch narrows on. Empty filter returns everything.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub r#type: Option<TxType>,
    pub method: Option<Method>,
    pub q: Option<String>,
    pub range: DateRange,
    pub limit: Option<usize>,
}

impl TxFilter {
    /// Reads whichever of `type`, `method`, `q`, `from`, `to`, `limit` the
    /// subcommand defines.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let opt = |id: &str| -> Option<String> {
            m.try_get_one::<String>(id)
                .ok()
                .flatten()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Ok(Self {
            r#type: opt("type").map(|s| s.parse()).transpose()?,
            method: opt("method").map(|s| s.parse()).transpose()?,
            q: opt("q"),
            range: DateRange::from_text(opt("from").as_deref(), opt("to").as_deref()),
            limit: m.try_get_one::<usize>("limit").ok().flatten().copied(),
        })
    }

    pub fn with_range(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }
}

pub fn fetch_transactions(conn: &Connection, f: &TxFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, type, category, method, amount, notes FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(t) = f.r#type {
        sql.push_str(" AND type=?");
        params_vec.push(t.as_str().into());
    }
    if let Some(m) = f.method {
        sql.push_str(" AND method=?");
        params_vec.push(m.as_str().into());
    }
    if let Some(from) = f.range.from {
        sql.push_str(" AND date>=?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = f.range.to {
        sql.push_str(" AND date<=?");
        params_vec.push(to.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    // SQLite's lower() only folds ASCII, so the notes search and the limit
    // that follows it run here.
    let needle = f.q.as_deref().map(str::to_lowercase);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        if f.limit.is_some_and(|n| data.len() >= n) {
            break;
        }
        let t = read_row(r)?;
        if let Some(needle) = &needle {
            let notes = t.notes.as_deref().unwrap_or_default().to_lowercase();
            if !notes.contains(needle.as_str()) {
                continue;
            }
        }
        data.push(t);
    }
    tracing::debug!(count = data.len(), ?f, "fetched transactions");
    Ok(data)
}

fn read_row(r: &Row<'_>) -> Result<Transaction> {
    let id: i64 = r.get(0)?;
    let date: String = r.get(1)?;
    let kind: String = r.get(2)?;
    let method: String = r.get(4)?;
    let amount: String = r.get(5)?;
    Ok(Transaction {
        id,
        date: parse_date(&date).with_context(|| format!("Transaction {}", id))?,
        r#type: kind.parse()?,
        category: r.get(3)?,
        method: method.parse()?,
        amount: amount
            .parse()
            .with_context(|| format!("Invalid amount '{}' on transaction {}", amount, id))?,
        notes: r.get(6)?,
    })
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, date, type, category, method, amount, notes FROM transactions WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => read_row(r),
        None => bail!("Transaction {} not found", id),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let kind: TxType = sub.get_one::<String>("type").unwrap().parse()?;
    let method: Method = sub.get_one::<String>("method").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = non_empty(sub.get_one::<String>("category"));
    let notes = non_empty(sub.get_one::<String>("notes"));

    conn.execute(
        "INSERT INTO transactions(date, type, category, method, amount, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date.to_string(),
            kind.as_str(),
            category,
            method.as_str(),
            amount.to_string(),
            notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, %date, %kind, %amount, "transaction recorded");
    println!(
        "Recorded {} {} on {} via {} (#{})",
        kind,
        fmt_money(&amount, &get_currency(conn)?),
        date,
        method,
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = fetch_transactions(conn, &TxFilter::from_matches(sub)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions yet.");
            return Ok(());
        }
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.category.clone().unwrap_or_default(),
                    t.method.to_string(),
                    fmt_money(&t.amount, &ccy),
                    t.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Method", "Amount", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut t = get_transaction(conn, id)?;

    if let Some(d) = sub.get_one::<String>("date") {
        t.date = parse_date(d)?;
    }
    if let Some(k) = sub.get_one::<String>("type") {
        t.r#type = k.parse()?;
    }
    if let Some(m) = sub.get_one::<String>("method") {
        t.method = m.parse()?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        t.amount = parse_amount(a)?;
    }
    if sub.contains_id("category") {
        t.category = non_empty(sub.get_one::<String>("category"));
    }
    if sub.contains_id("notes") {
        t.notes = non_empty(sub.get_one::<String>("notes"));
    }

    conn.execute(
        "UPDATE transactions SET date=?1, type=?2, category=?3, method=?4, amount=?5, notes=?6
         WHERE id=?7",
        params![
            t.date.to_string(),
            t.r#type.as_str(),
            t.category,
            t.method.as_str(),
            t.amount.to_string(),
            t.notes,
            id
        ],
    )?;
    tracing::info!(id, "transaction updated");
    println!("Updated transaction #{}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    tracing::info!(id, "transaction removed");
    println!("Removed transaction #{}", id);
    Ok(())
}

fn non_empty(v: Option<&String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

