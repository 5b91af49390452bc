// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::balances::fetch_balances;
use crate::commands::transactions::{TxFilter, fetch_transactions};
use crate::engine;
use crate::models::{BalancePosition, DateRange, KpiSummary, MonthlyRow, RangeComparison};
use crate::utils::{fmt_money, fmt_pct, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("compare", sub)) => compare(conn, sub)?,
        Some(("balances", sub)) => balances(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub range: DateRange,
    pub kpis: KpiSummary,
    pub balances: BalancePosition,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyRow>,
    pub mom_sales_growth_pct: Decimal,
}

pub fn summary_report(conn: &Connection, filter: &TxFilter) -> Result<SummaryReport> {
    let txs = fetch_transactions(conn, filter)?;
    let snapshots = fetch_balances(conn)?;
    Ok(SummaryReport {
        range: filter.range,
        kpis: engine::compute_kpis(&txs, Some(&filter.range)),
        balances: engine::reduce_balance_snapshots(&snapshots),
    })
}

pub fn monthly_report(conn: &Connection, range: DateRange) -> Result<MonthlyReport> {
    let txs = fetch_transactions(conn, &TxFilter::with_range(range))?;
    let months = engine::build_monthly_breakdown(&txs);
    let mom_sales_growth_pct = engine::month_over_month_growth(&months);
    Ok(MonthlyReport {
        months,
        mom_sales_growth_pct,
    })
}

/// Each side is fetched with its own range before comparing.
pub fn compare_report(
    conn: &Connection,
    range_a: DateRange,
    range_b: DateRange,
) -> Result<RangeComparison> {
    let rows_a = fetch_transactions(conn, &TxFilter::with_range(range_a))?;
    let rows_b = fetch_transactions(conn, &TxFilter::with_range(range_b))?;
    tracing::debug!(%range_a, %range_b, a = rows_a.len(), b = rows_b.len(), "comparing ranges");
    Ok(engine::compare_ranges(
        &rows_a,
        Some(&range_a),
        &rows_b,
        Some(&range_b),
    ))
}

fn range_of(sub: &clap::ArgMatches, from: &str, to: &str) -> DateRange {
    DateRange::from_text(
        sub.get_one::<String>(from).map(String::as_str),
        sub.get_one::<String>(to).map(String::as_str),
    )
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = summary_report(conn, &TxFilter::from_matches(sub)?)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let k = &report.kpis;
    let b = &report.balances;
    let money = |d: &Decimal| fmt_money(d, &ccy);
    let data = vec![
        vec!["Total Income".to_string(), money(&k.revenue)],
        vec!["Cost of Goods".to_string(), money(&k.cogs)],
        vec!["Gross Profit".to_string(), money(&k.gross_profit)],
        vec!["Total Expenses".to_string(), money(&k.expense)],
        vec!["Net Profit".to_string(), money(&k.net)],
        vec!["Days".to_string(), k.days.to_string()],
        vec!["Average Sales (Daily)".to_string(), money(&k.avg_sales_per_day)],
        vec![
            "Average Gross Profit (Daily)".to_string(),
            money(&k.avg_gross_profit_per_day),
        ],
        vec!["Beginning Cash + Bank".to_string(), money(&b.beginning)],
        vec!["Current Cash + Bank".to_string(), money(&b.current)],
        vec!["Money on Hand + Bank".to_string(), money(&b.total)],
    ];
    println!("Range: {}", report.range);
    println!("{}", pretty_table(&["Metric", "Value"], data));
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = monthly_report(conn, range_of(sub, "from", "to"))?;
    if sub.get_flag("jsonl") {
        maybe_print_json(false, true, &report.months)?;
        return Ok(());
    }
    if maybe_print_json(sub.get_flag("json"), false, &report)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let data: Vec<Vec<String>> = report
        .months
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                fmt_money(&r.sales, &ccy),
                r.orders.to_string(),
                fmt_money(&r.gross_profit, &ccy),
                fmt_money(&r.opex, &ccy),
                fmt_money(&r.net_profit, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Sales", "Orders", "Gross Profit", "Opex", "Net Profit"],
            data,
        )
    );
    println!(
        "Month-over-month sales growth: {}",
        fmt_pct(&report.mom_sales_growth_pct)
    );
    Ok(())
}

fn compare(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range_a = range_of(sub, "a-from", "a-to");
    let range_b = range_of(sub, "b-from", "b-to");
    let c = compare_report(conn, range_a, range_b)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &c)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let line = |name: &str, a: &Decimal, b: &Decimal, g: &Decimal| {
        vec![
            name.to_string(),
            fmt_money(a, &ccy),
            fmt_money(b, &ccy),
            fmt_pct(g),
        ]
    };
    let (a, b, g) = (&c.a, &c.b, &c.growth);
    let data = vec![
        line(
            "Average Sales (Daily)",
            &a.avg_sales_per_day,
            &b.avg_sales_per_day,
            &g.avg_sales_growth_pct,
        ),
        line(
            "Average Gross Profit (Daily)",
            &a.avg_gross_profit_per_day,
            &b.avg_gross_profit_per_day,
            &g.avg_gross_profit_growth_pct,
        ),
        line("Total Sales (Revenue)", &a.revenue, &b.revenue, &g.sales_growth_pct),
        line(
            "Gross Profit",
            &a.gross_profit,
            &b.gross_profit,
            &g.gross_profit_growth_pct,
        ),
        line("Net Profit", &a.net, &b.net, &g.net_growth_pct),
    ];
    println!("A: {}  ({} days)", range_a, a.days);
    println!("B: {}  ({} days)", range_b, b.days);
    println!("{}", pretty_table(&["KPI", "A", "B", "Growth"], data));
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let pos = engine::reduce_balance_snapshots(&fetch_balances(conn)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &pos)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let data = vec![
        vec!["Beginning".to_string(), fmt_money(&pos.beginning, &ccy)],
        vec!["Current".to_string(), fmt_money(&pos.current, &ccy)],
        vec!["All snapshots".to_string(), fmt_money(&pos.total, &ccy)],
    ];
    println!("{}", pretty_table(&["Position", "Cash + Bank"], data));
    Ok(())
}
