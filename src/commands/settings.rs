// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, pretty_table, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            set_currency(conn, code)?;
            println!("Display currency set to {}", get_currency(conn)?);
        }
        Some(("show", _)) => {
            let rows = vec![vec!["currency".to_string(), get_currency(conn)?]];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
