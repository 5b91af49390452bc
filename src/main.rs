// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use shopledger::{cli, commands, db};

fn init_logging(verbose: bool) {
    // RUST_LOG wins, then --verbose, then warnings only.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_override.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Database initialized at {}",
                db::db_path(db_override.as_deref())?.display()
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("balance", sub)) => commands::balances::handle(&conn, sub)?,
        Some(("inventory", sub)) => commands::inventory::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
