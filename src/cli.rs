// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const TX_TYPES: [&str; 2] = ["income", "expense"];
const METHODS: [&str; 3] = ["cash", "gcash", "bank"];
const KINDS: [&str; 2] = ["cash", "bank"];

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn range_args() -> [Arg; 2] {
    [
        Arg::new("from").long("from").help("Start date YYYY-MM-DD (inclusive)"),
        Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"),
    ]
}

/// Filters shared by `tx list` and `report summary`.
fn tx_filter_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("type")
            .long("type")
            .value_parser(TX_TYPES)
            .help("Only income or only expense rows"),
        Arg::new("method")
            .long("method")
            .value_parser(METHODS)
            .help("Only rows paid with this method"),
        Arg::new("q")
            .long("q")
            .help("Case-insensitive search in notes"),
    ];
    args.extend(range_args());
    args
}

pub fn build_cli() -> Command {
    Command::new("shopledger")
        .about("Small-business cash/bank bookkeeping with KPI reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Ledger file (default: $SHOPLEDGER_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the ledger database"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(TX_TYPES),
                        )
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .required(true)
                                .value_parser(METHODS),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("e.g. Sales / Rent / COGS"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("list")
                        .args(tx_filter_args())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("type").long("type").value_parser(TX_TYPES))
                        .arg(Arg::new("method").long("method").value_parser(METHODS))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Empty string clears the category"),
                        )
                        .arg(
                            Arg::new("notes")
                                .long("notes")
                                .help("Empty string clears the notes"),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("balance")
                .about("Cash drawer and bank balance snapshots")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("label").long("label").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("cash")
                                .value_parser(KINDS),
                        )
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("label").long("label"))
                        .arg(Arg::new("kind").long("kind").value_parser(KINDS))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("inventory")
                .about("Stock items counted at cost")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("sku").long("sku").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("unit-cost").long("unit-cost").required(true))
                        .arg(qty_arg().required(true)),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("sku").long("sku"))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("unit-cost").long("unit-cost"))
                        .arg(qty_arg()),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived KPIs")
                .subcommand(
                    Command::new("summary")
                        .about("Revenue, costs, profit and cash position")
                        .args(tx_filter_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("monthly")
                        .about("Per-month breakdown with month-over-month growth")
                        .args(range_args())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("compare")
                        .about("Compare KPIs of range A against range B")
                        .arg(Arg::new("a-from").long("a-from"))
                        .arg(Arg::new("a-to").long("a-to"))
                        .arg(Arg::new("b-from").long("b-from"))
                        .arg(Arg::new("b-to").long("b-to"))
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("balances")
                        .about("Beginning vs current cash/bank position")
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write records or reports to a file")
                .subcommand(
                    Command::new("transactions")
                        .args(export_args())
                        .args(range_args()),
                )
                .subcommand(Command::new("balances").args(export_args()))
                .subcommand(Command::new("inventory").args(export_args()))
                .subcommand(
                    Command::new("monthly")
                        .args(export_args())
                        .args(range_args()),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display preferences")
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency code")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(Command::new("show")),
        )
}

fn qty_arg() -> Arg {
    Arg::new("qty")
        .long("qty")
        .value_parser(value_parser!(i64).range(0..))
        .help("Quantity on hand")
}

fn export_args() -> [Arg; 2] {
    [
        Arg::new("format")
            .long("format")
            .default_value("csv")
            .help("csv | json"),
        Arg::new("out").long("out").required(true),
    ]
}
