// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

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

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction type")
}

/// Filter flags shared by `tx list` and `export transactions`.
fn filter_args() -> [Arg; 5] {
    [
        type_arg(),
        Arg::new("category").long("category").help("Category tag"),
        Arg::new("from").long("from").help("First date, inclusive (YYYY-MM-DD)"),
        Arg::new("to").long("to").help("Last date, inclusive (YYYY-MM-DD)"),
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive match on note, category or amount"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Track income and expenses, see balances, category breakdowns and monthly trends")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .help("Directory holding the database, cache and session files"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .global(true)
                .value_parser(["sqlite", "cache"])
                .help("Where transactions are stored"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the data directory and storage")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .action(ArgAction::SetTrue)
                        .help("Load sample transactions for the signed-in user"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in as a user")
                .arg(Arg::new("user").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("categories")
                .about("List the categories available per type")
                .arg(type_arg()),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(type_arg().default_value("expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("note")
                                .long("note")
                                .help("New note; an empty string clears it"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .args(filter_args())
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["date", "note", "category", "amount"])
                                .default_value("date"),
                        )
                        .arg(
                            Arg::new("asc")
                                .long("asc")
                                .action(ArgAction::SetTrue)
                                .help("Ascending instead of descending"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries derived from all transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("summary")
                        .about("Totals, balance and recent transactions")
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("by-category")
                        .about("Expenses grouped by category")
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("monthly")
                        .about("Balance of the last six months")
                        .arg(
                            Arg::new("as-of")
                                .long("as-of")
                                .help("Treat this date as today (YYYY-MM-DD)"),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .args(filter_args()),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored rows for integrity problems"))
}
