// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of text"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn type_arg(id: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_parser(["Personal", "Business", "personal", "business"])
        .help("Personal or Business")
}

pub fn build_cli() -> Command {
    command!()
        .name("finboard")
        .about("Dashboard for a spreadsheet-backed personal and business finance tracker")
        .subcommand_required(false)
        .subcommand(
            json_flags(
                Command::new("dashboard")
                    .about("Balances, expense chart and (for a scope) the transaction table")
                    .arg(type_arg("scope")),
            ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Balances and totals")
                .arg(type_arg("type")),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(type_arg("type"))
                        .arg(Arg::new("date").long("date").help("Exact date YYYY-MM-DD"))
                        .arg(Arg::new("from").long("from").help("From date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("To date YYYY-MM-DD")),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction dated today")
                        .arg(
                            type_arg("type").default_value("Personal"),
                        )
                        .arg(
                            Arg::new("entry-type")
                                .long("entry-type")
                                .value_parser(["Income", "Expense"])
                                .default_value("Expense"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Uncategorized"),
                        )
                        .arg(
                            Arg::new("mode")
                                .long("mode")
                                .default_value("Cash")
                                .help("Cash, Bank, Credit, ..."),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_negative_numbers(true)
                                .help("Amount, greater than zero"),
                        )
                        .arg(Arg::new("description").long("description").default_value("")),
                ),
        )
        .subcommand(Command::new("categories").about("List categories known to the tracker"))
        .subcommand(
            Command::new("theme")
                .about("Show or change the display theme")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("dark"))
                .subcommand(Command::new("light"))
                .subcommand(Command::new("toggle")),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .required(true)
                                .value_parser(crate::config::KEYS),
                        )
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check configuration and connectivity"))
}
