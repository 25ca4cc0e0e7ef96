// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print pretty JSON instead of a table"))
        .arg(arg!(--jsonl "Print one JSON value per line").conflicts_with("json"))
}

fn type_arg(help: &'static str) -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help(help)
        .action(ArgAction::Set)
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .about("Personal finance dashboard: statements, spending, loans, investments")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the data directory and database"))
        .subcommand(
            Command::new("auth")
                .about("Log in, sign up, log out")
                .subcommand(
                    Command::new("login")
                        .arg(arg!(--email <EMAIL>).required(true))
                        .arg(arg!(--password <PASSWORD>).required(true)),
                )
                .subcommand(
                    Command::new("signup")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--email <EMAIL>).required(true))
                        .arg(arg!(--password <PASSWORD>).required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(--key <KEY>).required(true))
                        .arg(arg!(--value <VALUE>).required(true)),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze a bank statement (.csv or .pdf) and replace the dashboard")
                .arg(arg!(--path <PATH>).required(true)),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today"))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(type_arg("expense|income").default_value("expense")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(arg!(--search <TEXT> "Match description, case-insensitive"))
                        .arg(type_arg("all|income|expense").default_value("all"))
                        .arg(arg!(--category <CATEGORY>))
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard reports")
                .subcommand(json_flags(Command::new("overview")))
                .subcommand(json_flags(Command::new("categories")))
                .subcommand(json_flags(Command::new("insights"))),
        )
        .subcommand(
            Command::new("loan")
                .about("Loans, EMIs and payment reminders")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--remaining <AMOUNT> "Defaults to the full amount"))
                        .arg(arg!(--rate <PCT> "Annual interest rate").required(true))
                        .arg(arg!(--start <DATE>).required(true))
                        .arg(arg!(--end <DATE>).required(true))
                        .arg(arg!(--payment <AMOUNT> "Defaults to the computed EMI"))
                        .arg(arg!(--frequency <FREQ> "monthly|weekly|biweekly").default_value("monthly"))
                        .arg(
                            type_arg("mortgage|auto|personal|student|other")
                                .default_value("personal"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(arg!(--id <ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--name <NAME>))
                        .arg(arg!(--amount <AMOUNT>))
                        .arg(arg!(--remaining <AMOUNT>))
                        .arg(arg!(--rate <PCT>))
                        .arg(arg!(--start <DATE>))
                        .arg(arg!(--end <DATE>))
                        .arg(arg!(--payment <AMOUNT>))
                        .arg(arg!(--frequency <FREQ>))
                        .arg(type_arg("mortgage|auto|personal|student|other")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(arg!(--id <ID>).required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("summary")))
                .subcommand(json_flags(
                    Command::new("reminders")
                        .arg(arg!(--filter <WHICH> "all|overdue|upcoming").default_value("all")),
                ))
                .subcommand(
                    Command::new("pay")
                        .arg(arg!(--id <ID>).required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("emi")
                        .arg(arg!(--principal <AMOUNT>).required(true))
                        .arg(arg!(--rate <PCT>).required(true))
                        .arg(arg!(--months <N>).required(true).value_parser(value_parser!(u32))),
                ),
        )
        .subcommand(
            Command::new("invest")
                .about("Investment suggestions and projections")
                .subcommand(json_flags(
                    Command::new("advise")
                        .arg(arg!(--risk <LEVEL> "low|medium|high").default_value("medium"))
                        .arg(arg!(--goal <GOAL>).required(true))
                        .arg(arg!(--horizon <HORIZON>).default_value("5-10 years")),
                ))
                .subcommand(
                    Command::new("project")
                        .arg(arg!(--initial <AMOUNT>).default_value("10000"))
                        .arg(arg!(--monthly <AMOUNT>).default_value("500"))
                        .arg(arg!(--rate <PCT> "Expected annual return").default_value("8"))
                        .arg(arg!(--horizon <HORIZON>).default_value("5-10 years")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export dashboard data")
                .subcommand(
                    Command::new("transactions")
                        .arg(arg!(--format <FMT> "csv|json").default_value("csv"))
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
