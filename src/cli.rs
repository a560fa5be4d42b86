// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg, command, value_parser};

pub fn build_cli() -> Command {
    command!()
        .about("Personal expense ledger with budgets, recurring transactions and receipt capture")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("expense")
                .about("Log and inspect expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(arg!(--merchant <MERCHANT> "Merchant or payee").required(true))
                        .arg(arg!(--amount <AMOUNT> "Amount spent").required(true))
                        .arg(arg!(--category <CATEGORY> "Category name").required(true))
                        .arg(arg!(--date <DATE> "Date YYYY-MM-DD, defaults to today"))
                        .arg(arg!(--currency <CCY> "Currency code, defaults to USD"))
                        .arg(arg!(--note <NOTE> "Free-form note"))
                        .arg(arg!(--recurring <FREQ> "Make this a recurring template: monthly|weekly|yearly"))
                        .arg(arg!(--until <DATE> "Stop recurring after this date")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(arg!(--month <MONTH> "Filter by month YYYY-MM"))
                        .arg(arg!(--category <CATEGORY> "Filter by category"))
                        .arg(
                            arg!(--limit <N> "Show at most N rows")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(arg!(--json "Print as pretty JSON"))
                        .arg(arg!(--jsonl "Print as JSON lines")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit an expense by id")
                        .arg(arg!(--id <ID> "Expense id (a unique prefix is enough)").required(true))
                        .arg(arg!(--merchant <MERCHANT> "New merchant"))
                        .arg(arg!(--amount <AMOUNT> "New amount"))
                        .arg(arg!(--category <CATEGORY> "New category"))
                        .arg(arg!(--date <DATE> "New date YYYY-MM-DD"))
                        .arg(arg!(--currency <CCY> "New currency"))
                        .arg(arg!(--note <NOTE> "New note")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage spending categories")
                .subcommand(
                    Command::new("list")
                        .about("List categories in order")
                        .arg(arg!(--json "Print as pretty JSON"))
                        .arg(arg!(--jsonl "Print as JSON lines")),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a custom category")
                        .arg(arg!(--name <NAME> "Category name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .about("Rename a category everywhere it is referenced")
                        .arg(arg!(--old <OLD> "Current name").required(true))
                        .arg(arg!(--new <NEW> "New name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets per category")
                .subcommand(
                    Command::new("set")
                        .about("Set or replace a category's monthly ceiling")
                        .arg(arg!(--category <CATEGORY> "Category name").required(true))
                        .arg(arg!(--amount <AMOUNT> "Monthly ceiling").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List budgets")
                        .arg(arg!(--json "Print as pretty JSON"))
                        .arg(arg!(--jsonl "Print as JSON lines")),
                )
                .subcommand(
                    Command::new("report")
                        .about("Spent vs budget per category for a month")
                        .arg(arg!(--month <MONTH> "Month YYYY-MM, defaults to the current month"))
                        .arg(arg!(--json "Print as pretty JSON"))
                        .arg(arg!(--jsonl "Print as JSON lines")),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Local user profile")
                .subcommand(
                    Command::new("login")
                        .about("Create the local profile")
                        .arg(arg!(--name <NAME> "Display name").required(true))
                        .arg(arg!(--email <EMAIL> "Email address").required(true)),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the profile")
                        .arg(arg!(--json "Print as pretty JSON")),
                )
                .subcommand(Command::new("logout").about("Remove the stored profile"))
                .subcommand(Command::new("onboard").about("Mark onboarding as completed")),
        )
        .subcommand(
            Command::new("plan")
                .about("Subscription plan and AI quota")
                .subcommand(Command::new("status").about("Show tier, trial window and quota"))
                .subcommand(Command::new("trial").about("Start the premium trial"))
                .subcommand(Command::new("subscribe").about("Upgrade to premium")),
        )
        .subcommand(
            Command::new("scan")
                .about("Capture a receipt image into the ledger via the assistant")
                .arg(arg!(<image> "Path to the receipt image"))
                .arg(arg!(--endpoint <URL> "Receipt service endpoint"))
                .arg(arg!(--currency <CCY> "Override the detected currency")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("expenses")
                        .about("Export the ledger")
                        .arg(arg!(--out <FILE> "Output path").required(true))
                        .arg(arg!(--format <FORMAT> "csv or json").default_value("csv")),
                )
                .subcommand(
                    Command::new("budgets")
                        .about("Export budgets")
                        .arg(arg!(--out <FILE> "Output path").required(true))
                        .arg(arg!(--format <FORMAT> "csv or json").default_value("csv")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
