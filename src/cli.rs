// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("granularity")
            .long("granularity")
            .short('g')
            .value_name("day|week|month|year")
            .help("Limit to the day/week/month/year around --anchor"),
    )
    .arg(
        Arg::new("anchor")
            .long("anchor")
            .value_name("YYYY-MM-DD")
            .requires("granularity")
            .help("Reference date (default: today)"),
    )
    .arg(
        Arg::new("offset")
            .long("offset")
            .value_name("N")
            .value_parser(value_parser!(i32))
            .allow_negative_numbers(true)
            .requires("granularity")
            .help("Move the range N units back (negative) or forward"),
    )
}

fn required(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

pub fn build_cli() -> Command {
    Command::new("chitieu")
        .about("Wallets, transactions and spending statistics from the command line")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the local settings database"))
        .subcommand(
            Command::new("config")
                .about("Local settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-api").arg(required("url")))
                .subcommand(
                    Command::new("set-locale")
                        .arg(required("locale").value_parser(["en", "vi"])),
                ),
        )
        .subcommand(
            Command::new("auth")
                .about("Log in and out of the backend")
                .subcommand(
                    Command::new("login")
                        .arg(required("username"))
                        .arg(required("password")),
                )
                .subcommand(
                    Command::new("register")
                        .arg(required("email"))
                        .arg(required("username"))
                        .arg(required("password")),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand(output_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(required("balance"))
                        .arg(required("type").value_name("cash|bank|e-wallet"))
                        .arg(Arg::new("icon_url").long("icon-url"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").arg(required("id").value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(output_flags(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .default_value("all")
                            .value_name("all|income|expense"),
                    ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(required("type").value_name("income|expense")),
                )
                .subcommand(
                    Command::new("rm").arg(required("id").value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(required("amount"))
                        .arg(required("wallet_id").long("wallet-id").value_parser(value_parser!(i64)))
                        .arg(
                            required("category_id")
                                .long("category-id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_name("income|expense"),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(output_flags(range_args(
                    Command::new("list")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .value_name("all|income|expense"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Statistics")
                .subcommand(
                    range_args(Command::new("range"))
                        .about("Show the resolved date range")
                        .mut_arg("granularity", |a| a.required(true)),
                )
                .subcommand(output_flags(range_args(Command::new("by-category"))))
                .subcommand(output_flags(range_args(Command::new("by-wallet"))))
                .subcommand(output_flags(range_args(Command::new("monthly"))))
                .subcommand(output_flags(Command::new("overview")))
                .subcommand(output_flags(range_args(Command::new("dashboard")))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(range_args(
                    Command::new("transactions")
                        .arg(
                            required("format")
                                .value_name("csv|json")
                                .default_value("csv")
                                .required(false),
                        )
                        .arg(required("out")),
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn negative_offset_is_accepted() {
        let m = build_cli()
            .try_get_matches_from([
                "chitieu", "report", "by-category", "-g", "month", "--offset", "-2",
            ])
            .unwrap();
        let (_, report) = m.subcommand().unwrap();
        let (_, sub) = report.subcommand().unwrap();
        assert_eq!(sub.get_one::<i32>("offset"), Some(&-2));
    }
}
