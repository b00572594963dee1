use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sift")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sift")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log classification decisions to stderr").required(false))
        .arg(
            arg!(--"config-dir" <PATH>)
                .required(false)
                .help("Directory holding the sift database and pattern file")
                .default_value("~/.config/sift/")
                .global(true),
        )
        .arg(
            arg!(--"patterns" <PATH>)
                .required(false)
                .help("Pattern file to use instead of <config-dir>/patterns.json")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Initializes the sift database and default patterns on your filesystem")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Location to store the sift database (defaults to --config-dir)"),
                )
                .arg(
                    arg!(-f --"force")
                        .help(
                            "Forces the overwriting of any existing database and pattern file at \
                        the specified location.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("workspace")
                .about("Manage sift workspaces")
                .subcommand_required(true)
                .subcommand(
                    command!("create").about("Creates a workspace").arg(
                        arg!(-n --"name" <NAME>)
                            .required(true)
                            .help("The name of the workspace"),
                    ),
                )
                .subcommand(
                    command!("remove").about("Removes the workspace").arg(
                        arg!(-n --"name" <NAME>)
                            .required(true)
                            .help("The name of the workspace"),
                    ),
                )
                .subcommand(command!("list").about("List all workspaces"))
                .subcommand(
                    command!("settings")
                        .about(
                            "Show the workspace settings, or replace them with a JSON object \
                        read from --input",
                        )
                        .arg(
                            arg!(-n --"name" <NAME>)
                                .required(true)
                                .help("The name of the workspace"),
                        )
                        .arg(
                            arg!(-i --"input" <PATH>)
                                .required(false)
                                .help("JSON file holding the new settings object")
                                .value_parser(clap::value_parser!(PathBuf)),
                        ),
                )
                .subcommand(
                    command!("rename")
                        .about("Renames the workspace")
                        .arg(
                            arg!(--"old-name" <NAME>)
                                .required(true)
                                .help("The current name of the workspace"),
                        )
                        .arg(
                            arg!(--"new-name" <NAME>)
                                .required(true)
                                .help("The new name for the workspace"),
                        ),
                ),
        )
        .subcommand(
            command!("classify")
                .about(
                    "Classify pasted sources (one per line) without touching any workspace. \
                Reads stdin unless --input is given.",
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of sources")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json, markdown")
                        .value_parser(["text", "json", "markdown", "md"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("add")
                .about(
                    "Classify pasted sources, flag the ones the workspace already has, and \
                append the rest after confirmation.",
                )
                .arg(
                    arg!(-w --"workspace" <NAME>)
                        .required(true)
                        .help("The workspace to add sources to"),
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of sources")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-y --"yes")
                        .required(false)
                        .help("Add new sources without asking for confirmation")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"dry-run")
                        .required(false)
                        .help("Show the review but do not save anything")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("sources")
                .about("List the sources configured in a workspace")
                .arg(
                    arg!(-w --"workspace" <NAME>)
                        .required(true)
                        .help("The workspace to list"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json, markdown")
                        .value_parser(["text", "json", "markdown", "md"])
                        .default_value("text"),
                ),
        )
}
