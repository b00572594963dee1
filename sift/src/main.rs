use colored::Colorize;
use commands::command_argument_builder;
use sift::handlers::{
    AppPaths, handle_add, handle_classify, handle_init, handle_sources, handle_workspace_create,
    handle_workspace_list, handle_workspace_remove, handle_workspace_rename,
    handle_workspace_settings,
};
use sift_core::print_banner;
use tracing_subscriber::EnvFilter;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    init_tracing(chosen_command.get_flag("verbose"));

    // Banner only for interactive commands; classify and sources may be piped
    let wants_banner = matches!(chosen_command.subcommand_name(), None | Some("init"));
    if !quiet && wants_banner {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    let paths = AppPaths::from_matches(&chosen_command);
    let result = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command, &paths),
        Some(("workspace", primary_command)) => match primary_command.subcommand() {
            Some(("create", secondary_command)) => {
                handle_workspace_create(secondary_command, &paths)
            }
            Some(("remove", secondary_command)) => {
                handle_workspace_remove(secondary_command, &paths)
            }
            Some(("list", _)) => handle_workspace_list(&paths),
            Some(("settings", secondary_command)) => {
                handle_workspace_settings(secondary_command, &paths)
            }
            Some(("rename", secondary_command)) => {
                handle_workspace_rename(secondary_command, &paths)
            }
            _ => unreachable!("clap should ensure we don't get here"),
        },
        Some(("classify", primary_command)) => handle_classify(primary_command, &paths),
        Some(("add", primary_command)) => handle_add(primary_command, &paths),
        Some(("sources", primary_command)) => handle_sources(primary_command, &paths),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
