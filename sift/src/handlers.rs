use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use serde_json::Value;
use sift_core::classify::Classifier;
use sift_core::config::{DEFAULT_PATTERNS_FILE, PatternConfig};
use sift_core::data::{DEFAULT_DB_FILE, Database, WorkspaceConfig};
use sift_core::error::StoreError;
use sift_core::IngestReport;
use sift_core::report::{ReportFormat, render_ingest_report, render_sources};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

/// Where the database and pattern file live for this invocation
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub db_path: PathBuf,
    pub patterns_path: PathBuf,
}

impl AppPaths {
    pub fn new(config_dir: &str, patterns: Option<&PathBuf>) -> Self {
        let expanded = shellexpand::tilde(config_dir);
        let config_dir = PathBuf::from(expanded.as_ref());
        let patterns_path = patterns
            .cloned()
            .unwrap_or_else(|| config_dir.join(DEFAULT_PATTERNS_FILE));
        Self {
            db_path: config_dir.join(DEFAULT_DB_FILE),
            patterns_path,
            config_dir,
        }
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let config_dir = matches
            .get_one::<String>("config-dir")
            .map(String::as_str)
            .unwrap_or("~/.config/sift/");
        Self::new(config_dir, matches.get_one::<PathBuf>("patterns"))
    }
}

/// Paths `init` writes to: an explicit PATH replaces the config directory,
/// but a `--patterns` override still wins for the pattern file
pub fn init_target(
    paths: &AppPaths,
    dir: Option<&String>,
    patterns: Option<&PathBuf>,
) -> AppPaths {
    match dir {
        Some(dir) => AppPaths::new(dir, patterns),
        None => paths.clone(),
    }
}

// Helper functions for ingestion handlers

/// Read pasted text from a file, or from stdin when no file is given
pub fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read sources from stdin")?;
            Ok(buffer)
        }
    }
}

pub fn load_classifier(paths: &AppPaths) -> Result<Classifier> {
    let patterns = PatternConfig::load_or_default(&paths.patterns_path).with_context(|| {
        format!(
            "Failed to load patterns from {}",
            paths.patterns_path.display()
        )
    })?;
    Ok(Classifier::new(patterns))
}

pub fn open_database(paths: &AppPaths) -> Result<Database> {
    if !Database::exists(&paths.db_path) {
        bail!(
            "No database at {}. Run `sift init` first.",
            paths.db_path.display()
        );
    }
    Database::new(&paths.db_path)
        .with_context(|| format!("Failed to open database {}", paths.db_path.display()))
}

pub fn parse_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

/// Accepts y/yes in any case; anything else declines
pub fn parse_confirmation(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Classify a paste against the workspace's current sources
pub fn review_batch(
    db: &Database,
    classifier: &Classifier,
    workspace: &str,
    text: &str,
) -> Result<(WorkspaceConfig, IngestReport)> {
    let snapshot = db.load_workspace(workspace)?;
    let report = classifier.ingest(text, &snapshot.sources);
    Ok((snapshot, report))
}

/// Append the accepted candidates to the snapshot they were reviewed against.
/// Returns the number of sources added and the new workspace version.
pub fn commit_batch(
    db: &Database,
    snapshot: &WorkspaceConfig,
    report: &IngestReport,
) -> Result<(usize, i64)> {
    let accepted = report.accepted();
    let merged = report.merged_with(&snapshot.sources);
    match db.save_sources(&snapshot.name, snapshot.version, &merged) {
        Ok(version) => Ok((accepted.len(), version)),
        Err(e @ StoreError::VersionConflict { .. }) => Err(anyhow::Error::new(e).context(
            "Sources changed while you were reviewing. Run `sift add` again to review against the latest list.",
        )),
        Err(e) => Err(e.into()),
    }
}

/// Replace a workspace's settings with the JSON object in `text`
pub fn apply_settings(db: &Database, workspace: &str, text: &str) -> Result<()> {
    let settings: Value = serde_json::from_str(text).context("Settings are not valid JSON")?;
    if !settings.is_object() {
        bail!("Settings must be a JSON object");
    }
    db.save_settings(workspace, &settings)?;
    Ok(())
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response)
}

pub fn handle_init(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    print_divider();
    println!("{}", "  SIFT INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let paths = init_target(
        paths,
        args.get_one::<String>("PATH"),
        args.get_one::<PathBuf>("patterns"),
    );
    let force = args.get_flag("force");

    println!(
        "{} Target: {}",
        "→".blue(),
        paths.config_dir.display().to_string().bright_white()
    );
    println!();

    let db_exists = Database::exists(&paths.db_path);
    let patterns_exist = paths.patterns_path.exists();

    if (db_exists || patterns_exist) && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("An existing installation was found:");
        for existing in [&paths.db_path, &paths.patterns_path] {
            if existing.exists() {
                println!(
                    "  {} {}",
                    "•".yellow(),
                    existing.display().to_string().bright_white()
                );
            }
        }
        println!();
        let response = print_prompt("Overwrite it? Workspaces will be lost. [y/N]:")?;
        if !parse_confirmation(&response) {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
        println!("{} Proceeding with overwrite", "→".yellow().bold());
        println!();
    }

    create_configuration_assets(&paths)?;

    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Next: {}",
        "→".blue(),
        "sift workspace create -n <NAME>".bright_white()
    );
    Ok(())
}

fn create_configuration_assets(paths: &AppPaths) -> Result<()> {
    println!("{} Creating directory structure...", "→".blue());
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "Failed to create config directory {}",
            paths.config_dir.display()
        )
    })?;
    println!(
        "  {} {}",
        "✓".green(),
        paths.config_dir.display().to_string().bright_white()
    );

    println!("{} Writing default patterns...", "→".blue());
    let patterns = PatternConfig::default();
    patterns.save(&paths.patterns_path)?;
    println!(
        "  {} {} ({} ignore markers, {} ignored hosts)",
        "✓".green().bold(),
        paths.patterns_path.display().to_string().bright_white(),
        patterns.ignore_markers.len().to_string().cyan(),
        patterns.ignore_hosts.len().to_string().cyan()
    );

    if Database::exists(&paths.db_path) {
        Database::drop(&paths.db_path)?;
        println!("  {} Existing database removed", "✓".green().bold());
    }
    println!("{} Creating database...", "→".blue());
    Database::new(&paths.db_path)?;
    println!(
        "  {} {}",
        "✓".green().bold(),
        paths.db_path.display().to_string().bright_white()
    );
    println!();
    Ok(())
}

pub fn handle_workspace_create(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let name = args.get_one::<String>("name").context("--name is required")?;
    let db = open_database(paths)?;
    db.create_workspace(name)?;
    println!("{} Created workspace {}", "✓".green().bold(), name.bright_white());
    Ok(())
}

pub fn handle_workspace_remove(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let name = args.get_one::<String>("name").context("--name is required")?;
    let db = open_database(paths)?;
    db.remove_workspace(name)?;
    println!("{} Removed workspace {}", "✓".green().bold(), name.bright_white());
    Ok(())
}

pub fn handle_workspace_list(paths: &AppPaths) -> Result<()> {
    let db = open_database(paths)?;
    let workspaces = db.list_workspaces()?;
    if workspaces.is_empty() {
        println!("{} No workspaces yet", "→".blue());
        return Ok(());
    }

    for workspace in workspaces {
        let updated = chrono::DateTime::from_timestamp(workspace.updated_at, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {} {:<24} {} sources  v{}  {}",
            "•".cyan(),
            workspace.name.bright_white(),
            workspace.source_count.to_string().cyan(),
            workspace.version,
            updated.dimmed()
        );
    }
    Ok(())
}

pub fn handle_workspace_rename(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let old_name = args
        .get_one::<String>("old-name")
        .context("--old-name is required")?;
    let new_name = args
        .get_one::<String>("new-name")
        .context("--new-name is required")?;
    let db = open_database(paths)?;
    db.rename_workspace(old_name, new_name)?;
    println!(
        "{} Renamed workspace {} to {}",
        "✓".green().bold(),
        old_name.bright_white(),
        new_name.bright_white()
    );
    Ok(())
}

pub fn handle_workspace_settings(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let name = args.get_one::<String>("name").context("--name is required")?;
    let db = open_database(paths)?;
    match args.get_one::<PathBuf>("input") {
        Some(input) => {
            apply_settings(&db, name, &read_input(Some(input))?)?;
            println!(
                "{} Updated settings for {}",
                "✓".green().bold(),
                name.bright_white()
            );
        }
        None => {
            let workspace = db.load_workspace(name)?;
            println!("{}", serde_json::to_string_pretty(&workspace.settings)?);
        }
    }
    Ok(())
}

pub fn handle_classify(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let text = read_input(args.get_one::<PathBuf>("input"))?;
    let classifier = load_classifier(paths)?;
    let report = classifier.ingest(&text, &[]);
    print!("{}", render_ingest_report(&report, parse_format(args))?);
    Ok(())
}

pub fn handle_add(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let workspace = args
        .get_one::<String>("workspace")
        .context("--workspace is required")?;
    let yes = args.get_flag("yes");
    let dry_run = args.get_flag("dry-run");

    // Read the paste before touching the database so stdin is drained first
    let text = read_input(args.get_one::<PathBuf>("input"))?;
    let db = open_database(paths)?;
    let classifier = load_classifier(paths)?;

    let (snapshot, report) = review_batch(&db, &classifier, workspace, &text)?;
    print!("{}", render_ingest_report(&report, ReportFormat::Text)?);
    println!();

    let new_count = report.accepted().len();
    if new_count == 0 {
        println!("{} Nothing new to add", "→".blue());
        return Ok(());
    }
    if dry_run {
        println!(
            "{} Dry run: {} source(s) would be added to {}",
            "→".yellow().bold(),
            new_count.to_string().cyan(),
            workspace.bright_white()
        );
        return Ok(());
    }
    if !yes {
        // stdin is already consumed when the paste came from a pipe
        if args.get_one::<PathBuf>("input").is_none() {
            bail!("Sources were read from stdin; pass --yes to add them without a prompt");
        }
        let response = print_prompt(&format!(
            "Add {} source(s) to {}? [y/N]:",
            new_count, workspace
        ))?;
        if !parse_confirmation(&response) {
            println!("{} Nothing added.", "✗".red().bold());
            return Ok(());
        }
    }

    let (added, version) = commit_batch(&db, &snapshot, &report)?;
    debug!(workspace = %workspace, version, "sources saved");
    println!(
        "{} Added {} source(s) to {}",
        "✓".green().bold(),
        added.to_string().cyan(),
        workspace.bright_white()
    );
    Ok(())
}

pub fn handle_sources(args: &ArgMatches, paths: &AppPaths) -> Result<()> {
    let workspace = args
        .get_one::<String>("workspace")
        .context("--workspace is required")?;
    let db = open_database(paths)?;
    let config = db.load_workspace(workspace)?;
    if config.sources.is_empty() && parse_format(args) == ReportFormat::Text {
        println!("{} {} has no sources yet", "→".blue(), workspace.bright_white());
        return Ok(());
    }
    print!("{}", render_sources(&config.sources, parse_format(args))?);
    Ok(())
}

