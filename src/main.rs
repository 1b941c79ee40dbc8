//! Keysort TUI Application
//!
//! Moves files into folders by keyword. Launches the interactive UI by
//! default; `list`, `check` and `run` work without a terminal UI.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use keysort::app::AppContext;
use keysort::{Config, Language, Mover, RuleStore, Translations};

#[derive(Parser, Debug)]
#[command(name = "keysort")]
#[command(author, version, about = "Move files into folders by keyword rules")]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rule file (overrides the config)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Translation file (overrides the config)
    #[arg(long, value_name = "FILE")]
    translations: Option<PathBuf>,

    /// UI language: en, tr, fr or es
    #[arg(short, long, value_name = "CODE")]
    lang: Option<Language>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the TUI (default)
    Ui,

    /// List all rules
    List,

    /// Validate config, rule and translation files
    Check,

    /// Organize once without the UI (dry-run by default)
    Run {
        /// Actually move files (not just dry-run)
        #[arg(long)]
        apply: bool,

        /// Folder to scan; repeatable. Defaults to Downloads, Desktop, Documents
        #[arg(short, long)]
        dir: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::new(std::env::var("KEYSORT_LOG").unwrap_or_else(|_| log_level.to_string()));

    if !to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
        return Ok(());
    }

    // The terminal belongs to the UI, so logs go to a file
    let log_dir = Config::state_dir().context("Could not determine log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("keysort.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tui = matches!(cli.command, None | Some(Commands::Ui));
    init_logging(cli.verbose, tui)?;

    let config = Config::load(cli.config.as_deref())?;
    let language = cli.lang.unwrap_or(config.general.language);
    let ctx = AppContext::new(config, cli.config).with_overrides(cli.rules, cli.translations);

    match cli.command {
        None | Some(Commands::Ui) => {
            keysort::app::run(ctx, language)?;
        }
        Some(Commands::List) => {
            let store = RuleStore::new(ctx.rules_path.as_path());
            let rules = store.load()?;
            println!("Rules ({}):", store.path().display());
            for (i, rule) in rules.iter().enumerate() {
                println!(
                    "  [{}] {} -> {}",
                    i + 1,
                    rule.keywords_display(),
                    rule.destination.display()
                );
            }
        }
        Some(Commands::Check) => {
            let mut ok = true;

            println!("✓ Config is valid (language: {})", language);

            match RuleStore::new(ctx.rules_path.as_path()).load() {
                Ok(rules) => println!("✓ {} rules", rules.len()),
                Err(e) => {
                    ok = false;
                    eprintln!("✗ {}", e);
                }
            }

            match Translations::load(&ctx.translations_path) {
                Ok(t) => {
                    println!("✓ {} translation keys", t.len());
                    for lang in Language::all() {
                        let missing = t.missing_for(*lang);
                        if !missing.is_empty() {
                            println!("  {} missing: {}", lang, missing.join(", "));
                        }
                    }
                }
                Err(e) => {
                    ok = false;
                    eprintln!("✗ {:#}", e);
                }
            }

            if !ok {
                std::process::exit(1);
            }
        }
        Some(Commands::Run { apply, dir }) => {
            let rules = RuleStore::new(ctx.rules_path.as_path()).load()?;
            let roots = if dir.is_empty() {
                keysort::default_search_paths()
            } else {
                dir
            };
            if rules.is_empty() {
                anyhow::bail!("No rules in {}", ctx.rules_path.display());
            }

            let mover = Mover::new();
            if !apply {
                for (i, planned) in mover.plan_rules(&rules, &roots) {
                    println!(
                        "  [dry-run] rule {}: {} -> {}",
                        i + 1,
                        planned.source.display(),
                        planned.destination.display()
                    );
                }
                return Ok(());
            }

            let mut failed = 0usize;
            let mut moved = 0usize;
            for rule in &rules {
                let files = mover.apply_rule(rule, &roots, |failure| {
                    failed += 1;
                    eprintln!("  {}", failure);
                })?;
                for file in &files {
                    println!(
                        "  {} -> {}",
                        file.source.display(),
                        file.destination.display()
                    );
                }
                moved += files.len();
            }
            println!("{} moved, {} failed", moved, failed);
        }
    }

    Ok(())
}
