mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

use crate::commands::{completions, list, search, show, summary, Context};
use crate::error::{exit_code_for, invalid_input, report_error};
use crate::util::resolve_now;
use custlink_config as config;
use custlink_core::Catalog;
use custlink_load::load_rows;

#[derive(Debug, Parser)]
#[command(name = "custlink", version, about = "custlink CLI")]
struct Cli {
    /// SDR contact registry (.csv or .json)
    #[arg(long, global = true)]
    sdr: Option<PathBuf>,
    /// Zomato order log (.csv or .json)
    #[arg(long, global = true)]
    orders: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference time for activity status; defaults to the current time
    #[arg(long, global = true)]
    now: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show match counts for the loaded sources
    Summary,
    /// Show one customer profile by page number
    Show(show::ShowArgs),
    /// Find the page for a phone number
    Search(search::SearchArgs),
    /// List matched customers with their page numbers
    List(list::ListArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        sdr,
        orders,
        config: config_path,
        now,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let sdr_path = sdr
        .or_else(|| app_config.sources.sdr.clone())
        .ok_or_else(|| invalid_input("no SDR file given: pass --sdr or set sources.sdr"))?;
    let orders_path = orders
        .or_else(|| app_config.sources.orders.clone())
        .ok_or_else(|| invalid_input("no order file given: pass --orders or set sources.orders"))?;
    let now = resolve_now(now.as_deref(), app_config.catalog.utc_offset)?;

    let sdr_rows = load_rows(&sdr_path)
        .with_context(|| format!("load sdr rows from {}", sdr_path.display()))?;
    let order_rows = load_rows(&orders_path)
        .with_context(|| format!("load order rows from {}", orders_path.display()))?;

    let catalog = Catalog::from_rows(&sdr_rows, &order_rows, now, &app_config.catalog)
        .with_context(|| "build customer catalog")?;
    log_build(&catalog);

    let ctx = Context {
        catalog: &catalog,
        json,
        config: &app_config,
    };

    match command {
        Command::Summary => summary::summary(&ctx),
        Command::Show(args) => show::show_profile(&ctx, args),
        Command::Search(args) => search::search(&ctx, args),
        Command::List(args) => list::list_profiles(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before loading sources")
        }
    }
}

fn log_build(catalog: &Catalog) {
    let stats = catalog.stats();
    if !stats.warnings.is_empty() {
        warn!(count = stats.warnings.len(), "rows converted with warnings");
        for message in &stats.warnings {
            debug!("{message}");
        }
    }
    if stats.sdr_unmatchable > 0 || stats.order_unmatchable > 0 {
        warn!(
            sdr = stats.sdr_unmatchable,
            orders = stats.order_unmatchable,
            "rows without a usable phone number"
        );
    }
    debug!(
        sdr_keys = stats.sdr_keys,
        order_keys = stats.order_keys,
        matched = stats.matched,
        "catalog built"
    );
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
