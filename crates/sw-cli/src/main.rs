use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use sw_core::EventStore;
use sw_db::Database;
use tracing_subscriber::EnvFilter;

use sw_cli::commands::{add, delete, list, log, month, rename, show, status, util};
use sw_cli::{Cli, Commands, Config};

/// Load config and open the event store, ensuring the database directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(EventStore<Database>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    let store = EventStore::open(db).context("failed to load events")?;
    Ok((store, config))
}

/// Resolves `--as-of`, defaulting to today.
fn reference_date(as_of: Option<&str>) -> Result<chrono::NaiveDate> {
    let today = util::today();
    as_of.map_or(Ok(today), |s| util::parse_date(s, today))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // stdout is reserved for command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut out = io::stdout().lock();

    match &cli.command {
        Some(Commands::Add { name, on }) => {
            let on = on
                .as_deref()
                .map(|s| util::parse_past_date(Some(s), util::today()))
                .transpose()?;
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            add::run(&mut out, &mut store, name, on)?;
        }
        Some(Commands::Log { event, on }) => {
            let date = util::parse_past_date(on.as_deref(), util::today())?;
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            log::run(&mut out, &mut store, event, date)?;
        }
        Some(Commands::Unlog { event, on }) => {
            let date = util::parse_date(on, util::today())?;
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            log::unlog(&mut out, &mut store, event, date)?;
        }
        Some(Commands::Rename { event, new_name }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            rename::run(&mut out, &mut store, event, new_name)?;
        }
        Some(Commands::Delete { event }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            delete::run(&mut out, &mut store, event)?;
        }
        Some(Commands::List {
            recent,
            json,
            as_of,
        }) => {
            let today = reference_date(as_of.as_deref())?;
            let (store, _config) = open_store(cli.config.as_deref())?;
            list::run(&mut out, &store, today, *recent, *json)?;
        }
        Some(Commands::Show { event, as_of }) => {
            let today = reference_date(as_of.as_deref())?;
            let (store, _config) = open_store(cli.config.as_deref())?;
            show::run(&mut out, &store, event, today)?;
        }
        Some(Commands::Month { month: selected }) => {
            let (year, month_number) = match selected {
                Some(s) => util::parse_month(s)?,
                None => {
                    let today = util::today();
                    (today.year(), today.month())
                }
            };
            let (store, _config) = open_store(cli.config.as_deref())?;
            month::run(&mut out, &store, year, month_number)?;
        }
        Some(Commands::Status) => {
            let (store, config) = open_store(cli.config.as_deref())?;
            status::run(&mut out, &store, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
