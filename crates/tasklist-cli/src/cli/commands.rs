//! # CLI Layer
//!
//! The **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides exit codes
//! - Chooses and builds the concrete datastore
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, see `setup.rs`
//! 2. **Context Setup**: config, logging, datastore, [`TaskListApi`]
//! 3. **Dispatch**: console loop, single command, or HTTP server
//! 4. **Error Handling**: `anyhow` up to `main`, which exits with status 1

use super::console::run_console;
use super::render::render_result;
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;
use tasklist::api::TaskListApi;
use tasklist::config::{BackendKind, TaskListConfig};
use tasklist::datastore::fs::FileDatastore;
use tasklist::datastore::memory::InMemoryDatastore;
use tasklist::datastore::Datastore;
use tasklist::dispatch::{handle_command_line, USAGE};
use tasklist::logging;
use tracing::info;

type DynApi = TaskListApi<Box<dyn Datastore>>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = TaskListConfig::load(cli.config.as_deref()).context("loading configuration")?;
    logging::init(config.log_format()?, logging::default_filter(cli.verbose));

    let api = create_api(&cli, &config)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_console(&api, stdin.lock(), &mut stdout)?;
            Ok(())
        }
        Commands::Exec { words } => handle_exec(&api, &words.join(" ")),
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            handle_serve(api, &bind)
        }
    }
}

/// Build the record store over the datastore chosen by flags, then config.
fn create_api(cli: &Cli, config: &TaskListConfig) -> Result<DynApi> {
    let backend = if cli.memory {
        BackendKind::Memory
    } else if cli.data_dir.is_some() {
        BackendKind::File
    } else {
        config.backend()?
    };

    let store: Box<dyn Datastore> = match backend {
        BackendKind::Memory => {
            info!("using in-memory datastore");
            Box::new(InMemoryDatastore::new())
        }
        BackendKind::File => {
            let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
            info!(data_dir = %data_dir.display(), "using file datastore");
            Box::new(FileDatastore::new(data_dir))
        }
    };

    let kind = cli.kind.clone().unwrap_or_else(|| config.kind.clone());
    if kind.trim().is_empty() {
        bail!("kind must not be empty");
    }
    Ok(TaskListApi::with_kind(store, kind))
}

fn handle_exec(api: &DynApi, line: &str) -> Result<()> {
    let mut stdout = io::stdout();
    match handle_command_line(api, line) {
        Ok(result) => {
            write!(stdout, "{}", render_result(&result))?;
            Ok(())
        }
        Err(err) => {
            if err.is_validation() {
                eprint!("{}", USAGE);
            }
            Err(err.into())
        }
    }
}

fn handle_serve(api: DynApi, bind: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    runtime
        .block_on(tasklist::http::serve(Arc::new(api), bind))
        .with_context(|| format!("serving on {}", bind))
}
