//! `docdesk` command-line entry point.
//!
//! Loads `docdesk.toml`, applies flag overrides, starts logging, opens the
//! SQLite store and runs one subcommand.

mod cli;
mod commands;
mod fields;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use docdesk_core::{
    init_logging, init_stderr_logging, open_db, Config, ConfigOverrides, DocumentStore,
};
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => {
            println!("docdesk_core ping={}", docdesk_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("docdesk_core version={}", docdesk_core::core_version());
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(&cli.config)?.apply(ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    });

    match config.logging.log_dir() {
        Some(dir) => init_logging(&config.logging.level, &dir.to_string_lossy())?,
        None => init_stderr_logging(&config.logging.level)?,
    }
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.database.path.display()
    );

    let conn = open_db(&config.database.path)
        .with_context(|| format!("opening `{}`", config.database.path.display()))?;
    let store = DocumentStore::new(&conn);

    let stdout = std::io::stdout();
    commands::run(&store, cli.command, &mut stdout.lock())
}
