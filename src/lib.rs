//! checkrota library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg),
        Commands::Checklist { .. } => cli::commands::checklist::handle(&cli.command, cfg),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::Leave { .. } => cli::commands::leave::handle(&cli.command, cfg),
        Commands::LeaveCancel { .. } => cli::commands::leave::handle(&cli.command, cfg),
        Commands::Generate { .. } => cli::commands::generate::handle(&cli.command, cfg),
        Commands::Complete { .. } => cli::commands::complete::handle(&cli.command, cfg),
        Commands::Month { .. } => cli::commands::month::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the config once
    let mut cfg = Config::load();

    // Apply CLI overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(org) = &cli.org {
        cfg.organization = org.clone();
    }

    dispatch(&cli, &cfg)
}
