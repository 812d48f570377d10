//! tramreport library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! reconciliation engine, gateway and local store modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use gateway::HttpGateway;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // Only commands that talk to the backend build a client.
    let http = || HttpGateway::from_config(cfg);

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Register { .. }
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Me => commands::auth::handle(&cli.command, cfg, &http()?),
        Commands::Sync => commands::sync::handle(cfg, &http()?),
        Commands::Stops { .. } => commands::stops::handle(&cli.command, cfg),
        Commands::Map { refresh, .. } => {
            let gw = if *refresh { Some(http()?) } else { None };
            commands::map::handle(
                &cli.command,
                cfg,
                gw.as_ref().map(|g| g as &dyn gateway::Gateway),
            )
        }
        Commands::Reports { remote, .. } => {
            let gw = if *remote { Some(http()?) } else { None };
            commands::reports::handle(
                &cli.command,
                cfg,
                gw.as_ref().map(|g| g as &dyn gateway::Gateway),
            )
        }
        Commands::Show { .. } => commands::reports::handle_show(&cli.command, cfg, &http()?),
        Commands::Report { .. } | Commands::Like { .. } | Commands::Dislike { .. } => {
            commands::report::handle(&cli.command, cfg, &http()?)
        }
        Commands::Feed { .. } => commands::feed::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    // command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(api) = &cli.api {
        cfg.api_base_url = api.clone();
    }

    dispatch(&cli, &cfg)
}
