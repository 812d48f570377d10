pub mod auth;
pub mod config;
pub mod db;
pub mod export;
pub mod feed;
pub mod init;
pub mod log;
pub mod map;
pub mod report;
pub mod reports;
pub mod stops;
pub mod sync;

use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::io::{self, Write};

/// Open the configured store, applying pending migrations.
pub(crate) fn open_store(cfg: &Config) -> AppResult<DbPool> {
    open_ready(&cfg.database)
}

/// Use the given password or read one line from stdin.
pub(crate) fn password_or_prompt(given: &Option<String>) -> AppResult<String> {
    if let Some(p) = given {
        return Ok(p.clone());
    }

    print!("Password: ");
    io::stdout().flush().ok();

    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}
