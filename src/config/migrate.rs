//! Configuration file upgrades: detect and fill fields added by newer versions.

use super::Config;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use rusqlite::Connection;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

pub const KNOWN_FIELDS: [&str; 6] = [
    "database",
    "api_base_url",
    "stops_feed_url",
    "timeout_secs",
    "default_filter",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<serde_yaml::Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(serde_yaml::Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
    }
}

/// Fields from `KNOWN_FIELDS` absent in the config file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(KNOWN_FIELDS
        .into_iter()
        .filter(|f| !map.contains_key(Value::String((*f).to_string())))
        .collect())
}

/// Add every missing field with its default value and record the migration
/// in the `log` table. Returns the fields that were added.
pub fn migrate_missing_fields(conn: &Connection, path: &Path) -> AppResult<Vec<&'static str>> {
    let missing = missing_fields(path)?;
    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(missing);
    }

    let mut map = read_mapping(path)?;
    let defaults = match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => m,
        _ => return Err(AppError::ConfigSave),
    };

    for field in &missing {
        let key = Value::String((*field).to_string());
        if let Some(v) = defaults.get(&key) {
            map.insert(key, v.clone());
        }
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    let added = missing.join(", ");
    ttlog(
        conn,
        "migration_applied",
        "config",
        &format!("Added missing config fields: {}", added),
    )?;

    success(format!("Config migration applied: added {}", added));
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> std::path::PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_tramreport.conf", name));
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn detects_missing_fields() {
        let p = temp_conf("cfg_detect", "database: /tmp/a.sqlite\ntimeout_secs: 10\n");
        let missing = missing_fields(&p).unwrap();
        assert!(missing.contains(&"api_base_url"));
        assert!(!missing.contains(&"database"));
        assert!(!missing.contains(&"timeout_secs"));
    }

    #[test]
    fn migration_fills_fields_and_keeps_existing_values() {
        let p = temp_conf("cfg_migrate", "database: /tmp/b.sqlite\ntimeout_secs: 10\n");
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let added = migrate_missing_fields(&conn, &p).unwrap();
        assert_eq!(added.len(), 4);
        assert!(missing_fields(&p).unwrap().is_empty());

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/b.sqlite");
        assert_eq!(cfg.timeout_secs, 10);

        let logged: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied' AND target = 'config'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(logged, 1);
    }
}
