use crate::ui::messages::status;
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. Applied steps are recorded in the `log` table as
/// `migration_applied` with the version as target.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260412_0001_create_snapshot_tables",
        description: "Created stops and events snapshot tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS stops (
            id          TEXT PRIMARY KEY,
            seq         INTEGER NOT NULL,
            name        TEXT NOT NULL,
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL,
            zone        TEXT NOT NULL DEFAULT '',
            route_type  TEXT NOT NULL DEFAULT '',
            headsigns   TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS events (
            id           TEXT PRIMARY KEY,
            stop_id      TEXT NOT NULL,
            kind         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            timestamp    INTEGER NOT NULL,
            created_by   TEXT,
            likes        INTEGER NOT NULL DEFAULT 0,
            dislikes     INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_stops_seq ON stops(seq);
        CREATE INDEX IF NOT EXISTS idx_events_stop ON events(stop_id);
        CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);
        "#,
    },
    Migration {
        version: "20260412_0002_create_session_table",
        description: "Created session table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS session (
            id               INTEGER PRIMARY KEY CHECK (id = 1),
            token            TEXT NOT NULL,
            user_id          TEXT NOT NULL,
            username         TEXT NOT NULL,
            email            TEXT NOT NULL,
            user_created_at  TEXT,
            logged_in_at     TEXT NOT NULL
        );
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let batch = format!(
        "BEGIN;\n{}\nINSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', '{}', '{}');\nCOMMIT;",
        m.sql, m.version, m.description
    );

    if let Err(e) = conn.execute_batch(&batch) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(e);
    }

    status(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded as applied, in order.
pub fn pending_versions(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Called from `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
