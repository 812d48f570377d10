use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Date of the most recent log line for `operation`, if any.
pub fn last_date_for(conn: &Connection, operation: &str) -> AppResult<Option<String>> {
    let date = conn
        .query_row(
            "SELECT date FROM log WHERE operation = ?1 ORDER BY id DESC LIMIT 1",
            [operation],
            |row| row.get(0),
        )
        .optional()?;
    Ok(date)
}
