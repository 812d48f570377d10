use crate::db::log::last_date_for;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

#[derive(Debug, Default, PartialEq)]
pub struct DbCounts {
    pub stops: i64,
    pub events: i64,
    /// Events whose stop is not in the cached stop list.
    pub dangling_events: i64,
}

pub fn counts(pool: &mut DbPool) -> AppResult<DbCounts> {
    let stops: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM stops", [], |row| row.get(0))?;
    let events: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
    let dangling_events: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM events e
         WHERE NOT EXISTS (SELECT 1 FROM stops s WHERE s.id = e.stop_id)",
        [],
        |row| row.get(0),
    )?;

    Ok(DbCounts {
        stops,
        events,
        dangling_events,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) SNAPSHOT
    //
    let c = counts(pool)?;
    println!("{}• Stops:{} {}{}{}", CYAN, RESET, GREEN, c.stops, RESET);
    println!("{}• Reports:{} {}{}{}", CYAN, RESET, GREEN, c.events, RESET);
    if c.dangling_events > 0 {
        println!(
            "{}• Reports on unknown stops:{} {}{}{}",
            CYAN, RESET, YELLOW, c.dangling_events, RESET
        );
    }

    //
    // 3) LAST SYNC
    //
    let last_sync = last_date_for(&pool.conn, "sync")?
        .and_then(|raw| {
            chrono::DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .ok()
        })
        .unwrap_or_else(|| format!("{GREY}never{RESET}"));
    println!("{}• Last sync:{} {}", CYAN, RESET, last_sync);

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::replace_snapshot;
    use crate::models::event::Event;
    use crate::models::stop::Stop;

    #[test]
    fn counts_dangling_reports() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let stop = Stop {
            id: "1".into(),
            name: "Bałtyk".into(),
            latitude: 52.4,
            longitude: 16.9,
            zone: "A".into(),
            route_type: "0".into(),
            headsigns: "5".into(),
        };
        let ev = |id: &str, stop_id: &str| Event {
            id: id.into(),
            stop_id: stop_id.into(),
            kind: "Wypadek".into(),
            description: String::new(),
            timestamp: 0,
            created_by: None,
            likes: 0,
            dislikes: 0,
        };
        replace_snapshot(&mut pool, &[stop], &[ev("e1", "1"), ev("e2", "404")]).unwrap();

        assert_eq!(
            counts(&mut pool).unwrap(),
            DbCounts {
                stops: 1,
                events: 2,
                dangling_events: 1
            }
        );
    }
}
