use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::stop::Stop;
use crate::models::user::User;
use rusqlite::{OptionalExtension, Result, Row, params};

// ---------------------------
// Stops
// ---------------------------

fn map_stop(row: &Row) -> Result<Stop> {
    Ok(Stop {
        id: row.get("id")?,
        name: row.get("name")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        zone: row.get("zone")?,
        route_type: row.get("route_type")?,
        headsigns: row.get("headsigns")?,
    })
}

/// Cached stops, in the order the backend returned them.
pub fn load_stops(pool: &mut DbPool) -> AppResult<Vec<Stop>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, name, latitude, longitude, zone, route_type, headsigns
         FROM stops
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([], map_stop)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_stop(pool: &mut DbPool, id: &str) -> AppResult<Option<Stop>> {
    let stop = pool
        .conn
        .query_row(
            "SELECT id, name, latitude, longitude, zone, route_type, headsigns
             FROM stops WHERE id = ?1",
            [id],
            map_stop,
        )
        .optional()?;
    Ok(stop)
}

// ---------------------------
// Events
// ---------------------------

fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        stop_id: row.get("stop_id")?,
        kind: row.get("kind")?,
        description: row.get("description")?,
        timestamp: row.get("timestamp")?,
        created_by: row.get("created_by")?,
        likes: row.get("likes")?,
        dislikes: row.get("dislikes")?,
    })
}

/// Cached events, newest first.
pub fn load_events(pool: &mut DbPool) -> AppResult<Vec<Event>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, stop_id, kind, description, timestamp, created_by, likes, dislikes
         FROM events
         ORDER BY timestamp DESC, id ASC",
    )?;

    let rows = stmt.query_map([], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_event(pool: &mut DbPool, id: &str) -> AppResult<Option<Event>> {
    let ev = pool
        .conn
        .query_row(
            "SELECT id, stop_id, kind, description, timestamp, created_by, likes, dislikes
             FROM events WHERE id = ?1",
            [id],
            map_event,
        )
        .optional()?;
    Ok(ev)
}

/// Insert or replace one event (after submitting a report or fetching one).
pub fn upsert_event(pool: &mut DbPool, ev: &Event) -> AppResult<()> {
    pool.conn.execute(
        "INSERT OR REPLACE INTO events
            (id, stop_id, kind, description, timestamp, created_by, likes, dislikes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ev.id,
            ev.stop_id,
            ev.kind,
            ev.description,
            ev.timestamp,
            ev.created_by,
            ev.likes,
            ev.dislikes
        ],
    )?;
    Ok(())
}

/// Store the counts returned by a like/dislike call.
/// Returns false when the event is not in the cache.
pub fn update_event_counts(
    pool: &mut DbPool,
    id: &str,
    likes: u32,
    dislikes: u32,
) -> AppResult<bool> {
    let n = pool.conn.execute(
        "UPDATE events SET likes = ?1, dislikes = ?2 WHERE id = ?3",
        params![likes, dislikes, id],
    )?;
    Ok(n > 0)
}

// ---------------------------
// Snapshot
// ---------------------------

/// Replace the cached stops and events wholesale, in one transaction.
pub fn replace_snapshot(pool: &mut DbPool, stops: &[Stop], events: &[Event]) -> AppResult<()> {
    let tx = pool.conn.transaction()?;

    tx.execute("DELETE FROM stops", [])?;
    tx.execute("DELETE FROM events", [])?;

    {
        let mut ins_stop = tx.prepare(
            "INSERT OR REPLACE INTO stops
                (id, seq, name, latitude, longitude, zone, route_type, headsigns)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for (seq, s) in stops.iter().enumerate() {
            ins_stop.execute(params![
                s.id,
                seq as i64,
                s.name,
                s.latitude,
                s.longitude,
                s.zone,
                s.route_type,
                s.headsigns
            ])?;
        }

        let mut ins_event = tx.prepare(
            "INSERT OR REPLACE INTO events
                (id, stop_id, kind, description, timestamp, created_by, likes, dislikes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for ev in events {
            ins_event.execute(params![
                ev.id,
                ev.stop_id,
                ev.kind,
                ev.description,
                ev.timestamp,
                ev.created_by,
                ev.likes,
                ev.dislikes
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}

// ---------------------------
// Session
// ---------------------------

pub fn save_session(
    pool: &mut DbPool,
    token: &str,
    user: &User,
    logged_in_at: &str,
) -> AppResult<()> {
    pool.conn.execute(
        "INSERT OR REPLACE INTO session
            (id, token, user_id, username, email, user_created_at, logged_in_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            token,
            user.id,
            user.username,
            user.email,
            user.created_at,
            logged_in_at
        ],
    )?;
    Ok(())
}

/// Stored (token, user, logged_in_at), if any.
pub fn load_session(pool: &mut DbPool) -> AppResult<Option<(String, User, String)>> {
    let row = pool
        .conn
        .query_row(
            "SELECT token, user_id, username, email, user_created_at, logged_in_at
             FROM session WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    User {
                        id: row.get(1)?,
                        username: row.get(2)?,
                        email: row.get(3)?,
                        created_at: row.get(4)?,
                    },
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;
    Ok(row)
}

pub fn clear_session(pool: &mut DbPool) -> AppResult<bool> {
    let n = pool.conn.execute("DELETE FROM session", [])?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn stop(id: &str, headsigns: &str) -> Stop {
        Stop {
            id: id.into(),
            name: format!("Stop {id}"),
            latitude: 52.4,
            longitude: 16.9,
            zone: "A".into(),
            route_type: "3".into(),
            headsigns: headsigns.into(),
        }
    }

    fn event(id: &str, stop_id: &str, ts: i64) -> Event {
        Event {
            id: id.into(),
            stop_id: stop_id.into(),
            kind: "Awaria".into(),
            description: String::new(),
            timestamp: ts,
            created_by: Some("u1".into()),
            likes: 0,
            dislikes: 0,
        }
    }

    #[test]
    fn snapshot_keeps_stop_order_and_sorts_events() {
        let mut p = pool();
        let stops = vec![stop("z", "4"), stop("a", "148"), stop("m", "")];
        let events = vec![event("e1", "a", 10), event("e2", "z", 20)];
        replace_snapshot(&mut p, &stops, &events).unwrap();

        assert_eq!(load_stops(&mut p).unwrap(), stops);
        let ids: Vec<String> = load_events(&mut p).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e2", "e1"]);
    }

    #[test]
    fn snapshot_is_replaced_wholesale() {
        let mut p = pool();
        replace_snapshot(&mut p, &[stop("1", "4")], &[event("e1", "1", 1)]).unwrap();
        replace_snapshot(&mut p, &[stop("2", "5")], &[]).unwrap();

        assert!(find_stop(&mut p, "1").unwrap().is_none());
        assert!(find_stop(&mut p, "2").unwrap().is_some());
        assert!(load_events(&mut p).unwrap().is_empty());
    }

    #[test]
    fn counts_update_only_known_events() {
        let mut p = pool();
        upsert_event(&mut p, &event("e1", "1", 1)).unwrap();
        assert!(update_event_counts(&mut p, "e1", 7, 2).unwrap());
        assert!(!update_event_counts(&mut p, "nope", 1, 1).unwrap());

        let e = find_event(&mut p, "e1").unwrap().unwrap();
        assert_eq!((e.likes, e.dislikes), (7, 2));
    }

    #[test]
    fn session_round_trip_and_clear() {
        let mut p = pool();
        let user = User {
            id: "u1".into(),
            username: "ola".into(),
            email: "ola@example.com".into(),
            created_at: None,
        };
        save_session(&mut p, "tok", &user, "2026-01-01T10:00:00+01:00").unwrap();
        let (token, u, _) = load_session(&mut p).unwrap().unwrap();
        assert_eq!(token, "tok");
        assert_eq!(u, user);

        assert!(clear_session(&mut p).unwrap());
        assert!(load_session(&mut p).unwrap().is_none());
    }
}
