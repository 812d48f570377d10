//! Refresh the cached stop/report snapshot from the gateway.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::replace_snapshot;
use crate::errors::AppResult;
use crate::gateway::{EventQuery, Gateway};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub stops: usize,
    pub events: usize,
    /// Reports whose stop is missing from the fetched stop list.
    pub dangling_events: usize,
}

/// Fetch stops and events and replace the cached snapshot.
///
/// Both fetches must succeed; on any gateway error the cache is left as it
/// was and the error is returned.
pub fn sync_snapshot(gw: &dyn Gateway, pool: &mut DbPool) -> AppResult<SyncSummary> {
    let stops = gw.fetch_stops()?;
    let events = gw.fetch_events(&EventQuery::default())?;

    let known: HashSet<&str> = stops.iter().map(|s| s.id.as_str()).collect();
    let dangling_events = events
        .iter()
        .filter(|e| !known.contains(e.stop_id.as_str()))
        .count();

    replace_snapshot(pool, &stops, &events)?;

    let summary = SyncSummary {
        stops: stops.len(),
        events: events.len(),
        dangling_events,
    };

    ttlog(
        &pool.conn,
        "sync",
        "",
        &format!(
            "Fetched {} stops and {} reports ({} on unknown stops)",
            summary.stops, summary.events, summary.dangling_events
        ),
    )?;

    Ok(summary)
}
