//! Report operations: submit, react, list.

use crate::core::reconcile::reports_for_stop;
use crate::core::session::Session;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::gateway::{EventQuery, Gateway};
use crate::models::event::Event;
use crate::models::reaction::Reaction;
use crate::models::report_type::ReportType;

fn not_found_as_unknown(err: AppError, event_id: &str) -> AppError {
    match err {
        AppError::Api { status: 404, .. } => AppError::UnknownReport(event_id.to_string()),
        other => other,
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Submit a report for `stop_id` and add the returned event to the cache.
    ///
    /// When the cache holds stops, the stop must be one of them.
    pub fn submit(
        gw: &dyn Gateway,
        pool: &mut DbPool,
        stop_id: &str,
        kind: ReportType,
        description: &str,
    ) -> AppResult<Event> {
        let session = Session::require(pool)?;

        let has_stops = !queries::load_stops(pool)?.is_empty();
        if has_stops && queries::find_stop(pool, stop_id)?.is_none() {
            return Err(AppError::UnknownStop(stop_id.to_string()));
        }

        let ev = gw.submit_event(stop_id, kind, description.trim(), &session.token)?;
        queries::upsert_event(pool, &ev)?;

        ttlog(
            &pool.conn,
            "report",
            &ev.id,
            &format!("{} at stop {}", ev.kind, ev.stop_id),
        )?;

        Ok(ev)
    }

    /// Like or dislike a report. The cached counts are overwritten with the
    /// server's answer.
    pub fn react(
        gw: &dyn Gateway,
        pool: &mut DbPool,
        event_id: &str,
        reaction: Reaction,
    ) -> AppResult<(u32, u32)> {
        let session = Session::require(pool)?;
        let (likes, dislikes) = gw
            .react(event_id, reaction, &session.token)
            .map_err(|e| not_found_as_unknown(e, event_id))?;
        queries::update_event_counts(pool, event_id, likes, dislikes)?;

        ttlog(
            &pool.conn,
            reaction.path_segment(),
            event_id,
            &format!("likes={} dislikes={}", likes, dislikes),
        )?;

        Ok((likes, dislikes))
    }

    /// Cached reports matching `query` (and `stop_id` when given), newest first.
    pub fn list_cached(
        pool: &mut DbPool,
        query: &EventQuery,
        stop_id: Option<&str>,
    ) -> AppResult<Vec<Event>> {
        let events = queries::load_events(pool)?;
        let picked: Vec<Event> = match stop_id {
            Some(id) => reports_for_stop(&events, id).into_iter().cloned().collect(),
            None => events,
        };
        Ok(picked.into_iter().filter(|e| query.matches(e)).collect())
    }

    /// Reports straight from the backend, newest first.
    pub fn list_remote(
        gw: &dyn Gateway,
        query: &EventQuery,
        stop_id: Option<&str>,
    ) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = gw
            .fetch_events(query)?
            .into_iter()
            .filter(|e| stop_id.is_none_or(|id| e.stop_id == id))
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(events)
    }

    /// One report from the backend; refreshes its cached copy when present.
    pub fn show(gw: &dyn Gateway, pool: &mut DbPool, event_id: &str) -> AppResult<Event> {
        let ev = gw
            .fetch_event(event_id)
            .map_err(|e| not_found_as_unknown(e, event_id))?;
        if queries::find_event(pool, event_id)?.is_some() {
            queries::upsert_event(pool, &ev)?;
        }
        Ok(ev)
    }
}
