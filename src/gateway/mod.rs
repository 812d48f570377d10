//! Remote data gateway: the backend the client talks to.
//!
//! `HttpGateway` is the real REST client; `InMemoryGateway` serves fixed
//! data for tests and demos. Callers only ever see resolved values or an
//! `AppError`.

pub mod dto;
pub mod geojson;
pub mod http;
pub mod memory;

use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::reaction::Reaction;
use crate::models::report_type::ReportType;
use crate::models::stop::Stop;
use crate::models::user::{Credentials, User};

pub use http::HttpGateway;
pub use memory::InMemoryGateway;

/// Optional server-side filters for `GET /events`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub kind: Option<String>,
    pub since: Option<i64>, // epoch millis
}

impl EventQuery {
    /// Apply the same filters locally (used on cached events).
    pub fn matches(&self, ev: &Event) -> bool {
        self.kind.as_deref().is_none_or(|k| ev.kind == k)
            && self.since.is_none_or(|ts| ev.timestamp >= ts)
    }
}

pub trait Gateway {
    fn fetch_stops(&self) -> AppResult<Vec<Stop>>;

    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<Event>>;

    fn fetch_event(&self, id: &str) -> AppResult<Event>;

    fn submit_event(
        &self,
        stop_id: &str,
        kind: ReportType,
        description: &str,
        token: &str,
    ) -> AppResult<Event>;

    /// Returns the (likes, dislikes) counts after the reaction.
    fn react(&self, event_id: &str, reaction: Reaction, token: &str) -> AppResult<(u32, u32)>;

    fn login(&self, credentials: &Credentials) -> AppResult<(String, User)>;

    fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User>;

    fn logout(&self, token: &str) -> AppResult<()>;

    fn me(&self, token: &str) -> AppResult<User>;
}
