//! Wire shapes of the report backend. Field names follow the server.

use crate::models::event::Event;
use crate::models::stop::Stop;
use crate::models::user::User;
use crate::utils::time;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest<'a> {
    pub stop_id: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub description: &'a str,
}

/// Event as returned by `GET /events`, `GET /events/{id}` and `POST /events`.
/// The timestamp arrives either as a number or as a string.
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    #[serde(rename = "stopId")]
    pub stop_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
}

#[derive(Debug, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub events: Vec<EventResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PoznanResponse {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub route_type: String,
    #[serde(default)]
    pub headsigns: String,
    pub stop_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeDislikeResponse {
    pub likes: u32,
    pub dislikes: u32,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: String,
}

/// Wire timestamp → epoch millis. Unparseable values fall back to `fallback`.
pub fn timestamp_millis(value: &Value, fallback: i64) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| time::parse_wire_timestamp(&v.to_string()))
            .unwrap_or(fallback),
        Value::String(s) => time::parse_wire_timestamp(s).unwrap_or(fallback),
        _ => fallback,
    }
}

impl EventResponse {
    pub fn into_event(self, received_at: i64) -> Event {
        Event {
            timestamp: timestamp_millis(&self.timestamp, received_at),
            id: self.id,
            stop_id: self.stop_id,
            kind: self.kind,
            description: self.description,
            created_by: self.created_by,
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}

impl From<PoznanResponse> for Stop {
    fn from(r: PoznanResponse) -> Self {
        Stop {
            id: r.id,
            name: r.stop_name,
            latitude: r.latitude,
            longitude: r.longitude,
            zone: r.zone,
            route_type: r.route_type,
            headsigns: r.headsigns,
        }
    }
}
