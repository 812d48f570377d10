use serde::{Deserialize, Serialize};

/// A transit stop as cached from `GET /poznan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub latitude: f64,  // WGS84 degrees
    pub longitude: f64, // WGS84 degrees
    pub zone: String,
    pub route_type: String,
    pub headsigns: String, // comma-separated route numbers, e.g. "4,8,148"
}

impl Stop {
    /// Headsign tokens, trimmed, empty tokens skipped.
    pub fn headsign_tokens(&self) -> impl Iterator<Item = &str> {
        self.headsigns
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
