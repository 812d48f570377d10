use serde::Serialize;

pub const DEFAULT_PLACEMARK_TITLE: &str = "Przystanek";

/// Map pin produced from the public GeoJSON stop feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
}
