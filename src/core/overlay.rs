//! Map pins from the public GeoJSON stop feed.

use crate::errors::{AppError, AppResult};
use crate::gateway::geojson::{FeatureCollection, fetch_feed};
use crate::models::placemark::{DEFAULT_PLACEMARK_TITLE, Placemark};
use std::time::Duration;

/// Parse a FeatureCollection body into placemarks.
///
/// Coordinates are `[lon, lat]`. Features without geometry or with fewer
/// than two coordinates are skipped; a missing `name` falls back to the default title.
pub fn parse_feature_collection(json: &str) -> AppResult<Vec<Placemark>> {
    let fc: FeatureCollection = serde_json::from_str(json)?;

    if !fc.kind.is_empty() && fc.kind != "FeatureCollection" {
        return Err(AppError::Other(format!(
            "expected a FeatureCollection, got {}",
            fc.kind
        )));
    }

    Ok(fc
        .features
        .iter()
        .filter_map(|f| match f.geometry.as_ref()?.coordinates.as_slice() {
            [lon, lat, ..] => Some(Placemark {
                latitude: *lat,
                longitude: *lon,
                title: f.name().unwrap_or(DEFAULT_PLACEMARK_TITLE).to_string(),
            }),
            _ => None,
        })
        .collect())
}

pub fn fetch_placemarks(url: &str, timeout: Duration) -> AppResult<Vec<Placemark>> {
    let body = fetch_feed(url, timeout)?;
    parse_feature_collection(&body)
}
