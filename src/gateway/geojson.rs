//! Public GeoJSON-shaped stop feed (FeatureCollection).

use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>, // null is valid GeoJSON
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>, // [lon, lat]
}

impl Feature {
    /// `properties["name"]` when it is a non-empty string.
    pub fn name(&self) -> Option<&str> {
        self.properties
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Download the raw feed body.
pub fn fetch_feed(url: &str, timeout: Duration) -> AppResult<String> {
    let client = Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::Api {
            status: status.as_u16(),
            message: format!("feed request to {} failed", url),
        });
    }
    Ok(resp.text()?)
}
