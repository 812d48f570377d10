use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Display-time filter narrowing visible stops by vehicle type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Filter {
    #[default]
    None,
    Tram,
    Bus,
}

impl Filter {
    pub fn code(&self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Tram => "tram",
            Filter::Bus => "bus",
        }
    }

    /// Parse a filter from config or CLI text (case-insensitive).
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim().to_lowercase().as_str() {
            "" | "none" | "all" => Ok(Filter::None),
            "tram" | "tramwaj" => Ok(Filter::Tram),
            "bus" | "autobus" => Ok(Filter::Bus),
            other => Err(AppError::InvalidFilter(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::None => "all stops",
            Filter::Tram => "tram stops",
            Filter::Bus => "bus stops",
        }
    }
}
