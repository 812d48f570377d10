use crate::config::Config;
use crate::core::sync::sync_snapshot;
use crate::errors::AppResult;
use crate::gateway::Gateway;
use crate::ui::messages::{step, success, warning};

use super::open_store;

pub fn handle(cfg: &Config, gw: &dyn Gateway) -> AppResult<()> {
    let mut pool = open_store(cfg)?;

    step(format!("Syncing with {}", cfg.api_base_url));
    let summary = sync_snapshot(gw, &mut pool)?;

    success(format!(
        "Snapshot updated: {} stops, {} reports.",
        summary.stops, summary.events
    ));
    if summary.dangling_events > 0 {
        warning(format!(
            "{} reports reference stops missing from the stop list.",
            summary.dangling_events
        ));
    }

    Ok(())
}
