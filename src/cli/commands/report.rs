use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::AppResult;
use crate::gateway::Gateway;
use crate::models::reaction::Reaction;
use crate::models::report_type::ReportType;
use crate::ui::messages::{step, success};

use super::open_store;

/// Handle `report`, `like` and `dislike`.
pub fn handle(cmd: &Commands, cfg: &Config, gw: &dyn Gateway) -> AppResult<()> {
    let mut pool = open_store(cfg)?;

    match cmd {
        Commands::Report {
            stop_id,
            kind,
            description,
        } => {
            let kind = ReportType::from_input(kind)?;
            step(format!("Submitting '{}' for stop {}", kind.label(), stop_id));
            let ev = ReportLogic::submit(gw, &mut pool, stop_id, kind, description)?;
            success(format!("Report {} created ({}).", ev.id, ev.created_str()));
        }

        Commands::Like { id } | Commands::Dislike { id } => {
            let reaction = if matches!(cmd, Commands::Like { .. }) {
                Reaction::Like
            } else {
                Reaction::Dislike
            };
            let (likes, dislikes) = ReportLogic::react(gw, &mut pool, id, reaction)?;
            success(format!(
                "Report {}: 👍 {} 👎 {}",
                id, likes, dislikes
            ));
        }

        _ => {}
    }

    Ok(())
}
