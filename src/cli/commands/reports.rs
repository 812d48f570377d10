use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::stop_label;
use crate::core::reports::ReportLogic;
use crate::db::queries::load_stops;
use crate::errors::AppResult;
use crate::gateway::{EventQuery, Gateway};
use crate::models::event::Event;
use crate::models::report_type::ReportType;
use crate::models::stop::Stop;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_score, colorize_optional};
use crate::utils::formatting::{bold, describe_report_kind};
use crate::utils::time::parse_since;

use super::open_store;

/// Build the event query from CLI text. Known type keywords are mapped to
/// their wire label; anything else is passed through as-is.
pub fn build_query(kind: &Option<String>, since: &Option<String>) -> AppResult<EventQuery> {
    let kind = kind.as_ref().map(|k| {
        ReportType::from_input(k)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| k.clone())
    });
    let since = since.as_deref().map(parse_since).transpose()?;
    Ok(EventQuery { kind, since })
}

fn print_event(stops: &[Stop], e: &Event) {
    let (label, color) = describe_report_kind(&e.kind);
    let score = e.score();
    println!(
        "{}  {}{}{}  {} [{}]",
        bold(&e.id),
        color,
        label,
        RESET,
        stop_label(stops, &e.stop_id),
        e.stop_id
    );
    println!(
        "    {}  {}👍 {} 👎 {}{}",
        e.created_str(),
        color_for_score(score),
        e.likes,
        e.dislikes,
        RESET
    );
    println!("    {}", colorize_optional(&e.description));
}

/// Handle `reports` (cached or `--remote`).
pub fn handle(cmd: &Commands, cfg: &Config, gw: Option<&dyn Gateway>) -> AppResult<()> {
    if let Commands::Reports {
        stop,
        kind,
        since,
        remote,
    } = cmd
    {
        let query = build_query(kind, since)?;
        let mut pool = open_store(cfg)?;
        let stops = load_stops(&mut pool)?;

        let events = match (remote, gw) {
            (true, Some(gw)) => ReportLogic::list_remote(gw, &query, stop.as_deref())?,
            _ => ReportLogic::list_cached(&mut pool, &query, stop.as_deref())?,
        };

        if events.is_empty() {
            info("No reports found.");
            return Ok(());
        }

        for e in &events {
            print_event(&stops, e);
        }
        println!("\n{} reports.", events.len());
    }

    Ok(())
}

/// Handle `show <id>`.
pub fn handle_show(cmd: &Commands, cfg: &Config, gw: &dyn Gateway) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let mut pool = open_store(cfg)?;
        let stops = load_stops(&mut pool)?;
        let ev = ReportLogic::show(gw, &mut pool, id)?;
        print_event(&stops, &ev);
        if let Some(author) = &ev.created_by {
            println!("    by {}", author);
        }
    }

    Ok(())
}
