use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::MapState;
use crate::core::sync::sync_snapshot;
use crate::db::queries::{load_events, load_stops};
use crate::errors::AppResult;
use crate::gateway::Gateway;
use crate::ui::messages::{header, info, step};
use crate::utils::colors::{RESET, color_for_marker};
use crate::utils::table::{Column, Table};

use super::open_store;

/// Render the annotations for the cached snapshot.
///
/// `gw` is only used with `--refresh`.
pub fn handle(cmd: &Commands, cfg: &Config, gw: Option<&dyn Gateway>) -> AppResult<()> {
    if let Commands::Map {
        filter,
        refresh,
        json,
    } = cmd
    {
        let filter = match filter {
            Some(f) => *f,
            None => cfg.filter()?,
        };

        let mut pool = open_store(cfg)?;

        if *refresh && let Some(gw) = gw {
            step(format!("Syncing with {}", cfg.api_base_url));
            sync_snapshot(gw, &mut pool)?;
        }

        let state = MapState::new(load_stops(&mut pool)?, load_events(&mut pool)?, filter);

        if *json {
            println!("{}", serde_json::to_string_pretty(state.annotations())?);
            return Ok(());
        }

        if state.stops().is_empty() {
            info("No stops cached. Run `tramreport sync` or `tramreport map --refresh`.");
            return Ok(());
        }

        header(format!("Map: {}", filter.label()));

        let mut table = Table::new(vec![
            Column::new("", 1),
            Column::new("ID", 10),
            Column::new("Name", 28),
            Column::new("Position", 20),
        ])
        .with_separator(cfg.separator());

        for a in state.annotations() {
            table.add_row(vec![
                if a.has_open_report { "●" } else { "○" }.to_string(),
                a.stop_id.clone(),
                a.title.clone(),
                format!("{:.5}, {:.5}", a.latitude, a.longitude),
            ]);
        }

        let rendered = table.render();
        let mut lines = rendered.lines();
        for line in lines.by_ref().take(2) {
            println!("{}", line);
        }
        for (line, a) in lines.zip(state.annotations()) {
            println!("{}{}{}", color_for_marker(a.has_open_report), line, RESET);
        }

        println!(
            "\n{} stops shown, {} with open reports ({} reports in snapshot).",
            state.annotations().len(),
            state.reported_count(),
            state.events().len()
        );
    }

    Ok(())
}
