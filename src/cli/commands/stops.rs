use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::classify::{classify, passes};
use crate::db::queries::load_stops;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

use super::open_store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stops { filter, search } = cmd {
        let filter = match filter {
            Some(f) => *f,
            None => cfg.filter()?,
        };
        let needle = search.as_ref().map(|s| s.to_lowercase());

        let mut pool = open_store(cfg)?;
        let stops = load_stops(&mut pool)?;

        if stops.is_empty() {
            info("No stops cached. Run `tramreport sync` first.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 10),
            Column::new("Name", 28),
            Column::new("Zone", 4),
            Column::new("Kind", 8),
            Column::new("Lines", 30),
        ])
        .with_separator(cfg.separator());

        let mut shown = 0;
        for s in stops.iter().filter(|s| passes(s, filter)) {
            if let Some(n) = &needle
                && !s.name.to_lowercase().contains(n)
            {
                continue;
            }

            let class = classify(s);
            let kind = match (class.tram, class.bus) {
                (true, true) => "tram+bus",
                (true, false) => "tram",
                (false, true) => "bus",
                (false, false) => "--",
            };
            table.add_row(vec![
                s.id.clone(),
                s.name.clone(),
                s.zone.clone(),
                kind.to_string(),
                s.headsigns.clone(),
            ]);
            shown += 1;
        }

        print!("{}", table.render());
        println!("\n{} of {} stops ({}).", shown, stops.len(), filter.label());
    }

    Ok(())
}
