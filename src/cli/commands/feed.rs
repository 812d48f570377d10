use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::overlay::fetch_placemarks;
use crate::errors::AppResult;
use crate::ui::messages::{info, step};
use crate::utils::table::{Column, Table};
use std::time::Duration;

/// Handle `feed`: list pins from the public GeoJSON stop feed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Feed { url } = cmd {
        let url = url.clone().unwrap_or_else(|| cfg.stops_feed_url.clone());

        step(format!("Fetching {}", url));
        let pins = fetch_placemarks(&url, Duration::from_secs(cfg.timeout_secs))?;

        if pins.is_empty() {
            info("The feed contains no usable features.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Name", 32),
            Column::new("Latitude", 10),
            Column::new("Longitude", 10),
        ])
        .with_separator(cfg.separator());

        for p in &pins {
            table.add_row(vec![
                p.title.clone(),
                format!("{:.5}", p.latitude),
                format!("{:.5}", p.longitude),
            ]);
        }

        print!("{}", table.render());
        println!("\n{} pins.", pins.len());
    }

    Ok(())
}
