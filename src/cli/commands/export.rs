use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::{ExportLogic, ExportTarget, ensure_writable};
use crate::core::reconcile::compute_annotations;
use crate::db::log::ttlog;
use crate::db::queries::{load_events, load_stops};
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::Path;

use super::open_store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        what,
        filter,
        force,
    } = cmd
    {
        let path = Path::new(file);
        ensure_writable(path, *force)?;

        let mut pool = open_store(cfg)?;
        let stops = load_stops(&mut pool)?;
        let events = load_events(&mut pool)?;

        let (label, count) = match what {
            ExportTarget::Annotations => {
                let filter = match filter {
                    Some(f) => *f,
                    None => cfg.filter()?,
                };
                let annotations = compute_annotations(&stops, &events, filter);
                ExportLogic::write_annotations(path, *format, &annotations)?;
                ("annotations", annotations.len())
            }
            ExportTarget::Reports => {
                ExportLogic::write_reports(path, *format, &stops, &events)?;
                ("reports", events.len())
            }
        };

        ttlog(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("Exported {} {} to {}", count, label, path.display()),
        )?;

        success(format!(
            "{} {} exported to {}",
            count,
            label,
            path.display()
        ));
    }

    Ok(())
}
