use crate::cli::context::{Context, prompter};
use crate::cli::parser::Commands;
use crate::core::export::{ExportLogic, ExportOutcome, require_absolute};
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::date::parse_period;

/// Handle the `export` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Export {
        kind,
        format,
        file,
        range,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let path = require_absolute(file)?;
    let bounds = match range {
        Some(r) => parse_period(r)?,
        None => None,
    };

    let outcome = ExportLogic::export(
        &ctx.stores,
        *kind,
        *format,
        &path,
        bounds,
        *force,
        prompter(false).as_mut(),
    )?;
    match outcome {
        ExportOutcome::Written { path, rows } => {
            messages::success(format!("Exported {rows} {kind} to {}", path.display()))
        }
        ExportOutcome::Empty => {
            messages::warning(format!("No {kind} found for the selected range. Nothing to export."))
        }
        ExportOutcome::Cancelled => {
            messages::warning("Export cancelled: existing file not overwritten.")
        }
    }
    Ok(())
}
