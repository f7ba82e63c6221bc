use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::entries::EntryManager;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::formatting::{format_pause, ms2readable};

/// Handle the `amend` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Amend { date, pause } = cmd else {
        return Ok(());
    };

    let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
    let entry =
        EntryManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref()).amend_pause(day, *pause)?;

    messages::success(format!(
        "Pause for {} set to {}, worked {}",
        entry.date,
        format_pause(entry.pause_time),
        ms2readable(entry.working_ms())
    ));
    Ok(())
}
