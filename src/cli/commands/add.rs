use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::entries::EntryManager;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::formatting::{format_pause, ms2readable};
use crate::utils::time::parse_required_time;

/// Handle the `add` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Add {
        date,
        start,
        end,
        pause,
        description,
    } = cmd
    else {
        return Ok(());
    };

    let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
    let start = parse_required_time(start)?;
    let end = parse_required_time(end)?;

    let entry = EntryManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref()).add_entry(
        day,
        start,
        end,
        *pause,
        description.clone(),
    )?;

    messages::success(format!(
        "Added {}: {} – {}, pause {}, worked {}",
        entry.date,
        start.format("%H:%M"),
        end.format("%H:%M"),
        format_pause(entry.pause_time),
        ms2readable(entry.working_ms())
    ));
    Ok(())
}
