use crate::cli::context::{Context, prompter};
use crate::cli::parser::Commands;
use crate::core::entries::EntryManager;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;

/// Handle the `del` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Del { date, yes } = cmd else {
        return Ok(());
    };

    let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
    let mut manager = EntryManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref());

    let count = manager.entries_between(Some((day, day)))?.len();
    if count == 0 {
        return Err(AppError::NoEntriesForDate(day));
    }

    let question = format!("Delete {count} time {} for {day}?", entries_word(count));
    if !prompter(*yes).confirm(&question, false)? {
        messages::warning("Deletion cancelled by user.");
        return Ok(());
    }

    let removed = manager.delete_for_date(day)?;
    messages::success(format!(
        "Deleted {removed} time {} for {day}",
        entries_word(removed)
    ));
    Ok(())
}

fn entries_word(n: usize) -> &'static str {
    if n == 1 { "entry" } else { "entries" }
}
