use crate::cli::context::Context;
use crate::cli::parser::{Commands, VacationAction};
use crate::core::leave::parse_day_count;
use crate::core::vacation::VacationManager;
use crate::errors::{AppError, AppResult};
use crate::models::LeaveEntry;
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};

/// Handle the `vacation` subcommands
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Vacation { action } = cmd else {
        return Ok(());
    };
    let allowance = ctx.cfg.vacation_days_per_year;
    let mut manager = VacationManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref());

    match action {
        VacationAction::Add {
            days,
            start,
            description,
        } => {
            let days = parse_day_count(days)?;
            let start = start
                .as_deref()
                .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
                .transpose()?;
            let entry = manager.add_vacation(days, start, description.clone())?;
            messages::success(format!(
                "Vacation booked: {} → {} ({})",
                entry.start_date, entry.end_date, entry.description
            ));
        }
        VacationAction::Range {
            start,
            end,
            description,
        } => {
            let start = parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.clone()))?;
            match manager.add_vacation_range(start, end, description.clone())? {
                Some(entry) => messages::success(format!(
                    "Vacation booked: {} → {} ({} working days)",
                    entry.start_date, entry.end_date, entry.days
                )),
                None => messages::warning(format!(
                    "No working days between {start} and {end}; nothing booked."
                )),
            }
        }
        VacationAction::List => print_leave(&manager.entries()?, "No vacation booked yet."),
        VacationAction::Remaining => {
            let used = manager.total_vacation_days()?;
            let remaining = manager.remaining_vacation_days()?;
            messages::info(format!(
                "Vacation: {used} used, {remaining} of {allowance} days remaining"
            ));
        }
    }
    Ok(())
}

/// Table of leave spans, shared with `sick list`.
pub fn print_leave(entries: &[LeaveEntry], empty: &str) {
    if entries.is_empty() {
        messages::info(empty);
        return;
    }

    let mut table = Table::new(vec![
        Column::new("FROM", 10),
        Column::new("TO", 10),
        Column::new("DAYS", 4),
        Column::new("DESCRIPTION", 24),
    ]);
    for e in entries {
        table.add_row(vec![
            e.start_date.to_string(),
            e.end_date.to_string(),
            e.days.to_string(),
            e.description.clone(),
        ]);
    }
    print!("{}", table.render());

    let total: u32 = entries.iter().map(|e| e.days).sum();
    println!("\nTotal: {total} day(s)");
}
