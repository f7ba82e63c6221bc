use crate::cli::commands::vacation::print_leave;
use crate::cli::context::Context;
use crate::cli::parser::{Commands, SickAction};
use crate::core::leave::parse_day_count;
use crate::core::sick::SickManager;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;

/// Handle the `sick` subcommands
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Sick { action } = cmd else {
        return Ok(());
    };
    let mut manager = SickManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref());

    match action {
        SickAction::Add {
            days,
            start,
            description,
        } => {
            let days = parse_day_count(days)?;
            let start = start
                .as_deref()
                .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
                .transpose()?;
            let entry = manager.add_sick_days(days, description.clone(), start)?;
            messages::success(format!(
                "Sick leave recorded: {} → {} ({})",
                entry.start_date, entry.end_date, entry.description
            ));
        }
        SickAction::List => print_leave(&manager.entries()?, "No sick leave recorded."),
    }
    Ok(())
}
