use chrono::{Datelike, NaiveDate};

use crate::cli::context::{Context, prompter};
use crate::cli::parser::{Commands, HolidaysAction};
use crate::core::holiday::{HolidayManager, InitOutcome, resolve_region};
use crate::errors::{AppError, AppResult};
use crate::holidays::{BuiltinCalendar, HolidaySource, JsonFileSource};
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};

/// Handle the `holidays` subcommands
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Holidays { action } = cmd else {
        return Ok(());
    };
    let this_year = ctx.today().year();

    match action {
        HolidaysAction::Init {
            year,
            country,
            region,
            force,
            from_file,
        } => {
            let year = year.unwrap_or(this_year);
            let (country, region) = resolve_region(
                &ctx.cfg,
                country.as_deref(),
                region.as_deref(),
                prompter(false).as_mut(),
            )?;
            let source: Box<dyn HolidaySource> = match from_file {
                Some(path) => Box::new(JsonFileSource::new(path)),
                None => Box::new(BuiltinCalendar),
            };

            let outcome = HolidayManager::new(&ctx.cfg, &mut ctx.stores).init_holidays(
                source.as_ref(),
                year,
                &country,
                &region,
                *force,
            )?;
            let place = if region.is_empty() {
                country.clone()
            } else {
                format!("{country}/{region}")
            };
            match outcome {
                InitOutcome::AlreadyInitialized { existing } => messages::warning(format!(
                    "Holidays for {place} {year} already imported ({existing}). Use --force to replace them."
                )),
                InitOutcome::Imported { count, replaced } => {
                    if replaced > 0 {
                        messages::info(format!("Removed {replaced} previously imported holiday(s)"));
                    }
                    messages::success(format!("Imported {count} holiday(s) for {place} {year}"));
                }
            }
        }
        HolidaysAction::List { year } => {
            let year = year.unwrap_or(this_year);
            let (first, last) = year_bounds(year)?;
            let entries = HolidayManager::new(&ctx.cfg, &mut ctx.stores).entries_between(first, last)?;
            if entries.is_empty() {
                messages::info(format!(
                    "No holidays imported for {year}. Run `clockin holidays init --year {year}`."
                ));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("DATE", 10),
                Column::new("DAY", 3),
                Column::new("NAME", 28),
                Column::new("REGION", 8),
            ]);
            for h in &entries {
                let place = if h.region.is_empty() {
                    h.country.clone()
                } else {
                    format!("{}-{}", h.country, h.region)
                };
                table.add_row(vec![
                    h.date.to_string(),
                    h.date.format("%a").to_string(),
                    h.name.clone(),
                    place,
                ]);
            }
            print!("{}", table.render());
            let working = entries
                .iter()
                .filter(|h| ctx.cfg.is_working_day(h.date))
                .count();
            println!("\n{} holiday(s), {working} on working days", entries.len());
        }
        HolidaysAction::Check { date } => {
            let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let manager = HolidayManager::new(&ctx.cfg, &mut ctx.stores);
            if manager.is_holiday(day)? {
                let names: Vec<String> = manager
                    .entries_between(day, day)?
                    .into_iter()
                    .map(|h| h.name)
                    .collect();
                messages::info(format!("{day} is a holiday: {}", names.join(", ")));
            } else {
                messages::info(format!("{day} is not a holiday"));
            }
        }
    }
    Ok(())
}

fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    first
        .zip(last)
        .ok_or_else(|| AppError::InvalidDate(format!("year {year}")))
}
