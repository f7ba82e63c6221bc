use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::entries::EntryManager;
use crate::errors::AppResult;
use crate::models::TimeEntry;
use crate::ui::messages;
use crate::utils::date::{current_month, parse_period};
use crate::utils::formatting::{bold, format_pause, ms2readable};
use crate::utils::table::{Column, Table};

/// Handle the `list` command
///
/// Without `--period` the current month is shown.
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::List { period } = cmd else {
        return Ok(());
    };

    let range = match period {
        Some(p) => parse_period(p)?,
        None => Some(current_month(ctx.today())),
    };
    let tz = ctx.cfg.tz();
    let entries = EntryManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref())
        .entries_between(range)?;

    if entries.is_empty() {
        messages::info("No time entries for the selected period.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("DATE", 10),
        Column::new("START", 5),
        Column::new("END", 5),
        Column::new("PAUSE", 8),
        Column::new("WORKED", 8),
        Column::new("DESCRIPTION", 20),
    ]);
    for e in &entries {
        table.add_row(vec![
            e.date.to_string(),
            e.start_time.with_timezone(&tz).format("%H:%M").to_string(),
            e.end_time
                .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string()),
            format_pause(e.pause_time),
            ms2readable(e.working_ms()),
            e.description.clone().unwrap_or_default(),
        ]);
    }
    print!("{}", table.render());

    let total: i64 = entries.iter().map(TimeEntry::working_ms).sum();
    println!(
        "\n{} {} in {} entr{}",
        bold("Total:"),
        ms2readable(total),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}
