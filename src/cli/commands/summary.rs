use std::io;

use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::summary::{
    Ledger, OverallSummary, WeeklySummary, overall_summary, weekly_summary, write_weekly_csv,
};
use crate::core::vacation::VacationManager;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{color_for_delta, color_for_kind, paint};
use crate::utils::formatting::{format_hours, format_hours_signed};
use crate::utils::table::{Column, Table};

/// Handle the `summary` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Summary { week, csv } = cmd else {
        return Ok(());
    };

    let ledger = Ledger::load(&ctx.stores)?;
    if *csv {
        let summary = weekly_summary(&ctx.cfg, &ledger, ctx.today());
        return write_weekly_csv(&summary, io::stdout().lock());
    }
    if *week {
        print_weekly(&weekly_summary(&ctx.cfg, &ledger, ctx.today()));
        return Ok(());
    }

    let overall = overall_summary(&ctx.cfg, &ledger, ctx.clock.now());
    print_overall(&overall);

    let allowance = ctx.cfg.vacation_days_per_year;
    let remaining = VacationManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref())
        .remaining_vacation_days()?;
    println!(
        "{:<14}: {} used, {} of {} left",
        "Vacation days", overall.vacation_days, remaining, allowance
    );
    println!("{:<14}: {}", "Sick days", overall.sick_days);
    Ok(())
}

fn print_weekly(summary: &WeeklySummary) {
    messages::header(format!("Week {} – {}", summary.week_start, summary.week_end));

    if summary.rows.is_empty() {
        messages::info("Nothing recorded this week.");
    } else {
        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("DAY", 3),
            Column::new("KIND", 8),
            Column::new("HOURS", 7),
            Column::new("NOTE", 24),
        ]);
        for row in &summary.rows {
            table.add_row(vec![
                row.date.to_string(),
                row.date.format("%a").to_string(),
                paint(row.kind.as_str(), color_for_kind(row.kind.as_str())),
                format_hours(row.hours_ms),
                row.label.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    let delta = summary.delta_ms();
    println!();
    println!("{:<8}: {}", "Total", format_hours(summary.total_ms()));
    println!("{:<8}: {}", "Target", format_hours(summary.balance.target_ms));
    println!(
        "{:<8}: {} {}",
        "Balance",
        paint(&format_hours_signed(delta), color_for_delta(delta)),
        balance_word(summary.balance.is_overtime(), summary.balance.is_undertime())
    );
}

fn print_overall(s: &OverallSummary) {
    messages::header("Overall summary");
    let daily = s.daily_target_ms;

    println!("{:<14}: {} ({:.1} weeks)", "Since", s.baseline, s.elapsed_weeks);
    println!("{:<14}: {}", "Expected", format_hours(s.expected_ms()));
    println!("{:<14}: {}", "Worked", format_hours(s.worked_ms));
    println!(
        "{:<14}: {} day(s) at {}",
        "Holidays",
        s.holiday_days,
        format_hours(daily)
    );
    if s.overlapping_days > 0 {
        messages::info(format!(
            "{} holiday(s) fell on booked leave and were credited once",
            s.overlapping_days
        ));
    }
    println!("{:<14}: {}", "Actual", format_hours(s.actual_ms()));

    let delta = s.overtime_ms();
    println!(
        "{:<14}: {} {}",
        "Overtime",
        paint(&format_hours_signed(delta), color_for_delta(delta)),
        balance_word(s.balance.is_overtime(), s.balance.is_undertime())
    );
}

fn balance_word(over: bool, under: bool) -> &'static str {
    match (over, under) {
        (true, _) => "(overtime)",
        (_, true) => "(undertime)",
        _ => "(on target)",
    }
}
