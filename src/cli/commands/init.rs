use std::fs;

use crate::cli::context::config_path;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;

/// Handle the `init` command
///
/// Writes the configuration file from flags and creates the data directory.
/// An existing file is only replaced with `--force`.
pub fn handle(cmd: &Commands, cli: &Cli) -> AppResult<()> {
    let Commands::Init {
        name,
        hours_per_week,
        vacation_days,
        working_days,
        timezone,
        start_date,
        holiday_country,
        holiday_region,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let path = config_path(cli);
    if path.exists() && !force {
        messages::warning(format!(
            "Configuration already exists at {}. Use --force to replace it.",
            path.display()
        ));
        return Ok(());
    }

    let mut cfg = Config {
        name: name.trim().to_string(),
        hours_per_week: *hours_per_week,
        vacation_days_per_year: *vacation_days,
        timezone: timezone.clone(),
        setup_completed: true,
        holiday_country: holiday_country.as_ref().map(|c| c.trim().to_uppercase()),
        holiday_region: holiday_region.as_ref().map(|r| r.trim().to_uppercase()),
        ..Config::default()
    };
    if let Some(dir) = &cli.data_dir {
        cfg.data_directory = dir.clone();
    }
    if let Some(days) = working_days {
        cfg.set_working_days(days)?;
    }
    if let Some(raw) = start_date {
        cfg.start_date = Some(parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?);
    }

    let problems = cfg.problems();
    if !problems.is_empty() {
        return Err(AppError::validation(problems.join("; ")));
    }

    cfg.save_to(&path)?;
    fs::create_dir_all(cfg.data_dir())?;
    tracing::info!(config = %path.display(), "configuration written");

    messages::info(format!("📄 Config file : {}", path.display()));
    messages::info(format!("🗂️  Data dir    : {}", cfg.data_dir().display()));
    if cfg.working_days_count() == 0 {
        messages::warning("No working days configured: daily targets and pause suggestions are off.");
    }
    messages::success("clockin initialization completed!");
    Ok(())
}
