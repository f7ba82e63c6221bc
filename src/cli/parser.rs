use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::core::export::{ExportFormat, ExportKind};
use crate::utils::date::parse_instant;

/// Command-line interface definition for clockin
#[derive(Parser)]
#[command(
    name = "clockin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Personal time tracking: work sessions, vacation, sick leave, holidays and overtime",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of ~/.clockin/clockin.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the data directory from the configuration
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Debug logging on stderr (same as CLOCKIN_LOG=debug)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    /// Pretend the current instant is this RFC 3339 timestamp
    #[arg(global = true, long = "now", hide = true, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s).ok_or_else(|| format!("not an ISO date/time: {s}"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration file
    Init {
        #[arg(long)]
        name: String,

        #[arg(long = "hours-per-week", default_value_t = 40.0)]
        hours_per_week: f64,

        #[arg(long = "vacation-days", default_value_t = 25.0)]
        vacation_days: f64,

        /// Comma separated weekdays, e.g. mon,tue,wed,thu,fri
        #[arg(long = "working-days", value_delimiter = ',')]
        working_days: Option<Vec<String>>,

        /// IANA timezone, e.g. Europe/Berlin
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Employment start (YYYY-MM-DD), the overtime baseline
        #[arg(long = "start-date")]
        start_date: Option<String>,

        #[arg(long = "holiday-country")]
        holiday_country: Option<String>,

        #[arg(long = "holiday-region")]
        holiday_region: Option<String>,

        /// Replace an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view, edit or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration file for problems")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Start a work session
    Start {
        /// Do not show the live timer afterwards
        #[arg(long = "no-timer")]
        no_timer: bool,
    },

    /// Pause the running session
    Pause,

    /// Resume a paused session
    Resume {
        #[arg(long = "no-timer")]
        no_timer: bool,
    },

    /// Stop the session and record it as a time entry
    Stop {
        /// Accept the pause suggestion without asking
        #[arg(long, short = 'y')]
        yes: bool,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Show the live timer of the running session
    Timer,

    /// Record a finished block of work
    Add {
        /// Date of the work (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,

        #[arg(long, default_value_t = 0.0, help = "Pause in minutes")]
        pause: f64,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Change the pause of the latest entry of a date
    Amend {
        date: String,

        #[arg(long, help = "New pause in minutes")]
        pause: f64,
    },

    /// Delete every time entry of a date
    Del {
        date: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List time entries
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Overtime balance
    Summary {
        /// Only the current ISO week
        #[arg(long)]
        week: bool,

        /// Weekly rows as CSV on stdout
        #[arg(long, conflicts_with = "week")]
        csv: bool,
    },

    /// Book and inspect vacation
    Vacation {
        #[command(subcommand)]
        action: VacationAction,
    },

    /// Book and inspect sick leave
    Sick {
        #[command(subcommand)]
        action: SickAction,
    },

    /// Import and inspect public holidays
    Holidays {
        #[command(subcommand)]
        action: HolidaysAction,
    },

    /// Export one store to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "time")]
        kind: ExportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Zip the data directory
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum VacationAction {
    /// Book a number of working days, starting today or at START
    Add {
        days: String,
        start: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Book every working day between two dates
    Range {
        start: String,
        end: String,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    List,

    /// Days left of the yearly allowance
    Remaining,
}

#[derive(Subcommand)]
pub enum SickAction {
    /// Book consecutive calendar days, starting today or at START
    Add {
        days: String,
        start: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    List,
}

#[derive(Subcommand)]
pub enum HolidaysAction {
    /// Import the holidays of a year
    Init {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        region: Option<String>,

        /// Replace holidays already imported for this year and region
        #[arg(long, short = 'f')]
        force: bool,

        /// Read definitions from a JSON file instead of the built-in calendar
        #[arg(long = "from-file", value_name = "FILE")]
        from_file: Option<String>,
    },

    /// Imported holidays of a year
    List {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Whether a date is a holiday
    Check { date: String },
}
