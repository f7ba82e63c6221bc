//! Formatting utilities used for CLI and export outputs.

use crate::utils::time::{MS_PER_HOUR, MS_PER_MINUTE};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Signed hours with one decimal: `4.8h`, `-0.2h`.
///
/// Anything that rounds to zero renders as `0.0h`, never `-0.0h`.
pub fn format_hours(ms: i64) -> String {
    let hours = ms as f64 / MS_PER_HOUR as f64;
    let tenths = (hours * 10.0).round();
    if tenths == 0.0 {
        return "0.0h".to_string();
    }
    format!("{:.1}h", tenths / 10.0)
}

/// Same as [`format_hours`] but with an explicit `+` on positive values.
pub fn format_hours_signed(ms: i64) -> String {
    let s = format_hours(ms);
    if s != "0.0h" && !s.starts_with('-') {
        format!("+{s}")
    } else {
        s
    }
}

/// `HH:MM:SS`, for the live timer.
pub fn format_clock(ms: i64) -> String {
    let total = ms.max(0) / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Milliseconds as `02h 25m`.
pub fn ms2readable(ms: i64) -> String {
    mins2readable(ms / MS_PER_MINUTE, false, false)
}

/// Pause minutes, without a trailing `.0` for whole values.
pub fn format_pause(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{} min", minutes as i64)
    } else {
        format!("{minutes:.1} min")
    }
}
