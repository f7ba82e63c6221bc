/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Overtime color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_delta(ms: i64) -> &'static str {
    if ms > 0 {
        GREEN
    } else if ms < 0 {
        RED
    } else {
        RESET
    }
}

/// Row color for a summary row kind (`work`, `holiday`, `sick`, `vacation`).
pub fn color_for_kind(kind: &str) -> &'static str {
    match kind {
        "holiday" => MAGENTA,
        "sick" => YELLOW,
        "vacation" => CYAN,
        "work" => BLUE,
        _ => RESET,
    }
}

pub fn paint(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        return format!("{GREY}{value}{RESET}");
    }
    format!("{color}{value}{RESET}")
}
