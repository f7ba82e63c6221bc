use crate::config::Config;

/// Daily target in whole minutes: `round(hours_per_week / working_days × 60)`.
pub fn target_daily_minutes(cfg: &Config) -> Option<i64> {
    cfg.daily_target_hours().map(|h| (h * 60.0).round() as i64)
}

/// Pause that brings `gross_minutes` down to the daily target:
/// `max(0, floor(gross - target))`. No target, no suggestion.
pub fn suggest_pause(gross_minutes: f64, target_minutes: Option<i64>) -> i64 {
    match target_minutes {
        Some(target) => ((gross_minutes - target as f64).floor() as i64).max(0),
        None => 0,
    }
}
