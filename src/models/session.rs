use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single live work session of a data directory.
///
/// `paused_time_ms` holds closed pauses only; an open pause is described by
/// `pause_start_time` until it is folded in by `resume` or `stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    #[serde(alias = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(alias = "pausedTime", default)]
    pub paused_time_ms: i64,
    #[serde(alias = "isPaused", default)]
    pub is_paused: bool,
    #[serde(alias = "pauseStartTime", default, skip_serializing_if = "Option::is_none")]
    pub pause_start_time: Option<DateTime<Utc>>,
}

impl WorkSession {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            paused_time_ms: 0,
            is_paused: false,
            pause_start_time: None,
        }
    }
}
