/// Actual against target, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub actual_ms: i64,
    pub target_ms: i64,
}

impl Balance {
    pub fn new(actual_ms: i64, target_ms: i64) -> Self {
        Self {
            actual_ms,
            target_ms,
        }
    }

    /// Positive = overtime, negative = undertime.
    pub fn delta_ms(&self) -> i64 {
        self.actual_ms - self.target_ms
    }

    pub fn is_overtime(&self) -> bool {
        self.delta_ms() > 0
    }

    pub fn is_undertime(&self) -> bool {
        self.delta_ms() < 0
    }
}
