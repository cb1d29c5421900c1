//! Point-in-time values.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Instant in milliseconds since the Unix epoch, or an invalid date.
///
/// Invalid dates never reuse each other, not even themselves by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    millis: Option<i64>,
}

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis: Some(millis),
        }
    }

    pub const fn invalid() -> Self {
        Self { millis: None }
    }

    /// Current wall-clock time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Convert from `SystemTime`. Out-of-range instants become invalid.
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).ok(),
            Err(before) => {
                let before = before.duration();
                // Round toward negative infinity like a millisecond clock would
                let whole = before.as_millis() + u128::from(before.subsec_nanos() % 1_000_000 != 0);
                i64::try_from(whole).ok().map(|m| -m)
            }
        };
        Self { millis }
    }

    pub fn to_system_time(self) -> Option<SystemTime> {
        let millis = self.millis?;
        let offset = Duration::from_millis(millis.unsigned_abs());
        if millis >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }

    pub const fn millis(self) -> Option<i64> {
        self.millis
    }

    pub const fn is_valid(self) -> bool {
        self.millis.is_some()
    }

    /// Both valid and at the same millisecond.
    pub fn same_instant(self, other: Timestamp) -> bool {
        matches!((self.millis, other.millis), (Some(a), Some(b)) if a == b)
    }
}
