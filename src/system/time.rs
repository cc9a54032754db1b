//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;
use pinetime_motd::time::local_time;

pub struct TimeReference {
    /// UTC seconds since the Unix epoch at `instant`
    utc_epoch: i64,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference for the current system time
    pub fn now(utc_epoch: i64) -> Self {
        Self {
            utc_epoch,
            instant: Instant::now(),
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time from UTC
    utc_offset_secs: i32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, utc_offset_secs: i32) -> Self {
        Self {
            reference,
            utc_offset_secs,
        }
    }

    /// Get current local time
    pub fn get_time(&self) -> NaiveDateTime {
        let uptime = Instant::now().duration_since(self.reference.instant);
        local_time(
            self.reference.utc_epoch,
            uptime.as_secs(),
            self.utc_offset_secs,
        )
    }
}
