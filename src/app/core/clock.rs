// SPDX-License-Identifier: GPL-3.0-only

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of wall-clock time, as time elapsed since the Unix epoch
pub trait Clock: Send {
    fn now(&self) -> Duration;
}

/// The operating system clock, trusted as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        // a clock set before 1970 reads as the epoch itself
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}
