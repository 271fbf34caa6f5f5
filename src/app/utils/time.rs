// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

/// Length of a TOTP window in seconds
pub const STEP_SECS: u64 = 30;

const STEP_MILLIS: u64 = STEP_SECS * 1_000;

/// Returns the TOTP counter for a point in time (`floor(unix_seconds / 30)`)
pub fn time_step(now: Duration) -> u64 {
    now.as_secs() / STEP_SECS
}

/// Returns the unix time in milliseconds at which the window after `step` starts
pub fn step_end_millis(step: u64) -> u64 {
    step.saturating_add(1).saturating_mul(STEP_MILLIS)
}

/// Calculates how many milliseconds remain until the next TOTP refresh
/// based on standard TOTP timing (synchronized to Unix epoch)
///
/// # Arguments
/// * `now` - Time elapsed since the Unix epoch
///
/// # Returns
/// A value in `1..=30_000`, exactly `30_000` on a boundary
pub fn millis_until_next_step(now: Duration) -> u64 {
    // Every TOTP app counts from the same epoch, so this stays in sync with them
    STEP_MILLIS - (unix_millis(now) % STEP_MILLIS)
}

pub fn unix_millis(now: Duration) -> u64 {
    u64::try_from(now.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_follows_thirty_second_windows() {
        assert_eq!(time_step(Duration::ZERO), 0);
        assert_eq!(time_step(Duration::from_millis(29_999)), 0);
        assert_eq!(time_step(Duration::from_secs(30)), 1);
        assert_eq!(time_step(Duration::from_secs(59)), 1);
        assert_eq!(time_step(Duration::from_secs(1_111_111_109)), 37_037_036);
    }

    #[test]
    fn remaining_millis_counts_down_to_boundary() {
        assert_eq!(millis_until_next_step(Duration::from_secs(30)), 30_000);
        assert_eq!(millis_until_next_step(Duration::from_millis(30_001)), 29_999);
        assert_eq!(millis_until_next_step(Duration::from_millis(55_000)), 5_000);
        assert_eq!(millis_until_next_step(Duration::from_millis(59_999)), 1);
    }

    #[test]
    fn window_end_is_next_boundary() {
        assert_eq!(step_end_millis(0), 30_000);
        assert_eq!(step_end_millis(1), 60_000);
        assert_eq!(step_end_millis(u64::MAX), u64::MAX);
    }
}
