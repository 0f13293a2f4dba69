// SPDX-License-Identifier: MPL-2.0
//! Time conversions for the position readout.

use std::time::Duration;

/// Converts seconds to a [`Duration`], treating negative or non-finite
/// values as zero.
///
/// # Examples
///
/// ```
/// use pinview::video_player::time_units::secs_to_duration;
/// use std::time::Duration;
///
/// assert_eq!(secs_to_duration(1.5), Duration::from_millis(1_500));
/// assert_eq!(secs_to_duration(-3.0), Duration::ZERO);
/// ```
#[must_use]
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

/// Formats a position as `hh:mm:ss`, truncating fractional seconds.
///
/// # Examples
///
/// ```
/// use pinview::video_player::time_units::format_timestamp;
///
/// assert_eq!(format_timestamp(0.0), "00:00:00");
/// assert_eq!(format_timestamp(3_725.9), "01:02:05");
/// ```
#[must_use]
pub fn format_timestamp(secs: f64) -> String {
    let total = secs_to_duration(secs).as_secs();
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timestamp(59.99), "00:00:59");
        assert_eq!(format_timestamp(61.0), "00:01:01");
    }

    #[test]
    fn formats_long_durations() {
        assert_eq!(format_timestamp(36_000.0), "10:00:00");
    }

    #[test]
    fn invalid_input_formats_as_zero() {
        assert_eq!(format_timestamp(f64::NAN), "00:00:00");
        assert_eq!(format_timestamp(-5.0), "00:00:00");
    }
}
