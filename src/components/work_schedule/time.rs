use super::models::Shift;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A time of day, or a length of time, in decimal hours (`8.5` is half past eight).
///
/// Nothing is validated here. Negative, reversed or non-finite values flow through
/// every computation and come out as odd but harmless strings and geometry.
/// Ordering and equality use `f64::total_cmp`, so NaN sorts after every number.
/// Negative zero is stored as `0.0` so both compare equal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Hours(f64);

impl Hours {
    /// Wrap a raw decimal-hour value
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Build from a wall-clock reading, e.g. `(8, 30)` is `8.5`
    pub fn from_clock(hour: u32, minute: u32) -> Self {
        Self::new(f64::from(hour) + f64::from(minute) / 60.0)
    }

    /// The raw decimal-hour value
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Render as `8h`, `8h30`, ...
    pub fn to_hour_string(self) -> String {
        to_hour_string(self.0)
    }
}

impl From<f64> for Hours {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Hours> for f64 {
    fn from(hours: Hours) -> Self {
        hours.0
    }
}

impl PartialEq for Hours {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Hours {}

impl PartialOrd for Hours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hours {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Self) -> Self::Output {
        Hours::new(self.0 + rhs.0)
    }
}

impl Sub for Hours {
    type Output = Hours;

    fn sub(self, rhs: Self) -> Self::Output {
        Hours::new(self.0 - rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hours(0.0), |acc, h| acc + h)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hour_string(self.0))
    }
}

/// Format decimal hours as `{hour}h` or `{hour}h{minutes}`.
///
/// The value is rounded to whole minutes first and the hour is derived from that
/// total, so a value a few seconds short of the hour carries over (`8.999` is
/// `9h`, never `8h60`). Negative values keep floor semantics (`-1.5` is `-2h30`)
/// and non-finite values saturate instead of panicking.
pub fn to_hour_string(value: f64) -> String {
    // `as` saturates and maps NaN to 0
    let total_minutes = (value * 60.0).round() as i64;
    let hour = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);

    if minutes == 0 {
        return format!("{}h", hour);
    }

    format!("{}h{}", hour, minutes)
}

/// Length of the interval, `end - start`, never clamped
pub fn duration(start: Hours, end: Hours) -> Hours {
    end - start
}

/// Format a shift as `8h - 12h30`
pub fn shift_to_string(shift: &Shift) -> String {
    format!(
        "{} - {}",
        shift.start().to_hour_string(),
        shift.end().to_hour_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hour_string() {
        assert_eq!(to_hour_string(8.5), "8h30");
        assert_eq!(to_hour_string(8.0), "8h");
        assert_eq!(to_hour_string(0.0), "0h");
        assert_eq!(to_hour_string(13.25), "13h15");
        // No zero padding on minutes
        assert_eq!(to_hour_string(9.0 + 5.0 / 60.0), "9h5");
    }

    #[test]
    fn test_to_hour_string_carries_rounded_minutes() {
        assert_eq!(to_hour_string(8.999), "9h");
        assert_eq!(to_hour_string(8.9999999), "9h");
        assert_eq!(to_hour_string(23.995), "24h");
        // Just below the rounding threshold stays in the hour
        assert_eq!(to_hour_string(8.99), "8h59");
    }

    #[test]
    fn test_to_hour_string_never_panics() {
        assert_eq!(to_hour_string(-1.5), "-2h30");
        assert_eq!(to_hour_string(-0.25), "-1h45");
        assert_eq!(to_hour_string(-4.0), "-4h");
        assert_eq!(to_hour_string(f64::NAN), "0h");
        assert!(!to_hour_string(f64::INFINITY).is_empty());
        assert!(!to_hour_string(f64::NEG_INFINITY).is_empty());
    }

    #[test]
    fn test_duration_is_unclamped() {
        assert_eq!(duration(Hours::new(8.0), Hours::new(12.5)), Hours::new(4.5));
        assert_eq!(duration(Hours::new(12.0), Hours::new(8.0)), Hours::new(-4.0));
        assert_eq!(duration(Hours::new(9.0), Hours::new(9.0)), Hours::new(0.0));
    }

    #[test]
    fn test_shift_to_string() {
        let shift = Shift::new(Hours::new(8.0), Hours::new(12.5));
        assert_eq!(shift_to_string(&shift), "8h - 12h30");
    }

    #[test]
    fn test_from_clock() {
        assert_eq!(Hours::from_clock(8, 30), Hours::new(8.5));
        assert_eq!(Hours::from_clock(18, 0).to_string(), "18h");
        assert_eq!(Hours::from_clock(7, 45).to_hour_string(), "7h45");
    }

    #[test]
    fn test_total_order() {
        let mut values = vec![Hours::new(12.0), Hours::new(f64::NAN), Hours::new(8.0)];
        values.sort();
        assert_eq!(values[0], Hours::new(8.0));
        assert_eq!(values[1], Hours::new(12.0));
        assert!(values[2].value().is_nan());
        // Sum of shift lengths
        let total: Hours = [Hours::new(4.0), Hours::new(3.5)].into_iter().sum();
        assert_eq!(total.to_string(), "7h30");
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Hours::new(-0.0), Hours::new(0.0));
        assert_eq!(Hours::from(-0.0), Hours::new(0.0));
        assert!(Hours::new(-0.0).value().is_sign_positive());
        assert!((Hours::new(-0.0) + Hours::new(-0.0)).value().is_sign_positive());

        let parsed: Hours = serde_json::from_str("-0.0").unwrap();
        assert!(parsed.value().is_sign_positive());
        assert_eq!(serde_json::to_string(&Hours::new(8.5)).unwrap(), "8.5");
    }
}
