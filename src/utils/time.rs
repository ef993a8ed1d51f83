use crate::components::work_schedule::time::Hours;
use crate::error::{input_error, BoardResult};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse a wall-clock time typed by a user into decimal hours.
///
/// Accepts `HH:MM` as sent by browser time inputs, and the board's own
/// `8h`/`8h30` notation so summaries can be pasted back in.
pub fn parse_clock(input: &str) -> BoardResult<Hours> {
    let trimmed = input.trim();
    let normalized = match trimmed.split_once('h') {
        Some((hour, "")) => format!("{}:00", hour),
        Some((hour, minute)) => format!("{}:{}", hour, minute),
        None => trimmed.to_string(),
    };

    parse_time(&normalized)
        .map(|(hour, minute)| Hours::from_clock(hour, minute))
        .ok_or_else(|| input_error(&format!("Invalid time: {:?}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        // Valid cases
        assert_eq!(parse_time("00:00"), Some((0, 0)));
        assert_eq!(parse_time("12:30"), Some((12, 30)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));

        // Invalid cases
        assert_eq!(parse_time("24:00"), None); // Hour out of range
        assert_eq!(parse_time("12:60"), None); // Minute out of range
        assert_eq!(parse_time("12:30:45"), None); // Too many parts
        assert_eq!(parse_time("12"), None); // Too few parts
        assert_eq!(parse_time("12:ab"), None); // Invalid minute
        assert_eq!(parse_time("ab:30"), None); // Invalid hour
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("08:00").unwrap(), Hours::new(8.0));
        assert_eq!(parse_clock(" 13:30 ").unwrap(), Hours::new(13.5));
        assert_eq!(parse_clock("9:15").unwrap(), Hours::new(9.25));
        assert_eq!(parse_clock("8h").unwrap(), Hours::new(8.0));
        assert_eq!(parse_clock("17h45").unwrap(), Hours::new(17.75));

        assert!(parse_clock("").is_err());
        assert!(parse_clock("noon").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("h30").is_err());
    }
}
