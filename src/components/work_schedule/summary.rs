use super::models::{DaySchedule, WeekSchedule, Weekday};
use super::time::shift_to_string;
use rust_i18n::t;

/// Word placed between two shifts of the same person
pub const SHIFT_SEPARATOR: &str = "et";

const INDENT: &str = "    ";

/// Render one weekday block: a header line followed by one line per person
pub fn format_day(weekday: Weekday, day: &DaySchedule, locale: &str) -> String {
    let mut text = format!("{} :\n", weekday.display_name(locale));

    if day.is_empty() {
        text.push_str(INDENT);
        text.push_str(&t!("summary_nobody", locale = locale));
        text.push('\n');
        return text;
    }

    let separator = format!(" {} ", SHIFT_SEPARATOR);
    for (name, schedule) in day.persons() {
        let shifts: Vec<String> = schedule.shifts().iter().map(shift_to_string).collect();
        text.push_str(&format!("{}{} : {}\n", INDENT, name, shifts.join(&separator)));
    }

    text
}

/// Render the whole week as plain text, Monday to Friday
pub fn format_week(week: &WeekSchedule, locale: &str) -> String {
    week.iter()
        .map(|(weekday, day)| format_day(weekday, day, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::work_schedule::models::Shift;

    #[test]
    fn test_empty_week_has_placeholders() {
        let text = format_week(&WeekSchedule::new(), "en");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        for (i, weekday) in Weekday::ALL.iter().enumerate() {
            assert_eq!(lines[i * 2], format!("{} :", weekday.as_str()));
            assert_eq!(lines[i * 2 + 1], "    nobody");
        }
    }

    #[test]
    fn test_person_lines_join_shifts() {
        let mut week = WeekSchedule::new();
        week.add_shift(Weekday::Tuesday, "Alice", Shift::new(8.0, 12.0));
        week.add_shift(Weekday::Tuesday, "Alice", Shift::new(13.5, 17.0));
        week.add_shift(Weekday::Tuesday, "Bob", Shift::new(9.25, 18.0));

        let text = format_day(Weekday::Tuesday, week.day(Weekday::Tuesday), "en");
        assert_eq!(
            text,
            "Tuesday :\n    Alice : 8h - 12h et 13h30 - 17h\n    Bob : 9h15 - 18h\n"
        );
    }

    #[test]
    fn test_french_locale() {
        let text = format_day(Weekday::Monday, &DaySchedule::default(), "fr");
        assert_eq!(text, "Lundi :\n    personne\n");
    }
}
