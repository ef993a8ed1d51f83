use shiftboard::components::work_schedule::{BoardSession, DaySelector, Shift, WeekSchedule, Weekday};
use shiftboard::components::work_schedule::time::{duration, to_hour_string, Hours};
use shiftboard::config::{ChartSettings, Config};
use shiftboard::utils::parse_clock;

/// Smoke test to verify that the default config is usable
#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 3000);
    assert_eq!(config.locale, "en");
    assert!(config.font_path.is_none());
    assert!(config.chart.validate().is_ok());
    assert_eq!(config.chart_file(), std::path::PathBuf::from("config/chart.toml"));
}

/// The shipped chart.toml matches the built-in defaults
#[test]
fn test_shipped_chart_file() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/chart.toml");
    let settings = ChartSettings::from_file(&path).unwrap();
    assert_eq!(settings, ChartSettings::default());
}

#[test]
fn test_hour_formatting() {
    assert_eq!(to_hour_string(8.5), "8h30");
    assert_eq!(to_hour_string(17.0), "17h");
    assert_eq!(to_hour_string(0.0), "0h");
    assert_eq!(to_hour_string(8.999), "9h");
    assert_eq!(to_hour_string(-1.5), "-2h30");
    assert_eq!(duration(Hours::new(8.0), Hours::new(12.5)), Hours::new(4.5));
}

#[test]
fn test_remove_absent_person_is_noop() {
    let mut week = WeekSchedule::new();
    week.add_shift(Weekday::Monday, "Alice", Shift::new(8.0, 12.0));
    let before = week.clone();

    assert!(!week.remove_all(Weekday::Monday, "Bob"));
    assert!(!week.remove_all(Weekday::Tuesday, "Alice"));
    assert_eq!(week, before);
}

#[test]
fn test_session_round_trip_with_clock_input() {
    let mut session = BoardSession::new();
    let start = parse_clock("07:45").unwrap();
    let end = parse_clock("16:15").unwrap();
    session.add_shift(DaySelector::AllWeek, "Dana", start, end);

    let summary = session.summary("en");
    assert_eq!(summary.matches("    Dana : 7h45 - 16h15\n").count(), 5);

    session.remove_person(DaySelector::Day(Weekday::Wednesday), "Dana");
    let summary = session.summary("en");
    assert!(summary.contains("Wednesday :\n    nobody\n"));
    assert_eq!(summary.matches("Dana").count(), 4);
}

#[test]
fn test_french_summary() {
    let mut session = BoardSession::new();
    session.add_shift(DaySelector::Day(Weekday::Tuesday), "Élodie", 8.0, 12.0);
    session.add_shift(DaySelector::Day(Weekday::Tuesday), "Élodie", 14.0, 18.5);

    let summary = session.summary("fr");
    assert!(summary.starts_with("Lundi :\n    personne\nMardi :\n"));
    assert!(summary.contains("    Élodie : 8h - 12h et 14h - 18h30\n"));
    assert!(summary.ends_with("Vendredi :\n    personne\n"));
}
