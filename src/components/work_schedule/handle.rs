use super::models::{DaySelector, DaySchedule, Shift, WeekSchedule, Weekday};
use super::summary::format_week;
use super::time::Hours;
use crate::components::timetable::{ChartRenderer, RenderedChart};
use crate::error::BoardResult;
use tracing::{debug, info};

/// One user's planning board: the week being edited and the requests it answers
#[derive(Debug, Clone, Default)]
pub struct BoardSession {
    week: WeekSchedule,
}

impl BoardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing week, e.g. one loaded from a file
    pub fn from_week(week: WeekSchedule) -> Self {
        Self { week }
    }

    pub fn week(&self) -> &WeekSchedule {
        &self.week
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        self.week.day(weekday)
    }

    /// Append a shift for `name` on the selected day or on every day
    pub fn add_shift(
        &mut self,
        selector: DaySelector,
        name: &str,
        start: impl Into<Hours>,
        end: impl Into<Hours>,
    ) {
        let shift = Shift::new(start, end);
        self.week.add_shift_to(selector, name, shift);
        info!("Added shift {} for {} on {:?}", shift, name, selector);
    }

    /// Drop every shift of `name` on the selected days. Returns how many days changed.
    pub fn remove_person(&mut self, selector: DaySelector, name: &str) -> usize {
        let removed = self.week.remove_all_from(selector, name);
        if removed == 0 {
            debug!("{} had no shifts on {:?}", name, selector);
        } else {
            info!("Removed {} from {} day(s)", name, removed);
        }
        removed
    }

    /// Chart for one weekday
    pub fn render(
        &self,
        weekday: Weekday,
        title: Option<&str>,
        renderer: &ChartRenderer,
    ) -> BoardResult<RenderedChart> {
        renderer.render(weekday, self.week.day(weekday), title)
    }

    /// Plain-text overview of the week
    pub fn summary(&self, locale: &str) -> String {
        format_week(&self.week, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartSettings;

    #[test]
    fn test_add_and_remove_across_week() {
        let mut session = BoardSession::new();
        session.add_shift(DaySelector::AllWeek, "Alice", 8.0, 12.0);
        session.add_shift(DaySelector::Day(Weekday::Monday), "Bob", 9.0, 17.0);

        for weekday in Weekday::ALL {
            assert!(session.day(weekday).person("Alice").is_some());
        }
        assert_eq!(session.day(Weekday::Monday).len(), 2);

        assert_eq!(session.remove_person(DaySelector::AllWeek, "Alice"), 5);
        assert_eq!(session.remove_person(DaySelector::AllWeek, "Alice"), 0);
        assert_eq!(session.day(Weekday::Monday).len(), 1);
        assert!(session.day(Weekday::Tuesday).is_empty());
    }

    #[test]
    fn test_summary_reflects_mutations() {
        let mut session = BoardSession::new();
        session.add_shift(Weekday::Friday.into(), "Carla", 10.0, 14.5);

        let summary = session.summary("en");
        assert!(summary.contains("Friday :\n    Carla : 10h - 14h30\n"));
        assert!(summary.starts_with("Monday :\n    nobody\n"));
    }

    #[test]
    fn test_render_empty_day() {
        let renderer = ChartRenderer::new(
            ChartSettings {
                width: 300,
                height: 200,
                ..ChartSettings::default()
            },
            "en",
        );
        let chart = BoardSession::new()
            .render(Weekday::Monday, None, &renderer)
            .unwrap();
        assert!(chart.layout.lanes.is_empty());
        assert!(chart.layout.headcounts.is_empty());
        assert!(!chart.png.is_empty());
    }
}
