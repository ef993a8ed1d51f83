use crate::components::work_schedule::models::{DaySchedule, Shift};
use crate::components::work_schedule::time::Hours;
use serde::Serialize;

/// One sub-interval between two adjacent boundaries and how many people work all of it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub start: Hours,
    pub end: Hours,
    pub headcount: usize,
}

impl Slot {
    /// Horizontal centre of the slot, where its headcount is drawn
    pub fn midpoint(&self) -> f64 {
        (self.start.value() + self.end.value()) / 2.0
    }
}

/// Axis label for one boundary. Every second label starts with a newline
/// so neighbouring labels land on alternating rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLabel {
    pub value: Hours,
    pub text: String,
}

impl TickLabel {
    /// 0 for the first label row, 1 for the pushed-down one
    pub fn row(&self) -> usize {
        if self.text.starts_with('\n') {
            1
        } else {
            0
        }
    }

    /// Label text without the row prefix
    pub fn label(&self) -> &str {
        self.text.trim_start_matches('\n')
    }
}

/// Everything the chart needs to know about one day's coverage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timetable {
    pub boundaries: Vec<Hours>,
    pub slots: Vec<Slot>,
    pub ticks: Vec<TickLabel>,
}

impl Timetable {
    pub fn from_day(day: &DaySchedule) -> Self {
        let schedules: Vec<&[Shift]> = day.persons().map(|(_, s)| s.shifts()).collect();
        Self::from_shifts(&schedules)
    }

    /// Build from each person's shift list
    pub fn from_shifts(schedules: &[&[Shift]]) -> Self {
        let boundaries = boundaries(schedules);
        let slots = slots(&boundaries, schedules);
        let ticks = tick_labels(&boundaries);

        Self {
            boundaries,
            slots,
            ticks,
        }
    }
}

/// Every shift start and end across all persons, sorted and deduplicated
pub fn boundaries(schedules: &[&[Shift]]) -> Vec<Hours> {
    let mut values: Vec<Hours> = schedules
        .iter()
        .flat_map(|shifts| shifts.iter())
        .flat_map(|shift| [shift.start(), shift.end()])
        .collect();

    values.sort();
    values.dedup();
    values
}

/// A person works `[from, to]` when one of their shifts contains it entirely
pub fn is_person_working(from: Hours, to: Hours, shifts: &[Shift]) -> bool {
    shifts.iter().any(|shift| shift.covers(from, to))
}

/// Number of persons working the whole of `[from, to]`
pub fn count_working(from: Hours, to: Hours, schedules: &[&[Shift]]) -> usize {
    schedules
        .iter()
        .filter(|shifts| is_person_working(from, to, shifts))
        .count()
}

/// Headcount for every pair of adjacent boundaries. Empty below two boundaries.
pub fn slots(boundaries: &[Hours], schedules: &[&[Shift]]) -> Vec<Slot> {
    boundaries
        .windows(2)
        .map(|pair| Slot {
            start: pair[0],
            end: pair[1],
            headcount: count_working(pair[0], pair[1], schedules),
        })
        .collect()
}

/// Labels for the boundary ticks, alternating rows to limit overlap
pub fn tick_labels(boundaries: &[Hours]) -> Vec<TickLabel> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let mut text = value.to_hour_string();
            if (i + 1) % 2 == 0 {
                text.insert(0, '\n');
            }
            TickLabel {
                value: *value,
                text,
            }
        })
        .collect()
}
