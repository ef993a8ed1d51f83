use super::time::{duration, Hours};
use crate::error::{input_error, Error};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five working days of the board, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// Every weekday in board order
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Position of the day in the week, Monday is 0
    pub fn index(self) -> usize {
        self as usize
    }

    /// English name, also used as the identifier in URLs and files
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Key of the localized display name
    pub(crate) fn i18n_key(self) -> &'static str {
        match self {
            Weekday::Monday => "day_monday",
            Weekday::Tuesday => "day_tuesday",
            Weekday::Wednesday => "day_wednesday",
            Weekday::Thursday => "day_thursday",
            Weekday::Friday => "day_friday",
        }
    }

    /// Localized display name, e.g. `Lundi` for `fr`
    pub fn display_name(self, locale: &str) -> String {
        t!(self.i18n_key(), locale = locale).to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" | "lundi" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "mardi" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" | "mercredi" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "jeudi" => Ok(Weekday::Thursday),
            "friday" | "fri" | "vendredi" => Ok(Weekday::Friday),
            other => Err(input_error(&format!("Unknown weekday: {}", other))),
        }
    }
}

impl TryFrom<chrono::Weekday> for Weekday {
    type Error = Error;

    fn try_from(day: chrono::Weekday) -> Result<Self, Self::Error> {
        match day {
            chrono::Weekday::Mon => Ok(Weekday::Monday),
            chrono::Weekday::Tue => Ok(Weekday::Tuesday),
            chrono::Weekday::Wed => Ok(Weekday::Wednesday),
            chrono::Weekday::Thu => Ok(Weekday::Thursday),
            chrono::Weekday::Fri => Ok(Weekday::Friday),
            other => Err(input_error(&format!("{} is not on the board", other))),
        }
    }
}

/// Target of a mutation: a single day or the whole week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    Day(Weekday),
    AllWeek,
}

impl DaySelector {
    /// The weekdays this selector touches
    pub fn days(self) -> Vec<Weekday> {
        match self {
            DaySelector::Day(day) => vec![day],
            DaySelector::AllWeek => Weekday::ALL.to_vec(),
        }
    }
}

impl From<Weekday> for DaySelector {
    fn from(day: Weekday) -> Self {
        DaySelector::Day(day)
    }
}

impl FromStr for DaySelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "week" | "toute la semaine" => Ok(DaySelector::AllWeek),
            other => other.parse().map(DaySelector::Day),
        }
    }
}

/// One contiguous working interval. `start < end` is expected but never checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    start: Hours,
    end: Hours,
}

impl Shift {
    pub fn new(start: impl Into<Hours>, end: impl Into<Hours>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> Hours {
        self.start
    }

    pub fn end(&self) -> Hours {
        self.end
    }

    /// Length of the shift, negative when reversed
    pub fn duration(&self) -> Hours {
        duration(self.start, self.end)
    }

    /// True when the shift fully contains `[from, to]`
    pub fn covers(&self, from: Hours, to: Hours) -> bool {
        self.start <= from && to <= self.end
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::time::shift_to_string(self))
    }
}

/// Shifts of one person on one day, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonSchedule {
    shifts: Vec<Shift>,
}

impl PersonSchedule {
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Sum of every shift length
    pub fn total_worked(&self) -> Hours {
        self.shifts.iter().map(Shift::duration).sum()
    }

    fn push(&mut self, shift: Shift) {
        self.shifts.push(shift);
    }
}

impl From<Vec<Shift>> for PersonSchedule {
    fn from(shifts: Vec<Shift>) -> Self {
        Self { shifts }
    }
}

/// Everyone scheduled on one weekday, keyed by name in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    entries: Vec<(String, PersonSchedule)>,
}

impl DaySchedule {
    /// Append a shift, creating the person's entry at the end if absent
    pub fn add_shift(&mut self, person: &str, shift: Shift) {
        match self.entries.iter_mut().find(|(name, _)| name == person) {
            Some((_, schedule)) => schedule.push(shift),
            None => {
                let mut schedule = PersonSchedule::default();
                schedule.push(shift);
                self.entries.push((person.to_string(), schedule));
            }
        }
    }

    /// Drop every shift of a person. Returns whether anything was removed.
    pub fn remove_person(&mut self, person: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(name, _)| name != person);
        self.entries.len() != before
    }

    pub fn person(&self, name: &str) -> Option<&PersonSchedule> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, schedule)| schedule)
    }

    /// Persons with their shifts, in lane order
    pub fn persons(&self) -> impl Iterator<Item = (&str, &PersonSchedule)> {
        self.entries
            .iter()
            .map(|(name, schedule)| (name.as_str(), schedule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The whole board: one `DaySchedule` per weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    days: [DaySchedule; 5],
}

impl WeekSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        &self.days[day.index()]
    }

    /// Append a shift for a person on one day
    pub fn add_shift(&mut self, day: Weekday, person: &str, shift: Shift) {
        self.days[day.index()].add_shift(person, shift);
    }

    /// Remove a person from one day, a no-op when absent
    pub fn remove_all(&mut self, day: Weekday, person: &str) -> bool {
        self.days[day.index()].remove_person(person)
    }

    /// `add_shift` for every day the selector covers
    pub fn add_shift_to(&mut self, selector: DaySelector, person: &str, shift: Shift) {
        for day in selector.days() {
            self.add_shift(day, person, shift);
        }
    }

    /// `remove_all` for every day the selector covers. Returns how many days changed.
    pub fn remove_all_from(&mut self, selector: DaySelector, person: &str) -> usize {
        selector
            .days()
            .into_iter()
            .filter(|day| self.remove_all(*day, person))
            .count()
    }

    /// Days in board order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }
}
