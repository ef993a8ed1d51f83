use super::aggregator::Timetable;
use crate::components::work_schedule::models::{DaySchedule, Weekday};
use crate::components::work_schedule::time::Hours;
use serde::{Serialize, Serializer};
use std::fmt;

/// Vertical distance between two lanes, in chart units
pub const LANE_SPACING: f64 = 20.0;
/// Horizontal position of the person names
pub const NAME_X: f64 = 6.0;
/// Horizontal position of the worked-hours totals
pub const TOTAL_X: f64 = 20.0;
/// Vertical position of the headcount annotations, below the axis
pub const HEADCOUNT_Y: f64 = -15.0;
/// Lower edge of the vertical view
pub const Y_FLOOR: f64 = -30.0;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Lane colours, used in order and cycled when there are more persons
pub const PALETTE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4), // blue
    Color::rgb(0xd6, 0x27, 0x28), // red
    Color::rgb(0x2c, 0xa0, 0x2c), // green
    Color::rgb(0xff, 0x7f, 0x0e), // orange
    Color::rgb(0x7f, 0x7f, 0x7f), // gray
    Color::rgb(0x94, 0x67, 0xbd), // purple
    Color::rgb(0xbc, 0xbd, 0x22), // olive
    Color::rgb(0x8c, 0x56, 0x4b), // brown
    Color::rgb(0xe3, 0x77, 0xc2), // pink
    Color::rgb(0x17, 0xbe, 0xcf), // cyan
];

/// Colour of the lane at `index`
pub fn lane_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Centre height of the lane at `index`
pub fn lane_height(index: usize) -> f64 {
    LANE_SPACING * index as f64 + LANE_SPACING / 2.0
}

/// Chart title: `"{title} - {weekday}"`, or the weekday alone when no title is given
pub fn chart_title(title: Option<&str>, weekday_name: &str) -> String {
    match title {
        Some(prefix) if !prefix.is_empty() => format!("{} - {}", prefix, weekday_name),
        _ => weekday_name.to_string(),
    }
}

/// One horizontal bar, in hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub start: Hours,
    pub end: Hours,
}

/// The row of one person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    pub index: usize,
    pub name: String,
    pub y: f64,
    pub color: Color,
    pub bars: Vec<Bar>,
    /// Worked hours, already formatted
    pub total: String,
}

/// Headcount annotation under one slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadcountMark {
    pub x: f64,
    pub y: f64,
    pub count: usize,
}

/// Geometry of a day chart in chart units: hours horizontally, lane units vertically
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub weekday: Weekday,
    pub title: String,
    pub file_name: String,
    pub lanes: Vec<Lane>,
    pub timetable: Timetable,
    pub headcounts: Vec<HeadcountMark>,
    /// Visible hour range
    pub x_view: (f64, f64),
    /// Visible vertical range, from below the axis to the top lane edge
    pub y_view: (f64, f64),
}

impl ChartLayout {
    /// Lay out one day. Lanes follow the day's insertion order.
    pub fn build(
        weekday_name: &str,
        weekday: Weekday,
        day: &DaySchedule,
        title: Option<&str>,
        x_view: (f64, f64),
    ) -> Self {
        let timetable = Timetable::from_day(day);

        let lanes: Vec<Lane> = day
            .persons()
            .enumerate()
            .map(|(index, (name, schedule))| Lane {
                index,
                name: name.to_string(),
                y: lane_height(index),
                color: lane_color(index),
                bars: schedule
                    .shifts()
                    .iter()
                    .map(|shift| Bar {
                        start: shift.start(),
                        end: shift.end(),
                    })
                    .collect(),
                total: schedule.total_worked().to_hour_string(),
            })
            .collect();

        let headcounts = timetable
            .slots
            .iter()
            .map(|slot| HeadcountMark {
                x: slot.midpoint(),
                y: HEADCOUNT_Y,
                count: slot.headcount,
            })
            .collect();

        let title = chart_title(title, weekday_name);
        let file_name = format!("{}.png", title);
        let y_max = day.len() as f64 * LANE_SPACING;

        Self {
            weekday,
            title,
            file_name,
            lanes,
            timetable,
            headcounts,
            x_view,
            y_view: (Y_FLOOR, y_max),
        }
    }
}
