//! Pixel-space description of a day chart.
//!
//! A [`Scene`] is built once from a [`ChartLayout`] and then serialised to SVG or
//! rasterised to PNG, so the on-screen preview and the downloaded file always share
//! the same geometry.

use super::layout::{ChartLayout, Color, NAME_X, TOTAL_X};
use crate::config::ChartSettings;
use serde::Serialize;

/// Gap between the axis and the first row of tick labels
const TICK_LABEL_GAP: f64 = 8.0;
const TICK_LENGTH: f64 = 5.0;
const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Horizontal alignment of a text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// What a primitive represents, used by tests and the JSON view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Title,
    Gridline,
    Axis,
    Tick,
    TickLabel,
    Bar,
    Name,
    Total,
    Headcount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line {
        role: Role,
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    /// `at` is the vertical middle of the text line
    Text {
        role: Role,
        at: Point,
        content: String,
        size: f64,
        color: Color,
        anchor: Anchor,
    },
    Polygon {
        role: Role,
        points: Vec<Point>,
        color: Color,
    },
}

impl Primitive {
    pub fn role(&self) -> Role {
        match self {
            Primitive::Line { role, .. }
            | Primitive::Text { role, .. }
            | Primitive::Polygon { role, .. } => *role,
        }
    }
}

/// Maps chart units to pixels. The y axis points up in chart units and down in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub x_view: (f64, f64),
    pub y_view: (f64, f64),
}

impl Viewport {
    pub fn new(settings: &ChartSettings, x_view: (f64, f64), y_view: (f64, f64)) -> Self {
        let width = f64::from(settings.width);
        let height = f64::from(settings.height);
        Self {
            left: width * settings.margin_left,
            right: width * settings.margin_right,
            top: height * (1.0 - settings.margin_top),
            bottom: height * (1.0 - settings.margin_bottom),
            x_view,
            y_view,
        }
    }

    pub fn x(&self, value: f64) -> f64 {
        let (start, end) = self.x_view;
        self.left + (value - start) / (end - start) * (self.right - self.left)
    }

    pub fn y(&self, value: f64) -> f64 {
        let (low, high) = self.y_view;
        self.bottom - (value - low) / (high - low) * (self.bottom - self.top)
    }

    pub fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.x(x), self.y(y))
    }

    /// Whether an hour value falls inside the horizontal view
    pub fn shows(&self, value: f64) -> bool {
        value >= self.x_view.0 && value <= self.x_view.1
    }

    /// Clip `[a, b]` (in either order) to the horizontal view
    pub fn clip(&self, a: f64, b: f64) -> Option<(f64, f64)> {
        if !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if high < self.x_view.0 || low > self.x_view.1 {
            return None;
        }
        Some((low.max(self.x_view.0), high.min(self.x_view.1)))
    }
}

/// A rendered chart, ready to be written as SVG or PNG
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Place every element of the layout on the figure
    pub fn from_layout(layout: &ChartLayout, settings: &ChartSettings) -> Self {
        let view = Viewport::new(settings, layout.x_view, layout.y_view);
        let mut primitives = Vec::new();

        primitives.push(Primitive::Text {
            role: Role::Title,
            at: Point::new(f64::from(settings.width) / 2.0, view.top / 2.0),
            content: layout.title.clone(),
            size: settings.title_font_px,
            color: Color::BLACK,
            anchor: Anchor::Middle,
        });

        // Gridlines span the whole plot height
        for value in layout.timetable.boundaries.iter().map(|b| b.value()) {
            if !view.shows(value) {
                continue;
            }
            let x = view.x(value);
            primitives.push(Primitive::Line {
                role: Role::Gridline,
                from: Point::new(x, view.top),
                to: Point::new(x, view.bottom),
                width: settings.gridline_width,
                color: Color::BLACK,
            });
        }

        for lane in &layout.lanes {
            for bar in &lane.bars {
                let Some((start, end)) = view.clip(bar.start.value(), bar.end.value()) else {
                    continue;
                };
                primitives.push(Primitive::Line {
                    role: Role::Bar,
                    from: view.point(start, lane.y),
                    to: view.point(end, lane.y),
                    width: settings.bar_width,
                    color: lane.color,
                });
            }

            primitives.push(Primitive::Text {
                role: Role::Name,
                at: view.point(NAME_X, lane.y),
                content: lane.name.clone(),
                size: settings.label_font_px,
                color: lane.color,
                anchor: Anchor::Middle,
            });
            primitives.push(Primitive::Text {
                role: Role::Total,
                at: view.point(TOTAL_X, lane.y),
                content: lane.total.clone(),
                size: settings.label_font_px,
                color: lane.color,
                anchor: Anchor::Middle,
            });
        }

        // Only the bottom spine is drawn, ending in an arrow head
        primitives.push(Primitive::Line {
            role: Role::Axis,
            from: Point::new(view.left, view.bottom),
            to: Point::new(view.right, view.bottom),
            width: 1.0,
            color: Color::BLACK,
        });
        primitives.push(Primitive::Polygon {
            role: Role::Axis,
            points: vec![
                Point::new(view.right + ARROW_LENGTH, view.bottom),
                Point::new(view.right, view.bottom - ARROW_HALF_WIDTH),
                Point::new(view.right, view.bottom + ARROW_HALF_WIDTH),
            ],
            color: Color::BLACK,
        });

        let row_height = settings.tick_font_px * 1.2;
        for tick in &layout.timetable.ticks {
            let value = tick.value.value();
            if !view.shows(value) {
                continue;
            }
            let x = view.x(value);
            primitives.push(Primitive::Line {
                role: Role::Tick,
                from: Point::new(x, view.bottom),
                to: Point::new(x, view.bottom + TICK_LENGTH),
                width: 1.0,
                color: Color::BLACK,
            });
            primitives.push(Primitive::Text {
                role: Role::TickLabel,
                at: Point::new(
                    x,
                    view.bottom
                        + TICK_LABEL_GAP
                        + row_height * tick.row() as f64
                        + settings.tick_font_px / 2.0,
                ),
                content: tick.label().to_string(),
                size: settings.tick_font_px,
                color: Color::BLACK,
                anchor: Anchor::Middle,
            });
        }

        for mark in &layout.headcounts {
            primitives.push(Primitive::Text {
                role: Role::Headcount,
                at: view.point(mark.x, mark.y),
                content: mark.count.to_string(),
                size: settings.headcount_font_px,
                color: Color::BLACK,
                anchor: Anchor::Middle,
            });
        }

        Self {
            width: settings.width,
            height: settings.height,
            background: Color::WHITE,
            primitives,
        }
    }

    /// Primitives with the given role, in drawing order
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.role() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::work_schedule::models::{DaySchedule, Shift, Weekday};

    fn layout_for(day: &DaySchedule) -> ChartLayout {
        ChartLayout::build("Monday", Weekday::Monday, day, None, (7.0, 19.0))
    }

    #[test]
    fn test_viewport_mapping() {
        let settings = ChartSettings::default();
        let view = Viewport::new(&settings, (7.0, 19.0), (-30.0, 20.0));

        assert_eq!(view.x(7.0), view.left);
        assert_eq!(view.x(19.0), view.right);
        assert!((view.y(-30.0) - view.bottom).abs() < 1e-9);
        assert!((view.y(20.0) - view.top).abs() < 1e-9);
        assert!(view.x(6.0) < view.left);
        assert!(view.x(20.0) > view.right);
    }

    #[test]
    fn test_clip() {
        let settings = ChartSettings::default();
        let view = Viewport::new(&settings, (7.0, 19.0), (-30.0, 0.0));
        assert_eq!(view.clip(5.0, 9.0), Some((7.0, 9.0)));
        assert_eq!(view.clip(12.0, 8.0), Some((8.0, 12.0)));
        assert_eq!(view.clip(18.0, 22.0), Some((18.0, 19.0)));
        assert_eq!(view.clip(1.0, 6.0), None);
        assert_eq!(view.clip(f64::NAN, 9.0), None);
    }

    #[test]
    fn test_scene_for_single_person() {
        let mut day = DaySchedule::default();
        day.add_shift("Alice", Shift::new(8.0, 12.0));
        day.add_shift("Alice", Shift::new(13.0, 17.0));
        let scene = Scene::from_layout(&layout_for(&day), &ChartSettings::default());

        assert_eq!(scene.with_role(Role::Bar).count(), 2);
        assert_eq!(scene.with_role(Role::Gridline).count(), 4);
        assert_eq!(scene.with_role(Role::Headcount).count(), 3);

        let totals: Vec<&Primitive> = scene.with_role(Role::Total).collect();
        assert_eq!(totals.len(), 1);
        match totals[0] {
            Primitive::Text { content, .. } => assert_eq!(content, "8h"),
            other => panic!("unexpected primitive {:?}", other),
        }

        // Both bars sit on the lane centre
        let heights: Vec<f64> = scene
            .with_role(Role::Bar)
            .map(|p| match p {
                Primitive::Line { from, to, .. } => {
                    assert_eq!(from.y, to.y);
                    from.y
                }
                other => panic!("unexpected primitive {:?}", other),
            })
            .collect();
        assert_eq!(heights[0], heights[1]);
    }

    #[test]
    fn test_shifts_outside_view_are_clipped_visually() {
        let mut day = DaySchedule::default();
        day.add_shift("Night", Shift::new(20.0, 23.0));
        day.add_shift("Early", Shift::new(5.0, 9.0));
        let layout = layout_for(&day);
        let scene = Scene::from_layout(&layout, &ChartSettings::default());

        // Data keeps every boundary
        assert_eq!(layout.timetable.boundaries.len(), 4);
        // Only the 9h gridline and the clipped early bar are visible
        assert_eq!(scene.with_role(Role::Gridline).count(), 1);
        assert_eq!(scene.with_role(Role::Bar).count(), 1);
        assert_eq!(scene.with_role(Role::TickLabel).count(), 1);
    }

    #[test]
    fn test_tick_labels_alternate_rows() {
        let mut day = DaySchedule::default();
        day.add_shift("Alice", Shift::new(8.0, 12.0));
        day.add_shift("Bob", Shift::new(9.0, 17.0));
        let settings = ChartSettings::default();
        let scene = Scene::from_layout(&layout_for(&day), &settings);

        let labels: Vec<(&str, f64)> = scene
            .with_role(Role::TickLabel)
            .map(|p| match p {
                Primitive::Text { content, at, .. } => (content.as_str(), at.y),
                other => panic!("unexpected primitive {:?}", other),
            })
            .collect();
        let texts: Vec<&str> = labels.iter().map(|(text, _)| *text).collect();
        assert_eq!(texts, vec!["8h", "9h", "12h", "17h"]);

        let row_height = settings.tick_font_px * 1.2;
        assert!((labels[1].1 - labels[0].1 - row_height).abs() < 1e-9);
        assert_eq!(labels[0].1, labels[2].1);
        assert_eq!(labels[1].1, labels[3].1);

        let svg = scene.to_svg();
        assert!(!svg.contains("<tspan"));
        assert!(svg.contains(">9h</text>"));
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::from_layout(&layout_for(&DaySchedule::default()), &ChartSettings::default());
        assert_eq!(scene.with_role(Role::Bar).count(), 0);
        assert_eq!(scene.with_role(Role::Headcount).count(), 0);
        assert_eq!(scene.with_role(Role::Title).count(), 1);
        assert_eq!(scene.with_role(Role::Axis).count(), 2);
        assert!(scene.primitives.iter().all(|p| match p {
            Primitive::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            Primitive::Text { at, .. } => at.is_finite(),
            Primitive::Polygon { points, .. } => points.iter().all(Point::is_finite),
        }));
    }
}
