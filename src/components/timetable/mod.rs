//! Per-day timetable charts: coverage aggregation, layout, and SVG/PNG output.

pub mod aggregator;
pub mod layout;
pub mod raster;
mod renderer;
pub mod scene;
mod svg;

pub use aggregator::{Slot, TickLabel, Timetable};
pub use layout::{ChartLayout, Color, Lane};
pub use renderer::{ChartRenderer, RenderedChart};
pub use scene::{Primitive, Role, Scene};
pub use svg::xml_escape;
