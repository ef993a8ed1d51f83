// Export components
pub mod timetable;
pub mod work_schedule;

// Re-export the session facade and renderer
pub use timetable::ChartRenderer;
pub use work_schedule::BoardSession;
