mod handle;
pub mod models;
pub mod summary;
pub mod time;

pub use handle::BoardSession;
pub use models::{DaySchedule, DaySelector, PersonSchedule, Shift, WeekSchedule, Weekday};
pub use time::Hours;
