pub mod files;
pub mod time;

pub use files::sanitize_file_name;
pub use time::parse_clock;
