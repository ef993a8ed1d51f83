//! Render a whole week from a TOML file: one PNG and one SVG per weekday plus `summary.txt`.
//!
//! Usage: `render_week <week.toml> [out_dir]`

use serde::Deserialize;
use shiftboard::components::timetable::ChartRenderer;
use shiftboard::components::work_schedule::{BoardSession, DaySelector, Weekday};
use shiftboard::error::{input_error, BoardResult, Error};
use shiftboard::startup;
use shiftboard::utils::{parse_clock, sanitize_file_name};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize)]
struct WeekFile {
    title: Option<String>,
    #[serde(default, rename = "shift")]
    shifts: Vec<ShiftEntry>,
}

#[derive(Debug, Deserialize)]
struct ShiftEntry {
    day: String,
    name: String,
    start: String,
    end: String,
}

fn load_week(path: &Path) -> BoardResult<(BoardSession, Option<String>)> {
    let content = fs::read_to_string(path)?;
    let file: WeekFile = toml::from_str(&content)?;

    let mut session = BoardSession::new();
    for (i, entry) in file.shifts.iter().enumerate() {
        let selector: DaySelector = entry
            .day
            .parse()
            .map_err(|e: Error| input_error(&format!("shift #{}: {}", i + 1, e)))?;
        let start = parse_clock(&entry.start)?;
        let end = parse_clock(&entry.end)?;
        session.add_shift(selector, &entry.name, start, end);
    }

    Ok((session, file.title))
}

fn write_week(
    session: &BoardSession,
    title: Option<&str>,
    renderer: &ChartRenderer,
    out_dir: &Path,
) -> BoardResult<()> {
    fs::create_dir_all(out_dir)?;

    for weekday in Weekday::ALL {
        let chart = session.render(weekday, title, renderer)?;
        let png_path = out_dir.join(sanitize_file_name(&chart.file_name));
        fs::write(&png_path, &chart.png)?;
        fs::write(png_path.with_extension("svg"), chart.svg())?;
        info!("Wrote {}", png_path.display());
    }

    let summary_path = out_dir.join("summary.txt");
    fs::write(&summary_path, session.summary(renderer.locale()))?;
    info!("Wrote {}", summary_path.display());
    Ok(())
}

fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| input_error("usage: render_week <week.toml> [out_dir]"))?;
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = startup::load_config()?;
    let renderer = ChartRenderer::from_config(&config)?;

    let (session, title) = load_week(&input)?;
    write_week(&session, title.as_deref(), &renderer, &out_dir)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftboard::config::ChartSettings;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("shiftboard-week-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_title_cannot_leave_out_dir() {
        let root = scratch_dir();
        let out_dir = root.join("out");
        let renderer = ChartRenderer::new(
            ChartSettings {
                width: 200,
                height: 150,
                ..ChartSettings::default()
            },
            "en",
        )
        .without_font();
        let mut session = BoardSession::new();
        session.add_shift(DaySelector::Day(Weekday::Monday), "Alice", 8.0, 12.0);

        write_week(&session, Some("../x"), &renderer, &out_dir).unwrap();
        assert!(out_dir.join(".._x - Monday.png").is_file());
        assert!(out_dir.join(".._x - Monday.svg").is_file());
        assert!(!root.join("x - Monday.png").exists());

        write_week(&session, Some("a/b"), &renderer, &out_dir).unwrap();
        assert!(out_dir.join("a_b - Sunday.png").is_file());

        fs::remove_dir_all(&root).unwrap();
    }
}
