use crate::error::{config_error, env_error, BoardResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default locale for day names and page labels
pub const DEFAULT_LOCALE: &str = "en";

/// Locales shipped in `locales/`
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "fr"];

/// Geometry and typography of the rendered charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// First visible hour
    pub view_start: f64,
    /// Last visible hour
    pub view_end: f64,
    /// Plot area bounds as fractions of the figure, measured from the left and from the bottom
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_top: f64,
    /// Stroke width of the shift bars in pixels
    pub bar_width: f64,
    pub gridline_width: f64,
    pub title_font_px: f64,
    pub label_font_px: f64,
    pub tick_font_px: f64,
    pub headcount_font_px: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1800,
            height: 1300,
            view_start: 7.0,
            view_end: 19.0,
            margin_left: 0.125,
            margin_right: 0.9,
            margin_bottom: 0.11,
            margin_top: 0.88,
            bar_width: 11.0,
            gridline_width: 1.0,
            title_font_px: 17.0,
            label_font_px: 17.0,
            tick_font_px: 14.0,
            headcount_font_px: 21.0,
        }
    }
}

impl ChartSettings {
    /// Reject settings that would make the chart geometry degenerate
    pub fn validate(&self) -> BoardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(config_error("chart width and height must be positive"));
        }
        if !(self.view_start.is_finite() && self.view_end.is_finite())
            || self.view_end <= self.view_start
        {
            return Err(config_error("chart view_end must be after view_start"));
        }
        let fraction = 0.0..=1.0;
        if !fraction.contains(&self.margin_left)
            || !fraction.contains(&self.margin_right)
            || self.margin_right <= self.margin_left
        {
            return Err(config_error("chart horizontal margins must satisfy 0 <= left < right <= 1"));
        }
        if !fraction.contains(&self.margin_bottom)
            || !fraction.contains(&self.margin_top)
            || self.margin_top <= self.margin_bottom
        {
            return Err(config_error("chart vertical margins must satisfy 0 <= bottom < top <= 1"));
        }
        Ok(())
    }

    /// Visible hour range
    pub fn x_view(&self) -> (f64, f64) {
        (self.view_start, self.view_end)
    }

    /// Load overrides from a TOML file, keeping defaults for missing keys
    pub fn from_file(path: &Path) -> BoardResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings: ChartSettings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Main configuration structure for the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the web server binds to
    pub bind_address: String,
    /// Port of the web server
    pub port: u16,
    /// Locale for day names and page labels
    pub locale: String,
    /// TrueType font used to draw text into PNG charts
    pub font_path: Option<PathBuf>,
    /// Idle minutes before a browser session is discarded
    pub session_ttl_minutes: i64,
    /// Directory holding `chart.toml`
    pub config_dir: PathBuf,
    /// Chart geometry
    pub chart: ChartSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            locale: DEFAULT_LOCALE.to_string(),
            font_path: None,
            session_ttl_minutes: 12 * 60,
            config_dir: PathBuf::from("config"),
            chart: ChartSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BoardResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        if let Ok(address) = env::var("BIND_ADDRESS") {
            config.bind_address = address;
        }

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse::<u16>().map_err(|_| env_error("PORT"))?;
        }

        if let Ok(ttl) = env::var("SESSION_TTL_MINUTES") {
            config.session_ttl_minutes = ttl
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| env_error("SESSION_TTL_MINUTES"))?;
        }

        if let Ok(locale) = env::var("BOARD_LOCALE") {
            config.locale = locale;
        }
        if !SUPPORTED_LOCALES.contains(&config.locale.as_str()) {
            warn!(
                "Unsupported locale {}, falling back to {}",
                config.locale, DEFAULT_LOCALE
            );
            config.locale = DEFAULT_LOCALE.to_string();
        }

        config.font_path = env::var("CHART_FONT_PATH").ok().map(PathBuf::from);

        if let Ok(dir) = env::var("CONFIG_DIR") {
            config.config_dir = PathBuf::from(dir);
        }

        // Merge chart overrides from file if it exists
        let chart_file = config.chart_file();
        if chart_file.exists() {
            config.chart = ChartSettings::from_file(&chart_file)?;
            info!("Loaded chart settings from {}", chart_file.display());
        }

        Ok(config)
    }

    /// Path of the chart settings file
    pub fn chart_file(&self) -> PathBuf {
        self.config_dir.join("chart.toml")
    }
}
