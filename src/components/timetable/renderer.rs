use super::layout::ChartLayout;
use super::raster::{bundled_font, load_font, rasterize};
use super::scene::Scene;
use crate::components::work_schedule::models::{DaySchedule, Weekday};
use crate::config::{ChartSettings, Config};
use crate::error::BoardResult;
use ab_glyph::FontVec;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{error, info, instrument};

/// Parsed once, shared by every renderer that has no font file configured
fn shared_bundled_font() -> Option<Arc<FontVec>> {
    static FONT: OnceLock<Option<Arc<FontVec>>> = OnceLock::new();
    FONT.get_or_init(|| match bundled_font() {
        Ok(font) => Some(Arc::new(font)),
        Err(e) => {
            error!("Bundled chart font unusable, PNG text disabled: {:?}", e);
            None
        }
    })
    .clone()
}

/// Output of one render request
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub layout: ChartLayout,
    pub scene: Scene,
    /// Encoded PNG image
    pub png: Vec<u8>,
    /// Suggested download name, `{title}.png`
    pub file_name: String,
}

impl RenderedChart {
    pub fn svg(&self) -> String {
        self.scene.to_svg()
    }
}

/// Turns a day schedule into chart outputs. Cheap to clone.
#[derive(Clone)]
pub struct ChartRenderer {
    settings: ChartSettings,
    font: Option<Arc<FontVec>>,
    locale: String,
}

impl fmt::Debug for ChartRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRenderer")
            .field("settings", &self.settings)
            .field("has_font", &self.font.is_some())
            .field("locale", &self.locale)
            .finish()
    }
}

impl ChartRenderer {
    /// Renderer drawing PNG text with the bundled DejaVu Sans
    pub fn new(settings: ChartSettings, locale: &str) -> Self {
        Self {
            settings,
            font: shared_bundled_font(),
            locale: locale.to_string(),
        }
    }

    /// Drop the font, PNG output then carries geometry only
    pub fn without_font(mut self) -> Self {
        self.font = None;
        self
    }

    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(Arc::new(font));
        self
    }

    /// Build from the loaded configuration. A configured font file replaces the bundled one.
    pub fn from_config(config: &Config) -> BoardResult<Self> {
        config.chart.validate()?;
        let renderer = Self::new(config.chart.clone(), &config.locale);
        match &config.font_path {
            Some(path) => {
                let font = load_font(path)?;
                info!("Loaded chart font from {}", path.display());
                Ok(renderer.with_font(font))
            }
            None => Ok(renderer),
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Chart geometry only, no drawing
    pub fn layout(&self, weekday: Weekday, day: &DaySchedule, title: Option<&str>) -> ChartLayout {
        let weekday_name = weekday.display_name(&self.locale);
        ChartLayout::build(&weekday_name, weekday, day, title, self.settings.x_view())
    }

    pub fn scene(&self, weekday: Weekday, day: &DaySchedule, title: Option<&str>) -> Scene {
        Scene::from_layout(&self.layout(weekday, day, title), &self.settings)
    }

    pub fn render_svg(&self, weekday: Weekday, day: &DaySchedule, title: Option<&str>) -> String {
        self.scene(weekday, day, title).to_svg()
    }

    /// Full render: layout, scene and PNG bytes
    #[instrument(skip(self, day), fields(persons = day.len()))]
    pub fn render(
        &self,
        weekday: Weekday,
        day: &DaySchedule,
        title: Option<&str>,
    ) -> BoardResult<RenderedChart> {
        let layout = self.layout(weekday, day, title);
        let scene = Scene::from_layout(&layout, &self.settings);
        let png = rasterize(&scene, self.font.as_deref())?;
        let file_name = layout.file_name.clone();

        info!("Rendered chart {}", file_name);
        Ok(RenderedChart {
            layout,
            scene,
            png,
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::timetable::scene::Primitive;
    use crate::components::work_schedule::models::Shift;

    fn small_settings() -> ChartSettings {
        ChartSettings {
            width: 360,
            height: 260,
            ..ChartSettings::default()
        }
    }

    #[test]
    fn test_render_names_file_after_title() {
        let renderer = ChartRenderer::new(small_settings(), "en");
        let mut day = DaySchedule::default();
        day.add_shift("Alice", Shift::new(8.0, 12.0));

        let chart = renderer.render(Weekday::Wednesday, &day, None).unwrap();
        assert_eq!(chart.file_name, "Wednesday.png");
        assert_eq!(&chart.png[1..4], b"PNG");

        let titled = renderer.render(Weekday::Wednesday, &day, Some("Kiosk")).unwrap();
        assert_eq!(titled.file_name, "Kiosk - Wednesday.png");
    }

    #[test]
    fn test_localized_weekday_in_title() {
        let renderer = ChartRenderer::new(small_settings(), "fr");
        let layout = renderer.layout(Weekday::Thursday, &DaySchedule::default(), Some("Kiosque"));
        assert_eq!(layout.title, "Kiosque - Jeudi");
    }

    #[test]
    fn test_from_config_uses_bundled_font() {
        let renderer = ChartRenderer::from_config(&Config::default()).unwrap();
        assert!(renderer.has_font());
        assert_eq!(renderer.locale(), "en");
        assert!(!renderer.without_font().has_font());
    }

    #[test]
    fn test_default_png_carries_text() {
        let config = Config {
            chart: small_settings(),
            ..Config::default()
        };
        let renderer = ChartRenderer::from_config(&config).unwrap();
        let mut day = DaySchedule::default();
        day.add_shift("Alice", Shift::new(8.0, 12.0));
        day.add_shift("Bob", Shift::new(9.0, 17.0));

        let chart = renderer.render(Weekday::Monday, &day, None).unwrap();
        let mut geometry = chart.scene.clone();
        geometry
            .primitives
            .retain(|p| !matches!(p, Primitive::Text { .. }));
        let geometry_png = rasterize(&geometry, None).unwrap();
        assert_ne!(chart.png, geometry_png);

        let plain = renderer.clone().without_font();
        assert_eq!(plain.render(Weekday::Monday, &day, None).unwrap().png, geometry_png);
    }

    #[test]
    fn test_from_config_with_missing_font_fails() {
        let config = Config {
            font_path: Some("/nonexistent/chart.ttf".into()),
            ..Config::default()
        };
        assert!(ChartRenderer::from_config(&config).is_err());
    }
}
