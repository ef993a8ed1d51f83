use crate::config::Config;
use crate::error::other_error;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Bind the web server and serve until a shutdown signal arrives
#[cfg(feature = "web-interface")]
pub async fn start_server(config: Config) -> miette::Result<()> {
    use crate::components::timetable::ChartRenderer;
    use crate::error::Error;
    use crate::shutdown::wait_for_signal;
    use crate::web::{router, AppState};
    use tracing::{info, warn};

    let renderer = ChartRenderer::from_config(&config)?;
    if config.font_path.is_none() {
        info!("CHART_FONT_PATH not set, using the bundled chart font");
    }
    if !renderer.has_font() {
        warn!("No usable chart font, PNG charts will have no text");
    }

    let state = AppState::new(renderer, &config);
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(Error::from)?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}
