//! HTTP front end: every browser gets its own board, identified by a cookie.

pub mod handlers;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::components::timetable::ChartRenderer;
use crate::config::Config;
use handlers::{
    add_shift_handler, chart_json_handler, chart_png_handler, chart_svg_handler, health_handler,
    index_handler, remove_person_handler, summary_handler,
};
pub use session::{SessionRegistry, SESSION_COOKIE};

#[derive(Clone)]
pub struct AppState {
    /// Boards of all connected browsers
    pub sessions: Arc<SessionRegistry>,
    /// Shared chart renderer, font included
    pub renderer: ChartRenderer,
    /// Locale for the page and the summaries
    pub locale: String,
}

impl AppState {
    pub fn new(renderer: ChartRenderer, config: &Config) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(config.session_ttl_minutes)),
            locale: renderer.locale().to_string(),
            renderer,
        }
    }
}

/// Build the router with all board routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/shifts", post(add_shift_handler))
        .route("/shifts/remove", post(remove_person_handler))
        .route("/chart/{day}/svg", get(chart_svg_handler))
        .route("/chart/{day}/png", get(chart_png_handler))
        .route("/api/chart/{day}", get(chart_json_handler))
        .route("/summary", get(summary_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
