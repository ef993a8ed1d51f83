use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::session::SESSION_COOKIE;
use super::AppState;
use crate::components::timetable::{xml_escape, ChartLayout, Scene};
use crate::components::work_schedule::{DaySelector, Weekday};
use crate::error::{input_error, Error};
use crate::utils::parse_clock;

const MAX_COOKIE_MINUTES: i64 = 365 * 24 * 60;

/// Error returned by handlers. Bad input maps to 400, everything else to 500.
#[derive(Debug)]
pub struct WebError(Error);

impl From<Error> for WebError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Input(message) => {
                warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            other => {
                error!("Request failed: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}

/// Form for adding a shift
#[derive(Debug, Deserialize)]
pub struct ShiftForm {
    pub name: String,
    pub start: String,
    pub end: String,
    pub day: String,
}

/// Form for removing a person
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub name: String,
    pub day: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub day: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub title: Option<String>,
}

impl ChartQuery {
    fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ChartView<'a> {
    pub layout: &'a ChartLayout,
    pub scene: &'a Scene,
}

/// Read the session id from the cookie, issuing a fresh one when missing or malformed
fn session_id(jar: CookieJar, state: &AppState) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        return (jar, id);
    }

    let id = Uuid::new_v4();
    // Capped at a year
    let minutes = state.sessions.ttl().num_minutes().min(MAX_COOKIE_MINUTES);
    let max_age = time::Duration::minutes(minutes);
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age);
    (jar.add(cookie), id)
}

/// Weekday from a chart path. The whole week has no chart of its own.
fn parse_weekday(day: &str) -> Result<Weekday, WebError> {
    day.parse::<Weekday>()
        .map_err(|_| WebError(input_error(&format!("Unknown weekday in path: {}", day))))
}

/// Value for `Content-Disposition`, with an ASCII fallback and the exact UTF-8 name
fn attachment_header(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

/// Fill `{{KEY}}` markers in one pass. Inserted values are never scanned again,
/// and unknown markers are left as they are.
fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let value = after.find("}}").and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn weekday_options(locale: &str, selected: Option<Weekday>) -> String {
    Weekday::ALL
        .iter()
        .map(|day| {
            format!(
                "                        <option value=\"{}\"{}>{}</option>",
                day.as_str().to_lowercase(),
                if Some(*day) == selected { " selected" } else { "" },
                xml_escape(&day.display_name(locale))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options for the add and remove forms, with the whole week preselected
fn selector_options(locale: &str) -> String {
    let mut options = weekday_options(locale, None);
    options.push_str(&format!(
        "\n                        <option value=\"all\" selected>{}</option>",
        xml_escape(&t!("day_all", locale = locale))
    ));
    options
}

fn chart_query(title: Option<&str>) -> String {
    match title {
        Some(title) => format!("?title={}", urlencoding::encode(title)),
        None => String::new(),
    }
}

/// Handler for the board page
pub async fn index_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BoardQuery>,
) -> impl IntoResponse {
    let (jar, id) = session_id(jar, &state);
    let locale = state.locale.as_str();

    let day = match query.day.as_deref().map(str::parse::<Weekday>) {
        Some(Ok(day)) => day,
        Some(Err(_)) | None => Weekday::Monday,
    };
    let title = ChartQuery { title: query.title }.title().map(str::to_string);

    let summary = state.sessions.snapshot(id).await.summary(locale);
    let day_path = day.as_str().to_lowercase();
    let query_string = chart_query(title.as_deref());

    let text = |key: &str| t!(key, locale = locale).to_string();
    let values = [
        ("LANG", locale.to_string()),
        ("PAGE_TITLE", xml_escape(&text("board_title"))),
        ("ADD_HEADING", text("board_add_heading")),
        ("REMOVE_HEADING", text("board_remove_heading")),
        ("NAME_LABEL", text("board_name_label")),
        ("START_LABEL", text("board_start_label")),
        ("END_LABEL", text("board_end_label")),
        ("DAY_LABEL", text("board_day_label")),
        ("ADD_BUTTON", text("board_add_button")),
        ("REMOVE_BUTTON", text("board_remove_button")),
        ("CHART_HEADING", text("board_chart_heading")),
        ("CHART_TITLE_LABEL", text("board_chart_title_label")),
        ("SHOW_BUTTON", text("board_show_button")),
        ("DOWNLOAD_BUTTON", text("board_download_button")),
        ("SUMMARY_HEADING", text("board_summary_heading")),
        ("SELECTOR_OPTIONS", selector_options(locale)),
        ("DAY_OPTIONS", weekday_options(locale, Some(day))),
        ("TITLE_VALUE", xml_escape(title.as_deref().unwrap_or(""))),
        ("CHART_SRC", format!("/chart/{}/svg{}", day_path, query_string)),
        ("DOWNLOAD_HREF", format!("/chart/{}/png{}", day_path, query_string)),
        ("CHART_ALT", xml_escape(&day.display_name(locale))),
        ("SUMMARY", xml_escape(&summary)),
    ];
    let html = render_template(include_str!("../../assets/board/index.html"), &values);

    (jar, Html(html))
}

/// Handler for the add-shift form
pub async fn add_shift_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ShiftForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let selector: DaySelector = form.day.parse()?;
    let start = parse_clock(&form.start)?;
    let end = parse_clock(&form.end)?;
    let name = form.name.trim().to_string();

    let (jar, id) = session_id(jar, &state);
    state
        .sessions
        .update(id, |session| session.add_shift(selector, &name, start, end))
        .await;

    Ok((jar, Redirect::to("/")))
}

/// Handler for the remove-person form
pub async fn remove_person_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RemoveForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let selector: DaySelector = form.day.parse()?;
    let name = form.name.trim().to_string();

    let (jar, id) = session_id(jar, &state);
    state
        .sessions
        .update(id, |session| session.remove_person(selector, &name))
        .await;

    Ok((jar, Redirect::to("/")))
}

/// SVG chart for one weekday
pub async fn chart_svg_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(day): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, WebError> {
    let weekday = parse_weekday(&day)?;
    let (jar, id) = session_id(jar, &state);
    let session = state.sessions.snapshot(id).await;

    let svg = state
        .renderer
        .render_svg(weekday, session.day(weekday), query.title());

    Ok((jar, [(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// PNG chart for one weekday, served as a download
pub async fn chart_png_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(day): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, WebError> {
    let weekday = parse_weekday(&day)?;
    let (jar, id) = session_id(jar, &state);
    let session = state.sessions.snapshot(id).await;

    let renderer = state.renderer.clone();
    let title = query.title().map(str::to_string);
    let chart = tokio::task::spawn_blocking(move || {
        session.render(weekday, title.as_deref(), &renderer)
    })
    .await
    .map_err(|e| crate::error::render_error(&format!("Render task failed: {}", e)))??;

    info!("Serving {} ({} bytes)", chart.file_name, chart.png.len());
    Ok((
        jar,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_header(&chart.file_name),
            ),
        ],
        chart.png,
    ))
}

/// Chart geometry and scene as JSON
pub async fn chart_json_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(day): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, WebError> {
    let weekday = parse_weekday(&day)?;
    let (jar, id) = session_id(jar, &state);
    let session = state.sessions.snapshot(id).await;

    let layout = state
        .renderer
        .layout(weekday, session.day(weekday), query.title());
    let scene = Scene::from_layout(&layout, state.renderer.settings());
    let body = serde_json::to_value(ChartView {
        layout: &layout,
        scene: &scene,
    })
    .map_err(Error::from)?;

    Ok((jar, Json(body)))
}

/// Plain-text summary of the week
pub async fn summary_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, id) = session_id(jar, &state);
    let summary = state.sessions.snapshot(id).await.summary(&state.locale);
    (
        jar,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        summary,
    )
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    "OK"
}
