//! # API REST
//!
//! REST API for the report simplifier.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, API-key checks)
//!
//! Uses `api-shared` for request/response types and authentication.

#![warn(rust_2018_idioms)]

use api_shared::auth::{self, API_KEY_HEADER, USER_EMAIL_HEADER};
use api_shared::{
    ErrorRes, HealthRes, HealthService, NodeRes, ParseReq, ParseRes, SectionRes, SessionRes,
    SimplifyReq, SimplifyRes, UploadedFile, ViewKind,
};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use simplifier_core::{
    gate, parse_sections, CoreConfig, ReportError, ReportFile, ReportInput, ReportSimplifier,
    SimplifiedReport, UserInfo, View,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    simplifier: Arc<dyn ReportSimplifier>,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(
        cfg: Arc<CoreConfig>,
        simplifier: Arc<dyn ReportSimplifier>,
        api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            cfg,
            simplifier,
            api_key: api_key.into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, session, parse_report, simplify_report),
    components(schemas(
        HealthRes,
        ErrorRes,
        SessionRes,
        ViewKind,
        ParseReq,
        ParseRes,
        SectionRes,
        NodeRes,
        SimplifyReq,
        SimplifyRes,
        UploadedFile,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI, CORS and request tracing.
///
/// Request bodies may be up to four times the advisory upload limit so base64-encoded files
/// over that limit still reach the handler, where the limit is only logged.
pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.cfg.max_upload_bytes().saturating_mul(4))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health))
        .route("/session", get(session))
        .route("/parse", post(parse_report))
        .route("/simplify", post(simplify_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the REST API until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Report simplifier REST API listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Runs the view gate for the request's credentials.
fn view_for(headers: &HeaderMap, state: &AppState) -> View {
    let auth = auth::authenticate(
        header(headers, API_KEY_HEADER),
        header(headers, USER_EMAIL_HEADER),
        &state.api_key,
    );
    gate(&auth)
}

fn require_user(headers: &HeaderMap, state: &AppState) -> Result<UserInfo, ApiError> {
    let auth = auth::sign_in(
        header(headers, API_KEY_HEADER),
        header(headers, USER_EMAIL_HEADER),
        &state.api_key,
    )
    .map_err(|e| api_error(StatusCode::UNAUTHORIZED, e.to_string()))?;
    match gate(&auth) {
        View::Simplifier(user) => Ok(user),
        View::Loading | View::Login => Err(api_error(StatusCode::UNAUTHORIZED, "Not signed in")),
    }
}

fn report_error(e: ReportError) -> ApiError {
    let status = match &e {
        ReportError::MissingInput
        | ReportError::UnsupportedFileType { .. }
        | ReportError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ReportError::Busy => StatusCode::CONFLICT,
        ReportError::Simplification(_) | ReportError::FileRead(_) => {
            tracing::error!("Simplify report error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    api_error(status, e.user_message())
}

fn decode_upload(file: UploadedFile, max_upload_bytes: u64) -> Result<ReportFile, ApiError> {
    let bytes = STANDARD.decode(file.content_base64.trim()).map_err(|e| {
        tracing::warn!("Invalid base64 upload {}: {}", file.name, e);
        api_error(StatusCode::BAD_REQUEST, "File content is not valid base64")
    })?;
    let report_file = ReportFile::new(file.name, bytes).map_err(report_error)?;
    report_file.warn_if_oversized(max_upload_bytes);
    Ok(report_file)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "View the front end should show", body = SessionRes)
    )
)]
/// Reports whether the caller sees the login page or the simplifier.
async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionRes> {
    Json(SessionRes::from(view_for(&headers, &state)))
}

#[utoipa::path(
    post,
    path = "/parse",
    request_body = ParseReq,
    responses(
        (status = 200, description = "Parsed sections", body = ParseRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Parses already-simplified text into sections without calling the simplifier.
async fn parse_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ParseReq>,
) -> Result<Json<ParseRes>, ApiError> {
    require_user(&headers, &state)?;
    let sections = parse_sections(&req.text);
    Ok(Json(ParseRes::from_sections(&sections)))
}

#[utoipa::path(
    post,
    path = "/simplify",
    request_body = SimplifyReq,
    responses(
        (status = 200, description = "Simplified report", body = SimplifyRes),
        (status = 400, description = "No input, bad file type or bad encoding", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 500, description = "Report could not be processed", body = ErrorRes)
    )
)]
/// Simplifies a pasted or uploaded report.
async fn simplify_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SimplifyReq>,
) -> Result<Json<SimplifyRes>, ApiError> {
    let user = require_user(&headers, &state)?;

    let file = req
        .file
        .map(|f| decode_upload(f, state.cfg.max_upload_bytes()))
        .transpose()?;
    let input = ReportInput::from_parts(req.text.as_deref(), file).map_err(report_error)?;

    tracing::info!(user = ?user.email, input = %input.describe(), "simplifying report");
    let text = state
        .simplifier
        .simplify(&input)
        .await
        .map_err(report_error)?;

    let report = SimplifiedReport::new(text);
    tracing::info!(report_id = %report.id, "report simplified");
    Ok(Json(SimplifyRes::from_report(&report)))
}
