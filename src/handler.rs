//! HTTP request handlers for the UTM builder API
//!
//! The handlers are a thin boundary over the pure core: validation and URL
//! building never touch the store, and only a validated submission writes
//! a history entry.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::database::AppState;
use crate::history;
use crate::model::{CampaignFields, UtmResult};
use crate::utm;

fn storage_failure(err: history::HistoryError) -> axum::response::Response {
    tracing::error!(error = %err, "history storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to access URL history",
            "code": "storage_error"
        })),
    )
        .into_response()
}

/// Generates a UTM URL and commits it to history
///
/// This handler:
/// 1. Validates the submitted campaign fields
/// 2. Rejects the submission with the full error map if anything fails
/// 3. Builds the tagged URL and stamps the result with the current time
/// 4. Prepends the result to the stored history (newest first)
///
/// # Request Body
///
/// ```json
/// {
///   "websiteUrl": "www.example.com",
///   "campaignSource": "google",
///   "campaignMedium": "cpc",
///   "campaignName": "spring_sale"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the stored `UtmResult`
/// - **422 Unprocessable Entity** - `{"errors": {...}}` with every failing rule
/// - **500 Internal Server Error** - history could not be written
pub async fn generate_url(
    State(state): State<AppState>,
    Json(fields): Json<CampaignFields>,
) -> impl IntoResponse {
    let errors = utm::validate(&fields);
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response();
    }

    // validation passed, so the build cannot hit the invalid-input path
    let utm_url = match utm::build_utm_url(&fields) {
        Ok(url) => url,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": { "websiteUrl": err.to_string() } })),
            )
                .into_response();
        }
    };

    let result = UtmResult {
        original_url: fields.website_url,
        utm_url,
        timestamp: Utc::now().timestamp_millis(),
    };

    match history::push_result(&state.db, result.clone()) {
        Ok(_) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(err) => storage_failure(err),
    }
}

/// Live preview for the form's per-keystroke calls
///
/// Always responds 200 with the full error map and, when enough of the
/// form is filled in and the destination parses, the URL as it would be
/// generated. Nothing is persisted.
///
/// # Response
///
/// ```json
/// { "errors": { "campaignMedium": "Campaign Medium is required" },
///   "preview": "https://www.example.com/?utm_source=google" }
/// ```
pub async fn preview_url(Json(fields): Json<CampaignFields>) -> impl IntoResponse {
    let errors = utm::validate(&fields);
    let preview = utm::preview_url(&fields);
    Json(json!({ "errors": errors, "preview": preview }))
}

/// Validation only, for clients that render messages without a preview
pub async fn validate_fields(Json(fields): Json<CampaignFields>) -> impl IntoResponse {
    Json(json!({ "errors": utm::validate(&fields) }))
}

/// Returns the stored history, newest first
///
/// # Response
///
/// ```json
/// { "count": 2, "data": [ { "originalUrl": "...", "utmUrl": "...", "timestamp": 1700000000000 }, ... ] }
/// ```
pub async fn list_history(State(state): State<AppState>) -> impl IntoResponse {
    match history::load_history(&state.db) {
        Ok(results) => Json(json!({
            "count": results.len(),
            "data": results
        }))
        .into_response(),
        Err(err) => storage_failure(err),
    }
}

/// Empties the stored history
pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    match history::clear_history(&state.db) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "History cleared" })),
        )
            .into_response(),
        Err(err) => storage_failure(err),
    }
}

/// Query parameters for the reachability probe
#[derive(Deserialize)]
pub struct ProbeParams {
    /// The generated URL to report on
    pub url: String,
}

/// Advisory reachability report for a generated URL
///
/// The probe never gates generation and ignores transport outcomes: a
/// syntactically valid URL always reports reachable.
///
/// # Example Request
///
/// `GET /api/probe?url=https://www.example.com/?utm_source=google`
pub async fn probe_url(Query(params): Query<ProbeParams>) -> impl IntoResponse {
    let reachable = utm::probe_reachability(&params.url);
    Json(json!({
        "url": params.url,
        "reachable": reachable
    }))
}
