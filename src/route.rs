//! Route definitions for the UTM builder API
//!
//! Maps the form-layer operations onto HTTP endpoints and wires in the
//! shared application state.

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{
    clear_history, generate_url, list_history, preview_url, probe_url, validate_fields,
};

/// Creates the Axum application router
///
/// # Route Definitions
///
/// - `POST /api/urls` - Validates, builds, and commits a UTM URL to history
/// - `POST /api/preview` - Per-keystroke validation plus live URL preview
/// - `POST /api/validate` - Validation errors only
/// - `GET /api/history` - Stored results, newest first
/// - `DELETE /api/history` - Clears the stored results
/// - `GET /api/probe` - Advisory reachability report for a generated URL
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use utm_builder::database::{init_db, AppState};
/// # use utm_builder::route::create_app;
/// # let db = init_db("data.db").unwrap();
/// let state = AppState { db: Arc::new(db) };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/urls", post(generate_url))
        .route("/preview", post(preview_url))
        .route("/validate", post(validate_fields))
        .route("/history", get(list_history).delete(clear_history))
        .route("/probe", get(probe_url));

    Router::new().nest("/api", api_routes).with_state(state)
}
