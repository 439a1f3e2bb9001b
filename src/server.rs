//! HTTP server and routes.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Static segments win over `{path}` in axum's matcher, so the progress
    // routes are never treated as book paths.
    let book_routes = Router::new()
        .route("/", get(handlers::list_books))
        .route("/progress", get(handlers::list_progress))
        .route("/progress/save", post(handlers::save_progress))
        .route("/progress/{book_path}", get(handlers::get_progress))
        .route("/{path}", get(handlers::get_book));

    let api = Router::new().nest("/books", book_routes);

    let app = match state.config.server.mount_path() {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
