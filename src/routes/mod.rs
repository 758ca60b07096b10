use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

pub mod auth;
pub mod filters;
pub mod images;
pub mod ingredients;
pub mod recipes;
pub mod shopping_list;
pub mod state;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipes::list))
        .route("/recipes/suggest", post(recipes::suggest))
        .route("/recipes/:id", get(recipes::show))
        .route(
            "/recipes/:id/rating",
            get(recipes::get_rating)
                .put(recipes::rate)
                .delete(recipes::clear_rating),
        )
        .route("/recipes/:id/image", get(recipes::image))
        .route("/images/generate", post(images::generate))
        .route("/ingredients/popular", get(ingredients::popular))
        .route("/filters/options", get(filters::options))
        .route("/shopping-list", post(shopping_list::build))
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
        .route("/auth/session", get(auth::session))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
