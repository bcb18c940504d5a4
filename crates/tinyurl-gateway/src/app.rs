use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    bindings_handler, create_link_handler, get_url_handler, health_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/create", post(create_link_handler))
            .route("/get_bindings", get(bindings_handler))
            .route("/get_url/{short_hash}", get(get_url_handler))
            .route("/{short_hash}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
