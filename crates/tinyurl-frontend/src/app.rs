use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, favicon_handler, index_handler, login_form_handler, login_handler,
    logout_handler, redirect_handler, require_session,
};
use crate::state::FrontendState;

pub struct App {}

impl App {
    pub fn router(state: FrontendState) -> Router {
        let protected = Router::new()
            .route("/", get(index_handler))
            .route("/create", post(create_link_handler))
            .route("/logout", post(logout_handler))
            .route("/{short_hash}", get(redirect_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ));

        Router::new()
            .route("/login", get(login_form_handler).post(login_handler))
            .route("/favicon.ico", get(favicon_handler))
            .merge(protected)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
