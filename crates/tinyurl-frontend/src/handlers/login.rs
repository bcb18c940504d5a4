use crate::session::SESSION_COOKIE;
use crate::state::FrontendState;
use crate::views;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Name of the signed-in user, attached to requests that passed
/// [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

pub async fn login_form_handler() -> Html<String> {
    Html(views::login_page(false))
}

pub async fn login_handler(
    State(state): State<FrontendState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state
        .authenticator()
        .authenticate(&form.username, &form.password)
    {
        warn!(username = %form.username, "rejected login");
        return Html(views::invalid_credentials_fragment()).into_response();
    }

    let token = state.sessions().create(&form.username);
    info!(username = %form.username, "user signed in");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), Redirect::to("/")).into_response()
}

pub async fn logout_handler(State(state): State<FrontendState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions().revoke(cookie.value());
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to("/login")).into_response()
}

/// Lets the request through only with a live session cookie; everything
/// else is sent to the login page.
pub async fn require_session(
    State(state): State<FrontendState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let username = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions().validate(cookie.value()));

    match username {
        Some(username) => {
            request.extensions_mut().insert(CurrentUser(username));
            next.run(request).await
        }
        None => {
            debug!(path = %request.uri().path(), "no session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
