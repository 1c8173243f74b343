use crate::{
    AppState,
    dto::{LoginRequest, SignupRequest},
    errors::ApiError,
    session,
    store::retry_once,
};
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect},
};
use bcrypt::{DEFAULT_COST, hash};
use tracing::info;
use validator::Validate;

const SIGN_UP_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Sign up</title></head>
  <body>
    <h1>Sign up</h1>
    <form action="/sign-up" method="post">
      <label>Username <input type="text" name="username" required></label>
      <label>Password <input type="password" name="password" required></label>
      <button type="submit">Sign up</button>
    </form>
  </body>
</html>
"#;

/// GET /sign-up
pub async fn sign_up_page() -> Html<&'static str> {
    Html(SIGN_UP_PAGE)
}

/// POST /sign-up
/// Form: username, password
///
/// Creates the user without logging them in.
pub async fn sign_up(
    State(state): State<AppState>,
    Form(payload): Form<SignupRequest>,
) -> Result<Redirect, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::Store(format!("password hashing failed: {e}")))?;

    let user = retry_once(|| state.store.create_user(&payload.username, password_hash.clone()))?;

    info!("New user registered: {}", user.username);

    Ok(Redirect::to("/"))
}

/// POST /log-in
/// Form: username, password
///
/// On success, establishes a session and sends its cookie with a redirect
/// to the feed. Failures never say whether the username exists.
pub async fn log_in(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .login_limiter
        .check_key(&payload.username)
        .map_err(|_| ApiError::RateLimited)?;

    let user = state
        .store
        .verify_credentials(&payload.username, &payload.password)?
        .ok_or(ApiError::InvalidCredentials)?;

    let session_id = state.sessions.create(user.id);

    info!("User logged in: {}", user.username);

    Ok((
        [(header::SET_COOKIE, session::session_cookie(session_id))],
        Redirect::to("/"),
    ))
}

/// GET /log-out
///
/// Destroys the session if one exists; the cookie is cleared on every path.
pub async fn log_out(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(session_id) = session::session_id_from_headers(&headers) {
        state.sessions.destroy(session_id);
    }

    (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/"),
    )
}
