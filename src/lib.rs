// ============================================================================
// SESSION-AUTHENTICATED SOCIAL FEED SERVICE
// ============================================================================

// - User sign-up/log-in with bcrypt password hashing
// - Cookie-based server-side sessions
// - Posts, idempotent likes, append-only comments
// - Bidirectional follow graph
// - Profile picture uploads

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod session;
pub mod states;
pub mod store;

pub use states::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router over a fully constructed [`AppState`].
///
/// Kept separate from `main` so integration tests can drive the exact same
/// routing table without binding a socket.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(state.config.upload_dir.clone());

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(routes::health::health_check))
        .route(
            "/sign-up",
            get(routes::auth::sign_up_page).post(routes::auth::sign_up),
        )
        .route("/log-in", post(routes::auth::log_in))
        .route("/log-out", get(routes::auth::log_out))
        .route("/", get(routes::feed::home))
        .route("/visit-as-guest", post(routes::feed::visit_as_guest))
        .route("/profile/{id}", get(routes::social::profile_by_id))
        .route("/list-of-users", get(routes::social::list_users))
        // Protected routes (session required)
        .route("/send-post", post(routes::feed::send_post))
        .route("/like-post/{post_id}", post(routes::feed::like_post))
        .route("/add-comment/{id}", post(routes::feed::add_comment))
        .route("/upload-profile-pic", post(routes::uploads::upload_profile_pic))
        .route("/profile", get(routes::social::profile))
        .route("/follow/{id}", post(routes::social::follow_user))
        // Uploaded profile pictures are served straight from disk
        .nest_service("/uploads", uploads)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
}
