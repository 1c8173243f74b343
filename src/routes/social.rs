use crate::{
    AppState,
    dto::{PostView, ProfileResponse, UserResponse},
    errors::ApiError,
    session,
    store::retry_once,
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use tracing::info;
use uuid::Uuid;

fn profile_view(state: &AppState, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
    let user = state.store.user(user_id).ok_or(ApiError::NotFound("User"))?;
    let followers = state.store.followers(user_id)?;
    let following = state.store.following(user_id)?;
    let posts = state
        .store
        .posts_by_author(user_id)
        .iter()
        .map(|post| PostView::resolve(post, &state.store))
        .collect();

    Ok(ProfileResponse {
        user: user.into(),
        followers: followers.into_iter().map(UserResponse::from).collect(),
        following: following.into_iter().map(UserResponse::from).collect(),
        posts,
    })
}

/// GET /profile — the logged-in user's own profile.
pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = session::require_user(&headers, &state)?;
    Ok(Json(profile_view(&state, user.id)?))
}

/// GET /profile/{id} — anyone's profile, no session needed.
pub async fn profile_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(profile_view(&state, user_id)?))
}

/// GET /list-of-users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    Json(
        state
            .store
            .list_users()
            .into_iter()
            .map(UserResponse::from)
            .collect(),
    )
}

/// POST /follow/{id}
pub async fn follow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(target_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = session::require_user(&headers, &state)?;

    retry_once(|| state.store.follow(user.id, target_id))?;

    info!("User {} now follows {}", user.id, target_id);

    Ok(Json(serde_json::json!({
      "message": "Followed successfully"
    })))
}
