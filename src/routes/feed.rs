use crate::{
    AppState,
    dto::{AddCommentRequest, FeedResponse, LikeResponse, PostView, SendPostRequest, ViewerView},
    errors::ApiError,
    session,
    store::retry_once,
};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::HeaderMap,
    response::Redirect,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

fn feed_view(state: &AppState, viewer: Option<ViewerView>) -> FeedResponse {
    let posts = state
        .store
        .list_posts()
        .iter()
        .map(|post| PostView::resolve(post, &state.store))
        .collect();

    FeedResponse { viewer, posts }
}

/// GET /
///
/// All posts in insertion order, authors and comment authors resolved.
/// Readable without a session.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Json<FeedResponse> {
    let viewer = session::current_user(&headers, &state).map(|u| ViewerView::for_user(&u));
    Json(feed_view(&state, viewer))
}

/// POST /visit-as-guest
///
/// The same feed, rendered for a read-only guest identity.
pub async fn visit_as_guest(State(state): State<AppState>) -> Json<FeedResponse> {
    Json(feed_view(&state, Some(ViewerView::guest())))
}

/// POST /send-post
/// Form: post
pub async fn send_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<SendPostRequest>,
) -> Result<Redirect, ApiError> {
    let user = session::require_user(&headers, &state)?;

    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let post = retry_once(|| state.store.create_post(user.id, payload.post.clone()))?;

    info!("Post created: {} by user {}", post.id, user.id);

    Ok(Redirect::to("/"))
}

/// POST /like-post/{post_id}
/// Response: JSON { alreadyLiked, message?, post? }
pub async fn like_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    let user = session::require_user(&headers, &state)?;

    let outcome = retry_once(|| state.store.like_post(post_id, user.id))?;

    if outcome.already_liked {
        return Ok(Json(LikeResponse {
            already_liked: true,
            message: None,
            post: None,
        }));
    }

    info!("Post liked: {} by user {}", post_id, user.id);

    Ok(Json(LikeResponse {
        already_liked: false,
        message: Some("Post liked successfully".to_string()),
        post: Some(PostView::resolve(&outcome.post, &state.store)),
    }))
}

/// POST /add-comment/{id}
/// Form: text
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<Uuid>,
    Form(payload): Form<AddCommentRequest>,
) -> Result<Redirect, ApiError> {
    let user = session::require_user(&headers, &state)?;

    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    retry_once(|| state.store.add_comment(post_id, user.id, payload.text.clone()))?;

    info!("Comment added to post {} by user {}", post_id, user.id);

    Ok(Redirect::to("/"))
}
