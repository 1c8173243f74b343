use crate::{AppState, errors::ApiError, session, store::retry_once};
use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::Redirect,
};
use chrono::Utc;
use tracing::info;

const PROFILE_PIC_FIELD: &str = "profilePic";

/// POST /upload-profile-pic
/// Multipart: file field `profilePic`
///
/// Writes the binary under the configured uploads directory and records
/// only the `/uploads/<file>` reference on the user.
pub async fn upload_profile_pic(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let user = session::require_user(&headers, &state)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        if field.name() != Some(PROFILE_PIC_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .unwrap_or("profile-pic")
            .replace(['/', '\\'], "_");
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        let filename = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
        let path = state.config.upload_dir.join(&filename);

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        let reference = format!("/uploads/{filename}");
        retry_once(|| state.store.set_profile_pic(user.id, reference.clone()))?;

        info!("Profile picture stored for user {}: {}", user.id, reference);

        return Ok(Redirect::to("/profile"));
    }

    Err(ApiError::Validation(format!(
        "multipart file field `{PROFILE_PIC_FIELD}` is required"
    )))
}
