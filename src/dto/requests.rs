use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Validate, Deserialize)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 32, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Form body of `POST /send-post`; the text field is named `post`.
#[derive(Debug, Validate, Deserialize)]
pub struct SendPostRequest {
    #[validate(length(min = 1, max = 5000, message = "Post text is required"))]
    pub post: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}
