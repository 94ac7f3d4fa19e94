//! Feedback endpoint: append-only user responses.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::types::UserResponseInput;

/// `POST /responses`. The owner is the caller. The response echoes only the
/// client-supplied fields; server-generated id and timestamp stay out.
pub async fn create_response(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<UserResponseInput>,
) -> ApiResult<(StatusCode, Json<UserResponseInput>)> {
    let stored = state.db.create_response(user.id, &input)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponseInput {
            experience: stored.experience,
            huddle_feedback: stored.huddle_feedback,
            feature_suggestion: stored.feature_suggestion,
        }),
    ))
}
