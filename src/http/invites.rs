//! Invitation endpoint: create an account and email a signed link.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::AppState;
use crate::auth::invitation_url;
use crate::error::{ApiError, ApiResult};
use crate::mail::invitation_email;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub email: String,
}

/// `POST /send-email`
///
/// Creates a demo account for the email (no usable password), signs an
/// invitation token, and dispatches the invitation email synchronously.
/// The three steps are independent: a mail failure returns 500 but leaves
/// the account in place, and a retry then reports the conflict.
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if request.email.is_empty() {
        return Err(ApiError::missing_field("email"));
    }

    // Atomic insert-if-absent: the UNIQUE constraint decides, not a
    // lookup, so a racing duplicate request cannot create a second row.
    let user = state
        .db
        .create_invited_user(&request.email)?
        .ok_or_else(|| ApiError::email_taken(&request.email))?;

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| ApiError::internal(e))?;
    let url = invitation_url(&state.public_host, &token);

    state
        .mailer
        .send(invitation_email(&user.email, &url))
        .await
        .map_err(|e| ApiError::mail(e))?;

    info!(user_id = user.id, email = %user.email, "invitation sent");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Email will be sent shortly." })),
    ))
}
