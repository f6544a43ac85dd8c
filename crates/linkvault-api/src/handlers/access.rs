//! Share link issuance and public redemption handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use linkvault_core::error::AppError;

use crate::dto::request::CreateLinkRequest;
use crate::dto::response::{CreateLinkResponse, LinkDetailsResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Message for absent or empty body fields.
const MISSING_FIELDS: &str = "Missing file_id or wrapped_key";

/// POST /access/link/create
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::validation(format!("Malformed request body: {}", rejection.body_text()))
    })?;
    req.validate()
        .map_err(|_| AppError::validation(MISSING_FIELDS))?;

    let file_id = req.file_id.unwrap_or_default();
    let wrapped_key = req.wrapped_key.unwrap_or_default();

    let share_id = state
        .issuance_service
        .issue(auth.context(), &file_id, &wrapped_key)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateLinkResponse { share_id })))
}

/// GET /access/link/details/{share_id}
pub async fn link_details(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let data = state.redemption_service.redeem(&share_id).await?;
    Ok(Json(data.into()))
}
