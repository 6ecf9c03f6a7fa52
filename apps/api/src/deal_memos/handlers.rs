use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::store as application_store;
use crate::applications::workflow::ApplicationStatus;
use crate::auth::authz::{can_manage_venue, ensure_can_manage_venue};
use crate::auth::CurrentUser;
use crate::deal_memos::{generate_for_application, get_venue};
use crate::errors::AppError;
use crate::models::deal_memo::DealMemoRow;
use crate::opportunities::store as opportunity_store;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateDealMemoRequest {
    pub application_id: Uuid,
}

/// POST /api/deal-memos
/// Venue-admin regeneration of a memo for an already-committed application.
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Json(req): Json<CreateDealMemoRequest>,
) -> Result<(StatusCode, Json<DealMemoRow>), AppError> {
    let application = application_store::get(&state.db, req.application_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Application {} not found", req.application_id))
        })?;

    let opportunity = opportunity_store::get(&state.db, application.opportunity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Opportunity {} not found",
                application.opportunity_id
            ))
        })?;

    ensure_can_manage_venue(&state.db, &profile, opportunity.venue_id).await?;

    let status = ApplicationStatus::parse(&application.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Application {} has unrecognized status '{}'",
            application.id,
            application.status
        ))
    })?;
    if !status.is_committed() {
        return Err(AppError::Conflict(
            "Deal memos are only generated for approved applications".to_string(),
        ));
    }

    let venue = get_venue(&state, opportunity.venue_id).await?;
    let memo = generate_for_application(&state, &application, &opportunity, &venue).await?;
    Ok((StatusCode::CREATED, Json(memo)))
}

/// GET /api/deal-memos/:id
/// Visible to the artist on the memo and to admins of its venue.
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DealMemoRow>, AppError> {
    let memo: Option<DealMemoRow> = sqlx::query_as("SELECT * FROM deal_memos WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let memo = memo.ok_or_else(|| AppError::NotFound(format!("Deal memo {id} not found")))?;

    if memo.artist_id != profile.id && !can_manage_venue(&state.db, &profile, memo.venue_id).await?
    {
        return Err(AppError::Forbidden);
    }

    Ok(Json(memo))
}
