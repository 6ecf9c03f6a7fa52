//! Platform-admin review surface. These routes use the same stores and the
//! same application transition table as the venue-facing routes; the only
//! difference is the `PlatformAdmin` gate and cross-venue visibility.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::handlers::review_application;
use crate::applications::store as application_store;
use crate::applications::workflow::ApplicationStatus;
use crate::auth::PlatformAdmin;
use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::opportunity::OpportunityRow;
use crate::opportunities::status::OpportunityStatus;
use crate::opportunities::store as opportunity_store;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

/// GET /api/admin/opportunities
pub async fn handle_list_opportunities(
    State(state): State<AppState>,
    PlatformAdmin(_admin): PlatformAdmin,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<OpportunityRow>>, AppError> {
    if let Some(ref raw) = filter.status {
        if OpportunityStatus::parse(raw).is_none() {
            return Err(AppError::Validation(format!("Unknown status '{raw}'")));
        }
    }
    let rows = opportunity_store::list_all(&state.db, filter.status.as_deref()).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// PUT /api/admin/opportunities/:id/status
pub async fn handle_set_opportunity_status(
    State(state): State<AppState>,
    PlatformAdmin(admin): PlatformAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<OpportunityRow>, AppError> {
    let status = OpportunityStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    let existing = opportunity_store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;

    let updated = opportunity_store::set_status(&state.db, id, status.as_str()).await?;
    tracing::info!(
        "Opportunity {} status {} -> {} by platform admin {}",
        id,
        existing.status,
        updated.status,
        admin.email
    );
    Ok(Json(updated))
}

/// GET /api/admin/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    PlatformAdmin(_admin): PlatformAdmin,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    if let Some(ref raw) = filter.status {
        if ApplicationStatus::parse(raw).is_none() {
            return Err(AppError::Validation(format!("Unknown status '{raw}'")));
        }
    }
    let rows = application_store::list_all(&state.db, filter.status.as_deref()).await?;
    Ok(Json(rows))
}

/// PUT /api/admin/applications/:id/status
/// Same transition table and approval side effects as the venue route; the
/// platform admin passes the venue check by role.
pub async fn handle_set_application_status(
    State(state): State<AppState>,
    PlatformAdmin(admin): PlatformAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let updated = review_application(&state, &admin, id, &req.status).await?;
    Ok(Json(updated))
}
