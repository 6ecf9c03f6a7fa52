use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::authz::ensure_can_manage_venue;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::opportunity::{OpportunityRow, PublicOpportunityRow};
use crate::models::venue::VenueRow;
use crate::opportunities::status::{is_valid_opportunity_type, OpportunityStatus};
use crate::opportunities::store::{self, BrowseFilters, NewOpportunity, OpportunityChanges};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BrowseQuery {
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub opportunity_type: Option<String>,
    pub city: Option<String>,
}

/// GET /api/opportunities
pub async fn handle_browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> Result<Json<Vec<PublicOpportunityRow>>, AppError> {
    let filters = BrowseFilters {
        genre: params.genre,
        opportunity_type: params.opportunity_type,
        city: params.city,
    };
    let listings = store::list_public(&state.db, &filters).await?;
    Ok(Json(listings))
}

#[derive(Serialize)]
pub struct OpportunityDetailResponse {
    pub opportunity: OpportunityRow,
    pub venue: VenueRow,
}

/// GET /api/opportunities/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OpportunityDetailResponse>, AppError> {
    let opportunity = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;

    let venue: VenueRow = sqlx::query_as("SELECT * FROM venues WHERE id = $1")
        .bind(opportunity.venue_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(OpportunityDetailResponse { opportunity, venue }))
}

#[derive(Deserialize)]
pub struct CreateOpportunityRequest {
    pub venue_id: Uuid,
    pub title: String,
    pub opportunity_type: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub description: Option<String>,
    pub compensation: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub status: Option<String>,
}

/// POST /api/opportunities
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Json(req): Json<CreateOpportunityRequest>,
) -> Result<(StatusCode, Json<OpportunityRow>), AppError> {
    ensure_can_manage_venue(&state.db, &profile, req.venue_id).await?;

    validate_listing(
        &req.opportunity_type,
        req.event_date,
        req.application_deadline,
    )
    .map_err(AppError::Validation)?;

    // New listings start as drafts unless explicitly published.
    let status = match req.status.as_deref() {
        None => OpportunityStatus::Draft,
        Some(raw) => match OpportunityStatus::parse(raw) {
            Some(s @ (OpportunityStatus::Draft | OpportunityStatus::Open)) => s,
            Some(_) => {
                return Err(AppError::Validation(
                    "New opportunities must start as draft or open".to_string(),
                ))
            }
            None => return Err(AppError::Validation(format!("Unknown status '{raw}'"))),
        },
    };

    let created = store::insert(
        &state.db,
        NewOpportunity {
            venue_id: req.venue_id,
            title: &req.title,
            opportunity_type: &req.opportunity_type,
            event_date: req.event_date,
            event_time: req.event_time.as_deref(),
            genres: &req.genres,
            description: req.description.as_deref(),
            compensation: req.compensation.as_deref(),
            application_deadline: req.application_deadline,
            status: status.as_str(),
            created_by: profile.id,
        },
    )
    .await?;

    tracing::info!(
        "Opportunity {} created for venue {} by {}",
        created.id,
        created.venue_id,
        profile.email
    );

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct UpdateOpportunityRequest {
    pub title: Option<String>,
    pub opportunity_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub genres: Option<Vec<String>>,
    pub description: Option<String>,
    pub compensation: Option<String>,
    pub application_deadline: Option<NaiveDate>,
}

/// PUT /api/opportunities/:id
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOpportunityRequest>,
) -> Result<Json<OpportunityRow>, AppError> {
    let existing = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
    ensure_can_manage_venue(&state.db, &profile, existing.venue_id).await?;

    if let Some(ref t) = req.opportunity_type {
        if !is_valid_opportunity_type(t) {
            return Err(AppError::Validation(format!(
                "Unknown opportunity type '{t}'"
            )));
        }
    }
    let event_date = req.event_date.unwrap_or(existing.event_date);
    let deadline = req.application_deadline.or(existing.application_deadline);
    if let Some(d) = deadline {
        if d > event_date {
            return Err(AppError::Validation(
                "Application deadline must not be after the event date".to_string(),
            ));
        }
    }

    let changes = OpportunityChanges {
        title: req.title,
        opportunity_type: req.opportunity_type,
        event_date: req.event_date,
        event_time: req.event_time,
        genres: req.genres,
        description: req.description,
        compensation: req.compensation,
        application_deadline: req.application_deadline,
    };
    let updated = store::update(&state.db, id, &changes).await?;
    Ok(Json(updated))
}

/// DELETE /api/opportunities/:id
/// Refused once any application has been approved or confirmed.
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let existing = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
    ensure_can_manage_venue(&state.db, &profile, existing.venue_id).await?;

    let committed = store::committed_application_count(&state.db, id).await?;
    if committed > 0 {
        return Err(AppError::Conflict(
            "Opportunity has approved or confirmed applications and cannot be deleted".to_string(),
        ));
    }

    store::delete(&state.db, id).await?;
    tracing::info!("Opportunity {id} deleted by {}", profile.email);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// PUT /api/opportunities/:id/status
pub async fn handle_set_status(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<OpportunityRow>, AppError> {
    let status = OpportunityStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    let existing = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
    ensure_can_manage_venue(&state.db, &profile, existing.venue_id).await?;

    let updated = store::set_status(&state.db, id, status.as_str()).await?;
    tracing::info!(
        "Opportunity {} status {} -> {} by {}",
        id,
        existing.status,
        updated.status,
        profile.email
    );
    Ok(Json(updated))
}

/// Field checks shared by create and update. Returns the first problem found.
fn validate_listing(
    opportunity_type: &str,
    event_date: NaiveDate,
    application_deadline: Option<NaiveDate>,
) -> Result<(), String> {
    if !is_valid_opportunity_type(opportunity_type) {
        return Err(format!("Unknown opportunity type '{opportunity_type}'"));
    }
    if let Some(deadline) = application_deadline {
        if deadline > event_date {
            return Err("Application deadline must not be after the event date".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_listing_accepts_known_type() {
        assert!(validate_listing("Headliner", date("2026-09-01"), None).is_ok());
    }

    #[test]
    fn test_validate_listing_rejects_unknown_type() {
        let err = validate_listing("DJ Set", date("2026-09-01"), None).unwrap_err();
        assert!(err.contains("DJ Set"));
    }

    #[test]
    fn test_validate_listing_rejects_deadline_after_event() {
        assert!(validate_listing(
            "Supporting",
            date("2026-09-01"),
            Some(date("2026-09-02"))
        )
        .is_err());
    }

    #[test]
    fn test_validate_listing_allows_deadline_on_event_day() {
        assert!(validate_listing(
            "Supporting",
            date("2026-09-01"),
            Some(date("2026-09-01"))
        )
        .is_ok());
    }
}
