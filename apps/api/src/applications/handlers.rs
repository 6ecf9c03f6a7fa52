use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::store::{self, NewApplication};
use crate::applications::workflow::ApplicationStatus;
use crate::auth::authz::ensure_can_manage_venue;
use crate::auth::CurrentUser;
use crate::deal_memos;
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationWithOpportunityRow};
use crate::models::profile::ProfileRow;
use crate::opportunities::status::OpportunityStatus;
use crate::opportunities::store as opportunity_store;
use crate::relay::{send_best_effort, RelayForm};
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct ApplyRequest {
    pub message: Option<String>,
}

/// POST /api/opportunities/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(opportunity_id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let opportunity = opportunity_store::get(&state.db, opportunity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {opportunity_id} not found")))?;

    let accepting = OpportunityStatus::parse(&opportunity.status)
        .map(OpportunityStatus::accepts_applications)
        .unwrap_or(false);
    if !accepting {
        return Err(AppError::Conflict(
            "This opportunity is not accepting applications".to_string(),
        ));
    }
    if let Some(deadline) = opportunity.application_deadline {
        if chrono::Utc::now().date_naive() > deadline {
            return Err(AppError::Conflict(
                "The application deadline has passed".to_string(),
            ));
        }
    }

    let application = store::insert(
        &state.db,
        NewApplication {
            opportunity_id,
            artist_id: profile.id,
            artist_name: &profile.name,
            email: &profile.email,
            message: req.message.as_deref(),
        },
    )
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "You have already applied to this opportunity"))?;

    tracing::info!(
        "Application {} submitted by {} for opportunity {}",
        application.id,
        profile.email,
        opportunity_id
    );

    if let Ok(venue) = deal_memos::get_venue(&state, opportunity.venue_id).await {
        send_best_effort(
            state.relay.as_ref(),
            RelayForm::application_received(&profile.name, &opportunity.title, &venue.name),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/opportunities/:id/applications
pub async fn handle_list_for_opportunity(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(opportunity_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let opportunity = opportunity_store::get(&state.db, opportunity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {opportunity_id} not found")))?;
    ensure_can_manage_venue(&state.db, &profile, opportunity.venue_id).await?;

    let applications = store::list_for_opportunity(&state.db, opportunity_id).await?;
    Ok(Json(applications))
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub status: String,
}

/// PUT /api/applications/:id/status
pub async fn handle_review(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let updated = review_application(&state, &profile, id, &req.status).await?;
    Ok(Json(updated))
}

/// The review transition shared by the venue-admin and platform-admin
/// surfaces: one status vocabulary, one transition table. Approval also
/// generates the deal memo and notifies the artist.
pub async fn review_application(
    state: &AppState,
    reviewer: &ProfileRow,
    application_id: Uuid,
    raw_target: &str,
) -> Result<ApplicationRow, AppError> {
    let target = ApplicationStatus::parse(raw_target)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{raw_target}'")))?;
    if !target.is_review_target() {
        return Err(AppError::Validation(
            "Status 'confirmed' is set by the artist confirmation endpoint".to_string(),
        ));
    }

    let application = store::get(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;
    let opportunity = opportunity_store::get(&state.db, application.opportunity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Opportunity {} not found",
                application.opportunity_id
            ))
        })?;
    ensure_can_manage_venue(&state.db, reviewer, opportunity.venue_id).await?;

    let current = ApplicationStatus::parse(&application.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Application {} has unrecognized status '{}'",
            application.id,
            application.status
        ))
    })?;
    if !current.can_transition(target) {
        return Err(AppError::Conflict(format!(
            "Cannot move application from '{}' to '{}'",
            current.as_str(),
            target.as_str()
        )));
    }

    let mut updated = store::set_status(&state.db, application_id, target.as_str(), reviewer.id).await?;

    tracing::info!(
        "Application {} {} -> {} by {}",
        application_id,
        current.as_str(),
        target.as_str(),
        reviewer.email
    );

    if target == ApplicationStatus::Approved {
        let venue = deal_memos::get_venue(state, opportunity.venue_id).await?;
        let memo = deal_memos::generate_for_application(state, &updated, &opportunity, &venue).await?;
        updated.deal_memo_url = Some(memo.document_url.clone());

        send_best_effort(
            state.relay.as_ref(),
            RelayForm::application_approved(
                &updated.artist_name,
                &updated.email,
                &opportunity.title,
                &venue.name,
                &memo.document_url,
            ),
        )
        .await;
    }

    Ok(updated)
}

/// POST /api/applications/:id/confirm
/// The applicant accepts an approved offer. Application -> confirmed and
/// opportunity -> booked in one transaction.
pub async fn handle_confirm(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let application = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    if application.artist_id != profile.id {
        return Err(AppError::Forbidden);
    }

    let current = ApplicationStatus::parse(&application.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Application {} has unrecognized status '{}'",
            application.id,
            application.status
        ))
    })?;
    if current != ApplicationStatus::Approved {
        return Err(AppError::Conflict(
            "Only approved applications can be confirmed".to_string(),
        ));
    }

    let opportunity = opportunity_store::get(&state.db, application.opportunity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Opportunity {} not found",
                application.opportunity_id
            ))
        })?;

    let updated = store::confirm(&state.db, id, opportunity.id).await?;

    tracing::info!(
        "Application {} confirmed by {}; opportunity {} booked",
        id,
        profile.email,
        opportunity.id
    );

    if let Ok(venue) = deal_memos::get_venue(&state, opportunity.venue_id).await {
        send_best_effort(
            state.relay.as_ref(),
            RelayForm::booking_confirmed(&updated.artist_name, &opportunity.title, &venue.name),
        )
        .await;
    }

    Ok(Json(updated))
}

/// GET /api/applications/mine
pub async fn handle_mine(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Result<Json<Vec<ApplicationWithOpportunityRow>>, AppError> {
    let applications = store::list_for_artist(&state.db, profile.id).await?;
    Ok(Json(applications))
}
