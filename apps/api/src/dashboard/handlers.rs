use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::auth::authz::administered_venue_ids;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::application::ApplicationWithOpportunityRow;
use crate::state::AppState;

/// Application counts keyed by the unified status vocabulary.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub declined: i64,
    pub waitlisted: i64,
    pub confirmed: i64,
}

fn fold_status_counts(rows: &[(String, i64)]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for (status, count) in rows {
        match status.as_str() {
            "pending" => counts.pending = *count,
            "approved" => counts.approved = *count,
            "declined" => counts.declined = *count,
            "waitlisted" => counts.waitlisted = *count,
            "confirmed" => counts.confirmed = *count,
            _ => {}
        }
    }
    counts
}

#[derive(Serialize)]
pub struct ArtistDashboard {
    pub application_counts: StatusCounts,
    pub recent_applications: Vec<ApplicationWithOpportunityRow>,
    pub open_opportunities: i64,
}

/// GET /api/dashboard/artist
/// Read-only aggregation; the three queries run concurrently.
pub async fn handle_artist_dashboard(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Result<Json<ArtistDashboard>, AppError> {
    let (count_rows, recent, open_opportunities) = tokio::try_join!(
        artist_status_counts(&state.db, profile.id),
        recent_artist_applications(&state.db, profile.id),
        open_opportunity_count(&state.db),
    )?;

    Ok(Json(ArtistDashboard {
        application_counts: fold_status_counts(&count_rows),
        recent_applications: recent,
        open_opportunities,
    }))
}

async fn artist_status_counts(
    pool: &PgPool,
    artist_id: Uuid,
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT status, COUNT(*) FROM applications WHERE artist_id = $1 GROUP BY status")
        .bind(artist_id)
        .fetch_all(pool)
        .await
}

async fn recent_artist_applications(
    pool: &PgPool,
    artist_id: Uuid,
) -> Result<Vec<ApplicationWithOpportunityRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.opportunity_id, a.status, a.applied_at, a.deal_memo_url,
               o.title AS opportunity_title, o.status AS opportunity_status,
               o.event_date, v.name AS venue_name
        FROM applications a
        JOIN opportunities o ON o.id = a.opportunity_id
        JOIN venues v ON v.id = o.venue_id
        WHERE a.artist_id = $1
        ORDER BY a.applied_at DESC
        LIMIT 5
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await
}

async fn open_opportunity_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM opportunities WHERE status = 'open'")
        .fetch_one(pool)
        .await
}

#[derive(Debug, Serialize, FromRow)]
pub struct VenueRecentApplication {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub artist_name: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub opportunity_title: String,
}

#[derive(Serialize)]
pub struct VenueDashboard {
    pub opportunity_counts: Vec<(String, i64)>,
    pub pending_applications: i64,
    pub recent_applications: Vec<VenueRecentApplication>,
}

/// GET /api/dashboard/venue
/// Aggregated across every venue the caller administers.
pub async fn handle_venue_dashboard(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Result<Json<VenueDashboard>, AppError> {
    let venue_ids = administered_venue_ids(&state.db, &profile).await?;
    if venue_ids.is_empty() {
        return Ok(Json(VenueDashboard {
            opportunity_counts: Vec::new(),
            pending_applications: 0,
            recent_applications: Vec::new(),
        }));
    }

    let (opportunity_counts, pending_applications, recent_applications) = tokio::try_join!(
        venue_opportunity_counts(&state.db, &venue_ids),
        venue_pending_count(&state.db, &venue_ids),
        venue_recent_applications(&state.db, &venue_ids),
    )?;

    Ok(Json(VenueDashboard {
        opportunity_counts,
        pending_applications,
        recent_applications,
    }))
}

async fn venue_opportunity_counts(
    pool: &PgPool,
    venue_ids: &[Uuid],
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT status, COUNT(*) FROM opportunities WHERE venue_id = ANY($1) GROUP BY status",
    )
    .bind(venue_ids)
    .fetch_all(pool)
    .await
}

async fn venue_pending_count(pool: &PgPool, venue_ids: &[Uuid]) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM applications a
        JOIN opportunities o ON o.id = a.opportunity_id
        WHERE o.venue_id = ANY($1) AND a.status = 'pending'
        "#,
    )
    .bind(venue_ids)
    .fetch_one(pool)
    .await
}

async fn venue_recent_applications(
    pool: &PgPool,
    venue_ids: &[Uuid],
) -> Result<Vec<VenueRecentApplication>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.opportunity_id, a.artist_name, a.status, a.applied_at,
               o.title AS opportunity_title
        FROM applications a
        JOIN opportunities o ON o.id = a.opportunity_id
        WHERE o.venue_id = ANY($1)
        ORDER BY a.applied_at DESC
        LIMIT 10
        "#,
    )
    .bind(venue_ids)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_status_counts() {
        let rows = vec![
            ("pending".to_string(), 3),
            ("approved".to_string(), 1),
            ("confirmed".to_string(), 2),
        ];
        let counts = fold_status_counts(&rows);
        assert_eq!(counts.pending, 3);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.confirmed, 2);
        assert_eq!(counts.declined, 0);
        assert_eq!(counts.waitlisted, 0);
    }

    #[test]
    fn test_fold_ignores_unknown_statuses() {
        let rows = vec![("archived".to_string(), 7)];
        assert_eq!(fold_status_counts(&rows), StatusCounts::default());
    }
}
