use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub email: String,
    pub message: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub deal_memo_url: Option<String>,
}

/// An application joined with a summary of its opportunity, for the
/// artist-facing "my applications" listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithOpportunityRow {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub deal_memo_url: Option<String>,
    pub opportunity_title: String,
    pub opportunity_status: String,
    pub event_date: chrono::NaiveDate,
    pub venue_name: String,
}
