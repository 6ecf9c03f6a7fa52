use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpportunityRow {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub title: String,
    pub opportunity_type: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
    pub compensation: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the `v_opportunities_public` view — an open opportunity joined
/// with its venue's name and location for the public browse endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicOpportunityRow {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub title: String,
    pub opportunity_type: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
    pub compensation: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub venue_name: String,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
}
