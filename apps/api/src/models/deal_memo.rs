use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DealMemoRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub venue_id: Uuid,
    pub artist_id: Uuid,
    pub terms: Value,
    pub status: String,
    pub document_url: String,
    pub created_at: DateTime<Utc>,
}
