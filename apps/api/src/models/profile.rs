use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A marketplace account: artist, venue, or platform admin.
/// Profiles are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub slug: String,
    pub bio: Option<String>,
    pub genres: Vec<String>,
    pub social_links: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn is_platform_admin(&self) -> bool {
        self.role == "admin"
    }
}
