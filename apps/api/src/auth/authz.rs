use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;

/// Whether `profile` may manage the opportunities and applications of the
/// given venue: platform admins always may, everyone else must appear in the
/// venue's admin list. This is the single authorization capability used by
/// every mutating opportunity/application route.
pub async fn can_manage_venue(
    pool: &PgPool,
    profile: &ProfileRow,
    venue_id: Uuid,
) -> Result<bool, sqlx::Error> {
    if profile.is_platform_admin() {
        return Ok(true);
    }

    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM venue_admins WHERE venue_id = $1 AND lower(email) = lower($2))",
    )
    .bind(venue_id)
    .bind(&profile.email)
    .fetch_one(pool)
    .await
}

/// Same check, rejecting with 403 instead of answering.
pub async fn ensure_can_manage_venue(
    pool: &PgPool,
    profile: &ProfileRow,
    venue_id: Uuid,
) -> Result<(), AppError> {
    if can_manage_venue(pool, profile, venue_id).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// The venue ids the profile administers, for venue-dashboard aggregation.
pub async fn administered_venue_ids(
    pool: &PgPool,
    profile: &ProfileRow,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT venue_id FROM venue_admins WHERE lower(email) = lower($1)")
        .bind(&profile.email)
        .fetch_all(pool)
        .await
}
