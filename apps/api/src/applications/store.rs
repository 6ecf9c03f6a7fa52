use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{ApplicationRow, ApplicationWithOpportunityRow};

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewApplication<'a> {
    pub opportunity_id: Uuid,
    pub artist_id: Uuid,
    pub artist_name: &'a str,
    pub email: &'a str,
    pub message: Option<&'a str>,
}

/// Inserts a pending application. Duplicate (opportunity, artist) pairs are
/// rejected by the table's unique constraint; callers map that violation to
/// a conflict response.
pub async fn insert(
    pool: &PgPool,
    new: NewApplication<'_>,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, opportunity_id, artist_id, artist_name, email, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.opportunity_id)
    .bind(new.artist_id)
    .bind(new.artist_name)
    .bind(new.email)
    .bind(new.message)
    .fetch_one(pool)
    .await
}

pub async fn list_for_opportunity(
    pool: &PgPool,
    opportunity_id: Uuid,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM applications WHERE opportunity_id = $1 ORDER BY applied_at ASC",
    )
    .bind(opportunity_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_artist(
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
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await
}

/// Writes a reviewed status plus the review audit fields.
pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
    reviewed_by: Uuid,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE applications
        SET status = $2, reviewed_by = $3, reviewed_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(reviewed_by)
    .fetch_one(pool)
    .await
}

pub async fn set_deal_memo_url(
    pool: &PgPool,
    id: Uuid,
    url: &str,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as("UPDATE applications SET deal_memo_url = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(url)
        .fetch_one(pool)
        .await
}

/// The applicant's confirmation: application -> confirmed and parent
/// opportunity -> booked, committed atomically so a crash cannot leave a
/// confirmed application on an unbooked opportunity.
pub async fn confirm(
    pool: &PgPool,
    application_id: Uuid,
    opportunity_id: Uuid,
) -> Result<ApplicationRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated: ApplicationRow =
        sqlx::query_as("UPDATE applications SET status = 'confirmed' WHERE id = $1 RETURNING *")
            .bind(application_id)
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query("UPDATE opportunities SET status = 'booked', updated_at = NOW() WHERE id = $1")
        .bind(opportunity_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Cross-venue queue for the platform-admin review surface.
pub async fn list_all(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM applications
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY applied_at ASC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
}
