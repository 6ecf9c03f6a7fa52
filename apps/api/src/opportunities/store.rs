use sqlx::PgPool;
use uuid::Uuid;

use crate::models::opportunity::{OpportunityRow, PublicOpportunityRow};

/// Filters accepted by the public browse endpoint. All optional; `None`
/// binds pass through the corresponding predicate.
#[derive(Debug, Default)]
pub struct BrowseFilters {
    pub genre: Option<String>,
    pub opportunity_type: Option<String>,
    pub city: Option<String>,
}

/// Public browse over the `v_opportunities_public` view (open listings only),
/// newest first.
pub async fn list_public(
    pool: &PgPool,
    filters: &BrowseFilters,
) -> Result<Vec<PublicOpportunityRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT *
        FROM v_opportunities_public
        WHERE ($1::text IS NULL OR $1 = ANY(genres))
          AND ($2::text IS NULL OR opportunity_type = $2)
          AND ($3::text IS NULL OR lower(venue_city) = lower($3))
        ORDER BY created_at DESC
        LIMIT 100
        "#,
    )
    .bind(&filters.genre)
    .bind(&filters.opportunity_type)
    .bind(&filters.city)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<OpportunityRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM opportunities WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewOpportunity<'a> {
    pub venue_id: Uuid,
    pub title: &'a str,
    pub opportunity_type: &'a str,
    pub event_date: chrono::NaiveDate,
    pub event_time: Option<&'a str>,
    pub genres: &'a [String],
    pub description: Option<&'a str>,
    pub compensation: Option<&'a str>,
    pub application_deadline: Option<chrono::NaiveDate>,
    pub status: &'a str,
    pub created_by: Uuid,
}

pub async fn insert(
    pool: &PgPool,
    new: NewOpportunity<'_>,
) -> Result<OpportunityRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO opportunities
            (id, venue_id, title, opportunity_type, event_date, event_time,
             genres, description, compensation, application_deadline, status, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.venue_id)
    .bind(new.title)
    .bind(new.opportunity_type)
    .bind(new.event_date)
    .bind(new.event_time)
    .bind(new.genres)
    .bind(new.description)
    .bind(new.compensation)
    .bind(new.application_deadline)
    .bind(new.status)
    .bind(new.created_by)
    .fetch_one(pool)
    .await
}

#[derive(Debug, Default)]
pub struct OpportunityChanges {
    pub title: Option<String>,
    pub opportunity_type: Option<String>,
    pub event_date: Option<chrono::NaiveDate>,
    pub event_time: Option<String>,
    pub genres: Option<Vec<String>>,
    pub description: Option<String>,
    pub compensation: Option<String>,
    pub application_deadline: Option<chrono::NaiveDate>,
}

/// Partial update; unset fields keep their current value.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: &OpportunityChanges,
) -> Result<OpportunityRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE opportunities SET
            title = COALESCE($2, title),
            opportunity_type = COALESCE($3, opportunity_type),
            event_date = COALESCE($4, event_date),
            event_time = COALESCE($5, event_time),
            genres = COALESCE($6, genres),
            description = COALESCE($7, description),
            compensation = COALESCE($8, compensation),
            application_deadline = COALESCE($9, application_deadline),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&changes.title)
    .bind(&changes.opportunity_type)
    .bind(changes.event_date)
    .bind(&changes.event_time)
    .bind(&changes.genres)
    .bind(&changes.description)
    .bind(&changes.compensation)
    .bind(changes.application_deadline)
    .fetch_one(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<OpportunityRow, sqlx::Error> {
    sqlx::query_as("UPDATE opportunities SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM opportunities WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Applications on this opportunity that represent a commitment
/// (approved or confirmed). A non-zero count blocks deletion.
pub async fn committed_application_count(
    pool: &PgPool,
    opportunity_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE opportunity_id = $1 AND status IN ('approved', 'confirmed')",
    )
    .bind(opportunity_id)
    .fetch_one(pool)
    .await
}

/// Admin listing across every venue and status.
pub async fn list_all(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<OpportunityRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM opportunities
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
}
