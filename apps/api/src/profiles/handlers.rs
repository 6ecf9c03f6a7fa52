use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::profiles::slug::{slugify, uniquify};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub email: String,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub profile_picture: Option<String>,
}

/// POST /api/profiles
/// Called on signup / first login. The platform `admin` role is assigned
/// out of band, never through this endpoint.
pub async fn handle_create(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileRow>), AppError> {
    if !matches!(req.role.as_str(), "artist" | "venue") {
        return Err(AppError::Validation(format!(
            "Role must be 'artist' or 'venue', got '{}'",
            req.role
        )));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }

    let base = slugify(&req.name);
    let taken: Vec<String> = sqlx::query_scalar("SELECT slug FROM profiles WHERE slug LIKE $1")
        .bind(format!("{base}%"))
        .fetch_all(&state.db)
        .await?;
    let slug = uniquify(&base, &taken);

    let profile: ProfileRow = sqlx::query_as(
        r#"
        INSERT INTO profiles
            (id, email, name, role, slug, bio, genres, social_links, city, state, profile_picture)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.email)
    .bind(&req.name)
    .bind(&req.role)
    .bind(&slug)
    .bind(&req.bio)
    .bind(&req.genres)
    .bind(&req.social_links)
    .bind(&req.city)
    .bind(&req.state)
    .bind(&req.profile_picture)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "A profile with this email already exists"))?;

    tracing::info!("Profile {} created ({}, {})", profile.id, profile.email, profile.role);
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profiles/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
}

/// GET /api/profiles/slug/:slug
pub async fn handle_get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE slug = $1")
        .bind(&slug)
        .fetch_optional(&state.db)
        .await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile '{slug}' not found")))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub genres: Option<Vec<String>>,
    pub social_links: Option<Vec<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub profile_picture: Option<String>,
}

/// PUT /api/profiles/:id — owner-only (or platform admin). Email, role and
/// slug are immutable here.
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    if caller.id != id && !caller.is_platform_admin() {
        return Err(AppError::Forbidden);
    }

    let updated: Option<ProfileRow> = sqlx::query_as(
        r#"
        UPDATE profiles SET
            name = COALESCE($2, name),
            bio = COALESCE($3, bio),
            genres = COALESCE($4, genres),
            social_links = COALESCE($5, social_links),
            city = COALESCE($6, city),
            state = COALESCE($7, state),
            profile_picture = COALESCE($8, profile_picture),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.bio)
    .bind(&req.genres)
    .bind(&req.social_links)
    .bind(&req.city)
    .bind(&req.state)
    .bind(&req.profile_picture)
    .fetch_optional(&state.db)
    .await?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
}
