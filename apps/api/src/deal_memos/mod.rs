pub mod document;
pub mod handlers;
pub mod storage;

use uuid::Uuid;

use crate::applications::store as application_store;
use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::deal_memo::DealMemoRow;
use crate::models::opportunity::OpportunityRow;
use crate::models::venue::VenueRow;
use crate::state::AppState;

/// Generates (or regenerates) the deal memo for an application: render the
/// document, store it (with the data-URL fallback), persist the memo row,
/// and stamp the document URL on the application. Each generation gets the
/// next version key, so earlier memos stay retrievable.
pub async fn generate_for_application(
    state: &AppState,
    application: &ApplicationRow,
    opportunity: &OpportunityRow,
    venue: &VenueRow,
) -> Result<DealMemoRow, AppError> {
    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM deal_memos WHERE application_id = $1")
            .bind(application.id)
            .fetch_one(&state.db)
            .await?;
    let version = existing + 1;

    let details = document::MemoDetails {
        artist_name: &application.artist_name,
        artist_email: &application.email,
        venue_name: &venue.name,
        venue_city: venue.city.as_deref(),
        opportunity_title: &opportunity.title,
        opportunity_type: &opportunity.opportunity_type,
        event_date: opportunity.event_date,
        event_time: opportunity.event_time.as_deref(),
        compensation: opportunity.compensation.as_deref(),
    };
    let html = document::render_memo_html(&details);

    let key = storage::memo_key(application.id, version);
    let url = storage::store_memo_document(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        &key,
        &html,
    )
    .await;

    let memo: DealMemoRow = sqlx::query_as(
        r#"
        INSERT INTO deal_memos
            (id, application_id, venue_id, artist_id, terms, status, document_url)
        VALUES ($1, $2, $3, $4, $5, 'draft', $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application.id)
    .bind(venue.id)
    .bind(application.artist_id)
    .bind(document::terms_json(&details))
    .bind(&url)
    .fetch_one(&state.db)
    .await?;

    application_store::set_deal_memo_url(&state.db, application.id, &url).await?;

    tracing::info!(
        "Deal memo v{} generated for application {}",
        version,
        application.id
    );
    Ok(memo)
}

pub async fn get_venue(state: &AppState, venue_id: Uuid) -> Result<VenueRow, AppError> {
    let venue: Option<VenueRow> = sqlx::query_as("SELECT * FROM venues WHERE id = $1")
        .bind(venue_id)
        .fetch_optional(&state.db)
        .await?;
    venue.ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} not found")))
}
