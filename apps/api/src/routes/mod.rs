pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{admin, applications, dashboard, deal_memos, opportunities, profiles, relay};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/profiles", post(profiles::handlers::handle_create))
        .route(
            "/api/profiles/:id",
            get(profiles::handlers::handle_get).put(profiles::handlers::handle_update),
        )
        .route(
            "/api/profiles/slug/:slug",
            get(profiles::handlers::handle_get_by_slug),
        )
        // Opportunities
        .route(
            "/api/opportunities",
            get(opportunities::handlers::handle_browse).post(opportunities::handlers::handle_create),
        )
        .route(
            "/api/opportunities/:id",
            get(opportunities::handlers::handle_get)
                .put(opportunities::handlers::handle_update)
                .delete(opportunities::handlers::handle_delete),
        )
        .route(
            "/api/opportunities/:id/status",
            put(opportunities::handlers::handle_set_status),
        )
        .route(
            "/api/opportunities/:id/apply",
            post(applications::handlers::handle_apply),
        )
        .route(
            "/api/opportunities/:id/applications",
            get(applications::handlers::handle_list_for_opportunity),
        )
        // Applications
        .route(
            "/api/applications/mine",
            get(applications::handlers::handle_mine),
        )
        .route(
            "/api/applications/:id/status",
            put(applications::handlers::handle_review),
        )
        .route(
            "/api/applications/:id/confirm",
            post(applications::handlers::handle_confirm),
        )
        // Deal memos
        .route("/api/deal-memos", post(deal_memos::handlers::handle_create))
        .route("/api/deal-memos/:id", get(deal_memos::handlers::handle_get))
        // Notification relay
        .route("/api/relay", post(relay::handlers::handle_relay))
        // Dashboards
        .route(
            "/api/dashboard/artist",
            get(dashboard::handlers::handle_artist_dashboard),
        )
        .route(
            "/api/dashboard/venue",
            get(dashboard::handlers::handle_venue_dashboard),
        )
        // Platform admin
        .route(
            "/api/admin/opportunities",
            get(admin::handlers::handle_list_opportunities),
        )
        .route(
            "/api/admin/opportunities/:id/status",
            put(admin::handlers::handle_set_opportunity_status),
        )
        .route(
            "/api/admin/applications",
            get(admin::handlers::handle_list_applications),
        )
        .route(
            "/api/admin/applications/:id/status",
            put(admin::handlers::handle_set_application_status),
        )
        .with_state(state)
}
