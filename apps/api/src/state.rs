use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::relay::FormRelay;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every external collaborator is constructed once at startup and handed in
/// here; handlers never build their own clients.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Outbound notification relay. Trait object so tests can substitute a
    /// recording stub for the hosted form-relay service.
    pub relay: Arc<dyn FormRelay>,
    pub config: Config,
}
