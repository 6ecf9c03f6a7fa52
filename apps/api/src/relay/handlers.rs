use axum::{extract::Multipart, extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::relay::{RelayForm, RelayFormKind};
use crate::state::AppState;

/// POST /api/relay
///
/// Public relay endpoint: accepts `multipart/form-data` with a `form`
/// discriminator (contact|artist|venue|opportunity) and forwards the
/// remaining text fields verbatim to the hosted relay.
pub async fn handle_relay(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut kind: Option<RelayFormKind> = None;
    let mut fields: Vec<(String, String)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Unreadable field '{name}': {e}")))?;

        if name == "form" {
            kind = Some(
                RelayFormKind::parse(&value)
                    .ok_or_else(|| AppError::Validation(format!("Unknown form '{value}'")))?,
            );
        } else {
            fields.push((name, value));
        }
    }

    let kind = kind.ok_or_else(|| AppError::Validation("Missing 'form' field".to_string()))?;

    let mut form = RelayForm::new(kind);
    form.fields = fields;

    state
        .relay
        .send(form)
        .await
        .map_err(|e| AppError::Relay(e.to_string()))?;

    Ok(Json(json!({ "ok": true })))
}
