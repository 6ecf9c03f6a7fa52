//! Form-relay client — the single point of entry for all outbound
//! notification email. The hosted relay receives `multipart/form-data` and
//! answers JSON `{"ok": true}`; it handles delivery, so this service never
//! sends first-party mail.

pub mod handlers;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Form inboxes configured on the hosted relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayFormKind {
    Contact,
    Artist,
    Venue,
    Opportunity,
}

impl RelayFormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayFormKind::Contact => "contact",
            RelayFormKind::Artist => "artist",
            RelayFormKind::Venue => "venue",
            RelayFormKind::Opportunity => "opportunity",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contact" => Some(RelayFormKind::Contact),
            "artist" => Some(RelayFormKind::Artist),
            "venue" => Some(RelayFormKind::Venue),
            "opportunity" => Some(RelayFormKind::Opportunity),
            _ => None,
        }
    }
}

/// A form submission bound for the relay: a `form` discriminator plus
/// plain text fields, forwarded verbatim.
#[derive(Debug, Clone)]
pub struct RelayForm {
    pub kind: RelayFormKind,
    pub fields: Vec<(String, String)>,
}

impl RelayForm {
    pub fn new(kind: RelayFormKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Notification to the venue that an artist has applied.
    pub fn application_received(
        artist_name: &str,
        opportunity_title: &str,
        venue_name: &str,
    ) -> Self {
        RelayForm::new(RelayFormKind::Opportunity)
            .field("subject", format!("New application: {opportunity_title}"))
            .field("artist_name", artist_name)
            .field("opportunity_title", opportunity_title)
            .field("venue_name", venue_name)
    }

    /// Notification to the artist that their application was approved,
    /// with a link to the deal memo.
    pub fn application_approved(
        artist_name: &str,
        artist_email: &str,
        opportunity_title: &str,
        venue_name: &str,
        deal_memo_url: &str,
    ) -> Self {
        RelayForm::new(RelayFormKind::Opportunity)
            .field(
                "subject",
                format!("You're approved for {opportunity_title}"),
            )
            .field("artist_name", artist_name)
            .field("email", artist_email)
            .field("opportunity_title", opportunity_title)
            .field("venue_name", venue_name)
            .field("deal_memo_url", deal_memo_url)
    }

    /// Notification to the venue that the artist confirmed the booking.
    pub fn booking_confirmed(artist_name: &str, opportunity_title: &str, venue_name: &str) -> Self {
        RelayForm::new(RelayFormKind::Opportunity)
            .field("subject", format!("Booking confirmed: {opportunity_title}"))
            .field("artist_name", artist_name)
            .field("opportunity_title", opportunity_title)
            .field("venue_name", venue_name)
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay rejected submission (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Relay returned a malformed response")]
    MalformedResponse,
}

/// Outbound relay seam. `FormspreeRelay` in production; tests substitute a
/// recording stub through `AppState`.
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn send(&self, form: RelayForm) -> Result<(), RelayError>;
}

/// Client for the hosted form-relay endpoint. One instance is built at
/// startup and shared; submissions are not retried.
pub struct FormspreeRelay {
    client: Client,
    endpoint: String,
}

impl FormspreeRelay {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    ok: bool,
}

#[async_trait]
impl FormRelay for FormspreeRelay {
    async fn send(&self, form: RelayForm) -> Result<(), RelayError> {
        let mut multipart = reqwest::multipart::Form::new().text("form", form.kind.as_str());
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(multipart)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RelayResponse = response
            .json()
            .await
            .map_err(|_| RelayError::MalformedResponse)?;
        if !body.ok {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                message: "relay reported failure".to_string(),
            });
        }

        debug!("Relay submission ({}) accepted", form.kind.as_str());
        Ok(())
    }
}

/// Fire-and-forget send used by the booking workflow: a failed notification
/// is logged and never fails the enclosing request.
pub async fn send_best_effort(relay: &dyn FormRelay, form: RelayForm) {
    let kind = form.kind;
    if let Err(e) = relay.send(form).await {
        tracing::warn!("Relay notification ({}) failed: {e}", kind.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips() {
        for kind in [
            RelayFormKind::Contact,
            RelayFormKind::Artist,
            RelayFormKind::Venue,
            RelayFormKind::Opportunity,
        ] {
            assert_eq!(RelayFormKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RelayFormKind::parse("newsletter"), None);
    }

    #[test]
    fn test_application_received_fields() {
        let form = RelayForm::application_received("The Midnight Owls", "Friday Headliner", "The Blue Note");
        assert_eq!(form.kind, RelayFormKind::Opportunity);
        let subject = form.fields.iter().find(|(n, _)| n == "subject").unwrap();
        assert_eq!(subject.1, "New application: Friday Headliner");
        assert!(form.fields.iter().any(|(n, v)| n == "venue_name" && v == "The Blue Note"));
    }

    #[test]
    fn test_approval_includes_memo_link() {
        let form = RelayForm::application_approved(
            "The Midnight Owls",
            "owls@example.com",
            "Friday Headliner",
            "The Blue Note",
            "https://static.example.com/deal-memos/x/1.html",
        );
        assert!(form
            .fields
            .iter()
            .any(|(n, v)| n == "deal_memo_url" && v.ends_with("1.html")));
        assert!(form.fields.iter().any(|(n, v)| n == "email" && v == "owls@example.com"));
    }
}
