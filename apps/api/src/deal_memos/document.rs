use chrono::NaiveDate;
use serde_json::{json, Value};

/// Everything interpolated into a deal-memo document.
pub struct MemoDetails<'a> {
    pub artist_name: &'a str,
    pub artist_email: &'a str,
    pub venue_name: &'a str,
    pub venue_city: Option<&'a str>,
    pub opportunity_title: &'a str,
    pub opportunity_type: &'a str,
    pub event_date: NaiveDate,
    pub event_time: Option<&'a str>,
    pub compensation: Option<&'a str>,
}

/// Renders the static deal-memo HTML document. The memo is a plain
/// self-contained page; styling is inline so the document survives being
/// served from object storage or embedded as a data URL.
pub fn render_memo_html(details: &MemoDetails) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Deal Memo — {}</title>\n",
        escape(details.opportunity_title)
    ));
    html.push_str("<style>body{font-family:Georgia,serif;max-width:640px;margin:40px auto;color:#222}h1{border-bottom:2px solid #222;padding-bottom:8px}dt{font-weight:bold;margin-top:12px}</style>\n");
    html.push_str("</head>\n<body>\n<h1>Performance Deal Memo</h1>\n<dl>\n");

    push_row(&mut html, "Artist", details.artist_name);
    push_row(&mut html, "Artist contact", details.artist_email);
    match details.venue_city {
        Some(city) => push_row(
            &mut html,
            "Venue",
            &format!("{} ({})", details.venue_name, city),
        ),
        None => push_row(&mut html, "Venue", details.venue_name),
    }
    push_row(&mut html, "Engagement", details.opportunity_title);
    push_row(&mut html, "Slot", details.opportunity_type);
    push_row(
        &mut html,
        "Date",
        &details.event_date.format("%B %e, %Y").to_string(),
    );
    if let Some(time) = details.event_time {
        push_row(&mut html, "Time", time);
    }
    push_row(
        &mut html,
        "Compensation",
        details.compensation.unwrap_or("As agreed between the parties"),
    );

    html.push_str("</dl>\n<p>This memo summarizes the engagement terms agreed between the artist and the venue. It is generated on approval and superseded by any later version.</p>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// The terms blob persisted alongside the document.
pub fn terms_json(details: &MemoDetails) -> Value {
    json!({
        "artist_name": details.artist_name,
        "venue_name": details.venue_name,
        "opportunity_title": details.opportunity_title,
        "opportunity_type": details.opportunity_type,
        "event_date": details.event_date.to_string(),
        "event_time": details.event_time,
        "compensation": details.compensation,
    })
}

fn push_row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", label, escape(value)));
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> MemoDetails<'static> {
        MemoDetails {
            artist_name: "The Midnight Owls",
            artist_email: "owls@example.com",
            venue_name: "The Blue Note",
            venue_city: Some("Austin"),
            opportunity_title: "Friday Night Headliner",
            opportunity_type: "Headliner",
            event_date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            event_time: Some("21:00"),
            compensation: Some("$500 guarantee"),
        }
    }

    #[test]
    fn test_memo_contains_core_terms() {
        let html = render_memo_html(&details());
        assert!(html.contains("The Midnight Owls"));
        assert!(html.contains("The Blue Note (Austin)"));
        assert!(html.contains("$500 guarantee"));
        assert!(html.contains("September"));
    }

    #[test]
    fn test_memo_defaults_compensation_when_unset() {
        let mut d = details();
        d.compensation = None;
        let html = render_memo_html(&d);
        assert!(html.contains("As agreed between the parties"));
    }

    #[test]
    fn test_memo_escapes_markup_in_names() {
        let mut d = details();
        d.artist_name = "<script>alert(1)</script>";
        let html = render_memo_html(&d);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_terms_json_shape() {
        let terms = terms_json(&details());
        assert_eq!(terms["venue_name"], "The Blue Note");
        assert_eq!(terms["event_date"], "2026-09-04");
    }
}
