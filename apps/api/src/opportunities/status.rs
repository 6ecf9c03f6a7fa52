use serde::{Deserialize, Serialize};

/// Opportunity lifecycle states. Unlike applications these carry no
/// transition table: an authorized caller may assign any of them, matching
/// the listing-management contract (a venue can reopen a closed listing,
/// mark an open one filled, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Draft,
    Open,
    Closed,
    Filled,
    Booked,
}

impl OpportunityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OpportunityStatus::Draft => "draft",
            OpportunityStatus::Open => "open",
            OpportunityStatus::Closed => "closed",
            OpportunityStatus::Filled => "filled",
            OpportunityStatus::Booked => "booked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(OpportunityStatus::Draft),
            "open" => Some(OpportunityStatus::Open),
            "closed" => Some(OpportunityStatus::Closed),
            "filled" => Some(OpportunityStatus::Filled),
            "booked" => Some(OpportunityStatus::Booked),
            _ => None,
        }
    }

    /// Only open listings accept applications.
    pub fn accepts_applications(self) -> bool {
        matches!(self, OpportunityStatus::Open)
    }
}

/// Performance slot types a venue can list.
pub const OPPORTUNITY_TYPES: &[&str] = &["Headliner", "Supporting", "Open Mic"];

pub fn is_valid_opportunity_type(value: &str) -> bool {
    OPPORTUNITY_TYPES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips() {
        for s in [
            OpportunityStatus::Draft,
            OpportunityStatus::Open,
            OpportunityStatus::Closed,
            OpportunityStatus::Filled,
            OpportunityStatus::Booked,
        ] {
            assert_eq!(OpportunityStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(OpportunityStatus::parse("active"), None);
        assert_eq!(OpportunityStatus::parse(""), None);
    }

    #[test]
    fn test_only_open_accepts_applications() {
        assert!(OpportunityStatus::Open.accepts_applications());
        assert!(!OpportunityStatus::Draft.accepts_applications());
        assert!(!OpportunityStatus::Closed.accepts_applications());
        assert!(!OpportunityStatus::Filled.accepts_applications());
        assert!(!OpportunityStatus::Booked.accepts_applications());
    }

    #[test]
    fn test_opportunity_types() {
        assert!(is_valid_opportunity_type("Headliner"));
        assert!(is_valid_opportunity_type("Open Mic"));
        assert!(!is_valid_opportunity_type("headliner"));
        assert!(!is_valid_opportunity_type("DJ Set"));
    }
}
