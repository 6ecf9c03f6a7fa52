use serde::{Deserialize, Serialize};

/// The single application status vocabulary. Review surfaces (venue admin and
/// platform admin) move applications between the review states; `confirmed`
/// is reachable only through the applicant's confirmation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Declined,
    Waitlisted,
    Confirmed,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Declined => "declined",
            ApplicationStatus::Waitlisted => "waitlisted",
            ApplicationStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "declined" => Some(ApplicationStatus::Declined),
            "waitlisted" => Some(ApplicationStatus::Waitlisted),
            "confirmed" => Some(ApplicationStatus::Confirmed),
            _ => None,
        }
    }

    /// The transition table. Declined and confirmed are terminal; the one
    /// backward edge is `approved -> declined` (a venue withdrawing an offer
    /// before the artist confirms).
    pub fn can_transition(self, to: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, to),
            (Pending, Approved)
                | (Pending, Declined)
                | (Pending, Waitlisted)
                | (Waitlisted, Approved)
                | (Waitlisted, Declined)
                | (Approved, Declined)
                | (Approved, Confirmed)
        )
    }

    /// Whether a reviewer (venue admin / platform admin) may set this status
    /// directly. `confirmed` belongs to the applicant.
    pub fn is_review_target(self) -> bool {
        !matches!(self, ApplicationStatus::Confirmed)
    }

    /// Statuses that represent a commitment to the artist. An opportunity
    /// with an application in one of these cannot be deleted.
    pub fn is_committed(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Approved | ApplicationStatus::Confirmed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;
    use super::*;

    #[test]
    fn test_pending_reaches_all_review_states() {
        assert!(Pending.can_transition(Approved));
        assert!(Pending.can_transition(Declined));
        assert!(Pending.can_transition(Waitlisted));
    }

    #[test]
    fn test_pending_cannot_skip_to_confirmed() {
        assert!(!Pending.can_transition(Confirmed));
    }

    #[test]
    fn test_waitlist_resolves_either_way() {
        assert!(Waitlisted.can_transition(Approved));
        assert!(Waitlisted.can_transition(Declined));
        assert!(!Waitlisted.can_transition(Confirmed));
    }

    #[test]
    fn test_declined_is_terminal() {
        for to in [Pending, Approved, Waitlisted, Confirmed] {
            assert!(!Declined.can_transition(to));
        }
    }

    #[test]
    fn test_confirmed_is_terminal() {
        for to in [Pending, Approved, Declined, Waitlisted] {
            assert!(!Confirmed.can_transition(to));
        }
    }

    #[test]
    fn test_approved_can_be_withdrawn_or_confirmed() {
        assert!(Approved.can_transition(Declined));
        assert!(Approved.can_transition(Confirmed));
        assert!(!Approved.can_transition(Pending));
        assert!(!Approved.can_transition(Waitlisted));
    }

    #[test]
    fn test_no_self_transitions() {
        for s in [Pending, Approved, Declined, Waitlisted, Confirmed] {
            assert!(!s.can_transition(s));
        }
    }

    #[test]
    fn test_parse_round_trips() {
        for s in [Pending, Approved, Declined, Waitlisted, Confirmed] {
            assert_eq!(ApplicationStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ApplicationStatus::parse("rejected"), None);
        assert_eq!(ApplicationStatus::parse("Approved"), None);
    }

    #[test]
    fn test_confirmed_is_not_a_review_target() {
        assert!(!Confirmed.is_review_target());
        assert!(Approved.is_review_target());
    }

    #[test]
    fn test_committed_statuses() {
        assert!(Approved.is_committed());
        assert!(Confirmed.is_committed());
        assert!(!Pending.is_committed());
        assert!(!Waitlisted.is_committed());
        assert!(!Declined.is_committed());
    }
}
