use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    /// The action succeeded but produced a note the caller should see
    /// (e.g. the lot value realized by a purchase).
    SuccessWithNote(String),
    Error(ActionError),
}

impl ActionResult {
    /// Returns `true` for both `Success` and `SuccessWithNote`.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ActionResult::Success | ActionResult::SuccessWithNote(_)
        )
    }

    /// Extract the note string if present.
    pub fn note(&self) -> Option<&str> {
        match self {
            ActionResult::SuccessWithNote(n) => Some(n.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionError {
    /// No batch or listing with the given id exists.
    NotFound,
    /// The requested lifecycle move is not the next forward step.
    InvalidTransition,
    /// A lot for this (batch, material) pair already exists.
    AlreadyListed,
    /// The batch has not reached the stage the action requires.
    NotEligible,
    /// The same simulated operation is already in flight.
    OperationInFlight,
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_variants() {
        assert!(ActionResult::Success.is_success());
        assert!(ActionResult::SuccessWithNote("sold for 2160".to_string()).is_success());
        assert!(!ActionResult::Error(ActionError::NotFound).is_success());
    }

    #[test]
    fn note_extraction() {
        assert_eq!(ActionResult::Success.note(), None);
        assert_eq!(
            ActionResult::SuccessWithNote("note".to_string()).note(),
            Some("note")
        );
    }
}
