//! Lifecycle of one export run.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Whether the writer has received at least one batch since `initialize`.
///
/// Header generation only trusts the profile's attribute filter once the run
/// is `Started`; before that, it relies on `selected_properties` or families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportRunState {
    #[default]
    NotStarted,
    Started,
}

impl ExportRunState {
    pub fn has_items(&self) -> bool {
        matches!(self, ExportRunState::Started)
    }
}

impl StateMachine for ExportRunState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ExportRunState::*;
        matches!((self, target), (NotStarted, Started) | (Started, Started))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ExportRunState::*;
        match self {
            NotStarted => vec![Started],
            Started => vec![Started],
        }
    }
}
