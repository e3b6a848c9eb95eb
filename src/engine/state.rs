use serde::{Deserialize, Serialize};

/// Run states of a `JitterGrapher`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrapherState {
    Created,
    Loaded { stream_count: usize },
    Computed { stream_count: usize },
    JsonWritten,
    ChartsWritten { charts: usize },
    Done,
    Failed { error_msg: String },
}

impl GrapherState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &GrapherState) -> bool {
        use GrapherState::*;

        matches!(
            (self, target),
            (Created, Loaded { .. }) |
            (Loaded { .. }, Computed { .. }) |
            (Computed { .. }, JsonWritten) |
            (JsonWritten, ChartsWritten { .. }) |
            (ChartsWritten { .. }, Done) |

            // Any step before Done may fail
            (Created, Failed { .. }) |
            (Loaded { .. }, Failed { .. }) |
            (Computed { .. }, Failed { .. }) |
            (JsonWritten, Failed { .. }) |
            (ChartsWritten { .. }, Failed { .. }) |

            // A finished grapher can be run again
            (Done, Created) |
            (Failed { .. }, Created)
        )
    }

    /// Get human-readable state name
    pub fn name(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Loaded { .. } => "Loaded",
            Self::Computed { .. } => "Computed",
            Self::JsonWritten => "JsonWritten",
            Self::ChartsWritten { .. } => "ChartsWritten",
            Self::Done => "Done",
            Self::Failed { .. } => "Failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

impl Default for GrapherState {
    fn default() -> Self {
        Self::Created
    }
}
