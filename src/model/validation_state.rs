use serde::Deserialize;
use strum::{Display, EnumString};

/// Progress of a validation run on the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(from = "String")]
pub enum StateType {
    Pending,
    Succeeded,
    Failed,

    /// A state this client does not know about.
    #[strum(default)]
    Other(String),
}

from_wire_string!(StateType);

/// Transient status reported by the service while a validation runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationState {
    #[serde(rename = "type")]
    pub state_type: StateType,

    #[serde(default)]
    pub message: Option<String>,
}

impl ValidationState {
    #[must_use]
    pub const fn new(state_type: StateType) -> Self {
        Self { state_type, message: None }
    }

    /// Anything but `PENDING` ends polling, including states this client doesn't know.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state_type, StateType::Pending)
    }
}
