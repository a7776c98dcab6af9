//! Wire types exchanged with the corp-check service.

/// Lets serde read a strum wire enum from its string form.
///
/// Each enum carries a `#[strum(default)] Other(String)` variant, so parsing never fails and
/// values this client doesn't recognize are kept verbatim.
macro_rules! from_wire_string {
    ($($name:ident),+ $(,)?) => {
        $(
            impl From<String> for $name {
                fn from(value: String) -> Self {
                    <Self as core::str::FromStr>::from_str(&value).unwrap_or(Self::Other(value))
                }
            }
        )+
    };
}

mod evaluation;
mod request;
mod status;
mod validation_state;

pub use evaluation::{Evaluation, EvaluationNode, LogEntry, LogType};
pub use request::{Subject, SubmitResponse, ValidationRequest};
pub use status::{Outcome, Qualification, StatusResponse, ValidationResult};
pub use validation_state::{StateType, ValidationState};

use serde::{Deserialize, Deserializer};

/// Deserializes a sequence that the service may send as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
