use super::{EvaluationNode, ValidationState};
use serde::Deserialize;
use strum::{Display, EnumString};

/// The service's final verdict for a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(from = "String")]
pub enum Qualification {
    Accepted,
    Recommended,
    Rejected,

    /// A verdict this client does not know about.
    #[strum(default)]
    Other(String),
}

from_wire_string!(Qualification);

impl Qualification {
    /// Verdicts other than accepted or recommended fail the run.
    #[must_use]
    pub const fn is_passing(&self) -> bool {
        matches!(self, Self::Accepted | Self::Recommended)
    }

    /// The word used when reporting the verdict.
    #[must_use]
    pub const fn verdict(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Recommended => "recommended",
            Self::Rejected | Self::Other(_) => "rejected",
        }
    }
}

/// The evaluated result of a completed validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub qualification: Qualification,
    pub root_evaluation: EvaluationNode,
}

/// Payload returned by the status endpoint.
///
/// Every field is optional: pending responses carry only a state, and a malformed response
/// may lack even that.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub cid: Option<String>,

    #[serde(default)]
    pub state: Option<ValidationState>,

    #[serde(default)]
    pub result: Option<ValidationResult>,
}

/// What a finished validation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service produced an evaluation tree.
    Completed(ValidationResult),

    /// The run ended without a result, typically because validation failed server-side.
    NoResult(Option<ValidationState>),
}

impl StatusResponse {
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        match self.result {
            Some(result) => Outcome::Completed(result),
            None => Outcome::NoResult(self.state),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::model::StateType;
    use serde_json::json;

    #[test]
    fn test_succeeded_response_has_outcome() {
        let response: StatusResponse = serde_json::from_value(json!({
            "cid": "1",
            "state": { "type": "SUCCEEDED" },
            "result": {
                "qualification": "RECOMMENDED",
                "rootEvaluation": {
                    "nodeName": "name",
                    "nodeVersion": "version",
                    "evaluations": [ { "score": 1, "logs": [] } ],
                    "nodeScore": 1,
                    "dependencies": []
                }
            }
        }))
        .unwrap();

        let Outcome::Completed(result) = response.into_outcome() else {
            panic!("expected a result");
        };
        assert_eq!(result.qualification, Qualification::Recommended);
        assert_eq!(result.root_evaluation.node_name, "name");
    }

    #[test]
    fn test_failed_response_with_null_result() {
        let response: StatusResponse = serde_json::from_value(json!({
            "cid": "1",
            "state": { "type": "FAILED" },
            "result": null
        }))
        .unwrap();

        assert_eq!(
            response.into_outcome(),
            Outcome::NoResult(Some(ValidationState::new(StateType::Failed)))
        );
    }

    #[test]
    fn test_empty_response() {
        let response: StatusResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response, StatusResponse::default());
        assert_eq!(response.into_outcome(), Outcome::NoResult(None));
    }

    #[test]
    fn test_qualification_verdicts() {
        assert!(Qualification::Accepted.is_passing());
        assert!(Qualification::Recommended.is_passing());
        assert!(!Qualification::Rejected.is_passing());
        assert!(!Qualification::from("UNKNOWN".to_string()).is_passing());
        assert_eq!(Qualification::Accepted.verdict(), "accepted");
        assert_eq!(Qualification::Recommended.verdict(), "recommended");
        assert_eq!(Qualification::from("UNKNOWN".to_string()).verdict(), "rejected");
    }

    #[test]
    fn test_qualification_wire_strings() {
        assert_eq!(Qualification::from("ACCEPTED".to_string()), Qualification::Accepted);
        assert_eq!(Qualification::Rejected.to_string(), "REJECTED");

        let unknown = Qualification::from("ON_HOLD".to_string());
        assert_eq!(unknown, Qualification::Other("ON_HOLD".to_string()));
        assert_eq!(unknown.to_string(), "ON_HOLD");
    }
}
