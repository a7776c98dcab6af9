use serde::{Deserialize, Serialize};

/// What is being submitted for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Subject {
    /// A registry package, `name` or `name@version`.
    #[serde(rename = "packageName")]
    PackageName(String),

    /// The raw text of a project's `package.json`.
    #[serde(rename = "packageJSON")]
    PackageJson(String),
}

/// Body of the validation submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    #[serde(flatten)]
    pub subject: Subject,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_production: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,

    /// Raw text of a rule set file; sent as `null` when there is none so the service applies
    /// its default rules.
    pub rule_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_lock: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub yarn_lock: Option<String>,
}

impl ValidationRequest {
    #[must_use]
    pub const fn new(subject: Subject) -> Self {
        Self {
            subject,
            is_production: None,
            force: None,
            rule_set: None,
            package_lock: None,
            yarn_lock: None,
        }
    }
}

/// Reply to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    /// Correlation id used to poll for the result.
    pub cid: String,
}
