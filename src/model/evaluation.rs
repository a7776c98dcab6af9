use super::null_as_empty;
use crate::tree::TreeNode;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Severity of a diagnostic raised by an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(from = "String")]
pub enum LogType {
    Error,
    Warning,
    Info,

    /// A severity this client does not know about.
    #[strum(default)]
    Other(String),
}

from_wire_string!(LogType);

/// One package in the evaluated dependency graph.
///
/// Each node exclusively owns its dependencies, so a tree received from the service is an
/// immutable snapshot that can be folded without any shared state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationNode {
    pub node_name: String,

    #[serde(default)]
    pub node_version: Option<String>,

    /// Aggregated score in `[0, 1]`.
    #[serde(default)]
    pub node_score: Option<f64>,

    /// Rule outcomes, in rule execution order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub evaluations: Vec<Evaluation>,

    /// Direct dependencies, in the order the service resolved them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<Self>,
}

impl EvaluationNode {
    /// Create a leaf node with no evaluations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node_name: name.into(),
            node_version: None,
            node_score: None,
            evaluations: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluations.push(evaluation);
        self
    }

    #[must_use]
    pub fn with_dependency(mut self, dependency: Self) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// All logs of all evaluations of this node, in evaluation order.
    pub fn logs(&self) -> impl Iterator<Item = &LogEntry> {
        self.evaluations.iter().flat_map(|evaluation| evaluation.logs.iter())
    }
}

impl TreeNode for EvaluationNode {
    fn name(&self) -> &str {
        &self.node_name
    }

    fn children(&self) -> &[Self] {
        &self.dependencies
    }
}

/// The outcome of one named rule for a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Evaluation {
    /// Rule name such as `license` or `version`; missing on legacy payloads.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<LogEntry>,
}

impl Evaluation {
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            description: None,
            score: None,
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_log(mut self, log_type: LogType, message: impl Into<String>) -> Self {
        self.logs.push(LogEntry {
            log_type,
            message: message.into(),
            meta: None,
        });
        self
    }
}

/// A single diagnostic raised by an evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub log_type: LogType,

    #[serde(default)]
    pub message: String,

    /// Opaque payload, only ever logged for debugging.
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}
