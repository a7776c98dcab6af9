use super::priority::{evaluation_rank, group_by, log_type_rank};
use super::{Summary, SummaryItem};
use crate::model::{EvaluationNode, LogType};
use crate::tree::reduce_tree;

/// Log target for the summary engine
const LOG_TARGET: &str = "summary";

/// Collect every error and warning in the tree into report order and count them.
///
/// Items are ordered by type (errors, warnings, then any other non-informational type), then by
/// rule (`license`, `version`, then the rest in first-seen order), then by how close to the
/// root the diagnostic was raised. Every step is a stable sort over a pre-order traversal, so
/// the same tree always produces the same summary.
#[must_use]
pub fn summarize(root: &EvaluationNode) -> Summary {
    let extracted = extract_items(root);
    log::debug!(target: LOG_TARGET, "Extracted {} diagnostic(s) from '{}'", extracted.len(), root.node_name);

    let mut by_type = group_by(extracted, |item| item.log_type.clone());
    by_type.sort_by_key(|group| log_type_rank(&group.key));

    let items: Vec<SummaryItem> = by_type
        .into_iter()
        .flat_map(|type_group| {
            let mut by_evaluation = group_by(type_group.items, |item| item.evaluation_name.clone());
            by_evaluation.sort_by_key(|group| evaluation_rank(group.key.as_deref()));

            by_evaluation.into_iter().flat_map(|mut evaluation_group| {
                evaluation_group.items.sort_by_key(|item| item.path.len());
                evaluation_group.items
            })
        })
        .collect();

    let error_count = items.iter().filter(|item| item.log_type == LogType::Error).count();
    let warning_count = items.iter().filter(|item| item.log_type == LogType::Warning).count();

    Summary {
        items,
        error_count,
        warning_count,
    }
}

fn extract_items(root: &EvaluationNode) -> Vec<SummaryItem> {
    reduce_tree(
        root,
        |mut items: Vec<SummaryItem>, node: &EvaluationNode, path| {
            for evaluation in &node.evaluations {
                for log in evaluation.logs.iter().filter(|log| log.log_type != LogType::Info) {
                    items.push(SummaryItem {
                        evaluation_name: evaluation.name.clone(),
                        log_type: log.log_type.clone(),
                        message: log.message.clone(),
                        path: path.iter().map(|name| (*name).to_owned()).collect(),
                    });
                }
            }
            items
        },
        Vec::new(),
        None,
    )
}
