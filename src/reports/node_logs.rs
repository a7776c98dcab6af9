//! Per-package listing of raw evaluation logs.

use crate::model::{EvaluationNode, LogType};
use crate::tree::reduce_tree;
use std::io::{Result, Write};

/// Log target for the per-package listing
const LOG_TARGET: &str = "node_logs";

/// Write the logs of every package in the tree, one block per package.
///
/// Packages are listed in the same pre-order the summary uses. Without `verbose` only errors are
/// listed; with it every log is. Packages with nothing to list produce no output at all.
/// `max_depth` limits how far below the root the listing goes.
pub fn generate<W: Write>(root: &EvaluationNode, verbose: bool, max_depth: Option<usize>, writer: &mut W) -> Result<()> {
    reduce_tree(
        root,
        |written: Result<()>, node: &EvaluationNode, path| written.and_then(|()| write_node(writer, node, path, verbose)),
        Ok(()),
        max_depth,
    )
}

fn write_node<W: Write>(writer: &mut W, node: &EvaluationNode, path: &[&str], verbose: bool) -> Result<()> {
    let mut logs = node
        .logs()
        .filter(|log| verbose || log.log_type == LogType::Error)
        .peekable();

    if logs.peek().is_none() {
        return Ok(());
    }

    writeln!(writer, "{}", path.join(" > "))?;
    for log in logs {
        writeln!(writer, "\t{} - {}", log.log_type, log.message)?;
        if let Some(meta) = &log.meta {
            log::debug!(target: LOG_TARGET, "{}: {meta}", node.node_name);
        }
    }
    writeln!(writer)
}
