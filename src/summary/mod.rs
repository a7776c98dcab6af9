//! Aggregation of evaluation diagnostics into an ordered, counted summary.

mod engine;
mod priority;
mod summary_item;

pub use engine::summarize;
pub use priority::{NOT_RANKED, evaluation_rank, log_type_rank};
pub use summary_item::{Summary, SummaryItem};
