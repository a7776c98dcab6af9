mod console;
mod node_logs;

pub use console::{ReportOptions, generate as generate_console, write_no_result, write_verdict};
pub use node_logs::generate as generate_node_logs;
