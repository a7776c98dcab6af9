use log::LevelFilter;
use std::io::Write;

/// Log target for command orchestration
pub const LOG_TARGET: &str = "commands";

/// The environment a command runs in: where its output goes and how it exits.
///
/// The binary wires this to the real process; tests capture output in memory.
pub trait Host {
    fn output(&mut self) -> impl Write;

    fn error(&mut self) -> impl Write;

    fn exit(&mut self, code: i32);

    /// Whether output goes to an interactive terminal, which enables colors and the spinner.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Route `log` records at or above `level` to stderr.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(true)
        .try_init();
}
