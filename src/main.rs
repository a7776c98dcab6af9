//! Validates npm packages and their dependencies against the corp-check service.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use corp_check::{Host, run};
use std::io::{IsTerminal, Write, stderr, stdout};

/// Host wired to the real process.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }

    fn is_terminal(&self) -> bool {
        stdout().is_terminal()
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() {
    run(&mut RealHost, std::env::args()).await;
}
