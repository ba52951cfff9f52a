//! Configuration sourced from the CLI

use std::time::Duration;

use clap::Parser;

use crate::scanner::DEFAULT_MAX_RUN_LEN;

#[derive(Parser, Debug)]
#[command(name = "phpdd-lsp", version, about)]
pub struct Cli {
    /// Delay before a focus-triggered scan runs, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Runs of '$' longer than this are treated as intentional and skipped
    #[arg(long, default_value_t = DEFAULT_MAX_RUN_LEN)]
    pub max_run_length: usize,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            debounce: Duration::from_millis(self.debounce_ms),
            max_run_len: self.max_run_length,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub debounce: Duration,
    pub max_run_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debounce: Duration::from_millis(300),
            max_run_len: DEFAULT_MAX_RUN_LEN,
        }
    }
}
