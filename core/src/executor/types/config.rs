use crate::config::ExecutorConfig;

pub const DEFAULT_CONCURRENCY: usize = 5;

/// Per-batch execution options.
#[derive(Debug, Clone)]
pub struct ExecutionOpts {
    /// Maximum number of jobs in flight at once. `0` is treated as `1`.
    pub concurrency: usize,

    /// Output stream format: "text" or "jsonl"
    pub stream_format: String,

    /// Enable visual progress bar (disabled for jsonl output)
    pub progress_bar: bool,

    /// Quiet mode (suppress non-essential output)
    pub quiet: bool,
}

impl Default for ExecutionOpts {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            stream_format: "text".to_string(),
            progress_bar: false,
            quiet: false,
        }
    }
}

impl ExecutionOpts {
    /// Build options from the `[executor]` config section.
    pub fn from_config(cfg: &ExecutorConfig, stream_format: &str, quiet: bool) -> Self {
        // Progress bar only for text output and when not quiet
        let progress_bar = cfg.progress_bar && stream_format == "text" && !quiet;

        Self {
            concurrency: cfg.concurrency,
            stream_format: stream_format.to_string(),
            progress_bar,
            quiet,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}
