use thiserror::Error;

/// Batch-level executor errors. Per-job failures never surface here; they are
/// recorded on the job's `JobResult` instead.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Duplicate task ID: {0}")]
    DuplicateTaskId(String),
}

/// Errors raised while turning a task into a prompt.
#[derive(Error, Debug, Clone)]
pub enum ProcessorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The generation capability failed or returned output that cannot be used.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("generation returned no content")]
    EmptyResponse,

    #[error("unusable output: {0}")]
    UnusableOutput(String),
}

/// Persisting a job's payload to its destination failed.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("failed to write {destination}: {source}")]
    Io {
        destination: String,
        source: std::io::Error,
    },
}

impl WriteError {
    pub fn io(destination: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            destination: destination.into(),
            source,
        }
    }
}

/// Anything that can fail a single job. Contained at the job boundary and
/// recorded on its `JobResult`.
#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
