use serde::{Deserialize, Serialize};

use crate::error::JobError;
use crate::task::TaskDescriptor;

/// Which stage of a job produced its failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobErrorKind {
    Processor,
    Provider,
    Write,
    Panicked,
}

impl JobErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processor => "processor",
            Self::Provider => "provider",
            Self::Write => "write",
            Self::Panicked => "panicked",
        }
    }
}

impl From<&JobError> for JobErrorKind {
    fn from(err: &JobError) -> Self {
        match err {
            JobError::Processor(_) => Self::Processor,
            JobError::Provider(_) => Self::Provider,
            JobError::Write(_) => Self::Write,
        }
    }
}

/// Outcome of a single dispatched job.
///
/// `error` and `error_kind` are present iff `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub task_id: String,
    pub name: String,
    pub destination: String,
    pub success: bool,
    /// Dispatch to settle, in milliseconds.
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<JobErrorKind>,
}

impl JobResult {
    pub fn succeeded(task: &TaskDescriptor, duration_ms: u64) -> Self {
        Self {
            task_id: task.id.clone(),
            name: task.name.clone(),
            destination: task.destination.clone(),
            success: true,
            duration_ms,
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(
        task: &TaskDescriptor,
        duration_ms: u64,
        kind: JobErrorKind,
        error: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task.id.clone(),
            name: task.name.clone(),
            destination: task.destination.clone(),
            success: false,
            duration_ms,
            error: Some(error.into()),
            error_kind: Some(kind),
        }
    }
}

/// Everything `ExecutionEngine::execute` hands back for one batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRun {
    pub run_id: String,
    /// One entry per submitted task, in completion order.
    pub results: Vec<JobResult>,
    pub total_duration_ms: u64,
}

impl BatchRun {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }
}
