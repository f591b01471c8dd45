use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::executor::{JobErrorKind, JobResult};

/// Per-task line of a batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutcome {
    pub task_id: String,
    pub name: String,
    pub destination: String,
    pub success: bool,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<JobErrorKind>,
}

impl From<&JobResult> for TaskOutcome {
    fn from(result: &JobResult) -> Self {
        Self {
            task_id: result.task_id.clone(),
            name: result.name.clone(),
            destination: result.destination.clone(),
            success: result.success,
            duration_ms: result.duration_ms,
            error: result.error.clone(),
            error_kind: result.error_kind,
        }
    }
}

/// Machine-readable aggregate of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub timestamp: DateTime<Utc>,
    pub total_duration_ms: u64,
    pub total_tasks: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// `round(total_duration_ms / total_tasks)`, wall clock not per-job time.
    pub average_duration_ms: u64,
    pub tasks: Vec<TaskOutcome>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }
}

pub fn summarize(
    results: &[JobResult],
    total_wall_clock_ms: u64,
) -> Result<BatchSummary, ReportError> {
    if results.is_empty() {
        return Err(ReportError::EmptyBatch);
    }

    let total_tasks = results.len();
    let success_count = results.iter().filter(|r| r.success).count();
    let average_duration_ms = (total_wall_clock_ms as f64 / total_tasks as f64).round() as u64;

    Ok(BatchSummary {
        timestamp: Utc::now(),
        total_duration_ms: total_wall_clock_ms,
        total_tasks,
        success_count,
        failure_count: total_tasks - success_count,
        average_duration_ms,
        tasks: results.iter().map(TaskOutcome::from).collect(),
    })
}
