use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::infer_task_kind;

/// What a task asks the model to do, inferred from its instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Create,
    Modify,
    Refactor,
    Fix,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Refactor => "refactor",
            Self::Fix => "fix",
        }
    }
}

/// Ordering hint used for reporting only; dispatch order ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// First task of a batch is `High`, the rest `Medium`.
    pub fn for_position(index: usize) -> Self {
        if index == 0 {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Assigned,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }
}

/// How demanding a task is; drives per-task model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

/// One unit of generation work.
///
/// `instructions` and `id` never change after construction; `status` and the
/// assignment fields are only touched through [`crate::task::TaskStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    pub id: String,
    pub name: String,
    pub instructions: String,
    pub destination: String,
    pub priority: Priority,
    pub task_kind: TaskKind,
    pub status: TaskStatus,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub expected_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Generation model for this task; `None` uses the backend default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

impl TaskDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        instructions: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        let instructions = instructions.into();
        Self {
            id: id.into(),
            name: name.into(),
            task_kind: infer_task_kind(&instructions),
            expected_result: expected_result_for(&instructions),
            instructions,
            destination: destination.into(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            assigned_to: None,
            created_at: Utc::now(),
            completed_at: None,
            model: None,
            complexity: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }
}

pub(crate) fn expected_result_for(instructions: &str) -> String {
    format!("{} is complete", instructions.trim())
}

/// Counts of tasks per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub assigned: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_pending_with_inferred_kind() {
        let task = TaskDescriptor::new("t-1", "Login.tsx", "Fix the login bug", "out/Login.tsx");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.task_kind, TaskKind::Fix);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.expected_result, "Fix the login bug is complete");
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn priority_by_position() {
        assert_eq!(Priority::for_position(0), Priority::High);
        assert_eq!(Priority::for_position(1), Priority::Medium);
        assert_eq!(Priority::for_position(7), Priority::Medium);
    }

    #[test]
    fn serializes_kind_lowercase() {
        let task = TaskDescriptor::new("t-1", "a", "refactor it", "a");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["taskKind"], "refactor");
        assert_eq!(value["status"], "pending");
    }
}
