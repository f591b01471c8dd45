use std::collections::HashMap;

use chrono::{Local, Utc};

use crate::error::StoreError;

use super::splitter::{SplitResult, MINUTES_PER_TASK};
use super::types::{TaskDescriptor, TaskStatus, TaskSummary};

/// Caller-owned working set of tasks.
///
/// Tasks keep their registration order. Registering a task whose id is
/// already present replaces the stored copy in place.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<TaskDescriptor>,
    index: HashMap<String, usize>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, task: TaskDescriptor) {
        match self.index.get(&task.id) {
            Some(&pos) => self.tasks[pos] = task,
            None => {
                self.index.insert(task.id.clone(), self.tasks.len());
                self.tasks.push(task);
            }
        }
    }

    pub fn register(&mut self, split: &SplitResult) {
        for task in &split.tasks {
            self.insert(task.clone());
        }
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskDescriptor> {
        self.index.get(task_id).map(|&pos| &self.tasks[pos])
    }

    pub fn tasks(&self) -> &[TaskDescriptor] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn update_status(
        &mut self,
        task_id: &str,
        status: TaskStatus,
        assigned_to: Option<&str>,
    ) -> Result<(), StoreError> {
        let pos = *self
            .index
            .get(task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        let task = &mut self.tasks[pos];

        task.status = status;
        if let Some(who) = assigned_to {
            task.assigned_to = Some(who.to_string());
        }
        if status == TaskStatus::Completed {
            task.completed_at = Some(Utc::now());
        }

        tracing::debug!(task_id = %task_id, status = status.as_str(), "task status updated");
        Ok(())
    }

    pub fn summary(&self) -> TaskSummary {
        let count = |status: TaskStatus| self.tasks.iter().filter(|t| t.status == status).count();
        TaskSummary {
            total: self.tasks.len(),
            completed: count(TaskStatus::Completed),
            pending: count(TaskStatus::Pending),
            assigned: count(TaskStatus::Assigned),
        }
    }

    pub fn progress_report(&self) -> String {
        let summary = self.summary();
        let percentage = if summary.total > 0 {
            ((summary.completed as f64 / summary.total as f64) * 100.0).round() as u32
        } else {
            0
        };

        format!(
            "# Enkai progress report\n\n\
             ## Overall progress: {}%\n\n\
             ## Tasks\n\
             - Total: {}\n\
             - Completed: {}\n\
             - In progress: {}\n\
             - Pending: {}\n\n\
             ## Estimated time remaining\n\
             About {} minutes ({} pending x {} minutes/task)\n\n\
             Generated at: {}\n",
            percentage,
            summary.total,
            summary.completed,
            summary.assigned,
            summary.pending,
            summary.pending * MINUTES_PER_TASK,
            summary.pending,
            MINUTES_PER_TASK,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
        )
    }

    /// Drop the whole working set.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.index.clear();
    }
}
