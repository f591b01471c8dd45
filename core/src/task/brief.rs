//! Markdown hand-off documents for tasks that are worked on outside the
//! executor (one worker session per task).

use std::fmt::Write;

use super::splitter::SplitResult;
use super::types::TaskDescriptor;

pub fn render_task_brief(task: &TaskDescriptor) -> String {
    format!(
        "# Enkai task: {id}\n\n\
         ## Overview\n{instructions}\n\n\
         ## Kind\n{kind}\n\n\
         ## Priority\n{priority}\n\n\
         ## Expected result\n{expected}\n\n\
         ## Steps\n\
         1. Read this brief\n\
         2. Carry out the task\n\
         3. Keep the implementation self-contained\n   \
         - one file, one complete feature\n   \
         - minimal external dependencies\n   \
         - duplicated code is acceptable\n\
         4. Update the task status when done\n\n\
         ## Notes\n\
         - Other tasks run in parallel with this one\n\
         - Only edit `{destination}` to avoid conflicts\n\
         - Commit once finished\n\n\
         ---\n\
         Status: {status}\n\
         Created at: {created}\n",
        id = task.id,
        instructions = task.instructions,
        kind = task.task_kind.as_str(),
        priority = task.priority.as_str(),
        expected = task.expected_result,
        destination = task.destination,
        status = task.status.as_str(),
        created = task.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

pub fn render_execution_plan(split: &SplitResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Enkai parallel execution plan\n");
    let _ = writeln!(out, "## Setup");
    let _ = writeln!(out, "1. Open {} worker sessions", split.total_files);
    let _ = writeln!(out, "2. Assign one brief to each worker:");
    for task in &split.tasks {
        let ordinal = task.id.rsplit('-').next().unwrap_or(&task.id);
        let _ = writeln!(out, "   - worker-{}: {}", ordinal, task.name);
    }
    let _ = writeln!(out, "\n## Run");
    let _ = writeln!(out, "1. Paste each brief into its worker");
    let _ = writeln!(out, "2. Start all workers at the same time");
    let _ = writeln!(out, "3. Commit results as they finish");
    let _ = writeln!(out, "\n## Merge");
    let _ = writeln!(out, "1. Merge into main once every task is complete");
    let _ = writeln!(out, "2. Conflicts should not occur since each task owns one file");
    let _ = writeln!(out, "\nEstimated completion time: {}", split.estimated_time);
    out
}
