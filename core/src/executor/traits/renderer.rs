use crate::executor::types::JobResult;

/// Output renderer plugin (controls how batch events are presented).
pub trait OutputRendererPlugin: Send + Sync {
    fn name(&self) -> &str;
    fn format(&self) -> &str;
    fn render(&self, event: &RenderEvent);
}

#[derive(Debug, Clone)]
pub enum RenderEvent {
    RunStart {
        run_id: String,
        total_tasks: usize,
        concurrency: usize,
    },
    TaskStart {
        run_id: String,
        task_id: String,
        name: String,
    },
    TaskComplete {
        run_id: String,
        result: JobResult,
    },
    RunEnd {
        run_id: String,
        total_tasks: usize,
        succeeded: usize,
        failed: usize,
        duration_ms: u64,
    },
}
