use enkai_core::api::{OutputRendererPlugin, RenderEvent};

pub struct TextRendererPlugin {
    ascii_only: bool,
}

impl TextRendererPlugin {
    pub fn new(ascii_only: bool) -> Self {
        Self { ascii_only }
    }

    fn format_event(&self, event: &RenderEvent) -> String {
        match event {
            RenderEvent::RunStart {
                run_id,
                total_tasks,
                concurrency,
            } => format!(
                "RUN START {} (jobs: {}, concurrency: {})",
                run_id, total_tasks, concurrency
            ),
            RenderEvent::TaskStart {
                run_id,
                task_id,
                name,
            } => format!("TASK START {} (task {}, {})", run_id, task_id, name),
            RenderEvent::TaskComplete { run_id, result } => {
                let status = match (result.success, self.ascii_only) {
                    (true, true) => "OK",
                    (true, false) => "✓ SUCCESS",
                    (false, true) => "FAIL",
                    (false, false) => "✗ FAILED",
                };
                let mut line = format!(
                    "TASK END {} (task {}, status {}, duration {}ms) -> {}",
                    run_id, result.task_id, status, result.duration_ms, result.destination
                );
                if let Some(error) = &result.error {
                    line.push_str(&format!("\n  Error: {}", error));
                }
                line
            }
            RenderEvent::RunEnd {
                run_id,
                total_tasks,
                succeeded,
                failed,
                duration_ms,
            } => format!(
                "RUN END {} (jobs {}, succeeded {}, failed {}, duration {}ms)",
                run_id, total_tasks, succeeded, failed, duration_ms
            ),
        }
    }
}

impl OutputRendererPlugin for TextRendererPlugin {
    fn name(&self) -> &str {
        "text-renderer"
    }

    fn format(&self) -> &str {
        "text"
    }

    fn render(&self, event: &RenderEvent) {
        println!("{}", self.format_event(event));
    }
}
