use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::FutureExt;
use uuid::Uuid;

use crate::error::{ExecutorError, JobError};
use crate::task::TaskDescriptor;

use super::progress::ProgressMonitor;
use super::scheduler::run_bounded;
use super::traits::{
    CodeExtractor, FencedCodeExtractor, GenerationBackend, OutputRendererPlugin, OutputWriter,
    RenderEvent, TaskProcessorPlugin,
};
use super::types::{BatchRun, ExecutionOpts, JobErrorKind, JobResult};

/// Dispatches task descriptors to the generation backend with a concurrency
/// ceiling, writing each extracted payload to its destination.
pub struct ExecutionEngine {
    opts: ExecutionOpts,
    backend: Arc<dyn GenerationBackend>,
    writer: Arc<dyn OutputWriter>,
    extractor: Arc<dyn CodeExtractor>,
    processors: Vec<Arc<dyn TaskProcessorPlugin>>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
}

pub struct ExecutionEngineBuilder {
    opts: ExecutionOpts,
    backend: Arc<dyn GenerationBackend>,
    writer: Arc<dyn OutputWriter>,
    extractor: Arc<dyn CodeExtractor>,
    processors: Vec<Arc<dyn TaskProcessorPlugin>>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
}

impl ExecutionEngine {
    pub fn new(
        opts: ExecutionOpts,
        backend: Arc<dyn GenerationBackend>,
        writer: Arc<dyn OutputWriter>,
    ) -> Self {
        Self::builder(opts, backend, writer).build()
    }

    pub fn builder(
        opts: ExecutionOpts,
        backend: Arc<dyn GenerationBackend>,
        writer: Arc<dyn OutputWriter>,
    ) -> ExecutionEngineBuilder {
        ExecutionEngineBuilder::new(opts, backend, writer)
    }

    pub fn opts(&self) -> &ExecutionOpts {
        &self.opts
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Run every task once. Per-task failures are recorded in the returned
    /// results; the call itself only fails when task ids are not unique.
    pub async fn execute(&self, tasks: &[TaskDescriptor]) -> Result<BatchRun, ExecutorError> {
        ensure_unique_ids(tasks)?;

        let run_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        self.emit_run_start(&run_id, tasks.len());

        let progress = Mutex::new(ProgressMonitor::new(tasks.len(), self.opts.progress_bar));

        let jobs: Vec<_> = tasks
            .iter()
            .map(|task| {
                let run_id = run_id.as_str();
                let progress = &progress;
                move || self.run_job(run_id, task, progress)
            })
            .collect();

        let results = run_bounded(jobs, self.opts.concurrency).await;

        let run = BatchRun {
            run_id,
            results,
            total_duration_ms: start.elapsed().as_millis() as u64,
        };

        if let Ok(monitor) = progress.lock() {
            monitor.finish();
        }
        self.emit_run_end(&run);

        Ok(run)
    }

    async fn run_job(
        &self,
        run_id: &str,
        task: &TaskDescriptor,
        progress: &Mutex<ProgressMonitor>,
    ) -> JobResult {
        let started = Instant::now();

        self.emit_task_start(run_id, task);
        if let Ok(mut monitor) = progress.lock() {
            monitor.add_task(&task.id, &task.name);
        }

        let outcome = AssertUnwindSafe(self.process_task(task))
            .catch_unwind()
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(())) => JobResult::succeeded(task, duration_ms),
            Ok(Err(err)) => JobResult::failed(task, duration_ms, (&err).into(), err.to_string()),
            Err(panic) => JobResult::failed(
                task,
                duration_ms,
                JobErrorKind::Panicked,
                format!("job panicked: {}", panic_message(panic.as_ref())),
            ),
        };

        if let Ok(mut monitor) = progress.lock() {
            monitor.complete_task(&task.id, result.success, duration_ms);
        }
        self.emit_task_complete(run_id, &result);

        result
    }

    /// Build the prompt, generate, extract and write.
    async fn process_task(&self, task: &TaskDescriptor) -> Result<(), JobError> {
        let mut prompt = task.instructions.clone();
        for processor in &self.processors {
            prompt = processor.process(task, &prompt).await?;
        }

        let raw = self.backend.generate(&prompt, task.model.as_deref()).await?;
        let payload = self.extractor.extract(&raw)?;
        self.writer.write(&task.destination, payload.trim()).await?;

        Ok(())
    }

    fn emit_run_start(&self, run_id: &str, total_tasks: usize) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::RunStart {
                run_id: run_id.to_string(),
                total_tasks,
                concurrency: self.opts.concurrency,
            });
        } else {
            tracing::info!(
                run_id,
                total_tasks,
                concurrency = self.opts.concurrency,
                backend = self.backend.name(),
                "run started"
            );
        }
    }

    fn emit_task_start(&self, run_id: &str, task: &TaskDescriptor) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::TaskStart {
                run_id: run_id.to_string(),
                task_id: task.id.clone(),
                name: task.name.clone(),
            });
        } else {
            tracing::debug!(run_id, task_id = %task.id, name = %task.name, "job started");
        }
    }

    fn emit_task_complete(&self, run_id: &str, result: &JobResult) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::TaskComplete {
                run_id: run_id.to_string(),
                result: result.clone(),
            });
        } else if result.success {
            tracing::info!(
                run_id,
                task_id = %result.task_id,
                duration_ms = result.duration_ms,
                "job succeeded"
            );
        } else {
            tracing::warn!(
                run_id,
                task_id = %result.task_id,
                duration_ms = result.duration_ms,
                error = result.error.as_deref().unwrap_or_default(),
                "job failed"
            );
        }
    }

    fn emit_run_end(&self, run: &BatchRun) {
        let succeeded = run.success_count();
        let failed = run.failure_count();
        if let Some(renderer) = &self.renderer {
            renderer.render(&RenderEvent::RunEnd {
                run_id: run.run_id.clone(),
                total_tasks: run.results.len(),
                succeeded,
                failed,
                duration_ms: run.total_duration_ms,
            });
        } else {
            tracing::info!(
                run_id = %run.run_id,
                succeeded,
                failed,
                duration_ms = run.total_duration_ms,
                "run finished"
            );
        }
    }
}

impl ExecutionEngineBuilder {
    pub fn new(
        opts: ExecutionOpts,
        backend: Arc<dyn GenerationBackend>,
        writer: Arc<dyn OutputWriter>,
    ) -> Self {
        Self {
            opts,
            backend,
            writer,
            extractor: Arc::new(FencedCodeExtractor::default()),
            processors: Vec::new(),
            renderer: None,
        }
    }

    pub fn extractor(mut self, extractor: Arc<dyn CodeExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn processors(mut self, processors: Vec<Arc<dyn TaskProcessorPlugin>>) -> Self {
        let mut sorted = processors;
        sorted.sort_by_key(|p| std::cmp::Reverse(p.priority()));
        self.processors = sorted;
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn OutputRendererPlugin>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(self) -> ExecutionEngine {
        ExecutionEngine {
            opts: self.opts,
            backend: self.backend,
            writer: self.writer,
            extractor: self.extractor,
            processors: self.processors,
            renderer: self.renderer,
        }
    }
}

fn ensure_unique_ids(tasks: &[TaskDescriptor]) -> Result<(), ExecutorError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(ExecutorError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProcessorError, ProviderError, WriteError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Echoes the prompt in a fenced block; fails or panics on marker words.
    struct ScriptedBackend {
        active: AtomicUsize,
        peak: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        models: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                models: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            prompt: &str,
            model: Option<&str>,
        ) -> Result<String, ProviderError> {
            self.models.lock().unwrap().push(model.map(str::to_string));
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            if prompt.contains("FAIL") {
                return Err(ProviderError::Http {
                    status: 500,
                    message: "boom".into(),
                });
            }
            if prompt.contains("PANIC") {
                panic!("backend exploded");
            }
            Ok(format!("Sure!\n```tsx\n  {}  \n```\n", prompt))
        }
    }

    #[derive(Default)]
    struct MemoryWriter {
        files: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl OutputWriter for MemoryWriter {
        fn name(&self) -> &str {
            "memory"
        }

        async fn write(&self, destination: &str, payload: &str) -> Result<(), WriteError> {
            if destination.starts_with("readonly/") {
                return Err(WriteError::InvalidDestination(destination.to_string()));
            }
            self.files
                .lock()
                .unwrap()
                .insert(destination.to_string(), payload.to_string());
            Ok(())
        }
    }

    struct Prefix(&'static str, i32);

    #[async_trait]
    impl TaskProcessorPlugin for Prefix {
        fn name(&self) -> &str {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }

        async fn process(
            &self,
            _task: &TaskDescriptor,
            content: &str,
        ) -> Result<String, ProcessorError> {
            Ok(format!("{} {}", self.0, content))
        }
    }

    struct Reject;

    #[async_trait]
    impl TaskProcessorPlugin for Reject {
        fn name(&self) -> &str {
            "reject"
        }

        async fn process(
            &self,
            task: &TaskDescriptor,
            content: &str,
        ) -> Result<String, ProcessorError> {
            if task.id == "bad" {
                Err(ProcessorError::InvalidInput("rejected".into()))
            } else {
                Ok(content.to_string())
            }
        }
    }

    #[derive(Default)]
    struct CollectingRenderer {
        events: Mutex<Vec<String>>,
    }

    impl OutputRendererPlugin for CollectingRenderer {
        fn name(&self) -> &str {
            "collect"
        }

        fn format(&self) -> &str {
            "test"
        }

        fn render(&self, event: &RenderEvent) {
            let tag = match event {
                RenderEvent::RunStart { .. } => "run_start".to_string(),
                RenderEvent::TaskStart { task_id, .. } => format!("start:{task_id}"),
                RenderEvent::TaskComplete { result, .. } => format!("done:{}", result.task_id),
                RenderEvent::RunEnd { failed, .. } => format!("run_end:{failed}"),
            };
            self.events.lock().unwrap().push(tag);
        }
    }

    fn task(id: &str, instructions: &str) -> TaskDescriptor {
        TaskDescriptor::new(id, id, instructions, format!("out/{id}.tsx"))
    }

    fn engine(
        concurrency: usize,
        backend: Arc<ScriptedBackend>,
        writer: Arc<MemoryWriter>,
    ) -> ExecutionEngineBuilder {
        let opts = ExecutionOpts::default().with_concurrency(concurrency);
        ExecutionEngine::builder(opts, backend, writer)
    }

    #[tokio::test]
    async fn mixed_batch_reports_every_job() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(2, backend.clone(), writer.clone()).build();

        let tasks = vec![task("a", "make a"), task("b", "FAIL b"), task("c", "make c")];
        let run = engine.execute(&tasks).await.unwrap();

        assert_eq!(run.results.len(), 3);
        assert_eq!(run.failure_count(), 1);
        assert!(backend.peak.load(Ordering::SeqCst) <= 2);

        let failed = run.results.iter().find(|r| !r.success).unwrap();
        assert_eq!(failed.task_id, "b");
        assert_eq!(failed.error_kind, Some(JobErrorKind::Provider));
        assert_eq!(failed.error.as_deref(), Some("http status 500: boom"));

        let files = writer.files.lock().unwrap();
        assert_eq!(files.get("out/a.tsx").map(String::as_str), Some("make a"));
        assert_eq!(files.get("out/c.tsx").map(String::as_str), Some("make c"));
        assert!(!files.contains_key("out/b.tsx"));
    }

    #[tokio::test]
    async fn panicking_job_is_isolated() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(3, backend, writer).build();

        let tasks = vec![task("a", "ok"), task("p", "PANIC"), task("c", "ok")];
        let run = engine.execute(&tasks).await.unwrap();

        assert_eq!(run.success_count(), 2);
        let panicked = run.results.iter().find(|r| r.task_id == "p").unwrap();
        assert_eq!(panicked.error_kind, Some(JobErrorKind::Panicked));
        assert!(panicked.error.as_deref().unwrap().contains("backend exploded"));
    }

    #[tokio::test]
    async fn write_and_processor_failures_are_classified() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(4, backend, writer)
            .processors(vec![Arc::new(Reject)])
            .build();

        let mut readonly = task("ro", "ok");
        readonly.destination = "readonly/x.tsx".into();
        let tasks = vec![readonly, task("bad", "ok"), task("fine", "ok")];
        let run = engine.execute(&tasks).await.unwrap();

        let kind_of = |id: &str| {
            run.results
                .iter()
                .find(|r| r.task_id == id)
                .and_then(|r| r.error_kind)
        };
        assert_eq!(kind_of("ro"), Some(JobErrorKind::Write));
        assert_eq!(kind_of("bad"), Some(JobErrorKind::Processor));
        assert_eq!(kind_of("fine"), None);
    }

    #[tokio::test]
    async fn processors_run_by_descending_priority() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(1, backend.clone(), writer)
            .processors(vec![Arc::new(Prefix("low", 1)), Arc::new(Prefix("high", 10))])
            .build();

        engine.execute(&[task("a", "body")]).await.unwrap();

        // high runs first, so low ends up outermost
        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), ["low high body"]);
    }

    #[tokio::test]
    async fn task_model_is_forwarded_to_backend() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(1, backend.clone(), writer).build();

        let tasks = vec![
            task("a", "x").with_model("gemini-1.5-pro"),
            task("b", "y"),
        ];
        engine.execute(&tasks).await.unwrap();

        let models = backend.models.lock().unwrap();
        assert_eq!(
            models.as_slice(),
            [Some("gemini-1.5-pro".to_string()), None]
        );
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(2, backend.clone(), writer).build();

        let err = engine
            .execute(&[task("a", "x"), task("a", "y")])
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutorError::DuplicateTaskId(id) if id == "a"));
        assert!(backend.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn renderer_sees_lifecycle_events() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let renderer = Arc::new(CollectingRenderer::default());
        let engine = engine(1, backend, writer)
            .renderer(renderer.clone())
            .build();

        engine
            .execute(&[task("a", "x"), task("b", "FAIL")])
            .await
            .unwrap();

        let events = renderer.events.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            ["run_start", "start:a", "done:a", "start:b", "done:b", "run_end:1"]
        );
    }

    #[test]
    fn empty_batch_completes_without_jobs() {
        let backend = Arc::new(ScriptedBackend::new());
        let writer = Arc::new(MemoryWriter::default());
        let engine = engine(5, backend, writer).build();

        let run = tokio_test::block_on(engine.execute(&[])).unwrap();
        assert!(run.results.is_empty());
        assert!(run.all_succeeded());
    }
}
