//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `enkai_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, EstimateConfig, ExecutorConfig, GenerationConfig, GenerationMode,
    LoggingConfig, ReportConfig, DEFAULT_PREAMBLE,
};
pub use crate::error::{
    CliError, EstimateError, ExecutorError, JobError, ProcessorError, ProviderError, ReportError,
    StoreError, TemplateError, WriteError,
};
pub use crate::estimate::{count_tokens, estimate_cost, CostEstimate, EstimateOptions, PriceTier};
pub use crate::executor::traits::{
    CodeExtractor, FencedCodeExtractor, GenerationBackend, OutputRendererPlugin, OutputWriter,
    RawTextExtractor, RenderEvent, TaskProcessorPlugin,
};
pub use crate::executor::{
    run_bounded, BatchRun, ExecutionEngine, ExecutionEngineBuilder, ExecutionOpts, JobErrorKind,
    JobResult,
};
pub use crate::report::{format_report, save_report, summarize, BatchSummary, TaskOutcome};
pub use crate::task::{
    load_preset, load_template, model_breakdown, parse_template, presets, render_execution_plan,
    render_task_brief, route_models, split, Priority,
    SplitResult, TaskDescriptor, TaskKind, TaskStatus, TaskStore, TaskSummary,
};
