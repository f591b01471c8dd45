//! `run` and `generate`: both end in a dispatched batch and a report.

use std::sync::Arc;

use enkai_core::api::{
    format_report, load_preset, load_template, model_breakdown, parse_template, route_models,
    save_report, split, summarize, AppConfig, CliError, ExecutionOpts, OutputWriter,
    TaskDescriptor,
};
use enkai_plugins::factory::{build_backend, build_engine_with};
use enkai_plugins::writer::FsOutputWriter;

use crate::commands::cli::{DispatchArgs, GenerateArgs, RunArgs};

pub async fn handle_run(args: RunArgs, cfg: AppConfig) -> Result<i32, CliError> {
    let tasks = load_run_tasks(&args)?;
    dispatch_tasks(tasks, &args.dispatch, cfg).await
}

fn load_run_tasks(args: &RunArgs) -> Result<Vec<TaskDescriptor>, CliError> {
    if let Some(path) = &args.template {
        let tasks = load_template(path)?;
        tracing::info!(template = %path, tasks = tasks.len(), "template loaded");
        Ok(tasks)
    } else if let Some(name) = &args.preset {
        let tasks = load_preset(name)?;
        tracing::info!(preset = %name, tasks = tasks.len(), "preset loaded");
        Ok(tasks)
    } else if let Some(json) = &args.tasks_json {
        let tasks = parse_template(json)?;
        tracing::info!(tasks = tasks.len(), "inline tasks parsed");
        Ok(tasks)
    } else {
        Err(CliError::Config(
            "one of --template, --preset or --tasks-json is required".to_string(),
        ))
    }
}

pub async fn handle_generate(args: GenerateArgs, cfg: AppConfig) -> Result<i32, CliError> {
    let result = split(&args.description, &args.files);
    tracing::info!(
        batch_id = %result.batch_id,
        tasks = result.tasks.len(),
        estimated = %result.estimated_time,
        "description split"
    );
    dispatch_tasks(result.tasks, &args.dispatch, cfg).await
}

/// Fold command-line flags over the loaded config.
pub(crate) fn apply_overrides(cfg: &mut AppConfig, args: &DispatchArgs) -> Result<(), CliError> {
    if let Some(concurrency) = args.concurrency {
        cfg.executor.concurrency = concurrency;
    }
    if let Some(mode) = &args.mode {
        cfg.generation.mode = mode.parse().map_err(CliError::Config)?;
    }
    if args.no_preamble {
        cfg.executor.preamble_enabled = false;
    }
    if let Some(dir) = &args.report_dir {
        cfg.report.directory = dir.clone();
    }
    if args.no_report {
        cfg.report.enabled = false;
    }
    if args.smart {
        cfg.generation.auto_model = true;
    }
    Ok(())
}

async fn dispatch_tasks(
    mut tasks: Vec<TaskDescriptor>,
    args: &DispatchArgs,
    mut cfg: AppConfig,
) -> Result<i32, CliError> {
    apply_overrides(&mut cfg, args)?;

    if tasks.is_empty() {
        println!("No tasks to dispatch.");
        return Ok(0);
    }

    route_models(&mut tasks, cfg.generation.auto_model);
    for (model, count) in model_breakdown(&tasks, &cfg.generation.model) {
        tracing::info!(model = %model, tasks = count, "model assignment");
    }

    let jsonl = args.stream_format == "jsonl";
    let opts = ExecutionOpts::from_config(&cfg.executor, &args.stream_format, args.quiet);

    let backend = build_backend(&cfg).map_err(|e| CliError::Config(e.to_string()))?;
    let writer: Arc<dyn OutputWriter> = match &args.output_root {
        Some(root) => Arc::new(FsOutputWriter::with_root(root)),
        None => Arc::new(FsOutputWriter::new()),
    };
    let engine = build_engine_with(&cfg, opts, backend, writer)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let run = engine.execute(&tasks).await?;
    let summary = summarize(&run.results, run.total_duration_ms)?;

    if jsonl {
        let line = serde_json::to_string(&summary)
            .map_err(|e| CliError::Command(format!("failed to encode summary: {e}")))?;
        println!("{line}");
    } else {
        print!("{}", format_report(&summary));
    }

    if cfg.report.enabled {
        // Generated files are already on disk, so a failed report only warns.
        match save_report(&cfg.report.directory, &summary).await {
            Ok(path) if !jsonl => println!("Report: {}", path.display()),
            Ok(path) => tracing::info!(path = %path.display(), "report saved"),
            Err(e) => tracing::warn!(
                directory = %cfg.report.directory,
                error = %e,
                "failed to save report"
            ),
        }
    }

    Ok(if summary.all_succeeded() { 0 } else { 1 })
}
