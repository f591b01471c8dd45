//! `list`, `split` and `estimate`: offline commands, nothing is dispatched.

use std::fmt::Write as _;

use enkai_core::api::{
    estimate_cost, presets, render_execution_plan, render_task_brief, split, AppConfig, CliError,
    EstimateOptions,
};

use crate::commands::cli::{EstimateArgs, SplitArgs};

pub fn handle_list() -> Result<i32, CliError> {
    print!("{}", render_preset_list()?);
    Ok(0)
}

fn render_preset_list() -> Result<String, CliError> {
    let mut out = String::from("Built-in presets:\n\n");
    for preset in presets() {
        let tasks = preset.tasks()?;
        let _ = writeln!(out, "  {} ({} tasks)", preset.name, tasks.len());
        let _ = writeln!(out, "    {}", preset.description);
        for task in &tasks {
            let _ = writeln!(out, "      - {} -> {}", task.name, task.destination);
        }
        out.push('\n');
    }
    out.push_str("Usage: enkai run --preset <NAME>\n");
    Ok(out)
}

pub fn handle_split(args: SplitArgs) -> Result<i32, CliError> {
    let result = split(&args.description, &args.files);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::Command(format!("failed to encode split: {e}")))?;
        println!("{json}");
        return Ok(0);
    }

    if args.briefs {
        for task in &result.tasks {
            println!("{}", render_task_brief(task));
        }
        println!("{}", render_execution_plan(&result));
        return Ok(0);
    }

    println!(
        "Batch {} ({} tasks, estimated {})",
        result.batch_id, result.total_files, result.estimated_time
    );
    for task in &result.tasks {
        println!(
            "  [{}] {} ({}, {}): {}",
            task.id,
            task.name,
            task.task_kind.as_str(),
            task.priority.as_str(),
            task.instructions
        );
    }
    Ok(0)
}

pub fn handle_estimate(args: EstimateArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let options = EstimateOptions {
        target_files: args.files,
        model: args.model.unwrap_or_else(|| cfg.estimate.model.clone()),
        average_output_tokens: args
            .avg_output_tokens
            .unwrap_or(cfg.estimate.average_output_tokens),
    };

    let estimate = estimate_cost(&args.description, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&estimate)
            .map_err(|e| CliError::Command(format!("failed to encode estimate: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", estimate.details());
    }
    Ok(0)
}
