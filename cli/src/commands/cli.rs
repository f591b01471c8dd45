use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "enkai",
    version,
    about = "Split coding objectives into sub-tasks and generate them in parallel"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in presets.
    List,
    /// Split a description into sub-tasks and print them.
    Split(SplitArgs),
    /// Estimate token usage and API cost for a description.
    Estimate(EstimateArgs),
    /// Dispatch the tasks of a JSON template, a preset or inline JSON.
    Run(RunArgs),
    /// Split a description, then dispatch the resulting tasks.
    Generate(GenerateArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SplitArgs {
    pub description: String,

    /// Target file; may be given multiple times.
    #[arg(long = "file", action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    /// Print the split as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print a markdown brief per task and the parallel execution plan.
    #[arg(long, conflicts_with = "json")]
    pub briefs: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EstimateArgs {
    pub description: String,

    #[arg(long = "file", action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    /// Price tier: economy (flash) or premium (pro). Defaults to `[estimate] model`.
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub avg_output_tokens: Option<u64>,

    #[arg(long)]
    pub json: bool,
}

/// Options shared by every command that dispatches jobs.
#[derive(ClapArgs, Debug, Clone)]
pub struct DispatchArgs {
    /// Maximum jobs in flight (overrides `[executor] concurrency`).
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    #[arg(long, default_value = "text", value_parser = ["text", "jsonl"])]
    pub stream_format: String,

    /// normal, strict or creative (overrides `[generation] mode`).
    #[arg(long)]
    pub mode: Option<String>,

    /// Send prompts without the policy preamble.
    #[arg(long)]
    pub no_preamble: bool,

    /// Resolve relative destinations against this directory.
    #[arg(long)]
    pub output_root: Option<String>,

    /// Directory for the JSON report (overrides `[report] directory`).
    #[arg(long)]
    pub report_dir: Option<String>,

    /// Do not write a JSON report.
    #[arg(long, conflicts_with = "report_dir")]
    pub no_report: bool,

    /// Pick a model per task from prompt complexity when none is given.
    #[arg(long)]
    pub smart: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ClapArgs, Debug, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["template", "preset", "tasks_json"])
))]
pub struct RunArgs {
    /// Path to a JSON array of {fileName, prompt, outputPath[, model, complexity]}.
    #[arg(long)]
    pub template: Option<String>,

    /// Name of a built-in preset (see `enkai list`).
    #[arg(long)]
    pub preset: Option<String>,

    /// The task array itself, as a JSON string.
    #[arg(long)]
    pub tasks_json: Option<String>,

    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    pub description: String,

    #[arg(long = "file", action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_files() {
        let args = Args::try_parse_from([
            "enkai",
            "split",
            "Create a.ts. Create b.ts",
            "--file",
            "a.ts",
            "--file",
            "b.ts",
        ])
        .unwrap();
        match args.command {
            Commands::Split(split) => {
                assert_eq!(split.files, vec!["a.ts", "b.ts"]);
                assert!(!split.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_run_with_dispatch_options() {
        let args = Args::try_parse_from([
            "enkai",
            "run",
            "--template",
            "templates/game.json",
            "-c",
            "3",
            "--stream-format",
            "jsonl",
            "--no-preamble",
        ])
        .unwrap();
        let Commands::Run(run) = args.command else {
            panic!("expected run");
        };
        assert_eq!(run.template.as_deref(), Some("templates/game.json"));
        assert_eq!(run.dispatch.concurrency, Some(3));
        assert_eq!(run.dispatch.stream_format, "jsonl");
        assert!(run.dispatch.no_preamble);
        assert!(!run.dispatch.no_report);
    }

    #[test]
    fn report_flags_conflict() {
        let res = Args::try_parse_from([
            "enkai",
            "generate",
            "Create a",
            "--no-report",
            "--report-dir",
            "out",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_unknown_stream_format() {
        let res = Args::try_parse_from(["enkai", "generate", "Create a", "--stream-format", "xml"]);
        assert!(res.is_err());
    }

    #[test]
    fn run_takes_exactly_one_task_source() {
        let preset = Args::try_parse_from(["enkai", "run", "--preset", "web-app", "--smart"])
            .unwrap();
        let Commands::Run(run) = preset.command else {
            panic!("expected run");
        };
        assert_eq!(run.preset.as_deref(), Some("web-app"));
        assert!(run.dispatch.smart);

        let inline = Args::try_parse_from(["enkai", "run", "--tasks-json", "[]"]).unwrap();
        let Commands::Run(run) = inline.command else {
            panic!("expected run");
        };
        assert_eq!(run.tasks_json.as_deref(), Some("[]"));

        assert!(Args::try_parse_from(["enkai", "run"]).is_err());
        assert!(Args::try_parse_from([
            "enkai",
            "run",
            "--preset",
            "web-app",
            "--template",
            "t.json"
        ])
        .is_err());
    }

    #[test]
    fn parses_list() {
        let args = Args::try_parse_from(["enkai", "list"]).unwrap();
        assert!(matches!(args.command, Commands::List));
    }
}
