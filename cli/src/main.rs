use clap::Parser;
use enkai_cli::commands::{cli, dispatch, plan};
use enkai_core::api::{CliError, LoggingConfig, TemplateError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = enkai_core::config::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    match args.command {
        cli::Commands::List => plan::handle_list(),
        cli::Commands::Split(split_args) => plan::handle_split(split_args),
        cli::Commands::Estimate(estimate_args) => plan::handle_estimate(estimate_args, &cfg),
        cli::Commands::Run(run_args) => dispatch::handle_run(run_args, cfg).await,
        cli::Commands::Generate(generate_args) => {
            dispatch::handle_generate(generate_args, cfg).await
        }
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: every job succeeded
    // 1: batch finished with failed jobs (returned as a normal exit code)
    // 11: config / caller input error
    // 20: template file unreadable
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Estimate(_) => 11,
        CliError::Template(te) => match te {
            TemplateError::Io { .. } => 20,
            TemplateError::Parse(_)
            | TemplateError::MissingField { .. }
            | TemplateError::UnknownPreset { .. } => 11,
        },
        CliError::Executor(_) => 11,
        CliError::Command(_) => 50,
        CliError::Report(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging enabled but both console and file are off".to_string());
    }

    // RUST_LOG, when set, wins over `[logging] level`.
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level).map_err(|e| e.to_string())?,
    };

    let file_layer = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender =
            tracing_appender::rolling::never(dir, format!("enkai.{}.log", std::process::id()));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn log_dir(logging: &LoggingConfig) -> std::path::PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("enkai"))
}
