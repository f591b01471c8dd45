use thiserror::Error;

use super::batch::{EstimateError, ReportError, TemplateError};
use super::executor::ExecutorError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),
    #[error("estimate failed: {0}")]
    Estimate(#[from] EstimateError),
    #[error("report failed: {0}")]
    Report(#[from] ReportError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}
