pub mod batch;
#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;

pub use batch::{EstimateError, ReportError, StoreError, TemplateError};
pub use error::CliError;
pub use executor::{ExecutorError, JobError, ProcessorError, ProviderError, WriteError};
