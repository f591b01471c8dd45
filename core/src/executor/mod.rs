//! Bounded-concurrency dispatch.
//!
//! ```text
//! Vec<TaskDescriptor>
//!   ↓
//! ExecutionEngine::execute()  (duplicate id check, one thunk per task)
//!   ↓
//! run_bounded(thunks, concurrency)  (Semaphore + FuturesUnordered)
//!   ↓   per job: processors → GenerationBackend → CodeExtractor → OutputWriter
//! BatchRun { run_id, results: Vec<JobResult>, total_duration_ms }
//! ```

mod engine;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

pub use engine::{ExecutionEngine, ExecutionEngineBuilder};
pub use progress::ProgressMonitor;
pub use scheduler::run_bounded;
pub use types::{BatchRun, ExecutionOpts, JobErrorKind, JobResult, DEFAULT_CONCURRENCY};
