use async_trait::async_trait;

use crate::error::ProcessorError;
use crate::task::TaskDescriptor;

/// Prompt processor plugin: rewrites the prompt before it is sent for
/// generation.
#[async_trait]
pub trait TaskProcessorPlugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Higher runs first.
    fn priority(&self) -> i32 {
        0
    }

    /// Return the new prompt given the task and the prompt built so far.
    async fn process(&self, task: &TaskDescriptor, content: &str)
        -> Result<String, ProcessorError>;
}
