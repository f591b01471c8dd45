use async_trait::async_trait;
use enkai_core::api::{ProcessorError, TaskDescriptor, TaskProcessorPlugin, DEFAULT_PREAMBLE};

/// Prepends a fixed policy preamble and a blank line to every prompt.
pub struct PolicyPreamblePlugin {
    preamble: String,
}

impl PolicyPreamblePlugin {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }
}

impl Default for PolicyPreamblePlugin {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}

#[async_trait]
impl TaskProcessorPlugin for PolicyPreamblePlugin {
    fn name(&self) -> &str {
        "policy-preamble"
    }

    fn priority(&self) -> i32 {
        // Outermost: runs after every other processor.
        -100
    }

    async fn process(
        &self,
        task: &TaskDescriptor,
        content: &str,
    ) -> Result<String, ProcessorError> {
        if content.trim().is_empty() {
            return Err(ProcessorError::InvalidInput(format!(
                "task {} has an empty prompt",
                task.id
            )));
        }
        if self.preamble.trim().is_empty() {
            return Ok(content.to_string());
        }
        Ok(format!("{}\n\n{}", self.preamble.trim_end(), content))
    }
}
