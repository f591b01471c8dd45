use async_trait::async_trait;

use crate::error::ProviderError;

/// Text generation capability: `prompt -> text`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn name(&self) -> &str;

    /// `model` overrides the backend's configured model for this call.
    async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError>;
}
