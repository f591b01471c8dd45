use async_trait::async_trait;

use crate::error::WriteError;

/// Persists a job's payload. Implementations own parent-path creation, which
/// must be idempotent.
#[async_trait]
pub trait OutputWriter: Send + Sync {
    fn name(&self) -> &str;

    async fn write(&self, destination: &str, payload: &str) -> Result<(), WriteError>;
}
