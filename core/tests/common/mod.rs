#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use enkai_core::api::{GenerationBackend, OutputWriter, ProviderError, WriteError};

/// Backend that answers with a fenced block echoing the prompt's last line,
/// failing for prompts containing `FAIL`.
#[derive(Default)]
pub struct EchoBackend {
    active: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl EchoBackend {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str, _model: Option<&str>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(3)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        if prompt.contains("FAIL") {
            return Err(ProviderError::UnusableOutput("refused".into()));
        }
        let last = prompt.lines().last().unwrap_or_default();
        Ok(format!("```ts\n{last}\n```"))
    }
}

#[derive(Default)]
pub struct MemoryWriter {
    pub files: Mutex<HashMap<String, String>>,
}

impl MemoryWriter {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self, destination: &str) -> Option<String> {
        self.files.lock().unwrap().get(destination).cloned()
    }
}

#[async_trait]
impl OutputWriter for MemoryWriter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write(&self, destination: &str, payload: &str) -> Result<(), WriteError> {
        self.files
            .lock()
            .unwrap()
            .insert(destination.to_string(), payload.to_string());
        Ok(())
    }
}
