use std::sync::OnceLock;

use regex::Regex;

use crate::error::ProviderError;

pub const DEFAULT_LANGUAGE_TAGS: &[&str] = &["typescript", "tsx", "ts", "jsx", "js"];

/// Turns a raw generation response into the payload that gets written.
pub trait CodeExtractor: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, raw: &str) -> Result<String, ProviderError>;
}

/// Takes the body of the first fenced code block whose info string is empty or
/// one of the known language tags. Falls back to the raw text verbatim; a
/// whitespace-only response is unusable.
#[derive(Debug, Clone)]
pub struct FencedCodeExtractor {
    pattern: Regex,
}

static DEFAULT_FENCE: OnceLock<Regex> = OnceLock::new();

fn fence_pattern<S: AsRef<str>>(tags: &[S]) -> String {
    let alternatives: Vec<String> = tags
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        r"(?s)```\r?\n(.*?)```".to_string()
    } else {
        format!(r"(?s)```(?:{})?\r?\n(.*?)```", alternatives.join("|"))
    }
}

impl FencedCodeExtractor {
    pub fn with_language_tags<S: AsRef<str>>(tags: &[S]) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&fence_pattern(tags))?,
        })
    }
}

impl Default for FencedCodeExtractor {
    fn default() -> Self {
        let pattern = DEFAULT_FENCE.get_or_init(|| {
            Regex::new(&fence_pattern(DEFAULT_LANGUAGE_TAGS)).expect("default fence regex is valid")
        });
        Self {
            pattern: pattern.clone(),
        }
    }
}

impl CodeExtractor for FencedCodeExtractor {
    fn name(&self) -> &str {
        "fenced-code"
    }

    fn extract(&self, raw: &str) -> Result<String, ProviderError> {
        if raw.trim().is_empty() {
            return Err(ProviderError::UnusableOutput(
                "response contains only whitespace".to_string(),
            ));
        }
        let payload = self
            .pattern
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(raw);
        Ok(payload.to_string())
    }
}

/// Uses the response as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTextExtractor;

impl CodeExtractor for RawTextExtractor {
    fn name(&self) -> &str {
        "raw"
    }

    fn extract(&self, raw: &str) -> Result<String, ProviderError> {
        Ok(raw.to_string())
    }
}
