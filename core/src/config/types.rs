use serde::{Deserialize, Serialize};

use crate::estimate::{DEFAULT_AVERAGE_OUTPUT_TOKENS, DEFAULT_MODEL};
use crate::executor::traits::DEFAULT_LANGUAGE_TAGS;
use crate::executor::DEFAULT_CONCURRENCY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub estimate: EstimateConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "enkai_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

pub const DEFAULT_PREAMBLE: &str = "\
You are an expert programmer who follows AI-First development principles.
Always follow these rules when generating code:

1. Fully self-contained: one file = one complete feature
2. Minimal external dependencies: only standard React/Next.js
3. Duplicated code is welcome: every file must be understandable on its own
4. Keep everything inside the file: use useState/useReducer, no custom hooks
5. Use TypeScript, with Japanese language support

Output only the generated code, no explanations.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Maximum number of generation jobs in flight.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Prepend `preamble` to every prompt.
    #[serde(default = "default_preamble_enabled")]
    pub preamble_enabled: bool,

    #[serde(default = "default_preamble")]
    pub preamble: String,

    /// Info-string tags accepted by the fenced code extractor.
    #[serde(default = "default_language_tags")]
    pub language_tags: Vec<String>,

    #[serde(default = "default_progress_bar")]
    pub progress_bar: bool,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_preamble_enabled() -> bool {
    true
}

fn default_preamble() -> String {
    DEFAULT_PREAMBLE.to_string()
}

fn default_language_tags() -> Vec<String> {
    DEFAULT_LANGUAGE_TAGS.iter().map(|t| t.to_string()).collect()
}

fn default_progress_bar() -> bool {
    true
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            preamble_enabled: default_preamble_enabled(),
            preamble: default_preamble(),
            language_tags: default_language_tags(),
            progress_bar: default_progress_bar(),
        }
    }
}

/// Sampling profile sent with each generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Normal,
    Strict,
    Creative,
}

impl std::str::FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "strict" => Ok(Self::Strict),
            "creative" => Ok(Self::Creative),
            other => Err(format!(
                "unknown generation mode '{other}' (expected normal, strict or creative)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_generation_model")]
    pub model: String,

    #[serde(default)]
    pub mode: GenerationMode,

    /// Falls back to `GEMINI_API_KEY` when empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pick a model per task from prompt complexity when none is given.
    #[serde(default)]
    pub auto_model: bool,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generation_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_generation_model(),
            mode: GenerationMode::default(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            auto_model: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Price tier: "economy" or "premium".
    #[serde(default = "default_estimate_model")]
    pub model: String,

    #[serde(default = "default_average_output_tokens")]
    pub average_output_tokens: u64,
}

fn default_estimate_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_average_output_tokens() -> u64 {
    DEFAULT_AVERAGE_OUTPUT_TOKENS
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            model: default_estimate_model(),
            average_output_tokens: default_average_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_enabled")]
    pub enabled: bool,

    #[serde(default = "default_report_directory")]
    pub directory: String,
}

fn default_report_enabled() -> bool {
    true
}

fn default_report_directory() -> String {
    ".".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_report_enabled(),
            directory: default_report_directory(),
        }
    }
}
