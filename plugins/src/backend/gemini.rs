use std::time::Duration;

use async_trait::async_trait;
use enkai_core::api::{GenerationBackend, GenerationConfig, GenerationMode, ProviderError};
use serde::{Deserialize, Serialize};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

pub fn sampling_for(mode: GenerationMode) -> SamplingConfig {
    match mode {
        GenerationMode::Normal => SamplingConfig {
            temperature: 0.5,
            top_p: 0.9,
            top_k: 60,
        },
        GenerationMode::Strict => SamplingConfig {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
        },
        GenerationMode::Creative => SamplingConfig {
            temperature: 0.9,
            top_p: 0.95,
            top_k: 100,
        },
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: SamplingConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: String,
    model: String,
    sampling: SamplingConfig,
    base_url: String,
    // Pre-built endpoint for the configured model
    url_generate: String,
}

impl GeminiBackend {
    pub fn new(cfg: &GenerationConfig) -> anyhow::Result<Self> {
        if cfg.api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key is not set (generation.api_key or GEMINI_API_KEY)");
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let normalized = cfg.base_url.trim_end_matches('/');
        Ok(Self {
            http,
            api_key: cfg.api_key.trim().to_string(),
            model: cfg.model.clone(),
            sampling: sampling_for(cfg.mode),
            base_url: normalized.to_string(),
            url_generate: generate_url(normalized, &cfg.model),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let (model, url) = match model.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) if m != self.model => (m, generate_url(&self.base_url, m)),
            _ => (self.model.as_str(), self.url_generate.clone()),
        };
        tracing::debug!(
            target: "enkai.gemini",
            stage = "gemini.generate.in",
            model = %model,
            prompt_len = prompt.len()
        );

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: self.sampling,
        };

        let resp = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(request_error)?;

        tracing::debug!(
            target: "enkai.gemini",
            stage = "gemini.generate.out",
            status = %status,
            body_len = text.len()
        );

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|err| ProviderError::Decode(format!("{} | body={}", err, preview_body(&text))))?;

        first_text(parsed).ok_or(ProviderError::EmptyResponse)
    }
}

fn generate_url(base_url: &str, model: &str) -> String {
    format!("{}/v1beta/models/{}:generateContent", base_url, model)
}

fn first_text(resp: GenerateResponse) -> Option<String> {
    resp.candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

fn request_error(err: reqwest::Error) -> ProviderError {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else {
        "unknown"
    };
    // reqwest errors carry the URL, which holds the API key
    let err = err.without_url();
    ProviderError::Request(format!("{}: {}", kind, err))
}

fn status_error(status: u16, body: &str) -> ProviderError {
    let api_error = serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .filter(|e| !e.message.trim().is_empty());

    let message = match api_error {
        Some(ApiError {
            code: Some(code),
            message,
        }) => format!("{} (code: {})", message, code),
        Some(ApiError { message, .. }) => message,
        None => preview_body(body),
    };
    ProviderError::Http { status, message }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}
