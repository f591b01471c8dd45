pub mod gemini;

pub use gemini::{sampling_for, GeminiBackend, SamplingConfig};
