use std::sync::Arc;

use anyhow::Result;

use enkai_core::api::{
    AppConfig, CodeExtractor, ExecutionEngine, ExecutionOpts, FencedCodeExtractor,
    GenerationBackend, OutputRendererPlugin, OutputWriter, TaskProcessorPlugin,
};

use crate::backend::GeminiBackend;
use crate::executor::{JsonlRendererPlugin, PolicyPreamblePlugin, TextRendererPlugin};
use crate::writer::FsOutputWriter;

pub fn build_backend(cfg: &AppConfig) -> Result<Arc<dyn GenerationBackend>> {
    Ok(Arc::new(GeminiBackend::new(&cfg.generation)?))
}

pub fn build_writer() -> Arc<dyn OutputWriter> {
    Arc::new(FsOutputWriter::new())
}

pub fn build_extractor(cfg: &AppConfig) -> Result<Arc<dyn CodeExtractor>> {
    let extractor = FencedCodeExtractor::with_language_tags(cfg.executor.language_tags.as_slice())?;
    Ok(Arc::new(extractor))
}

pub fn build_processors(cfg: &AppConfig) -> Vec<Arc<dyn TaskProcessorPlugin>> {
    let mut processors: Vec<Arc<dyn TaskProcessorPlugin>> = Vec::new();
    if cfg.executor.preamble_enabled {
        processors.push(Arc::new(PolicyPreamblePlugin::new(
            cfg.executor.preamble.clone(),
        )));
    }
    processors
}

pub fn build_renderer(stream_format: &str, ascii: bool) -> Arc<dyn OutputRendererPlugin> {
    match stream_format {
        "jsonl" => Arc::new(JsonlRendererPlugin::new(false)),
        // anything other than jsonl behaves like text
        _ => Arc::new(TextRendererPlugin::new(ascii)),
    }
}

/// Engine wired with the Gemini backend and filesystem writer.
pub fn build_engine(cfg: &AppConfig, opts: ExecutionOpts) -> Result<ExecutionEngine> {
    build_engine_with(cfg, opts, build_backend(cfg)?, build_writer())
}

/// Engine with caller-supplied backend and writer; everything else from config.
pub fn build_engine_with(
    cfg: &AppConfig,
    opts: ExecutionOpts,
    backend: Arc<dyn GenerationBackend>,
    writer: Arc<dyn OutputWriter>,
) -> Result<ExecutionEngine> {
    // Line events would fight with the progress bars; jsonl always gets them.
    let renderer = (opts.stream_format == "jsonl" || !(opts.progress_bar || opts.quiet))
        .then(|| build_renderer(&opts.stream_format, false));

    let mut builder = ExecutionEngine::builder(opts, backend, writer)
        .extractor(build_extractor(cfg)?)
        .processors(build_processors(cfg));
    if let Some(renderer) = renderer {
        builder = builder.renderer(renderer);
    }

    Ok(builder.build())
}
