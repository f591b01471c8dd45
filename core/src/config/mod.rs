mod load;
mod types;

pub use load::{apply_env_overrides, get_enkai_data_dir, load_default, load_from_path, LOCAL_CONFIG_FILE};
pub use types::{
    AppConfig, EstimateConfig, ExecutorConfig, GenerationConfig, GenerationMode, LoggingConfig,
    ReportConfig, DEFAULT_PREAMBLE,
};
