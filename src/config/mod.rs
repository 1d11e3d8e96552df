pub mod analyzer;
pub mod log;
pub mod source;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

pub use analyzer::AnalyzerConfig;
pub use log::LoggingConfig;
pub use source::SourceConfig;

use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub analyzer: AnalyzerConfig,
    pub logging: LoggingConfig,
}

/// Missing file falls back to defaults (every knob has one); a file that
/// exists but does not parse is a hard error.
pub async fn load_config(path: impl AsRef<Path>) -> crate::Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| err_with_loc!(ConfigError::OpenFileError(e.to_string())))?;
    let config: Config =
        toml::from_str(&config_str).map_err(|e| err_with_loc!(ConfigError::ParseError(e.to_string())))?;
    Ok(config)
}
