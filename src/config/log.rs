use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    // Directory where logs will be stored; None disables the file layer
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { directory: None }
    }
}
