pub mod config;
pub mod source;

pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use anyhow::anyhow;
pub use config::ConfigError;
pub use source::SourceError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
  ($err:expr) => {
    anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
  };
}
