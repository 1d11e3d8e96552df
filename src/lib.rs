pub mod analyzer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod model;
pub mod source;
pub mod trace;
pub mod utils;

pub use analyzer::Analyzer;
pub use engine::Engine;
pub use error::ConfigError;
pub use error::SourceError;

pub use error::Result;
