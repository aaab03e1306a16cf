//! Configuration management module

pub mod parser;

pub use parser::{ConfigParser, load_config, display_config_summary};

// Re-export from models for convenience
pub use crate::models::Config;
