//! Configuration module for indexscope
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use indexscope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexscope.toml")).unwrap();
//! println!("Inspecting with {} workers", config.inspection.concurrency);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    ApiConfig, AuthConfig, Config, ExportFormat, InspectionConfig, OutputConfig, SitemapConfig,
    UserAgentConfig, DEFAULT_CONCURRENCY, MAX_BATCH_SIZE,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
