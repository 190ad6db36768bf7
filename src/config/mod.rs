//! Configuration module for Sitewalk
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error for the CLI: [`Config::default`] is a valid
//! configuration on its own.
//!
//! # Example
//!
//! ```no_run
//! use sitewalk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitewalk.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
