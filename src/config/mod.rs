//! Configuration module for Leadsift
//!
//! This module handles loading, parsing, and validating TOML
//! configuration files.
//!
//! # Example
//!
//! ```no_run
//! use leadsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Targets: {}", config.targets.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig, TargetEntry, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
