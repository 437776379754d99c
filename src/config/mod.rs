//! Configuration module for About-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use about_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will visit {} seeds", config.crawler.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Browser, CacheConfig, Config, CrawlerConfig, Engine, MatcherConfig, OutputConfig,
    RendererConfig, UserAgentConfig, DEFAULT_ABOUT_PATTERNS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_with_hash, parse_config};
