//! Configuration module for fa-scrape
//!
//! A [`ClientConfig`] is normally built in code, but it can also be loaded from a
//! TOML file, which is how the command-line tool is driven.
//!
//! # Example
//!
//! ```no_run
//! use fa_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fa.toml")).unwrap();
//! println!("Retries: {}", config.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, DEFAULT_MAX_RETRIES, DEFAULT_SITE_ROOT, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
