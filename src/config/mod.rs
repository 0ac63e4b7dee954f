//! Configuration module for taxafetch
//!
//! This module handles loading, parsing, and validating the optional TOML
//! credentials file. Values given on the command line take precedence over
//! the file; anything still missing is prompted for interactively.
//!
//! # Example
//!
//! ```no_run
//! use taxafetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("taxafetch.toml")).unwrap();
//! println!("Identifying as: {}", config.credentials.email);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, Credentials};

// Re-export parser functions
pub use parser::load_config;
