//! Configuration loading and management for the lesson salary engine.
//!
//! This module loads engine settings and penalty amounts from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use lesson_salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, PenaltyConfig, default_obligation_threshold};
