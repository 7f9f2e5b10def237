//! Configuration module for duo-budget
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DuoPaths;
pub use settings::Settings;
