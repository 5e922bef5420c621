//! Groove CLI Library
//!
//! Interactive shell over a single `PlaybackManager` session, backed by a
//! redb database (or memory) and a simulated audio engine.
//!
//! This library exposes the shell components for testing purposes.

pub mod config;
pub mod engine;
pub mod error;
pub mod shell;

pub use config::{ExportSettings, GrooveConfig, StorageSettings};
pub use engine::LoggingEngine;
pub use error::{CliError, Result};
pub use shell::{Flow, Shell};
