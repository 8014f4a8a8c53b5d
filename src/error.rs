//! Crate error type

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a demo from starting
#[derive(Debug, Error)]
pub enum DemoError {
    /// A configured value is out of range (bounds inverted, non-finite rates...)
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read settings from {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}: {source}")]
    SettingsJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown demo {0:?} (expected snow, cube, blend or square)")]
    UnknownDemo(String),

    #[error("could not create window: {0}")]
    Window(String),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("could not create GPU device: {0}")]
    Device(String),

    #[error("could not create surface: {0}")]
    Surface(String),

    /// Image could not be read or decoded. Callers fall back to a checkerboard.
    #[error("could not load texture {path}: {reason}")]
    Texture { path: String, reason: String },

    /// Shader compilation failure. Always fatal.
    #[error("shader {label} failed to compile:\n{log}")]
    Shader { label: String, log: String },

    /// Pipeline rejected by device validation (layout or vertex mismatch)
    #[error("pipeline {label} failed validation:\n{log}")]
    Pipeline { label: String, log: String },
}

impl DemoError {
    pub fn config(msg: impl Into<String>) -> Self {
        DemoError::Config(msg.into())
    }
}
