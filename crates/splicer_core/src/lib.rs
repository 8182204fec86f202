//! Splicer Core - Backend logic for Video Splicer
//!
//! This crate turns a comma-separated list of time instructions into
//! frame captures and sub-clips of a source video. It has zero UI
//! dependencies and can be driven by the CLI or an HTTP layer.

pub mod config;
pub mod instructions;
pub mod logging;
pub mod media;
pub mod models;
pub mod orchestrator;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
