//! Loading, rendering, progress and command-line plumbing around the solver

/// Command-line interface and run pipeline
pub mod cli;
/// Runtime defaults and rendering constants
pub mod configuration;
/// Error types for all fallible operations
pub mod error;
/// PNG loading and rendering
pub mod image;
/// Terminal progress display
pub mod progress;
/// GIF capture of a run
pub mod visualization;
