//! Error types for the icon pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating icon artifacts
///
/// All of these are fatal for the current run: there is no retry or local
/// recovery, the error propagates to the caller and the process exits
/// non-zero. The rendering and encoding math itself never fails; only the
/// external resize step and file output can.
#[derive(Error, Debug)]
pub enum Error {
    /// A required external tool is not installed
    #[error("Missing required tool: {0}")]
    MissingTool(String),

    /// An external resize invocation failed or produced no output
    #[error("Resize to {0}x{0} failed: {1}")]
    ResizeFailed(u32, String),

    /// Input bytes the built-in decoder does not accept
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// An output artifact could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
