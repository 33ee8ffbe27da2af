//! Engine error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineState;

/// Stage of the program pipeline that rejected a shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProgramStage {
    /// WGSL parsing.
    Compile,
    /// Module-wide type and resource validation.
    Link,
    /// Entry-point checks against the presenter's expectations.
    Validate,
}

impl std::fmt::Display for ProgramStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProgramStage::Compile => "compile",
            ProgramStage::Link => "link",
            ProgramStage::Validate => "validate",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by the engine.
///
/// Provider and program failures are terminal for the instance being
/// constructed. Client callback results are never errors; they are stop or
/// resume requests handled by the loop controller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("window was not created by the platform")]
    WindowUnavailable,

    #[error("graphics context initialization failed: {0:#}")]
    Context(#[source] anyhow::Error),

    #[error("failed to read shader source {path}: {source}")]
    ShaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader program `{label}` failed to {stage}:\n{log}")]
    Program {
        label: String,
        stage: ProgramStage,
        log: String,
    },

    #[error("failed to allocate a {bytes} byte framebuffer")]
    Allocation { bytes: usize },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} framebuffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition { from: EngineState, to: EngineState },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
