//! GPU presentation.
//!
//! Two strategies put client pixels on screen:
//! - textured quad: the CPU framebuffer is uploaded once per frame and drawn
//!   as a single full-viewport quad
//! - immediate points: each plotted pixel is its own point-primitive draw
//!
//! Convention: pixel coordinates have a top-left origin and +Y down; vertex
//! shaders convert to NDC.

mod common;
mod ctx;
mod points;
mod presenter;
pub mod program;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use points::ImmediatePoints;
pub use presenter::{GpuPresenter, PresentStrategy, Presenter};
pub use program::{Program, ProgramSource};
pub use quad::TexturedQuad;
