//! Coordinate types shared by the framebuffer, the drawing API and renderers.
//!
//! Canonical CPU space:
//! - Physical pixels, integer addressed
//! - Origin top-left
//! - +X right, +Y down

mod coord;
mod viewport;

pub use coord::Coord;
pub use viewport::Viewport;
