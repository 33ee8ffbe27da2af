//! Color model exposed to client drawing code.
//!
//! Colors are straight-alpha RGBA bytes; blending on the GPU uses
//! `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.

pub mod color;

pub use color::Color;
