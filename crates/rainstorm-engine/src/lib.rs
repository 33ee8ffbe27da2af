//! Rainstorm engine crate.
//!
//! A minimal real-time pixel harness: it owns one window, drives a fixed
//! per-frame loop and lets an [`App`] plot pixels and lines that are shown
//! either through a CPU framebuffer uploaded as a single textured quad, or as
//! one point draw per pixel.

pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod engine;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

pub use crate::coords::Coord;
pub use crate::core::{App, AppControl, FrameCtx};
pub use crate::draw::Canvas;
pub use crate::engine::{run, Dimensions, Engine, EngineConfig, EngineState};
pub use crate::error::{EngineError, EngineResult};
pub use crate::framebuffer::Framebuffer;
pub use crate::paint::Color;
pub use crate::render::{PresentStrategy, ProgramSource};
