//! Application-facing contracts.
//!
//! This module defines the interface between the frame loop and client code:
//! the lifecycle callbacks an application implements and the per-frame
//! context those callbacks draw through.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RuntimeCtx};

pub(crate) use ctx::Command;
