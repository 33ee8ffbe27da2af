//! Window provider.
//!
//! [`Platform`] is what the frame loop needs from a windowing system;
//! [`WinitPlatform`] implements it on top of `winit`.

mod platform;
mod runtime;

pub use platform::Platform;
pub use runtime::{WindowConfig, WinitPlatform};
