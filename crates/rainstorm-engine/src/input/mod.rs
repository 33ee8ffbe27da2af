//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The platform layer translates window events into `InputEvent`s and the
//! engine applies them to its `InputState` during the per-frame poll.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
