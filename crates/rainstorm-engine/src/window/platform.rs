use std::time::Instant;

use crate::input::InputState;

/// Windowing/context provider seen by the frame loop.
///
/// One implementation drives a real window; tests substitute an in-memory
/// provider with a scripted clock.
pub trait Platform {
    /// Monotonic time used for frame timing.
    fn now(&self) -> Instant {
        Instant::now()
    }

    /// Delivers pending window events into `input`. Never blocks for long.
    fn poll_events(&mut self, input: &mut InputState);

    /// Returns `true` once per user close request (window close button or
    /// OS quit). The request is consumed.
    fn take_close_request(&mut self) -> bool;

    fn set_title(&mut self, title: &str);

    /// Destroys the window. Idempotent.
    fn shutdown(&mut self);
}
