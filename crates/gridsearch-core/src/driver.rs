//! The presentation back-end contract.

use std::sync::mpsc::Sender;

use crate::canvas::Frame;
use crate::context::Context;
use crate::input::Input;

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending every event through `tx`.
    ///
    /// Implementations wait a short while for the first event, then drain
    /// whatever else is pending and return. They should return early once
    /// `ctx.is_done()`.
    fn poll_msgs<M: From<Input>>(
        &mut self,
        ctx: &Context,
        tx: &Sender<M>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}
