//! Single-attempt blocking dispatch of a built message.

use std::time::Duration;

use dbus::Message;
use log::debug;

use crate::mpris::connection::Transport;
use crate::mpris::error::MprisError;

/// Sends `msg` and waits for its reply. No retry.
///
/// `msg` is consumed by the send and the returned reply is owned by the
/// caller, so both are released when they go out of scope on every path.
/// An error reply is turned into [`MprisError::Remote`] even if the
/// transport handed it back as a normal message.
pub fn send_blocking<T: Transport + ?Sized>(bus: &T, msg: Message, timeout: Duration) -> Result<Message, MprisError> {
    let method = msg.member().map(|m| m.to_string()).unwrap_or_default();
    debug!("Sending {} to {:?}", method, msg.destination());
    let mut reply = bus
        .send_blocking(msg, timeout)
        .map_err(|e| MprisError::from_call(&method, e))?;
    reply.as_result().map_err(|e| MprisError::from_call(&method, e))?;
    Ok(reply)
}
