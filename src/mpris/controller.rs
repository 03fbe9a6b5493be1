//! Public control surface over one session-bus connection.

use std::time::Duration;

use dbus::blocking::Connection;
use log::{debug, error, warn};

use crate::mpris::connection::{DEFAULT_TIMEOUT, Transport, open_session};
use crate::mpris::discovery::{self, PlayerId};
use crate::mpris::dispatch::send_blocking;
use crate::mpris::error::MprisError;
use crate::mpris::message;
use crate::mpris::metadata::{self, TrackMetadata};
use crate::mpris::{METADATA_PROPERTY, MPRIS_PLAYER_INTERFACE};

/// Player-interface methods that take no arguments and return nothing useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Next,
    Previous,
}

impl Command {
    pub fn method(self) -> &'static str {
        match self {
            Command::PlayPause => "PlayPause",
            Command::Next => "Next",
            Command::Previous => "Previous",
        }
    }
}

/// MPRIS controller holding at most one bus connection.
///
/// Each operation makes at most one blocking round trip. A controller with no
/// connection answers every call with [`MprisError::Disconnected`] (or the
/// matching empty value) without touching the bus.
///
/// Not for concurrent use: one controller per thread, or a lock held across
/// each call.
pub struct MprisController<T: Transport = Connection> {
    bus: Option<T>,
    timeout: Duration,
}

impl MprisController<Connection> {
    /// Connects to the session bus, falling back to a disconnected controller.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|e| {
            error!("{e}");
            Self::disconnected()
        })
    }

    pub fn try_new() -> Result<Self, MprisError> {
        Ok(Self::with_transport(open_session()?))
    }
}

impl<T: Transport> MprisController<T> {
    pub fn with_transport(bus: T) -> Self {
        Self { bus: Some(bus), timeout: DEFAULT_TIMEOUT }
    }

    pub fn disconnected() -> Self {
        Self { bus: None, timeout: DEFAULT_TIMEOUT }
    }

    /// Sets the per-call reply timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_connected(&self) -> bool {
        self.bus.is_some()
    }

    /// Drops the connection. Later calls behave as if the bus was never reached.
    pub fn close(&mut self) {
        if self.bus.take().is_some() {
            debug!("Closed D-Bus connection");
        }
    }

    fn bus(&self) -> Result<&T, MprisError> {
        self.bus.as_ref().ok_or(MprisError::Disconnected)
    }

    pub fn try_list_players(&self) -> Result<Vec<PlayerId>, MprisError> {
        let bus = self.bus()?;
        let reply = send_blocking(bus, message::list_names()?, self.timeout)?;
        discovery::players_from_reply(&reply)
    }

    /// Players currently on the bus, in bus order. Empty on any failure.
    pub fn list_available_players(&self) -> Vec<PlayerId> {
        self.try_list_players().unwrap_or_else(|e| {
            warn!("Failed to get available players: {e}");
            Vec::new()
        })
    }

    /// Succeeds once a non-error reply arrives; the reply body is ignored.
    pub fn try_send(&self, player: &PlayerId, command: Command) -> Result<(), MprisError> {
        let bus = self.bus()?;
        send_blocking(bus, message::player_command(player, command.method())?, self.timeout)?;
        Ok(())
    }

    pub fn send(&self, player: &PlayerId, command: Command) -> bool {
        match self.try_send(player, command) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send {} command to {player}: {e}", command.method());
                false
            }
        }
    }

    pub fn play_pause(&self, player: &PlayerId) -> bool {
        self.send(player, Command::PlayPause)
    }

    pub fn next(&self, player: &PlayerId) -> bool {
        self.send(player, Command::Next)
    }

    pub fn previous(&self, player: &PlayerId) -> bool {
        self.send(player, Command::Previous)
    }

    pub fn try_metadata(&self, player: &PlayerId) -> Result<TrackMetadata, MprisError> {
        let bus = self.bus()?;
        let msg = message::get_property(player, MPRIS_PLAYER_INTERFACE, METADATA_PROPERTY)?;
        let reply = send_blocking(bus, msg, self.timeout)?;
        metadata::decode(&reply)
    }

    /// Best effort: any failure yields a default record.
    pub fn get_metadata(&self, player: &PlayerId) -> TrackMetadata {
        self.try_metadata(player).unwrap_or_else(|e| {
            warn!("Failed to get track metadata for {player}: {e}");
            TrackMetadata::default()
        })
    }
}
