//! Player identifiers and discovery of MPRIS services on the bus.

use std::fmt;

use dbus::Message;
use serde::{Deserialize, Serialize};

use crate::mpris::MPRIS_PREFIX;
use crate::mpris::error::MprisError;

/// A running player, named by the part of its bus name after
/// `org.mpris.MediaPlayer2.` (e.g. `spotify`, `firefox.instance_1_37`).
///
/// Only meaningful while the player's service stays registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Strips the MPRIS prefix once. `None` for non-MPRIS names.
    pub fn from_bus_name(name: &str) -> Option<Self> {
        name.strip_prefix(MPRIS_PREFIX)
            .filter(|rest| !rest.is_empty())
            .map(Self::new)
    }

    /// Full well-known name to address on the wire.
    pub fn bus_name(&self) -> String {
        format!("{MPRIS_PREFIX}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Keeps MPRIS names, in the order given.
pub fn filter_players<I, S>(names: I) -> Vec<PlayerId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| PlayerId::from_bus_name(name.as_ref()))
        .collect()
}

/// Reads the `as` body of a `ListNames` reply.
pub fn players_from_reply(reply: &Message) -> Result<Vec<PlayerId>, MprisError> {
    let names: Vec<&str> = reply
        .read1()
        .map_err(|e| MprisError::Parse(format!("ListNames reply: {e}")))?;
    Ok(filter_players(names))
}

/// Case-insensitive substring block list, as given on the command line.
pub fn is_blocked(player: &PlayerId, block_list: &[String]) -> bool {
    let id = player.as_str().to_lowercase();
    block_list.iter().any(|b| id.contains(b.as_str()))
}
