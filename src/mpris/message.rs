//! Outbound method-call construction. Pure; nothing here touches the bus.

use dbus::Message;
use dbus::strings::{BusName, Interface, Member, Path};

use crate::mpris::discovery::PlayerId;
use crate::mpris::error::MprisError;
use crate::mpris::{
    DBUS_INTERFACE, DBUS_PATH, DBUS_SERVICE, MPRIS_PATH, MPRIS_PLAYER_INTERFACE, PROPERTIES_INTERFACE,
};

/// Builds a method call with no arguments.
///
/// Names are checked for D-Bus syntax only; whether the target exists is the
/// remote side's answer to give.
pub fn build_call(destination: &str, path: &str, interface: &str, method: &str) -> Result<Message, MprisError> {
    let destination = BusName::new(destination).map_err(MprisError::Build)?;
    let path = Path::new(path).map_err(MprisError::Build)?;
    let interface = Interface::new(interface).map_err(MprisError::Build)?;
    let method = Member::new(method).map_err(MprisError::Build)?;
    Ok(Message::method_call(&destination, &path, &interface, &method))
}

/// `org.freedesktop.DBus.ListNames` on the bus broker.
pub fn list_names() -> Result<Message, MprisError> {
    build_call(DBUS_SERVICE, DBUS_PATH, DBUS_INTERFACE, "ListNames")
}

/// A Player-interface method such as `PlayPause`, addressed to `player`.
pub fn player_command(player: &PlayerId, method: &str) -> Result<Message, MprisError> {
    build_call(&player.bus_name(), MPRIS_PATH, MPRIS_PLAYER_INTERFACE, method)
}

/// `Properties.Get(interface, property)` addressed to `player`.
pub fn get_property(player: &PlayerId, interface: &str, property: &str) -> Result<Message, MprisError> {
    Ok(build_call(&player.bus_name(), MPRIS_PATH, PROPERTIES_INTERFACE, "Get")?.append2(interface, property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn player_command_targets_prefixed_service() {
        let msg = player_command(&PlayerId::from("vlc"), "PlayPause").unwrap();
        assert_eq!(msg.destination().as_deref(), Some("org.mpris.MediaPlayer2.vlc"));
        assert_eq!(msg.path().as_deref(), Some("/org/mpris/MediaPlayer2"));
        assert_eq!(msg.interface().as_deref(), Some("org.mpris.MediaPlayer2.Player"));
        assert_eq!(msg.member().as_deref(), Some("PlayPause"));
        assert!(msg.get_items().is_empty());
    }

    #[test]
    fn get_property_appends_interface_and_name() {
        let msg = get_property(&PlayerId::from("spotify"), MPRIS_PLAYER_INTERFACE, "Metadata").unwrap();
        assert_eq!(msg.interface().as_deref(), Some("org.freedesktop.DBus.Properties"));
        assert_eq!(msg.member().as_deref(), Some("Get"));
        let (iface, prop): (&str, &str) = msg.read2().unwrap();
        assert_eq!(iface, "org.mpris.MediaPlayer2.Player");
        assert_eq!(prop, "Metadata");
    }

    #[test]
    fn list_names_targets_bus_broker() {
        let msg = list_names().unwrap();
        assert_eq!(msg.destination().as_deref(), Some("org.freedesktop.DBus"));
        assert_eq!(msg.member().as_deref(), Some("ListNames"));
    }

    #[test]
    fn syntactically_invalid_member_is_a_build_error() {
        assert_matches!(
            build_call(DBUS_SERVICE, DBUS_PATH, DBUS_INTERFACE, "not a member"),
            Err(MprisError::Build(_))
        );
    }
}
