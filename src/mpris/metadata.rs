//! Track metadata record and the decoder for `Properties.Get(Player, "Metadata")` replies.

use std::collections::HashMap;

use dbus::Message;
use dbus::arg::{ArgType, Iter};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mpris::error::MprisError;

/// Joins multi-valued text fields such as `xesam:artist`.
pub const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub art_url: String,
    pub url: String,
    /// Track duration in microseconds.
    pub length: i64,
}

impl TrackMetadata {
    pub fn length_secs(&self) -> f64 {
        self.length as f64 / 1_000_000.0
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The metadata keys that map onto [`TrackMetadata`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Title,
    Album,
    Artist,
    ArtUrl,
    Url,
    Length,
}

/// Decodes one value (already unwrapped from its variant) into the record.
pub type Handler = fn(&mut Iter<'_>, &mut TrackMetadata);

impl MetadataKey {
    pub const ALL: [MetadataKey; 6] = [
        MetadataKey::Title,
        MetadataKey::Album,
        MetadataKey::Artist,
        MetadataKey::ArtUrl,
        MetadataKey::Url,
        MetadataKey::Length,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataKey::Title => "xesam:title",
            MetadataKey::Album => "xesam:album",
            MetadataKey::Artist => "xesam:artist",
            MetadataKey::ArtUrl => "mpris:artUrl",
            MetadataKey::Url => "xesam:url",
            MetadataKey::Length => "mpris:length",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        HANDLERS.get(key).map(|(k, _)| *k)
    }

    fn handler(self) -> Handler {
        match self {
            MetadataKey::Title => decode_title,
            MetadataKey::Album => decode_album,
            MetadataKey::Artist => decode_artist,
            MetadataKey::ArtUrl => decode_art_url,
            MetadataKey::Url => decode_url,
            MetadataKey::Length => decode_length,
        }
    }
}

/// Built on first use and read-only afterwards.
static HANDLERS: Lazy<HashMap<&'static str, (MetadataKey, Handler)>> = Lazy::new(|| {
    MetadataKey::ALL
        .iter()
        .map(|&key| (key.as_str(), (key, key.handler())))
        .collect()
});

/// Text fields take a string, or an array of strings joined with
/// [`LIST_SEPARATOR`]. Artist is specified as `as`, title as `s`, but
/// players send both shapes for either.
fn read_text(value: &mut Iter<'_>) -> Option<String> {
    match value.arg_type() {
        ArgType::String => value.get::<&str>().map(str::to_string),
        ArgType::Array => join_strings(value),
        other => {
            debug!("Ignoring text value of type {other:?}");
            None
        }
    }
}

fn decode_title(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    if let Some(title) = read_text(value) {
        metadata.title = title;
    }
}

fn decode_album(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    if let Some(album) = read_text(value) {
        metadata.album = album;
    }
}

fn decode_artist(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    if let Some(artist) = read_text(value) {
        metadata.artist = artist;
    }
}

fn decode_art_url(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    if let Some(art_url) = read_text(value) {
        metadata.art_url = art_url;
    }
}

fn decode_url(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    if let Some(url) = read_text(value) {
        metadata.url = url;
    }
}

/// Non-string elements are skipped.
fn join_strings(value: &mut Iter<'_>) -> Option<String> {
    let mut items = value.recurse(ArgType::Array)?;
    let mut parts = Vec::new();
    while items.arg_type() != ArgType::Invalid {
        if let Some(item) = items.get::<&str>() {
            parts.push(item);
        }
        items.next();
    }
    Some(parts.join(LIST_SEPARATOR))
}

/// `x` is taken as is; `t` only when it fits in an `i64`.
fn decode_length(value: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    let length = match value.arg_type() {
        ArgType::Int64 => value.get::<i64>(),
        ArgType::UInt64 => value.get::<u64>().and_then(|l| i64::try_from(l).ok()),
        _ => None,
    };
    match length {
        Some(length) => metadata.length = length,
        None => debug!("Ignoring mpris:length of type {:?}", value.arg_type()),
    }
}

fn decode_entry(entry: &mut Iter<'_>, metadata: &mut TrackMetadata) {
    let Some(key) = entry.get::<&str>() else {
        return;
    };
    let Some((_, handler)) = HANDLERS.get(key) else {
        debug!("Skipping unknown metadata key {key}");
        return;
    };
    if !entry.next() {
        return;
    }
    if let Some(mut value) = entry.recurse(ArgType::Variant) {
        handler(&mut value, metadata);
    }
}

/// Decodes a reply whose body is `v` wrapping `a{sv}`.
///
/// Only a reply of the wrong outer shape is an error; individual values of
/// the wrong type leave their field at its default.
pub fn decode(reply: &Message) -> Result<TrackMetadata, MprisError> {
    let mut body = reply.iter_init();
    let mut variant = body
        .recurse(ArgType::Variant)
        .ok_or_else(|| MprisError::Parse(format!("expected a variant, found {:?}", body.arg_type())))?;
    let mut dict = variant
        .recurse(ArgType::Array)
        .ok_or_else(|| MprisError::Parse(format!("expected a dictionary, found {:?}", variant.arg_type())))?;

    let mut metadata = TrackMetadata::default();
    loop {
        match dict.arg_type() {
            ArgType::Invalid => break,
            ArgType::DictEntry => {
                if let Some(mut entry) = dict.recurse(ArgType::DictEntry) {
                    decode_entry(&mut entry, &mut metadata);
                }
            }
            other => return Err(MprisError::Parse(format!("expected dictionary entries, found {other:?}"))),
        }
        dict.next();
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpris::message::build_call;
    use assert_matches::assert_matches;
    use dbus::arg::{PropMap, RefArg, Variant};

    fn reply_with(entries: Vec<(&str, Box<dyn RefArg>)>) -> Message {
        let map: PropMap = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Variant(v)))
            .collect();
        build_call("org.example.Fake", "/", "org.example.Fake", "Reply")
            .unwrap()
            .append1(Variant(map))
    }

    fn entry(key: &str, value: impl RefArg + 'static) -> (&str, Box<dyn RefArg>) {
        (key, Box::new(value))
    }

    fn artists(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn decodes_every_known_field() {
        let reply = reply_with(vec![
            entry("xesam:title", "Blue in Green".to_string()),
            entry("xesam:album", "Kind of Blue".to_string()),
            entry("xesam:artist", artists(&["Miles Davis"])),
            entry("mpris:artUrl", "file:///tmp/cover.jpg".to_string()),
            entry("xesam:url", "file:///music/blue.flac".to_string()),
            entry("mpris:length", 185_000_000i64),
        ]);
        let md = decode(&reply).unwrap();
        assert_eq!(
            md,
            TrackMetadata {
                title: "Blue in Green".into(),
                artist: "Miles Davis".into(),
                album: "Kind of Blue".into(),
                art_url: "file:///tmp/cover.jpg".into(),
                url: "file:///music/blue.flac".into(),
                length: 185_000_000,
            }
        );
    }

    #[test]
    fn artists_are_joined_with_separator() {
        let md = decode(&reply_with(vec![entry("xesam:artist", artists(&["Alice", "Bob"]))])).unwrap();
        assert_eq!(md.artist, "Alice, Bob");
        let md = decode(&reply_with(vec![entry("xesam:artist", artists(&["Solo"]))])).unwrap();
        assert_eq!(md.artist, "Solo");
        let md = decode(&reply_with(vec![entry("xesam:artist", artists(&[]))])).unwrap();
        assert_eq!(md.artist, "");
    }

    #[test]
    fn single_string_artist_is_accepted() {
        let md = decode(&reply_with(vec![entry("xesam:artist", "Solo".to_string())])).unwrap();
        assert_eq!(md.artist, "Solo");
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let md = decode(&reply_with(vec![
            entry("xesam:discNumber", 2i32),
            entry("xesam:title", "Track".to_string()),
            entry("mpris:trackid", "/org/example/track/1".to_string()),
        ]))
        .unwrap();
        assert_eq!(md.title, "Track");
        assert_eq!(md.artist, "");
    }

    #[test]
    fn length_keeps_full_width() {
        let md = decode(&reply_with(vec![entry("mpris:length", i64::MAX)])).unwrap();
        assert_eq!(md.length, i64::MAX);
        let md = decode(&reply_with(vec![entry("mpris:length", 185_000_000u64)])).unwrap();
        assert_eq!(md.length, 185_000_000);
        let md = decode(&reply_with(vec![entry("mpris:length", u64::MAX)])).unwrap();
        assert_eq!(md.length, 0);
    }

    #[test]
    fn mistyped_value_leaves_default() {
        let md = decode(&reply_with(vec![
            entry("xesam:title", 42u32),
            entry("mpris:length", "long".to_string()),
            entry("xesam:album", "Still Here".to_string()),
        ]))
        .unwrap();
        assert_eq!(md.title, "");
        assert_eq!(md.length, 0);
        assert_eq!(md.album, "Still Here");
    }

    #[test]
    fn empty_dictionary_is_default() {
        let md = decode(&reply_with(vec![])).unwrap();
        assert!(md.is_empty());
    }

    #[test]
    fn wrong_outer_shape_is_parse_error() {
        let empty = build_call("org.example.Fake", "/", "org.example.Fake", "Reply").unwrap();
        assert_matches!(decode(&empty), Err(MprisError::Parse(_)));

        let not_a_dict = build_call("org.example.Fake", "/", "org.example.Fake", "Reply")
            .unwrap()
            .append1(Variant("text"));
        assert_matches!(decode(&not_a_dict), Err(MprisError::Parse(_)));

        let plain_array = build_call("org.example.Fake", "/", "org.example.Fake", "Reply")
            .unwrap()
            .append1(Variant(vec!["a".to_string()]));
        assert_matches!(decode(&plain_array), Err(MprisError::Parse(_)));
    }

    #[test]
    fn table_covers_exactly_the_record_fields() {
        for key in MetadataKey::ALL {
            assert_eq!(MetadataKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(HANDLERS.len(), 6);
        assert_eq!(MetadataKey::from_key("xesam:genre"), None);
    }

    #[test]
    fn length_in_seconds() {
        let md = TrackMetadata { length: 185_000_000, ..Default::default() };
        assert_eq!(md.length_secs(), 185.0);
    }
}
