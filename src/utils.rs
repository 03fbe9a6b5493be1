use mprisctl::{PlayerId, TrackMetadata};

/// Formats time (in microseconds) to a mm:ss or hh:mm:ss string.
pub fn format_position(microseconds: i64) -> String {
    let total_seconds = microseconds.max(0) / 1_000_000;
    if total_seconds >= 3600 {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

pub fn format_metadata(format: &str, metadata: &TrackMetadata) -> String {
    format
        .replace("{title}", metadata.title.trim())
        .replace("{artist}", metadata.artist.trim())
        .replace("{album}", metadata.album.trim())
        .replace("{length}", &format_position(metadata.length))
        .trim()
        .to_string()
}

pub fn players_json(players: &[PlayerId]) -> String {
    serde_json::json!({ "players": players }).to_string()
}

pub fn metadata_json(player: &PlayerId, metadata: &TrackMetadata) -> String {
    serde_json::json!({ "player": player, "metadata": metadata }).to_string()
}
