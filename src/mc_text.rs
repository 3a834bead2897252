use std::fmt;

use serde::Deserialize;

/// Minecraft formatted text in the three renderings mcstatus.io provides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormattedText {
    /// Text with `§` formatting codes left in place.
    pub raw: String,

    /// Plain text with all formatting removed.
    pub clean: String,

    /// Text rendered as HTML spans, for web display.
    pub html: String,
}

/// Message of the Day shown in the multiplayer server list.
pub type Motd = FormattedText;

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clean)
    }
}

/// Player entry from a Java server's sample list.
///
/// `name` is read from `name` or `name_clean`, `id` from `id` or `uuid`, but
/// not from both spellings in one entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    /// Player name without formatting.
    #[serde(alias = "name_clean")]
    pub name: String,

    /// Player UUID.
    #[serde(alias = "uuid")]
    pub id: String,

    #[serde(default)]
    pub name_raw: Option<String>,

    #[serde(default)]
    pub name_html: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_writes_clean_text() {
        let motd: Motd = serde_json::from_str(
            r#"{"raw":"§aHello","clean":"Hello","html":"<span style=\"color: #55FF55;\">Hello</span>"}"#,
        )
        .unwrap();
        assert_eq!(motd.to_string(), "Hello");
    }

    #[test]
    fn player_accepts_api_field_names() {
        let player: Player = serde_json::from_str(
            r#"{"uuid":"069a79f4-44e9-4726-a5be-fca90e38aaf5","name_raw":"Notch","name_clean":"Notch","name_html":"<span>Notch</span>"}"#,
        )
        .unwrap();
        assert_eq!(player.name, "Notch");
        assert_eq!(player.id, "069a79f4-44e9-4726-a5be-fca90e38aaf5");
        assert_eq!(player.name_raw.as_deref(), Some("Notch"));

        let player: Player = serde_json::from_str(r#"{"name":"Notch","id":"abc"}"#).unwrap();
        assert_eq!(player.name, "Notch");
        assert_eq!(player.name_html, None);
    }
}
