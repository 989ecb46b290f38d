use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The active view
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Row editor with an embedded horizontal preview
    #[default]
    Editor,
    /// Events laid out left to right
    Horizontal,
    /// Events laid out top to bottom
    Vertical,
}

impl Mode {
    /// Exact, case-sensitive match on the mode name; anything else is `Editor`.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Whether this mode is one of the playable timeline views.
    pub fn is_timeline_view(self) -> bool {
        matches!(self, Mode::Horizontal | Mode::Vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip() {
        for mode in Mode::iter() {
            assert_eq!(Mode::parse_or_default(mode.as_ref()), mode);
        }
        assert_eq!(Mode::Horizontal.to_string(), "horizontal");
    }

    #[test]
    fn test_unknown_names_fall_back_to_editor() {
        assert_eq!(Mode::parse_or_default("bogus"), Mode::Editor);
        assert_eq!(Mode::parse_or_default(""), Mode::Editor);
        assert_eq!(Mode::parse_or_default("Vertical"), Mode::Editor);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mode::Vertical).unwrap();
        assert_eq!(json, "\"vertical\"");
    }
}
