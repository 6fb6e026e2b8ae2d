use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchor::AnchorSpec;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("unknown alignment keyword '{0}', expected 'map' or 'viewport'")]
    UnknownAlignment(String),
    #[error("unknown anchor keyword '{0}'")]
    UnknownAnchor(String),
}

/// Whether a symbol component is aligned to the map plane or to the
/// viewport. `auto` keywords are resolved to one of these at style-ingest
/// time, before any placement runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Map,
    #[default]
    Viewport,
}

impl Alignment {
    pub fn from_keyword(keyword: &str) -> Result<Self, StyleError> {
        match keyword {
            "map" => Ok(Self::Map),
            "viewport" => Ok(Self::Viewport),
            other => Err(StyleError::UnknownAlignment(other.to_owned())),
        }
    }
}

/// Symbol layout options, evaluated once when a layer is ingested. The
/// placement engine only ever reads these typed fields; no expression
/// evaluation happens per frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SymbolLayout {
    pub text_optional: bool,
    pub icon_optional: bool,
    pub text_allow_overlap: bool,
    pub icon_allow_overlap: bool,
    pub text_ignore_placement: bool,
    pub icon_ignore_placement: bool,
    pub text_pitch_alignment: Alignment,
    pub text_rotation_alignment: Alignment,
    pub icon_pitch_alignment: Alignment,
    pub icon_rotation_alignment: Alignment,
    /// Anchors to try in order; `auto` expands to the fixed search order
    /// and is only valid as the first entry. `None` disables the dynamic
    /// anchor search entirely.
    pub dynamic_text_anchor: Option<Vec<AnchorSpec>>,
    /// Radial distance between the anchor point and the label, in ems.
    pub dynamic_text_offset: f32,
}

impl Default for SymbolLayout {
    fn default() -> Self {
        Self {
            text_optional: false,
            icon_optional: false,
            text_allow_overlap: false,
            icon_allow_overlap: false,
            text_ignore_placement: false,
            icon_ignore_placement: false,
            text_pitch_alignment: Alignment::Viewport,
            text_rotation_alignment: Alignment::Viewport,
            icon_pitch_alignment: Alignment::Viewport,
            icon_rotation_alignment: Alignment::Viewport,
            dynamic_text_anchor: None,
            dynamic_text_offset: 0.0,
        }
    }
}

/// A style layer of symbol type: identity plus its ingested layout.
#[derive(Clone, Debug)]
pub struct SymbolLayer {
    pub id: String,
    pub source: String,
    pub layout: SymbolLayout,
}

impl SymbolLayer {
    pub fn new(id: impl Into<String>, source: impl Into<String>, layout: SymbolLayout) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_deserializes_from_kebab_case_json() {
        let layout: SymbolLayout = serde_json::from_str(
            r#"{
                "text-allow-overlap": true,
                "icon-optional": true,
                "text-pitch-alignment": "map",
                "dynamic-text-anchor": ["auto"],
                "dynamic-text-offset": 1.5
            }"#,
        )
        .expect("valid layout");

        assert!(layout.text_allow_overlap);
        assert!(layout.icon_optional);
        assert!(!layout.text_optional);
        assert_eq!(layout.text_pitch_alignment, Alignment::Map);
        assert_eq!(layout.text_rotation_alignment, Alignment::Viewport);
        assert_eq!(layout.dynamic_text_anchor, Some(vec![AnchorSpec::Auto]));
        assert_eq!(layout.dynamic_text_offset, 1.5);
    }

    #[test]
    fn unknown_keywords_are_rejected() {
        let err = serde_json::from_str::<SymbolLayout>(
            r#"{"text-pitch-alignment": "upside-down"}"#,
        );
        assert!(err.is_err(), "bogus alignment keyword must not parse");

        assert!(Alignment::from_keyword("map").is_ok());
        assert!(matches!(
            Alignment::from_keyword("slanted"),
            Err(StyleError::UnknownAlignment(_))
        ));
    }
}
