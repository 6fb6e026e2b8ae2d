use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A fixed placement anchor. The keyword names the side or corner of the
/// label that sits at the feature's anchor point, so `Top` hangs the label
/// below the point and `BottomRight` puts it up and to the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One entry of a `dynamic-text-anchor` list: either a fixed anchor or the
/// `auto` keyword, which is only meaningful as the first entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorSpec {
    Auto,
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl AnchorSpec {
    pub fn from_keyword(keyword: &str) -> Result<Self, crate::layout::StyleError> {
        match keyword {
            "auto" => Ok(Self::Auto),
            "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            other => Err(crate::layout::StyleError::UnknownAnchor(other.to_owned())),
        }
    }

    pub fn as_fixed(self) -> Option<Anchor> {
        match self {
            Self::Auto => None,
            Self::Center => Some(Anchor::Center),
            Self::Left => Some(Anchor::Left),
            Self::Right => Some(Anchor::Right),
            Self::Top => Some(Anchor::Top),
            Self::Bottom => Some(Anchor::Bottom),
            Self::TopLeft => Some(Anchor::TopLeft),
            Self::TopRight => Some(Anchor::TopRight),
            Self::BottomLeft => Some(Anchor::BottomLeft),
            Self::BottomRight => Some(Anchor::BottomRight),
        }
    }
}

/// The order anchors are tried when a `dynamic-text-anchor` list starts with
/// `auto`.
pub const AUTO_ANCHORS: [Anchor; 9] = [
    Anchor::Center,
    Anchor::Top,
    Anchor::Bottom,
    Anchor::Left,
    Anchor::Right,
    Anchor::TopLeft,
    Anchor::TopRight,
    Anchor::BottomLeft,
    Anchor::BottomRight,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextJustify {
    Left,
    Center,
    Right,
}

/// Fractional alignment of the label box against its anchor point.
/// Components are 0, 0.5 or 1; the box shift is `-horizontal * width`,
/// `-vertical * height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorAlignment {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Anchor {
    pub fn alignment(self) -> AnchorAlignment {
        let horizontal = match self {
            Self::Right | Self::TopRight | Self::BottomRight => 1.0,
            Self::Left | Self::TopLeft | Self::BottomLeft => 0.0,
            _ => 0.5,
        };
        let vertical = match self {
            Self::Bottom | Self::BottomLeft | Self::BottomRight => 1.0,
            Self::Top | Self::TopLeft | Self::TopRight => 0.0,
            _ => 0.5,
        };
        AnchorAlignment {
            horizontal,
            vertical,
        }
    }

    /// The text justification implied by this anchor: anchors on the right
    /// edge right-justify, anchors on the left edge left-justify.
    pub fn justification(self) -> TextJustify {
        match self {
            Self::Right | Self::TopRight | Self::BottomRight => TextJustify::Right,
            Self::Left | Self::TopLeft | Self::BottomLeft => TextJustify::Left,
            _ => TextJustify::Center,
        }
    }

    /// Displacement of the label center for a radial offset of `radial` ems,
    /// in ems, y down. Diagonal anchors split the offset evenly across both
    /// axes; `Center` never moves.
    pub fn dynamic_offset(self, radial: f32) -> Vec2 {
        let leg = radial / std::f32::consts::SQRT_2;
        match self {
            Self::Center => Vec2::ZERO,
            Self::Top => Vec2::new(0.0, radial),
            Self::Bottom => Vec2::new(0.0, -radial),
            Self::Left => Vec2::new(radial, 0.0),
            Self::Right => Vec2::new(-radial, 0.0),
            Self::TopLeft => Vec2::new(leg, leg),
            Self::TopRight => Vec2::new(-leg, leg),
            Self::BottomLeft => Vec2::new(leg, -leg),
            Self::BottomRight => Vec2::new(-leg, -leg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn dynamic_offsets_follow_the_anchor_names() {
        // A top anchor hangs the label below the point, a bottom anchor
        // raises it, and diagonals use an equal leg on both axes.
        let r = 2.0;
        let leg = r / 2.0f32.sqrt();

        assert_eq!(Anchor::Center.dynamic_offset(r), Vec2::ZERO);
        assert_eq!(Anchor::Top.dynamic_offset(r), Vec2::new(0.0, r));
        assert_eq!(Anchor::Bottom.dynamic_offset(r), Vec2::new(0.0, -r));
        assert_eq!(Anchor::Left.dynamic_offset(r), Vec2::new(r, 0.0));
        assert_eq!(Anchor::Right.dynamic_offset(r), Vec2::new(-r, 0.0));

        let tr = Anchor::TopRight.dynamic_offset(r);
        assert_approx_eq!(tr.x, -leg);
        assert_approx_eq!(tr.y, leg);

        let bl = Anchor::BottomLeft.dynamic_offset(r);
        assert_approx_eq!(bl.x, leg);
        assert_approx_eq!(bl.y, -leg);
    }

    #[test]
    fn alignments_are_fractional() {
        assert_eq!(
            Anchor::Center.alignment(),
            AnchorAlignment {
                horizontal: 0.5,
                vertical: 0.5
            }
        );
        assert_eq!(
            Anchor::TopLeft.alignment(),
            AnchorAlignment {
                horizontal: 0.0,
                vertical: 0.0
            }
        );
        assert_eq!(
            Anchor::BottomRight.alignment(),
            AnchorAlignment {
                horizontal: 1.0,
                vertical: 1.0
            }
        );
    }

    #[test]
    fn justification_tracks_the_horizontal_edge() {
        assert_eq!(Anchor::Left.justification(), TextJustify::Left);
        assert_eq!(Anchor::TopLeft.justification(), TextJustify::Left);
        assert_eq!(Anchor::Right.justification(), TextJustify::Right);
        assert_eq!(Anchor::BottomRight.justification(), TextJustify::Right);
        assert_eq!(Anchor::Top.justification(), TextJustify::Center);
        assert_eq!(Anchor::Center.justification(), TextJustify::Center);
    }

    #[test]
    fn anchor_keywords_round_trip_kebab_case() {
        let list: Vec<AnchorSpec> =
            serde_json::from_str(r#"["auto", "top-left", "center", "bottom-right"]"#)
                .expect("valid anchor list");
        assert_eq!(
            list,
            vec![
                AnchorSpec::Auto,
                AnchorSpec::TopLeft,
                AnchorSpec::Center,
                AnchorSpec::BottomRight
            ]
        );
        assert_eq!(list[1].as_fixed(), Some(Anchor::TopLeft));
        assert_eq!(list[0].as_fixed(), None);
    }
}
