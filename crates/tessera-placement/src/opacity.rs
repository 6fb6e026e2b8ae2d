/// Fade state of one symbol component. `opacity` is the animated scalar,
/// `placed` the latest placement decision driving it up or down. A state
/// is hidden only once the fade-out has fully run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityState {
    pub opacity: f32,
    pub placed: bool,
}

impl OpacityState {
    /// Advance from `prev` by `increment` (fraction of the fade duration
    /// elapsed since the previous commit), or start fresh: visible
    /// immediately when `skip_fade` says the symbol only left the screen
    /// by a small pan.
    pub fn new(prev: Option<&Self>, increment: f32, placed: bool, skip_fade: bool) -> Self {
        let opacity = match prev {
            Some(prev) => {
                let step = if prev.placed { increment } else { -increment };
                (prev.opacity + step).clamp(0.0, 1.0)
            }
            None => {
                if skip_fade && placed {
                    1.0
                } else {
                    0.0
                }
            }
        };
        Self { opacity, placed }
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity == 0.0 && !self.placed
    }
}

/// Paired text and icon fade states, advanced together from one joint
/// placement decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointOpacityState {
    pub text: OpacityState,
    pub icon: OpacityState,
}

impl JointOpacityState {
    pub fn new(
        prev: Option<&Self>,
        increment: f32,
        placed_text: bool,
        placed_icon: bool,
        skip_fade: bool,
    ) -> Self {
        Self {
            text: OpacityState::new(prev.map(|p| &p.text), increment, placed_text, skip_fade),
            icon: OpacityState::new(prev.map(|p| &p.icon), increment, placed_icon, skip_fade),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.text.is_hidden() && self.icon.is_hidden()
    }
}

/// Placement decision for one symbol: whether its text and icon were
/// accepted, and whether a later fade-in should be skipped because the
/// symbol sits just outside the viewport in the collision index's padding
/// band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JointPlacement {
    pub text: bool,
    pub icon: bool,
    pub skip_fade: bool,
}

impl JointPlacement {
    pub fn new(text: bool, icon: bool, skip_fade: bool) -> Self {
        Self {
            text,
            icon,
            skip_fade,
        }
    }
}

/// Encode a fade state into the per-glyph vertex attribute: the 7-bit
/// opacity and the placed bit, replicated into all four bytes so each
/// vertex of the quad reads the same value.
pub fn pack_opacity(state: &OpacityState) -> u32 {
    if state.opacity == 0.0 && !state.placed {
        return 0;
    }
    if state.opacity == 1.0 && state.placed {
        return u32::MAX;
    }
    let placed = u32::from(state.placed);
    let opacity = (state.opacity * 127.0).floor() as u32;
    (opacity << 25)
        | (placed << 24)
        | (opacity << 17)
        | (placed << 16)
        | (opacity << 9)
        | (placed << 8)
        | (opacity << 1)
        | placed
}
