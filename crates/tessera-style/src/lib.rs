pub mod anchor;
pub mod layout;

pub use anchor::{AUTO_ANCHORS, Anchor, AnchorAlignment, AnchorSpec, TextJustify};
pub use layout::{Alignment, StyleError, SymbolLayer, SymbolLayout};
