pub mod collision_groups;
pub mod opacity;
pub mod placement;

#[cfg(test)]
mod tests;

pub use collision_groups::{CollisionGroup, CollisionGroups};
pub use opacity::{JointOpacityState, JointPlacement, OpacityState, pack_opacity};
pub use placement::{JustifiedOffsets, Placement, RetainedQueryData, shift_dynamic_collision_box};
