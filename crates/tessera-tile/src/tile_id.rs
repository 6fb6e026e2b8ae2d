/// Canonical tile address within one world copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalTileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// A canonical tile plus the world copy it is rendered in (non-zero `wrap`
/// across the antimeridian).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnwrappedTileId {
    pub wrap: i32,
    pub canonical: CanonicalTileId,
}

/// A tile as held by the pyramid: canonical address plus the zoom it is
/// rendered at. `overscaled_z >= canonical.z`; the gap means the tile's
/// data is reused for deeper zoom levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverscaledTileId {
    pub overscaled_z: u8,
    pub wrap: i32,
    pub canonical: CanonicalTileId,
}

impl OverscaledTileId {
    pub fn new(overscaled_z: u8, wrap: i32, z: u8, x: u32, y: u32) -> Self {
        debug_assert!(overscaled_z >= z, "overscaled zoom below canonical zoom");
        Self {
            overscaled_z,
            wrap,
            canonical: CanonicalTileId { z, x, y },
        }
    }

    pub fn to_unwrapped(self) -> UnwrappedTileId {
        UnwrappedTileId {
            wrap: self.wrap,
            canonical: self.canonical,
        }
    }

    pub fn overscale_factor(self) -> u32 {
        1 << (self.overscaled_z - self.canonical.z)
    }
}
