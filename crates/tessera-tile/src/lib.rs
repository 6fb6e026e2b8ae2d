pub mod tile_id;
pub mod transform;

pub use tile_id::{CanonicalTileId, OverscaledTileId, UnwrappedTileId};
pub use transform::Transform;

/// Size of the tile coordinate system: geometry inside a tile spans
/// `[0, EXTENT]` on both axes regardless of the tile's on-screen size.
pub const EXTENT: f32 = 8192.0;

/// Convert a screen-pixel measure into tile units for a given tile at the
/// current zoom. One tile covers `tile_size * 2^(zoom - tile_z)` screen
/// pixels, mapped onto `EXTENT` tile units.
pub fn pixels_to_tile_units(tile_size: f32, tile_z: u8, zoom: f32, pixel_value: f32) -> f32 {
    pixel_value * EXTENT / (tile_size * 2.0f32.powf(zoom - f32::from(tile_z)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn pixels_to_tile_units_matches_the_closed_form() {
        // At the tile's own zoom one pixel is EXTENT / tile_size units.
        assert_approx_eq!(pixels_to_tile_units(512.0, 4, 4.0, 1.0), 16.0);
        // One zoom level in, the tile covers twice the pixels.
        assert_approx_eq!(pixels_to_tile_units(512.0, 4, 5.0, 1.0), 8.0);
        // Fractional zoom interpolates continuously.
        assert_approx_eq!(
            pixels_to_tile_units(512.0, 0, 0.5, 2.0),
            2.0 * EXTENT / (512.0 * 2.0f32.powf(0.5))
        );
    }
}
