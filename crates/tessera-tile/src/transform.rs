use glam::{Mat4, Vec2, Vec3};

use crate::{EXTENT, UnwrappedTileId};

/// Base tile size the world is measured in: at zoom `z` the full world is
/// `BASE_TILE_SIZE * 2^z` pixels wide.
pub const BASE_TILE_SIZE: f32 = 512.0;

/// The view state a placement pass is bound to. Cloned into the pass so a
/// camera move mid-frame cannot shear one pass's matrices.
///
/// The camera is a top-down orthographic one. Projected points still carry
/// their `w` component, so a perspective pos matrix supplied by a
/// different camera keeps working through the same pipeline.
#[derive(Clone, Debug)]
pub struct Transform {
    pub zoom: f32,
    /// Viewport rotation in radians, counter-clockwise.
    pub angle: f32,
    /// Viewport size in pixels.
    pub width: f32,
    pub height: f32,
    /// World position (pixels at the current zoom) shown at the viewport
    /// center.
    pub center: Vec2,
}

impl Transform {
    pub fn new(zoom: f32, width: f32, height: f32, center: Vec2) -> Self {
        Self {
            zoom,
            angle: 0.0,
            width,
            height,
            center,
        }
    }

    pub fn zoom_scale(z: f32) -> f32 {
        2.0f32.powf(z)
    }

    pub fn scale_zoom(scale: f32) -> f32 {
        scale.log2()
    }

    /// World width in pixels at the current zoom.
    pub fn world_size(&self) -> f32 {
        BASE_TILE_SIZE * Self::zoom_scale(self.zoom)
    }

    /// Distance from the camera to the viewport center plane. Constant for
    /// the orthographic camera, so projected perspective ratios come out as
    /// exactly one.
    pub fn camera_to_center_distance(&self) -> f32 {
        1.0
    }

    /// Matrix taking tile-local coordinates `[0, EXTENT]^2` of `tile` to
    /// screen pixels, with the viewport rotation applied about its center.
    pub fn calculate_pos_matrix(&self, tile: UnwrappedTileId) -> Mat4 {
        let tile_world_size = self.world_size() / Self::zoom_scale(f32::from(tile.canonical.z));
        let origin = Vec2::new(
            tile.canonical.x as f32 * tile_world_size + tile.wrap as f32 * self.world_size(),
            tile.canonical.y as f32 * tile_world_size,
        );

        Mat4::from_translation(Vec3::new(self.width / 2.0, self.height / 2.0, 0.0))
            * Mat4::from_rotation_z(self.angle)
            * Mat4::from_translation((origin - self.center).extend(0.0))
            * Mat4::from_scale(Vec3::new(
                tile_world_size / EXTENT,
                tile_world_size / EXTENT,
                1.0,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use glam::Vec4;

    fn project(m: &Mat4, x: f32, y: f32) -> Vec2 {
        let p = *m * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(p.x / p.w, p.y / p.w)
    }

    #[test]
    fn pos_matrix_spans_the_tile_world_size() {
        // Zoom 0, tile 0/0/0: the single tile covers the whole 512px world.
        let transform = Transform::new(0.0, 512.0, 512.0, Vec2::new(256.0, 256.0));
        let m = transform.calculate_pos_matrix(
            UnwrappedTileId {
                wrap: 0,
                canonical: crate::CanonicalTileId { z: 0, x: 0, y: 0 },
            });

        let tl = project(&m, 0.0, 0.0);
        let br = project(&m, EXTENT, EXTENT);
        assert_approx_eq!(tl.x, 0.0);
        assert_approx_eq!(tl.y, 0.0);
        assert_approx_eq!(br.x, 512.0);
        assert_approx_eq!(br.y, 512.0);
    }

    #[test]
    fn pos_matrix_honors_overzoom_and_tile_position() {
        // Zoom 2: four tiles across, each 512px; tile (1, 1) starts mid-world.
        let transform = Transform::new(2.0, 1024.0, 1024.0, Vec2::new(1024.0, 1024.0));
        let m = transform.calculate_pos_matrix(
            UnwrappedTileId {
                wrap: 0,
                canonical: crate::CanonicalTileId { z: 2, x: 1, y: 1 },
            });

        let tl = project(&m, 0.0, 0.0);
        assert_approx_eq!(tl.x, 512.0 - 1024.0 + 512.0);
        assert_approx_eq!(tl.y, 0.0);
    }

    #[test]
    fn rotation_pivots_on_the_viewport_center() {
        let mut transform = Transform::new(0.0, 512.0, 512.0, Vec2::new(256.0, 256.0));
        transform.angle = std::f32::consts::FRAC_PI_2;
        let m = transform.calculate_pos_matrix(
            UnwrappedTileId {
                wrap: 0,
                canonical: crate::CanonicalTileId { z: 0, x: 0, y: 0 },
            });

        // The world center maps to the viewport center regardless of angle.
        let c = project(&m, EXTENT / 2.0, EXTENT / 2.0);
        assert_approx_eq!(c.x, 256.0, 1e-3);
        assert_approx_eq!(c.y, 256.0, 1e-3);
    }
}
