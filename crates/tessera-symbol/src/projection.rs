use glam::{Mat4, Vec3};
use tessera_tile::Transform;

/// Matrix from tile coordinates into the plane a label is laid out in.
///
/// Pitch-aligned labels live in the map plane: tile units scaled to pixels
/// at the current zoom, optionally rotated back to viewport axes when the
/// rotation alignment is `viewport`. Everything else is laid out directly
/// in screen pixels, which for this camera is the pos matrix itself.
pub fn label_plane_matrix(
    pos_matrix: &Mat4,
    pitch_with_map: bool,
    rotate_with_map: bool,
    transform: &Transform,
    pixels_to_tile_units: f32,
) -> Mat4 {
    if pitch_with_map {
        let scale = Mat4::from_scale(Vec3::new(
            1.0 / pixels_to_tile_units,
            1.0 / pixels_to_tile_units,
            1.0,
        ));
        if rotate_with_map {
            scale
        } else {
            Mat4::from_rotation_z(transform.angle) * scale
        }
    } else {
        *pos_matrix
    }
}
