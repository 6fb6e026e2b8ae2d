use glam::{Mat4, Vec2, Vec4};
use tessera_tile::Transform;

use crate::collision_box::{CollisionBox, CollisionCircle};
use crate::grid_index::{GridEntry, GridIndex, ScreenAabb, ScreenCircle};

/// Padding band around the viewport that still accepts symbols, so a small
/// pan reveals already-placed labels instead of fading them in.
pub const VIEWPORT_PADDING: f32 = 100.0;

/// Outcome of a box query. `screen_box` is `Some` when the candidate was
/// accepted; `offscreen` means it landed in the padding band outside the
/// visible viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBox {
    pub screen_box: Option<ScreenAabb>,
    pub offscreen: bool,
}

/// Outcome of a circle query. Empty `circles` means rejected (or entirely
/// out of the indexed area); `used` flags which input circles contributed.
#[derive(Clone, Debug, Default)]
pub struct PlacedCircles {
    pub circles: Vec<ScreenCircle>,
    pub used: Vec<bool>,
    pub offscreen: bool,
}

/// Screen-space acceptor for symbol geometry. One instance belongs to one
/// placement pass; accepted geometry is inserted back so later candidates
/// see it as an obstruction. Ignore-placement entries live in a second
/// grid that answers hit queries but never blocks.
pub struct CollisionIndex {
    pub transform: Transform,
    grid: GridIndex,
    ignored_grid: GridIndex,
    screen_right_boundary: f32,
    screen_bottom_boundary: f32,
    grid_right_boundary: f32,
    grid_bottom_boundary: f32,
}

impl CollisionIndex {
    pub fn new(transform: Transform) -> Self {
        let grid_max = Vec2::new(
            transform.width + 2.0 * VIEWPORT_PADDING,
            transform.height + 2.0 * VIEWPORT_PADDING,
        );
        Self {
            screen_right_boundary: transform.width + VIEWPORT_PADDING,
            screen_bottom_boundary: transform.height + VIEWPORT_PADDING,
            grid_right_boundary: grid_max.x,
            grid_bottom_boundary: grid_max.y,
            grid: GridIndex::new(Vec2::ZERO, grid_max),
            ignored_grid: GridIndex::new(Vec2::ZERO, grid_max),
            transform,
        }
    }

    /// Project a tile-space point into padded grid coordinates. The
    /// perspective ratio scales label geometry back to constant pixel size
    /// under a perspective pos matrix; the orthographic transform yields
    /// exactly one.
    fn project_anchor(&self, matrix: &Mat4, point: Vec2) -> (Vec2, f32) {
        let p = *matrix * Vec4::new(point.x, point.y, 0.0, 1.0);
        let screen = Vec2::new(p.x / p.w, p.y / p.w) + Vec2::splat(VIEWPORT_PADDING);
        let ratio = 0.5 + 0.5 * (self.transform.camera_to_center_distance() / p.w);
        (screen, ratio)
    }

    fn is_inside_grid(&self, min: Vec2, max: Vec2) -> bool {
        max.x >= 0.0 && min.x < self.grid_right_boundary && max.y >= 0.0
            && min.y < self.grid_bottom_boundary
    }

    fn is_offscreen(&self, min: Vec2, max: Vec2) -> bool {
        max.x < VIEWPORT_PADDING
            || min.x >= self.screen_right_boundary
            || max.y < VIEWPORT_PADDING
            || min.y >= self.screen_bottom_boundary
    }

    pub fn place_collision_box(
        &self,
        collision_box: &CollisionBox,
        allow_overlap: bool,
        text_pixel_ratio: f32,
        pos_matrix: &Mat4,
        filter: Option<u16>,
    ) -> PlacedBox {
        let (anchor, ratio) = self.project_anchor(pos_matrix, collision_box.anchor);
        let tile_to_viewport = text_pixel_ratio * ratio;
        let min = anchor + Vec2::new(collision_box.x1, collision_box.y1) * tile_to_viewport;
        let max = anchor + Vec2::new(collision_box.x2, collision_box.y2) * tile_to_viewport;
        let aabb = ScreenAabb { min, max };

        if !self.is_inside_grid(min, max)
            || (!allow_overlap && self.grid.hit_test_box(&aabb, filter))
        {
            return PlacedBox {
                screen_box: None,
                offscreen: false,
            };
        }

        PlacedBox {
            screen_box: Some(aabb),
            offscreen: self.is_offscreen(min, max),
        }
    }

    /// Place an along-line label's circles. A single obstructed circle
    /// rejects the whole label; circles projecting outside the indexed
    /// area are skipped and reported unused.
    pub fn place_collision_circles(
        &self,
        circles: &[CollisionCircle],
        allow_overlap: bool,
        text_pixel_ratio: f32,
        label_plane_matrix: &Mat4,
        filter: Option<u16>,
    ) -> PlacedCircles {
        let mut placed = PlacedCircles {
            circles: Vec::with_capacity(circles.len()),
            used: vec![false; circles.len()],
            offscreen: true,
        };

        for (i, circle) in circles.iter().enumerate() {
            let (center, ratio) = self.project_anchor(label_plane_matrix, circle.center);
            let radius = circle.radius * text_pixel_ratio * ratio;
            let extent = Vec2::splat(radius);
            if !self.is_inside_grid(center - extent, center + extent) {
                continue;
            }

            let screen_circle = ScreenCircle { center, radius };
            if !allow_overlap && self.grid.hit_test_circle(&screen_circle, filter) {
                placed.circles.clear();
                placed.used.fill(false);
                placed.offscreen = false;
                return placed;
            }

            placed.offscreen &= self.is_offscreen(center - extent, center + extent);
            placed.used[i] = true;
            placed.circles.push(screen_circle);
        }

        placed
    }

    pub fn insert_collision_box(
        &mut self,
        screen_box: ScreenAabb,
        ignore_placement: bool,
        bucket_instance_id: u32,
        feature_index: u32,
        collision_group_id: u16,
    ) {
        let entry = GridEntry {
            bucket_instance_id,
            feature_index,
            collision_group_id,
        };
        if ignore_placement {
            self.ignored_grid.insert_box(screen_box, entry);
        } else {
            self.grid.insert_box(screen_box, entry);
        }
    }

    pub fn insert_collision_circles(
        &mut self,
        circles: &[ScreenCircle],
        ignore_placement: bool,
        bucket_instance_id: u32,
        feature_index: u32,
        collision_group_id: u16,
    ) {
        let entry = GridEntry {
            bucket_instance_id,
            feature_index,
            collision_group_id,
        };
        for &circle in circles {
            if ignore_placement {
                self.ignored_grid.insert_circle(circle, entry);
            } else {
                self.grid.insert_circle(circle, entry);
            }
        }
    }
}
