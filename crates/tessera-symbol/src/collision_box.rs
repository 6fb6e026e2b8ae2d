use glam::Vec2;
use std::ops::Range;

/// An axis-aligned collision box in tile space. The anchor is in tile
/// units; the edges are offsets from the anchor in tile units and get
/// scaled to screen pixels at query time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionBox {
    pub anchor: Vec2,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub feature_index: u32,
}

impl CollisionBox {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// One circle of an along-line label's collision footprint. Center and
/// radius are in tile units, scaled to pixels at query time like box
/// edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionCircle {
    pub center: Vec2,
    pub radius: f32,
    pub feature_index: u32,
}

/// Per-tile pool of collision geometry. Symbol instances refer into it by
/// range; buckets materialize their per-symbol view lazily on first use.
#[derive(Clone, Debug, Default)]
pub struct CollisionBoxArray {
    pub boxes: Vec<CollisionBox>,
    pub circles: Vec<CollisionCircle>,
}

impl CollisionBoxArray {
    pub fn push_box(&mut self, b: CollisionBox) -> Range<u32> {
        let start = self.boxes.len() as u32;
        self.boxes.push(b);
        start..start + 1
    }

    pub fn push_circles(&mut self, circles: impl IntoIterator<Item = CollisionCircle>) -> Range<u32> {
        let start = self.circles.len() as u32;
        self.circles.extend(circles);
        start..self.circles.len() as u32
    }
}
