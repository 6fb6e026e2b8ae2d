use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tessera_style::{SymbolLayer, SymbolLayout};
use tessera_symbol::{
    CollisionBox, CollisionBoxArray, CollisionCircle, FeatureIndex, PlacedSymbol, SizeSpec,
    SymbolBucket, Tile,
};
use tessera_tile::{OverscaledTileId, Transform};

/// Tile units per screen pixel for the test view: zoom 0, one 512px tile
/// over a 512px viewport.
pub const PX: f32 = tessera_tile::EXTENT / 512.0;

/// Tile units per em at the fixture's 24px text size.
pub const EM: f32 = tessera_symbol::ONE_EM * PX;

pub const FADE: Duration = Duration::from_millis(300);

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

pub fn test_transform() -> Transform {
    Transform::new(0.0, 512.0, 512.0, Vec2::new(256.0, 256.0))
}

/// Tile-unit anchor that projects to the given screen pixel position.
pub fn at_px(x: f32, y: f32) -> Vec2 {
    Vec2::new(x * PX, y * PX)
}

pub struct SymbolDesc {
    pub cross_tile_id: u64,
    pub anchor: Vec2,
    /// Box edges relative to the anchor, tile units.
    pub text_box: Option<(f32, f32, f32, f32)>,
    pub icon_box: Option<(f32, f32, f32, f32)>,
    pub circles: Vec<(Vec2, f32)>,
    pub glyph_quads: u32,
    pub icon_quads: u32,
    /// Create left/center/right placed-symbol rows instead of just the
    /// center one.
    pub justified_rows: bool,
}

impl SymbolDesc {
    /// A plain text label: box centered on the anchor, one glyph quad.
    pub fn text(cross_tile_id: u64, anchor: Vec2, half: f32) -> Self {
        Self {
            cross_tile_id,
            anchor,
            text_box: Some((-half, -half, half, half)),
            icon_box: None,
            circles: Vec::new(),
            glyph_quads: 1,
            icon_quads: 0,
            justified_rows: false,
        }
    }

    /// A dynamically anchored label: box hanging right-and-down from the
    /// anchor, rows for all three justifications.
    pub fn dynamic_text(cross_tile_id: u64, anchor: Vec2, width: f32, height: f32) -> Self {
        Self {
            cross_tile_id,
            anchor,
            text_box: Some((0.0, 0.0, width, height)),
            icon_box: None,
            circles: Vec::new(),
            glyph_quads: 1,
            icon_quads: 0,
            justified_rows: true,
        }
    }

    pub fn with_icon(mut self, half: f32) -> Self {
        self.icon_box = Some((-half, -half, half, half));
        self.icon_quads = 1;
        self
    }
}

pub fn push_symbol(bucket: &mut SymbolBucket, pool: &mut CollisionBoxArray, desc: &SymbolDesc) {
    let feature_index = bucket.symbol_instances.len() as u32;

    let text_box_range = match desc.text_box {
        Some((x1, y1, x2, y2)) => pool.push_box(CollisionBox {
            anchor: desc.anchor,
            x1,
            y1,
            x2,
            y2,
            feature_index,
        }),
        None => 0..0,
    };
    let icon_box_range = match desc.icon_box {
        Some((x1, y1, x2, y2)) => pool.push_box(CollisionBox {
            anchor: desc.anchor,
            x1,
            y1,
            x2,
            y2,
            feature_index,
        }),
        None => 0..0,
    };
    let text_circle_range = pool.push_circles(desc.circles.iter().map(|&(center, radius)| {
        CollisionCircle {
            center,
            radius,
            feature_index,
        }
    }));

    let mut push_text_row = || {
        let index = bucket.text.placed_symbols.len() as i32;
        bucket
            .text
            .placed_symbols
            .push(PlacedSymbol::new(desc.cross_tile_id));
        index
    };
    let (left, center, right) = if desc.justified_rows {
        (push_text_row(), push_text_row(), push_text_row())
    } else if desc.glyph_quads > 0 {
        (-1, push_text_row(), -1)
    } else {
        (-1, -1, -1)
    };

    let icon_index = if desc.icon_quads > 0 {
        let index = bucket.icon.placed_symbols.len() as i32;
        bucket
            .icon
            .placed_symbols
            .push(PlacedSymbol::new(desc.cross_tile_id));
        index
    } else {
        -1
    };

    bucket.text.layout_vertex_len += (desc.glyph_quads * 4) as usize;
    bucket.icon.layout_vertex_len += (desc.icon_quads * 4) as usize;

    bucket.symbol_instances.push(tessera_symbol::SymbolInstance {
        cross_tile_id: desc.cross_tile_id,
        anchor: desc.anchor,
        right_justified_text_symbol_index: right,
        center_justified_text_symbol_index: center,
        left_justified_text_symbol_index: left,
        vertical_text_symbol_index: -1,
        icon_symbol_index: icon_index,
        num_horizontal_glyph_vertices: desc.glyph_quads * 4,
        num_vertical_glyph_vertices: 0,
        num_icon_vertices: desc.icon_quads * 4,
        text_box_range,
        text_circle_range,
        icon_box_range,
        feature_index,
        text_box_scale: EM,
    });
}

/// A zoom-0 tile carrying one bucket for `layer` with the given symbols.
pub fn test_tile(
    layer: &SymbolLayer,
    bucket_instance_id: u32,
    symbols: &[SymbolDesc],
) -> Tile {
    let id = OverscaledTileId::new(0, 0, 0, 0, 0);
    let mut tile = Tile::new(id, 512.0);
    let mut bucket = SymbolBucket::new(
        bucket_instance_id,
        layer.id.clone(),
        layer.source.clone(),
        layer.layout.clone(),
        SizeSpec::Constant(tessera_symbol::ONE_EM),
    );
    for desc in symbols {
        push_symbol(&mut bucket, &mut tile.collision_box_array, desc);
    }
    tile.feature_index = Some(Arc::new(FeatureIndex::new(id, symbols.len() as u32)));
    tile.buckets.insert(layer.id.clone(), bucket);
    tile
}

pub fn poi_layer(layout: SymbolLayout) -> SymbolLayer {
    SymbolLayer::new("poi-label", "composite", layout)
}
