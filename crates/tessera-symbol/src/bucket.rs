use glam::Vec2;
use std::ops::Range;

use tessera_style::{SymbolLayout, TextJustify};

use crate::collision_box::{CollisionBox, CollisionBoxArray, CollisionCircle};
use crate::symbol_size::SizeSpec;
use crate::vertex::{CollisionVertexArray, OpacityVertexArray};

/// One row of a placed-symbol array: the per-justification render state the
/// opacity update writes and the shaders consume. `shift` is in ems; a
/// negative-infinity component culls the row in the vertex shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedSymbol {
    pub shift: Vec2,
    pub hidden: bool,
    pub cross_tile_id: u64,
}

impl PlacedSymbol {
    pub fn new(cross_tile_id: u64) -> Self {
        Self {
            shift: Vec2::ZERO,
            hidden: false,
            cross_tile_id,
        }
    }
}

/// Vertex-side buffers for one component (text or icon) of a bucket.
#[derive(Clone, Debug, Default)]
pub struct SymbolBuffers {
    /// Length of the layout vertex array owned by the renderer: four
    /// vertices per glyph quad, one packed opacity entry per quad.
    pub layout_vertex_len: usize,
    pub opacity_vertices: OpacityVertexArray,
    pub placed_symbols: Vec<PlacedSymbol>,
    /// Set by the opacity update when the arrays changed and the renderer
    /// should re-upload them.
    pub needs_upload: bool,
}

/// One logical symbol of a bucket, in stored (greedy-priority) order.
#[derive(Clone, Debug)]
pub struct SymbolInstance {
    /// Stable identity across tiles, assigned by the cross-tile index
    /// before placement. Never zero by the time placement runs.
    pub cross_tile_id: u64,
    pub anchor: Vec2,
    pub right_justified_text_symbol_index: i32,
    pub center_justified_text_symbol_index: i32,
    pub left_justified_text_symbol_index: i32,
    pub vertical_text_symbol_index: i32,
    pub icon_symbol_index: i32,
    pub num_horizontal_glyph_vertices: u32,
    pub num_vertical_glyph_vertices: u32,
    pub num_icon_vertices: u32,
    pub text_box_range: Range<u32>,
    pub text_circle_range: Range<u32>,
    pub icon_box_range: Range<u32>,
    pub feature_index: u32,
    /// Ems to tile units for this instance's text, fixed at layout time.
    pub text_box_scale: f32,
}

impl SymbolInstance {
    pub fn has_text(&self) -> bool {
        self.num_horizontal_glyph_vertices > 0 || self.num_vertical_glyph_vertices > 0
    }

    pub fn has_icon(&self) -> bool {
        self.num_icon_vertices > 0
    }

    pub fn justified_index(&self, justify: TextJustify) -> i32 {
        match justify {
            TextJustify::Left => self.left_justified_text_symbol_index,
            TextJustify::Center => self.center_justified_text_symbol_index,
            TextJustify::Right => self.right_justified_text_symbol_index,
        }
    }

    /// Horizontal placed-symbol indices in justification order.
    pub fn justified_indices(&self) -> [(TextJustify, i32); 3] {
        [
            (TextJustify::Left, self.left_justified_text_symbol_index),
            (TextJustify::Center, self.center_justified_text_symbol_index),
            (TextJustify::Right, self.right_justified_text_symbol_index),
        ]
    }

    /// All text placed-symbol indices, including the vertical variant.
    pub fn text_symbol_indices(&self) -> [i32; 4] {
        [
            self.left_justified_text_symbol_index,
            self.center_justified_text_symbol_index,
            self.right_justified_text_symbol_index,
            self.vertical_text_symbol_index,
        ]
    }
}

/// Per-symbol collision geometry, materialized from the tile's pool the
/// first time a pass needs it. `text_circle_used` is rewritten by each
/// placement pass for the debug overlay.
#[derive(Clone, Debug, Default)]
pub struct CollisionArrays {
    pub text_box: Option<CollisionBox>,
    pub icon_box: Option<CollisionBox>,
    pub text_circles: Vec<CollisionCircle>,
    pub text_circle_used: Vec<bool>,
    pub text_feature_index: u32,
    pub icon_feature_index: u32,
}

/// A tile's renderable symbols for one layer, plus the vertex arrays the
/// placement engine maintains for it.
#[derive(Debug)]
pub struct SymbolBucket {
    /// Non-zero, unique among live buckets.
    pub bucket_instance_id: u32,
    /// Primary layer this bucket was built for; other layers sharing the
    /// bucket are skipped by placement.
    pub layer_id: String,
    pub source_id: String,
    pub layout: SymbolLayout,
    pub text_size: SizeSpec,
    /// Position of the source layer and of this bucket within the tile's
    /// feature index, echoed into retained query data for hit queries.
    pub source_layer_index: u32,
    pub bucket_index: u32,
    pub symbol_instances: Vec<SymbolInstance>,
    pub text: SymbolBuffers,
    pub icon: SymbolBuffers,
    pub collision_box_vertices: Option<CollisionVertexArray>,
    pub collision_circle_vertices: Option<CollisionVertexArray>,
    pub collision_debug_needs_upload: bool,
    pub collision_arrays: Option<Vec<CollisionArrays>>,
    pub sort_features_by_y: bool,
    pub feature_sort_order: Option<Vec<u32>>,
    /// True right after a tile reload, so symbols re-appear without a fade.
    pub just_reloaded: bool,
    sorted_angle: Option<f32>,
}

impl SymbolBucket {
    pub fn new(
        bucket_instance_id: u32,
        layer_id: impl Into<String>,
        source_id: impl Into<String>,
        layout: SymbolLayout,
        text_size: SizeSpec,
    ) -> Self {
        Self {
            bucket_instance_id,
            layer_id: layer_id.into(),
            source_id: source_id.into(),
            layout,
            text_size,
            source_layer_index: 0,
            bucket_index: 0,
            symbol_instances: Vec::new(),
            text: SymbolBuffers::default(),
            icon: SymbolBuffers::default(),
            collision_box_vertices: None,
            collision_circle_vertices: None,
            collision_debug_needs_upload: false,
            collision_arrays: None,
            sort_features_by_y: false,
            feature_sort_order: None,
            just_reloaded: false,
            sorted_angle: None,
        }
    }

    pub fn has_text_data(&self) -> bool {
        self.text.layout_vertex_len > 0
    }

    pub fn has_icon_data(&self) -> bool {
        self.icon.layout_vertex_len > 0
    }

    pub fn has_collision_box_data(&self) -> bool {
        self.collision_box_vertices.is_some()
    }

    pub fn has_collision_circle_data(&self) -> bool {
        self.collision_circle_vertices.is_some()
    }

    /// Create empty collision debug arrays so the next opacity update
    /// populates them.
    pub fn enable_collision_debug(&mut self) {
        if self.collision_box_vertices.is_none() {
            self.collision_box_vertices = Some(CollisionVertexArray::default());
        }
        if self.collision_circle_vertices.is_none() {
            self.collision_circle_vertices = Some(CollisionVertexArray::default());
        }
    }

    /// Materialize each instance's view of the tile's collision pool.
    /// Idempotent; the pool itself is never written.
    pub fn ensure_collision_arrays(&mut self, pool: &CollisionBoxArray) {
        if self.collision_arrays.is_some() {
            return;
        }
        let arrays = self
            .symbol_instances
            .iter()
            .map(|instance| {
                let text_box = pool
                    .boxes
                    .get(instance.text_box_range.start as usize..instance.text_box_range.end as usize)
                    .and_then(|range| range.first().copied());
                let icon_box = pool
                    .boxes
                    .get(instance.icon_box_range.start as usize..instance.icon_box_range.end as usize)
                    .and_then(|range| range.first().copied());
                let text_circles: Vec<CollisionCircle> = pool
                    .circles
                    .get(
                        instance.text_circle_range.start as usize
                            ..instance.text_circle_range.end as usize,
                    )
                    .map(<[CollisionCircle]>::to_vec)
                    .unwrap_or_default();
                let text_circle_used = vec![false; text_circles.len()];
                CollisionArrays {
                    text_feature_index: text_box
                        .map_or(instance.feature_index, |b| b.feature_index),
                    icon_feature_index: icon_box
                        .map_or(instance.feature_index, |b| b.feature_index),
                    text_box,
                    icon_box,
                    text_circles,
                    text_circle_used,
                }
            })
            .collect();
        self.collision_arrays = Some(arrays);
    }

    /// Recompute the y-sorted feature order for the current view angle.
    /// No-op for buckets that don't sort by y or when the angle is
    /// unchanged since the last sort.
    pub fn sort_features(&mut self, angle: f32) {
        if !self.sort_features_by_y || self.sorted_angle == Some(angle) {
            return;
        }
        self.sorted_angle = Some(angle);

        let (sin, cos) = angle.sin_cos();
        let rotated_ys: Vec<f32> = self
            .symbol_instances
            .iter()
            .map(|i| (sin * i.anchor.x + cos * i.anchor.y).round())
            .collect();

        let mut order: Vec<usize> = (0..self.symbol_instances.len()).collect();
        order.sort_by(|&a, &b| {
            rotated_ys[a]
                .partial_cmp(&rotated_ys[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    self.symbol_instances[b]
                        .feature_index
                        .cmp(&self.symbol_instances[a].feature_index)
                })
        });

        self.feature_sort_order = Some(
            order
                .into_iter()
                .map(|i| self.symbol_instances[i].feature_index)
                .collect(),
        );
    }
}
