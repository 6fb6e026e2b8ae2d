use std::sync::Arc;
use std::time::Duration;

use glam::{Mat4, Vec2};
use hashbrown::{HashMap, HashSet};
use tracing::trace_span;

use tessera_style::{AUTO_ANCHORS, Alignment, Anchor, AnchorSpec, SymbolLayer, TextJustify};
use tessera_symbol::{
    CollisionBox, CollisionBoxArray, CollisionIndex, FeatureIndex, PlacedCircles, SymbolBucket,
    SymbolBuffers, SymbolInstance, Tile, label_plane_matrix, text_box_scale,
};
use tessera_tile::{EXTENT, OverscaledTileId, Transform, pixels_to_tile_units};

use crate::collision_groups::CollisionGroups;
use crate::opacity::{JointOpacityState, JointPlacement, pack_opacity};

/// Feature-index metadata pinned for every bucket a placement pass touched,
/// so hit queries issued after the frame can still resolve features of
/// tiles that have since been recycled.
#[derive(Clone, Debug)]
pub struct RetainedQueryData {
    pub bucket_instance_id: u32,
    pub feature_index: Arc<FeatureIndex>,
    pub source_layer_index: u32,
    pub bucket_index: u32,
    pub tile_id: OverscaledTileId,
    pub feature_sort_order: Option<Vec<u32>>,
}

/// Remembered per-justification shifts (in ems) of a dynamically anchored
/// label. A negative-infinity component is the off-screen sentinel of a
/// justification that was not placed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JustifiedOffsets {
    pub left: Option<Vec2>,
    pub center: Option<Vec2>,
    pub right: Option<Vec2>,
}

impl JustifiedOffsets {
    fn get(&self, justify: TextJustify) -> Option<Vec2> {
        match justify {
            TextJustify::Left => self.left,
            TextJustify::Center => self.center,
            TextJustify::Right => self.right,
        }
    }

    fn snapshot(buffers: &SymbolBuffers, instance: &SymbolInstance) -> Self {
        let read = |index: i32| {
            (index >= 0).then(|| buffers.placed_symbols[index as usize].shift)
        };
        Self {
            left: read(instance.left_justified_text_symbol_index),
            center: read(instance.center_justified_text_symbol_index),
            right: read(instance.right_justified_text_symbol_index),
        }
    }

    /// First remembered offset that is not the off-screen sentinel, in
    /// left/center/right order.
    fn first_visible(&self) -> Option<Vec2> {
        [self.left, self.center, self.right]
            .into_iter()
            .flatten()
            .find(|shift| shift.x.is_finite())
    }
}

/// Translate a collision box by an alignment shift (tile units) plus a
/// dynamic offset (ems, converted at `text_box_scale`). The anchor point
/// itself stays put; only the edges move.
pub fn shift_dynamic_collision_box(
    collision_box: &CollisionBox,
    text_box_scale: f32,
    shift: Vec2,
    offset_em: Vec2,
) -> CollisionBox {
    let d = shift + offset_em * text_box_scale;
    CollisionBox {
        anchor: collision_box.anchor,
        x1: collision_box.x1 + d.x,
        y1: collision_box.y1 + d.y,
        x2: collision_box.x2 + d.x,
        y2: collision_box.y2 + d.y,
        feature_index: collision_box.feature_index,
    }
}

fn hide_unplaced_justifications(
    buffers: &mut SymbolBuffers,
    instance: &SymbolInstance,
    placed: TextJustify,
) {
    for (justify, index) in instance.justified_indices() {
        if index >= 0 && justify != placed {
            buffers.placed_symbols[index as usize].shift.x = f32::NEG_INFINITY;
        }
    }
}

fn shift_placed_symbols(buffers: &mut SymbolBuffers, instance: &SymbolInstance, shift: Vec2) {
    for index in instance.text_symbol_indices() {
        if index >= 0 {
            buffers.placed_symbols[index as usize].shift = shift;
        }
    }
}

/// One frame's symbol placement: runs the collision pass over every
/// visible (layer, tile) pair, commits the fade animation against the
/// previous frame's state, then writes the resulting opacities and shifts
/// into each bucket's vertex arrays.
pub struct Placement {
    transform: Transform,
    collision_index: CollisionIndex,
    fade_duration: Duration,
    collision_groups: CollisionGroups,

    placements: HashMap<u64, JointPlacement>,
    opacities: HashMap<u64, JointOpacityState>,
    dynamic_offsets: HashMap<u64, JustifiedOffsets>,
    retained_query_data: HashMap<u32, RetainedQueryData>,

    commit_time: Duration,
    last_placement_change_time: Duration,
    stale: bool,
    warned_trailing_auto: bool,
}

impl Placement {
    pub fn new(transform: &Transform, fade_duration: Duration, cross_source_collisions: bool) -> Self {
        Self {
            transform: transform.clone(),
            collision_index: CollisionIndex::new(transform.clone()),
            fade_duration,
            collision_groups: CollisionGroups::new(cross_source_collisions),
            placements: HashMap::new(),
            opacities: HashMap::new(),
            dynamic_offsets: HashMap::new(),
            retained_query_data: HashMap::new(),
            commit_time: Duration::ZERO,
            last_placement_change_time: Duration::ZERO,
            stale: false,
            warned_trailing_auto: false,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn collision_index(&self) -> &CollisionIndex {
        &self.collision_index
    }

    pub fn placements(&self) -> &HashMap<u64, JointPlacement> {
        &self.placements
    }

    pub fn opacities(&self) -> &HashMap<u64, JointOpacityState> {
        &self.opacities
    }

    pub fn dynamic_offsets(&self) -> &HashMap<u64, JustifiedOffsets> {
        &self.dynamic_offsets
    }

    pub fn retained_query_data(&self) -> &HashMap<u32, RetainedQueryData> {
        &self.retained_query_data
    }

    pub fn commit_time(&self) -> Duration {
        self.commit_time
    }

    /// Place every symbol of `layer`'s bucket in `tile`, in stored order.
    pub fn place_layer_tile(
        &mut self,
        layer: &SymbolLayer,
        tile: &mut Tile,
        show_collision_boxes: bool,
        seen_cross_tile_ids: &mut HashSet<u64>,
    ) {
        let _span = trace_span!("place_layer_tile", layer = layer.id.as_str()).entered();

        let tile_id = tile.id;
        let tile_size = tile.tile_size;
        let holding_for_fade = tile.holding_for_fade();
        let feature_index = tile.feature_index.clone();

        let Tile {
            collision_box_array,
            buckets,
            ..
        } = tile;
        let Some(bucket) = buckets.get_mut(&layer.id) else {
            return;
        };
        if bucket.layer_id != layer.id {
            return;
        }

        let text_pixel_ratio = tile_size / EXTENT;
        let pos_matrix = self.transform.calculate_pos_matrix(tile_id.to_unwrapped());
        let pixel_ratio = pixels_to_tile_units(
            tile_size,
            tile_id.overscaled_z,
            self.transform.zoom,
            1.0,
        );
        let text_label_plane_matrix = label_plane_matrix(
            &pos_matrix,
            bucket.layout.text_pitch_alignment == Alignment::Map,
            bucket.layout.text_rotation_alignment == Alignment::Map,
            &self.transform,
            pixel_ratio,
        );
        if let Some(feature_index) = feature_index {
            self.retained_query_data.insert(
                bucket.bucket_instance_id,
                RetainedQueryData {
                    bucket_instance_id: bucket.bucket_instance_id,
                    feature_index,
                    source_layer_index: bucket.source_layer_index,
                    bucket_index: bucket.bucket_index,
                    tile_id,
                    feature_sort_order: None,
                },
            );
        }

        if show_collision_boxes {
            bucket.enable_collision_debug();
        }

        self.place_layer_bucket(
            bucket,
            &pos_matrix,
            &text_label_plane_matrix,
            text_pixel_ratio,
            holding_for_fade,
            seen_cross_tile_ids,
            collision_box_array,
        );
    }

    fn place_layer_bucket(
        &mut self,
        bucket: &mut SymbolBucket,
        pos_matrix: &Mat4,
        text_label_plane_matrix: &Mat4,
        text_pixel_ratio: f32,
        holding_for_fade: bool,
        seen_cross_tile_ids: &mut HashSet<u64>,
        collision_box_array: &CollisionBoxArray,
    ) {
        let _span = trace_span!("place_layer_bucket").entered();

        let layout = bucket.layout.clone();
        let collision_group = self.collision_groups.get(&bucket.source_id);
        let layout_text_size = bucket.text_size.evaluate_for_zoom(self.transform.zoom);
        let em_scale = text_box_scale(text_pixel_ratio, layout_text_size);

        let always_show_text = layout.text_allow_overlap
            && (layout.icon_allow_overlap || !bucket.has_icon_data() || layout.icon_optional);
        let always_show_icon = layout.icon_allow_overlap
            && (layout.text_allow_overlap || !bucket.has_text_data() || layout.text_optional);

        bucket.ensure_collision_arrays(collision_box_array);

        for i in 0..bucket.symbol_instances.len() {
            let instance = bucket.symbol_instances[i].clone();
            if seen_cross_tile_ids.contains(&instance.cross_tile_id) {
                continue;
            }

            if holding_for_fade {
                // Mark as not placed, but leave the id unseen: a parent
                // tile later in the pass may carry the same symbol and
                // should still get to place it.
                self.placements.insert(
                    instance.cross_tile_id,
                    JointPlacement::new(false, false, false),
                );
                continue;
            }

            let arrays = bucket.collision_arrays.as_ref().expect("materialized above")[i].clone();

            let mut place_text = false;
            let mut place_icon = false;
            let mut offscreen = true;
            let mut placed_glyph_box = None;
            let mut placed_glyph_circles: Option<PlacedCircles> = None;
            let mut placed_icon_box = None;

            if let Some(text_box) = &arrays.text_box {
                match &layout.dynamic_text_anchor {
                    None => {
                        let placed = self.collision_index.place_collision_box(
                            text_box,
                            layout.text_allow_overlap,
                            text_pixel_ratio,
                            pos_matrix,
                            collision_group.filter,
                        );
                        place_text = placed.screen_box.is_some();
                        offscreen &= placed.offscreen;
                        placed_glyph_box = placed.screen_box;
                    }
                    Some(specs) => {
                        let anchors = self.resolve_anchor_candidates(specs, instance.has_icon());
                        for anchor in anchors {
                            let justify = anchor.justification();
                            let placed_index = instance.justified_index(justify);
                            if placed_index < 0 {
                                continue;
                            }

                            let alignment = anchor.alignment();
                            let shift = Vec2::new(
                                -alignment.horizontal * text_box.width(),
                                -alignment.vertical * text_box.height(),
                            );
                            let offset_em = anchor.dynamic_offset(layout.dynamic_text_offset);
                            let shifted =
                                shift_dynamic_collision_box(text_box, em_scale, shift, offset_em);

                            let placed = self.collision_index.place_collision_box(
                                &shifted,
                                layout.text_allow_overlap,
                                text_pixel_ratio,
                                pos_matrix,
                                collision_group.filter,
                            );
                            if placed.screen_box.is_none() {
                                continue;
                            }

                            bucket.text.placed_symbols[placed_index as usize].shift =
                                shift / em_scale + offset_em;
                            hide_unplaced_justifications(&mut bucket.text, &instance, justify);

                            place_text = true;
                            offscreen &= placed.offscreen;
                            placed_glyph_box = placed.screen_box;
                            break;
                        }
                    }
                }
            }

            if !arrays.text_circles.is_empty() {
                let placed = self.collision_index.place_collision_circles(
                    &arrays.text_circles,
                    layout.text_allow_overlap,
                    text_pixel_ratio,
                    text_label_plane_matrix,
                    collision_group.filter,
                );
                // Overlapping labels are legal with zero placed circles;
                // the decision still counts as placed text.
                place_text = !placed.circles.is_empty() || layout.text_allow_overlap;
                offscreen &= placed.offscreen;
                bucket.collision_arrays.as_mut().expect("materialized above")[i]
                    .text_circle_used
                    .copy_from_slice(&placed.used);
                placed_glyph_circles = Some(placed);
            }

            if let Some(icon_box) = &arrays.icon_box {
                let placed = self.collision_index.place_collision_box(
                    icon_box,
                    layout.icon_allow_overlap,
                    text_pixel_ratio,
                    pos_matrix,
                    collision_group.filter,
                );
                place_icon = placed.screen_box.is_some();
                offscreen &= placed.offscreen;
                placed_icon_box = placed.screen_box;
            }

            let icon_without_text = layout.text_optional || !instance.has_text();
            let text_without_icon = layout.icon_optional || !instance.has_icon();
            if !text_without_icon && !icon_without_text {
                let both = place_text && place_icon;
                place_text = both;
                place_icon = both;
            } else if !text_without_icon {
                place_text = place_icon && place_text;
            } else if !icon_without_text {
                place_icon = place_icon && place_text;
            }

            debug_assert!(instance.cross_tile_id != 0, "unassigned cross-tile id");
            debug_assert!(bucket.bucket_instance_id != 0, "unassigned bucket instance id");

            if place_text {
                if let Some(screen_box) = placed_glyph_box {
                    self.collision_index.insert_collision_box(
                        screen_box,
                        layout.text_ignore_placement,
                        bucket.bucket_instance_id,
                        arrays.text_feature_index,
                        collision_group.id,
                    );
                }
                if let Some(circles) = &placed_glyph_circles
                    && !circles.circles.is_empty()
                {
                    self.collision_index.insert_collision_circles(
                        &circles.circles,
                        layout.text_ignore_placement,
                        bucket.bucket_instance_id,
                        arrays.text_feature_index,
                        collision_group.id,
                    );
                }
            }
            if place_icon && let Some(screen_box) = placed_icon_box {
                self.collision_index.insert_collision_box(
                    screen_box,
                    layout.icon_ignore_placement,
                    bucket.bucket_instance_id,
                    arrays.icon_feature_index,
                    collision_group.id,
                );
            }

            self.placements.insert(
                instance.cross_tile_id,
                JointPlacement::new(
                    place_text || always_show_text,
                    place_icon || always_show_icon,
                    offscreen || bucket.just_reloaded,
                ),
            );
            seen_cross_tile_ids.insert(instance.cross_tile_id);
        }

        bucket.just_reloaded = false;
    }

    /// Expand a `dynamic-text-anchor` list into the anchors actually
    /// tried. `auto` as the first entry expands to the fixed search order
    /// (minus `center` when an icon shares the symbol); anywhere else it
    /// is ignored with a one-shot warning.
    fn resolve_anchor_candidates(&mut self, specs: &[AnchorSpec], has_icon: bool) -> Vec<Anchor> {
        let mut anchors = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            match spec.as_fixed() {
                Some(anchor) => anchors.push(anchor),
                None if i == 0 => {
                    anchors.extend(
                        AUTO_ANCHORS
                            .into_iter()
                            .filter(|&anchor| !(has_icon && anchor == Anchor::Center)),
                    );
                }
                None => {
                    if !self.warned_trailing_auto {
                        self.warned_trailing_auto = true;
                        log::warn!(
                            "'auto' is only valid as the first dynamic text anchor; ignoring entry {i}"
                        );
                    }
                }
            }
        }
        anchors
    }

    /// Merge this pass's decisions with the previous placement's animated
    /// opacities and advance the fade clock to `now`. Symbols absent from
    /// this pass keep fading out and are dropped once fully hidden.
    pub fn commit(&mut self, prev: Option<&Self>, now: Duration) {
        let _span = trace_span!("placement_commit").entered();
        self.commit_time = now;

        let increment = match prev {
            Some(prev) if !self.fade_duration.is_zero() => {
                now.saturating_sub(prev.commit_time).as_secs_f32()
                    / self.fade_duration.as_secs_f32()
            }
            _ => 1.0,
        };

        let mut placement_changed = false;
        let prev_opacities = prev.map(|p| &p.opacities);

        for (&cross_tile_id, placement) in &self.placements {
            let prev_state = prev_opacities.and_then(|o| o.get(&cross_tile_id));
            let state = JointOpacityState::new(
                prev_state,
                increment,
                placement.text,
                placement.icon,
                placement.skip_fade,
            );
            placement_changed = placement_changed
                || match prev_state {
                    Some(prev_state) => {
                        prev_state.text.placed != placement.text
                            || prev_state.icon.placed != placement.icon
                    }
                    None => placement.text || placement.icon,
                };
            self.opacities.insert(cross_tile_id, state);
        }

        if let Some(prev) = prev {
            for (&cross_tile_id, prev_state) in &prev.opacities {
                if self.opacities.contains_key(&cross_tile_id) {
                    continue;
                }
                let faded = JointOpacityState::new(Some(prev_state), increment, false, false, false);
                if !faded.is_hidden() {
                    self.opacities.insert(cross_tile_id, faded);
                }
                placement_changed =
                    placement_changed || prev_state.text.placed || prev_state.icon.placed;
            }

            // Keep remembered dynamic shifts for symbols still fading.
            for (&cross_tile_id, offsets) in &prev.dynamic_offsets {
                if self.opacities.contains_key(&cross_tile_id)
                    && !self.dynamic_offsets.contains_key(&cross_tile_id)
                {
                    self.dynamic_offsets.insert(cross_tile_id, *offsets);
                }
            }
        }

        self.last_placement_change_time = if placement_changed {
            now
        } else if let Some(prev) = prev {
            prev.last_placement_change_time
        } else {
            now
        };
    }

    /// Write current opacities and shifts into the vertex arrays of
    /// `layer`'s buckets, one tile at a time in the order given.
    pub fn update_layer_opacities<'a>(
        &mut self,
        layer: &SymbolLayer,
        tiles: impl IntoIterator<Item = &'a mut Tile>,
    ) {
        let _span = trace_span!("update_layer_opacities", layer = layer.id.as_str()).entered();
        let mut seen_cross_tile_ids = HashSet::new();
        for tile in tiles {
            let Tile {
                collision_box_array,
                buckets,
                id,
                ..
            } = tile;
            if let Some(bucket) = buckets.get_mut(&layer.id)
                && bucket.layer_id == layer.id
            {
                self.update_bucket_opacities(
                    bucket,
                    &mut seen_cross_tile_ids,
                    collision_box_array,
                    id.overscaled_z,
                );
            }
        }
    }

    fn update_bucket_opacities(
        &mut self,
        bucket: &mut SymbolBucket,
        seen_cross_tile_ids: &mut HashSet<u64>,
        collision_box_array: &CollisionBoxArray,
        overscaled_z: u8,
    ) {
        let _span = trace_span!("update_bucket_opacities").entered();

        bucket.text.opacity_vertices.clear();
        bucket.icon.opacity_vertices.clear();
        if let Some(vertices) = bucket.collision_box_vertices.as_mut() {
            vertices.clear();
        }
        if let Some(vertices) = bucket.collision_circle_vertices.as_mut() {
            vertices.clear();
        }

        let layout = bucket.layout.clone();
        let dynamic_placement = layout.dynamic_text_anchor.is_some();

        // Symbols never seen by a pass (tile placed after the last pass
        // started) show up fully visible when overlap allows it, without a
        // fade.
        let default_opacity = JointOpacityState::new(
            None,
            0.0,
            layout.text_allow_overlap
                && (layout.icon_allow_overlap || !bucket.has_icon_data() || layout.icon_optional),
            layout.icon_allow_overlap
                && (layout.text_allow_overlap || !bucket.has_text_data() || layout.text_optional),
            true,
        );
        let duplicate_opacity = JointOpacityState::new(None, 0.0, false, false, true);

        if (bucket.has_collision_box_data() || bucket.has_collision_circle_data())
            && bucket.collision_arrays.is_none()
        {
            bucket.ensure_collision_arrays(collision_box_array);
        }

        for i in 0..bucket.symbol_instances.len() {
            let instance = bucket.symbol_instances[i].clone();
            let cross_tile_id = instance.cross_tile_id;
            let is_duplicate = seen_cross_tile_ids.contains(&cross_tile_id);

            let opacity_state = if is_duplicate {
                duplicate_opacity
            } else if let Some(state) = self.opacities.get(&cross_tile_id) {
                *state
            } else {
                self.opacities.insert(cross_tile_id, default_opacity);
                default_opacity
            };

            if dynamic_placement
                && !is_duplicate
                && !self.dynamic_offsets.contains_key(&cross_tile_id)
            {
                self.dynamic_offsets.insert(
                    cross_tile_id,
                    JustifiedOffsets::snapshot(&bucket.text, &instance),
                );
            }

            seen_cross_tile_ids.insert(cross_tile_id);

            if instance.has_text() {
                let packed = pack_opacity(&opacity_state.text);
                let glyph_count = ((instance.num_horizontal_glyph_vertices
                    + instance.num_vertical_glyph_vertices)
                    / 4) as usize;
                bucket.text.opacity_vertices.push_repeated(packed, glyph_count);

                let hidden = opacity_state.text.is_hidden();
                for index in instance.text_symbol_indices() {
                    if index >= 0 {
                        bucket.text.placed_symbols[index as usize].hidden = hidden;
                    }
                }

                if is_duplicate || hidden {
                    // The duplicate's original renders from another tile;
                    // either way the shader culls on the sentinel.
                    shift_placed_symbols(
                        &mut bucket.text,
                        &instance,
                        Vec2::splat(f32::NEG_INFINITY),
                    );
                } else if dynamic_placement
                    && let Some(offsets) = self.dynamic_offsets.get(&cross_tile_id)
                {
                    for (justify, index) in instance.justified_indices() {
                        if index >= 0
                            && let Some(shift) = offsets.get(justify)
                        {
                            bucket.text.placed_symbols[index as usize].shift = shift;
                        }
                    }
                }
            }

            if instance.has_icon() {
                let packed = pack_opacity(&opacity_state.icon);
                bucket
                    .icon
                    .opacity_vertices
                    .push_repeated(packed, (instance.num_icon_vertices / 4) as usize);
                if instance.icon_symbol_index >= 0 {
                    bucket.icon.placed_symbols[instance.icon_symbol_index as usize].hidden =
                        opacity_state.icon.is_hidden();
                }
            }

            if let Some(collision_arrays) = bucket.collision_arrays.as_ref() {
                let arrays = &collision_arrays[i];

                if arrays.text_box.is_some()
                    && let Some(vertices) = bucket.collision_box_vertices.as_mut()
                {
                    let mut shift = Vec2::ZERO;
                    let mut used = true;
                    if dynamic_placement {
                        let offset = self
                            .dynamic_offsets
                            .get(&cross_tile_id)
                            .and_then(JustifiedOffsets::first_visible);
                        match offset {
                            Some(offset) if opacity_state.text.placed => {
                                shift = offset * instance.text_box_scale
                                    / Transform::zoom_scale(
                                        self.transform.zoom - f32::from(overscaled_z),
                                    );
                            }
                            Some(_) => {}
                            None => used = false,
                        }
                    }
                    vertices.push_quad(opacity_state.text.placed, !used, shift.x, shift.y);
                }

                if arrays.icon_box.is_some()
                    && let Some(vertices) = bucket.collision_box_vertices.as_mut()
                {
                    vertices.push_quad(opacity_state.icon.placed, false, 0.0, 0.0);
                }

                if !arrays.text_circles.is_empty()
                    && let Some(vertices) = bucket.collision_circle_vertices.as_mut()
                {
                    for &circle_used in &arrays.text_circle_used {
                        let not_used = is_duplicate || !circle_used;
                        vertices.push_quad(opacity_state.text.placed, not_used, 0.0, 0.0);
                    }
                }
            }
        }

        bucket.sort_features(self.transform.angle);
        if let Some(retained) = self.retained_query_data.get_mut(&bucket.bucket_instance_id) {
            retained.feature_sort_order = bucket.feature_sort_order.clone();
        }

        if bucket.has_text_data() {
            bucket.text.needs_upload = true;
        }
        if bucket.has_icon_data() {
            bucket.icon.needs_upload = true;
        }
        if bucket.has_collision_box_data() || bucket.has_collision_circle_data() {
            bucket.collision_debug_needs_upload = true;
        }

        debug_assert_eq!(
            bucket.text.opacity_vertices.len() * 4,
            bucket.text.layout_vertex_len,
            "text opacity entries out of sync with layout vertices"
        );
        debug_assert_eq!(
            bucket.icon.opacity_vertices.len() * 4,
            bucket.icon.layout_vertex_len,
            "icon opacity entries out of sync with layout vertices"
        );
    }

    /// Fraction of the fade completed at `now`, in `[0, 1]`.
    pub fn symbol_fade_change(&self, now: Duration) -> f32 {
        if self.fade_duration.is_zero() {
            return 1.0;
        }
        (now.saturating_sub(self.commit_time).as_secs_f32() / self.fade_duration.as_secs_f32())
            .clamp(0.0, 1.0)
    }

    /// True while any symbol may still be mid-fade, or a new pass was
    /// requested via [`Self::set_stale`].
    pub fn has_transitions(&self, now: Duration) -> bool {
        self.stale || now.saturating_sub(self.last_placement_change_time) < self.fade_duration
    }

    /// True while this placement's commit is fresh enough to keep reusing.
    pub fn still_recent(&self, now: Duration) -> bool {
        self.commit_time + self.fade_duration > now
    }

    /// Advisory: ask the host to schedule a fresh pass at the next
    /// opportunity. The placement itself stays valid.
    pub fn set_stale(&mut self) {
        self.stale = true;
    }
}
