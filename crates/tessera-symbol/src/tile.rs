use std::sync::Arc;

use hashbrown::HashMap;
use tessera_tile::OverscaledTileId;

use crate::bucket::SymbolBucket;
use crate::collision_box::CollisionBoxArray;
use crate::feature_index::FeatureIndex;

/// The slice of a loaded tile the placement engine consumes: its collision
/// pool, its symbol buckets by layer, and the fade-hold flag the pyramid
/// sets while a replacement tile fades in.
#[derive(Debug)]
pub struct Tile {
    pub id: OverscaledTileId,
    pub tile_size: f32,
    pub collision_box_array: CollisionBoxArray,
    pub feature_index: Option<Arc<FeatureIndex>>,
    pub buckets: HashMap<String, SymbolBucket>,
    pub holding_for_fade: bool,
}

impl Tile {
    pub fn new(id: OverscaledTileId, tile_size: f32) -> Self {
        Self {
            id,
            tile_size,
            collision_box_array: CollisionBoxArray::default(),
            feature_index: None,
            buckets: HashMap::new(),
            holding_for_fade: false,
        }
    }

    pub fn get_bucket(&self, layer_id: &str) -> Option<&SymbolBucket> {
        self.buckets.get(layer_id)
    }

    pub fn get_bucket_mut(&mut self, layer_id: &str) -> Option<&mut SymbolBucket> {
        self.buckets.get_mut(layer_id)
    }

    pub fn holding_for_fade(&self) -> bool {
        self.holding_for_fade
    }
}
