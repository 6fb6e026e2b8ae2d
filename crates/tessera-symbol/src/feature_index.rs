use tessera_tile::OverscaledTileId;

/// Handle to a tile's feature lookup data. Placement pins one of these per
/// placed bucket (shared via `Arc`) so post-render hit queries can resolve
/// features after the tile itself has been recycled.
#[derive(Clone, Debug)]
pub struct FeatureIndex {
    pub tile_id: OverscaledTileId,
    /// Number of features indexed in the source tile; feature indices
    /// carried by collision geometry are below this bound.
    pub feature_count: u32,
}

impl FeatureIndex {
    pub fn new(tile_id: OverscaledTileId, feature_count: u32) -> Self {
        Self {
            tile_id,
            feature_count,
        }
    }
}
