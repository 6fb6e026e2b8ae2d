pub mod bucket;
pub mod collision_box;
pub mod collision_index;
pub mod feature_index;
pub mod grid_index;
pub mod projection;
pub mod symbol_size;
pub mod tile;
pub mod vertex;

pub use bucket::{CollisionArrays, PlacedSymbol, SymbolBucket, SymbolBuffers, SymbolInstance};
pub use collision_box::{CollisionBox, CollisionBoxArray, CollisionCircle};
pub use collision_index::{CollisionIndex, PlacedBox, PlacedCircles, VIEWPORT_PADDING};
pub use feature_index::FeatureIndex;
pub use grid_index::{GridEntry, GridIndex, ScreenAabb, ScreenCircle};
pub use projection::label_plane_matrix;
pub use symbol_size::{ONE_EM, SizeSpec, text_box_scale};
pub use tile::Tile;
pub use vertex::{CollisionVertex, CollisionVertexArray, OpacityVertexArray};
