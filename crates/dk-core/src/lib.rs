//! Decal Kit core
//!
//! Data model for placing image and text decals on the named regions of a
//! garment mesh: regions and their mesh lookup table, decal transforms,
//! texture sources and their resolution, the placement store, and design
//! files.

pub mod constants;
pub mod design;
pub mod region;
pub mod store;
pub mod texture;
pub mod transform;

pub use design::{Design, DesignError};
pub use region::{Region, RegionPlacement, RegionTable, RegionTableError};
pub use store::{DecalId, DecalInstance, DecalStore};
pub use texture::{
    BackgroundShape, SourceKind, TextStyle, TextStyleConfig, Texture, TextureError,
    TextureResolver, TextureSource,
};
pub use transform::{DecalTransform, TransformUpdate};
