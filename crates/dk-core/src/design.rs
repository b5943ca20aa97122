//! Design file serialization
//!
//! A design captures every decal instance of a [`DecalStore`]: region,
//! transform, visibility and content. Images are embedded as PNG bytes and
//! text is stored as content plus style, re-rasterized on load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::region::{Region, RegionTable};
use crate::store::DecalStore;
use crate::texture::{
    TextStyleConfig, TextureError, TextureResolver, TextureSource, decode_image, encode_png,
};
use crate::transform::{DecalTransform, TransformUpdate};

/// Current design file format version
pub const DESIGN_VERSION: u32 = 1;

/// Saved decal content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SavedSource {
    None,
    Image { png: Vec<u8> },
    Text { content: String, style: TextStyleConfig },
}

/// Saved decal instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDecal {
    pub region: Region,
    /// Whether this is the region's primary instance
    pub primary: bool,
    pub transform: DecalTransform,
    pub visible: bool,
    pub source: SavedSource,
    /// Uploaded image kept under active text, as PNG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_image_png: Option<Vec<u8>>,
}

/// Design file containing the full decal layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// File format version
    pub version: u32,
    /// Design name
    pub name: String,
    /// Region table the layout was made against
    pub regions: RegionTable,
    /// Decal instances in creation order
    pub decals: Vec<SavedDecal>,
}

impl Default for Design {
    fn default() -> Self {
        Self::new("Untitled Design")
    }
}

impl Design {
    /// Create an empty design
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: DESIGN_VERSION,
            name: name.into(),
            regions: RegionTable::default(),
            decals: Vec::new(),
        }
    }

    /// Snapshot a store
    pub fn capture(name: impl Into<String>, store: &DecalStore) -> Result<Self, DesignError> {
        let mut decals = Vec::with_capacity(store.len());
        for instance in store.instances() {
            let source = match &instance.source {
                TextureSource::None => SavedSource::None,
                TextureSource::Image { raster } => SavedSource::Image {
                    png: encode_png(raster)?,
                },
                TextureSource::Text { content, style } => SavedSource::Text {
                    content: content.clone(),
                    style: style.clone(),
                },
            };
            let cached_image_png = match (&instance.source, instance.image_texture()) {
                (TextureSource::Text { .. }, Some(image)) => Some(encode_png(image.raster())?),
                _ => None,
            };
            decals.push(SavedDecal {
                region: instance.region,
                primary: store.is_primary(instance.id),
                transform: instance.transform,
                visible: instance.visible,
                source,
                cached_image_png,
            });
        }

        Ok(Self {
            version: DESIGN_VERSION,
            name: name.into(),
            regions: store.table().clone(),
            decals,
        })
    }

    /// Rebuild a store from this design
    pub fn restore(&self, resolver: &mut TextureResolver) -> Result<DecalStore, DesignError> {
        let mut store = DecalStore::new(self.regions.clone());

        for saved in &self.decals {
            let id = store.restore(saved.region, saved.primary, saved.transform, saved.visible);
            if let Some(png) = &saved.cached_image_png {
                let image = decode_image(png)?;
                store.set_texture_source(id, TextureSource::image(&image), resolver);
            }
            let source = match &saved.source {
                SavedSource::None => continue,
                SavedSource::Image { png } => TextureSource::image(&decode_image(png)?),
                SavedSource::Text { content, style } => {
                    TextureSource::text(content.clone(), style.clone())
                }
            };
            store.set_texture_source(id, source, resolver);
            // Saved values win over what assigning the source implies
            store.set_visibility(id, saved.visible);
            store.set_transform(
                id,
                TransformUpdate {
                    position: Some(saved.transform.position),
                    rotation: Some(saved.transform.rotation),
                    uniform_scale: Some(saved.transform.uniform_scale),
                    aspect_ratio: Some(saved.transform.aspect_ratio),
                },
            );
        }

        Ok(store)
    }

    /// Save design to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DesignError> {
        let path = path.as_ref();
        let content = self.to_bytes()?;
        std::fs::write(path, content).map_err(|e| DesignError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize design to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, DesignError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DesignError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load design from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DesignError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| DesignError::Io(e.to_string()))?;
        Self::load_from_bytes(&content)
    }

    /// Load design from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, DesignError> {
        let content =
            std::str::from_utf8(data).map_err(|e| DesignError::Deserialize(e.to_string()))?;
        let design: Design =
            ron::from_str(content).map_err(|e| DesignError::Deserialize(e.to_string()))?;
        if design.version > DESIGN_VERSION {
            return Err(DesignError::UnsupportedVersion(design.version));
        }
        Ok(design)
    }
}

/// Design-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DesignError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Unsupported design version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{BlockGlyphs, SourceKind, Texture};
    use glam::Vec3;
    use image::RgbaImage;

    fn resolver() -> TextureResolver {
        TextureResolver::new(Box::new(BlockGlyphs::default()))
    }

    fn sample_store(resolver: &mut TextureResolver) -> DecalStore {
        let mut store = DecalStore::default();
        let chest = store.primary(Region::Chest);
        let style = TextStyleConfig {
            font_size: 20.0,
            ..Default::default()
        };
        store.set_texture_source(chest, TextureSource::text("Team", style), resolver);
        store.set_transform(chest, TransformUpdate::rotation(Vec3::new(0.0, 0.0, 0.3)));

        let back = store.primary(Region::Back);
        let logo = Texture::from_raster(RgbaImage::from_pixel(8, 4, image::Rgba([9, 9, 9, 255])))
            .unwrap();
        store.set_texture_source(back, TextureSource::image(&logo), resolver);
        store.duplicate(back);
        store
    }

    #[test]
    fn test_save_and_load_file() {
        let mut resolver = resolver();
        let store = sample_store(&mut resolver);
        let design = Design::capture("Jersey", &store).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jersey.ron");
        design.save(&path).unwrap();
        let loaded = Design::load(&path).unwrap();
        assert_eq!(loaded, design);
        assert_eq!(loaded.decals.len(), Region::ALL.len() + 1);
    }

    #[test]
    fn test_restore_rebuilds_layout() {
        let mut resolver = resolver();
        let store = sample_store(&mut resolver);
        let design = Design::capture("Jersey", &store).unwrap();
        let restored = design.restore(&mut resolver).unwrap();

        assert_eq!(restored.len(), store.len());
        let chest = restored.get(restored.primary(Region::Chest)).unwrap();
        assert_eq!(chest.source.kind(), SourceKind::Text);
        assert!(chest.visible);
        assert_eq!(
            chest.transform,
            store.get(store.primary(Region::Chest)).unwrap().transform
        );

        let backs: Vec<_> = restored.instances_in(Region::Back).collect();
        assert_eq!(backs.len(), 2);
        assert!(backs.iter().all(|b| b.image_texture().is_some()));
    }

    #[test]
    fn test_image_under_text_survives_reload() {
        let mut resolver = resolver();
        let mut store = DecalStore::default();
        let chest = store.primary(Region::Chest);
        let logo = Texture::from_raster(RgbaImage::from_pixel(6, 3, image::Rgba([1, 2, 3, 255])))
            .unwrap();
        store.set_texture_source(chest, TextureSource::image(&logo), &mut resolver);
        store.set_texture_source(
            chest,
            TextureSource::text("Hi", TextStyleConfig::default()),
            &mut resolver,
        );
        let saved_transform = store.transform(chest).unwrap();

        let bytes = Design::capture("Cached", &store).unwrap().to_bytes().unwrap();
        let restored = Design::load_from_bytes(&bytes)
            .unwrap()
            .restore(&mut resolver)
            .unwrap();

        let chest = restored.get(restored.primary(Region::Chest)).unwrap();
        assert_eq!(chest.source.kind(), SourceKind::Text);
        assert!(chest.text_texture().is_some());
        let image = chest.image_texture().unwrap();
        assert_eq!(image.raster().get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(chest.transform, saved_transform);

        // Other regions carry no cached image
        let design = Design::capture("Cached", &restored).unwrap();
        assert_eq!(
            design.decals.iter().filter(|d| d.cached_image_png.is_some()).count(),
            1
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut design = Design::default();
        design.version = DESIGN_VERSION + 1;
        let bytes = design.to_bytes().unwrap();
        assert!(matches!(
            Design::load_from_bytes(&bytes),
            Err(DesignError::UnsupportedVersion(_))
        ));
    }
}
