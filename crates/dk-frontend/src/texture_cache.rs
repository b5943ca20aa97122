//! GPU texture cache for decal rasters
//!
//! Uploads each decal's current raster to egui once and reuses the handle
//! until the instance's revision or displayed kind changes. Handles for
//! decals that were not drawn in a frame are released.

use std::collections::{HashMap, HashSet};

use dk_core::DecalId;
use dk_renderer::{DecalDraw, DrawKind};

struct CachedTexture {
    revision: u64,
    kind: DrawKind,
    handle: egui::TextureHandle,
}

/// Per-decal egui texture handles
#[derive(Default)]
pub struct DecalTextureCache {
    entries: HashMap<DecalId, CachedTexture>,
    used: HashSet<DecalId>,
}

impl DecalTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture id for a draw, uploading the raster when it changed
    pub fn texture_id(&mut self, ctx: &egui::Context, draw: &DecalDraw<'_>) -> egui::TextureId {
        self.used.insert(draw.id);

        if let Some(cached) = self.entries.get(&draw.id) {
            if cached.revision == draw.revision && cached.kind == draw.kind {
                return cached.handle.id();
            }
        }

        let raster = draw.texture.raster();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [raster.width() as usize, raster.height() as usize],
            raster.as_raw(),
        );
        let handle = ctx.load_texture(
            format!("decal-{}", draw.id),
            image,
            egui::TextureOptions::LINEAR,
        );
        tracing::trace!(
            "Uploaded {:?} texture for decal {} (revision {})",
            draw.kind,
            draw.id,
            draw.revision
        );

        let id = handle.id();
        self.entries.insert(
            draw.id,
            CachedTexture {
                revision: draw.revision,
                kind: draw.kind,
                handle,
            },
        );
        id
    }

    /// Release handles for decals not drawn since the last call
    pub fn end_frame(&mut self) {
        let used = std::mem::take(&mut self.used);
        self.entries.retain(|id, _| used.contains(id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_core::{DecalTransform, Region, Texture};
    use image::RgbaImage;

    fn draw(id: DecalId, texture: &Texture, revision: u64) -> DecalDraw<'_> {
        DecalDraw {
            id,
            region: Region::Chest,
            transform: DecalTransform::default(),
            texture,
            kind: DrawKind::Image,
            revision,
        }
    }

    #[test]
    fn test_reuses_until_revision_changes() {
        let ctx = egui::Context::default();
        let texture = Texture::from_raster(RgbaImage::new(4, 2)).unwrap();
        let id = DecalId::new();
        let mut cache = DecalTextureCache::new();

        let first = cache.texture_id(&ctx, &draw(id, &texture, 1));
        assert_eq!(cache.texture_id(&ctx, &draw(id, &texture, 1)), first);
        assert_ne!(cache.texture_id(&ctx, &draw(id, &texture, 2)), first);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_undrawn_decals_released() {
        let ctx = egui::Context::default();
        let texture = Texture::from_raster(RgbaImage::new(2, 2)).unwrap();
        let (a, b) = (DecalId::new(), DecalId::new());
        let mut cache = DecalTextureCache::new();

        cache.texture_id(&ctx, &draw(a, &texture, 1));
        cache.texture_id(&ctx, &draw(b, &texture, 1));
        cache.end_frame();
        assert_eq!(cache.len(), 2);

        cache.texture_id(&ctx, &draw(a, &texture, 1));
        cache.end_frame();
        assert_eq!(cache.len(), 1);
    }
}
