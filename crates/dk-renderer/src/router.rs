//! Mesh region routing
//!
//! Decides, per frame, which decal texture is attached to which sub-mesh.

use std::collections::HashSet;

use dk_core::{
    DecalId, DecalInstance, DecalStore, DecalTransform, Region, RegionTable, SourceKind, Texture,
};
use glam::Vec2;

use crate::projector::ScreenQuad;

/// Which texture of an instance is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Uploaded image
    Image,
    /// Rasterized text
    Text,
}

/// A decal to attach to a mesh this frame
#[derive(Debug, Clone)]
pub struct DecalDraw<'a> {
    /// Instance being drawn
    pub id: DecalId,
    /// Region the instance belongs to
    pub region: Region,
    /// Transform snapshot for this frame
    pub transform: DecalTransform,
    /// Texture to composite
    pub texture: &'a Texture,
    /// Which texture was chosen
    pub kind: DrawKind,
    /// Instance revision, for texture cache invalidation
    pub revision: u64,
}

/// Maps sub-meshes to regions and selects the decal drawn on each
#[derive(Debug, Clone, Default)]
pub struct MeshRegionRouter {
    table: RegionTable,
}

impl MeshRegionRouter {
    /// Create a router over a region table
    pub fn new(table: RegionTable) -> Self {
        Self { table }
    }

    /// The lookup table in use
    pub fn table(&self) -> &RegionTable {
        &self.table
    }

    /// Region a sub-mesh belongs to
    pub fn region_for_mesh(&self, mesh_name: &str) -> Option<Region> {
        self.table.region_for_mesh(mesh_name)
    }

    /// Texture to display for an instance, if any
    ///
    /// Active text wins when it has a raster; otherwise a cached image is
    /// shown. Hidden instances draw nothing.
    pub fn resolve(instance: &DecalInstance) -> Option<DecalDraw<'_>> {
        if !instance.visible {
            return None;
        }
        let (texture, kind) = match (instance.source.kind(), instance.text_texture()) {
            (SourceKind::Text, Some(text)) => (text, DrawKind::Text),
            _ => (instance.image_texture()?, DrawKind::Image),
        };
        Some(DecalDraw {
            id: instance.id,
            region: instance.region,
            transform: instance.transform,
            texture,
            kind,
            revision: instance.revision(),
        })
    }

    /// Decals attached to one sub-mesh; unknown meshes get none
    pub fn decals_for_mesh<'a>(&self, mesh_name: &str, store: &'a DecalStore) -> Vec<DecalDraw<'a>> {
        let Some(region) = self.region_for_mesh(mesh_name) else {
            return Vec::new();
        };
        store.instances_in(region).filter_map(Self::resolve).collect()
    }

    /// Decals attached to the given sub-meshes this frame
    ///
    /// Meshes are visited in order. A decal whose region spans several
    /// meshes is listed once, under the first of them.
    pub fn frame<'a, 'm>(
        &self,
        meshes: impl IntoIterator<Item = &'m str>,
        store: &'a DecalStore,
    ) -> Vec<DecalDraw<'a>> {
        let mut attached = HashSet::new();
        meshes
            .into_iter()
            .flat_map(|mesh| self.decals_for_mesh(mesh, store))
            .filter(|draw| attached.insert(draw.id))
            .collect()
    }

    /// Topmost decal under the pointer (later draws are on top)
    pub fn pick(pointer: Vec2, quads: &[(DecalId, ScreenQuad)]) -> Option<DecalId> {
        quads
            .iter()
            .rev()
            .find(|(_, quad)| quad.contains(pointer))
            .map(|(id, _)| *id)
    }
}
