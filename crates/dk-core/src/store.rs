//! Decal placement store
//!
//! Holds every decal instance: its region, transform, visibility and
//! content. Each region owns one primary instance created with the store and
//! never removed; duplicates add further instances bound to the same region.
//! All mutation goes through the methods here so a reader always observes a
//! complete transform.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DUPLICATE_OFFSET;
use crate::region::{Region, RegionTable};
use crate::texture::{SourceKind, Texture, TextureError, TextureResolver, TextureSource};
use crate::transform::{DecalTransform, TransformUpdate};

/// Identity of a decal instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecalId(Uuid);

impl DecalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DecalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One decal placed on a region
#[derive(Debug, Clone)]
pub struct DecalInstance {
    pub id: DecalId,
    pub region: Region,
    pub transform: DecalTransform,
    pub visible: bool,
    pub source: TextureSource,
    image: Option<Texture>,
    text: Option<Texture>,
    revision: u64,
}

impl DecalInstance {
    fn new(region: Region, transform: DecalTransform) -> Self {
        Self {
            id: DecalId::new(),
            region,
            transform,
            visible: false,
            source: TextureSource::None,
            image: None,
            text: None,
            revision: 0,
        }
    }

    /// Last decoded image texture, if any
    pub fn image_texture(&self) -> Option<&Texture> {
        self.image.as_ref()
    }

    /// Last rasterized text texture, if any
    pub fn text_texture(&self) -> Option<&Texture> {
        self.text.as_ref()
    }

    /// Bumped whenever a cached texture is replaced or dropped
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether any texture is cached
    pub fn has_content(&self) -> bool {
        self.image.is_some() || self.text.is_some()
    }
}

/// Region-keyed store of decal instances
#[derive(Debug, Clone)]
pub struct DecalStore {
    table: RegionTable,
    instances: HashMap<DecalId, DecalInstance>,
    /// Creation order, used for stable draw order
    order: Vec<DecalId>,
    primaries: HashMap<Region, DecalId>,
}

impl Default for DecalStore {
    fn default() -> Self {
        Self::new(RegionTable::default())
    }
}

impl DecalStore {
    /// Create a store with one empty primary instance per region
    pub fn new(table: RegionTable) -> Self {
        let mut store = Self {
            table,
            instances: HashMap::new(),
            order: Vec::new(),
            primaries: HashMap::new(),
        };
        for region in Region::ALL {
            let transform = DecalTransform::from_placement(&store.table.placement(region));
            let instance = DecalInstance::new(region, transform);
            store.primaries.insert(region, instance.id);
            store.insert(instance);
        }
        store
    }

    fn insert(&mut self, instance: DecalInstance) -> DecalId {
        let id = instance.id;
        self.order.push(id);
        self.instances.insert(id, instance);
        id
    }

    pub fn table(&self) -> &RegionTable {
        &self.table
    }

    /// Primary instance of a region
    pub fn primary(&self, region: Region) -> DecalId {
        self.primaries[&region]
    }

    pub fn is_primary(&self, id: DecalId) -> bool {
        self.primaries.values().any(|p| *p == id)
    }

    pub fn get(&self, id: DecalId) -> Option<&DecalInstance> {
        self.instances.get(&id)
    }

    pub fn contains(&self, id: DecalId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Copy of an instance's current transform
    pub fn transform(&self, id: DecalId) -> Option<DecalTransform> {
        self.instances.get(&id).map(|i| i.transform)
    }

    /// All instances in creation order
    pub fn instances(&self) -> impl Iterator<Item = &DecalInstance> {
        self.order.iter().filter_map(|id| self.instances.get(id))
    }

    /// Instances bound to a region, primary first
    pub fn instances_in(&self, region: Region) -> impl Iterator<Item = &DecalInstance> {
        self.instances().filter(move |i| i.region == region)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Merge a partial update into an instance's transform
    pub fn set_transform(&mut self, id: DecalId, update: TransformUpdate) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        instance.transform.apply(&update);
        true
    }

    pub fn set_visibility(&mut self, id: DecalId, visible: bool) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        instance.visible = visible;
        true
    }

    /// Assign content and recompute the aspect ratio from the resolved texture
    ///
    /// The instance becomes visible unless the source is `None` or resolves to
    /// nothing (empty text).
    pub fn set_texture_source(
        &mut self,
        id: DecalId,
        source: TextureSource,
        resolver: &mut TextureResolver,
    ) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };

        let texture = resolver.resolve(&source);
        match source.kind() {
            SourceKind::None => {
                instance.image = None;
                instance.text = None;
            }
            SourceKind::Image => instance.image = texture.clone(),
            SourceKind::Text => instance.text = texture.clone(),
        }
        instance.source = source;
        instance.revision += 1;

        if let Some(texture) = texture {
            instance.transform.apply(&TransformUpdate::aspect_ratio(texture.aspect_ratio()));
            instance.visible = true;
        }

        tracing::debug!(
            "Decal {} ({}) source set to {:?}",
            id,
            instance.region,
            instance.source.kind()
        );
        true
    }

    /// Apply the outcome of an asynchronous image decode
    ///
    /// A failed decode leaves the instance untouched.
    pub fn apply_decoded(
        &mut self,
        id: DecalId,
        result: Result<Texture, TextureError>,
        resolver: &mut TextureResolver,
    ) -> bool {
        match result {
            Ok(texture) => self.set_texture_source(id, TextureSource::image(&texture), resolver),
            Err(e) => {
                tracing::warn!("Image decode for decal {} failed: {}", id, e);
                false
            }
        }
    }

    /// Hide an instance and drop its content; the slot itself stays
    pub fn clear(&mut self, id: DecalId) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        instance.visible = false;
        instance.source = TextureSource::None;
        instance.image = None;
        instance.text = None;
        instance.revision += 1;
        true
    }

    /// Add a copy of an instance on the same region, slightly offset
    pub fn duplicate(&mut self, id: DecalId) -> Option<DecalId> {
        let original = self.instances.get(&id)?;
        let mut copy = original.clone();
        copy.id = DecalId::new();
        copy.revision = 0;
        copy.transform.position += Vec3::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET, 0.0);

        tracing::debug!("Duplicated decal {} as {}", id, copy.id);
        Some(self.insert(copy))
    }

    /// Remove a duplicated instance; primary instances are never removed
    pub fn remove_duplicate(&mut self, id: DecalId) -> Option<DecalInstance> {
        if self.is_primary(id) {
            return None;
        }
        self.order.retain(|o| *o != id);
        self.instances.remove(&id)
    }

    /// Restore the region's default placement, keeping the aspect ratio
    pub fn reset_transform(&mut self, id: DecalId) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        let placement = self.table.placement(instance.region);
        let aspect_ratio = instance.transform.aspect_ratio;
        instance.transform = DecalTransform {
            aspect_ratio,
            ..DecalTransform::from_placement(&placement)
        };
        true
    }

    /// Insert a fully specified instance, used when loading designs
    pub(crate) fn restore(
        &mut self,
        region: Region,
        primary: bool,
        transform: DecalTransform,
        visible: bool,
    ) -> DecalId {
        if primary {
            let id = self.primary(region);
            if let Some(instance) = self.instances.get_mut(&id) {
                instance.transform = transform;
                instance.visible = visible;
            }
            return id;
        }
        let mut instance = DecalInstance::new(region, transform);
        instance.visible = visible;
        self.insert(instance)
    }
}
