//! Application state module

mod controller;
mod decode;

pub use controller::{ControllerState, DragSession, PointerDownOutcome, TransformController};
pub use decode::{DecodeQueue, DecodeResult, DecodeTicket};

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use dk_core::{
    DecalId, DecalStore, RegionTable, TextStyleConfig, TextureResolver, TransformUpdate,
};
use dk_renderer::{Camera, OrbitGate, ViewerConfig};

/// Actions that can be performed on the app state
#[derive(Debug, Clone)]
pub enum AppAction {
    // Design file actions
    /// Start an empty design
    NewDesign,
    /// Save design (to the current path when `None`)
    SaveDesign(Option<PathBuf>),
    /// Load a design file
    LoadDesign(PathBuf),

    // Decal actions
    /// Select a decal instance
    SelectDecal(Option<DecalId>),
    /// Decode an image file in the background and assign it
    LoadImage { decal: DecalId, path: PathBuf },
    /// Assign styled text
    SetText {
        decal: DecalId,
        content: String,
        style: TextStyleConfig,
    },
    /// Show or hide a decal
    SetVisibility { decal: DecalId, visible: bool },
    /// Edit transform fields numerically
    UpdateTransform {
        decal: DecalId,
        update: TransformUpdate,
    },
    /// Restore the region's default placement
    ResetTransform(DecalId),
    /// Hide a decal and drop its content
    ClearDecal(DecalId),
    /// Add a copy on the same region
    Duplicate(DecalId),
    /// Remove a copy (primaries stay)
    RemoveDuplicate(DecalId),
}

/// Application state
pub struct AppState {
    /// Every decal instance
    pub store: DecalStore,
    /// Text and image rasterization
    pub resolver: TextureResolver,
    /// Currently selected decal
    pub selected: Option<DecalId>,
    /// Viewport camera
    pub camera: Camera,
    /// Shared orbit enable switch
    pub orbit: OrbitGate,
    /// Viewer settings
    pub viewer: ViewerConfig,
    /// Style applied to freshly typed text
    pub text_style: TextStyleConfig,
    /// Pending background decodes
    pub decodes: DecodeQueue,
    /// Design name
    pub design_name: String,
    /// Design file path
    pub design_path: Option<PathBuf>,
    /// Has unsaved changes
    pub modified: bool,
    /// Last status message for the status bar
    pub status: Option<String>,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Create a state shaping text with system fonts
    pub fn new(regions: RegionTable, viewer: ViewerConfig, text_style: TextStyleConfig) -> Self {
        Self::with_resolver(
            regions,
            viewer,
            text_style,
            TextureResolver::with_system_fonts(),
        )
    }

    /// Create a state with an explicit texture resolver
    pub fn with_resolver(
        regions: RegionTable,
        viewer: ViewerConfig,
        text_style: TextStyleConfig,
        resolver: TextureResolver,
    ) -> Self {
        Self {
            store: DecalStore::new(regions),
            resolver,
            selected: None,
            camera: Camera::with_config(1.0, &viewer.camera),
            orbit: OrbitGate::new(),
            viewer,
            text_style,
            decodes: DecodeQueue::new(),
            design_name: "Untitled Design".to_string(),
            design_path: None,
            modified: false,
            status: None,
            pending_actions: Vec::new(),
        }
    }

    /// Select a decal; unknown ids clear the selection
    pub fn select(&mut self, id: Option<DecalId>) {
        self.selected = id.filter(|id| self.store.contains(*id));
        tracing::debug!("Selected decal {:?}", self.selected);
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Apply finished background decodes
    pub fn apply_decoded(&mut self) {
        for (decal, result) in self.decodes.drain() {
            match result {
                Ok(texture) => {
                    if self
                        .store
                        .apply_decoded(decal, Ok(texture), &mut self.resolver)
                    {
                        self.modified = true;
                        self.status = None;
                    }
                }
                Err(e) => {
                    self.status = Some(format!("Could not load image: {}", e));
                    self.store.apply_decoded(decal, Err(e), &mut self.resolver);
                }
            }
        }
    }

    /// Replace the store, e.g. after loading a design
    pub fn replace_store(&mut self, store: DecalStore, name: String, path: Option<PathBuf>) {
        self.store = store;
        self.selected = None;
        self.design_name = name;
        self.design_path = path;
        self.modified = false;
    }

    /// Reset to an empty design
    pub fn new_design(&mut self) {
        let regions = self.store.table().clone();
        self.replace_store(DecalStore::new(regions), "Untitled Design".to_string(), None);
        self.status = None;
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(state: AppState) -> SharedAppState {
    Arc::new(Mutex::new(state))
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::with_resolver(
        RegionTable::default(),
        ViewerConfig::default(),
        TextStyleConfig::default(),
        TextureResolver::new(Box::new(dk_core::texture::BlockGlyphs::default())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_core::{Region, Texture, TextureError};
    use image::RgbaImage;

    #[test]
    fn test_select_unknown_clears() {
        let mut state = test_state();
        let id = state.store.primary(Region::Back);
        state.select(Some(id));
        assert_eq!(state.selected, Some(id));
        state.select(Some(DecalId::new()));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_apply_decoded_results() {
        let mut state = test_state();
        let id = state.store.primary(Region::Front);
        let texture = Texture::from_raster(RgbaImage::new(30, 10)).unwrap();

        let ticket = state.decodes.start(id);
        state.decodes.finish(ticket, Ok(texture));
        state.apply_decoded();
        assert!(state.store.get(id).unwrap().visible);
        assert!(state.modified);

        let ticket = state.decodes.start(id);
        state.decodes.finish(ticket, Err(TextureError::Decode("bad header".into())));
        state.apply_decoded();
        assert!(state.status.as_deref().unwrap().contains("bad header"));
        assert!(state.store.get(id).unwrap().image_texture().is_some());
    }

    #[test]
    fn test_new_design_resets_store() {
        let mut state = test_state();
        let id = state.store.primary(Region::Chest);
        state.store.duplicate(id);
        state.select(Some(id));
        state.modified = true;

        state.new_design();
        assert_eq!(state.store.len(), Region::ALL.len());
        assert_eq!(state.selected, None);
        assert!(!state.modified);
    }
}
