//! Interactive transform controller
//!
//! Turns pointer gestures on the handle overlay into absolute decal
//! transforms. A drag captures the pointer position and the decal transform
//! at press time; every move recomputes the transform from that snapshot, so
//! replaying the same pointer position always yields the same result.
//!
//! While a drag is active the camera orbit is disabled through the shared
//! [`OrbitGate`]. The gate is re-enabled on pointer-up wherever the pointer
//! is released, and again when the controller is dropped mid-drag.

use dk_core::constants::{DRAG_SENSITIVITY, MIN_UNIFORM_SCALE};
use dk_core::{DecalId, DecalStore, DecalTransform, TransformUpdate};
use dk_renderer::{Handle, OrbitGate};
use glam::Vec2;

/// Snapshot taken when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: Handle,
    pub decal: DecalId,
    pub start_pointer: Vec2,
    pub start_transform: DecalTransform,
}

impl DragSession {
    /// Transform for the pointer at `pointer`, relative to the snapshot
    pub fn transform_at(&self, pointer: Vec2) -> TransformUpdate {
        let delta = (pointer - self.start_pointer) * DRAG_SENSITIVITY;
        let start = self.start_transform;
        match self.handle {
            Handle::Rotate => {
                let mut rotation = start.rotation;
                rotation.z += delta.x;
                TransformUpdate::rotation(rotation)
            }
            Handle::Move => {
                let mut position = start.position;
                position.x += delta.x;
                // Screen y grows downwards
                position.y -= delta.y;
                TransformUpdate::position(position)
            }
            Handle::Resize => {
                TransformUpdate::uniform_scale((start.uniform_scale + delta.x).max(MIN_UNIFORM_SCALE))
            }
            Handle::Delete | Handle::Duplicate => TransformUpdate::default(),
        }
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of pressing a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDownOutcome {
    /// Nothing happened (no selection, or a drag is already running)
    Ignored,
    /// A drag session started
    DragStarted,
    /// The decal's content was removed
    Cleared(DecalId),
    /// A copy was added; carries the new instance
    Duplicated(DecalId),
}

/// Drives decal transforms from handle gestures
#[derive(Debug)]
pub struct TransformController {
    state: ControllerState,
    gate: OrbitGate,
}

impl TransformController {
    pub fn new(gate: OrbitGate) -> Self {
        Self {
            state: ControllerState::Idle,
            gate,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Active drag session, if any
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            ControllerState::Dragging(session) => Some(session),
            ControllerState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ControllerState::Dragging(_))
    }

    /// Press on a handle of the selected decal
    pub fn pointer_down(
        &mut self,
        handle: Handle,
        pointer: Vec2,
        selected: Option<DecalId>,
        store: &mut DecalStore,
    ) -> PointerDownOutcome {
        if self.is_dragging() {
            return PointerDownOutcome::Ignored;
        }
        let Some(decal) = selected else {
            return PointerDownOutcome::Ignored;
        };
        let Some(start_transform) = store.transform(decal) else {
            return PointerDownOutcome::Ignored;
        };

        match handle {
            Handle::Delete => {
                store.clear(decal);
                self.gate.set_enabled(true);
                tracing::debug!("Cleared decal {}", decal);
                PointerDownOutcome::Cleared(decal)
            }
            Handle::Duplicate => match store.duplicate(decal) {
                Some(copy) => PointerDownOutcome::Duplicated(copy),
                None => PointerDownOutcome::Ignored,
            },
            Handle::Move | Handle::Rotate | Handle::Resize => {
                self.state = ControllerState::Dragging(DragSession {
                    handle,
                    decal,
                    start_pointer: pointer,
                    start_transform,
                });
                self.gate.set_enabled(false);
                tracing::debug!("{:?} drag started on decal {}", handle, decal);
                PointerDownOutcome::DragStarted
            }
        }
    }

    /// Pointer moved anywhere; updates the dragged decal
    ///
    /// Returns whether a transform was written.
    pub fn pointer_move(&mut self, pointer: Vec2, store: &mut DecalStore) -> bool {
        let Some(session) = self.session() else {
            return false;
        };
        let update = session.transform_at(pointer);
        store.set_transform(session.decal, update)
    }

    /// Pointer released anywhere; ends the drag
    pub fn pointer_up(&mut self) {
        if let ControllerState::Dragging(session) = self.state {
            tracing::debug!("{:?} drag ended on decal {}", session.handle, session.decal);
        }
        self.state = ControllerState::Idle;
        self.gate.set_enabled(true);
    }
}

impl Drop for TransformController {
    fn drop(&mut self) {
        if self.is_dragging() {
            self.gate.set_enabled(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dk_core::texture::BlockGlyphs;
    use dk_core::{Region, TextStyleConfig, TextureResolver, TextureSource};

    fn setup() -> (TransformController, OrbitGate, DecalStore, DecalId) {
        let gate = OrbitGate::new();
        let mut store = DecalStore::default();
        let mut resolver = TextureResolver::new(Box::new(BlockGlyphs::default()));
        let id = store.primary(Region::Chest);
        store.set_texture_source(
            id,
            TextureSource::text("Team", TextStyleConfig::default()),
            &mut resolver,
        );
        (TransformController::new(gate.clone()), gate, store, id)
    }

    #[test]
    fn test_move_is_absolute() {
        let (mut controller, _, mut store, id) = setup();
        let start = store.transform(id).unwrap();
        let origin = Vec2::new(100.0, 100.0);

        controller.pointer_down(Handle::Move, origin, Some(id), &mut store);
        let target = origin + Vec2::new(40.0, 20.0);
        controller.pointer_move(target, &mut store);
        let first = store.transform(id).unwrap();
        controller.pointer_move(origin + Vec2::new(-300.0, 5.0), &mut store);
        controller.pointer_move(target, &mut store);
        let second = store.transform(id).unwrap();

        assert_eq!(first, second);
        assert_relative_eq!(first.position.x, start.position.x + 0.2, epsilon = 1e-6);
        assert_relative_eq!(first.position.y, start.position.y - 0.1, epsilon = 1e-6);
        assert_eq!(first.position.z, start.position.z);
    }

    #[test]
    fn test_rotate_uses_horizontal_delta() {
        let (mut controller, _, mut store, id) = setup();
        let start = store.transform(id).unwrap();

        controller.pointer_down(Handle::Rotate, Vec2::ZERO, Some(id), &mut store);
        controller.pointer_move(Vec2::new(200.0, 80.0), &mut store);
        let rotated = store.transform(id).unwrap();

        assert_relative_eq!(rotated.rotation.z, start.rotation.z + 1.0, epsilon = 1e-6);
        assert_eq!(rotated.rotation.x, start.rotation.x);
        assert_eq!(rotated.position, start.position);
    }

    #[test]
    fn test_resize_floor() {
        let (mut controller, _, mut store, id) = setup();
        let start = store.transform(id).unwrap();

        controller.pointer_down(Handle::Resize, Vec2::ZERO, Some(id), &mut store);
        controller.pointer_move(Vec2::new(-1000.0, 0.0), &mut store);
        assert_relative_eq!(store.transform(id).unwrap().uniform_scale, MIN_UNIFORM_SCALE);

        controller.pointer_move(Vec2::new(20.0, 300.0), &mut store);
        assert_relative_eq!(
            store.transform(id).unwrap().uniform_scale,
            start.uniform_scale + 0.1,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_second_press_ignored_while_dragging() {
        let (mut controller, _, mut store, id) = setup();
        let copy = store.duplicate(id).unwrap();

        controller.pointer_down(Handle::Move, Vec2::ZERO, Some(id), &mut store);
        let outcome = controller.pointer_down(Handle::Rotate, Vec2::ONE, Some(copy), &mut store);
        assert_eq!(outcome, PointerDownOutcome::Ignored);

        let session = controller.session().unwrap();
        assert_eq!(session.handle, Handle::Move);
        assert_eq!(session.decal, id);
        assert_eq!(store.len(), Region::ALL.len() + 1);
    }

    #[test]
    fn test_delete_only_clears_target() {
        let (mut controller, gate, mut store, id) = setup();
        let copy = store.duplicate(id).unwrap();

        let outcome = controller.pointer_down(Handle::Delete, Vec2::ZERO, Some(id), &mut store);
        assert_eq!(outcome, PointerDownOutcome::Cleared(id));
        assert!(!controller.is_dragging());
        assert!(gate.is_enabled());

        let cleared = store.get(id).unwrap();
        assert!(!cleared.visible);
        assert!(!cleared.has_content());
        let kept = store.get(copy).unwrap();
        assert!(kept.visible);
        assert!(kept.has_content());
    }

    #[test]
    fn test_duplicate_returns_copy() {
        let (mut controller, _, mut store, id) = setup();
        let outcome = controller.pointer_down(Handle::Duplicate, Vec2::ZERO, Some(id), &mut store);
        let PointerDownOutcome::Duplicated(copy) = outcome else {
            panic!("expected a duplicate, got {:?}", outcome);
        };
        assert_eq!(store.get(copy).unwrap().region, Region::Chest);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_no_selection_ignored() {
        let (mut controller, gate, mut store, _) = setup();
        let outcome = controller.pointer_down(Handle::Move, Vec2::ZERO, None, &mut store);
        assert_eq!(outcome, PointerDownOutcome::Ignored);
        assert!(gate.is_enabled());
        assert!(!controller.pointer_move(Vec2::ONE, &mut store));
    }

    #[test]
    fn test_orbit_released_on_pointer_up() {
        let (mut controller, gate, mut store, id) = setup();
        controller.pointer_down(Handle::Move, Vec2::ZERO, Some(id), &mut store);
        assert!(!gate.is_enabled());

        controller.pointer_up();
        assert!(gate.is_enabled());
        assert_eq!(*controller.state(), ControllerState::Idle);

        // Release with no drag is harmless
        controller.pointer_up();
        assert!(gate.is_enabled());
    }

    #[test]
    fn test_orbit_released_on_drop() {
        let (mut controller, gate, mut store, id) = setup();
        controller.pointer_down(Handle::Resize, Vec2::ZERO, Some(id), &mut store);
        assert!(!gate.is_enabled());

        drop(controller);
        assert!(gate.is_enabled());
    }

    #[test]
    fn test_removed_decal_stops_updates() {
        let (mut controller, _, mut store, id) = setup();
        let copy = store.duplicate(id).unwrap();
        controller.pointer_down(Handle::Move, Vec2::ZERO, Some(copy), &mut store);
        store.remove_duplicate(copy);

        assert!(!controller.pointer_move(Vec2::new(10.0, 10.0), &mut store));
        controller.pointer_up();
    }
}
