//! Decal Kit Renderer
//!
//! Viewport-side math for the decal editor: the orbit camera, screen-space
//! projection of decal quads, handle layout and hit testing, and routing of
//! decal textures onto the garment's sub-meshes.
//!
//! # Module Structure
//!
//! ```text
//! dk-renderer/
//! ├── camera.rs     # Orbit camera and the orbit enable gate
//! ├── config.rs     # Viewer configuration (viewport, camera, overlay)
//! ├── projector.rs  # Decal quad -> screen quad projection
//! ├── hit.rs        # 2D hit tests
//! ├── overlay.rs    # Handle buttons around the selected decal
//! └── router.rs     # Mesh name -> region -> decal texture
//! ```

pub mod camera;
pub mod config;
pub mod hit;
pub mod overlay;
pub mod projector;
pub mod router;

// Re-exports for convenience
pub use camera::{Camera, OrbitGate};
pub use config::{CameraConfig, OverlayConfig, ViewerConfig, ViewportConfig};
pub use overlay::{Handle, HandleLayout};
pub use projector::{Projector, ScreenQuad, ScreenRect, Viewport};
pub use router::{DecalDraw, DrawKind, MeshRegionRouter};
