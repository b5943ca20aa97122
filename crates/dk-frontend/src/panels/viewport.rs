//! Garment viewport panel
//!
//! Draws the garment stand-in and every visible decal, then the handle
//! overlay of the selected decal. Decal quads are re-projected every frame
//! because the camera can orbit independently of the decals. Hit testing
//! uses the quads and handles drawn in the previous frame, i.e. what the
//! user is looking at when pressing.
//!
//! Decals reach the screen through the garment's named sub-meshes: a region
//! with no sub-mesh in the region table draws nothing.

use dk_core::{DecalId, DecalTransform, RegionTable};
use dk_renderer::{
    Handle, HandleLayout, MeshRegionRouter, OrbitGate, Projector, ScreenQuad, Viewport,
};
use glam::{Vec2, Vec3};

use crate::panels::Panel;
use crate::state::{AppState, PointerDownOutcome, SharedAppState, TransformController};
use crate::texture_cache::DecalTextureCache;
use crate::theme::palette;

/// World position of the garment model
const MESH_ORIGIN: Vec3 = Vec3::ZERO;

/// Named sub-mesh of the garment stand-in
struct GarmentMesh {
    name: &'static str,
    min: Vec3,
    max: Vec3,
}

/// Garment stand-in: torso halves and sleeves as boxes
const GARMENT_MESHES: [GarmentMesh; 5] = [
    GarmentMesh {
        name: "Hoodie_Chest",
        min: Vec3::new(-0.3, 0.2, 0.0),
        max: Vec3::new(0.3, 0.45, 0.16),
    },
    GarmentMesh {
        name: "Hoodie_Front",
        min: Vec3::new(-0.3, -0.3, 0.0),
        max: Vec3::new(0.3, 0.2, 0.16),
    },
    GarmentMesh {
        name: "Hoodie_Back",
        min: Vec3::new(-0.3, -0.3, -0.16),
        max: Vec3::new(0.3, 0.45, 0.0),
    },
    GarmentMesh {
        name: "Hoodie_Sleeve_R",
        min: Vec3::new(0.3, -0.1, -0.1),
        max: Vec3::new(0.34, 0.42, 0.1),
    },
    GarmentMesh {
        name: "Hoodie_Sleeve_L",
        min: Vec3::new(-0.34, -0.1, -0.1),
        max: Vec3::new(-0.3, 0.42, 0.1),
    },
];

/// Box edges as corner index pairs (bit 0 = x, bit 1 = y, bit 2 = z)
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Primary-button input for one frame, in viewport-local pixels
#[derive(Debug, Clone, Copy, Default)]
struct PointerInput {
    pos: Option<Vec2>,
    pressed: bool,
    released: bool,
    down: bool,
    hovered: bool,
    clicked: bool,
}

/// Garment viewport panel
pub struct ViewportPanel {
    controller: TransformController,
    router: MeshRegionRouter,
    textures: DecalTextureCache,
    /// Quads drawn last frame, in draw order
    quads: Vec<(DecalId, ScreenQuad)>,
    /// Handles drawn last frame
    handles: Option<HandleLayout>,
    /// The current primary press started on a handle
    press_on_handle: bool,
}

impl ViewportPanel {
    pub fn new(gate: OrbitGate, regions: RegionTable) -> Self {
        Self {
            controller: TransformController::new(gate),
            router: MeshRegionRouter::new(regions),
            textures: DecalTextureCache::new(),
            quads: Vec::new(),
            handles: None,
            press_on_handle: false,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.label("View:");
            if ui.button("Front").clicked() {
                state.camera.set_front_view();
            }
            if ui.button("Back").clicked() {
                state.camera.set_back_view();
            }
            if ui.button("Side").clicked() {
                state.camera.set_side_view();
            }
            if ui.button("Fit").clicked() {
                state.camera.fit_all(MESH_ORIGIN, 0.6);
            }
            ui.separator();
            ui.checkbox(&mut state.viewer.viewport.outline_all, "Outline all");
        });
    }

    /// Route primary-button input to the handles and decal picking
    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, state: &mut AppState) {
        let rect = response.rect;
        let local = |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);
        let input = ui.input(|i| PointerInput {
            pos: i.pointer.latest_pos().map(local),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            down: i.pointer.primary_down(),
            ..Default::default()
        });
        let input = PointerInput {
            hovered: response.hovered(),
            clicked: response.clicked(),
            ..input
        };
        self.apply_pointer(input, state);
    }

    fn apply_pointer(&mut self, input: PointerInput, state: &mut AppState) {
        if input.pressed && input.hovered {
            let hit = input
                .pos
                .zip(self.handles.as_ref())
                .and_then(|(pos, layout)| layout.hit(pos).map(|h| (h, pos)));
            if let Some((handle, pointer)) = hit {
                self.press_on_handle = true;
                let outcome =
                    self.controller
                        .pointer_down(handle, pointer, state.selected, &mut state.store);
                match outcome {
                    PointerDownOutcome::Duplicated(copy) => {
                        state.select(Some(copy));
                        state.modified = true;
                    }
                    PointerDownOutcome::Cleared(decal) => {
                        state.decodes.cancel(decal);
                        state.modified = true;
                    }
                    PointerDownOutcome::DragStarted | PointerDownOutcome::Ignored => {}
                }
            }
        }

        if self.controller.is_dragging() {
            if let Some(pos) = input.pos {
                if self.controller.pointer_move(pos, &mut state.store) {
                    state.modified = true;
                }
            }
            // Released anywhere, including outside the viewport
            if input.released || !input.down {
                self.controller.pointer_up();
            }
        }

        if input.clicked && !self.press_on_handle {
            let picked = input
                .pos
                .and_then(|pos| MeshRegionRouter::pick(pos, &self.quads));
            state.select(picked);
        }

        if input.released || !input.down {
            self.press_on_handle = false;
        }
    }

    fn handle_camera(&self, ui: &egui::Ui, response: &egui::Response, state: &mut AppState) {
        let config = &state.viewer.camera;
        let camera_drag = state.orbit.is_enabled()
            && !self.controller.is_dragging()
            && !self.press_on_handle;

        if camera_drag {
            let delta = response.drag_delta();
            let shift = ui.input(|i| i.modifiers.shift);
            if response.dragged_by(egui::PointerButton::Middle)
                || (shift && response.dragged_by(egui::PointerButton::Primary))
            {
                state.camera.pan(delta.x, delta.y, config.pan_sensitivity);
            } else if response.dragged_by(egui::PointerButton::Primary)
                || response.dragged_by(egui::PointerButton::Secondary)
            {
                let sensitivity = config.orbit_sensitivity;
                state
                    .camera
                    .orbit(-delta.x * sensitivity, delta.y * sensitivity);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                state.camera.zoom(scroll * 0.01, config.zoom_sensitivity);
            }
        }
    }

    fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
        state: &AppState,
    ) {
        let viewport = Viewport::new(rect.width(), rect.height());
        let projector = Projector::new(&state.camera, viewport);
        let overlay = &state.viewer.overlay;
        let to_screen = |p: Vec2| egui::pos2(rect.min.x + p.x, rect.min.y + p.y);

        painter.rect_filled(
            rect,
            0.0,
            palette::from_rgba_f32(state.viewer.viewport.background_color),
        );
        paint_garment(painter, &projector, to_screen, ctx.style().visuals.dark_mode);

        let outline = egui::Stroke::new(
            overlay.outline_width,
            palette::from_rgba_f32(overlay.outline_color),
        );

        if self.router.table() != state.store.table() {
            self.router = MeshRegionRouter::new(state.store.table().clone());
        }

        self.quads.clear();
        let meshes = GARMENT_MESHES.iter().map(|mesh| mesh.name);
        for draw in self.router.frame(meshes, &state.store) {
            if !faces_camera(&draw.transform, state.camera.position) {
                continue;
            }
            let Some(quad) = projector.project(&draw.transform, MESH_ORIGIN) else {
                continue;
            };
            let texture_id = self.textures.texture_id(ctx, &draw);
            paint_decal(painter, texture_id, &quad, to_screen);
            if state.viewer.viewport.outline_all {
                paint_outline(painter, &quad, to_screen, palette::with_alpha(outline.color, 90));
            }
            self.quads.push((draw.id, quad));
        }
        self.textures.end_frame();

        self.handles = state.selected.and_then(|selected| {
            let (_, quad) = self.quads.iter().find(|(id, _)| *id == selected)?;
            paint_outline(painter, quad, to_screen, outline.color);
            let layout = HandleLayout::from_quad(quad, overlay);
            paint_handles(painter, &layout, to_screen, overlay);
            Some(layout)
        });
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut guard = app_state.lock();
        let state = &mut *guard;

        self.toolbar(ui, state);

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }
        state
            .camera
            .update_aspect(Viewport::new(rect.width(), rect.height()).aspect());

        self.handle_pointer(ui, &response, state);
        self.handle_camera(ui, &response, state);
        self.paint(ui.ctx(), &painter, rect, state);

        // Cursor and tooltip feedback
        if let Some(session) = self.controller.session() {
            ui.ctx().set_cursor_icon(cursor_for(session.handle, true));
        } else if let Some(pos) = response.hover_pos() {
            let local = Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
            if let Some(handle) = self.handles.as_ref().and_then(|l| l.hit(local)) {
                ui.ctx().set_cursor_icon(cursor_for(handle, false));
                response.on_hover_text_at_pointer(handle.tooltip());
            }
        }
    }
}

/// Whether the decal's front side points towards the camera
fn faces_camera(transform: &DecalTransform, eye: Vec3) -> bool {
    let normal = transform.rotation_quat() * Vec3::Z;
    let center = transform.position + MESH_ORIGIN;
    normal.dot(eye - center) > 0.0
}

fn cursor_for(handle: Handle, dragging: bool) -> egui::CursorIcon {
    match handle {
        Handle::Move if dragging => egui::CursorIcon::Grabbing,
        Handle::Move => egui::CursorIcon::Grab,
        Handle::Rotate => egui::CursorIcon::Alias,
        Handle::Resize => egui::CursorIcon::ResizeNwSe,
        Handle::Delete | Handle::Duplicate => egui::CursorIcon::PointingHand,
    }
}

fn paint_garment(
    painter: &egui::Painter,
    projector: &Projector,
    to_screen: impl Fn(Vec2) -> egui::Pos2,
    dark_mode: bool,
) {
    let colors = if dark_mode {
        &palette::DARK
    } else {
        &palette::LIGHT
    };
    let stroke = egui::Stroke::new(1.0, colors.garment);

    for GarmentMesh { min, max, .. } in &GARMENT_MESHES {
        let corners: Vec<Option<Vec2>> = (0..8)
            .map(|i| {
                let corner = Vec3::new(
                    if i & 1 == 0 { min.x } else { max.x },
                    if i & 2 == 0 { min.y } else { max.y },
                    if i & 4 == 0 { min.z } else { max.z },
                );
                projector.project_point(corner + MESH_ORIGIN)
            })
            .collect();
        for (a, b) in BOX_EDGES {
            if let (Some(a), Some(b)) = (corners[a], corners[b]) {
                painter.line_segment([to_screen(a), to_screen(b)], stroke);
            }
        }
    }
}

fn paint_decal(
    painter: &egui::Painter,
    texture_id: egui::TextureId,
    quad: &ScreenQuad,
    to_screen: impl Fn(Vec2) -> egui::Pos2,
) {
    let uvs = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(0.0, 1.0),
        egui::pos2(1.0, 1.0),
    ];
    let mut mesh = egui::Mesh::with_texture(texture_id);
    for (corner, uv) in quad.corners.iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_screen(*corner),
            uv,
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);
    painter.add(egui::Shape::mesh(mesh));
}

fn paint_outline(
    painter: &egui::Painter,
    quad: &ScreenQuad,
    to_screen: impl Fn(Vec2) -> egui::Pos2,
    color: egui::Color32,
) {
    let points = quad.outline().iter().map(|p| to_screen(*p)).collect();
    painter.add(egui::Shape::closed_line(points, egui::Stroke::new(1.5, color)));
}

fn paint_handles(
    painter: &egui::Painter,
    layout: &HandleLayout,
    to_screen: impl Fn(Vec2) -> egui::Pos2,
    overlay: &dk_renderer::OverlayConfig,
) {
    let fill = palette::from_rgba_f32(overlay.handle_color);
    let delete = palette::from_rgba_f32(overlay.delete_color);
    let radius = layout.radius();

    for (handle, position) in layout.iter() {
        let center = to_screen(position);
        let color = if handle == Handle::Delete { delete } else { fill };
        painter.circle(
            center,
            radius,
            color,
            egui::Stroke::new(1.0, egui::Color32::WHITE),
        );
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            handle.icon(),
            egui::FontId::proportional(radius * 1.1),
            egui::Color32::WHITE,
        );
    }
}
