//! The interaction engine: turns pointer and keyboard events into camera
//! changes, gesture updates and floor plan mutations.

use crate::camera::Camera;
use crate::canvas::FloorPlan;
use crate::config::EditorConfig;
use crate::edit::{EditIntent, Patch};
use crate::input::{InputState, KeyEvent, MouseButton, PointerEvent};
use crate::seat::SeatId;
use crate::selection::{DragState, EntityRef, PrimarySelection, SelectionRect};
use crate::shapes::{Circle, Polygon, Rectangle, Shape};
use crate::snap::snap_to_grid;
use crate::storage::{Storage, StorageResult};
use crate::text::{Text, TextId, TextStyle};
use crate::text_edit::{TextEditOutcome, TextEditSession};
use crate::tools::{Gesture, Overlays, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};

/// A floor plan editor: the plan, the camera, the active tool and every
/// piece of transient interaction state.
///
/// All handlers run synchronously and never fail; input they cannot use
/// (pointer outside the viewport, unknown ids, degenerate geometry) is
/// logged and dropped.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The persisted entities.
    pub plan: FloorPlan,
    /// View transform.
    pub camera: Camera,
    /// Primary selection for the edit surface.
    pub selection: PrimarySelection,
    tools: ToolManager,
    input: InputState,
    text_edit: Option<TextEditSession>,
    config: EditorConfig,
    viewport: Size,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty plan.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_plan(FloorPlan::new(), config)
    }

    /// Create an editor over an existing plan. An invalid config is replaced
    /// by the defaults.
    pub fn with_plan(plan: FloorPlan, config: EditorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{e}, falling back to the default config");
                EditorConfig::default()
            }
        };
        Self {
            plan,
            camera: Camera::with_limits(config.min_scale, config.max_scale),
            selection: PrimarySelection::new(),
            tools: ToolManager::new(),
            input: InputState::new(config.click_tolerance),
            text_edit: None,
            viewport: config.viewport,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport (screen pixels).
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// World rect currently on screen.
    pub fn visible_world_rect(&self) -> Rect {
        self.camera.visible_world_rect(self.viewport)
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.tools.gesture
    }

    pub fn primary(&self) -> Option<EntityRef> {
        self.selection.get()
    }

    /// Open inline text edit session, if any.
    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    /// Ephemeral overlays for the renderer.
    pub fn overlays(&self) -> Overlays {
        self.tools.overlays()
    }

    /// Switch tools. Any open text edit is committed and the current
    /// gesture is flushed; a drag in progress snaps back.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.commit_text_edit();
        let flushed = self.tools.set_tool(tool);
        self.revert_gesture(flushed);
        log::debug!("Tool set to {tool}");
    }

    fn revert_gesture(&mut self, gesture: Gesture) {
        if let Gesture::Dragging(drag) = gesture {
            self.plan.restore(drag.original);
        }
    }

    fn in_viewport(&self, screen: Point) -> bool {
        screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= self.viewport.width && screen.y <= self.viewport.height
    }

    fn hit_tolerance(&self) -> f64 {
        self.camera.screen_distance_to_world(self.config.hit_tolerance)
    }

    // Pointer events

    /// Process one pointer event (screen coordinates).
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                if !self.in_viewport(position) {
                    log::debug!("Ignoring press outside viewport at {position:?}");
                    return;
                }
                self.input.handle_pointer_event(event);
                self.handle_press(position, button);
            }
            PointerEvent::Move { position } => {
                if !self.in_viewport(position) {
                    return;
                }
                self.input.handle_pointer_event(event);
                self.handle_drag(position);
            }
            PointerEvent::Up { position, button } => {
                // Releases always end gestures, wherever they happen
                self.input.handle_pointer_event(event);
                self.handle_release(position, button);
            }
            PointerEvent::Scroll { position, delta } => {
                if !self.in_viewport(position) {
                    return;
                }
                self.input.handle_pointer_event(event);
                self.handle_scroll(position, delta);
            }
            PointerEvent::Leave => {
                self.input.handle_pointer_event(event);
                self.handle_leave();
            }
        }
    }

    fn handle_press(&mut self, screen: Point, button: MouseButton) {
        // Pressing the canvas blurs the inline editor
        self.commit_text_edit();

        if button == MouseButton::Middle {
            if matches!(self.tools.gesture, Gesture::Idle | Gesture::Ghost { .. }) {
                self.tools.gesture = Gesture::Panning { last_screen: screen };
            }
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let world = self.camera.screen_to_world(screen);
        match self.tools.current_tool {
            ToolKind::Pan => {
                self.tools.gesture = Gesture::Panning { last_screen: screen };
            }
            ToolKind::Select => self.press_select(world),
            tool if tool.is_drag_shape() => {
                self.tools.gesture = Gesture::DrawingDrag {
                    start: world,
                    current: world,
                };
            }
            // Seat, polygon and text clicks complete on release
            _ => {}
        }
    }

    fn press_select(&mut self, world: Point) {
        let hit = self.plan.hit_test(world, self.config.seat_radius, self.hit_tolerance());
        let Some(entity) = hit else {
            self.tools.gesture = Gesture::PendingClick { press: world };
            return;
        };

        if let EntityRef::Text(id) = entity {
            if self.input.is_double_click() {
                self.tools.gesture = Gesture::Idle;
                self.open_text_edit(id);
                return;
            }
        }

        self.selection.select(entity);
        self.tools.gesture = match self.plan.snapshot(entity) {
            Some(original) => Gesture::Dragging(DragState::new(world, original)),
            None => Gesture::Idle,
        };
    }

    fn handle_drag(&mut self, screen: Point) {
        let world = self.camera.screen_to_world(screen);
        let gesture = std::mem::take(&mut self.tools.gesture);
        self.tools.gesture = match gesture {
            Gesture::Panning { last_screen } => {
                self.camera.pan(screen - last_screen);
                Gesture::Panning { last_screen: screen }
            }
            Gesture::Idle | Gesture::Ghost { .. } if self.tools.current_tool == ToolKind::PlaceSeat => Gesture::Ghost {
                position: snap_to_grid(world, self.config.grid_size),
            },
            Gesture::DrawingDrag { start, .. } => Gesture::DrawingDrag { start, current: world },
            Gesture::Polygon { points, .. } => Gesture::Polygon {
                points,
                cursor: Some(world),
            },
            Gesture::PendingClick { press } if self.input.press_moved() => {
                self.plan.mark_seats_in_rect(SelectionRect::new(press, world).to_rect());
                Gesture::Marquee { start: press, end: world }
            }
            Gesture::Marquee { start, .. } => {
                self.plan.mark_seats_in_rect(SelectionRect::new(start, world).to_rect());
                Gesture::Marquee { start, end: world }
            }
            Gesture::Dragging(mut drag) if self.input.press_moved() => {
                let step = world - drag.current;
                self.plan.translate(drag.target, step);
                drag.current = world;
                Gesture::Dragging(drag)
            }
            other => other,
        };
    }

    fn handle_release(&mut self, screen: Point, button: MouseButton) {
        if button == MouseButton::Middle {
            if matches!(self.tools.gesture, Gesture::Panning { .. }) {
                self.tools.gesture = Gesture::Idle;
            }
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let was_click = self.input.finish_press();
        let world = self.camera.screen_to_world(screen);
        let gesture = std::mem::take(&mut self.tools.gesture);
        self.tools.gesture = match gesture {
            Gesture::Panning { .. } => Gesture::Idle,
            Gesture::DrawingDrag { start, .. } => {
                self.commit_drag_shape(start, world);
                Gesture::Idle
            }
            Gesture::Marquee { .. } => Gesture::Idle,
            Gesture::PendingClick { press } => {
                if was_click {
                    self.selection.clear();
                } else {
                    self.plan.mark_seats_in_rect(SelectionRect::new(press, world).to_rect());
                }
                Gesture::Idle
            }
            Gesture::Dragging(mut drag) => {
                if !was_click {
                    let step = world - drag.current;
                    if step != Vec2::ZERO {
                        self.plan.translate(drag.target, step);
                    }
                    drag.current = world;
                    log::debug!("Moved {:?} by {:?}", drag.target, drag.delta());
                }
                Gesture::Idle
            }
            other if was_click => self.click(world, other),
            other => other,
        };
    }

    /// A press/release without travel, for the tools that act on clicks.
    fn click(&mut self, world: Point, gesture: Gesture) -> Gesture {
        match self.tools.current_tool {
            ToolKind::PlaceSeat => {
                let position = snap_to_grid(world, self.config.grid_size);
                match self.plan.add_seat(position) {
                    Some(id) => log::info!("Placed {id} at ({}, {})", position.x, position.y),
                    None => log::warn!("No seat ids left, seat not placed"),
                }
                Gesture::Ghost { position }
            }
            ToolKind::DrawPolygon => self.click_polygon(world, gesture),
            ToolKind::PlaceText => {
                let defaults = &self.config.text;
                let text = Text::new(
                    world,
                    defaults.content.clone(),
                    TextStyle::new(defaults.font_size, defaults.fill.clone()),
                );
                let id = self.plan.add_text(text);
                log::info!("Placed text {id}");
                self.open_text_edit(id);
                Gesture::Idle
            }
            _ => gesture,
        }
    }

    fn click_polygon(&mut self, world: Point, gesture: Gesture) -> Gesture {
        let (mut points, cursor) = match gesture {
            Gesture::Polygon { points, cursor } => (points, cursor),
            _ => (Vec::new(), None),
        };

        if points.len() >= 2 && world.distance(points[0]) < self.config.polygon_close_tolerance {
            if points.len() < 3 {
                log::debug!("Polygon needs 3 vertices to close, has {}", points.len());
                return Gesture::Polygon { points, cursor };
            }
            let polygon = Shape::Polygon(Polygon::new(points));
            match self.plan.add_shape(polygon) {
                Ok(id) => log::info!("Added polygon {id}"),
                Err(e) => log::debug!("Rejected polygon: {e}"),
            }
            return Gesture::Idle;
        }

        let handle_radius = self.camera.screen_distance_to_world(self.config.polygon_handle_radius);
        match points.iter().position(|p| p.distance(world) <= handle_radius) {
            Some(index) => {
                points.remove(index);
            }
            None => points.push(world),
        }

        if points.is_empty() {
            Gesture::Idle
        } else {
            Gesture::Polygon {
                points,
                cursor: Some(world),
            }
        }
    }

    fn commit_drag_shape(&mut self, start: Point, end: Point) {
        let shape = match self.tools.current_tool {
            ToolKind::DrawRect => Shape::Rect(Rectangle::from_corners(start, end)),
            ToolKind::DrawCircle => Shape::Circle(Circle::through(start, end)),
            _ => return,
        };
        let kind = shape.kind_name();
        match self.plan.add_shape(shape) {
            Ok(id) => log::info!("Added {kind} {id}"),
            Err(e) => log::debug!("Rejected {kind}: {e}"),
        }
    }

    fn handle_scroll(&mut self, screen: Point, delta: Vec2) {
        if delta.y == 0.0 {
            return;
        }
        self.camera.zoom_wheel(screen, delta.y, self.config.zoom_step);
        // The world point under a hovering ghost moved with the zoom
        if let Gesture::Ghost { position } = &mut self.tools.gesture {
            *position = snap_to_grid(self.camera.screen_to_world(screen), self.config.grid_size);
        }
        if let Some(session) = self.text_edit.as_mut() {
            if let Some(text) = self.plan.text(session.text_id) {
                session.reposition(text, self.camera.world_to_screen(text.position), self.camera.scale);
            }
        }
    }

    fn handle_leave(&mut self) {
        match &mut self.tools.gesture {
            Gesture::Ghost { .. } => self.tools.gesture = Gesture::Idle,
            Gesture::Polygon { cursor, .. } => *cursor = None,
            _ => {}
        }
    }

    // Keyboard

    /// Process one key event.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.input.handle_key_event(event);
        let KeyEvent::Pressed(key) = event else {
            return;
        };

        if self.text_edit.is_some() {
            self.handle_text_edit_key(key);
            return;
        }

        let modifiers = self.input.modifiers;
        match key.as_str() {
            "Delete" | "Backspace" if self.tools.current_tool == ToolKind::Select => {
                if self.plan.marked_seat_count() > 0 {
                    self.delete_selected_seats();
                } else if let Some(entity) = self.selection.get() {
                    self.delete_entity(entity);
                }
            }
            _ if modifiers.ctrl || modifiers.meta || modifiers.alt => {}
            _ => {
                if let Some(tool) = ToolKind::from_shortcut(key) {
                    self.set_tool(tool);
                }
            }
        }
    }

    fn handle_text_edit_key(&mut self, key: &str) {
        let shift = self.input.modifiers.shift;
        let Some(session) = self.text_edit.as_mut() else {
            return;
        };
        match key {
            "Enter" if shift => session.insert_str("\n"),
            "Enter" => self.commit_text_edit(),
            "Escape" => self.cancel_text_edit(),
            "Backspace" => session.backspace(),
            _ if key.chars().count() == 1 => session.insert_str(key),
            _ => {}
        }
    }

    // Inline text edit

    /// Open the inline editor over a text, committing any open session.
    pub fn open_text_edit(&mut self, id: TextId) -> bool {
        self.commit_text_edit();
        let Some(text) = self.plan.text(id) else {
            return false;
        };
        let anchor = self.camera.world_to_screen(text.position);
        self.text_edit = Some(TextEditSession::open(text, anchor, self.camera.scale));
        true
    }

    /// Replace the open session's buffer.
    pub fn set_text_edit_buffer(&mut self, content: impl Into<String>) {
        if let Some(session) = self.text_edit.as_mut() {
            session.set_buffer(content);
        }
    }

    /// Close the inline editor, keeping its content.
    pub fn commit_text_edit(&mut self) {
        if let Some(session) = self.text_edit.take() {
            self.finish_text_edit(session.commit());
        }
    }

    /// Close the inline editor, discarding its content.
    pub fn cancel_text_edit(&mut self) {
        if let Some(session) = self.text_edit.take() {
            self.finish_text_edit(session.cancel());
        }
    }

    fn finish_text_edit(&mut self, outcome: TextEditOutcome) {
        match outcome {
            TextEditOutcome::Commit { text_id, content } => match self.plan.text_mut(text_id) {
                Some(text) => text.content = content,
                None => log::debug!("Text {text_id} vanished during edit"),
            },
            TextEditOutcome::Cancel { text_id } => log::debug!("Discarded edit of text {text_id}"),
        }
    }

    // Edit surface

    /// Apply an edit-surface intent to the primary selection.
    /// Returns `false` when nothing was changed.
    pub fn apply_edit(&mut self, intent: EditIntent) -> bool {
        let Some(entity) = self.selection.get() else {
            log::debug!("Edit intent without a primary selection");
            return false;
        };
        match intent {
            EditIntent::Save(patch) => match (entity, &patch) {
                (EntityRef::Seat(id), Patch::Seat(p)) => self.plan.save_seat(id, p),
                (EntityRef::Shape(id), Patch::Shape(p)) => self.plan.save_shape(id, p),
                (EntityRef::Text(id), Patch::Text(p)) => self.plan.save_text(id, p),
                _ => {
                    log::debug!("Patch does not match selected {entity:?}");
                    false
                }
            },
            EditIntent::Delete => self.delete_entity(entity),
        }
    }

    /// Delete one entity, dropping any state that refers to it.
    pub fn delete_entity(&mut self, entity: EntityRef) -> bool {
        if let (EntityRef::Text(id), Some(session)) = (entity, &self.text_edit) {
            if session.text_id == id {
                self.text_edit = None;
            }
        }
        if let Gesture::Dragging(drag) = &self.tools.gesture {
            if drag.target == entity {
                self.tools.gesture = Gesture::Idle;
            }
        }
        self.selection.forget(entity);
        let removed = self.plan.remove(entity);
        if removed {
            log::info!("Deleted {entity:?}");
        }
        removed
    }

    /// Delete every seat marked by the marquee. Returns the removed ids.
    pub fn delete_selected_seats(&mut self) -> Vec<SeatId> {
        let removed = self.plan.delete_selected_seats();
        if let Some(EntityRef::Seat(id)) = self.selection.get() {
            if removed.contains(&id) {
                self.selection.clear();
            }
        }
        if !removed.is_empty() {
            log::info!("Deleted {} selected seats", removed.len());
        }
        removed
    }

    // Persistence

    /// Persist the whole plan under `name`. Without a storage this only
    /// logs what would be saved.
    pub async fn save_all(&self, storage: Option<&dyn Storage>, name: &str) -> StorageResult<()> {
        let Some(storage) = storage else {
            log::info!(
                "save-all '{name}': {} seats, {} shapes, {} texts (no storage attached)",
                self.plan.seats.len(),
                self.plan.shapes.len(),
                self.plan.texts.len()
            );
            return Ok(());
        };
        if let Err(e) = storage.save(name, &self.plan).await {
            log::warn!("Failed to save plan '{name}': {e}");
            return Err(e);
        }
        log::info!("Saved plan '{name}' ({} entities)", self.plan.len());
        Ok(())
    }
}
