//! Floor plan document: the seat, shape and text stores.

use crate::edit::{SeatPatch, ShapePatch, TextPatch};
use crate::seat::{Seat, SeatId};
use crate::selection::{EntityRef, EntitySnapshot};
use crate::shapes::{GeometryError, Shape, ShapeId};
use crate::text::{Text, TextId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A floor plan containing every persisted entity.
///
/// Each store is ordered back to front. Across stores, shapes lie below
/// texts and texts below seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    #[serde(default)]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub texts: Vec<Text>,
    /// Next seat id to hand out.
    #[serde(default)]
    next_seat_id: u64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            seats: Vec::new(),
            shapes: Vec::new(),
            texts: Vec::new(),
            next_seat_id: 1,
        }
    }

    /// Create an empty plan with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    // Seats

    /// Append a seat at `position` and return its fresh id, or `None` once
    /// the id space is exhausted.
    pub fn add_seat(&mut self, position: Point) -> Option<SeatId> {
        let id = SeatId(self.next_seat_id);
        self.next_seat_id = self.next_seat_id.checked_add(1)?;
        self.seats.push(Seat::new(id, position));
        Some(id)
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    /// Replace a seat's name and color. Returns `false` for an unknown id.
    pub fn save_seat(&mut self, id: SeatId, patch: &SeatPatch) -> bool {
        match self.seat_mut(id) {
            Some(seat) => {
                patch.apply(seat);
                true
            }
            None => false,
        }
    }

    pub fn remove_seat(&mut self, id: SeatId) -> Option<Seat> {
        let index = self.seats.iter().position(|s| s.id == id)?;
        Some(self.seats.remove(index))
    }

    /// Mark exactly the seats whose center lies inside `rect` (inclusive).
    /// Returns the number of marked seats.
    pub fn mark_seats_in_rect(&mut self, rect: Rect) -> usize {
        let mut count = 0;
        for seat in &mut self.seats {
            seat.is_selected = seat.is_inside(rect);
            if seat.is_selected {
                count += 1;
            }
        }
        count
    }

    pub fn marked_seat_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_selected).count()
    }

    /// Remove every marked seat, keeping the order of the rest.
    /// Returns the removed ids.
    pub fn delete_selected_seats(&mut self) -> Vec<SeatId> {
        let removed = self.seats.iter().filter(|s| s.is_selected).map(|s| s.id).collect();
        self.seats.retain(|s| !s.is_selected);
        removed
    }

    // Shapes

    /// Validate and append a shape.
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, GeometryError> {
        shape.validate()?;
        let id = shape.id();
        self.shapes.push(shape);
        Ok(id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Replace a shape's label and color. Returns `false` for an unknown id.
    pub fn save_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        match self.shape_mut(id) {
            Some(shape) => {
                patch.apply(shape);
                true
            }
            None => false,
        }
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    // Texts

    pub fn add_text(&mut self, text: Text) -> TextId {
        let id = text.id;
        self.texts.push(text);
        id
    }

    pub fn text(&self, id: TextId) -> Option<&Text> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_mut(&mut self, id: TextId) -> Option<&mut Text> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    /// Replace a text's content and style. Returns `false` for an unknown id.
    pub fn save_text(&mut self, id: TextId, patch: &TextPatch) -> bool {
        match self.text_mut(id) {
            Some(text) => {
                patch.apply(text);
                true
            }
            None => false,
        }
    }

    pub fn remove_text(&mut self, id: TextId) -> Option<Text> {
        let index = self.texts.iter().position(|t| t.id == id)?;
        Some(self.texts.remove(index))
    }

    // Cross-store operations

    /// Find the topmost entity at a world point.
    pub fn hit_test(&self, point: Point, seat_radius: f64, tolerance: f64) -> Option<EntityRef> {
        if let Some(seat) = self.seats.iter().rev().find(|s| s.hit_test(point, seat_radius, tolerance)) {
            return Some(EntityRef::Seat(seat.id));
        }
        if let Some(text) = self.texts.iter().rev().find(|t| t.hit_test(point, tolerance)) {
            return Some(EntityRef::Text(text.id));
        }
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_test(point, tolerance))
            .map(|s| EntityRef::Shape(s.id()))
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Seat(id) => self.seat(id).is_some(),
            EntityRef::Shape(id) => self.shape(id).is_some(),
            EntityRef::Text(id) => self.text(id).is_some(),
        }
    }

    /// Move an entity by a world-space delta.
    pub fn translate(&mut self, entity: EntityRef, delta: Vec2) -> bool {
        match entity {
            EntityRef::Seat(id) => self.seat_mut(id).map(|s| s.position += delta).is_some(),
            EntityRef::Shape(id) => self.shape_mut(id).map(|s| s.translate(delta)).is_some(),
            EntityRef::Text(id) => self.text_mut(id).map(|t| t.position += delta).is_some(),
        }
    }

    /// Remove an entity from whichever store holds it.
    pub fn remove(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Seat(id) => self.remove_seat(id).is_some(),
            EntityRef::Shape(id) => self.remove_shape(id).is_some(),
            EntityRef::Text(id) => self.remove_text(id).is_some(),
        }
    }

    /// Copy an entity's current state.
    pub fn snapshot(&self, entity: EntityRef) -> Option<EntitySnapshot> {
        match entity {
            EntityRef::Seat(id) => self.seat(id).cloned().map(EntitySnapshot::Seat),
            EntityRef::Shape(id) => self.shape(id).cloned().map(EntitySnapshot::Shape),
            EntityRef::Text(id) => self.text(id).cloned().map(EntitySnapshot::Text),
        }
    }

    /// Put a snapshot back in place of the entity it was taken from.
    /// Does nothing if the entity has been removed meanwhile.
    pub fn restore(&mut self, snapshot: EntitySnapshot) -> bool {
        match snapshot {
            EntitySnapshot::Seat(seat) => self.seat_mut(seat.id).map(|s| *s = seat).is_some(),
            EntitySnapshot::Shape(shape) => self.shape_mut(shape.id()).map(|s| *s = shape).is_some(),
            EntitySnapshot::Text(text) => self.text_mut(text.id).map(|t| *t = text).is_some(),
        }
    }

    /// Check if the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty() && self.shapes.is_empty() && self.texts.is_empty()
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.seats.len() + self.shapes.len() + self.texts.len()
    }

    /// Serialize the plan to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a plan from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut plan: Self = serde_json::from_str(json)?;
        plan.reseed_seat_ids()?;
        Ok(plan)
    }

    /// Make sure the next seat id is above every existing one.
    fn reseed_seat_ids(&mut self) -> Result<(), serde_json::Error> {
        let max_used = self.seats.iter().map(|s| s.id.0).max().unwrap_or(0);
        let next = max_used.checked_add(1).ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!(
                "seat id {max_used} leaves no room for new seats"
            ))
        })?;
        self.next_seat_id = self.next_seat_id.max(next);
        Ok(())
    }
}
