//! Primary selection, marquee and drag state.

use crate::seat::{Seat, SeatId};
use crate::shapes::{Shape, ShapeId};
use crate::text::{Text, TextId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Reference to one entity in any of the three stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Seat(SeatId),
    Shape(ShapeId),
    Text(TextId),
}

/// The single entity currently open in the edit surface.
///
/// Holding one `Option<EntityRef>` means selecting an entity of one kind
/// always drops a previous selection of another kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimarySelection {
    current: Option<EntityRef>,
}

impl PrimarySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, entity: EntityRef) {
        self.current = Some(entity);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<EntityRef> {
        self.current
    }

    pub fn is_selected(&self, entity: EntityRef) -> bool {
        self.current == Some(entity)
    }

    /// Clear the selection if it points at `entity`.
    pub fn forget(&mut self, entity: EntityRef) {
        if self.is_selected(entity) {
            self.current = None;
        }
    }
}

/// A selection rectangle for marquee selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Convert to a normalized kurbo Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

/// Copy of an entity taken before it is modified, used to revert.
#[derive(Debug, Clone, PartialEq)]
pub enum EntitySnapshot {
    Seat(Seat),
    Shape(Shape),
    Text(Text),
}

impl EntitySnapshot {
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            EntitySnapshot::Seat(seat) => EntityRef::Seat(seat.id),
            EntitySnapshot::Shape(shape) => EntityRef::Shape(shape.id()),
            EntitySnapshot::Text(text) => EntityRef::Text(text.id),
        }
    }
}

/// State of an in-progress entity drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// The entity being dragged.
    pub target: EntityRef,
    /// World point where the drag started.
    pub start: Point,
    /// Latest world point of the drag.
    pub current: Point,
    /// Entity state before the drag.
    pub original: EntitySnapshot,
}

impl DragState {
    pub fn new(start: Point, original: EntitySnapshot) -> Self {
        Self {
            target: original.entity_ref(),
            start,
            current: start,
            original,
        }
    }

    /// Net world-space movement of the drag.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }
}
