//! Edit-surface patches and intents.
//!
//! Patches replace the editable fields of an entity wholesale and never
//! touch geometry, so applying the same patch twice is a no-op the second
//! time.

use crate::seat::Seat;
use crate::shapes::Shape;
use crate::text::{Text, TextStyle};
use serde::{Deserialize, Serialize};

/// Editable seat fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl SeatPatch {
    pub fn apply(&self, seat: &mut Seat) {
        seat.name.clone_from(&self.name);
        seat.color.clone_from(&self.color);
    }
}

/// Editable shape fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ShapePatch {
    pub fn apply(&self, shape: &mut Shape) {
        let style = shape.style_mut();
        style.label.clone_from(&self.label);
        style.color.clone_from(&self.color);
    }
}

/// Editable text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPatch {
    pub content: String,
    pub style: TextStyle,
}

impl TextPatch {
    pub fn apply(&self, text: &mut Text) {
        text.content.clone_from(&self.content);
        text.style = self.style.clone();
    }
}

/// Any patch the edit surface can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Patch {
    Seat(SeatPatch),
    Shape(ShapePatch),
    Text(TextPatch),
}

/// Intent emitted by the edit surface for the primary selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditIntent {
    Save(Patch),
    Delete,
}
