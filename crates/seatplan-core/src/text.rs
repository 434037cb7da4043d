//! Free-standing text labels.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for texts.
pub type TextId = Uuid;

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal alignment of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual style of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub fill: String,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub text_align: TextAlign,
    /// CSS-like decoration, e.g. `underline`.
    #[serde(default)]
    pub text_decoration: Option<String>,
}

impl TextStyle {
    /// Width of an average glyph relative to the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.6;
    /// Line height relative to the font size.
    const LINE_HEIGHT_FACTOR: f64 = 1.2;

    pub fn new(font_size: f64, fill: impl Into<String>) -> Self {
        Self {
            font_size,
            fill: fill.into(),
            font_family: None,
            font_weight: FontWeight::default(),
            italic: false,
            text_align: TextAlign::default(),
            text_decoration: None,
        }
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * Self::LINE_HEIGHT_FACTOR
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0, "#000000")
    }
}

/// A text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub id: TextId,
    pub position: Point,
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    pub fn new(position: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            style,
        }
    }

    /// Approximate bounds; no font metrics are available in the core.
    pub fn bounds(&self) -> Rect {
        let longest = self.content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = self.content.lines().count().max(1);
        // Keep an empty text clickable
        let width = (longest as f64 * self.style.font_size * TextStyle::CHAR_WIDTH_FACTOR)
            .max(self.style.font_size * TextStyle::CHAR_WIDTH_FACTOR);
        let height = lines as f64 * self.style.line_height();
        Rect::from_origin_size(self.position, (width, height))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}
