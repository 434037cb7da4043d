//! Tool system for the floor plan editor.

use crate::selection::DragState;
use crate::shapes::{Circle, Rectangle, Shape};
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    PlaceSeat,
    Pan,
    DrawRect,
    DrawCircle,
    DrawPolygon,
    PlaceText,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Select,
        ToolKind::PlaceSeat,
        ToolKind::Pan,
        ToolKind::DrawRect,
        ToolKind::DrawCircle,
        ToolKind::DrawPolygon,
        ToolKind::PlaceText,
    ];

    /// Keyboard shortcut selecting this tool.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Select => 'v',
            ToolKind::PlaceSeat => 's',
            ToolKind::Pan => 'h',
            ToolKind::DrawRect => 'r',
            ToolKind::DrawCircle => 'c',
            ToolKind::DrawPolygon => 'p',
            ToolKind::PlaceText => 't',
        }
    }

    /// Tool for a key name, case-insensitive.
    pub fn from_shortcut(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|t| t.shortcut() == c)
    }

    /// Whether the tool turns a press-drag-release into a new shape.
    pub fn is_drag_shape(self) -> bool {
        matches!(self, ToolKind::DrawRect | ToolKind::DrawCircle)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::PlaceSeat => "seat",
            ToolKind::Pan => "pan",
            ToolKind::DrawRect => "rect",
            ToolKind::DrawCircle => "circle",
            ToolKind::DrawPolygon => "polygon",
            ToolKind::PlaceText => "text",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The current gesture. All ephemeral interaction state lives here, so
/// replacing it with `Idle` clears every preview at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Seat tool hovering: snapped world position of the ghost seat.
    Ghost { position: Point },
    /// Dragging the view; screen position of the previous event.
    Panning { last_screen: Point },
    /// Rect/circle tool between press and release (world points).
    DrawingDrag { start: Point, current: Point },
    /// Polygon tool accumulating vertices; `cursor` is the latest pointer
    /// position for the rubber band.
    Polygon { points: Vec<Point>, cursor: Option<Point> },
    /// Select tool rubber band (world points).
    Marquee { start: Point, end: Point },
    /// Select tool moving an entity.
    Dragging(DragState),
    /// Select tool pressed on empty canvas; becomes a marquee once the
    /// pointer travels, or a deselecting click on release.
    PendingClick { press: Point },
}

/// Ghost seat shown under the pointer by the seat tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub position: Point,
}

impl GhostPreview {
    /// Guide lines tangent to the ghost (horizontal at `y ± radius`, vertical
    /// at `x ± radius`), spanning the visible world rect.
    pub fn guides(&self, visible: Rect, radius: f64) -> [Line; 4] {
        let Point { x, y } = self.position;
        [
            Line::new((visible.x0, y - radius), (visible.x1, y - radius)),
            Line::new((visible.x0, y + radius), (visible.x1, y + radius)),
            Line::new((x - radius, visible.y0), (x - radius, visible.y1)),
            Line::new((x + radius, visible.y0), (x + radius, visible.y1)),
        ]
    }
}

/// In-progress polygon as drawn on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPreview {
    /// Committed vertices, drawn as an open line with a handle on each.
    pub vertices: Vec<Point>,
    /// Segment from the last vertex to the pointer.
    pub rubber_band: Option<Line>,
}

/// Ephemeral overlays handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    pub ghost: Option<GhostPreview>,
    pub preview_shape: Option<Shape>,
    pub polygon: Option<PolygonPreview>,
    pub marquee: Option<Rect>,
}

impl Overlays {
    pub fn is_empty(&self) -> bool {
        self.ghost.is_none() && self.preview_shape.is_none() && self.polygon.is_none() && self.marquee.is_none()
    }
}

/// Manages the current tool and its gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current gesture of the tool.
    pub gesture: Gesture,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, flushing the gesture. The flushed gesture is
    /// returned so the caller can undo its side effects.
    pub fn set_tool(&mut self, tool: ToolKind) -> Gesture {
        self.current_tool = tool;
        self.flush()
    }

    /// Drop the current gesture.
    pub fn flush(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    /// Shape the rect/circle tool would create for a drag.
    /// Rectangles keep signed extents so dragging in any direction previews.
    pub fn drag_shape(&self, start: Point, current: Point) -> Option<Shape> {
        match self.current_tool {
            ToolKind::DrawRect => Some(Shape::Rect(Rectangle::new(
                start,
                current.x - start.x,
                current.y - start.y,
            ))),
            ToolKind::DrawCircle => Some(Shape::Circle(Circle::through(start, current))),
            _ => None,
        }
    }

    /// Get the preview shape for the current gesture.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.gesture {
            Gesture::DrawingDrag { start, current } => self.drag_shape(*start, *current),
            _ => None,
        }
    }

    /// Collect the overlays for the current gesture.
    pub fn overlays(&self) -> Overlays {
        let mut overlays = Overlays {
            preview_shape: self.preview_shape(),
            ..Overlays::default()
        };
        match &self.gesture {
            Gesture::Ghost { position } => {
                overlays.ghost = Some(GhostPreview { position: *position });
            }
            Gesture::Polygon { points, cursor } => {
                let rubber_band = match (points.last(), cursor) {
                    (Some(last), Some(cursor)) => Some(Line::new(*last, *cursor)),
                    _ => None,
                };
                overlays.polygon = Some(PolygonPreview {
                    vertices: points.clone(),
                    rubber_band,
                });
            }
            Gesture::Marquee { start, end } => {
                overlays.marquee = Some(Rect::from_points(*start, *end));
            }
            _ => {}
        }
        overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Select);

        tm.set_tool(ToolKind::DrawRect);
        assert_eq!(tm.current_tool, ToolKind::DrawRect);
    }

    #[test]
    fn test_set_tool_flushes_gesture() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::PlaceSeat);
        tm.gesture = Gesture::Ghost {
            position: Point::new(25.0, 25.0),
        };
        assert!(tm.overlays().ghost.is_some());

        let flushed = tm.set_tool(ToolKind::Select);
        assert_eq!(
            flushed,
            Gesture::Ghost {
                position: Point::new(25.0, 25.0)
            }
        );
        assert_eq!(tm.gesture, Gesture::Idle);
        assert!(tm.overlays().is_empty());
    }

    #[test]
    fn test_reselecting_tool_flushes() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::DrawPolygon);
        tm.gesture = Gesture::Polygon {
            points: vec![Point::ZERO],
            cursor: None,
        };
        tm.set_tool(ToolKind::DrawPolygon);
        assert_eq!(tm.gesture, Gesture::Idle);
    }

    #[test]
    fn test_rect_preview_allows_negative_extent() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::DrawRect);
        tm.gesture = Gesture::DrawingDrag {
            start: Point::new(100.0, 100.0),
            current: Point::new(60.0, 70.0),
        };
        let Some(Shape::Rect(rect)) = tm.preview_shape() else {
            panic!("expected a rect preview");
        };
        assert!((rect.width + 40.0).abs() < f64::EPSILON);
        assert!((rect.height + 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_preview_radius() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::DrawCircle);
        tm.gesture = Gesture::DrawingDrag {
            start: Point::new(0.0, 0.0),
            current: Point::new(30.0, 40.0),
        };
        let Some(Shape::Circle(circle)) = tm.preview_shape() else {
            panic!("expected a circle preview");
        };
        assert!((circle.radius - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_overlay_rubber_band() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::DrawPolygon);
        tm.gesture = Gesture::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            cursor: Some(Point::new(50.0, 40.0)),
        };
        let polygon = tm.overlays().polygon.unwrap();
        assert_eq!(polygon.vertices.len(), 2);
        assert_eq!(
            polygon.rubber_band,
            Some(Line::new(Point::new(50.0, 0.0), Point::new(50.0, 40.0)))
        );
    }

    #[test]
    fn test_ghost_guides_span_visible_rect() {
        let ghost = GhostPreview {
            position: Point::new(25.0, 50.0),
        };
        let visible = Rect::new(-100.0, -200.0, 300.0, 400.0);
        let [top, bottom, left, right] = ghost.guides(visible, 10.0);
        assert_eq!(top, Line::new((-100.0, 40.0), (300.0, 40.0)));
        assert_eq!(bottom, Line::new((-100.0, 60.0), (300.0, 60.0)));
        assert_eq!(left, Line::new((15.0, -200.0), (15.0, 400.0)));
        assert_eq!(right, Line::new((35.0, -200.0), (35.0, 400.0)));
    }

    #[test]
    fn test_shortcuts() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_shortcut(&tool.shortcut().to_string()), Some(tool));
        }
        assert_eq!(ToolKind::from_shortcut("R"), Some(ToolKind::DrawRect));
        assert_eq!(ToolKind::from_shortcut("x"), None);
        assert_eq!(ToolKind::from_shortcut("Delete"), None);
        assert_eq!(ToolKind::from_shortcut(""), None);
    }
}
