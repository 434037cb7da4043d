//! Display-list scene built from an editor frame.
//!
//! Every command carries world coordinates. Backends apply
//! [`Scene::transform`] (the camera) when rasterizing. Stroke widths and
//! dash lengths are divided by the zoom so they stay constant on screen.

use crate::color::{color_or, parse_hex_color};
use crate::renderer::{GridStyle, RenderContext};
use kurbo::{Affine, Line, Point, Rect};
use peniko::Color;
use seatplan_core::seat::DEFAULT_SEAT_COLOR;
use seatplan_core::shapes::DEFAULT_SHAPE_COLOR;
use seatplan_core::text::TextAlign;
use seatplan_core::{EntityRef, Overlays, Shape};

const GRID_COLOR: Color = Color::from_rgba8(221, 221, 221, 255);
const GHOST_FILL: Color = Color::from_rgba8(0, 0, 255, 128);
const GUIDE_COLOR: Color = Color::from_rgba8(255, 0, 0, 255);
const PREVIEW_FILL: Color = Color::from_rgba8(0xc9, 0xcb, 0xcc, 0xaa);
const PREVIEW_STROKE: Color = Color::from_rgba8(0xc9, 0xcb, 0xcc, 0xff);
const MARQUEE_FILL: Color = Color::from_rgba8(0, 0, 255, 26);
const MARQUEE_STROKE: Color = Color::from_rgba8(0, 0, 255, 255);
const SELECTED_STROKE: Color = Color::from_rgba8(0, 0, 255, 0xaa);
const LABEL_FONT_SIZE: f64 = 12.0;
const HANDLE_RADIUS: f64 = 4.0;
const GUIDE_DASH: f64 = 4.0;
const POLYGON_DASH: f64 = 5.0;

/// Drawing layer, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Grid,
    Shapes,
    Texts,
    Seats,
    Overlays,
}

/// Stroke parameters in world units.
#[derive(Debug, Clone)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern; empty means solid.
    pub dashes: Vec<f64>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashes: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f64, dash: f64) -> Self {
        Self {
            color,
            width,
            dashes: vec![dash, dash],
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Line {
        line: Line,
        stroke: StrokeStyle,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Circle {
        circle: kurbo::Circle,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    /// Open or closed polyline.
    Path {
        points: Vec<Point>,
        closed: bool,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    /// Text anchored at `position`: the top-left corner for left-aligned
    /// text, the center for centered labels.
    Text {
        position: Point,
        content: String,
        font_size: f64,
        color: Color,
        align: TextAlign,
    },
}

/// A draw command tagged with its layer.
#[derive(Debug, Clone)]
pub struct SceneItem {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// An ordered display list for one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    /// World to screen transform.
    pub transform: Affine,
    pub background: Color,
    items: Vec<SceneItem>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(transform: Affine, background: Color) -> Self {
        Self {
            transform,
            background,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.items.push(SceneItem { layer, command });
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Commands on one layer, in draw order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.items.iter().filter(move |item| item.layer == layer).map(|item| &item.command)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the display list for the editor in `ctx`.
    pub fn build(ctx: &RenderContext) -> Self {
        let editor = ctx.editor;
        let mut builder = SceneBuilder {
            scene: Scene::new(editor.camera.transform(), ctx.background_color),
            pixel: 1.0 / editor.camera.scale,
            seat_radius: editor.config().seat_radius,
            primary: editor.primary(),
        };

        if ctx.grid_style == GridStyle::Lines {
            builder.grid(editor.visible_world_rect(), editor.config().grid_size);
        }
        for shape in &editor.plan.shapes {
            builder.shape(shape);
        }
        let editing = editor.text_edit().map(|session| session.text_id);
        for text in &editor.plan.texts {
            builder.text(text, editing == Some(text.id));
        }
        for seat in &editor.plan.seats {
            builder.seat(seat);
        }
        builder.overlays(&editor.overlays(), editor.visible_world_rect());
        if let Some(session) = editor.text_edit() {
            if let Some(text) = editor.plan.text(session.text_id) {
                builder.text_editor(text, &session.buffer);
            }
        }
        builder.scene
    }
}

struct SceneBuilder {
    scene: Scene,
    /// One screen pixel in world units.
    pixel: f64,
    seat_radius: f64,
    primary: Option<EntityRef>,
}

impl SceneBuilder {
    fn grid(&mut self, visible: Rect, grid_size: f64) {
        if grid_size <= 0.0 {
            return;
        }
        let start_x = (visible.x0 / grid_size).floor() * grid_size;
        let start_y = (visible.y0 / grid_size).floor() * grid_size;
        let end_x = (visible.x1 / grid_size).ceil() * grid_size;
        let end_y = (visible.y1 / grid_size).ceil() * grid_size;
        let stroke = StrokeStyle::solid(GRID_COLOR, self.pixel);

        let mut x = start_x;
        while x <= end_x {
            self.scene.push(
                Layer::Grid,
                DrawCommand::Line {
                    line: Line::new((x, start_y), (x, end_y)),
                    stroke: stroke.clone(),
                },
            );
            x += grid_size;
        }
        let mut y = start_y;
        while y <= end_y {
            self.scene.push(
                Layer::Grid,
                DrawCommand::Line {
                    line: Line::new((start_x, y), (end_x, y)),
                    stroke: stroke.clone(),
                },
            );
            y += grid_size;
        }
    }

    fn selected_stroke(&self) -> StrokeStyle {
        StrokeStyle::solid(SELECTED_STROKE, 2.0 * self.pixel)
    }

    fn shape(&mut self, shape: &Shape) {
        let default = parse_hex_color(DEFAULT_SHAPE_COLOR).unwrap_or(PREVIEW_STROKE);
        let fill = Some(color_or(shape.style().color.as_deref(), default));
        let selected = self.primary == Some(EntityRef::Shape(shape.id()));
        let stroke = selected.then(|| self.selected_stroke());

        let command = match shape {
            Shape::Rect(rect) => DrawCommand::Rect {
                rect: rect.as_rect(),
                fill,
                stroke,
            },
            Shape::Circle(circle) => DrawCommand::Circle {
                circle: kurbo::Circle::new(circle.center, circle.radius),
                fill,
                stroke,
            },
            Shape::Polygon(polygon) => DrawCommand::Path {
                points: polygon.points.clone(),
                closed: true,
                fill,
                stroke: Some(stroke.unwrap_or_else(|| StrokeStyle::solid(Color::BLACK, 2.0 * self.pixel))),
            },
        };
        self.scene.push(Layer::Shapes, command);

        if let Some(label) = shape.style().label.as_deref().filter(|l| !l.is_empty()) {
            self.scene.push(
                Layer::Shapes,
                DrawCommand::Text {
                    position: shape.bounds().center(),
                    content: label.to_string(),
                    font_size: LABEL_FONT_SIZE,
                    color: Color::BLACK,
                    align: TextAlign::Center,
                },
            );
        }
    }

    fn text(&mut self, text: &seatplan_core::Text, editing: bool) {
        // The open editor draws this text itself
        if editing {
            return;
        }
        self.scene.push(
            Layer::Texts,
            DrawCommand::Text {
                position: text.position,
                content: text.content.clone(),
                font_size: text.style.font_size,
                color: color_or(Some(&text.style.fill), Color::BLACK),
                align: text.style.text_align,
            },
        );
        if self.primary == Some(EntityRef::Text(text.id)) {
            self.scene.push(
                Layer::Texts,
                DrawCommand::Rect {
                    rect: text.bounds(),
                    fill: None,
                    stroke: Some(StrokeStyle::solid(SELECTED_STROKE, self.pixel)),
                },
            );
        }
    }

    fn seat(&mut self, seat: &seatplan_core::Seat) {
        let default = parse_hex_color(DEFAULT_SEAT_COLOR).unwrap_or(MARQUEE_STROKE);
        let highlighted = seat.is_selected || self.primary == Some(EntityRef::Seat(seat.id));
        self.scene.push(
            Layer::Seats,
            DrawCommand::Circle {
                circle: kurbo::Circle::new(seat.position, self.seat_radius),
                fill: Some(color_or(seat.color.as_deref(), default)),
                stroke: highlighted.then(|| StrokeStyle::solid(Color::BLACK, 2.0 * self.pixel)),
            },
        );
        if !seat.name.is_empty() {
            self.scene.push(
                Layer::Seats,
                DrawCommand::Text {
                    position: seat.position,
                    content: seat.name.clone(),
                    font_size: LABEL_FONT_SIZE,
                    color: Color::WHITE,
                    align: TextAlign::Center,
                },
            );
        }
    }

    fn overlays(&mut self, overlays: &Overlays, visible: Rect) {
        if let Some(ghost) = &overlays.ghost {
            self.scene.push(
                Layer::Overlays,
                DrawCommand::Circle {
                    circle: kurbo::Circle::new(ghost.position, self.seat_radius),
                    fill: Some(GHOST_FILL),
                    stroke: None,
                },
            );
            let stroke = StrokeStyle::dashed(GUIDE_COLOR, self.pixel, GUIDE_DASH * self.pixel);
            for line in ghost.guides(visible, self.seat_radius) {
                self.scene.push(
                    Layer::Overlays,
                    DrawCommand::Line {
                        line,
                        stroke: stroke.clone(),
                    },
                );
            }
        }

        if let Some(shape) = &overlays.preview_shape {
            let stroke = Some(StrokeStyle::solid(PREVIEW_STROKE, self.pixel));
            let command = match shape {
                Shape::Rect(rect) => DrawCommand::Rect {
                    rect: rect.as_rect(),
                    fill: Some(PREVIEW_FILL),
                    stroke,
                },
                Shape::Circle(circle) => DrawCommand::Circle {
                    circle: kurbo::Circle::new(circle.center, circle.radius),
                    fill: Some(PREVIEW_FILL),
                    stroke,
                },
                Shape::Polygon(polygon) => DrawCommand::Path {
                    points: polygon.points.clone(),
                    closed: true,
                    fill: Some(PREVIEW_FILL),
                    stroke,
                },
            };
            self.scene.push(Layer::Overlays, command);
        }

        if let Some(polygon) = &overlays.polygon {
            let stroke = StrokeStyle::dashed(PREVIEW_STROKE, 2.0 * self.pixel, POLYGON_DASH * self.pixel);
            if polygon.vertices.len() > 1 {
                self.scene.push(
                    Layer::Overlays,
                    DrawCommand::Path {
                        points: polygon.vertices.clone(),
                        closed: false,
                        fill: None,
                        stroke: Some(stroke.clone()),
                    },
                );
            }
            if let Some(line) = polygon.rubber_band {
                self.scene.push(Layer::Overlays, DrawCommand::Line { line, stroke });
            }
            for vertex in &polygon.vertices {
                self.scene.push(
                    Layer::Overlays,
                    DrawCommand::Circle {
                        circle: kurbo::Circle::new(*vertex, HANDLE_RADIUS * self.pixel),
                        fill: Some(Color::BLACK),
                        stroke: None,
                    },
                );
            }
        }

        if let Some(rect) = overlays.marquee {
            self.scene.push(
                Layer::Overlays,
                DrawCommand::Rect {
                    rect,
                    fill: Some(MARQUEE_FILL),
                    stroke: Some(StrokeStyle::solid(MARQUEE_STROKE, self.pixel)),
                },
            );
        }
    }

    fn text_editor(&mut self, text: &seatplan_core::Text, buffer: &str) {
        let mut preview = text.clone();
        preview.content = buffer.to_string();
        self.scene.push(
            Layer::Overlays,
            DrawCommand::Rect {
                rect: preview.bounds().inflate(2.0 * self.pixel, 2.0 * self.pixel),
                fill: Some(Color::WHITE),
                stroke: Some(StrokeStyle::solid(SELECTED_STROKE, self.pixel)),
            },
        );
        self.scene.push(
            Layer::Overlays,
            DrawCommand::Text {
                position: preview.position,
                content: preview.content,
                font_size: preview.style.font_size,
                color: color_or(Some(&preview.style.fill), Color::BLACK),
                align: preview.style.text_align,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_core::{Editor, MouseButton, PointerEvent, Rectangle, ToolKind};

    fn build(editor: &Editor) -> Scene {
        Scene::build(&RenderContext::new(editor))
    }

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn test_build_empty_scene() {
        let editor = Editor::default();
        let scene = build(&editor);
        // 1000x800 viewport on a 25 grid: 41 vertical and 33 horizontal lines
        assert_eq!(scene.layer(Layer::Grid).count(), 41 + 33);
        assert_eq!(scene.layer(Layer::Overlays).count(), 0);

        let scene = Scene::build(&RenderContext::new(&editor).with_grid(GridStyle::None));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_layers_are_in_draw_order() {
        let mut editor = Editor::default();
        editor.plan.add_seat(Point::new(50.0, 50.0)).unwrap();
        editor
            .plan
            .add_shape(Shape::Rect(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0)))
            .unwrap();
        editor.plan.add_text(seatplan_core::Text::new(
            Point::new(10.0, 10.0),
            "Stage",
            seatplan_core::TextStyle::default(),
        ));
        editor.set_tool(ToolKind::PlaceSeat);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(200.0, 200.0),
        });

        let scene = build(&editor);
        let layers: Vec<Layer> = scene.items().iter().map(|item| item.layer).collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]));
        for layer in [Layer::Grid, Layer::Shapes, Layer::Texts, Layer::Seats, Layer::Overlays] {
            assert!(layers.contains(&layer));
        }
    }

    #[test]
    fn test_ghost_and_guides() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::PlaceSeat);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(100.0, 100.0),
        });
        let scene = build(&editor);
        let overlays: Vec<&DrawCommand> = scene.layer(Layer::Overlays).collect();
        assert_eq!(overlays.len(), 5);

        let DrawCommand::Circle { circle, fill, .. } = overlays[0] else {
            panic!("expected the ghost circle first");
        };
        assert_eq!(circle.center, Point::new(100.0, 100.0));
        assert_eq!(rgba(fill.unwrap()), (0, 0, 255, 128));

        for command in &overlays[1..] {
            let DrawCommand::Line { stroke, .. } = command else {
                panic!("expected guide lines");
            };
            assert_eq!(stroke.dashes, vec![4.0, 4.0]);
            assert_eq!(rgba(stroke.color), (255, 0, 0, 255));
        }
    }

    #[test]
    fn test_seat_colors_and_highlight() {
        let mut editor = Editor::default();
        let plain = editor.plan.add_seat(Point::new(50.0, 50.0)).unwrap();
        let marked = editor.plan.add_seat(Point::new(100.0, 50.0)).unwrap();
        editor.plan.seat_mut(marked).unwrap().is_selected = true;
        editor.plan.seat_mut(marked).unwrap().color = Some("#FF0000".to_string());
        editor.plan.seat_mut(plain).unwrap().name = "A1".to_string();

        let scene = build(&editor);
        let seats: Vec<&DrawCommand> = scene.layer(Layer::Seats).collect();
        assert_eq!(seats.len(), 3);

        let DrawCommand::Circle { fill, stroke, .. } = seats[0] else {
            panic!("expected a seat circle");
        };
        assert_eq!(rgba(fill.unwrap()), (0, 0, 255, 255));
        assert!(stroke.is_none());
        assert!(matches!(seats[1], DrawCommand::Text { content, .. } if content == "A1"));

        let DrawCommand::Circle { fill, stroke, .. } = seats[2] else {
            panic!("expected a seat circle");
        };
        assert_eq!(rgba(fill.unwrap()), (255, 0, 0, 255));
        assert!(stroke.is_some());
    }

    #[test]
    fn test_preview_rect_style() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::DrawRect);
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(50.0, 60.0),
        });
        let scene = build(&editor);
        let overlays: Vec<&DrawCommand> = scene.layer(Layer::Overlays).collect();
        let DrawCommand::Rect { rect, fill, .. } = overlays[0] else {
            panic!("expected a preview rect");
        };
        assert_eq!(*rect, Rect::new(50.0, 60.0, 100.0, 100.0));
        assert_eq!(rgba(fill.unwrap()), (0xc9, 0xcb, 0xcc, 0xaa));
    }

    #[test]
    fn test_polygon_preview_handles() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::DrawPolygon);
        for (x, y) in [(100.0, 100.0), (200.0, 100.0)] {
            editor.handle_pointer_event(PointerEvent::Down {
                position: Point::new(x, y),
                button: MouseButton::Left,
            });
            editor.handle_pointer_event(PointerEvent::Up {
                position: Point::new(x, y),
                button: MouseButton::Left,
            });
        }
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(200.0, 180.0),
        });

        let scene = build(&editor);
        let overlays: Vec<&DrawCommand> = scene.layer(Layer::Overlays).collect();
        // open line, rubber band, two handles
        assert_eq!(overlays.len(), 4);
        assert!(matches!(overlays[0], DrawCommand::Path { closed: false, .. }));
        let DrawCommand::Line { line, stroke } = overlays[1] else {
            panic!("expected the rubber band");
        };
        assert_eq!(line.p1, Point::new(200.0, 180.0));
        assert_eq!(stroke.dashes, vec![5.0, 5.0]);
        let DrawCommand::Circle { circle, .. } = overlays[2] else {
            panic!("expected a vertex handle");
        };
        assert!((circle.radius - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_marquee_overlay() {
        let mut editor = Editor::default();
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(60.0, 40.0),
        });
        let scene = build(&editor);
        let overlays: Vec<&DrawCommand> = scene.layer(Layer::Overlays).collect();
        let DrawCommand::Rect { rect, fill, .. } = overlays[0] else {
            panic!("expected the marquee");
        };
        assert_eq!(*rect, Rect::new(10.0, 10.0, 60.0, 40.0));
        assert_eq!(rgba(fill.unwrap()), (0, 0, 255, 26));
    }

    #[test]
    fn test_edited_text_drawn_by_editor() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::PlaceText);
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        editor.set_text_edit_buffer("Exit");

        let scene = build(&editor);
        assert_eq!(scene.layer(Layer::Texts).count(), 0);
        assert!(
            scene
                .layer(Layer::Overlays)
                .any(|c| matches!(c, DrawCommand::Text { content, .. } if content == "Exit"))
        );
    }

    #[test]
    fn test_stroke_width_tracks_zoom() {
        let mut editor = Editor::default();
        editor.camera.scale = 2.0;
        let scene = build(&editor);
        let Some(DrawCommand::Line { stroke, .. }) = scene.layer(Layer::Grid).next() else {
            panic!("expected grid lines");
        };
        assert!((stroke.width - 0.5).abs() < f64::EPSILON);
        assert_eq!(scene.transform, editor.camera.transform());
    }
}
