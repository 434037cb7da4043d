//! Renderer trait abstraction.

use crate::scene::Scene;
use peniko::Color;
use seatplan_core::Editor;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("No frame has been built yet")]
    NoFrame,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The editor to render. Only borrowed immutably.
    pub editor: &'a Editor,
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(editor: &'a Editor) -> Self {
        Self {
            editor,
            background_color: Color::WHITE,
            grid_style: GridStyle::Lines,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the display list for a frame.
    ///
    /// Called once per frame; implementations should not keep borrows of
    /// the editor past this call.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// Renderer that keeps the last built scene in memory.
///
/// Used headless by the replay binary and by tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    scene: Option<Scene>,
    frames: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last built scene, if any.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Take the last built scene, leaving the renderer empty.
    pub fn take_scene(&mut self) -> RenderResult<Scene> {
        self.scene.take().ok_or(RendererError::NoFrame)
    }

    /// Number of frames built so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let scene = Scene::build(ctx);
        log::trace!("Built frame {} with {} commands", self.frames, scene.len());
        self.scene = Some(scene);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_renderer_creation() {
        let renderer = RecordingRenderer::new();
        assert!(renderer.scene().is_none());
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_take_scene_without_frame() {
        let mut renderer = RecordingRenderer::new();
        assert!(matches!(renderer.take_scene(), Err(RendererError::NoFrame)));
    }

    #[test]
    fn test_build_scene_records_frame() {
        let mut editor = Editor::default();
        editor.plan.add_seat(Point::new(25.0, 25.0)).unwrap();
        let mut renderer = RecordingRenderer::new();

        renderer.build_scene(&RenderContext::new(&editor));
        renderer.build_scene(&RenderContext::new(&editor).with_grid(GridStyle::None));
        assert_eq!(renderer.frame_count(), 2);

        let scene = renderer.take_scene().unwrap();
        assert!(!scene.is_empty());
        assert!(renderer.scene().is_none());
    }
}
