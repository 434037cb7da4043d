//! Session scripts: recorded input replayed against an editor.

use crate::AppError;
use kurbo::{Point, Size, Vec2};
use seatplan_core::{EditIntent, Editor, KeyEvent, MouseButton, PointerEvent, Storage, ToolKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Select a tool, as if from the toolbar.
    Tool { tool: ToolKind },
    /// Raw pointer event in screen coordinates.
    Pointer { event: PointerEvent },
    /// Left press and release at one screen point.
    Click { at: Point },
    /// Left press, one move per point of `path`, release at the last point.
    Drag { from: Point, path: Vec<Point> },
    /// Wheel event; negative `delta_y` zooms in.
    Wheel { at: Point, delta_y: f64 },
    /// Raw key event.
    Key { event: KeyEvent },
    /// Press and release of one key.
    Press { key: String },
    /// Replace the inline text editor's content.
    Type { text: String },
    /// Edit-surface intent for the primary selection.
    Edit { intent: EditIntent },
    /// Resize the viewport.
    Viewport { width: f64, height: f64 },
    /// Persist the current plan.
    SaveAll,
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a script file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::ScriptIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Drives an editor through a script.
pub struct Replay<'a> {
    editor: Editor,
    storage: Option<&'a dyn Storage>,
    name: String,
    saves: usize,
}

impl<'a> Replay<'a> {
    pub fn new(editor: Editor, storage: Option<&'a dyn Storage>, name: impl Into<String>) -> Self {
        Self {
            editor,
            storage,
            name: name.into(),
            saves: 0,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    /// Number of completed save-all steps.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Apply every step in order. Stops at the first persistence failure.
    pub fn run(&mut self, script: &Script) -> Result<(), AppError> {
        for (index, step) in script.steps.iter().enumerate() {
            log::trace!("Step {index}: {step:?}");
            self.apply(step)?;
        }
        Ok(())
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &Step) -> Result<(), AppError> {
        let left = MouseButton::Left;
        match step {
            Step::Tool { tool } => self.editor.set_tool(*tool),
            Step::Pointer { event } => self.editor.handle_pointer_event(*event),
            Step::Click { at } => {
                self.editor.handle_pointer_event(PointerEvent::Down { position: *at, button: left });
                self.editor.handle_pointer_event(PointerEvent::Up { position: *at, button: left });
            }
            Step::Drag { from, path } => {
                self.editor.handle_pointer_event(PointerEvent::Down { position: *from, button: left });
                for point in path {
                    self.editor.handle_pointer_event(PointerEvent::Move { position: *point });
                }
                let end = path.last().copied().unwrap_or(*from);
                self.editor.handle_pointer_event(PointerEvent::Up { position: end, button: left });
            }
            Step::Wheel { at, delta_y } => self.editor.handle_pointer_event(PointerEvent::Scroll {
                position: *at,
                delta: Vec2::new(0.0, *delta_y),
            }),
            Step::Key { event } => self.editor.handle_key(event),
            Step::Press { key } => {
                self.editor.handle_key(&KeyEvent::Pressed(key.clone()));
                self.editor.handle_key(&KeyEvent::Released(key.clone()));
            }
            Step::Type { text } => self.editor.set_text_edit_buffer(text.as_str()),
            Step::Edit { intent } => {
                if !self.editor.apply_edit(intent.clone()) {
                    log::warn!("Edit had no effect: {intent:?}");
                }
            }
            Step::Viewport { width, height } => self.editor.set_viewport(Size::new(*width, *height)),
            Step::SaveAll => self.save_all()?,
        }
        Ok(())
    }

    /// Persist the current plan under the session name.
    pub fn save_all(&mut self) -> Result<(), AppError> {
        pollster::block_on(self.editor.save_all(self.storage, &self.name))?;
        self.saves += 1;
        Ok(())
    }
}
