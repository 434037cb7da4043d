//! Input state management for pointer and keyboard events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// The pointer left the canvas.
    Leave,
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks raw pointer and keyboard state between events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Last known pointer position in screen coordinates, if over the canvas.
    pub pointer_position: Option<Point>,
    /// Screen position of the current left press.
    press_position: Option<Point>,
    /// Whether the current press travelled past the click tolerance.
    press_moved: bool,
    /// Pointer travel below which a press/release counts as a click.
    click_tolerance: f64,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the latest press completed a double-click.
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl InputState {
    /// Create a new input state with the given click tolerance (screen pixels).
    pub fn new(click_tolerance: f64) -> Self {
        Self {
            pointer_position: None,
            press_position: None,
            press_moved: false,
            click_tolerance,
            modifiers: Modifiers::default(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = Some(position);
                if button == MouseButton::Left {
                    self.detect_double_click(position);
                    self.press_position = Some(position);
                    self.press_moved = false;
                }
            }
            PointerEvent::Up { position, .. } => {
                self.pointer_position = Some(position);
                self.track_press_travel(position);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = Some(position);
                self.track_press_travel(position);
            }
            PointerEvent::Scroll { position, .. } => {
                self.pointer_position = Some(position);
            }
            PointerEvent::Leave => {
                self.pointer_position = None;
            }
        }
    }

    fn track_press_travel(&mut self, position: Point) {
        if let Some(start) = self.press_position {
            if start.distance(position) > self.click_tolerance {
                self.press_moved = true;
            }
        }
    }

    fn detect_double_click(&mut self, position: Point) {
        let now = Instant::now();
        self.double_click_detected = false;
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position) {
            let elapsed = now.duration_since(last_time).as_millis();
            if elapsed < DOUBLE_CLICK_TIME_MS && last_pos.distance(position) < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // Reset so a triple click is not a second double-click
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// End the current left press. Returns `true` if it was a click
    /// (released without travelling past the click tolerance).
    pub fn finish_press(&mut self) -> bool {
        let was_click = self.press_position.is_some() && !self.press_moved;
        self.press_position = None;
        self.press_moved = false;
        was_click
    }

    /// Whether the current left press has travelled past the click tolerance.
    pub fn press_moved(&self) -> bool {
        self.press_moved
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => self.sync_modifier(key, true),
            KeyEvent::Released(key) => self.sync_modifier(key, false),
        }
    }

    fn sync_modifier(&mut self, key: &str, down: bool) {
        match key {
            "Shift" => self.modifiers.shift = down,
            "Control" => self.modifiers.ctrl = down,
            "Alt" => self.modifiers.alt = down,
            "Meta" => self.modifiers.meta = down,
            _ => {}
        }
    }

    /// Check if the latest left press completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}
