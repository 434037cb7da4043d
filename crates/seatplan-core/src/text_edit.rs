//! Inline text edit session.
//!
//! The editor holds at most one session in an `Option` and `take()`s it on
//! every exit, so a closed session can never leave overlay state behind.

use crate::text::{Text, TextId};
use kurbo::Point;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEditOutcome {
    /// The buffer should replace the text's content.
    Commit { text_id: TextId, content: String },
    /// The text keeps its original content.
    Cancel { text_id: TextId },
}

/// An open inline editor over one text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    pub text_id: TextId,
    /// Content when the session was opened.
    pub original: String,
    /// Content being edited.
    pub buffer: String,
    /// Screen position of the text's top-left corner.
    pub screen_anchor: Point,
    /// Font size on screen (world font size times camera scale).
    pub font_size: f64,
}

impl TextEditSession {
    /// Open a session pre-filled with the text's current content.
    pub fn open(text: &Text, screen_anchor: Point, scale: f64) -> Self {
        Self {
            text_id: text.id,
            original: text.content.clone(),
            buffer: text.content.clone(),
            screen_anchor,
            font_size: text.style.font_size * scale,
        }
    }

    /// Move the overlay after the camera changed.
    pub fn reposition(&mut self, text: &Text, screen_anchor: Point, scale: f64) {
        self.screen_anchor = screen_anchor;
        self.font_size = text.style.font_size * scale;
    }

    pub fn set_buffer(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Remove the last character of the buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.original
    }

    /// Close the session keeping the edited content.
    pub fn commit(self) -> TextEditOutcome {
        TextEditOutcome::Commit {
            text_id: self.text_id,
            content: self.buffer,
        }
    }

    /// Close the session discarding the edit.
    pub fn cancel(self) -> TextEditOutcome {
        TextEditOutcome::Cancel { text_id: self.text_id }
    }
}
