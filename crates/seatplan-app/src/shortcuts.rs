//! Keyboard shortcut registry and documentation.

use seatplan_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub shift: bool,
    pub description: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, shift: bool, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift,
            description: description.into(),
        }
    }

    /// Format the shortcut for display (e.g., "Shift+Enter").
    pub fn format(&self) -> String {
        if self.shift {
            format!("Shift+{}", self.key)
        } else {
            self.key.clone()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = ToolKind::ALL
            .into_iter()
            .map(|tool| {
                Shortcut::new(
                    tool.shortcut().to_ascii_uppercase().to_string(),
                    false,
                    format!("{} tool", capitalize(tool.name())),
                )
            })
            .collect();
        shortcuts.extend([
            Shortcut::new("Delete", false, "Delete marked seats, or the selected item"),
            Shortcut::new("Backspace", false, "Delete marked seats, or the selected item"),
            Shortcut::new("Enter", false, "Finish editing text"),
            Shortcut::new("Enter", true, "New line while editing text"),
            Shortcut::new("Escape", false, "Cancel editing text"),
        ]);
        shortcuts
    }

    /// Render the registry as aligned lines of text.
    pub fn help_text() -> String {
        let shortcuts = Self::all();
        let width = shortcuts.iter().map(|s| s.format().len()).max().unwrap_or(0);
        shortcuts
            .iter()
            .map(|s| format!("{:<width$}  {}", s.format(), s.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_a_shortcut() {
        let shortcuts = ShortcutRegistry::all();
        for tool in ToolKind::ALL {
            let key = tool.shortcut().to_ascii_uppercase().to_string();
            assert!(shortcuts.iter().any(|s| s.key == key), "missing shortcut for {tool}");
            assert_eq!(ToolKind::from_shortcut(&key), Some(tool));
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Enter", true, "").format(), "Shift+Enter");
        assert_eq!(Shortcut::new("V", false, "").format(), "V");
    }

    #[test]
    fn test_help_text() {
        let help = ShortcutRegistry::help_text();
        assert!(help.contains("Seat tool"));
        assert!(help.lines().any(|line| line.starts_with("Shift+Enter")));
    }
}
