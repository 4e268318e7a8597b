use serde::{Deserialize, Serialize};

/// Stable key of a widget in the surface's handle registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorTheme {
    Light,
    Dark,
}

/// Construction options for the editing widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    pub theme: EditorTheme,
    pub minimap_enabled: bool,
    pub font_size: u32,
    pub line_numbers: bool,
    pub scroll_beyond_last_line: bool,
    /// Initial buffer content.
    pub value: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            theme: EditorTheme::Dark,
            minimap_enabled: true,
            font_size: 14,
            line_numbers: true,
            scroll_beyond_last_line: false,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    instance: Option<EditorId>,
    options: Option<EditorOptions>,
}

impl EditorState {
    pub(super) fn instance(&self) -> Option<EditorId> {
        self.instance
    }

    pub(super) fn options(&self) -> Option<&EditorOptions> {
        self.options.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Record a freshly created widget. Callers check for an existing one first.
    Init { id: EditorId, options: EditorOptions },
    /// Clear the slice once the widget has been disposed.
    Destroy,
}

pub(super) fn reduce(_state: &EditorState, action: &EditorAction) -> EditorState {
    match action {
        EditorAction::Init { id, options } => EditorState {
            instance: Some(*id),
            options: Some(options.clone()),
        },
        EditorAction::Destroy => EditorState::default(),
    }
}
