//! Centralised UI state.
//!
//! Two slices live here: the editor lifecycle and the file association.
//! Each is replaced wholesale by its reducer; nothing outside this module
//! can write a field. Reads go through the `select_*` functions.
//!
//! The editor slice holds only an [`EditorId`]. The widget itself lives in
//! the surface's handle registry and never enters this (serializable) state.

pub mod editor_slice;
pub mod file_work;

use serde::Serialize;

pub use editor_slice::{EditorAction, EditorId, EditorOptions, EditorState, EditorTheme};
pub use file_work::{FileWorkAction, FileWorkState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Editor(EditorAction),
    FileWork(FileWorkAction),
}

impl From<EditorAction> for Action {
    fn from(action: EditorAction) -> Self {
        Action::Editor(action)
    }
}

impl From<FileWorkAction> for Action {
    fn from(action: FileWorkAction) -> Self {
        Action::FileWork(action)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Store {
    code_editor: EditorState,
    file_work: FileWorkState,
    #[serde(skip)]
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action. The revision only moves when a slice actually changes.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!(?action, "dispatch");
        let changed = match &action {
            Action::Editor(a) => {
                let next = editor_slice::reduce(&self.code_editor, a);
                let changed = next != self.code_editor;
                self.code_editor = next;
                changed
            }
            Action::FileWork(a) => {
                let next = file_work::reduce(&self.file_work, a);
                let changed = next != self.file_work;
                self.file_work = next;
                changed
            }
        };
        if changed {
            self.revision += 1;
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn select_editor(store: &Store) -> Option<EditorId> {
    store.code_editor.instance()
}

pub fn select_editor_options(store: &Store) -> Option<&EditorOptions> {
    store.code_editor.options()
}

pub fn select_is_saved(store: &Store) -> bool {
    store.file_work.is_saved()
}

pub fn select_mounted_file_path(store: &Store) -> Option<&str> {
    store.file_work.mounted_file_path()
}
