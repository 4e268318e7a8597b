use serde::{Deserialize, Serialize};

/// Whether the buffer is bound to a file on disk, and which one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWorkState {
    mounted_file_path: Option<String>,
    is_saved: bool,
}

impl FileWorkState {
    pub(super) fn mounted_file_path(&self) -> Option<&str> {
        self.mounted_file_path.as_deref()
    }

    pub(super) fn is_saved(&self) -> bool {
        self.is_saved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileWorkAction {
    SetMountedFilePath(String),
    SetIsSaved(bool),
}

pub(super) fn reduce(state: &FileWorkState, action: &FileWorkAction) -> FileWorkState {
    match action {
        FileWorkAction::SetMountedFilePath(path) => FileWorkState {
            mounted_file_path: Some(path.clone()),
            ..state.clone()
        },
        FileWorkAction::SetIsSaved(saved) => FileWorkState {
            is_saved: *saved,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = FileWorkState::default();
        assert!(!state.is_saved());
        assert_eq!(state.mounted_file_path(), None);
    }

    #[test]
    fn test_setters_touch_only_their_field() {
        let state = reduce(&FileWorkState::default(), &FileWorkAction::SetIsSaved(true));
        assert!(state.is_saved());
        assert_eq!(state.mounted_file_path(), None);

        let state = reduce(&state, &FileWorkAction::SetMountedFilePath("/tmp/a.txt".into()));
        assert!(state.is_saved());
        assert_eq!(state.mounted_file_path(), Some("/tmp/a.txt"));
    }
}
