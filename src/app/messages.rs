use super::ipc::EditAction;

/// Commands raised by the host's menu and window.
/// Each menu callback sends one of these; the dispatch loop in main hands
/// them to the window controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    // File
    FileOpen,
    FileNew,
    FileSave,
    FileSaveAs,
    FileClose,
    WindowClose,

    // Edit
    Edit(EditAction),

    // View
    ToggleCodemap,
    ToggleFullScreen,

    // Development
    Reload,
    InspectState,

    // Help
    ShowAbout,
}

/// Events raised by the editing widget itself, outside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    SaveCopyAs,
    /// Text was inserted or deleted in the buffer.
    BufferChanged,
}
