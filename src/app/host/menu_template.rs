//! Menu layouts as plain data.
//!
//! A template is rebuilt from [`MenuState`] whenever that state changes and
//! installed wholesale; checkbox values are only ever set here.

use fltk::enums::{Key, Shortcut};

use crate::app::ipc::EditAction;
use crate::app::messages::MenuCommand;
use crate::app::platform::Platform;
use crate::app::settings::RunMode;

use super::menu_state::MenuState;
use super::APP_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Normal,
    Checkbox { checked: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub shortcut: Shortcut,
    pub kind: EntryKind,
    /// `None` for items that exist only as placeholders.
    pub action: Option<MenuCommand>,
    pub divider_after: bool,
    pub inactive: bool,
}

impl MenuEntry {
    fn item(label: &str, shortcut: Shortcut, action: MenuCommand) -> Self {
        Self {
            label: label.to_string(),
            shortcut,
            kind: EntryKind::Normal,
            action: Some(action),
            divider_after: false,
            inactive: false,
        }
    }

    fn checkbox(label: &str, shortcut: Shortcut, checked: bool, action: MenuCommand) -> Self {
        Self {
            kind: EntryKind::Checkbox { checked },
            ..Self::item(label, shortcut, action)
        }
    }

    fn stub(label: &str, shortcut: Shortcut) -> Self {
        Self {
            label: label.to_string(),
            shortcut,
            kind: EntryKind::Normal,
            action: None,
            divider_after: false,
            inactive: true,
        }
    }

    fn stub_checkbox(label: &str, shortcut: Shortcut) -> Self {
        Self {
            kind: EntryKind::Checkbox { checked: false },
            ..Self::stub(label, shortcut)
        }
    }

    fn divider(mut self) -> Self {
        self.divider_after = true;
        self
    }

    fn inactive_if(mut self, inactive: bool) -> Self {
        self.inactive = inactive;
        self
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.kind, EntryKind::Checkbox { checked: true })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl MenuSection {
    fn new(title: &str, entries: Vec<MenuEntry>) -> Self {
        Self {
            title: title.to_string(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuTemplate {
    pub sections: Vec<MenuSection>,
}

impl MenuTemplate {
    pub fn build(platform: Platform, state: &MenuState, run_mode: RunMode) -> Self {
        match platform {
            Platform::MacOs => darwin_template(state, run_mode),
            Platform::Other => default_template(state, run_mode),
        }
    }

    /// Look up an entry by its "Section/Label" path.
    pub fn find(&self, path: &str) -> Option<&MenuEntry> {
        let (title, label) = path.split_once('/')?;
        self.sections
            .iter()
            .find(|s| s.title == title)?
            .entries
            .iter()
            .find(|e| e.label == label)
    }

    /// Every entry with its full path, in menu order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &MenuEntry)> {
        self.sections.iter().flat_map(|section| {
            section
                .entries
                .iter()
                .map(move |entry| (format!("{}/{}", section.title, entry.label), entry))
        })
    }
}

fn file_entries(state: &MenuState, cmd: Shortcut) -> Vec<MenuEntry> {
    vec![
        MenuEntry::item("Open...", cmd | 'o', MenuCommand::FileOpen),
        MenuEntry::item("New", cmd | 'n', MenuCommand::FileNew).divider(),
        MenuEntry::item("Save", cmd | 's', MenuCommand::FileSave).inactive_if(!state.save_enabled),
        MenuEntry::item("Save As...", cmd | Shortcut::Shift | 's', MenuCommand::FileSaveAs)
            .inactive_if(!state.save_enabled),
    ]
}

fn development_entries(full_screen: bool) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::item("Reload", Shortcut::None | Key::F5, MenuCommand::Reload)];
    if full_screen {
        entries.push(MenuEntry::item("Toggle Full Screen", Shortcut::None, MenuCommand::ToggleFullScreen));
    }
    entries.push(MenuEntry::item(
        "Inspect State",
        Shortcut::Ctrl | Shortcut::Alt | 'i',
        MenuCommand::InspectState,
    ));
    entries
}

fn default_template(state: &MenuState, run_mode: RunMode) -> MenuTemplate {
    let ctrl = Shortcut::Ctrl;

    let mut file = file_entries(state, ctrl);
    if let Some(last) = file.last_mut() {
        last.divider_after = true;
    }
    file.push(MenuEntry::item("Close", ctrl | 'w', MenuCommand::FileClose));

    // Edit is left to the widget's own key bindings here.
    let edit = vec![
        MenuEntry::stub("Undo", ctrl | 'z'),
        MenuEntry::stub("Redo", ctrl | Shortcut::Shift | 'z').divider(),
        MenuEntry::stub("Cut", ctrl | 'x'),
        MenuEntry::stub("Copy", ctrl | 'c'),
        MenuEntry::stub("Paste", ctrl | 'v'),
        MenuEntry::stub("Select All", ctrl | 'a').divider(),
        MenuEntry::stub("Find in File", ctrl | Shortcut::Shift | 'f'),
        MenuEntry::stub("Replace in File", ctrl | Shortcut::Shift | 'r').divider(),
        MenuEntry::stub_checkbox("Auto Wrap", ctrl | Shortcut::Shift | 'w').divider(),
        MenuEntry::stub("Turn to Comment", ctrl | '/'),
    ];

    let view = vec![
        MenuEntry::checkbox("Code Map", ctrl | 'r', state.codemap_visible, MenuCommand::ToggleCodemap),
        MenuEntry::item("Toggle Full Screen", Shortcut::None | Key::F11, MenuCommand::ToggleFullScreen),
    ];

    let mut sections = vec![
        MenuSection::new("File", file),
        MenuSection::new("Edit", edit),
        MenuSection::new("View", view),
    ];
    if run_mode.is_debug() {
        sections.push(MenuSection::new("Development", development_entries(true)));
    }
    sections.push(MenuSection::new(
        "Help",
        vec![MenuEntry::item(&format!("About {}", APP_NAME), Shortcut::None, MenuCommand::ShowAbout)],
    ));
    MenuTemplate { sections }
}

fn darwin_template(state: &MenuState, run_mode: RunMode) -> MenuTemplate {
    let cmd = Shortcut::Command;

    let app = vec![
        MenuEntry::item(&format!("About {}", APP_NAME), Shortcut::None, MenuCommand::ShowAbout).divider(),
        MenuEntry::item(&format!("Quit {}", APP_NAME), cmd | 'q', MenuCommand::FileClose),
    ];

    let edit = vec![
        MenuEntry::item("Undo", cmd | 'z', MenuCommand::Edit(EditAction::Undo)),
        MenuEntry::item("Redo", cmd | Shortcut::Shift | 'z', MenuCommand::Edit(EditAction::Redo)).divider(),
        MenuEntry::item("Cut", cmd | 'x', MenuCommand::Edit(EditAction::Cut)),
        MenuEntry::item("Copy", cmd | 'c', MenuCommand::Edit(EditAction::Copy)),
        MenuEntry::item("Paste", cmd | 'v', MenuCommand::Edit(EditAction::Paste)),
        MenuEntry::item("Select All", cmd | 'a', MenuCommand::Edit(EditAction::SelectAll)),
    ];

    let mut view = vec![
        MenuEntry::checkbox("Code Map", cmd | 'r', state.codemap_visible, MenuCommand::ToggleCodemap),
        MenuEntry::item("Toggle Full Screen", cmd | Shortcut::Ctrl | 'f', MenuCommand::ToggleFullScreen),
    ];
    if run_mode.is_debug() {
        if let Some(last) = view.last_mut() {
            last.divider_after = true;
        }
        view.extend(development_entries(false));
    }

    MenuTemplate {
        sections: vec![
            MenuSection::new(APP_NAME, app),
            MenuSection::new("File", file_entries(state, cmd)),
            MenuSection::new("Edit", edit),
            MenuSection::new("View", view),
            MenuSection::new("Window", vec![MenuEntry::item("Close", cmd | 'w', MenuCommand::WindowClose)]),
        ],
    }
}
