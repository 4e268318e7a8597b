use fltk::{
    app::Sender,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::host::{EntryKind, MenuEntry, MenuTemplate};
use crate::app::messages::MenuCommand;

fn entry_flag(entry: &MenuEntry) -> MenuFlag {
    let mut flag = match entry.kind {
        EntryKind::Normal => MenuFlag::Normal,
        EntryKind::Checkbox { checked: true } => MenuFlag::Toggle | MenuFlag::Value,
        EntryKind::Checkbox { checked: false } => MenuFlag::Toggle,
    };
    if entry.divider_after {
        flag |= MenuFlag::MenuDivider;
    }
    if entry.inactive {
        flag |= MenuFlag::Inactive;
    }
    flag
}

/// Replace every item in `menu` with the entries of `template`.
pub fn install_menu(menu: &mut MenuBar, template: &MenuTemplate, sender: &Sender<MenuCommand>) {
    let s = sender;
    menu.clear();
    for (path, entry) in template.entries() {
        let flag = entry_flag(entry);
        match entry.action {
            Some(command) => {
                menu.add(&path, entry.shortcut, flag, { let s = *s; move |_| s.send(command) });
            }
            None => {
                menu.add(&path, entry.shortcut, flag, |_| {});
            }
        }
    }
    menu.redraw();
}
