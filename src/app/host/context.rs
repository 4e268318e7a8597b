use std::path::PathBuf;

use crate::app::ipc::HostEndpoint;
use crate::app::platform::Platform;
use crate::app::settings::RunMode;

use super::menu_state::MenuState;
use super::menu_template::MenuTemplate;

/// The single top-level window, as the host controls it.
pub trait WindowShell {
    fn set_title(&mut self, title: &str);
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
    /// Replace the whole menu with `template`.
    fn install_menu(&mut self, template: &MenuTemplate);
    fn show_about(&mut self);
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub title: String,
    /// FLTK filter string, "Description\tPattern" lines.
    pub filter: String,
}

/// Modal native dialogs. `None` from a picker means the user cancelled.
pub trait NativeDialogs {
    fn pick_open(&mut self, request: &DialogRequest) -> Option<PathBuf>;
    fn pick_save(&mut self, request: &DialogRequest) -> Option<PathBuf>;
    fn alert(&mut self, title: &str, message: &str);
}

/// Everything the host side owns, handed to the window controller at construction.
pub struct HostContext {
    pub shell: Box<dyn WindowShell>,
    pub dialogs: Box<dyn NativeDialogs>,
    pub endpoint: HostEndpoint,
    pub menu_state: MenuState,
    pub run_mode: RunMode,
    pub platform: Platform,
}

impl HostContext {
    pub fn new(
        shell: Box<dyn WindowShell>,
        dialogs: Box<dyn NativeDialogs>,
        endpoint: HostEndpoint,
        menu_state: MenuState,
        run_mode: RunMode,
        platform: Platform,
    ) -> Self {
        Self {
            shell,
            dialogs,
            endpoint,
            menu_state,
            run_mode,
            platform,
        }
    }

    pub fn rebuild_menu(&mut self) {
        let template = MenuTemplate::build(self.platform, &self.menu_state, self.run_mode);
        self.shell.install_menu(&template);
    }
}
