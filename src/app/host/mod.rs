//! Privileged side of the application: the window, its menu and the file system.

pub mod context;
pub mod controller;
pub mod file_bridge;
pub mod menu_state;
pub mod menu_template;

pub use context::{DialogRequest, HostContext, NativeDialogs, WindowShell};
pub use controller::{Flow, WindowController};
pub use file_bridge::BridgeOutcome;
pub use menu_state::MenuState;
pub use menu_template::{EntryKind, MenuEntry, MenuSection, MenuTemplate};

pub const APP_NAME: &str = "CodePad";

/// "name - CodePad", or just the app name when no file is bound.
pub fn window_title(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => format!("{} - {}", name, APP_NAME),
        None => APP_NAME.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;
    use crate::app::ipc::{UiEndpoint, bus};
    use crate::app::platform::Platform;
    use crate::app::settings::RunMode;

    #[derive(Default)]
    struct Log {
        open_answers: VecDeque<Option<PathBuf>>,
        save_answers: VecDeque<Option<PathBuf>>,
        titles: Vec<String>,
        alerts: Vec<String>,
        menus: Vec<MenuTemplate>,
        fullscreen: bool,
        about: bool,
        closed: bool,
    }

    /// Shared view of what the fake shell and dialogs were asked to do.
    #[derive(Clone, Default)]
    pub struct Recorder(Rc<RefCell<Log>>);

    impl Recorder {
        pub fn answer_open(&self, path: Option<PathBuf>) {
            self.0.borrow_mut().open_answers.push_back(path);
        }
        pub fn answer_save(&self, path: Option<PathBuf>) {
            self.0.borrow_mut().save_answers.push_back(path);
        }
        pub fn titles(&self) -> Vec<String> {
            self.0.borrow().titles.clone()
        }
        pub fn alerts(&self) -> Vec<String> {
            self.0.borrow().alerts.clone()
        }
        pub fn menus_installed(&self) -> usize {
            self.0.borrow().menus.len()
        }
        pub fn is_fullscreen(&self) -> bool {
            self.0.borrow().fullscreen
        }
        pub fn about_shown(&self) -> bool {
            self.0.borrow().about
        }
        pub fn is_closed(&self) -> bool {
            self.0.borrow().closed
        }
    }

    struct FakeShell(Recorder);

    impl WindowShell for FakeShell {
        fn set_title(&mut self, title: &str) {
            (self.0).0.borrow_mut().titles.push(title.to_string());
        }
        fn is_fullscreen(&self) -> bool {
            (self.0).0.borrow().fullscreen
        }
        fn set_fullscreen(&mut self, fullscreen: bool) {
            (self.0).0.borrow_mut().fullscreen = fullscreen;
        }
        fn install_menu(&mut self, template: &MenuTemplate) {
            (self.0).0.borrow_mut().menus.push(template.clone());
        }
        fn show_about(&mut self) {
            (self.0).0.borrow_mut().about = true;
        }
        fn close(&mut self) {
            (self.0).0.borrow_mut().closed = true;
        }
    }

    struct FakeDialogs(Recorder);

    impl NativeDialogs for FakeDialogs {
        fn pick_open(&mut self, _: &DialogRequest) -> Option<PathBuf> {
            (self.0).0.borrow_mut().open_answers.pop_front().flatten()
        }
        fn pick_save(&mut self, _: &DialogRequest) -> Option<PathBuf> {
            (self.0).0.borrow_mut().save_answers.pop_front().flatten()
        }
        fn alert(&mut self, _: &str, message: &str) {
            (self.0).0.borrow_mut().alerts.push(message.to_string());
        }
    }

    pub fn context(rec: &Recorder) -> (HostContext, UiEndpoint) {
        let (host, ui) = bus();
        let ctx = HostContext::new(
            Box::new(FakeShell(rec.clone())),
            Box::new(FakeDialogs(rec.clone())),
            host,
            MenuState::default(),
            RunMode::Release,
            Platform::Other,
        );
        (ctx, ui)
    }
}
