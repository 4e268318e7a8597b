use fltk::{
    app::{self, Sender},
    enums::Event,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::host::{MenuTemplate, WindowShell, window_title};
use crate::app::messages::MenuCommand;

use super::dialogs::about::show_about_dialog;
use super::menu::install_menu;
use super::status_bar::{STATUS_BAR_HEIGHT, StatusBar};

pub const WINDOW_WIDTH: i32 = 1024;
pub const WINDOW_HEIGHT: i32 = 728;
pub const MIN_SIZE: i32 = 500;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    /// Row the editing widget mounts into.
    pub editor_row: Flex,
    pub status_bar: StatusBar,
}

pub fn build_main_window(sender: &Sender<MenuCommand>) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    wind.set_label(&window_title(None));
    wind.set_xclass("CodePad");
    wind.size_range(MIN_SIZE, MIN_SIZE, 0, 0);

    let mut flex = Flex::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut editor_row = Flex::default();
    editor_row.set_type(FlexType::Row);
    editor_row.end();

    let status_bar = StatusBar::new();
    flex.fixed(&status_bar.frame, STATUS_BAR_HEIGHT);

    flex.end();
    wind.end();
    wind.resizable(&flex);

    // Escape would otherwise close the window without going through the controller.
    wind.set_callback({
        let s = *sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(MenuCommand::WindowClose);
            }
        }
    });

    MainWidgets {
        wind,
        menu,
        editor_row,
        status_bar,
    }
}

/// The FLTK window as the host controller sees it.
pub struct FltkShell {
    wind: Window,
    menu: MenuBar,
    sender: Sender<MenuCommand>,
}

impl FltkShell {
    pub fn new(wind: &Window, menu: &MenuBar, sender: Sender<MenuCommand>) -> Self {
        Self {
            wind: wind.clone(),
            menu: menu.clone(),
            sender,
        }
    }
}

impl WindowShell for FltkShell {
    fn set_title(&mut self, title: &str) {
        self.wind.set_label(title);
    }

    fn is_fullscreen(&self) -> bool {
        self.wind.fullscreen_active()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.wind.fullscreen(fullscreen);
    }

    fn install_menu(&mut self, template: &MenuTemplate) {
        install_menu(&mut self.menu, template, &self.sender);
    }

    fn show_about(&mut self) {
        show_about_dialog();
    }

    fn close(&mut self) {
        self.wind.hide();
    }
}
