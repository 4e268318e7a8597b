pub mod dialogs;
pub mod editor_container;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod status_bar;
pub mod theme;
