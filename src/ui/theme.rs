use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::{TextDisplay, TextEditor},
    window::Window,
};

/// Colors for the window chrome: background, menu and status bar.
pub fn apply_chrome_theme(window: &mut Window, menu: &mut MenuBar, status: &mut Frame, is_dark: bool) {
    if is_dark {
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
        status.set_color(Color::from_rgb(0, 90, 158));
    } else {
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
        status.set_color(Color::from_rgb(0, 122, 204));
    }
    status.set_label_color(Color::White);

    window.redraw();
    menu.redraw();
    status.redraw();
}

/// Colors for the editing widget and its code map.
pub fn apply_editor_theme(editor: &mut TextEditor, minimap: &mut TextDisplay, is_dark: bool) {
    if is_dark {
        editor.set_color(Color::from_rgb(30, 30, 30));
        editor.set_text_color(Color::from_rgb(220, 220, 220));
        editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        editor.set_selection_color(Color::from_rgb(70, 70, 100));
        editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
        editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        minimap.set_color(Color::from_rgb(37, 37, 38));
        minimap.set_text_color(Color::from_rgb(150, 150, 150));
    } else {
        editor.set_color(Color::White);
        editor.set_text_color(Color::Black);
        editor.set_cursor_color(Color::Black);
        editor.set_selection_color(Color::from_rgb(173, 216, 230));
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        minimap.set_color(Color::from_rgb(245, 245, 245));
        minimap.set_text_color(Color::from_rgb(120, 120, 120));
    }

    editor.redraw();
    minimap.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        let on: i32 = if is_dark { 1 } else { 0 };

        // 20 on Windows 11 / 10 2004+, 19 on 10 1809-1903
        for attribute in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
