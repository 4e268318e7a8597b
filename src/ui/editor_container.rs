use fltk::{
    app::{self, Sender},
    enums::{Event, Font, Key},
    group::{Flex, Group},
    prelude::*,
    text::{TextBuffer, TextDisplay, TextEditor},
};

use crate::app::ipc::EditAction;
use crate::app::messages::SurfaceEvent;
use crate::app::settings::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::app::store::{EditorOptions, EditorTheme};
use crate::app::surface::EditorWidget;

use super::theme::apply_editor_theme;

const MINIMAP_WIDTH: i32 = 120;
const MINIMAP_FONT_SIZE: i32 = 3;
const LINE_NUMBER_WIDTH: i32 = 40;

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// `TextBuffer::text()` copies FLTK's malloc'd string into a `String` but
/// never frees the original, so every call leaks the full buffer.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: buf is a live TextBuffer; the returned pointer is a
    // malloc'd, null-terminated string (or null) that we own and free once.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let result = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

/// Add the widgets made by `build` to `row`, then hand the current group
/// back to whoever had it, so later top-level windows stay top-level.
pub fn build_in_row<T>(row: &mut Flex, build: impl FnOnce(&mut Flex) -> T) -> T {
    let previous = Group::try_current();
    row.begin();
    let built = build(row);
    row.end();
    Group::set_current(previous.as_ref());
    built
}

/// A `TextEditor` with a tiny-font code map beside it, both on one buffer.
pub struct FltkEditor {
    row: Flex,
    buffer: TextBuffer,
    editor: TextEditor,
    minimap: TextDisplay,
    disposed: bool,
}

impl FltkEditor {
    /// Build the widgets as children of `row`.
    pub fn new(row: &Flex, options: &EditorOptions, events: Sender<SurfaceEvent>) -> Self {
        let mut row = row.clone();

        let (mut buffer, mut editor, mut minimap) = build_in_row(&mut row, |row| {
            let mut buffer = TextBuffer::default();
            buffer.set_text(&options.value);

            let mut editor = TextEditor::new(0, 0, 0, 0, "");
            editor.set_buffer(buffer.clone());
            editor.set_text_font(Font::Courier);
            editor.set_text_size(options.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE) as i32);
            editor.set_linenumber_width(if options.line_numbers { LINE_NUMBER_WIDTH } else { 0 });
            // FLTK always stops scrolling at the last line; scroll_beyond_last_line has no equivalent.

            let mut minimap = TextDisplay::new(0, 0, 0, 0, "");
            minimap.set_buffer(buffer.clone());
            minimap.set_text_font(Font::Courier);
            minimap.set_text_size(MINIMAP_FONT_SIZE);
            minimap.set_scrollbar_size(1);
            row.fixed(&minimap, MINIMAP_WIDTH);

            (buffer, editor, minimap)
        });

        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                events.send(SurfaceEvent::BufferChanged);
            }
        });

        apply_editor_theme(&mut editor, &mut minimap, options.theme == EditorTheme::Dark);

        editor.handle(move |_, ev| {
            let save_copy = ev == Event::KeyDown
                && app::is_event_ctrl()
                && app::is_event_alt()
                && app::event_key() == Key::from_char('s');
            if save_copy {
                events.send(SurfaceEvent::SaveCopyAs);
            }
            save_copy
        });

        let mut widget = Self {
            row,
            buffer,
            editor,
            minimap,
            disposed: false,
        };
        widget.set_minimap_enabled(options.minimap_enabled);
        widget.editor.take_focus().ok();
        widget
    }
}

impl EditorWidget for FltkEditor {
    fn value(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    fn set_value(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.editor.set_insert_position(0);
        self.editor.scroll(0, 0);
    }

    fn set_minimap_enabled(&mut self, enabled: bool) {
        if enabled {
            self.minimap.show();
            self.row.fixed(&self.minimap, MINIMAP_WIDTH);
        } else {
            self.minimap.hide();
            self.row.fixed(&self.minimap, 0);
        }
        self.row.layout();
        self.row.redraw();
    }

    fn apply_edit(&mut self, action: EditAction) {
        match action {
            EditAction::Undo => {
                self.editor.undo();
            }
            EditAction::Redo => {
                self.editor.redo();
            }
            EditAction::Cut => {
                self.editor.cut();
            }
            EditAction::Copy => {
                self.editor.copy();
            }
            EditAction::Paste => {
                self.editor.paste();
            }
            EditAction::SelectAll => {
                let len = self.buffer.length();
                self.buffer.select(0, len);
            }
        }
        self.editor.redraw();
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.row.remove(&self.editor);
        self.row.remove(&self.minimap);
        app::delete_widget(self.editor.clone());
        app::delete_widget(self.minimap.clone());
        self.row.layout();
        self.row.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fltk::frame::Frame;

    #[test]
    fn test_build_in_row_restores_current_group() {
        let mut outer = Flex::default();
        let mut row = Flex::default();
        row.end();
        outer.end();
        Group::set_current(None::<&Group>);

        let _frame = build_in_row(&mut row, |_| Frame::default());
        assert_eq!(row.children(), 1);
        assert!(Group::try_current().is_none());

        // A widget made afterwards must not land in the main layout.
        let _later = Frame::default();
        assert_eq!(outer.children(), 1);
    }
}
