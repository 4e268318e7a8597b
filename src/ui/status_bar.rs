use fltk::{
    enums::{Align, FrameType},
    frame::Frame,
    prelude::*,
};

use crate::app::surface::{StatusLine, StatusMode};

pub const STATUS_BAR_HEIGHT: i32 = 22;

pub struct StatusBar {
    pub frame: Frame,
    shown: Option<(StatusMode, String)>,
}

impl StatusBar {
    pub fn new() -> Self {
        let mut frame = Frame::default();
        frame.set_frame(FrameType::FlatBox);
        frame.set_label_size(12);
        frame.set_align(Align::Left | Align::Inside);
        frame.set_label("Ready");
        Self { frame, shown: None }
    }

    /// Repaint only when the line actually changed.
    pub fn update(&mut self, line: &StatusLine) {
        let next = (line.mode(), line.text().to_string());
        if self.shown.as_ref() == Some(&next) {
            return;
        }
        let prefix = match line.mode() {
            StatusMode::Edit => "",
            StatusMode::Notify => "\u{2022} ",
        };
        self.frame.set_label(&format!(" {}{}", prefix, line.text()));
        self.frame.redraw();
        self.shown = Some(next);
    }
}
