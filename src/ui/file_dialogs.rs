use std::path::PathBuf;

use fltk::dialog::{self, FileDialogOptions, FileDialogType, NativeFileChooser};

use crate::app::host::{DialogRequest, NativeDialogs};

fn run_chooser(kind: FileDialogType, request: &DialogRequest, confirm_overwrite: bool) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(kind);
    nfc.set_title(&request.title);
    nfc.set_filter(&request.filter);
    if confirm_overwrite {
        nfc.set_option(FileDialogOptions::SaveAsConfirm);
    }
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    if filename.as_os_str().is_empty() { None } else { Some(filename) }
}

/// Native choosers and alerts through FLTK.
pub struct FltkDialogs;

impl NativeDialogs for FltkDialogs {
    fn pick_open(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        run_chooser(FileDialogType::BrowseFile, request, false)
    }

    fn pick_save(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        run_chooser(FileDialogType::BrowseSaveFile, request, true)
    }

    fn alert(&mut self, _title: &str, message: &str) {
        dialog::alert_default(message);
    }
}
