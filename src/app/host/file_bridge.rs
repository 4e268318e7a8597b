//! Dialog-backed file operations on the host side.
//!
//! Cancellation is not an error. Read failures are shown to the user;
//! write failures only reach the log.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::file_filters::{display_name, open_filter, save_filter};
use crate::app::ipc::{Channel, ListenerRegistry, MountedFile, Payload, Route};

use super::context::{DialogRequest, HostContext};
use super::window_title;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    Cancelled,
    Completed(PathBuf),
    Failed(String),
}

impl BridgeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BridgeOutcome::Completed(_))
    }
}

/// Paths cross the bus as strings, so only UTF-8 paths can be bound to the buffer.
fn utf8_path(path: &Path) -> Option<String> {
    path.to_str().map(str::to_owned)
}

const NON_UTF8_PATH: &str = "path is not valid UTF-8";

fn write_verbatim(path: &Path, content: &str) -> BridgeOutcome {
    match fs::write(path, content) {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = content.len(), "file written");
            BridgeOutcome::Completed(path.to_path_buf())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "write failed: {e}");
            BridgeOutcome::Failed(e.to_string())
        }
    }
}

fn pick_save(ctx: &mut HostContext, title: &str) -> Option<PathBuf> {
    ctx.dialogs.pick_save(&DialogRequest {
        title: title.to_string(),
        filter: save_filter(),
    })
}

/// Ask for a file, read it and push it to the editing surface.
pub fn request_open(ctx: &mut HostContext) -> BridgeOutcome {
    let request = DialogRequest {
        title: "Open File".to_string(),
        filter: open_filter(),
    };
    let Some(path) = ctx.dialogs.pick_open(&request) else {
        tracing::debug!("open cancelled");
        return BridgeOutcome::Cancelled;
    };

    let Some(filepath) = utf8_path(&path) else {
        let message = format!("Error opening file: {}", NON_UTF8_PATH);
        ctx.dialogs.alert("Open File", &message);
        return BridgeOutcome::Failed(message);
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            let message = format!("Error opening file: {}", e);
            ctx.dialogs.alert("Open File", &message);
            return BridgeOutcome::Failed(message);
        }
    };

    let file = MountedFile {
        content,
        filepath: filepath.clone(),
    };
    if let Err(e) = ctx.endpoint.send(Channel::OpenFile, Payload::File(file)) {
        tracing::error!("could not deliver opened file: {e}");
        return BridgeOutcome::Failed(e.to_string());
    }
    ctx.shell.set_title(&window_title(Some(&display_name(&filepath))));
    BridgeOutcome::Completed(path)
}

/// Write a copy of `content` to a newly chosen path. Nothing is sent back.
pub fn request_save_as(ctx: &mut HostContext, content: &str) -> BridgeOutcome {
    let Some(path) = pick_save(ctx, "Save As") else {
        tracing::debug!("save as cancelled");
        return BridgeOutcome::Cancelled;
    };
    write_verbatim(&path, content)
}

/// Save an unbound buffer and tell the surface which path it now belongs to.
pub fn request_first_save(ctx: &mut HostContext, content: &str) -> BridgeOutcome {
    let Some(path) = pick_save(ctx, "Save") else {
        tracing::debug!("first save cancelled");
        return BridgeOutcome::Cancelled;
    };
    let Some(filepath) = utf8_path(&path) else {
        tracing::error!(path = %path.display(), "first save refused: {NON_UTF8_PATH}");
        return BridgeOutcome::Failed(NON_UTF8_PATH.to_string());
    };
    let outcome = write_verbatim(&path, content);
    if !outcome.is_completed() {
        return outcome;
    }

    let delivered = ctx
        .endpoint
        .reply(Channel::SaveFile, Payload::Path(filepath.clone()))
        .and_then(|()| ctx.endpoint.send(Channel::OpenedFilePath, Payload::Path(filepath.clone())));
    if let Err(e) = delivered {
        tracing::error!("could not report saved path: {e}");
    }
    ctx.shell.set_title(&window_title(Some(&display_name(&filepath))));
    outcome
}

/// Write to a path the surface already knows. No dialog.
pub fn request_overwrite(path: &str, content: &str) -> BridgeOutcome {
    write_verbatim(Path::new(path), content)
}

/// Host listeners for every channel the surface sends.
pub fn register_listeners(listeners: &mut ListenerRegistry<HostContext>) {
    listeners.on(Route::request(Channel::SaveFile), |payload, ctx| {
        if let Payload::Text(content) = payload {
            request_first_save(ctx, content);
        }
    });

    listeners.on(Route::request(Channel::SaveAsFile), |payload, ctx| {
        if let Payload::Text(content) = payload {
            request_save_as(ctx, content);
        }
    });

    listeners.on(Route::request(Channel::WriteInFile), |payload, _| {
        if let Payload::Overwrite(path, content) = payload {
            request_overwrite(path, content);
        }
    });

    listeners.on(Route::request(Channel::Ping), |payload, ctx| {
        if let Payload::Text(text) = payload {
            tracing::debug!("ping from surface: {text}");
        }
        if let Err(e) = ctx.endpoint.reply(Channel::Ping, Payload::Text("pong".to_string())) {
            tracing::warn!("ping reply failed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::host::testing::{context, Recorder};
    use crate::app::ipc::{Frame, UiEndpoint};

    fn next_message(ui: &UiEndpoint) -> (Route, Payload) {
        match ui.try_recv().unwrap() {
            Some(Frame::Message { envelope }) => (envelope.route, envelope.payload),
            other => panic!("expected a message, got {:?}", other),
        }
    }

    #[test]
    fn test_open_sends_mounted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();

        let rec = Recorder::default();
        rec.answer_open(Some(path.clone()));
        let (mut ctx, ui) = context(&rec);

        assert_eq!(request_open(&mut ctx), BridgeOutcome::Completed(path.clone()));
        let (route, payload) = next_message(&ui);
        assert_eq!(route, Route::request(Channel::OpenFile));
        assert_eq!(
            payload,
            Payload::File(MountedFile {
                content: "hello".into(),
                filepath: path.to_str().unwrap().to_string(),
            })
        );
        assert_eq!(rec.titles(), vec!["a.txt - CodePad".to_string()]);
    }

    #[test]
    fn test_open_cancel_is_silent() {
        let rec = Recorder::default();
        let (mut ctx, ui) = context(&rec);
        assert_eq!(request_open(&mut ctx), BridgeOutcome::Cancelled);
        assert!(ui.try_recv().unwrap().is_none());
        assert!(rec.alerts().is_empty());
    }

    #[test]
    fn test_open_failure_alerts_and_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rec = Recorder::default();
        rec.answer_open(Some(dir.path().join("missing.txt")));
        let (mut ctx, ui) = context(&rec);

        assert!(matches!(request_open(&mut ctx), BridgeOutcome::Failed(_)));
        assert_eq!(rec.alerts().len(), 1);
        assert!(rec.alerts()[0].starts_with("Error opening file"));
        assert!(ui.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_first_save_replies_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.txt");
        let rec = Recorder::default();
        rec.answer_save(Some(path.clone()));
        let (mut ctx, ui) = context(&rec);

        assert!(request_first_save(&mut ctx, "draft").is_completed());
        assert_eq!(fs::read_to_string(&path).unwrap(), "draft");

        let (route, payload) = next_message(&ui);
        assert_eq!(route, Route::reply(Channel::SaveFile));
        assert_eq!(payload, Payload::Path(path.to_str().unwrap().to_string()));
        let (route, _) = next_message(&ui);
        assert_eq!(route, Route::request(Channel::OpenedFilePath));
    }

    #[test]
    fn test_first_save_cancel_writes_nothing() {
        let rec = Recorder::default();
        let (mut ctx, ui) = context(&rec);
        assert_eq!(request_first_save(&mut ctx, "draft"), BridgeOutcome::Cancelled);
        assert!(ui.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_first_save_write_failure_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rec = Recorder::default();
        rec.answer_save(Some(dir.path().join("missing-dir").join("b.txt")));
        let (mut ctx, ui) = context(&rec);

        assert!(matches!(request_first_save(&mut ctx, "draft"), BridgeOutcome::Failed(_)));
        assert!(ui.try_recv().unwrap().is_none());
        assert!(rec.titles().is_empty());
        assert!(rec.alerts().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_are_refused() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"bad-\xff.txt"));
        let rec = Recorder::default();
        rec.answer_open(Some(bad.clone()));
        rec.answer_save(Some(bad.clone()));
        let (mut ctx, ui) = context(&rec);

        assert!(matches!(request_open(&mut ctx), BridgeOutcome::Failed(_)));
        assert_eq!(rec.alerts().len(), 1);
        assert!(rec.alerts()[0].contains("UTF-8"));

        assert!(matches!(request_first_save(&mut ctx, "draft"), BridgeOutcome::Failed(_)));
        assert!(!bad.exists());
        assert!(ui.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_save_as_sends_no_reply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.txt");
        fs::write(&path, "old contents that are longer").unwrap();
        let rec = Recorder::default();
        rec.answer_save(Some(path.clone()));
        let (mut ctx, ui) = context(&rec);

        assert!(request_save_as(&mut ctx, "new").is_completed());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(ui.try_recv().unwrap().is_none());
        assert!(rec.titles().is_empty());
    }

    #[test]
    fn test_overwrite_failure_is_not_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("x.txt");
        let outcome = request_overwrite(bad.to_str().unwrap(), "x");
        assert!(matches!(outcome, BridgeOutcome::Failed(_)));
    }

    #[test]
    fn test_overwrite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let content = "line one\r\nline two\n\u{e9}\u{1f980}";
        assert!(request_overwrite(path.to_str().unwrap(), content).is_completed());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
