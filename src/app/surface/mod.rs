//! UI side of the application: the editing widget, the store, and the
//! channel listeners that tie them to the host.
//!
//! Listeners capture selector snapshots when they are registered. Any store
//! change therefore triggers a fresh [`EditingSurface::render`], which first
//! drops every listener and then registers the full set again, so a handler
//! never runs twice and never sees a stale snapshot.

pub mod editor_widget;
pub mod status;

use crate::app::ipc::{
    Channel, ControlSignal, Envelope, Frame, IpcError, Listener, ListenerRegistry, Payload, Route,
    Side, UiEndpoint,
};
use crate::app::store::{
    EditorAction, EditorId, EditorOptions, FileWorkAction, Store, select_editor,
    select_is_saved, select_mounted_file_path,
};

pub use editor_widget::{EditorFactory, EditorRegistry, EditorWidget};
pub use status::{StatusLine, StatusMode};

/// Everything a channel handler may touch.
pub struct SurfaceCore {
    store: Store,
    editors: EditorRegistry,
    endpoint: UiEndpoint,
    status: StatusLine,
    /// One-shot listeners requested by handlers, installed after the current delivery.
    armed: Vec<(Route, Listener<SurfaceCore>)>,
}

impl SurfaceCore {
    fn editor_text(&self, editor: Option<EditorId>) -> Option<String> {
        editor.and_then(|id| self.editors.get(id)).map(|w| w.value())
    }

    fn send(&self, channel: Channel, payload: Payload) -> bool {
        match self.endpoint.send(channel, payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(%channel, "send failed: {e}");
                false
            }
        }
    }

    fn send_local(&self, channel: Channel, payload: Payload) {
        if let Err(e) = self.endpoint.send_local(channel, payload) {
            tracing::error!(%channel, "local send failed: {e}");
        }
    }

    /// Hand the buffer to the host's save dialog and wait for the chosen path.
    fn request_first_save(&mut self, content: String) {
        if !self.send(Channel::SaveFile, Payload::Text(content)) {
            return;
        }
        let on_reply: Listener<SurfaceCore> = Box::new(|payload: &Payload, core: &mut SurfaceCore| {
            if let Payload::Path(path) = payload {
                core.store.dispatch(FileWorkAction::SetIsSaved(true));
                core.store.dispatch(FileWorkAction::SetMountedFilePath(path.clone()));
            }
        });
        self.armed.push((Route::reply(Channel::SaveFile), on_reply));
    }
}

pub struct EditingSurface {
    core: SurfaceCore,
    listeners: ListenerRegistry<SurfaceCore>,
    options: EditorOptions,
    factory: EditorFactory,
    rendered_revision: Option<u64>,
}

impl EditingSurface {
    pub fn new(endpoint: UiEndpoint, options: EditorOptions, factory: EditorFactory) -> Self {
        Self {
            core: SurfaceCore {
                store: Store::new(),
                editors: EditorRegistry::default(),
                endpoint,
                status: StatusLine::default(),
                armed: Vec::new(),
            },
            listeners: ListenerRegistry::new(Side::Ui),
            options,
            factory,
            rendered_revision: None,
        }
    }

    /// Mount the widget, wire the listeners and say hello to the host.
    pub fn start(&mut self) {
        self.mount();
        self.render();
        self.core.send(Channel::Ping, Payload::Text("ping".to_string()));
    }

    /// Create the editing widget unless one already exists.
    pub fn mount(&mut self) -> EditorId {
        if let Some(id) = select_editor(&self.core.store) {
            tracing::debug!(?id, "editor already mounted");
            return id;
        }
        let widget = (self.factory)(&self.options);
        let id = self.core.editors.insert(widget);
        self.core.store.dispatch(EditorAction::Init {
            id,
            options: self.options.clone(),
        });
        tracing::info!(?id, "editor mounted");
        id
    }

    /// Dispose the widget and clear the editor slice.
    pub fn destroy_editor(&mut self) {
        let Some(id) = select_editor(&self.core.store) else {
            return;
        };
        if let Some(mut widget) = self.core.editors.remove(id) {
            widget.dispose();
        }
        self.core.store.dispatch(EditorAction::Destroy);
    }

    pub fn render(&mut self) {
        self.listeners.clear();

        let store = &self.core.store;
        let editor = select_editor(store);
        let is_saved = select_is_saved(store);
        let mounted_path = select_mounted_file_path(store).map(str::to_owned);

        self.listeners
            .on(Route::request(Channel::SetCodemap), move |payload, core| {
                let Payload::Flag(enabled) = payload else { return };
                if let Some(widget) = editor.and_then(|id| core.editors.get_mut(id)) {
                    widget.set_minimap_enabled(*enabled);
                }
            });

        self.listeners
            .on(Route::request(Channel::OpenFile), move |payload, core| {
                let Payload::File(file) = payload else { return };
                core.store.dispatch(FileWorkAction::SetIsSaved(true));
                core.store
                    .dispatch(FileWorkAction::SetMountedFilePath(file.filepath.clone()));
                if let Some(widget) = editor.and_then(|id| core.editors.get_mut(id)) {
                    widget.set_value(&file.content);
                }
                core.send_local(Channel::FetchCode, Payload::Empty);
            });

        self.listeners
            .on(Route::request(Channel::FetchCodeToSaveAs), move |_, core| {
                if let Some(content) = core.editor_text(editor) {
                    core.request_first_save(content);
                }
            });

        self.listeners
            .on(Route::request(Channel::FetchCodeToSave), move |_, core| {
                let Some(content) = core.editor_text(editor) else { return };
                match (is_saved, &mounted_path) {
                    (true, Some(path)) => {
                        if core.send(Channel::WriteInFile, Payload::Overwrite(path.clone(), content)) {
                            core.status.notify(format!("Saved {}", path));
                        }
                    }
                    _ => core.request_first_save(content),
                }
            });

        self.listeners
            .on(Route::request(Channel::OpenedFilePath), |payload, core| {
                if let Payload::Path(path) = payload {
                    core.status.notify(format!("Saved {}", path));
                }
            });

        self.listeners
            .on(Route::request(Channel::EditAction), move |payload, core| {
                let Payload::Edit(action) = payload else { return };
                if let Some(widget) = editor.and_then(|id| core.editors.get_mut(id)) {
                    widget.apply_edit(*action);
                }
            });

        self.listeners
            .on(Route::request(Channel::FetchCode), move |_, core| {
                if let Some(content) = core.editor_text(editor) {
                    if let Err(e) = core.endpoint.reply_local(Channel::FetchCode, Payload::Text(content)) {
                        tracing::error!("fetch-code reply failed: {e}");
                    }
                }
            });

        self.listeners
            .on(Route::reply(Channel::FetchCode), |payload, core| {
                if let Payload::Text(content) = payload {
                    core.status.show_stats(content);
                }
            });

        self.listeners.on(Route::reply(Channel::Ping), |payload, _| {
            if let Payload::Text(answer) = payload {
                tracing::info!("host answered ping: {answer}");
            }
        });

        self.rendered_revision = Some(self.core.store.revision());
    }

    /// Drain the inbound queue. Returns the number of frames handled.
    pub fn pump(&mut self) -> Result<usize, IpcError> {
        let mut handled = 0;
        while let Some(frame) = self.core.endpoint.try_recv()? {
            handled += 1;
            match frame {
                Frame::Message { envelope } => self.deliver(envelope),
                Frame::Control { signal: ControlSignal::Reload } => self.reload(),
                Frame::Control { signal: ControlSignal::Inspect } => self.inspect(),
            }
        }
        Ok(handled)
    }

    pub fn deliver(&mut self, envelope: Envelope) {
        let route = envelope.route;
        let delivered = self.listeners.emit(route, &envelope.payload, &mut self.core);
        if delivered == 0 {
            tracing::debug!(%route, "no listener on route");
        }

        for (route, listener) in std::mem::take(&mut self.core.armed) {
            self.listeners.remove_once(route);
            self.listeners.once_boxed(route, listener);
        }

        if self.rendered_revision != Some(self.core.store.revision()) {
            self.render();
        }
    }

    /// Send the buffer to the host as a detached copy; the store is left untouched.
    pub fn save_copy_as(&mut self) {
        let editor = select_editor(&self.core.store);
        if let Some(content) = self.core.editor_text(editor) {
            self.core.send(Channel::SaveAsFile, Payload::Text(content));
        }
    }

    /// Ask for fresh buffer statistics; the answer arrives on the next pump.
    pub fn refresh_stats(&mut self) {
        self.core.send_local(Channel::FetchCode, Payload::Empty);
    }

    /// Rebuild the UI side from nothing, as a fresh process would start.
    pub fn reload(&mut self) {
        tracing::info!("reloading editing surface");
        self.destroy_editor();
        self.core.store = Store::new();
        self.core.status = StatusLine::default();
        self.core.armed.clear();
        self.start();
    }

    pub fn inspect(&self) {
        match self.core.store.to_json() {
            Ok(json) => tracing::info!(listeners = self.listeners.total(), "ui state:\n{json}"),
            Err(e) => tracing::warn!("could not serialize ui state: {e}"),
        }
    }

    pub fn store(&self) -> &Store {
        &self.core.store
    }

    pub fn status(&self) -> &StatusLine {
        &self.core.status
    }

    pub fn listener_count(&self, route: Route) -> usize {
        self.listeners.count(route)
    }

    pub fn mounted_editors(&self) -> usize {
        self.core.editors.len()
    }
}
