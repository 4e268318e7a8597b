use std::collections::HashMap;

use crate::app::ipc::EditAction;
use crate::app::store::{EditorId, EditorOptions};

/// The embedded editing widget, as far as the surface needs to know it.
pub trait EditorWidget {
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str);
    fn set_minimap_enabled(&mut self, enabled: bool);
    fn apply_edit(&mut self, action: EditAction);
    /// Release the widget. It must not be used afterwards.
    fn dispose(&mut self);
}

/// Builds a widget from construction options. Called once per mount.
pub type EditorFactory = Box<dyn FnMut(&EditorOptions) -> Box<dyn EditorWidget>>;

/// Process-local widget handles, keyed by the id the store keeps.
#[derive(Default)]
pub struct EditorRegistry {
    handles: HashMap<EditorId, Box<dyn EditorWidget>>,
    next_id: u64,
}

impl EditorRegistry {
    pub fn insert(&mut self, widget: Box<dyn EditorWidget>) -> EditorId {
        self.next_id += 1;
        let id = EditorId(self.next_id);
        self.handles.insert(id, widget);
        id
    }

    pub fn get(&self, id: EditorId) -> Option<&dyn EditorWidget> {
        self.handles.get(&id).map(|w| w.as_ref())
    }

    pub fn get_mut(&mut self, id: EditorId) -> Option<&mut (dyn EditorWidget + 'static)> {
        self.handles.get_mut(&id).map(|w| w.as_mut())
    }

    pub fn remove(&mut self, id: EditorId) -> Option<Box<dyn EditorWidget>> {
        self.handles.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
