use std::collections::HashMap;

use super::channels::{Route, Side};
use super::envelope::Payload;
use super::error::IpcError;

/// A channel handler. `C` is whatever the owning side lets handlers touch.
pub type Listener<C> = Box<dyn FnMut(&Payload, &mut C)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry<C> {
    id: ListenerId,
    once: bool,
    handler: Listener<C>,
}

/// Listener table for one side of the bus.
///
/// Only routes the owning side can receive may be registered. A typed
/// [`Route`] that fails this is a wiring bug and panics on the spot; names
/// arriving as strings go through [`ListenerRegistry::on_name`] instead.
pub struct ListenerRegistry<C> {
    side: Side,
    routes: HashMap<Route, Vec<Entry<C>>>,
    next_id: u64,
}

impl<C> ListenerRegistry<C> {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            routes: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn on(&mut self, route: Route, handler: impl FnMut(&Payload, &mut C) + 'static) -> ListenerId {
        self.insert(route, false, Box::new(handler))
    }

    /// Register a handler that is dropped after its first delivery.
    pub fn once(&mut self, route: Route, handler: impl FnMut(&Payload, &mut C) + 'static) -> ListenerId {
        self.insert(route, true, Box::new(handler))
    }

    pub fn once_boxed(&mut self, route: Route, handler: Listener<C>) -> ListenerId {
        self.insert(route, true, handler)
    }

    pub fn on_name(
        &mut self,
        name: &str,
        handler: impl FnMut(&Payload, &mut C) + 'static,
    ) -> Result<ListenerId, IpcError> {
        let route: Route = name.parse()?;
        if route.receiver() != self.side {
            return Err(IpcError::WrongDirection {
                route: route.to_string(),
                side: self.side,
            });
        }
        Ok(self.on(route, handler))
    }

    fn insert(&mut self, route: Route, once: bool, handler: Listener<C>) -> ListenerId {
        assert_eq!(
            route.receiver(),
            self.side,
            "{route} is not delivered to the {} side",
            self.side
        );
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.routes
            .entry(route)
            .or_default()
            .push(Entry { id, once, handler });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        for entries in self.routes.values_mut() {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                entries.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn remove_all(&mut self, route: Route) {
        self.routes.remove(&route);
    }

    /// Drop pending one-shot handlers on a route, keeping persistent ones.
    pub fn remove_once(&mut self, route: Route) {
        if let Some(entries) = self.routes.get_mut(&route) {
            entries.retain(|e| !e.once);
        }
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    pub fn count(&self, route: Route) -> usize {
        self.routes.get(&route).map_or(0, Vec::len)
    }

    pub fn total(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// Deliver a payload to every handler on `route` in registration order.
    /// Returns how many handlers ran.
    pub fn emit(&mut self, route: Route, payload: &Payload, ctx: &mut C) -> usize {
        let Some(mut entries) = self.routes.remove(&route) else {
            return 0;
        };
        for entry in entries.iter_mut() {
            (entry.handler)(payload, ctx);
        }
        let delivered = entries.len();
        entries.retain(|e| !e.once);
        if !entries.is_empty() {
            self.routes.insert(route, entries);
        }
        delivered
    }
}
