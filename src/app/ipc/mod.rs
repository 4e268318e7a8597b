//! Typed message boundary between the host and the UI surface.

pub mod bus;
pub mod channels;
pub mod envelope;
pub mod error;
pub mod listeners;

pub use bus::{ControlSignal, Frame, HostEndpoint, UiEndpoint, bus};
pub use channels::{Channel, Direction, PROTOCOL_VERSION, PayloadKind, Route, Side, reply_name};
pub use envelope::{EditAction, Envelope, MountedFile, Payload};
pub use error::IpcError;
pub use listeners::{Listener, ListenerId, ListenerRegistry};
