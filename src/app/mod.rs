//! Application layer, independent of the widget toolkit.
//!
//! # Structure
//!
//! - `ipc/` - Channel registry, wire envelopes, the message bus and listener tables
//! - `host/` - Window controller, menu templates and the file bridge
//! - `surface/` - Editing surface controller and the widget handle registry
//! - `store/` - UI state slices, reducers and selectors
//! - `runtime.rs` - Drives both halves until the bus is quiet

pub mod error;
pub mod file_filters;
pub mod host;
pub mod ipc;
pub mod messages;
pub mod platform;
pub mod runtime;
pub mod settings;
pub mod store;
pub mod surface;

// Re-exports for convenient external access
pub use error::{AppError, Result};
pub use host::{HostContext, WindowController};
pub use messages::{MenuCommand, SurfaceEvent};
pub use platform::{Platform, detect_system_dark_mode};
pub use settings::{AppSettings, RunMode, ThemeMode};
pub use surface::EditingSurface;
