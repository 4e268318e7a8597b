use thiserror::Error;

use super::channels::{PayloadKind, Side};

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("unregistered channel: {0}")]
    UnknownChannel(String),

    #[error("payload mismatch on {route}: expected {expected}, found {found}")]
    PayloadMismatch {
        route: String,
        expected: PayloadKind,
        found: PayloadKind,
    },

    #[error("channel {0} has no reply")]
    NoReplySchema(String),

    #[error("{side} side cannot send on {route}")]
    WrongDirection { route: String, side: Side },

    #[error("protocol version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("frame codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("peer endpoint disconnected")]
    Disconnected,
}
