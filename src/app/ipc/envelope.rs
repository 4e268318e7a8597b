use serde::{Deserialize, Serialize};

use super::channels::{PROTOCOL_VERSION, PayloadKind, Route};
use super::error::IpcError;

/// File content delivered to the UI after an open, consumed once to seed the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountedFile {
    pub content: String,
    pub filepath: String,
}

/// Native edit primitives the widget exposes to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditAction {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum Payload {
    Empty,
    File(MountedFile),
    Text(String),
    Path(String),
    Flag(bool),
    /// `[path, content]`
    Overwrite(String, String),
    Edit(EditAction),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Empty => PayloadKind::Empty,
            Payload::File(_) => PayloadKind::File,
            Payload::Text(_) => PayloadKind::Text,
            Payload::Path(_) => PayloadKind::Path,
            Payload::Flag(_) => PayloadKind::Flag,
            Payload::Overwrite(..) => PayloadKind::Overwrite,
            Payload::Edit(_) => PayloadKind::Edit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub route: Route,
    pub payload: Payload,
}

impl Envelope {
    /// Build an envelope, rejecting payloads that do not match the route's schema.
    pub fn new(route: Route, payload: Payload) -> Result<Self, IpcError> {
        check_schema(route, &payload)?;
        Ok(Self {
            version: PROTOCOL_VERSION,
            route,
            payload,
        })
    }

    pub fn encode(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, IpcError> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn validate(&self) -> Result<(), IpcError> {
        if self.version != PROTOCOL_VERSION {
            return Err(IpcError::VersionMismatch {
                expected: PROTOCOL_VERSION,
                found: self.version,
            });
        }
        check_schema(self.route, &self.payload)
    }
}

fn check_schema(route: Route, payload: &Payload) -> Result<(), IpcError> {
    let expected = route
        .payload_kind()
        .ok_or_else(|| IpcError::NoReplySchema(route.channel().name().to_string()))?;
    let found = payload.kind();
    if expected != found {
        return Err(IpcError::PayloadMismatch {
            route: route.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}
