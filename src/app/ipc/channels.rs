//! The closed vocabulary of channels shared by the host and the UI surface.
//!
//! Every message crossing the bus names a [`Route`]: a registered [`Channel`]
//! plus a flag saying whether it is the channel's reply. Reply names are
//! always derived with [`reply_name`], so no reply ever needs registering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::IpcError;

/// Bumped whenever a channel changes its payload shape.
pub const PROTOCOL_VERSION: u32 = 1;

/// Suffix appended to a request channel name to form its reply channel.
pub const REPLY_SUFFIX: &str = "::reply";

/// Derive the reply channel name for any request channel name.
pub fn reply_name(name: &str) -> String {
    format!("{name}{REPLY_SUFFIX}")
}

/// Which half of the application a message flows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    UiToHost,
    HostToUi,
    /// Stays on the UI side; used for buffer reads that never leave it.
    Local,
}

/// An endpoint of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Host,
    Ui,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Host => f.write_str("host"),
            Side::Ui => f.write_str("ui"),
        }
    }
}

/// Shape of a payload, used to validate envelopes against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    Empty,
    File,
    Text,
    Path,
    Flag,
    Overwrite,
    Edit,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    OpenFile,
    SaveFile,
    SaveAsFile,
    FetchCodeToSave,
    FetchCodeToSaveAs,
    SetCodemap,
    WriteInFile,
    OpenedFilePath,
    EditAction,
    FetchCode,
    Ping,
}

impl Channel {
    pub const ALL: [Channel; 11] = [
        Channel::OpenFile,
        Channel::SaveFile,
        Channel::SaveAsFile,
        Channel::FetchCodeToSave,
        Channel::FetchCodeToSaveAs,
        Channel::SetCodemap,
        Channel::WriteInFile,
        Channel::OpenedFilePath,
        Channel::EditAction,
        Channel::FetchCode,
        Channel::Ping,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::OpenFile => "open-file",
            Channel::SaveFile => "save-file",
            Channel::SaveAsFile => "save-as-file",
            Channel::FetchCodeToSave => "fetch-code-to-save",
            Channel::FetchCodeToSaveAs => "fetch-code-to-save-as",
            Channel::SetCodemap => "set-codemap",
            Channel::WriteInFile => "write-in-file",
            Channel::OpenedFilePath => "get-opened-file-path",
            Channel::EditAction => "edit-action",
            Channel::FetchCode => "fetch-code",
            Channel::Ping => "ping",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Channel::SaveFile | Channel::SaveAsFile | Channel::WriteInFile | Channel::Ping => {
                Direction::UiToHost
            }
            Channel::OpenFile
            | Channel::FetchCodeToSave
            | Channel::FetchCodeToSaveAs
            | Channel::SetCodemap
            | Channel::OpenedFilePath
            | Channel::EditAction => Direction::HostToUi,
            Channel::FetchCode => Direction::Local,
        }
    }

    /// Payload carried by a request on this channel.
    pub fn request_kind(self) -> PayloadKind {
        match self {
            Channel::OpenFile => PayloadKind::File,
            Channel::SaveFile | Channel::SaveAsFile | Channel::Ping => PayloadKind::Text,
            Channel::FetchCodeToSave | Channel::FetchCodeToSaveAs | Channel::FetchCode => {
                PayloadKind::Empty
            }
            Channel::SetCodemap => PayloadKind::Flag,
            Channel::WriteInFile => PayloadKind::Overwrite,
            Channel::OpenedFilePath => PayloadKind::Path,
            Channel::EditAction => PayloadKind::Edit,
        }
    }

    /// Payload carried by the reply, or `None` when the channel never replies.
    pub fn reply_kind(self) -> Option<PayloadKind> {
        match self {
            Channel::SaveFile => Some(PayloadKind::Path),
            Channel::FetchCode | Channel::Ping => Some(PayloadKind::Text),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn reply_name(self) -> String {
        reply_name(self.name())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request channel or the reply half of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Route {
    channel: Channel,
    reply: bool,
}

impl Route {
    pub fn request(channel: Channel) -> Self {
        Self { channel, reply: false }
    }

    pub fn reply(channel: Channel) -> Self {
        Self { channel, reply: true }
    }

    pub fn channel(self) -> Channel {
        self.channel
    }

    pub fn is_reply(self) -> bool {
        self.reply
    }

    /// Payload schema for this route; `None` for the reply of a channel that never replies.
    pub fn payload_kind(self) -> Option<PayloadKind> {
        if self.reply {
            self.channel.reply_kind()
        } else {
            Some(self.channel.request_kind())
        }
    }

    /// The side that consumes messages on this route.
    pub fn receiver(self) -> Side {
        match (self.channel.direction(), self.reply) {
            (Direction::UiToHost, false) | (Direction::HostToUi, true) => Side::Host,
            (Direction::HostToUi, false) | (Direction::UiToHost, true) => Side::Ui,
            (Direction::Local, _) => Side::Ui,
        }
    }

    /// The side allowed to post messages on this route.
    pub fn sender(self) -> Side {
        match self.channel.direction() {
            Direction::Local => Side::Ui,
            _ => match self.receiver() {
                Side::Host => Side::Ui,
                Side::Ui => Side::Host,
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reply {
            f.write_str(&self.channel.reply_name())
        } else {
            f.write_str(self.channel.name())
        }
    }
}

impl FromStr for Route {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, reply) = match s.strip_suffix(REPLY_SUFFIX) {
            Some(base) => (base, true),
            None => (s, false),
        };
        Channel::from_name(name)
            .map(|channel| Route { channel, reply })
            .ok_or_else(|| IpcError::UnknownChannel(s.to_string()))
    }
}

impl From<Route> for String {
    fn from(route: Route) -> String {
        route.to_string()
    }
}

impl TryFrom<String> for Route {
    type Error = IpcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
