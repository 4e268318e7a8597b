//! In-process transport between the host and the UI surface.
//!
//! Each direction is an mpsc queue of JSON frames. Nothing but encoded
//! strings crosses it, so both halves stay as isolated as two processes
//! would be. Frames on one queue are delivered in send order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};

use super::channels::{Channel, Route, Side};
use super::envelope::{Envelope, Payload};
use super::error::IpcError;

/// Out-of-band instructions from the host that are not channel messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlSignal {
    /// Throw away the UI side and build it again from scratch.
    Reload,
    /// Dump the UI state to the log.
    Inspect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "kebab-case")]
pub enum Frame {
    Message { envelope: Envelope },
    Control { signal: ControlSignal },
}

impl Frame {
    fn decode(raw: &str) -> Result<Self, IpcError> {
        let frame: Frame = serde_json::from_str(raw)?;
        if let Frame::Message { envelope } = &frame {
            envelope.validate()?;
        }
        Ok(frame)
    }
}

/// Create a connected pair of endpoints.
pub fn bus() -> (HostEndpoint, UiEndpoint) {
    let (to_ui, ui_inbox) = mpsc::channel();
    let (to_host, host_inbox) = mpsc::channel();

    let host = HostEndpoint {
        outbound: to_ui.clone(),
        inbound: host_inbox,
    };
    let ui = UiEndpoint {
        outbound: to_host,
        loopback: to_ui,
        inbound: ui_inbox,
    };
    (host, ui)
}

fn post(tx: &Sender<String>, side: Side, route: Route, payload: Payload) -> Result<(), IpcError> {
    if route.sender() != side {
        return Err(IpcError::WrongDirection {
            route: route.to_string(),
            side,
        });
    }
    let envelope = Envelope::new(route, payload)?;
    let raw = serde_json::to_string(&Frame::Message { envelope })?;
    tracing::trace!(%route, %side, "post");
    tx.send(raw).map_err(|_| IpcError::Disconnected)
}

fn poll(rx: &Receiver<String>) -> Result<Option<Frame>, IpcError> {
    match rx.try_recv() {
        Ok(raw) => Frame::decode(&raw).map(Some),
        Err(TryRecvError::Empty) => Ok(None),
        Err(TryRecvError::Disconnected) => Err(IpcError::Disconnected),
    }
}

pub struct HostEndpoint {
    outbound: Sender<String>,
    inbound: Receiver<String>,
}

impl HostEndpoint {
    pub fn send(&self, channel: Channel, payload: Payload) -> Result<(), IpcError> {
        post(&self.outbound, Side::Host, Route::request(channel), payload)
    }

    pub fn reply(&self, channel: Channel, payload: Payload) -> Result<(), IpcError> {
        post(&self.outbound, Side::Host, Route::reply(channel), payload)
    }

    pub fn signal(&self, signal: ControlSignal) -> Result<(), IpcError> {
        let raw = serde_json::to_string(&Frame::Control { signal })?;
        self.outbound.send(raw).map_err(|_| IpcError::Disconnected)
    }

    /// Next message addressed to the host, if one is queued.
    pub fn try_recv(&self) -> Result<Option<Envelope>, IpcError> {
        loop {
            match poll(&self.inbound)? {
                Some(Frame::Message { envelope }) => return Ok(Some(envelope)),
                Some(Frame::Control { signal }) => {
                    tracing::warn!(?signal, "host ignored a control frame");
                }
                None => return Ok(None),
            }
        }
    }
}

pub struct UiEndpoint {
    outbound: Sender<String>,
    loopback: Sender<String>,
    inbound: Receiver<String>,
}

impl UiEndpoint {
    pub fn send(&self, channel: Channel, payload: Payload) -> Result<(), IpcError> {
        post(&self.outbound, Side::Ui, Route::request(channel), payload)
    }

    /// Post a UI-local request; it is queued behind anything already inbound.
    pub fn send_local(&self, channel: Channel, payload: Payload) -> Result<(), IpcError> {
        post(&self.loopback, Side::Ui, Route::request(channel), payload)
    }

    pub fn reply_local(&self, channel: Channel, payload: Payload) -> Result<(), IpcError> {
        post(&self.loopback, Side::Ui, Route::reply(channel), payload)
    }

    pub fn try_recv(&self) -> Result<Option<Frame>, IpcError> {
        poll(&self.inbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_arrive_in_send_order() {
        let (host, ui) = bus();
        host.send(Channel::SetCodemap, Payload::Flag(false)).unwrap();
        host.send(Channel::SetCodemap, Payload::Flag(true)).unwrap();
        host.send(Channel::FetchCodeToSave, Payload::Empty).unwrap();

        let mut seen = Vec::new();
        while let Some(Frame::Message { envelope }) = ui.try_recv().unwrap() {
            seen.push(envelope.payload);
        }
        assert_eq!(seen, vec![Payload::Flag(false), Payload::Flag(true), Payload::Empty]);
    }

    #[test]
    fn test_host_cannot_send_ui_bound_requests_the_wrong_way() {
        let (host, ui) = bus();
        let err = host.send(Channel::SaveFile, Payload::Text("x".into())).unwrap_err();
        assert!(matches!(err, IpcError::WrongDirection { side: Side::Host, .. }));

        let err = ui.send(Channel::OpenFile, Payload::Empty).unwrap_err();
        assert!(matches!(err, IpcError::WrongDirection { side: Side::Ui, .. }));
    }

    #[test]
    fn test_reply_reaches_ui() {
        let (host, ui) = bus();
        ui.send(Channel::SaveFile, Payload::Text("draft".into())).unwrap();
        let request = host.try_recv().unwrap().unwrap();
        assert_eq!(request.route, Route::request(Channel::SaveFile));

        host.reply(Channel::SaveFile, Payload::Path("/tmp/b.txt".into())).unwrap();
        match ui.try_recv().unwrap() {
            Some(Frame::Message { envelope }) => {
                assert_eq!(envelope.route.to_string(), "save-file::reply");
                assert_eq!(envelope.payload, Payload::Path("/tmp/b.txt".into()));
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_local_messages_loop_back_to_ui() {
        let (host, ui) = bus();
        ui.send_local(Channel::FetchCode, Payload::Empty).unwrap();
        assert!(host.try_recv().unwrap().is_none());
        assert!(matches!(ui.try_recv().unwrap(), Some(Frame::Message { .. })));
    }

    #[test]
    fn test_control_frames() {
        let (host, ui) = bus();
        host.signal(ControlSignal::Reload).unwrap();
        assert_eq!(
            ui.try_recv().unwrap(),
            Some(Frame::Control { signal: ControlSignal::Reload })
        );
        assert_eq!(ui.try_recv().unwrap(), None);
    }

    #[test]
    fn test_disconnected_host() {
        let (host, ui) = bus();
        drop(ui);
        assert!(matches!(
            host.send(Channel::SetCodemap, Payload::Flag(true)),
            Err(IpcError::Disconnected)
        ));
        assert!(matches!(host.try_recv(), Err(IpcError::Disconnected)));
    }
}
