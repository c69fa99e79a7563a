//! Per-session outbound message streams.
//!
//! Each session exclusively owns one [`MessageStream`]: the seam between
//! game logic and that session's transport writer task. Handlers push
//! [`Outbound`] items through an unbounded [`tokio::sync::mpsc`] channel;
//! the transport side drains the paired receiver and puts the bytes on the
//! wire. A send never blocks the caller — it fails only once the transport
//! side has gone away.

use tokio::sync::mpsc;

use ashen_proto::{Push, PushEnvelope, RequestEnvelope, Response, ResponseEnvelope};

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Everything that can be sent to one session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Response paired with a specific request.
    Response(ResponseEnvelope),
    /// Server-initiated push.
    Push(PushEnvelope),
    /// Pre-encoded bytes forwarded verbatim, no envelope of our own.
    Raw(Vec<u8>),
}

/// The transport side of this stream is gone; the session is effectively
/// disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("outbound stream closed by transport")]
pub struct StreamClosed;

// ---------------------------------------------------------------------------
// MessageStream
// ---------------------------------------------------------------------------

/// Handle for sending outbound traffic to one session.
pub struct MessageStream {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl MessageStream {
    /// Create a stream and the receiver its transport task drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send a response paired with the request that triggered it.
    pub fn send_response(
        &self,
        body: Response,
        request: &RequestEnvelope,
    ) -> Result<(), StreamClosed> {
        self.send(Outbound::Response(ResponseEnvelope {
            in_reply_to: request.sequence,
            body,
        }))
    }

    /// Send a server-initiated push.
    pub fn send_push(&self, push: Push) -> Result<(), StreamClosed> {
        self.send(Outbound::Push(PushEnvelope { body: push }))
    }

    /// Forward pre-encoded bytes verbatim.
    pub fn send_raw(&self, bytes: Vec<u8>) -> Result<(), StreamClosed> {
        self.send(Outbound::Raw(bytes))
    }

    fn send(&self, item: Outbound) -> Result<(), StreamClosed> {
        self.tx.send(item).map_err(|_| StreamClosed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ashen_proto::{AreaId, NotifyRingBell, PlayerId, PushRingBell, Request};

    fn ring_request(sequence: u32) -> RequestEnvelope {
        RequestEnvelope {
            sequence,
            body: Request::NotifyRingBell(NotifyRingBell {
                area: AreaId::GreatBelfry,
                data: vec![],
            }),
        }
    }

    #[test]
    fn test_response_carries_request_sequence() {
        let (stream, mut rx) = MessageStream::channel();
        stream
            .send_response(Response::NotifyRingBell, &ring_request(17))
            .unwrap();

        match rx.try_recv().unwrap() {
            Outbound::Response(envelope) => {
                assert_eq!(envelope.in_reply_to, 17);
                assert_eq!(envelope.body, Response::NotifyRingBell);
            }
            other => panic!("expected response, got {other:?}"),
        }
    }

    #[test]
    fn test_push_has_no_correlation() {
        let (stream, mut rx) = MessageStream::channel();
        stream
            .send_push(Push::RingBell(PushRingBell {
                player_id: PlayerId(1),
                area: AreaId::GreatBelfry,
                data: vec![0xAB],
            }))
            .unwrap();

        let item = rx.try_recv().unwrap();
        assert!(matches!(item, Outbound::Push(_)));
    }

    #[test]
    fn test_raw_bytes_forwarded_verbatim() {
        let (stream, mut rx) = MessageStream::channel();
        let payload = vec![0xDE, 0xAD, 0xBE, 0xEF];
        stream.send_raw(payload.clone()).unwrap();

        assert_eq!(rx.try_recv().unwrap(), Outbound::Raw(payload));
    }

    #[test]
    fn test_send_fails_once_transport_is_gone() {
        let (stream, rx) = MessageStream::channel();
        drop(rx);

        let result = stream.send_response(Response::NotifyRingBell, &ring_request(1));
        assert_eq!(result, Err(StreamClosed));
    }

    #[test]
    fn test_sends_preserve_order() {
        let (stream, mut rx) = MessageStream::channel();
        stream.send_raw(vec![1]).unwrap();
        stream.send_raw(vec![2]).unwrap();
        stream.send_raw(vec![3]).unwrap();

        assert_eq!(rx.try_recv().unwrap(), Outbound::Raw(vec![1]));
        assert_eq!(rx.try_recv().unwrap(), Outbound::Raw(vec![2]));
        assert_eq!(rx.try_recv().unwrap(), Outbound::Raw(vec![3]));
    }
}
