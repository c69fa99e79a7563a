//! Protocol message types and envelopes.
//!
//! A client request arrives as a [`RequestEnvelope`]: a sequence number for
//! response correlation plus one decoded [`Request`] payload. The server
//! answers every request with a [`ResponseEnvelope`] echoing that sequence
//! number, and may additionally originate [`PushEnvelope`]s that correlate
//! to nothing.
//!
//! The enum discriminant is the type tag; [`Request::kind`] extracts it as
//! a [`RequestKind`] for routing without consuming the payload.

use serde::{Deserialize, Serialize};

use crate::area::AreaId;

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Stable numeric identifier for one player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Decoded payload of one client request owned by this module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Request {
    /// Player rang a bell; nearby areas should hear about it.
    NotifyRingBell(NotifyRingBell),
    /// Forward an opaque pre-encoded message to a list of players.
    SendMessageToPlayers(SendMessageToPlayers),
    /// Upload bandwidth probe. Carried for protocol completeness only.
    MeasureUploadBandwidth(MeasureUploadBandwidth),
    /// Download bandwidth probe. Carried for protocol completeness only.
    MeasureDownloadBandwidth(MeasureDownloadBandwidth),
    /// Online shop listing. Carried for protocol completeness only.
    GetOnlineShopItemList(GetOnlineShopItemList),
    /// Throughput benchmark. Carried for protocol completeness only.
    BenchmarkThroughput(BenchmarkThroughput),
}

/// Routing tag identifying a request type, used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Bell-ring notification request.
    NotifyRingBell,
    /// Direct relay to named players.
    SendMessageToPlayers,
    /// Upload bandwidth probe.
    MeasureUploadBandwidth,
    /// Download bandwidth probe.
    MeasureDownloadBandwidth,
    /// Online shop listing.
    GetOnlineShopItemList,
    /// Throughput benchmark.
    BenchmarkThroughput,
}

impl Request {
    /// Extract the routing tag from a request without consuming it.
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::NotifyRingBell(_) => RequestKind::NotifyRingBell,
            Request::SendMessageToPlayers(_) => RequestKind::SendMessageToPlayers,
            Request::MeasureUploadBandwidth(_) => RequestKind::MeasureUploadBandwidth,
            Request::MeasureDownloadBandwidth(_) => RequestKind::MeasureDownloadBandwidth,
            Request::GetOnlineShopItemList(_) => RequestKind::GetOnlineShopItemList,
            Request::BenchmarkThroughput(_) => RequestKind::BenchmarkThroughput,
        }
    }
}

/// A bell was rung in (or at the boundary of) the declared area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifyRingBell {
    /// Area the client declares the ring happened in.
    pub area: AreaId,
    /// Opaque ring payload, copied verbatim into each push.
    pub data: Vec<u8>,
}

/// Relay an opaque pre-encoded message to each named player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageToPlayers {
    /// Target player identifiers. Disconnected targets are skipped.
    pub player_ids: Vec<PlayerId>,
    /// Pre-encoded message bytes, forwarded without interpretation.
    pub message: Vec<u8>,
}

/// Upload bandwidth probe payload. Never interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureUploadBandwidth {
    /// Probe filler bytes.
    pub data: Vec<u8>,
}

/// Download bandwidth probe payload. Never interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureDownloadBandwidth {
    /// Requested probe size in bytes.
    pub requested_bytes: u32,
}

/// Online shop listing request. Never interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetOnlineShopItemList {
    /// Shop category discriminant.
    pub shop_type: u32,
}

/// Throughput benchmark payload. Never interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkThroughput {
    /// Benchmark filler bytes.
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Acknowledgment payload paired with one request.
///
/// All six are empty-bodied: the client's protocol state machine stalls
/// without a paired response, even for requests the server does nothing
/// with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Response {
    /// Ack for [`Request::NotifyRingBell`].
    NotifyRingBell,
    /// Ack for [`Request::SendMessageToPlayers`].
    SendMessageToPlayers,
    /// Ack for [`Request::MeasureUploadBandwidth`].
    MeasureUploadBandwidth,
    /// Ack for [`Request::MeasureDownloadBandwidth`].
    MeasureDownloadBandwidth,
    /// Ack for [`Request::GetOnlineShopItemList`].
    GetOnlineShopItemList,
    /// Ack for [`Request::BenchmarkThroughput`].
    BenchmarkThroughput,
}

impl Response {
    /// The empty acknowledgment matching a request kind.
    pub fn ack(kind: RequestKind) -> Response {
        match kind {
            RequestKind::NotifyRingBell => Response::NotifyRingBell,
            RequestKind::SendMessageToPlayers => Response::SendMessageToPlayers,
            RequestKind::MeasureUploadBandwidth => Response::MeasureUploadBandwidth,
            RequestKind::MeasureDownloadBandwidth => Response::MeasureDownloadBandwidth,
            RequestKind::GetOnlineShopItemList => Response::GetOnlineShopItemList,
            RequestKind::BenchmarkThroughput => Response::BenchmarkThroughput,
        }
    }
}

// ---------------------------------------------------------------------------
// Pushes
// ---------------------------------------------------------------------------

/// Server-initiated message with no correlating request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Push {
    /// Someone rang a bell in an area the recipient cares about.
    RingBell(PushRingBell),
}

/// Bell-ring notification delivered to eligible sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushRingBell {
    /// Player who rang the bell.
    pub player_id: PlayerId,
    /// Area declared in the originating request.
    pub area: AreaId,
    /// Ring payload, byte-for-byte from the originating request.
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// One decoded inbound request: correlation header plus payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestEnvelope {
    /// Per-session sequence number, echoed by the matching response.
    pub sequence: u32,
    /// The decoded request payload.
    pub body: Request,
}

/// One outbound response, paired with the request that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseEnvelope {
    /// Sequence number of the request this responds to.
    pub in_reply_to: u32,
    /// The response payload.
    pub body: Response,
}

/// One outbound server push. No correlation header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushEnvelope {
    /// The push payload; its variant is the push-type identifier.
    pub body: Push,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_extraction() {
        let ring = Request::NotifyRingBell(NotifyRingBell {
            area: AreaId::GreatBelfry,
            data: vec![1, 2, 3],
        });
        assert_eq!(ring.kind(), RequestKind::NotifyRingBell);

        let relay = Request::SendMessageToPlayers(SendMessageToPlayers {
            player_ids: vec![PlayerId(7)],
            message: vec![0xAB],
        });
        assert_eq!(relay.kind(), RequestKind::SendMessageToPlayers);

        let bench = Request::BenchmarkThroughput(BenchmarkThroughput { data: vec![] });
        assert_eq!(bench.kind(), RequestKind::BenchmarkThroughput);
    }

    #[test]
    fn test_ack_matches_every_kind() {
        let kinds = [
            RequestKind::NotifyRingBell,
            RequestKind::SendMessageToPlayers,
            RequestKind::MeasureUploadBandwidth,
            RequestKind::MeasureDownloadBandwidth,
            RequestKind::GetOnlineShopItemList,
            RequestKind::BenchmarkThroughput,
        ];
        for kind in kinds {
            // Each ack variant mirrors its request kind one-to-one.
            let ack = Response::ack(kind);
            assert_eq!(format!("{ack:?}"), format!("{kind:?}"));
        }
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(42).to_string(), "42");
    }
}
