//! Wire-facing protocol types: area identifiers, request/response/push
//! messages, and the versioned binary codec.

pub mod area;
pub mod codec;
pub mod messages;

pub use area::AreaId;
pub use codec::{CodecError, WIRE_VERSION, decode, encode};
pub use messages::{
    BenchmarkThroughput, GetOnlineShopItemList, MeasureDownloadBandwidth, MeasureUploadBandwidth,
    NotifyRingBell, PlayerId, Push, PushEnvelope, PushRingBell, Request, RequestEnvelope,
    RequestKind, Response, ResponseEnvelope, SendMessageToPlayers,
};
