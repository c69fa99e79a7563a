//! Connected-client sessions: per-session outbound message streams, player
//! state snapshots, and the registry that tracks every live session.

pub mod player;
pub mod registry;
pub mod stream;

pub use player::PlayerState;
pub use registry::{
    IdGenerator, RegistryConfig, RegistryFull, Session, SessionId, SessionRegistry,
};
pub use stream::{MessageStream, Outbound, StreamClosed};
