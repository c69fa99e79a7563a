//! Request dispatch: routes each decoded client request to exactly one
//! handler and guarantees a paired response, while handlers fan
//! best-effort pushes out to other connected sessions.

pub mod dispatch;
pub mod misc;
pub mod stats;

pub use dispatch::{HandlerOutcome, RequestDispatcher, RequestHandler};
pub use misc::{BELL_RINGS_STAT, MiscHandlers, RING_NOTIFY_AREAS};
pub use stats::StatSink;
