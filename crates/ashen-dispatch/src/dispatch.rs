//! Request dispatch: map an incoming request's kind to a handler.
//!
//! The [`RequestDispatcher`] maps [`RequestKind`] values to
//! [`RequestHandler`] implementations. One dispatcher serves one server
//! module; an outer chain may hold several dispatchers and offer each
//! request to them in turn, which is why an unowned kind yields
//! [`HandlerOutcome::Unhandled`] rather than being dropped.

use std::collections::HashMap;
use std::sync::Arc;

use ashen_proto::{RequestEnvelope, RequestKind};
use ashen_session::Session;

// ---------------------------------------------------------------------------
// HandlerOutcome
// ---------------------------------------------------------------------------

/// Result of offering one request to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The request was processed and answered.
    Handled,
    /// No handler here owns this kind; an outer chain may keep routing.
    Unhandled,
    /// The handler could not answer the requester; the transport layer
    /// should drop this session's connection.
    Error,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Trait for request handlers. Usually implemented as a boxed closure.
pub trait RequestHandler: Send + Sync {
    /// Process a single request for the given session.
    ///
    /// The session reference is borrowed for this call only; ownership
    /// stays with the registry.
    fn handle(&self, session: &Arc<Session>, request: &RequestEnvelope) -> HandlerOutcome;
}

/// Blanket implementation for closures.
impl<F> RequestHandler for F
where
    F: Fn(&Arc<Session>, &RequestEnvelope) -> HandlerOutcome + Send + Sync,
{
    fn handle(&self, session: &Arc<Session>, request: &RequestEnvelope) -> HandlerOutcome {
        self(session, request)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes incoming requests to registered handlers by [`RequestKind`].
pub struct RequestDispatcher {
    handlers: HashMap<RequestKind, Box<dyn RequestHandler>>,
}

impl RequestDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a specific request kind.
    pub fn register<H: RequestHandler + 'static>(&mut self, kind: RequestKind, handler: H) {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Offer one request to this dispatcher.
    ///
    /// Selects the handler by exact match on the request's declared kind
    /// and returns its outcome unchanged. Returns
    /// [`HandlerOutcome::Unhandled`] with no side effects when no handler
    /// owns the kind.
    pub fn dispatch(&self, session: &Arc<Session>, request: &RequestEnvelope) -> HandlerOutcome {
        match self.handlers.get(&request.body.kind()) {
            Some(handler) => handler.handle(session, request),
            None => HandlerOutcome::Unhandled,
        }
    }

    /// Return an iterator over registered kinds (useful for startup logging).
    pub fn registered_kinds(&self) -> impl Iterator<Item = &RequestKind> {
        self.handlers.keys()
    }
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use ashen_proto::{
        AreaId, BenchmarkThroughput, NotifyRingBell, PlayerId, Request, SendMessageToPlayers,
    };
    use ashen_session::{IdGenerator, MessageStream, PlayerState};

    fn dummy_session() -> Arc<Session> {
        let ids = IdGenerator::new();
        let (stream, rx) = MessageStream::channel();
        drop(rx);
        Arc::new(Session::new(
            ids.next_id(),
            "test",
            PlayerState::new(PlayerId(1), AreaId::EmberfallKeep),
            stream,
        ))
    }

    fn ring_envelope(sequence: u32) -> RequestEnvelope {
        RequestEnvelope {
            sequence,
            body: Request::NotifyRingBell(NotifyRingBell {
                area: AreaId::GreatBelfry,
                data: vec![],
            }),
        }
    }

    #[test]
    fn test_request_routed_to_matching_handler() {
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = Arc::clone(&hits);

        let mut dispatcher = RequestDispatcher::new();
        dispatcher.register(
            RequestKind::NotifyRingBell,
            move |_: &Arc<Session>, _: &RequestEnvelope| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
                HandlerOutcome::Handled
            },
        );

        let session = dummy_session();
        let outcome = dispatcher.dispatch(&session, &ring_envelope(1));
        assert_eq!(outcome, HandlerOutcome::Handled);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unowned_kind_is_unhandled() {
        let dispatcher = RequestDispatcher::new();
        let session = dummy_session();
        let outcome = dispatcher.dispatch(&session, &ring_envelope(1));
        assert_eq!(outcome, HandlerOutcome::Unhandled);
    }

    #[test]
    fn test_handler_outcome_returned_unchanged() {
        let mut dispatcher = RequestDispatcher::new();
        dispatcher.register(
            RequestKind::NotifyRingBell,
            |_: &Arc<Session>, _: &RequestEnvelope| HandlerOutcome::Error,
        );

        let session = dummy_session();
        assert_eq!(
            dispatcher.dispatch(&session, &ring_envelope(1)),
            HandlerOutcome::Error
        );
    }

    #[test]
    fn test_dispatch_keyed_by_kind_not_registration_order() {
        let ring_hits = Arc::new(AtomicU32::new(0));
        let relay_hits = Arc::new(AtomicU32::new(0));

        let mut dispatcher = RequestDispatcher::new();
        let rh = Arc::clone(&ring_hits);
        dispatcher.register(
            RequestKind::NotifyRingBell,
            move |_: &Arc<Session>, _: &RequestEnvelope| {
                rh.fetch_add(1, Ordering::SeqCst);
                HandlerOutcome::Handled
            },
        );
        let mh = Arc::clone(&relay_hits);
        dispatcher.register(
            RequestKind::SendMessageToPlayers,
            move |_: &Arc<Session>, _: &RequestEnvelope| {
                mh.fetch_add(1, Ordering::SeqCst);
                HandlerOutcome::Handled
            },
        );

        let session = dummy_session();
        let relay = RequestEnvelope {
            sequence: 2,
            body: Request::SendMessageToPlayers(SendMessageToPlayers {
                player_ids: vec![],
                message: vec![],
            }),
        };
        dispatcher.dispatch(&session, &relay);

        assert_eq!(ring_hits.load(Ordering::SeqCst), 0);
        assert_eq!(relay_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registered_kinds_reflect_table() {
        let mut dispatcher = RequestDispatcher::new();
        dispatcher.register(
            RequestKind::BenchmarkThroughput,
            |_: &Arc<Session>, _: &RequestEnvelope| HandlerOutcome::Handled,
        );

        let kinds: Vec<&RequestKind> = dispatcher.registered_kinds().collect();
        assert_eq!(kinds, vec![&RequestKind::BenchmarkThroughput]);

        // The registered handler still answers for its kind.
        let session = dummy_session();
        let envelope = RequestEnvelope {
            sequence: 3,
            body: Request::BenchmarkThroughput(BenchmarkThroughput { data: vec![9] }),
        };
        assert_eq!(
            dispatcher.dispatch(&session, &envelope),
            HandlerOutcome::Handled
        );
    }
}
