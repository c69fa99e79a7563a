//! Miscellaneous request handlers: bell-ring broadcast, direct relay to
//! players, and the dormant request kinds that still require an answer.
//!
//! Push fan-out here is best effort and isolated per target: one
//! unreachable peer never prevents the action from completing for its
//! initiator or for the other recipients. The only failure that escalates
//! is being unable to answer the requester itself.

use std::sync::Arc;

use ashen_proto::{
    AreaId, Push, PushRingBell, Request, RequestEnvelope, RequestKind, Response,
};
use ashen_session::{Session, SessionRegistry};

use crate::dispatch::{HandlerOutcome, RequestDispatcher};
use crate::stats::StatSink;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Areas whose occupants are notified when a bell is rung.
pub const RING_NOTIFY_AREAS: &[AreaId] = &[
    AreaId::DragonspireApproach,
    AreaId::DragonspireSummit,
    AreaId::GreatBelfry,
    AreaId::BelfryOverlook,
    AreaId::WyvernRoost,
    AreaId::StormdrakeArena,
    AreaId::DrakeMausoleum,
    AreaId::MausoleumLift,
];

/// Counter name for bell rings, used both globally and per player.
pub const BELL_RINGS_STAT: &str = "bell/total_rings";

// ---------------------------------------------------------------------------
// MiscHandlers
// ---------------------------------------------------------------------------

/// The handler set for this module's request kinds.
pub struct MiscHandlers {
    registry: Arc<SessionRegistry>,
    stats: Arc<StatSink>,
}

impl MiscHandlers {
    /// Create the handler set over shared server state.
    pub fn new(registry: Arc<SessionRegistry>, stats: Arc<StatSink>) -> Self {
        Self { registry, stats }
    }

    /// Install one handler per owned [`RequestKind`] into `dispatcher`.
    pub fn register(self: &Arc<Self>, dispatcher: &mut RequestDispatcher) {
        let handlers = Arc::clone(self);
        dispatcher.register(
            RequestKind::NotifyRingBell,
            move |session: &Arc<Session>, request: &RequestEnvelope| {
                handlers.handle_ring_bell(session, request)
            },
        );

        let handlers = Arc::clone(self);
        dispatcher.register(
            RequestKind::SendMessageToPlayers,
            move |session: &Arc<Session>, request: &RequestEnvelope| {
                handlers.handle_send_message_to_players(session, request)
            },
        );

        // Kinds no known client build actually issues. Each still gets a
        // registered handler so the client's protocol state machine never
        // stalls waiting for an answer.
        for kind in [
            RequestKind::MeasureUploadBandwidth,
            RequestKind::MeasureDownloadBandwidth,
            RequestKind::GetOnlineShopItemList,
            RequestKind::BenchmarkThroughput,
        ] {
            let handlers = Arc::clone(self);
            dispatcher.register(
                kind,
                move |session: &Arc<Session>, request: &RequestEnvelope| {
                    handlers.handle_dormant(session, request)
                },
            );
        }
    }

    /// A bell was rung: push a notification to every session currently in
    /// one of [`RING_NOTIFY_AREAS`], record the event, ack the requester.
    fn handle_ring_bell(
        &self,
        session: &Arc<Session>,
        request: &RequestEnvelope,
    ) -> HandlerOutcome {
        let Request::NotifyRingBell(ring) = &request.body else {
            return HandlerOutcome::Unhandled;
        };
        let player = session.player_state();

        // Snapshot of eligible sessions; area membership is the only
        // filter, so the requester is included iff its own area qualifies.
        let targets = self
            .registry
            .find_matching(|other| other.player_state().in_any_area(RING_NOTIFY_AREAS));

        for target in &targets {
            let push = Push::RingBell(PushRingBell {
                player_id: player.player_id,
                area: ring.area,
                data: ring.data.clone(),
            });
            if target.stream().send_push(push).is_err() {
                tracing::warn!(
                    from = %session.name(),
                    to = %target.name(),
                    "failed to deliver bell ring push"
                );
            }
        }

        // The bell was rung whether or not anyone heard it.
        self.stats.add_global(BELL_RINGS_STAT, 1);
        self.stats
            .add_for_player(BELL_RINGS_STAT, player.player_id, 1);

        self.send_ack(session, request)
    }

    /// Forward an opaque pre-encoded payload to each named player.
    ///
    /// The payload is not validated, decoded, or checked against any
    /// authorization rule: any connected session can place arbitrary bytes
    /// on any other session's stream. This passthrough matches the wire
    /// protocol the live clients speak; tightening it here would break
    /// them, so the trust boundary is the protocol's, not ours.
    fn handle_send_message_to_players(
        &self,
        session: &Arc<Session>,
        request: &RequestEnvelope,
    ) -> HandlerOutcome {
        let Request::SendMessageToPlayers(relay) = &request.body else {
            return HandlerOutcome::Unhandled;
        };

        for &player_id in &relay.player_ids {
            match self.registry.find_by_player(player_id) {
                None => {
                    tracing::warn!(
                        from = %session.name(),
                        target = %player_id,
                        "relay target is not connected"
                    );
                }
                Some(target) => {
                    if target.stream().send_raw(relay.message.clone()).is_err() {
                        tracing::warn!(
                            from = %session.name(),
                            to = %target.name(),
                            "failed to forward relayed payload"
                        );
                    }
                }
            }
        }

        self.send_ack(session, request)
    }

    /// Answer a request kind that has no live implementation.
    fn handle_dormant(&self, session: &Arc<Session>, request: &RequestEnvelope) -> HandlerOutcome {
        if cfg!(debug_assertions) {
            // Loud in development; a remote peer must not be able to take
            // the process down by sending one of these.
            tracing::error!(
                client = %session.name(),
                kind = ?request.body.kind(),
                "request kind has no live implementation"
            );
        }

        self.send_ack(session, request)
    }

    /// Send the empty acknowledgment every request must be paired with.
    ///
    /// Failure here is the one condition that escalates: without the ack
    /// the requester's protocol state machine cannot continue, so the
    /// transport layer is told to drop the connection.
    fn send_ack(&self, session: &Arc<Session>, request: &RequestEnvelope) -> HandlerOutcome {
        let kind = request.body.kind();
        if session
            .stream()
            .send_response(Response::ack(kind), request)
            .is_err()
        {
            tracing::warn!(
                client = %session.name(),
                kind = ?kind,
                "disconnecting client, failed to send response"
            );
            return HandlerOutcome::Error;
        }
        HandlerOutcome::Handled
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
