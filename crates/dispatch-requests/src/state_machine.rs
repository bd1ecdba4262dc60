//! The request state machine: the legal transition table, the
//! optimistic-concurrency check that guards it, and the journal entry every
//! transition appends.

use crate::error::TransitionError;
use crate::events::RequestEvent;
use crate::model::{ActorRole, Request, RequestComment, RequestStatus};
use chrono::Utc;
use dispatch_core::events::EventListeners;
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// One row of the legal-transition table: `(from, to, roles allowed to
/// perform it)`. `System` stands for the dispatcher/automation acting
/// without a human actor (e.g. auto-assignment).
const TRANSITIONS: &[(RequestStatus, RequestStatus, &[ActorRole])] = &[
    (
        RequestStatus::New,
        RequestStatus::Assigned,
        &[ActorRole::Admin, ActorRole::System],
    ),
    (RequestStatus::New, RequestStatus::Rejected, &[ActorRole::Admin]),
    (
        RequestStatus::New,
        RequestStatus::Cancelled,
        &[ActorRole::Applicant, ActorRole::Admin],
    ),
    (
        RequestStatus::Assigned,
        RequestStatus::InProgress,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::Assigned,
        RequestStatus::Cancelled,
        &[ActorRole::Applicant, ActorRole::Admin],
    ),
    (
        RequestStatus::InProgress,
        RequestStatus::MaterialsRequested,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::InProgress,
        RequestStatus::WaitingPayment,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::InProgress,
        RequestStatus::Completed,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::InProgress,
        RequestStatus::Cancelled,
        &[ActorRole::Applicant, ActorRole::Admin],
    ),
    (
        RequestStatus::MaterialsRequested,
        RequestStatus::MaterialsDelivered,
        &[ActorRole::Executor, ActorRole::Admin, ActorRole::System],
    ),
    (
        RequestStatus::MaterialsDelivered,
        RequestStatus::WaitingPayment,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::MaterialsDelivered,
        RequestStatus::Completed,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
    (
        RequestStatus::WaitingPayment,
        RequestStatus::Completed,
        &[ActorRole::Executor, ActorRole::Admin],
    ),
];

fn allowed_roles(from: RequestStatus, to: RequestStatus) -> Option<&'static [ActorRole]> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, roles)| *roles)
}

/// Drives legal transitions of a [`Request`], serialized per request via an
/// optimistic version compare. Holds no state of its own beyond its event
/// listeners — the request row itself is the state, owned by the caller
/// (typically loaded from, and written back to, the relational store inside
/// one transaction).
pub struct RequestStateMachine {
    event_listeners: EventListeners<RequestEvent>,
}

impl RequestStateMachine {
    pub fn new() -> Self {
        Self {
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: dispatch_core::events::EventListener<RequestEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    /// Whether `(from, to)` appears in the transition table at all,
    /// independent of actor permission. Useful for handlers that want to
    /// distinguish "not a legal transition" from "forbidden for this actor"
    /// before calling [`Self::transition`].
    pub fn is_legal(from: RequestStatus, to: RequestStatus) -> bool {
        allowed_roles(from, to).is_some()
    }

    /// Rating and media attachments are only permitted once a request has
    /// reached `Completed`; re-opening is not modeled, so this is simply an
    /// equality check, not a "has ever been completed" history query.
    pub fn can_attach_media(request: &Request) -> bool {
        request.status == RequestStatus::Completed
    }

    /// Attempts `request.status -> to`.
    ///
    /// `expected_version` must match `request.version`: a concurrent
    /// transition that already bumped the version loses this caller a race,
    /// surfaced as [`TransitionError::Stale`] rather than silently
    /// overwriting the winner's change. On success, mutates `request` in
    /// place, bumps its version, and returns the journal entry the caller
    /// must persist in the same transaction as the row update.
    pub fn transition(
        &self,
        request: &mut Request,
        expected_version: u64,
        to: RequestStatus,
        actor_id: impl Into<String>,
        actor_role: ActorRole,
        comment_text: impl Into<String>,
    ) -> Result<RequestComment, TransitionError> {
        if request.version != expected_version {
            #[cfg(feature = "tracing")]
            warn!(
                request_number = %request.request_number,
                expected_version,
                actual_version = request.version,
                "stale state transition rejected"
            );

            self.event_listeners.emit(&RequestEvent::StaleTransitionRejected {
                request_number: request.request_number.clone(),
                timestamp: Instant::now(),
            });

            return Err(TransitionError::Stale {
                expected: expected_version,
                actual: request.version,
            });
        }

        let from = request.status;
        let roles = allowed_roles(from, to).ok_or_else(|| TransitionError::Illegal {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })?;

        if !roles.contains(&actor_role) {
            return Err(TransitionError::Forbidden {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        let actor_id = actor_id.into();
        let now = Utc::now();

        request.status = to;
        request.updated_at = now;
        request.version += 1;
        if to == RequestStatus::Completed && request.work_completed_at.is_none() {
            request.work_completed_at = Some(now);
        }

        #[cfg(feature = "tracing")]
        debug!(request_number = %request.request_number, %from, %to, "request status changed");

        #[cfg(feature = "metrics")]
        metrics::counter!(
            "dispatch_requests_transitions_total",
            "from" => from.as_str(),
            "to" => to.as_str()
        )
        .increment(1);

        self.event_listeners.emit(&RequestEvent::StatusChanged {
            request_number: request.request_number.clone(),
            timestamp: Instant::now(),
            from,
            to,
        });

        Ok(RequestComment {
            request_number: request.request_number.clone(),
            author_id: actor_id,
            text: comment_text.into(),
            old_status: Some(from),
            new_status: Some(to),
            is_status_change: true,
            media_refs: Vec::new(),
            is_internal: true,
            created_at: now,
            deleted: false,
        })
    }
}

impl Default for RequestStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
