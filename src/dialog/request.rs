//! Per-invocation dialog requests
//!
//! Every show-operation creates a [`DialogRequest`] that owns the sending half of
//! a oneshot channel and hands the caller a [`PendingDialog`] future. Resolving
//! consumes the request, so a request resolves at most once.

use super::types::{DialogError, DialogResult, DialogRole};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for a single show-operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value a dialog resolves with, before it is narrowed to the operation's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Alert acknowledged
    Acknowledged,
    /// Confirm answered
    Confirmed(bool),
    /// Prompt or custom dialog: a value, or `None` when cancelled
    Value(Option<String>),
}

/// Narrowing of an [`Outcome`] to the result type of one operation
pub trait FromOutcome: Sized {
    const EXPECTED: &'static str;

    fn from_outcome(outcome: Outcome) -> Option<Self>;
}

impl FromOutcome for () {
    const EXPECTED: &'static str = "acknowledgement";

    fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Acknowledged => Some(()),
            _ => None,
        }
    }
}

impl FromOutcome for bool {
    const EXPECTED: &'static str = "confirmation";

    fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Confirmed(answer) => Some(answer),
            _ => None,
        }
    }
}

impl FromOutcome for Option<String> {
    const EXPECTED: &'static str = "value";

    fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// The in-flight half of a show-operation, owned by the dialog surface
#[derive(Debug)]
pub struct DialogRequest {
    id: RequestId,
    role: DialogRole,
    responder: oneshot::Sender<Outcome>,
}

impl DialogRequest {
    /// Create a request and the future the caller awaits
    pub fn open<T: FromOutcome>(role: DialogRole) -> (Self, PendingDialog<T>) {
        let (responder, receiver) = oneshot::channel();
        let id = RequestId::new();
        let request = Self {
            id,
            role,
            responder,
        };
        let pending = PendingDialog {
            id,
            role,
            receiver,
            _result: PhantomData,
        };
        (request, pending)
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn role(&self) -> DialogRole {
        self.role
    }

    /// Deliver the outcome. Returns `false` if the caller stopped waiting.
    pub fn resolve(self, outcome: Outcome) -> bool {
        debug!(role = %self.role, request = %self.id, ?outcome, "resolving dialog request");
        let delivered = self.responder.send(outcome).is_ok();
        if !delivered {
            debug!(role = %self.role, request = %self.id, "dialog result discarded, caller went away");
        }
        delivered
    }
}

/// Future resolving with the result of one show-operation
#[must_use = "a pending dialog does nothing unless awaited or polled"]
pub struct PendingDialog<T> {
    id: RequestId,
    role: DialogRole,
    receiver: oneshot::Receiver<Outcome>,
    _result: PhantomData<fn() -> T>,
}

impl<T: FromOutcome> PendingDialog<T> {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn role(&self) -> DialogRole {
        self.role
    }

    /// Non-blocking check, for event loops that cannot await.
    ///
    /// Returns `None` while the user has not answered yet.
    pub fn try_result(&mut self) -> Option<DialogResult<T>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(self.narrow(outcome)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(DialogError::Abandoned(self.role))),
        }
    }

    fn narrow(&self, outcome: Outcome) -> DialogResult<T> {
        T::from_outcome(outcome).ok_or(DialogError::OutcomeMismatch {
            role: self.role,
            expected: T::EXPECTED,
        })
    }
}

impl<T: FromOutcome> Future for PendingDialog<T> {
    type Output = DialogResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(self.narrow(outcome)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(DialogError::Abandoned(self.role))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for PendingDialog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDialog")
            .field("id", &self.id)
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_resolves_pending_dialog() {
        let (request, pending) = DialogRequest::open::<bool>(DialogRole::Confirm);
        assert_eq!(request.id(), pending.id());

        assert!(request.resolve(Outcome::Confirmed(true)));
        assert_eq!(pending.await, Ok(true));
    }

    #[tokio::test]
    async fn test_dropped_request_abandons_pending_dialog() {
        let (request, pending) = DialogRequest::open::<Option<String>>(DialogRole::Prompt);
        drop(request);
        assert_eq!(pending.await, Err(DialogError::Abandoned(DialogRole::Prompt)));
    }

    #[test]
    fn test_try_result_before_and_after_resolution() {
        let (request, mut pending) = DialogRequest::open::<Option<String>>(DialogRole::Custom);
        assert_eq!(pending.try_result(), None);

        request.resolve(Outcome::Value(None));
        assert_eq!(pending.try_result(), Some(Ok(None)));
    }

    #[test]
    fn test_mismatched_outcome_is_reported() {
        let (request, mut pending) = DialogRequest::open::<()>(DialogRole::Alert);
        request.resolve(Outcome::Confirmed(false));
        assert_eq!(
            pending.try_result(),
            Some(Err(DialogError::OutcomeMismatch {
                role: DialogRole::Alert,
                expected: "acknowledgement",
            }))
        );
    }

    #[test]
    fn test_resolving_after_caller_left_reports_undelivered() {
        let (request, pending) = DialogRequest::open::<()>(DialogRole::Alert);
        drop(pending);
        assert!(!request.resolve(Outcome::Acknowledged));
    }
}
