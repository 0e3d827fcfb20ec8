//! Dialog lifecycle core shared by the imperative controller and the reactive store
//!
//! Both front ends drive the same `Closed → Opening → Open → Closing → Closed`
//! machine and resolve the same per-invocation request futures; they differ
//! only in how state reaches the screen.

pub mod animation;
pub mod lifecycle;
pub mod request;
pub(crate) mod session;
pub mod types;

pub use animation::{Animation, AnimationPair, AnimationSet, WaitStrategy, ANIMATED_CLASS, CLOSING_CLASS};
pub use lifecycle::{Effect, Lifecycle, LifecycleEvent, Phase};
pub use request::{DialogRequest, FromOutcome, Outcome, PendingDialog, RequestId};
pub use types::*;
