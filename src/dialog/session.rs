//! Per-surface driver around the lifecycle state machine
//!
//! A session owns the lifecycle state of one surface, the request currently
//! waiting on it, and the two timers a dialog may need (timed exit wait and
//! delayed input focus). It consumes the engine-level effects itself and hands
//! the surface-level ones back to the caller.

use super::animation::{Animation, WaitStrategy};
use super::lifecycle::{Effect, Lifecycle, LifecycleEvent, Phase};
use super::request::{DialogRequest, Outcome};
use super::types::DialogRole;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[derive(Debug)]
pub(crate) struct Session {
    role: DialogRole,
    lifecycle: Lifecycle,
    request: Option<DialogRequest>,
    wait: WaitStrategy,
    /// Strategy adopted by the next `open`
    next_wait: WaitStrategy,
    exit_deadline: Option<Instant>,
    focus_deadline: Option<Instant>,
}

/// Timers that fired during a `poll_timers` call
#[derive(Debug, Default)]
pub(crate) struct FiredTimers {
    pub effects: Vec<Effect>,
    pub focus: bool,
}

impl Session {
    pub fn new(role: DialogRole, wait: WaitStrategy) -> Self {
        Self {
            role,
            lifecycle: Lifecycle::new(),
            request: None,
            wait,
            next_wait: wait,
            exit_deadline: None,
            focus_deadline: None,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// A surface is busy while it is visible or still owes a result
    pub fn is_busy(&self) -> bool {
        self.lifecycle.is_open() || self.request.is_some()
    }

    pub fn accepts_actions(&self) -> bool {
        self.lifecycle.accepts_actions()
    }

    /// Applies from the next `open`; a dialog already showing keeps the
    /// strategy it was opened with so its exit wait still completes
    pub fn set_wait_strategy(&mut self, wait: WaitStrategy) {
        self.next_wait = wait;
        if !self.is_busy() {
            self.wait = wait;
        }
    }

    /// Start showing `request`; the opening transition settles immediately
    pub fn open(&mut self, request: DialogRequest, entry: Animation) -> Vec<Effect> {
        debug!(role = %self.role, request = %request.id(), %entry, "opening dialog");
        self.request = Some(request);
        self.wait = self.next_wait;
        let mut effects = self.drive(LifecycleEvent::Show { entry }, Instant::now());
        effects.extend(self.drive(LifecycleEvent::Settled, Instant::now()));
        effects
    }

    /// Terminal user action; ignored unless the dialog is accepting actions
    pub fn close(&mut self, outcome: Outcome, exit: Animation, now: Instant) -> Vec<Effect> {
        if !self.accepts_actions() {
            trace!(role = %self.role, phase = ?self.phase(), "ignoring terminal action");
            return Vec::new();
        }
        debug!(role = %self.role, %exit, ?outcome, "closing dialog");
        self.focus_deadline = None;
        self.drive(LifecycleEvent::Terminal { outcome, exit }, now)
    }

    /// The exit animation reported completion
    pub fn exit_finished(&mut self, now: Instant) -> Vec<Effect> {
        self.drive(LifecycleEvent::ExitFinished, now)
    }

    /// Animation-end notification from the surface; only honoured when that is
    /// the configured wait strategy
    pub fn animation_ended(&mut self, now: Instant) -> Vec<Effect> {
        if self.wait != WaitStrategy::AnimationEnd {
            trace!(role = %self.role, wait = %self.wait, "ignoring animation end");
            return Vec::new();
        }
        self.exit_finished(now)
    }

    pub fn dismiss(&mut self) -> Vec<Effect> {
        self.drive(LifecycleEvent::Dismiss, Instant::now())
    }

    /// Ask for input focus at `at`, or right away when the delay is zero
    pub fn schedule_focus(&mut self, delay: Duration, now: Instant) -> bool {
        if delay.is_zero() {
            self.focus_deadline = None;
            return true;
        }
        self.focus_deadline = Some(now + delay);
        false
    }

    /// Fire every timer due at `now`
    pub fn poll_timers(&mut self, now: Instant) -> FiredTimers {
        let mut fired = FiredTimers::default();

        if self.focus_deadline.is_some_and(|at| at <= now) {
            self.focus_deadline = None;
            fired.focus = self.accepts_actions();
        }

        if self.exit_deadline.is_some_and(|at| at <= now) {
            self.exit_deadline = None;
            fired.effects = self.exit_finished(now);
        }

        fired
    }

    /// Earliest pending timer, for event loops that sleep until it
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.exit_deadline, self.focus_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn drive(&mut self, event: LifecycleEvent, now: Instant) -> Vec<Effect> {
        let mut surface = Vec::new();

        for effect in self.lifecycle.step(event) {
            match effect {
                Effect::AwaitExit => match self.wait {
                    WaitStrategy::AnimationEnd => {}
                    WaitStrategy::Timeout { millis } => {
                        self.exit_deadline = Some(now + Duration::from_millis(millis));
                    }
                    WaitStrategy::Immediate => {
                        surface.extend(self.drive(LifecycleEvent::ExitFinished, now));
                    }
                },
                Effect::Resolve(outcome) => {
                    self.exit_deadline = None;
                    self.focus_deadline = None;
                    if let Some(request) = self.request.take() {
                        request.resolve(outcome);
                    }
                }
                Effect::SuppressDismiss => {
                    trace!(role = %self.role, "suppressed platform dismissal");
                    surface.push(Effect::SuppressDismiss);
                }
                other => surface.push(other),
            }
        }

        surface
    }
}
