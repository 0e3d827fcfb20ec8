//! Dialog lifecycle state machine
//!
//! `Closed → Opening → Open → Closing → Closed`, expressed as a pure transition
//! from `(state, event)` to `(state, effects)`. Callers interpret the effects
//! against whatever surface they drive; nothing here touches a surface, a timer
//! or a channel.

use super::animation::Animation;
use super::request::Outcome;

/// Lifecycle phase of a dialog surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    /// Entry animation applied, surface visible and interactive
    Opening,
    Open,
    /// Exit animation playing, waiting for completion
    Closing,
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A show-operation populated the surface
    Show { entry: Animation },
    /// The opening transition settled
    Settled,
    /// A terminal user action (confirm, cancel, submit, button, list item)
    Terminal { outcome: Outcome, exit: Animation },
    /// Platform dismissal such as the escape key
    Dismiss,
    /// The exit animation completed
    ExitFinished,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any animation classes with this animation
    ApplyAnimation(Animation),
    /// Add the closing marker class
    MarkClosing,
    /// Remove animation classes and the closing marker
    ClearAnimation,
    ShowModal,
    HideModal,
    /// Swallow a platform dismissal; the dialog stays as it is
    SuppressDismiss,
    /// Start waiting for the exit animation according to the wait strategy
    AwaitExit,
    /// Deliver the result to the pending request
    Resolve(Outcome),
}

/// State of one dialog surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
    animation: Option<Animation>,
    pending: Option<Outcome>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Exactly one of open/closed holds; opening and closing count as open
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_closing(&self) -> bool {
        self.phase == Phase::Closing
    }

    /// Whether a terminal action would be accepted right now
    pub fn accepts_actions(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Open)
    }

    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    /// Outcome waiting for the exit animation to finish
    pub fn pending_outcome(&self) -> Option<&Outcome> {
        self.pending.as_ref()
    }

    /// Animation classes derived from the current state
    pub fn animation_class(&self) -> String {
        self.animation
            .map(Animation::class_list)
            .unwrap_or_default()
    }

    /// Pure transition function
    pub fn transition(&self, event: LifecycleEvent) -> (Lifecycle, Vec<Effect>) {
        match (self.phase, event) {
            (Phase::Closed, LifecycleEvent::Show { entry }) => (
                Lifecycle {
                    phase: Phase::Opening,
                    animation: Some(entry),
                    pending: None,
                },
                vec![Effect::ApplyAnimation(entry), Effect::ShowModal],
            ),
            (Phase::Opening, LifecycleEvent::Settled) => (
                Lifecycle {
                    phase: Phase::Open,
                    ..self.clone()
                },
                Vec::new(),
            ),
            (Phase::Opening | Phase::Open, LifecycleEvent::Terminal { outcome, exit }) => (
                Lifecycle {
                    phase: Phase::Closing,
                    animation: Some(exit),
                    pending: Some(outcome),
                },
                vec![
                    Effect::ApplyAnimation(exit),
                    Effect::MarkClosing,
                    Effect::AwaitExit,
                ],
            ),
            (Phase::Closing, LifecycleEvent::ExitFinished) => {
                let mut effects = vec![Effect::ClearAnimation, Effect::HideModal];
                if let Some(outcome) = self.pending.clone() {
                    effects.push(Effect::Resolve(outcome));
                }
                (Lifecycle::default(), effects)
            }
            (_, LifecycleEvent::Dismiss) => (self.clone(), vec![Effect::SuppressDismiss]),
            _ => (self.clone(), Vec::new()),
        }
    }

    /// Apply `event` in place and return the effects
    pub fn step(&mut self, event: LifecycleEvent) -> Vec<Effect> {
        let (next, effects) = self.transition(event);
        *self = next;
        effects
    }
}
