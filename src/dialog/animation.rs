//! Entry/exit animation vocabulary
//!
//! Animations are expressed as named classes in the animate.css convention
//! (`animate__animated animate__zoomIn`). A dialog surface carries the classes,
//! the presentation decides how to play them and reports completion.

use super::types::{DialogError, DialogRole};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Class every animated surface carries while an animation is applied
pub const ANIMATED_CLASS: &str = "animate__animated";

/// Class marking a surface that is playing its exit animation
pub const CLOSING_CLASS: &str = "dialog-closing";

const CLASS_PREFIX: &str = "animate__";

/// Named entry and exit animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    FadeIn,
    FadeOut,
    FadeInDown,
    FadeOutUp,
    ZoomIn,
    ZoomOut,
}

impl Animation {
    pub fn name(self) -> &'static str {
        match self {
            Animation::FadeIn => "fadeIn",
            Animation::FadeOut => "fadeOut",
            Animation::FadeInDown => "fadeInDown",
            Animation::FadeOutUp => "fadeOutUp",
            Animation::ZoomIn => "zoomIn",
            Animation::ZoomOut => "zoomOut",
        }
    }

    /// The class naming this animation, e.g. `animate__zoomIn`
    pub fn class(self) -> String {
        format!("{}{}", CLASS_PREFIX, self.name())
    }

    /// Full class string applied to the surface, e.g. `animate__animated animate__zoomIn`
    pub fn class_list(self) -> String {
        format!("{} {}", ANIMATED_CLASS, self.class())
    }

    pub fn is_entrance(self) -> bool {
        matches!(
            self,
            Animation::FadeIn | Animation::FadeInDown | Animation::ZoomIn
        )
    }

    /// Whether `class` belongs to the animation vocabulary (including the marker class)
    pub fn is_animation_class(class: &str) -> bool {
        class.starts_with(CLASS_PREFIX)
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry and exit animation of one dialog role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnimationPair {
    pub entry: Animation,
    pub exit: Animation,
}

impl AnimationPair {
    pub const fn new(entry: Animation, exit: Animation) -> Self {
        Self { entry, exit }
    }
}

impl Default for AnimationPair {
    fn default() -> Self {
        Self::new(Animation::ZoomIn, Animation::ZoomOut)
    }
}

/// Animations for every role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnimationSet {
    pub alert: AnimationPair,
    pub confirm: AnimationPair,
    pub prompt: AnimationPair,
    pub custom: AnimationPair,
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self {
            alert: AnimationPair::new(Animation::FadeInDown, Animation::FadeOutUp),
            confirm: AnimationPair::new(Animation::ZoomIn, Animation::ZoomOut),
            prompt: AnimationPair::new(Animation::FadeInDown, Animation::FadeOutUp),
            custom: AnimationPair::new(Animation::FadeIn, Animation::FadeOut),
        }
    }
}

impl AnimationSet {
    pub fn for_role(&self, role: DialogRole) -> AnimationPair {
        match role {
            DialogRole::Alert => self.alert,
            DialogRole::Confirm => self.confirm,
            DialogRole::Prompt => self.prompt,
            DialogRole::Custom => self.custom,
        }
    }
}

/// How a closing dialog learns that its exit animation has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WaitStrategy {
    /// Wait for the presentation to report the end of the animation
    AnimationEnd,
    /// Wait a fixed time after the exit animation starts
    Timeout { millis: u64 },
    /// Finish closing as soon as the exit animation is applied
    Immediate,
}

impl WaitStrategy {
    /// `None` when the duration does not fit in milliseconds as `u64`
    pub fn timeout(duration: Duration) -> Option<Self> {
        u64::try_from(duration.as_millis())
            .ok()
            .map(|millis| WaitStrategy::Timeout { millis })
    }
}

impl fmt::Display for WaitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitStrategy::AnimationEnd => f.write_str("animation-end"),
            WaitStrategy::Timeout { millis } => write!(f, "timeout:{}ms", millis),
            WaitStrategy::Immediate => f.write_str("immediate"),
        }
    }
}

impl FromStr for WaitStrategy {
    type Err = DialogError;

    /// Accepts `animation-end`, `immediate`, `timeout:<duration>` or a bare duration
    /// such as `300ms`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "animation-end" | "animationend" | "event" => return Ok(WaitStrategy::AnimationEnd),
            "immediate" | "none" => return Ok(WaitStrategy::Immediate),
            _ => {}
        }

        let duration = value.strip_prefix("timeout:").unwrap_or(value).trim();
        humantime::parse_duration(duration)
            .ok()
            .and_then(WaitStrategy::timeout)
            .ok_or_else(|| DialogError::InvalidWaitStrategy(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_classes() {
        assert_eq!(Animation::ZoomIn.class(), "animate__zoomIn");
        assert_eq!(
            Animation::FadeOutUp.class_list(),
            "animate__animated animate__fadeOutUp"
        );
        assert!(Animation::is_animation_class(ANIMATED_CLASS));
        assert!(!Animation::is_animation_class(CLOSING_CLASS));
    }

    #[test]
    fn test_default_animation_set() {
        let set = AnimationSet::default();
        assert_eq!(set.for_role(DialogRole::Alert).entry, Animation::FadeInDown);
        assert_eq!(set.for_role(DialogRole::Confirm).exit, Animation::ZoomOut);
        assert_eq!(set.for_role(DialogRole::Custom).entry, Animation::FadeIn);
        assert!(set.for_role(DialogRole::Prompt).entry.is_entrance());
        assert!(!set.for_role(DialogRole::Prompt).exit.is_entrance());
    }

    #[test]
    fn test_wait_strategy_parsing() {
        assert_eq!(
            "animation-end".parse::<WaitStrategy>().unwrap(),
            WaitStrategy::AnimationEnd
        );
        assert_eq!("immediate".parse::<WaitStrategy>().unwrap(), WaitStrategy::Immediate);
        assert_eq!(
            "timeout:300ms".parse::<WaitStrategy>().unwrap(),
            WaitStrategy::Timeout { millis: 300 }
        );
        assert_eq!(
            "1s".parse::<WaitStrategy>().unwrap(),
            WaitStrategy::Timeout { millis: 1000 }
        );
        assert!("soon".parse::<WaitStrategy>().is_err());
    }

    #[test]
    fn test_wait_strategy_timeout_overflow() {
        assert_eq!(WaitStrategy::timeout(Duration::MAX), None);
        assert_eq!(
            WaitStrategy::timeout(Duration::from_secs(2)),
            Some(WaitStrategy::Timeout { millis: 2000 })
        );
        assert_eq!(
            "timeout:5000000000years".parse::<WaitStrategy>(),
            Err(DialogError::InvalidWaitStrategy(
                "timeout:5000000000years".to_string()
            ))
        );
    }

    #[test]
    fn test_wait_strategy_round_trips_through_display() {
        let strategy = WaitStrategy::Timeout { millis: 250 };
        assert_eq!(strategy.to_string().parse::<WaitStrategy>().unwrap(), strategy);
    }

    #[test]
    fn test_wait_strategy_json_shape() {
        let json = serde_json::to_string(&WaitStrategy::Timeout { millis: 300 }).unwrap();
        assert_eq!(json, r#"{"kind":"timeout","millis":300}"#);
        let parsed: WaitStrategy = serde_json::from_str(r#"{"kind":"animation-end"}"#).unwrap();
        assert_eq!(parsed, WaitStrategy::AnimationEnd);
    }
}
