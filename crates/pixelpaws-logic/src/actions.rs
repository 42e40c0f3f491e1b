//! Care actions: the fixed vocabulary the owner can perform.
//!
//! Each action adds a fixed (hunger, happiness) delta and, except for
//! treats, ticks one box on the recovery checklist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A care action performed on the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Feed,
    Treat,
    Fetch,
    Pet,
    Brush,
    Toy,
}

/// Vital deltas for a single action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEffect {
    pub hunger_delta: f32,
    pub happiness_delta: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}' (expected one of feed, treat, fetch, pet, brush, toy)")]
pub struct UnknownAction(pub String);

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Feed,
        ActionKind::Treat,
        ActionKind::Fetch,
        ActionKind::Pet,
        ActionKind::Brush,
        ActionKind::Toy,
    ];

    /// Wire name, as used by the action buttons.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Feed => "feed",
            ActionKind::Treat => "treat",
            ActionKind::Fetch => "fetch",
            ActionKind::Pet => "pet",
            ActionKind::Brush => "brush",
            ActionKind::Toy => "toy",
        }
    }

    /// Human-readable name for recovery checklists.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Feed => "Feed",
            ActionKind::Treat => "Give Treat",
            ActionKind::Fetch => "Play Fetch",
            ActionKind::Pet => "Pet",
            ActionKind::Brush => "Brush",
            ActionKind::Toy => "Give Toy",
        }
    }

    pub fn effect(self) -> ActionEffect {
        let (hunger_delta, happiness_delta) = match self {
            ActionKind::Feed => (10.0, 0.0),
            ActionKind::Treat => (1.0, 0.0),
            ActionKind::Fetch => (0.0, 10.0),
            ActionKind::Pet => (0.0, 5.0),
            ActionKind::Brush => (0.0, 1.0),
            ActionKind::Toy => (0.0, 5.0),
        };
        ActionEffect {
            hunger_delta,
            happiness_delta,
        }
    }

    /// Whether this action counts toward recovery.
    pub fn is_recovery_action(self) -> bool {
        !matches!(self, ActionKind::Treat)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(ActionKind::Feed),
            "treat" => Ok(ActionKind::Treat),
            "fetch" | "play" => Ok(ActionKind::Fetch),
            "pet" => Ok(ActionKind::Pet),
            "brush" => Ok(ActionKind::Brush),
            "toy" | "toy-time" => Ok(ActionKind::Toy),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>(), Ok(kind));
        }
        assert_eq!("  FEED ".parse::<ActionKind>(), Ok(ActionKind::Feed));
        assert_eq!("toy-time".parse::<ActionKind>(), Ok(ActionKind::Toy));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = "dance".parse::<ActionKind>().unwrap_err();
        assert_eq!(err, UnknownAction("dance".into()));
        assert!(err.to_string().contains("dance"));
    }

    #[test]
    fn test_effects_are_non_negative() {
        for kind in ActionKind::ALL {
            let e = kind.effect();
            assert!(e.hunger_delta >= 0.0);
            assert!(e.happiness_delta >= 0.0);
            assert!(e.hunger_delta + e.happiness_delta > 0.0);
        }
    }

    #[test]
    fn test_feed_and_fetch_are_the_big_ones() {
        assert_eq!(ActionKind::Feed.effect().hunger_delta, 10.0);
        assert_eq!(ActionKind::Fetch.effect().happiness_delta, 10.0);
        assert!(!ActionKind::Treat.is_recovery_action());
        assert!(ActionKind::Toy.is_recovery_action());
    }
}
