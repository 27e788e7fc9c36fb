//! Growth milestones.
//!
//! Each milestone appends a message to the change log the first time
//! growth reaches it; two of them also change the page theme once.

use eon_types::GrowthLevel;

/// A one-time visual change fired by a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEffect {
    /// Shift the background and logo gradients.
    AdaptiveColors,
    /// Release a burst of celebration particles.
    Celebration,
}

/// A growth percentage with its change log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Level at which the milestone is reached.
    pub level: GrowthLevel,
    /// Message appended to the change log.
    pub message: &'static str,
    /// Optional one-time theme effect.
    pub effect: Option<ThemeEffect>,
}

/// All milestones in ascending order.
pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        level: GrowthLevel::new(20),
        message: "Canvas ecosystem expanding with user interactions",
        effect: None,
    },
    Milestone {
        level: GrowthLevel::new(40),
        message: "Adaptive color system activated",
        effect: Some(ThemeEffect::AdaptiveColors),
    },
    Milestone {
        level: GrowthLevel::new(60),
        message: "New interactive elements discovered",
        effect: None,
    },
    Milestone {
        level: GrowthLevel::new(80),
        message: "Platform intelligence evolving",
        effect: None,
    },
    Milestone {
        level: GrowthLevel::MAX,
        message: "Full ecosystem maturity achieved \u{2013} v1.1.0",
        effect: Some(ThemeEffect::Celebration),
    },
];

/// The lowest milestone at or below `level` that `is_logged` has not seen.
///
/// At most one milestone is returned per call, so a jump across several
/// levels logs them one growth event at a time.
pub fn first_unlogged(
    level: GrowthLevel,
    is_logged: impl Fn(&Milestone) -> bool,
) -> Option<&'static Milestone> {
    MILESTONES
        .iter()
        .find(|m| m.level <= level && !is_logged(m))
}

/// Milestones strictly above `previous` and at or below `current`.
pub fn crossed(
    previous: GrowthLevel,
    current: GrowthLevel,
) -> impl Iterator<Item = &'static Milestone> {
    MILESTONES
        .iter()
        .filter(move |m| m.level > previous && m.level <= current)
}
