//! Local interaction counting, growth estimate, and milestone log.
//!
//! The recorder gives immediate feedback before the service answers: it
//! estimates growth from its own count with the shared [`GrowthCurve`],
//! logs the first unlogged milestone each time the estimate rises, and
//! tells the caller which theme effect, if any, to fire.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use eon_core::milestone::first_unlogged;
use eon_core::{ChangeLog, GrowthCurve, Milestone, ThemeEffect};
use eon_types::GrowthLevel;

/// What the host should do after one recorded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    /// Local count after this interaction.
    pub count: u64,
    /// Spawn a particle at the interaction position.
    pub spawn_particle: bool,
    /// The displayed growth level changed.
    pub growth_changed: bool,
    /// Milestone logged by this interaction.
    pub milestone: Option<&'static Milestone>,
}

impl Recorded {
    /// Theme effect of the milestone logged by this interaction.
    pub fn effect(&self) -> Option<ThemeEffect> {
        self.milestone.and_then(|m| m.effect)
    }
}

/// Client-side interaction counter.
#[derive(Debug, Clone)]
pub struct InteractionRecorder {
    curve: GrowthCurve,
    particle_every: u64,
    count: u64,
    growth: GrowthLevel,
    logged: BTreeSet<GrowthLevel>,
    changes: ChangeLog,
}

impl InteractionRecorder {
    /// A recorder at zero with the seeded change log.
    pub fn new(curve: GrowthCurve, particle_every: u64, now: DateTime<Utc>) -> Self {
        Self {
            curve,
            particle_every: particle_every.max(1),
            count: 0,
            growth: GrowthLevel::ZERO,
            logged: BTreeSet::new(),
            changes: ChangeLog::seeded(now),
        }
    }

    /// Count one interaction at time `now`.
    pub fn record(&mut self, now: DateTime<Utc>) -> Recorded {
        self.count = self.count.saturating_add(1);
        let spawn_particle = self.count.checked_rem(self.particle_every) == Some(0);

        let estimate = self.curve.level_for(self.count);
        let mut milestone = None;
        let growth_changed = estimate > self.growth;
        if growth_changed {
            self.growth = estimate;
            milestone = self.log_next_milestone(now);
        }

        tracing::trace!(count = self.count, growth = self.growth.value(), "Interaction recorded");
        Recorded {
            count: self.count,
            spawn_particle,
            growth_changed,
            milestone,
        }
    }

    /// Overwrite the displayed level with the service's value.
    ///
    /// Returns whether the displayed value changed.
    pub fn reconcile(&mut self, server: GrowthLevel) -> bool {
        if server == self.growth {
            return false;
        }
        tracing::debug!(
            local = self.growth.value(),
            server = server.value(),
            "Growth reconciled with service"
        );
        self.growth = server;
        true
    }

    /// Interactions counted locally.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Displayed growth level.
    pub const fn growth(&self) -> GrowthLevel {
        self.growth
    }

    /// Recent changes, newest first.
    pub const fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    fn log_next_milestone(&mut self, now: DateTime<Utc>) -> Option<&'static Milestone> {
        let milestone = first_unlogged(self.growth, |m| self.logged.contains(&m.level))?;
        self.logged.insert(milestone.level);
        self.changes.push(milestone.message, now);
        tracing::info!(level = milestone.level.value(), message = milestone.message, "Milestone reached");
        Some(milestone)
    }
}
