//! Frame driver tying the recorder, the canvas, and the reporter together.
//!
//! The host feeds [`HostEvent`]s as they happen and calls
//! [`LivingPlatform::frame`] from its redraw callback. Everything runs on
//! the host's thread except report delivery, whose outcomes are applied
//! at the start of the next frame.

use std::time::Duration;

use chrono::Utc;
use eon_canvas::{Canvas, CursorConfig, CursorFollower, FieldConfig, ParticleField};
use eon_core::{ChangeLog, ThemeEffect};
use eon_types::{GrowthLevel, Interaction, Point, RecordInteractionRequest, SessionId};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::recorder::{InteractionRecorder, Recorded};
use crate::reporter::{OutcomeReceiver, ReportOutcome, Reporter};
use crate::session::{self, LocalStorage};
use crate::theme::Theme;

/// Input forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved. Recorded as `move`.
    PointerMoved(Point),
    /// Pointer clicked. Recorded as `click`.
    Click(Point),
    /// Document scrolled to an offset. Recorded as `scroll`.
    Scrolled(Point),
    /// Key pressed. Recorded as `keypress`.
    KeyPressed,
    /// Pointer entered an interactive element. Recorded as `hover`.
    HoverEntered(Point),
    /// Pointer left an interactive element. Not recorded.
    HoverLeft,
    /// Viewport resized. Not recorded.
    Resized {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
}

impl HostEvent {
    /// The interaction this event records, if any.
    pub const fn interaction(self) -> Option<Interaction> {
        match self {
            Self::PointerMoved(p) => Some(Interaction::Move(p)),
            Self::Click(p) => Some(Interaction::Click(p)),
            Self::Scrolled(offset) => Some(Interaction::Scroll { offset }),
            Self::KeyPressed => Some(Interaction::Keypress),
            Self::HoverEntered(p) => Some(Interaction::Hover(p)),
            Self::HoverLeft | Self::Resized { .. } => None,
        }
    }
}

/// The client half of the living platform.
pub struct LivingPlatform {
    session_id: SessionId,
    recorder: InteractionRecorder,
    reporter: Reporter,
    outcomes: OutcomeReceiver,
    field: ParticleField,
    cursor: CursorFollower,
    theme: Theme,
    rng: StdRng,
}

impl LivingPlatform {
    /// Assemble a platform from its parts.
    pub fn new(
        session_id: SessionId,
        config: &ClientConfig,
        reporter: (Reporter, OutcomeReceiver),
        width: f64,
        height: f64,
    ) -> Self {
        let (reporter, outcomes) = reporter;
        Self {
            session_id,
            recorder: InteractionRecorder::new(config.growth, config.particle_every, Utc::now()),
            reporter,
            outcomes,
            field: ParticleField::new(FieldConfig::default(), width, height),
            cursor: CursorFollower::new(CursorConfig::default()),
            theme: Theme::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Open storage, load or create the session, and build the reporter
    /// described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the configuration is invalid, the
    /// storage cannot be read or written, or the HTTP client cannot be
    /// built.
    pub fn connect(config: &ClientConfig, width: f64, height: f64) -> Result<Self, ClientError> {
        config.validate()?;
        let mut storage = LocalStorage::open_optional(config.storage_path.as_deref())?;
        let mut rng = StdRng::from_os_rng();
        let session_id = session::load_or_create(&mut storage, &mut rng, Utc::now())?;

        let reporter = match &config.api_base_url {
            Some(url) => Reporter::http(url, config.request_timeout())?,
            None => Reporter::disabled(),
        };
        tracing::info!(
            session_id = %session_id,
            reporter = reporter.0.name(),
            "Living platform initialized"
        );
        Ok(Self::new(session_id, config, reporter, width, height))
    }

    /// Use a seeded random source for particle spawns.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Feed one host event observed at host time `now`.
    ///
    /// Returns the recorder outcome if the event was recorded.
    pub fn handle(&mut self, event: HostEvent, now: Duration) -> Option<Recorded> {
        match event {
            HostEvent::PointerMoved(p) => {
                self.cursor.pointer_moved(p);
                self.field.set_pointer(p);
            }
            HostEvent::HoverEntered(_) => self.cursor.pointer_entered(),
            HostEvent::HoverLeft => self.cursor.pointer_left(),
            HostEvent::Resized { width, height } => self.field.resize(width, height),
            HostEvent::Click(_) | HostEvent::Scrolled(_) | HostEvent::KeyPressed => {}
        }
        event.interaction().map(|i| self.record(i, now))
    }

    /// Record one interaction: count it, give local feedback, and report it.
    pub fn record(&mut self, interaction: Interaction, now: Duration) -> Recorded {
        let recorded = self.recorder.record(Utc::now());
        let position = interaction.coordinates();

        if recorded.spawn_particle {
            self.field.spawn(position, interaction.kind(), &mut self.rng);
        }
        if let Some(effect) = recorded.effect() {
            let fresh = self.theme.apply(effect);
            if fresh && effect == ThemeEffect::Celebration {
                self.field.schedule_burst(now);
            }
        }

        self.reporter.report(RecordInteractionRequest::new(
            &interaction,
            self.session_id.clone(),
            Some(Utc::now()),
        ));

        tracing::debug!(
            count = recorded.count,
            kind = %interaction.kind(),
            x = position.x,
            y = position.y,
            "Interaction recorded"
        );
        recorded
    }

    /// Render one frame at host time `now`.
    ///
    /// Applies finished reports, advances the particle field and the
    /// cursor, and draws both. Returns the number of reports applied.
    pub fn frame(&mut self, now: Duration, canvas: &mut impl Canvas) -> usize {
        let applied = self.apply_reports();
        self.field.frame(now, canvas, &mut self.rng);
        self.cursor.step();
        self.cursor.draw(canvas);
        applied
    }

    /// Apply every report outcome received so far.
    pub fn apply_reports(&mut self) -> usize {
        let mut applied: usize = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            applied = applied.saturating_add(1);
            match outcome {
                ReportOutcome::Accepted(response) => {
                    self.recorder.reconcile(response.growth_level);
                }
                ReportOutcome::Failed(reason) => {
                    tracing::debug!(%reason, "Report failed, keeping local estimate");
                }
            }
        }
        applied
    }

    /// This browser profile's session.
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Displayed growth level.
    pub const fn growth_level(&self) -> GrowthLevel {
        self.recorder.growth()
    }

    /// Interactions counted locally.
    pub const fn interaction_count(&self) -> u64 {
        self.recorder.count()
    }

    /// Recent changes, newest first.
    pub const fn changes(&self) -> &ChangeLog {
        self.recorder.changes()
    }

    /// Current theme overrides.
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// The particle field.
    pub const fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The cursor follower.
    pub const fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use eon_canvas::RecordingCanvas;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn offline() -> LivingPlatform {
        LivingPlatform::new(
            SessionId::new("sess_test"),
            &ClientConfig::offline(),
            Reporter::disabled(),
            800.0,
            600.0,
        )
        .with_seed(42)
    }

    #[test]
    fn third_click_spawns_a_particle() {
        let mut platform = offline();
        for _ in 0..2 {
            platform.handle(HostEvent::Click(Point::new(10.0, 10.0)), Duration::ZERO);
        }
        assert!(platform.field().is_empty());
        platform.handle(HostEvent::Click(Point::new(10.0, 10.0)), Duration::ZERO);
        assert_eq!(platform.field().len(), 1);
    }

    #[test]
    fn hover_leave_and_resize_are_not_recorded() {
        let mut platform = offline();
        assert!(platform.handle(HostEvent::HoverLeft, Duration::ZERO).is_none());
        assert!(
            platform
                .handle(
                    HostEvent::Resized {
                        width: 1024.0,
                        height: 768.0
                    },
                    Duration::ZERO
                )
                .is_none()
        );
        assert_eq!(platform.interaction_count(), 0);
    }

    #[test]
    fn hover_scales_the_ring() {
        let mut platform = offline();
        platform.handle(HostEvent::HoverEntered(Point::new(5.0, 5.0)), Duration::ZERO);
        assert!(platform.cursor().is_hovering());
        assert_eq!(platform.interaction_count(), 1);
        platform.handle(HostEvent::HoverLeft, Duration::ZERO);
        assert!(!platform.cursor().is_hovering());
    }

    #[test]
    fn fifty_interactions_celebrate() {
        let mut platform = offline();
        for _ in 0..50 {
            platform.handle(HostEvent::KeyPressed, Duration::ZERO);
        }
        assert!(platform.growth_level().is_max());
        assert!(platform.theme().has_celebrated());
        assert!(platform.theme().background().is_some());
        assert_eq!(platform.field().pending_spawns(), 50);

        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        let mut now = Duration::ZERO;
        for _ in 0..200 {
            platform.frame(now, &mut canvas);
            now = now.saturating_add(FRAME);
        }
        assert_eq!(platform.field().pending_spawns(), 0);
    }

    #[test]
    fn frame_draws_the_cursor() {
        let mut platform = offline();
        platform.handle(HostEvent::PointerMoved(Point::new(100.0, 100.0)), Duration::ZERO);
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        platform.frame(Duration::ZERO, &mut canvas);
        assert!(canvas.circle_count() >= 1);
        assert!(platform.cursor().dot().x > 0.0);
    }
}
