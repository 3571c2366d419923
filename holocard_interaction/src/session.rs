// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One owned state object composing the card's interaction machinery.
//!
//! [`TiltSession`] is the explicit state object the view owns: the drag
//! tracker and rest watchdog are the only writers, and rendering reads the
//! animated tilt. Hosts wire up three entry points:
//!
//! 1) [`TiltSession::drag_by`] for each incremental pan delta,
//! 2) [`TiltSession::set_interaction_in_progress`] for the gesture
//!    begin/end signal,
//! 3) [`TiltSession::tick`] once per rendered frame.

use kurbo::Vec2;

use crate::animate::{AnimatedTilt, AnimationConfig};
use crate::drag::{DragBounds, DragTracker};
use crate::phase::{InteractionPhase, PhaseChange};
use crate::range::DegenerateRange;
use crate::tilt::{TiltAngles, TiltConfig};

/// Interaction state for one card instance.
///
/// All state is transient: nothing here outlives the view that owns it.
#[derive(Copy, Clone, Debug)]
pub struct TiltSession {
    tilt_config: TiltConfig,
    animation_config: AnimationConfig,
    drag: DragTracker,
    phase: InteractionPhase,
    target: TiltAngles,
    animated: AnimatedTilt,
}

impl TiltSession {
    /// Creates a session at rest.
    #[must_use]
    pub fn new(tilt_config: TiltConfig, animation_config: AnimationConfig) -> Self {
        Self {
            tilt_config,
            animation_config,
            drag: DragTracker::new(),
            phase: InteractionPhase::Rest,
            target: TiltAngles::ZERO,
            animated: AnimatedTilt::new(TiltAngles::ZERO),
        }
    }

    /// Applies an incremental pan delta.
    ///
    /// The first delta of a new gesture also moves the watchdog to its
    /// active phase. The clamped offset and the tilt target are updated;
    /// the rendered tilt follows over subsequent [`TiltSession::tick`]s.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] only for configurations whose twist
    /// source interval has zero width (see
    /// [`TiltConfig::tilt_for_offset`]).
    pub fn drag_by(&mut self, delta: Vec2, bounds: DragBounds) -> Result<(), DegenerateRange> {
        self.phase.set_in_progress(true);
        let offset = self.drag.apply_delta(delta, bounds);
        self.target = self.tilt_config.tilt_for_offset(offset, bounds)?;
        self.animated.retarget(self.target);
        Ok(())
    }

    /// Feeds the host's "interaction in progress" signal.
    ///
    /// Ending the gesture is the only cancellation signal: it immediately
    /// zeroes the offset and the tilt target, exactly once per gesture.
    /// The rendered tilt then converges back to flat.
    pub fn set_interaction_in_progress(&mut self, in_progress: bool) {
        if self.phase.set_in_progress(in_progress) == Some(PhaseChange::Released) {
            self.drag.reset();
            self.target = TiltAngles::ZERO;
            self.animated.retarget(self.target);
        }
    }

    /// Advances the rendered tilt by `dt` seconds.
    ///
    /// Returns `true` while the rendered tilt still differs from its
    /// target, i.e. while another frame should be scheduled.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.animated.tick(dt, &self.animation_config)
    }

    /// Returns the current accumulated drag offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.drag.offset()
    }

    /// Returns the tilt target derived from the current offset.
    #[must_use]
    pub fn target_tilt(&self) -> TiltAngles {
        self.target
    }

    /// Returns the smoothed tilt used for rendering.
    #[must_use]
    pub fn animated_tilt(&self) -> TiltAngles {
        self.animated.current()
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns the tilt configuration this session was built with.
    #[must_use]
    pub fn tilt_config(&self) -> TiltConfig {
        self.tilt_config
    }
}
