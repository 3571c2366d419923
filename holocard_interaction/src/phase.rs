// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rest-state watchdog for the card gesture.
//!
//! Tracks whether an interaction is in progress and reports each
//! transition exactly once. The [`PhaseChange::Released`] transition is the
//! signal to zero the drag offset and target tilt so the card springs back
//! to flat; engaging a new gesture performs no reset (the prior release
//! already did).

/// Whether a card gesture is currently in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionPhase {
    /// No interaction; the card is at (or animating toward) rest.
    #[default]
    Rest,
    /// A gesture is in progress.
    Active,
}

/// A transition reported by [`InteractionPhase::set_in_progress`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseChange {
    /// A new gesture began.
    Engaged,
    /// The gesture ended; the owner should reset offset and tilt targets.
    Released,
}

impl InteractionPhase {
    /// Feeds the host's "interaction in progress" signal into the watchdog.
    ///
    /// Returns the transition this signal caused, if any. Repeating the
    /// current state returns `None`, so `Released` fires exactly once per
    /// gesture no matter how often the host repeats the signal.
    pub fn set_in_progress(&mut self, in_progress: bool) -> Option<PhaseChange> {
        match (*self, in_progress) {
            (Self::Rest, true) => {
                *self = Self::Active;
                Some(PhaseChange::Engaged)
            }
            (Self::Active, false) => {
                *self = Self::Rest;
                Some(PhaseChange::Released)
            }
            _ => None,
        }
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
