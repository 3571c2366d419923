// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holocard Interaction: headless drag/tilt state for the holographic card.
//!
//! This crate models the interactive half of the card widget as small,
//! focused state machines that are driven entirely by the host's pointer
//! events and render ticks:
//!
//! - [`range`]: affine remapping of a value between two numeric intervals
//! - [`drag`]: bounded accumulation of incremental drag deltas
//! - [`tilt`]: derivation of tilt/twist angles from the drag offset
//! - [`phase`]: rest-state watchdog that fires once per gesture end
//! - [`animate`]: per-tick convergence of rendered values toward targets
//! - [`session`]: composition of the above into one owned state object
//!
//! The crate does not assume any particular UI framework, event system, or
//! renderer. Hosts feed in pan deltas and an "interaction in progress"
//! signal, call [`session::TiltSession::tick`] once per rendered frame, and
//! read back the animated tilt to drive whatever transform and overlay
//! machinery they use.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use holocard_interaction::animate::AnimationConfig;
//! use holocard_interaction::drag::DragBounds;
//! use holocard_interaction::session::TiltSession;
//! use holocard_interaction::tilt::TiltConfig;
//!
//! let mut session = TiltSession::new(TiltConfig::default(), AnimationConfig::default());
//! let bounds = DragBounds::for_card_size(Size::new(400.0, 560.0), 8.0).unwrap();
//!
//! // Drag right to the x bound: the card yaws toward its maximum.
//! session.drag_by(Vec2::new(100.0, 0.0), bounds).unwrap();
//! assert_eq!(session.target_tilt().y, TiltConfig::default().max_tilt_y);
//!
//! // Release: offset and target tilt spring back to rest.
//! session.set_interaction_in_progress(false);
//! assert_eq!(session.offset(), Vec2::ZERO);
//! ```
//!
//! All state mutation happens on the caller's thread; there is no internal
//! scheduling. [`session::TiltSession::tick`] returns whether the animated
//! tilt still differs from its target so hosts can stop requesting frames
//! once the card has settled.
//!
//! This crate is `no_std`.

#![no_std]

pub mod animate;
pub mod drag;
pub mod phase;
pub mod range;
pub mod session;
pub mod tilt;
