// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holocard View: layout, tilt projection, and scene composition.
//!
//! This crate assembles the interaction state from `holocard_interaction`
//! and the scene IR from `holocard_imaging` into the card widget itself:
//!
//! - [`metrics`]: fits the fixed-aspect, padded, rounded card rectangle
//!   into a screen and derives the drag bounds from it.
//! - [`transform`]: builds the perspective-style planar projection for a
//!   given tilt pose.
//! - [`overlay`]: positions the holographic sheen and derives its opacity
//!   from the animated tilt.
//! - [`card`]: [`card::CardView`], which owns the interaction session and
//!   emits one [`holocard_imaging::scene::Scene`] per frame.
//!
//! The host owns the event loop and the renderer. Each frame it forwards
//! pointer events, calls [`card::CardView::tick`], and hands the emitted
//! scene to whatever backend it uses (the reference compositor in
//! `holocard_imaging::raster`, or its own).
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use holocard_imaging::raster::{ImageStore, Pixmap, render};
//! use holocard_view::card::{CardAssets, CardConfig, CardView, PointerEvent};
//!
//! let mut store = ImageStore::new();
//! let face = store.create_image(1, 1, &[200, 60, 60, 255]).unwrap();
//! let sheen = store.create_image(1, 1, &[255, 255, 255, 255]).unwrap();
//!
//! let mut card = CardView::new(
//!     Size::new(464.0, 688.0),
//!     CardConfig::default(),
//!     CardAssets { face, sheen },
//! )
//! .unwrap();
//!
//! card.handle_event(PointerEvent::DragBy(Vec2::new(20.0, 0.0))).unwrap();
//! card.tick(1.0 / 60.0);
//!
//! let scene = card.scene().unwrap();
//! let mut target = Pixmap::new(464, 688);
//! render(&scene, &store, &mut target).unwrap();
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

pub mod card;
pub mod metrics;
pub mod overlay;
pub mod transform;
