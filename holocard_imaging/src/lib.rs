// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holocard Imaging: scene IR and CPU reference compositor for the card.
//!
//! The card view describes each frame as a short list of plain-old-data
//! scene operations: compositing layers with optional clip, blend mode, and
//! opacity; image draws through a planar projection; a background fill; and
//! debug text runs. This crate defines that IR and a small CPU compositor
//! that turns a scene into RGBA pixels, including the photographic
//! *overlay* blend the holographic sheen relies on.
//!
//! Three layers:
//!
//! - [`scene`]: the [`scene::Scene`] op list and its builder helpers.
//! - [`project`]: [`project::Projection`], a 3×3 planar projective
//!   transform used to draw images under a perspective-style card tilt.
//! - [`raster`] (with [`blend`]): a headless reference compositor in the
//!   spirit of test-oriented backends: no GPU, no text shaping, just
//!   deterministic pixels that properties can be asserted against.
//!
//! Blend modes are [`peniko::BlendMode`]; the compositor accepts the
//! separable subset it needs (normal, multiply, screen, overlay, hard
//! light) over source-over composition.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use peniko::Color;
//! use holocard_imaging::raster::{ImageStore, Pixmap, render};
//! use holocard_imaging::scene::Scene;
//!
//! let store = ImageStore::new();
//! let mut scene = Scene::new();
//! scene.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK);
//!
//! let mut target = Pixmap::new(4, 4);
//! render(&scene, &store, &mut target).unwrap();
//! assert_eq!(target.pixel(0, 0), [0, 0, 0, 255]);
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

pub mod blend;
pub mod project;
pub mod raster;
pub mod scene;

pub use peniko::{BlendMode, Compose, Mix};
