// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene IR emitted by the card view.
//!
//! A scene is a short, flat list of plain-old-data operations. Layers are
//! the scoping mechanism for clipping and compositing: a pushed layer may
//! clip its contents and controls how they are composited into the parent
//! (blend mode and opacity). Draw operations inside a layer composite with
//! plain source-over; per-draw state is limited to the projection and
//! opacity each image draw carries itself.
//!
//! Image pixels are owned by an image store (see [`crate::raster`]);
//! scenes reference them by [`ImageHandle`] and stay cheap to rebuild
//! every frame.

use alloc::string::String;

use kurbo::{Point, Rect, RoundedRect};
use peniko::{BlendMode, Color};
use smallvec::SmallVec;

use crate::project::Projection;

/// Handle to an image registered with an image store.
///
/// Stable for the lifetime of the store entry; scenes from different
/// stores must not be mixed.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Clip geometry attached to a layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// Clip to an axis-aligned rectangle.
    Rect(Rect),
    /// Clip to an axis-aligned rounded rectangle.
    RoundedRect(RoundedRect),
}

/// A layer clip: axis-aligned geometry plus the projection that carries it
/// into device space.
///
/// The projection lets a clip transform together with the content it
/// bounds, the way the card's rounded corners tilt with the card instead
/// of cutting its projected face flat. An identity projection gives a
/// plain device-space clip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerClip {
    /// Clip geometry, in clip-local coordinates.
    pub shape: ClipShape,
    /// Projection mapping the clip geometry into device space.
    pub projection: Projection,
}

/// Parameters of a pushed compositing layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Optional clip applied to this layer's contents.
    pub clip: Option<LayerClip>,
    /// Optional blend mode used when compositing this layer into its
    /// parent. `None` means plain source-over.
    pub blend: Option<BlendMode>,
    /// Optional opacity (0–1) applied when compositing this layer into
    /// its parent.
    pub opacity: Option<f32>,
}

impl LayerSpec {
    /// A layer that clips to a device-space shape.
    #[must_use]
    pub fn clipped(shape: ClipShape) -> Self {
        Self::clipped_projected(shape, Projection::IDENTITY)
    }

    /// A layer that clips to a shape carried through `projection`, so the
    /// clip transforms with the content it bounds.
    #[must_use]
    pub fn clipped_projected(shape: ClipShape, projection: Projection) -> Self {
        Self {
            clip: Some(LayerClip { shape, projection }),
            blend: None,
            opacity: None,
        }
    }

    /// A layer that composites with a blend mode and opacity.
    #[must_use]
    pub fn blended(blend: BlendMode, opacity: f32) -> Self {
        Self {
            clip: None,
            blend: Some(blend),
            opacity: Some(opacity),
        }
    }

    /// Returns `true` if pushing this layer changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none() && self.blend.is_none() && self.opacity.is_none()
    }
}

/// One scene operation.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneOp {
    /// Push a compositing layer. Must be matched by a [`SceneOp::PopLayer`].
    PushLayer(LayerSpec),
    /// Pop the most recently pushed layer.
    PopLayer,
    /// Fill an axis-aligned rectangle with a solid color.
    FillRect {
        /// Rectangle in device coordinates.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Draw an image stretched to fill `dst`, with `dst`-space geometry
    /// mapped through `projection` into device space.
    DrawImage {
        /// Image to draw.
        image: ImageHandle,
        /// Destination rectangle before projection.
        dst: Rect,
        /// Planar projection applied to the destination geometry.
        projection: Projection,
        /// Uniform opacity (0–1) applied to the image.
        opacity: f32,
    },
    /// A debug text run. The reference compositor records but does not
    /// rasterize these; hosts with a text stack place them themselves.
    DrawText {
        /// Baseline origin in device coordinates.
        origin: Point,
        /// Text content.
        text: String,
    },
}

/// A frame's worth of scene operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    ops: SmallVec<[SceneOp; 16]>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the operations in draw order.
    #[must_use]
    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    /// Removes all operations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Pushes a compositing layer.
    pub fn push_layer(&mut self, spec: LayerSpec) {
        self.ops.push(SceneOp::PushLayer(spec));
    }

    /// Pops the most recently pushed layer.
    pub fn pop_layer(&mut self) {
        self.ops.push(SceneOp::PopLayer);
    }

    /// Fills a rectangle with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(SceneOp::FillRect { rect, color });
    }

    /// Draws an image stretched to `dst` under `projection`.
    pub fn draw_image(
        &mut self,
        image: ImageHandle,
        dst: Rect,
        projection: Projection,
        opacity: f32,
    ) {
        self.ops.push(SceneOp::DrawImage {
            image,
            dst,
            projection,
            opacity,
        });
    }

    /// Appends a debug text run.
    pub fn draw_text(&mut self, origin: Point, text: impl Into<String>) {
        self.ops.push(SceneOp::DrawText {
            origin,
            text: text.into(),
        });
    }

    /// Runs `f` inside a pushed layer, popping it afterwards.
    pub fn with_layer(&mut self, spec: LayerSpec, f: impl FnOnce(&mut Self)) {
        self.push_layer(spec);
        f(self);
        self.pop_layer();
    }

    /// Returns `true` if every push has a matching pop and pops never
    /// outnumber pushes.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0_i32;
        for op in &self.ops {
            match op {
                SceneOp::PushLayer(_) => depth += 1,
                SceneOp::PopLayer => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// Returns the debug text runs in draw order.
    pub fn text_runs(&self) -> impl Iterator<Item = (Point, &str)> {
        self.ops.iter().filter_map(|op| match op {
            SceneOp::DrawText { origin, text } => Some((*origin, text.as_str())),
            _ => None,
        })
    }
}
