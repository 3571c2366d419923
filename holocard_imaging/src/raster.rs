// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU reference compositor.
//!
//! A deliberately simple, deterministic rasterizer for [`Scene`]s: layers
//! composite through straight-alpha f32 buffers, images sample nearest
//! through the inverse of their projection, and clips are evaluated per
//! pixel center after carrying the center into the clip's local space, so
//! a projected clip transforms with the content it bounds. It exists so
//! the card's compositing contract (rounded corners that tilt with the
//! card, overlay-blended sheen, layer opacity) can be asserted on actual
//! pixels in tests; it is not a performance-oriented renderer.
//!
//! Text operations are skipped: text imaging lives outside this crate, and
//! hosts can recover the runs via [`Scene::text_runs`].

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Shape};
use peniko::{BlendMode, Compose, Mix};

use crate::blend;
use crate::project::Projection;
use crate::scene::{ClipShape, ImageHandle, LayerClip, LayerSpec, Scene, SceneOp};

/// Error produced while rendering a scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// A draw referenced an image the store does not hold.
    UnknownImage(ImageHandle),
    /// Layer pushes and pops in the scene do not balance.
    UnbalancedLayers,
    /// A layer requested a blend mode the compositor does not implement.
    UnsupportedBlend(BlendMode),
    /// A draw or clip projection is singular and cannot be inverted.
    SingularProjection,
    /// Image pixel data does not match the stated dimensions.
    ImageDataSize {
        /// Byte count implied by width, height, and RGBA8 format.
        expected: usize,
        /// Byte count actually provided.
        actual: usize,
    },
}

impl core::fmt::Display for RasterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownImage(handle) => write!(f, "unknown image handle {}", handle.0),
            Self::UnbalancedLayers => write!(f, "scene layer pushes and pops do not balance"),
            Self::UnsupportedBlend(mode) => write!(f, "unsupported blend mode {mode:?}"),
            Self::SingularProjection => write!(f, "projection is singular"),
            Self::ImageDataSize { expected, actual } => {
                write!(f, "image data is {actual} bytes, expected {expected}")
            }
        }
    }
}

impl core::error::Error for RasterError {}

/// An RGBA8 pixel buffer with straight (unpremultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a transparent pixmap.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the pixmap.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} pixmap",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

#[derive(Clone, Debug)]
struct StoredImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl StoredImage {
    /// Nearest sample at normalized coordinates inside the image,
    /// clamped to the edge texels.
    fn sample(&self, u: f64, v: f64) -> [f32; 4] {
        let x = ((u * f64::from(self.width)) as usize).min(self.width as usize - 1);
        let y = ((v * f64::from(self.height)) as usize).min(self.height as usize - 1);
        let i = (y * self.width as usize + x) * 4;
        [
            f32::from(self.pixels[i]) / 255.0,
            f32::from(self.pixels[i + 1]) / 255.0,
            f32::from(self.pixels[i + 2]) / 255.0,
            f32::from(self.pixels[i + 3]) / 255.0,
        ]
    }
}

/// Owns the pixel data that scenes reference by [`ImageHandle`].
///
/// Handles are stable for the lifetime of the store. The card only ever
/// registers its two static assets (face and sheen), so there is no
/// destruction API.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: Vec<StoredImage>,
}

impl ImageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an RGBA8 image (straight alpha, row-major).
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::ImageDataSize`] when `pixels` does not hold
    /// exactly `width * height * 4` bytes, and treats zero-sized images
    /// the same way.
    pub fn create_image(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<ImageHandle, RasterError> {
        let expected = width as usize * height as usize * 4;
        if expected == 0 || pixels.len() != expected {
            return Err(RasterError::ImageDataSize {
                expected,
                actual: pixels.len(),
            });
        }
        let handle = ImageHandle(u32::try_from(self.images.len()).unwrap_or(u32::MAX));
        self.images.push(StoredImage {
            width,
            height,
            pixels: pixels.to_vec(),
        });
        Ok(handle)
    }

    fn get(&self, handle: ImageHandle) -> Option<&StoredImage> {
        self.images.get(handle.0 as usize)
    }
}

/// One straight-alpha f32 working buffer on the layer stack.
struct Layer {
    buffer: Vec<[f32; 4]>,
    spec: LayerSpec,
    /// Inverse of the clip's projection, resolved at push; `None` when the
    /// clip is absent or sits in device space already.
    clip_inverse: Option<Projection>,
}

fn shape_contains(shape: &ClipShape, p: Point) -> bool {
    match shape {
        ClipShape::Rect(rect) => rect.contains(p),
        ClipShape::RoundedRect(rr) => rr.contains(p),
    }
}

/// Tests a device-space point against a clip by carrying the point back
/// into the clip's local space.
fn clip_contains(clip: &LayerClip, inverse: Option<&Projection>, p: Point) -> bool {
    let local = inverse.map_or(p, |inv| inv.project(p));
    shape_contains(&clip.shape, local)
}

/// Source-over with straight alpha.
fn src_over(dst: &mut [f32; 4], src: [f32; 4]) {
    let alpha_s = src[3];
    if alpha_s <= 0.0 {
        return;
    }
    let alpha_b = dst[3];
    let alpha_o = alpha_s + alpha_b * (1.0 - alpha_s);
    for c in 0..3 {
        dst[c] = (src[c] * alpha_s + dst[c] * alpha_b * (1.0 - alpha_s)) / alpha_o;
    }
    dst[3] = alpha_o;
}

/// Source-over with the source color first mixed toward `B(cb, cs)` by the
/// backdrop's coverage, per the W3C blending model.
fn blend_over(dst: &mut [f32; 4], src: [f32; 4], mix: Mix) {
    let alpha_b = dst[3];
    let mut mixed = src;
    for c in 0..3 {
        // Validated when the layer was pushed.
        let blended = blend::separable(mix, dst[c], src[c]).unwrap_or(src[c]);
        mixed[c] = (1.0 - alpha_b) * src[c] + alpha_b * blended;
    }
    src_over(dst, mixed);
}

/// Clamped pixel span covering `[lo, hi)` device coordinates.
fn pixel_span(lo: f64, hi: f64, limit: usize) -> (usize, usize) {
    let start = lo.max(0.0) as usize;
    let end = (hi.max(0.0) as usize + 1).min(limit);
    (start.min(limit), end)
}

fn blend_is_supported(mode: BlendMode) -> bool {
    mode.compose == Compose::SrcOver && blend::separable(mode.mix, 0.0, 0.0).is_some()
}

/// Renders `scene` over the existing contents of `target`.
///
/// # Errors
///
/// Returns a [`RasterError`] for unbalanced layers, unknown image handles,
/// unsupported blend modes, or singular projections. The target is left in
/// an unspecified partially-rendered state on error.
pub fn render(scene: &Scene, store: &ImageStore, target: &mut Pixmap) -> Result<(), RasterError> {
    if !scene.is_balanced() {
        return Err(RasterError::UnbalancedLayers);
    }
    let width = target.width as usize;
    let height = target.height as usize;

    let base = target
        .data
        .chunks_exact(4)
        .map(|px| {
            [
                f32::from(px[0]) / 255.0,
                f32::from(px[1]) / 255.0,
                f32::from(px[2]) / 255.0,
                f32::from(px[3]) / 255.0,
            ]
        })
        .collect();
    let mut stack = vec![Layer {
        buffer: base,
        spec: LayerSpec {
            clip: None,
            blend: None,
            opacity: None,
        },
        clip_inverse: None,
    }];

    for op in scene.ops() {
        match op {
            SceneOp::PushLayer(spec) => {
                if let Some(mode) = spec.blend {
                    if !blend_is_supported(mode) {
                        return Err(RasterError::UnsupportedBlend(mode));
                    }
                }
                let clip_inverse = match &spec.clip {
                    Some(clip) if !clip.projection.is_identity() => Some(
                        clip.projection
                            .inverse()
                            .ok_or(RasterError::SingularProjection)?,
                    ),
                    _ => None,
                };
                stack.push(Layer {
                    buffer: vec![[0.0; 4]; width * height],
                    spec: *spec,
                    clip_inverse,
                });
            }
            SceneOp::PopLayer => {
                // Balance was checked up front; the base layer is never popped.
                let Some(top) = stack.pop() else {
                    return Err(RasterError::UnbalancedLayers);
                };
                let Some(parent) = stack.last_mut() else {
                    return Err(RasterError::UnbalancedLayers);
                };
                let opacity = top.spec.opacity.unwrap_or(1.0).clamp(0.0, 1.0);
                let mix = top.spec.blend.map_or(Mix::Normal, |mode| mode.mix);
                for (dst, src) in parent.buffer.iter_mut().zip(&top.buffer) {
                    let mut src = *src;
                    src[3] *= opacity;
                    if src[3] > 0.0 {
                        blend_over(dst, src, mix);
                    }
                }
            }
            SceneOp::FillRect { rect, color } => {
                let src = color.components;
                let (x0, x1) = pixel_span(rect.x0, rect.x1, width);
                let (y0, y1) = pixel_span(rect.y0, rect.y1, height);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                        if rect.contains(center) && clips_contain(&stack, center) {
                            let top = stack.last_mut().expect("layer stack is never empty");
                            src_over(&mut top.buffer[y * width + x], src);
                        }
                    }
                }
            }
            SceneOp::DrawImage {
                image,
                dst,
                projection,
                opacity,
            } => {
                let stored = store.get(*image).ok_or(RasterError::UnknownImage(*image))?;
                if dst.width() <= 0.0 || dst.height() <= 0.0 {
                    continue;
                }
                let inverse = projection
                    .inverse()
                    .ok_or(RasterError::SingularProjection)?;
                let opacity = opacity.clamp(0.0, 1.0);

                // Conservative device-space footprint from the projected corners.
                let corners = [
                    projection.project(Point::new(dst.x0, dst.y0)),
                    projection.project(Point::new(dst.x1, dst.y0)),
                    projection.project(Point::new(dst.x1, dst.y1)),
                    projection.project(Point::new(dst.x0, dst.y1)),
                ];
                let mut footprint = Rect::from_points(corners[0], corners[1]);
                footprint = footprint.union_pt(corners[2]);
                footprint = footprint.union_pt(corners[3]);

                let (x0, x1) = pixel_span(footprint.x0, footprint.x1, width);
                let (y0, y1) = pixel_span(footprint.y0, footprint.y1, height);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                        if !clips_contain(&stack, center) {
                            continue;
                        }
                        let local = inverse.project(center);
                        if !dst.contains(local) {
                            continue;
                        }
                        let u = (local.x - dst.x0) / dst.width();
                        let v = (local.y - dst.y0) / dst.height();
                        let mut src = stored.sample(u, v);
                        src[3] *= opacity;
                        let top = stack.last_mut().expect("layer stack is never empty");
                        src_over(&mut top.buffer[y * width + x], src);
                    }
                }
            }
            SceneOp::DrawText { .. } => {}
        }
    }

    let Some(base) = stack.pop() else {
        return Err(RasterError::UnbalancedLayers);
    };
    for (px, out) in base.buffer.iter().zip(target.data.chunks_exact_mut(4)) {
        for c in 0..4 {
            out[c] = (px[c].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        }
    }
    Ok(())
}

/// Tests the pixel center against every active clip on the stack.
fn clips_contain(stack: &[Layer], p: Point) -> bool {
    stack.iter().all(|layer| match &layer.spec.clip {
        Some(clip) => clip_contains(clip, layer.clip_inverse.as_ref(), p),
        None => true,
    })
}
