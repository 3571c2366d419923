// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card widget: interaction session plus per-frame scene emission.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, RoundedRect, Size, Vec2};
use peniko::Color;

use holocard_imaging::scene::{ClipShape, ImageHandle, LayerSpec, Scene};
use holocard_imaging::{BlendMode, Compose, Mix};
use holocard_interaction::range::DegenerateRange;
use holocard_interaction::session::TiltSession;

pub use crate::metrics::{CardConfig, CardMetrics, LayoutError};
use crate::overlay::OverlayPlacement;
use crate::transform::card_projection;

/// Vertical gap between the card's bottom edge and the first debug line.
const DEBUG_TEXT_LEADING: f64 = 16.0;

/// Pointer input, already translated by the host from its own event types.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// An incremental pan delta in device pixels.
    DragBy(Vec2),
    /// The pointer went down on the card.
    InteractionStart,
    /// The gesture ended (pointer up or cancel); the card returns to rest.
    InteractionEnd,
}

/// The two images the card draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardAssets {
    /// The card face artwork.
    pub face: ImageHandle,
    /// The holographic sheen, drawn over the face with `Overlay`.
    pub sheen: ImageHandle,
}

/// One interactive card: layout, interaction state, and scene emission.
///
/// The host owns the event loop. It forwards pointer events through
/// [`CardView::handle_event`], advances the animation with
/// [`CardView::tick`] once per frame, and renders the scene returned by
/// [`CardView::scene`]. All state is transient; dropping the view drops
/// the interaction state with it.
#[derive(Clone, Debug)]
pub struct CardView {
    config: CardConfig,
    metrics: CardMetrics,
    session: TiltSession,
    assets: CardAssets,
}

impl CardView {
    /// Creates a card at rest, fitted to `screen`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the card does not fit the screen (see
    /// [`CardMetrics::layout`]).
    pub fn new(screen: Size, config: CardConfig, assets: CardAssets) -> Result<Self, LayoutError> {
        let metrics = CardMetrics::layout(screen, &config)?;
        Ok(Self {
            config,
            metrics,
            session: TiltSession::new(config.tilt, config.animation),
            assets,
        })
    }

    /// Refits the card after a screen resize.
    ///
    /// Interaction state carries over; an offset that exceeds the new drag
    /// bounds is clamped by the next drag delta.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the card does not fit the new screen.
    /// The previous layout is kept in that case.
    pub fn set_screen_size(&mut self, screen: Size) -> Result<(), LayoutError> {
        self.metrics = CardMetrics::layout(screen, &self.config)?;
        Ok(())
    }

    /// Feeds one pointer event into the interaction session.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] only for configurations whose twist
    /// source interval has zero width (see
    /// [`holocard_interaction::tilt::TiltConfig::tilt_for_offset`]).
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<(), DegenerateRange> {
        match event {
            PointerEvent::DragBy(delta) => {
                self.session.drag_by(delta, self.metrics.drag_bounds())?;
            }
            PointerEvent::InteractionStart => self.session.set_interaction_in_progress(true),
            PointerEvent::InteractionEnd => self.session.set_interaction_in_progress(false),
        }
        Ok(())
    }

    /// Advances the tilt animation by `dt` seconds.
    ///
    /// Returns `true` while the rendered tilt is still moving, i.e. while
    /// the host should keep scheduling frames.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.session.tick(dt)
    }

    /// Emits the scene for the current frame.
    ///
    /// Draw order: a black backdrop over the whole screen, then inside a
    /// rounded-rect clip the projected card face and, in an `Overlay`
    /// layer, the sheen at its tilt-derived position and opacity. The clip
    /// carries the same projection as the face, so the rounded corners
    /// tilt with the card instead of cutting its projected edges flat.
    /// Two debug text lines follow below the card.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] when a tilt bound in the configuration
    /// is zero (see [`OverlayPlacement::compute`]).
    pub fn scene(&self) -> Result<Scene, DegenerateRange> {
        let card_rect = self.metrics.card_rect();
        let tilt = self.session.animated_tilt();
        let projection = card_projection(card_rect, tilt, self.config.camera_distance);
        let placement = OverlayPlacement::compute(tilt, &self.config, card_rect)?;

        let mut scene = Scene::new();
        scene.fill_rect(self.metrics.screen_size().to_rect(), Color::BLACK);

        scene.push_layer(LayerSpec::clipped_projected(
            ClipShape::RoundedRect(RoundedRect::from_rect(
                card_rect,
                self.metrics.corner_radius(),
            )),
            projection,
        ));
        scene.draw_image(self.assets.face, card_rect, projection, 1.0);
        scene.push_layer(LayerSpec::blended(
            BlendMode::new(Mix::Overlay, Compose::SrcOver),
            1.0,
        ));
        scene.draw_image(self.assets.sheen, placement.dst, projection, placement.opacity);
        scene.pop_layer();
        scene.pop_layer();

        let [drag_line, tilt_line] = self.debug_lines();
        let origin = Point::new(card_rect.x0, card_rect.y1 + DEBUG_TEXT_LEADING);
        scene.draw_text(origin, drag_line);
        scene.draw_text(origin + Vec2::new(0.0, DEBUG_TEXT_LEADING), tilt_line);

        Ok(scene)
    }

    /// The debug readout: the accumulated drag offset and the tilt target
    /// it maps to.
    #[must_use]
    pub fn debug_lines(&self) -> [String; 2] {
        let offset = self.session.offset();
        let tilt = self.session.target_tilt();
        [
            format!("Drag : x : {} | y : {}", offset.x, offset.y),
            format!(
                "Rotation : x : {} | y : {} | z : {}",
                tilt.x, tilt.y, tilt.z
            ),
        ]
    }

    /// The resolved layout.
    #[must_use]
    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    /// The interaction session, for hosts that want to inspect it.
    #[must_use]
    pub fn session(&self) -> &TiltSession {
        &self.session
    }

    /// The images this card draws.
    #[must_use]
    pub fn assets(&self) -> CardAssets {
        self.assets
    }
}
