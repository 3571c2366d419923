// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gesture flow, rendered through the reference compositor.

use kurbo::{Size, Vec2};

use holocard_imaging::raster::{ImageStore, Pixmap, render};
use holocard_view::card::{CardAssets, CardConfig, CardView, PointerEvent};

const SCREEN_W: u32 = 464;
const SCREEN_H: u32 = 688;
const FRAME: f64 = 1.0 / 60.0;

const MID_GRAY: [u8; 4] = [128, 128, 128, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn solid(store: &mut ImageStore, size: u32, rgba: [u8; 4]) -> holocard_imaging::scene::ImageHandle {
    let pixels: Vec<u8> = core::iter::repeat_n(rgba, size as usize * size as usize)
        .flatten()
        .collect();
    store.create_image(size, size, &pixels).unwrap()
}

/// A mid-gray face under a white sheen makes the overlay blend easy to
/// read off: mid-gray passes the sheen through, so any visible sheen
/// lightens the card center.
fn fixture() -> (ImageStore, CardView) {
    let mut store = ImageStore::new();
    let face = solid(&mut store, 4, MID_GRAY);
    let sheen = solid(&mut store, 4, [255, 255, 255, 255]);
    let view = CardView::new(
        Size::new(f64::from(SCREEN_W), f64::from(SCREEN_H)),
        CardConfig::default(),
        CardAssets { face, sheen },
    )
    .unwrap();
    (store, view)
}

fn render_view(store: &ImageStore, view: &CardView) -> Pixmap {
    let scene = view.scene().unwrap();
    assert!(scene.is_balanced());
    let mut target = Pixmap::new(SCREEN_W, SCREEN_H);
    render(&scene, store, &mut target).unwrap();
    target
}

fn settle(view: &mut CardView) {
    let mut frames = 0;
    while view.tick(FRAME) {
        frames += 1;
        assert!(frames < 1_000, "animation must settle");
    }
}

#[test]
fn resting_card_renders_flat() {
    let (store, view) = fixture();
    let frame = render_view(&store, &view);

    // Card center shows the untinted face.
    assert_eq!(frame.pixel(232, 344), MID_GRAY);
    // Outside the card: the backdrop.
    assert_eq!(frame.pixel(0, 0), BLACK);
    assert_eq!(frame.pixel(231, 20), BLACK);
    // Inside the card's bounding box but outside the rounded corner.
    assert_eq!(frame.pixel(33, 65), BLACK);
    // Just inside the card edge, away from the corners.
    assert_eq!(frame.pixel(40, 344), MID_GRAY);
}

#[test]
fn drag_reveals_the_sheen_over_the_face() {
    let (store, mut view) = fixture();

    view.handle_event(PointerEvent::DragBy(Vec2::new(50.0, 0.0)))
        .unwrap();
    settle(&mut view);
    let frame = render_view(&store, &view);

    // The white sheen at two-thirds opacity lightens the gray center but
    // keeps it neutral.
    let [r, g, b, a] = frame.pixel(232, 344);
    assert!(r > 128, "sheen must lighten the card center, got {r}");
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 255);

    // The backdrop is untouched by the tilt.
    assert_eq!(frame.pixel(0, 0), BLACK);
}

#[test]
fn tilt_moves_the_card_edges() {
    let (store, mut view) = fixture();
    let rest = render_view(&store, &view);

    // Pin the drag at the horizontal bound: full yaw.
    view.handle_event(PointerEvent::DragBy(Vec2::new(50.0, 0.0)))
        .unwrap();
    settle(&mut view);
    let tilted = render_view(&store, &view);

    // The receding right edge pulls inside its rest position, so a pixel
    // that sat just inside the edge goes to backdrop.
    assert_eq!(rest.pixel(428, 344), MID_GRAY);
    assert_eq!(tilted.pixel(428, 344), BLACK);
}

#[test]
fn clip_tilts_with_the_card_face() {
    let (store, mut view) = fixture();
    let rest = render_view(&store, &view);

    // At rest the card's left edge sits at x = 32; pixel 30 is backdrop.
    assert_eq!(rest.pixel(30, 344), BLACK);

    // Full yaw enlarges the near (left) edge past its rest position. The
    // rounded-rect clip tilts with the card, so the projected face shows
    // there instead of being cut flat at the rest edge.
    view.handle_event(PointerEvent::DragBy(Vec2::new(50.0, 0.0)))
        .unwrap();
    settle(&mut view);
    let tilted = render_view(&store, &view);

    let [r, g, b, a] = tilted.pixel(30, 344);
    assert_eq!(a, 255, "enlarged face edge must be drawn, got {:?}", [r, g, b, a]);
    assert!(r >= 128, "face (plus sheen) must show outside the rest edge, got {r}");
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn release_returns_to_the_rest_frame() {
    let (store, mut view) = fixture();
    let rest = render_view(&store, &view);

    view.handle_event(PointerEvent::DragBy(Vec2::new(35.0, -60.0)))
        .unwrap();
    settle(&mut view);
    let tilted = render_view(&store, &view);
    assert_ne!(tilted.data(), rest.data());

    view.handle_event(PointerEvent::InteractionEnd).unwrap();
    settle(&mut view);
    let settled = render_view(&store, &view);
    assert_eq!(settled.data(), rest.data());
}

#[test]
fn mid_animation_frames_interpolate_the_sheen() {
    let (store, mut view) = fixture();

    view.handle_event(PointerEvent::DragBy(Vec2::new(50.0, 0.0)))
        .unwrap();
    // One frame: the rendered tilt has started moving but is nowhere near
    // the target yet.
    assert!(view.tick(FRAME));
    let early = render_view(&store, &view);
    settle(&mut view);
    let late = render_view(&store, &view);

    let [early_r, ..] = early.pixel(232, 344);
    let [late_r, ..] = late.pixel(232, 344);
    assert!(early_r > 128, "sheen must already show mid-animation");
    assert!(late_r > early_r, "sheen must keep strengthening");
}

#[test]
fn debug_text_tracks_the_gesture() {
    let (_, mut view) = fixture();

    view.handle_event(PointerEvent::DragBy(Vec2::new(50.0, 0.0)))
        .unwrap();
    let scene = view.scene().unwrap();
    let runs: Vec<_> = scene.text_runs().map(|(_, text)| text.to_owned()).collect();
    assert_eq!(
        runs,
        ["Drag : x : 50 | y : 0", "Rotation : x : 0 | y : 10 | z : 0"]
    );

    view.handle_event(PointerEvent::InteractionEnd).unwrap();
    let scene = view.scene().unwrap();
    let runs: Vec<_> = scene.text_runs().map(|(_, text)| text.to_owned()).collect();
    assert_eq!(
        runs,
        ["Drag : x : 0 | y : 0", "Rotation : x : 0 | y : 0 | z : 0"]
    );
}
