//! Scroll companion comet
//!
//! A bright head flying a time-based Lissajous path over the page with a
//! fading multi-coloured tail. The head moves every frame; the tail records
//! a sample every `TRAIL_SAMPLE_STRIDE` frames. Drawing is delegated to a
//! [`FrameRenderer`].

use glam::Vec2;

use super::counter::Ease;
use super::trail::{OFFSCREEN, TrailBuffer, trail_weight};
use crate::MotionResult;
use crate::consts::{COMPANION_FADE_DELAY_MS, COMPANION_FADE_MS, TRAIL_SAMPLE_STRIDE};
use crate::sched::{Animator, Frame};

/// Tail colours, cycled by sample age
pub const TRAIL_PALETTE: [&str; 10] = [
    "#fbbf24", "#f59e0b", "#22d3ee", "#06b6d4", "#a78bfa", "#c084fc", "#818cf8", "#34d399",
    "#22d3ee", "#f472b6",
];
pub const HEAD_CORE_COLOR: &str = "#ffffff";
pub const HEAD_GLOW_COLOR: &str = "#22d3ee";
const HEAD_CORE_OPACITY: f32 = 0.9;
const HEAD_GLOW_OPACITY: f32 = 0.15;

/// One drawable disc, in centred world pixels (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub pos: Vec2,
    /// Radius in px
    pub scale: f32,
    pub opacity: f32,
}

/// Which renderer-owned primitive a value is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    HeadCore,
    HeadGlow,
    TrailCore(usize),
    TrailGlow(usize),
}

impl Slot {
    pub fn color(&self) -> &'static str {
        match self {
            Slot::HeadCore => HEAD_CORE_COLOR,
            Slot::HeadGlow => HEAD_GLOW_COLOR,
            Slot::TrailCore(age) | Slot::TrailGlow(age) => TRAIL_PALETTE[age % TRAIL_PALETTE.len()],
        }
    }

    /// Glows are drawn with a soft radial falloff, cores solid
    pub fn is_glow(&self) -> bool {
        matches!(self, Slot::HeadGlow | Slot::TrailGlow(_))
    }
}

/// Drawing backend for the companion
pub trait FrameRenderer {
    /// Viewport size in px
    fn viewport(&self) -> Vec2;
    /// Opacity of the whole layer
    fn set_fade(&mut self, opacity: f32);
    fn set_primitive(&mut self, slot: Slot, primitive: Primitive);
    fn present(&mut self) -> MotionResult<()>;
}

/// Flight path in percent-of-viewport coordinates at time `t` seconds
pub fn flight_path(t: f32) -> Vec2 {
    const S: f32 = 0.15;
    Vec2::new(
        50.0 + 28.0 * (t * S * 3.2).sin() + 10.0 * (t * S * 7.1).sin(),
        48.0 + 18.0 * (t * S * 4.5).sin() + 7.0 * (t * S * 9.3).cos(),
    )
}

/// Percent coordinates (y down) to a centred orthographic world (y up)
pub fn to_world(percent: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        percent.x / 100.0 * viewport.x - viewport.x / 2.0,
        -(percent.y / 100.0 * viewport.y - viewport.y / 2.0),
    )
}

/// Layer opacity `elapsed_ms` after the companion first drew
pub fn layer_fade(elapsed_ms: f64) -> f32 {
    let t = (elapsed_ms - COMPANION_FADE_DELAY_MS) / COMPANION_FADE_MS;
    Ease::OutCubic.apply(t) as f32
}

pub struct ScrollCompanion<R> {
    renderer: R,
    trail: TrailBuffer,
    started_ms: Option<f64>,
    frames: u64,
    running: bool,
}

impl<R: FrameRenderer> ScrollCompanion<R> {
    pub fn new(renderer: R, trail_capacity: usize) -> Self {
        Self {
            renderer,
            trail: TrailBuffer::filled(trail_capacity, OFFSCREEN),
            started_ms: None,
            frames: 0,
            running: true,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn draw_head(&mut self, head: Vec2, t: f32) {
        self.renderer.set_primitive(
            Slot::HeadCore,
            Primitive {
                pos: head,
                scale: 4.0 * (1.0 + (t * 8.0).sin() * 0.2),
                opacity: HEAD_CORE_OPACITY,
            },
        );
        self.renderer.set_primitive(
            Slot::HeadGlow,
            Primitive {
                pos: head,
                scale: 12.0 * (1.0 + (t * 6.0).sin() * 0.3),
                opacity: HEAD_GLOW_OPACITY,
            },
        );
    }

    fn draw_trail(&mut self) {
        let capacity = self.trail.capacity();
        for (age, pos) in self.trail.iter().enumerate() {
            let w = trail_weight(age, capacity);
            self.renderer.set_primitive(
                Slot::TrailCore(age),
                Primitive {
                    pos,
                    scale: w * 5.0,
                    opacity: w * 0.6,
                },
            );
            self.renderer.set_primitive(
                Slot::TrailGlow(age),
                Primitive {
                    pos,
                    scale: w * 10.0,
                    opacity: w * 0.1,
                },
            );
        }
    }
}

impl<R: FrameRenderer> Animator for ScrollCompanion<R> {
    fn tick(&mut self, frame: &Frame) {
        let started = *self.started_ms.get_or_insert(frame.now_ms);
        self.renderer.set_fade(layer_fade(frame.now_ms - started));

        let t = (frame.now_ms / 1000.0) as f32;
        let head = to_world(flight_path(t), self.renderer.viewport());
        self.draw_head(head, t);

        self.frames += 1;
        if self.frames % TRAIL_SAMPLE_STRIDE == 0 {
            self.trail.push(head);
            self.draw_trail();
        }

        if let Err(e) = self.renderer.present() {
            log::error!("Scroll companion stopped: {}", e);
            self.running = false;
        }
    }

    fn is_active(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotionError;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeRenderer {
        slots: HashMap<Slot, Primitive>,
        trail_writes: usize,
        fade: f32,
        presents: usize,
        fail: bool,
    }

    impl FrameRenderer for FakeRenderer {
        fn viewport(&self) -> Vec2 {
            Vec2::new(1000.0, 800.0)
        }

        fn set_fade(&mut self, opacity: f32) {
            self.fade = opacity;
        }

        fn set_primitive(&mut self, slot: Slot, primitive: Primitive) {
            if matches!(slot, Slot::TrailCore(_)) {
                self.trail_writes += 1;
            }
            self.slots.insert(slot, primitive);
        }

        fn present(&mut self) -> MotionResult<()> {
            if self.fail {
                return Err(MotionError::renderer("surface lost"));
            }
            self.presents += 1;
            Ok(())
        }
    }

    fn frame(index: u64) -> Frame {
        Frame {
            now_ms: index as f64 * 16.0,
            dt_ms: 16.0,
            index,
        }
    }

    #[test]
    fn test_flight_path_origin() {
        let p = flight_path(0.0);
        assert!((p.x - 50.0).abs() < 1e-5);
        assert!((p.y - 55.0).abs() < 1e-5);
    }

    #[test]
    fn test_to_world_is_centred_and_flipped() {
        let vp = Vec2::new(1000.0, 800.0);
        assert_eq!(to_world(Vec2::new(50.0, 50.0), vp), Vec2::ZERO);
        assert_eq!(to_world(Vec2::ZERO, vp), Vec2::new(-500.0, 400.0));
        assert_eq!(to_world(Vec2::splat(100.0), vp), Vec2::new(500.0, -400.0));
    }

    #[test]
    fn test_trail_sampled_every_third_frame() {
        let mut companion = ScrollCompanion::new(FakeRenderer::default(), 30);
        for i in 0..9 {
            companion.tick(&frame(i));
        }
        // Three samples, each rewriting all 30 slots
        assert_eq!(companion.renderer().trail_writes, 3 * 30);
        assert_eq!(companion.renderer().presents, 9);
        assert_eq!(companion.trail().len(), 30);
        assert_eq!(companion.trail().get(3), Some(OFFSCREEN));
        assert_ne!(companion.trail().get(2), Some(OFFSCREEN));
    }

    #[test]
    fn test_head_pulse_and_tail_weights() {
        let mut companion = ScrollCompanion::new(FakeRenderer::default(), 30);
        for i in 0..3 {
            companion.tick(&frame(i));
        }
        let slots = &companion.renderer().slots;
        let newest = slots[&Slot::TrailCore(0)];
        assert_eq!(newest.scale, 5.0);
        assert!((newest.opacity - 0.6).abs() < 1e-6);
        let half = slots[&Slot::TrailGlow(15)];
        assert!((half.scale - 2.5).abs() < 1e-5);

        let mut first = ScrollCompanion::new(FakeRenderer::default(), 30);
        first.tick(&frame(0));
        let slots = &first.renderer().slots;
        assert!((slots[&Slot::HeadCore].scale - 4.0).abs() < 1e-6);
        assert!((slots[&Slot::HeadGlow].scale - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_layer_fades_in_after_delay() {
        assert_eq!(layer_fade(0.0), 0.0);
        assert_eq!(layer_fade(600.0), 0.0);
        assert!(layer_fade(1100.0) > 0.5);
        assert_eq!(layer_fade(1600.0), 1.0);
        assert_eq!(layer_fade(10_000.0), 1.0);
    }

    #[test]
    fn test_renderer_failure_stops_loop() {
        let renderer = FakeRenderer {
            fail: true,
            ..FakeRenderer::default()
        };
        let mut companion = ScrollCompanion::new(renderer, 30);
        companion.tick(&frame(0));
        assert!(!companion.is_active());
    }

    #[test]
    fn test_palette_cycles_by_age() {
        assert_eq!(Slot::TrailCore(0).color(), "#fbbf24");
        assert_eq!(Slot::TrailGlow(10).color(), "#fbbf24");
        assert_eq!(Slot::TrailCore(9).color(), "#f472b6");
        assert!(Slot::HeadGlow.is_glow());
        assert!(!Slot::HeadCore.is_glow());
    }
}
