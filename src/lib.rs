//! Folio Motion - loading sequencer and frame-driven effects for a portfolio landing page
//!
//! Core modules:
//! - `loading`: Readiness tracking and the resource-gated loading screen
//! - `sched`: Frame clock scheduler and virtual timers
//! - `anim`: Frame-driven animators (cursor glow, magnetic buttons, particles, companion comet, counters)
//! - `scroll`: Frame-throttled scroll coordination and active-section detection
//! - `reveal`: One-shot viewport reveal triggers
//! - `renderer`: WebGPU backend for the scroll companion
//! - `platform`: Browser DOM adapters

pub mod anim;
pub mod error;
pub mod icons;
pub mod loading;
pub mod platform;
pub mod renderer;
pub mod reveal;
pub mod sched;
pub mod scroll;
pub mod settings;
pub mod shared;

pub use error::{MotionError, MotionResult};
pub use settings::{QualityPreset, Settings};
pub use shared::{PointerState, ScrollLock, ScrollLockGuard};

/// Site-wide motion constants
pub mod consts {
    /// Fallback frame delta (60 Hz) when there is no previous frame
    pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Loading screen timing
    pub const MIN_DISPLAY_MS: f64 = 1800.0;
    pub const SETTLE_DELAY_MS: f64 = 400.0;
    pub const PROGRESS_TICK_MS: f64 = 60.0;
    /// Time-based progress curve reaches its cap after this long
    pub const PROGRESS_CURVE_MS: f64 = 2500.0;
    pub const PROGRESS_CURVE_CAP: f64 = 85.0;

    /// Progress checkpoints raised by each readiness signal
    pub const FONTS_CHECKPOINT: u8 = 40;
    pub const PAGE_LOAD_CHECKPOINT: u8 = 75;
    pub const MIN_TIME_CHECKPOINT: u8 = 90;

    /// Floors the progress ticker applies from the readiness flags
    pub const TICK_FONTS_FLOOR: f64 = 40.0;
    pub const TICK_PAGE_LOAD_FLOOR: f64 = 70.0;
    pub const TICK_MIN_TIME_FLOOR: f64 = 88.0;
    pub const TICK_FONTS_AND_LOAD_FLOOR: f64 = 92.0;

    /// Cursor glow smoothing
    pub const GLOW_DAMPING: f32 = 0.08;
    pub const GLOW_EPSILON: f32 = 0.5;

    /// Magnetic buttons: pull toward the pointer, then spring back
    pub const MAGNET_STRENGTH: f32 = 0.3;
    pub const MAGNET_STIFFNESS: f32 = 200.0;
    pub const MAGNET_DAMPING: f32 = 20.0;
    /// Rest when within this many px of the target and slower than the
    /// rest speed (px/s)
    pub const MAGNET_REST_DELTA: f32 = 0.01;
    pub const MAGNET_REST_SPEED: f32 = 2.0;

    /// Tilt cards
    pub const TILT_PERSPECTIVE_PX: f32 = 800.0;
    pub const TILT_MAX_DEG: f32 = 10.0;
    pub const TILT_HOVER_SCALE: f32 = 1.02;

    /// Particle field
    pub const REPEL_RADIUS: f32 = 150.0;
    pub const REPEL_STRENGTH: f32 = 0.15;
    pub const PARTICLE_DAMPING: f32 = 0.99;
    /// Connection lines are drawn under this distance (80 px)
    pub const LINK_DISTANCE: f32 = 80.0;
    pub const LINK_DISTANCE_SQ: f32 = LINK_DISTANCE * LINK_DISTANCE;
    pub const LINK_MAX_ALPHA: f32 = 0.08;
    /// One of every N frames does real work
    pub const VISIBLE_TICK_STRIDE: u64 = 2;
    pub const HIDDEN_TICK_STRIDE: u64 = 4;
    /// One particle per this many px of viewport width
    pub const PARTICLE_SPACING_PX: f32 = 25.0;

    /// Scroll companion
    pub const TRAIL_CAPACITY: usize = 30;
    pub const TRAIL_SAMPLE_STRIDE: u64 = 3;
    pub const COMPANION_FADE_DELAY_MS: f64 = 600.0;
    pub const COMPANION_FADE_MS: f64 = 1000.0;

    /// Scroll chrome
    pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;
    pub const ACTIVE_SECTION_OFFSET_PX: f64 = 200.0;
    pub const SCROLL_TOP_THRESHOLD_PX: f64 = 400.0;
    /// Anchor jumps stop this far above the section so the navbar clears it
    pub const NAV_CLEARANCE_PX: f64 = 20.0;
}

/// Wrap a coordinate into `[0, size]` by re-entering at the opposite edge
#[inline]
pub fn wrap_coord(v: f32, size: f32) -> f32 {
    if v < 0.0 {
        size
    } else if v > size {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord_reenters_opposite_edge() {
        assert_eq!(wrap_coord(800.0 + 0.3, 800.0), 0.0);
        assert_eq!(wrap_coord(-0.3, 800.0), 800.0);
        assert_eq!(wrap_coord(400.0, 800.0), 400.0);
        // Exactly on the edge stays put
        assert_eq!(wrap_coord(800.0, 800.0), 800.0);
    }
}
