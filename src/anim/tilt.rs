//! Tilt cards
//!
//! Cards lean toward the pointer in 3D. There is no state to animate: every
//! pointer move yields the next transform and a CSS transition eases it.

use glam::Vec2;

use crate::consts::{TILT_HOVER_SCALE, TILT_MAX_DEG, TILT_PERSPECTIVE_PX};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub scale: f32,
}

impl Tilt {
    /// Flat and unscaled, for when the pointer leaves
    pub const REST: Tilt = Tilt {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
    };

    /// `local` is the pointer relative to the card's top-left corner
    pub fn from_pointer(local: Vec2, size: Vec2) -> Self {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Self::REST;
        }
        let t = (local / size).clamp(Vec2::ZERO, Vec2::ONE);
        Self {
            rotate_x_deg: (0.5 - t.y) * TILT_MAX_DEG,
            rotate_y_deg: (t.x - 0.5) * TILT_MAX_DEG,
            scale: TILT_HOVER_SCALE,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "perspective({}px) rotateY({}deg) rotateX({}deg) scale3d({s}, {s}, {s})",
            TILT_PERSPECTIVE_PX,
            self.rotate_y_deg,
            self.rotate_x_deg,
            s = self.scale
        )
    }
}
