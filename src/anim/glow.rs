//! Cursor glow
//!
//! A soft glow that trails the pointer with exponential damping. It only
//! needs frames while catching up: once settled within `GLOW_EPSILON` on
//! both axes it goes idle until the pointer moves again.

use glam::Vec2;

use crate::consts::{GLOW_DAMPING, GLOW_EPSILON};
use crate::sched::{Animator, Frame};

pub trait GlowSurface {
    /// Move the glow's centre to `pos` (viewport px)
    fn place(&mut self, pos: Vec2);
}

pub struct CursorGlow<S> {
    surface: S,
    target: Vec2,
    smoothed: Vec2,
    settled: bool,
}

impl<S: GlowSurface> CursorGlow<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            target: Vec2::ZERO,
            smoothed: Vec2::ZERO,
            settled: true,
        }
    }

    /// Pointer moved. Returns `true` if the glow was idle and now needs
    /// frames again.
    pub fn set_target(&mut self, target: Vec2) -> bool {
        self.target = target;
        let woke = self.settled;
        self.settled = false;
        woke
    }

    pub fn position(&self) -> Vec2 {
        self.smoothed
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: GlowSurface> Animator for CursorGlow<S> {
    fn tick(&mut self, _frame: &Frame) {
        if self.settled {
            return;
        }
        self.smoothed += (self.target - self.smoothed) * GLOW_DAMPING;
        self.surface.place(self.smoothed);

        let gap = (self.target - self.smoothed).abs();
        if gap.x < GLOW_EPSILON && gap.y < GLOW_EPSILON {
            self.settled = true;
        }
    }

    fn is_active(&self) -> bool {
        !self.settled
    }
}
