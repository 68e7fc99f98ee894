//! Magnetic buttons
//!
//! A button leans toward the pointer by a fraction of the pointer's offset
//! from its centre and springs back home when the pointer leaves. The
//! spring only needs frames while it is moving.

use glam::Vec2;

use crate::consts::{
    MAGNET_DAMPING, MAGNET_REST_DELTA, MAGNET_REST_SPEED, MAGNET_STIFFNESS, MAGNET_STRENGTH,
};
use crate::sched::{Animator, Frame};

/// Longest single integration step, in seconds
const MAX_STEP_S: f32 = 0.004;
/// Longer frame gaps (hidden tab, jank) integrate as this much time
const MAX_FRAME_S: f32 = 0.064;

pub trait MagnetSurface {
    /// Translate the element by `offset` px from where it rests
    fn shift(&mut self, offset: Vec2);
}

pub struct MagneticButton<S> {
    surface: S,
    strength: f32,
    target: Vec2,
    offset: Vec2,
    velocity: Vec2,
    settled: bool,
}

impl<S: MagnetSurface> MagneticButton<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            strength: MAGNET_STRENGTH,
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            settled: true,
        }
    }

    /// The pointer is `from_centre` px from the button's centre. Returns
    /// `true` if the spring was resting and needs frames again.
    pub fn pull(&mut self, from_centre: Vec2) -> bool {
        self.retarget(from_centre * self.strength)
    }

    /// Pointer left; spring back home
    pub fn release(&mut self) -> bool {
        self.retarget(Vec2::ZERO)
    }

    fn retarget(&mut self, target: Vec2) -> bool {
        self.target = target;
        let woke = self.settled && target != self.offset;
        if woke {
            self.settled = false;
        }
        woke
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Damped spring, semi-implicit Euler in fixed substeps
    fn integrate(&mut self, dt_s: f32) {
        let mut left = dt_s.clamp(0.0, MAX_FRAME_S);
        while left > 0.0 {
            let h = left.min(MAX_STEP_S);
            let accel =
                (self.target - self.offset) * MAGNET_STIFFNESS - self.velocity * MAGNET_DAMPING;
            self.velocity += accel * h;
            self.offset += self.velocity * h;
            left -= h;
        }
    }

    fn at_rest(&self) -> bool {
        self.offset.distance(self.target) < MAGNET_REST_DELTA
            && self.velocity.length() < MAGNET_REST_SPEED
    }
}

impl<S: MagnetSurface> Animator for MagneticButton<S> {
    fn tick(&mut self, frame: &Frame) {
        if self.settled {
            return;
        }
        self.integrate((frame.dt_ms / 1000.0) as f32);
        if self.at_rest() {
            self.offset = self.target;
            self.velocity = Vec2::ZERO;
            self.settled = true;
        }
        self.surface.shift(self.offset);
    }

    fn is_active(&self) -> bool {
        !self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::{AnimatorHandle, FrameScheduler};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Shifts(Vec<Vec2>);

    impl MagnetSurface for Shifts {
        fn shift(&mut self, offset: Vec2) {
            self.0.push(offset);
        }
    }

    type Button = Rc<RefCell<MagneticButton<Shifts>>>;

    /// Run 16 ms frames until the scheduler empties; returns frames run
    fn settle(sched: &mut FrameScheduler, start_ms: f64) -> usize {
        let mut frames = 0;
        while !sched.is_empty() && frames < 1000 {
            sched.run_frame(start_ms + frames as f64 * 16.0);
            frames += 1;
        }
        frames
    }

    fn button() -> (Button, AnimatorHandle) {
        let button = Rc::new(RefCell::new(MagneticButton::new(Shifts::default())));
        let handle: AnimatorHandle = button.clone();
        (button, handle)
    }

    #[test]
    fn test_spring_settles_on_target_then_goes_idle() {
        let (button, handle) = button();
        let mut sched = FrameScheduler::new();

        assert!(button.borrow_mut().pull(Vec2::new(100.0, -50.0)));
        assert_eq!(button.borrow().target(), Vec2::new(30.0, -15.0));
        sched.ensure_registered("magnetic", &handle);

        let frames = settle(&mut sched, 0.0);
        assert!(frames < 120, "took {frames} frames");
        assert_eq!(button.borrow().offset(), Vec2::new(30.0, -15.0));
        assert_eq!(button.borrow().surface().0.last(), Some(&Vec2::new(30.0, -15.0)));

        // Resting: further frames place nothing
        let placed = button.borrow().surface().0.len();
        sched.ensure_registered("magnetic", &handle);
        sched.run_frame(99_999.0);
        assert_eq!(button.borrow().surface().0.len(), placed);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let (button, handle) = button();
        let mut sched = FrameScheduler::new();
        button.borrow_mut().pull(Vec2::new(100.0, 0.0));
        sched.ensure_registered("magnetic", &handle);
        settle(&mut sched, 0.0);

        let peak = button
            .borrow()
            .surface()
            .0
            .iter()
            .map(|p| p.x)
            .fold(f32::MIN, f32::max);
        assert!(peak > 30.0, "peak {peak}");
        assert!(peak < 33.0, "peak {peak}");
    }

    #[test]
    fn test_release_springs_home() {
        let (button, handle) = button();
        let mut sched = FrameScheduler::new();
        button.borrow_mut().pull(Vec2::new(40.0, 40.0));
        sched.ensure_registered("magnetic", &handle);
        // Leaves before the pull finished: already moving, no new frame needed
        sched.run_frame(0.0);
        sched.run_frame(16.0);
        assert!(!button.borrow_mut().release());
        settle(&mut sched, 32.0);
        assert_eq!(button.borrow().offset(), Vec2::ZERO);

        // Releasing again at home stays idle
        assert!(!button.borrow_mut().release());
        assert!(!button.borrow().is_active());
    }

    #[test]
    fn test_long_frame_gap_stays_bounded() {
        let mut button = MagneticButton::new(Shifts::default());
        button.pull(Vec2::new(100.0, 0.0));
        button.tick(&Frame {
            now_ms: 60_000.0,
            dt_ms: 60_000.0,
            index: 1,
        });
        let x = button.offset().x;
        assert!(x.is_finite());
        assert!(x > 0.0 && x < 30.0, "x {x}");
    }
}
