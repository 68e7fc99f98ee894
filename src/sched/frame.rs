//! Frame clock scheduler
//!
//! A minimal stand-in for `requestAnimationFrame` bookkeeping: animators are
//! registered, ticked in registration order once per frame, and dropped as
//! soon as they report themselves inactive.

use std::cell::RefCell;
use std::rc::Rc;

use crate::consts::DEFAULT_FRAME_MS;

/// Timing for one repaint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frame clock timestamp (same timebase as `performance.now()`)
    pub now_ms: f64,
    /// Time since the previous frame the scheduler ran
    pub dt_ms: f64,
    /// Frames run since the scheduler was created
    pub index: u64,
}

/// Something that updates continuously-varying visual state each frame
pub trait Animator {
    fn tick(&mut self, frame: &Frame);

    /// `false` once further ticks would not be observable
    fn is_active(&self) -> bool;
}

pub type AnimatorHandle = Rc<RefCell<dyn Animator>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

struct Entry {
    token: FrameToken,
    label: &'static str,
    animator: AnimatorHandle,
}

fn same_animator(a: &AnimatorHandle, b: &AnimatorHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// The set of animators waiting for the next frame
#[derive(Default)]
pub struct FrameScheduler {
    entries: Vec<Entry>,
    next_token: u64,
    last_frame_ms: Option<f64>,
    frames_run: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an animator for every frame until it goes inactive
    pub fn register(&mut self, label: &'static str, animator: AnimatorHandle) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        log::debug!("frame: register {} ({:?})", label, token);
        self.entries.push(Entry {
            token,
            label,
            animator,
        });
        token
    }

    /// Register unless this exact animator is already scheduled
    pub fn ensure_registered(
        &mut self,
        label: &'static str,
        animator: &AnimatorHandle,
    ) -> FrameToken {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| same_animator(&e.animator, animator))
        {
            return entry.token;
        }
        self.register(label, animator.clone())
    }

    pub fn cancel(&mut self, token: FrameToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("frame: cancel {} animators", self.entries.len());
        }
        self.entries.clear();
        self.last_frame_ms = None;
    }

    pub fn is_registered(&self, token: FrameToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels of scheduled animators, in tick order
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.label).collect()
    }

    /// Run one frame; returns how many animators were ticked
    pub fn run_frame(&mut self, now_ms: f64) -> usize {
        let dt_ms = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => DEFAULT_FRAME_MS,
        };
        let frame = Frame {
            now_ms,
            dt_ms,
            index: self.frames_run,
        };
        self.frames_run += 1;

        for entry in &self.entries {
            entry.animator.borrow_mut().tick(&frame);
        }
        let ticked = self.entries.len();

        self.entries.retain(|e| {
            let active = e.animator.borrow().is_active();
            if !active {
                log::debug!("frame: {} went idle", e.label);
            }
            active
        });

        // Idle schedulers restart their delta clock on the next wake-up
        self.last_frame_ms = if self.entries.is_empty() {
            None
        } else {
            Some(now_ms)
        };

        ticked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown {
        remaining: u32,
        ticks: u32,
        last_dt: f64,
        order: Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
    }

    impl Countdown {
        fn handle(remaining: u32, name: &'static str, order: &Rc<RefCell<Vec<&'static str>>>) -> Rc<RefCell<Countdown>> {
            Rc::new(RefCell::new(Countdown {
                remaining,
                ticks: 0,
                last_dt: 0.0,
                order: order.clone(),
                name,
            }))
        }
    }

    impl Animator for Countdown {
        fn tick(&mut self, frame: &Frame) {
            self.ticks += 1;
            self.last_dt = frame.dt_ms;
            self.remaining = self.remaining.saturating_sub(1);
            self.order.borrow_mut().push(self.name);
        }

        fn is_active(&self) -> bool {
            self.remaining > 0
        }
    }

    #[test]
    fn test_inactive_animators_are_dropped() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let short = Countdown::handle(1, "short", &order);
        let long = Countdown::handle(3, "long", &order);
        let mut sched = FrameScheduler::new();
        sched.register("short", short.clone());
        sched.register("long", long.clone());

        assert_eq!(sched.run_frame(0.0), 2);
        assert_eq!(sched.labels(), vec!["long"]);
        sched.run_frame(16.0);
        sched.run_frame(32.0);
        assert!(sched.is_empty());
        assert_eq!(sched.run_frame(48.0), 0);

        assert_eq!(short.borrow().ticks, 1);
        assert_eq!(long.borrow().ticks, 3);
    }

    #[test]
    fn test_ticks_follow_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut sched = FrameScheduler::new();
        sched.register("a", Countdown::handle(2, "a", &order));
        sched.register("b", Countdown::handle(2, "b", &order));
        sched.run_frame(0.0);
        sched.run_frame(16.0);
        assert_eq!(*order.borrow(), vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn test_ensure_registered_never_doubles_up() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let anim = Countdown::handle(5, "glow", &order);
        let handle: AnimatorHandle = anim.clone();
        let mut sched = FrameScheduler::new();

        let first = sched.ensure_registered("glow", &handle);
        let second = sched.ensure_registered("glow", &handle);
        assert_eq!(first, second);
        assert_eq!(sched.len(), 1);

        sched.run_frame(0.0);
        assert_eq!(anim.borrow().ticks, 1);
    }

    #[test]
    fn test_cancel_removes_only_that_token() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut sched = FrameScheduler::new();
        let a = sched.register("a", Countdown::handle(5, "a", &order));
        let b = sched.register("b", Countdown::handle(5, "b", &order));
        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));
        assert!(!sched.is_registered(a));
        assert!(sched.is_registered(b));
    }

    #[test]
    fn test_delta_resets_after_idle() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let anim = Countdown::handle(2, "a", &order);
        let mut sched = FrameScheduler::new();
        sched.register("a", anim.clone());

        sched.run_frame(100.0);
        assert_eq!(anim.borrow().last_dt, DEFAULT_FRAME_MS);
        sched.run_frame(120.0);
        assert_eq!(anim.borrow().last_dt, 20.0);
        assert!(sched.is_empty());

        // Woken much later: no giant delta
        anim.borrow_mut().remaining = 1;
        sched.register("a", anim.clone());
        sched.run_frame(10_000.0);
        assert_eq!(anim.borrow().last_dt, DEFAULT_FRAME_MS);
    }
}
