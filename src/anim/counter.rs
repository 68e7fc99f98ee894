//! Eased numeric counters

use serde::{Deserialize, Serialize};

use crate::sched::{Animator, Frame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ease {
    Linear,
    OutCubic,
    OutQuart,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }

    /// Ease-out curve with this exponent; anything but 4 is cubic
    pub fn out_with_exponent(exponent: u8) -> Self {
        match exponent {
            4 => Self::OutQuart,
            _ => Self::OutCubic,
        }
    }
}

/// Value shown `elapsed_ms` into a count from 0 to `target`
pub fn counter_value(target: u32, elapsed_ms: f64, duration_ms: f64, ease: Ease) -> u32 {
    let progress = if duration_ms > 0.0 {
        (elapsed_ms / duration_ms).min(1.0)
    } else {
        1.0
    };
    (ease.apply(progress) * f64::from(target)).round() as u32
}

pub trait CounterSink {
    fn show(&mut self, value: u32);
}

/// Counts up to `target` once, re-rendering every frame until done
pub struct CounterAnimation<S> {
    sink: S,
    target: u32,
    duration_ms: f64,
    ease: Ease,
    started_ms: f64,
    last: Option<u32>,
    done: bool,
}

impl<S: CounterSink> CounterAnimation<S> {
    pub fn new(sink: S, target: u32, duration_ms: f64, ease: Ease, started_ms: f64) -> Self {
        Self {
            sink,
            target,
            duration_ms,
            ease,
            started_ms,
            last: None,
            done: false,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.last
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: CounterSink> Animator for CounterAnimation<S> {
    fn tick(&mut self, frame: &Frame) {
        if self.done {
            return;
        }
        let elapsed = (frame.now_ms - self.started_ms).max(0.0);
        let value = counter_value(self.target, elapsed, self.duration_ms, self.ease);
        self.sink.show(value);
        self.last = Some(value);
        if elapsed >= self.duration_ms {
            self.done = true;
        }
    }

    fn is_active(&self) -> bool {
        !self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Shown(Vec<u32>);

    impl CounterSink for Shown {
        fn show(&mut self, value: u32) {
            self.0.push(value);
        }
    }

    fn at(now_ms: f64) -> Frame {
        Frame {
            now_ms,
            dt_ms: 16.0,
            index: 0,
        }
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::OutCubic, Ease::OutQuart] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(2.0), 1.0);
        }
        assert!(Ease::OutQuart.apply(0.5) > Ease::OutCubic.apply(0.5));
        assert_eq!(Ease::out_with_exponent(4), Ease::OutQuart);
        assert_eq!(Ease::out_with_exponent(3), Ease::OutCubic);
    }

    #[test]
    fn test_counter_value_rounds() {
        // 1 - 0.5^3 = 0.875
        assert_eq!(counter_value(50, 750.0, 1500.0, Ease::OutCubic), 44);
        assert_eq!(counter_value(50, 0.0, 1500.0, Ease::OutCubic), 0);
        assert_eq!(counter_value(50, 9999.0, 1500.0, Ease::OutCubic), 50);
        assert_eq!(counter_value(7, 0.0, 0.0, Ease::OutQuart), 7);
    }

    #[test]
    fn test_counter_renders_every_frame_until_done() {
        let mut counter = CounterAnimation::new(Shown::default(), 120, 1500.0, Ease::OutCubic, 1000.0);
        let mut now = 1000.0;
        while counter.is_active() {
            counter.tick(&at(now));
            now += 16.0;
        }
        let shown = &counter.sink().0;
        // 1500 / 16 = 93.75, so the 95th frame is the first past the end
        assert_eq!(shown.len(), 95);
        assert_eq!(shown.first(), Some(&0));
        assert_eq!(shown.last(), Some(&120));
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));

        counter.tick(&at(now + 1000.0));
        assert_eq!(counter.sink().0.len(), 95);
    }
}
