//! Virtual timers
//!
//! `setTimeout`/`setInterval` equivalents kept in plain data so their owner
//! can cancel all of them at once and tests can replay exact timelines.
//! Timers fire from `pop_due`, never by themselves.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<K> {
    id: TimerId,
    kind: K,
    due_ms: f64,
    period_ms: Option<f64>,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    /// When the timer was scheduled to fire (not when it was pumped)
    pub at_ms: f64,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    timers: Vec<Timer<K>>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timeout(&mut self, now_ms: f64, delay_ms: f64, kind: K) -> TimerId {
        self.push(now_ms + delay_ms.max(0.0), None, kind)
    }

    /// Repeating timer; a non-positive period is clamped to 1 ms
    pub fn set_interval(&mut self, now_ms: f64, period_ms: f64, kind: K) -> TimerId {
        let period = period_ms.max(1.0);
        self.push(now_ms + period, Some(period), kind)
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            due_ms,
            period_ms,
        });
        id
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn next_due(&self) -> Option<f64> {
        self.timers.iter().map(|t| t.due_ms).reduce(f64::min)
    }

    /// Take the earliest timer due at or before `now_ms`.
    ///
    /// Ties fire in creation order. An interval fires once per call and is
    /// rescheduled to its first period boundary after `now_ms`; periods that
    /// were missed entirely are skipped.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Fired<K>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        let fired = Fired {
            id: timer.id,
            kind: timer.kind,
            at_ms: timer.due_ms,
        };

        let period = timer.period_ms;
        match period {
            Some(period) => {
                if timer.due_ms <= now_ms {
                    let missed = ((now_ms - timer.due_ms) / period).floor();
                    timer.due_ms += missed * period + period;
                }
            }
            None => {
                self.timers.remove(idx);
            }
        }

        Some(fired)
    }
}
