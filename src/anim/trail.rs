//! Fixed-length trail history

use std::collections::VecDeque;

use glam::Vec2;

/// Parking spot for samples that have not been recorded yet (far off-screen)
pub const OFFSCREEN: Vec2 = Vec2::splat(9999.0);

/// Visual weight of the sample `age` steps behind the head: `(1 - age/cap)^2`
pub fn trail_weight(age: usize, capacity: usize) -> f32 {
    if capacity == 0 || age >= capacity {
        return 0.0;
    }
    let fade = 1.0 - age as f32 / capacity as f32;
    fade * fade
}

/// Position history, newest first. Length never exceeds the capacity;
/// when built with [`TrailBuffer::filled`] it is constant.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    samples: VecDeque<Vec2>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Full buffer of `sentinel` samples
    pub fn filled(capacity: usize, sentinel: Vec2) -> Self {
        Self {
            samples: std::iter::repeat_n(sentinel, capacity).collect(),
            capacity,
        }
    }

    /// Record a new head sample, dropping the oldest when full
    pub fn push(&mut self, pos: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_back();
        }
        self.samples.push_front(pos);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample `age` steps old (0 = newest)
    pub fn get(&self, age: usize) -> Option<Vec2> {
        self.samples.get(age).copied()
    }

    /// Newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent_in_age_order() {
        let mut trail = TrailBuffer::new(30);
        for i in 1..=35 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 30);
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        let expected: Vec<f32> = (6..=35).rev().map(|i| i as f32).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_filled_length_is_constant() {
        let mut trail = TrailBuffer::filled(4, OFFSCREEN);
        assert_eq!(trail.len(), 4);
        trail.push(Vec2::ONE);
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.get(0), Some(Vec2::ONE));
        assert_eq!(trail.get(3), Some(OFFSCREEN));
        assert_eq!(trail.get(4), None);
    }

    #[test]
    fn test_weight_falls_off_quadratically() {
        assert_eq!(trail_weight(0, 30), 1.0);
        assert!((trail_weight(15, 30) - 0.25).abs() < 1e-6);
        assert_eq!(trail_weight(30, 30), 0.0);
        assert!(trail_weight(29, 30) > 0.0);
        assert_eq!(trail_weight(0, 0), 0.0);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut trail = TrailBuffer::new(0);
        trail.push(Vec2::ONE);
        assert!(trail.is_empty());
    }
}
