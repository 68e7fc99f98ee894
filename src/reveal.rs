//! One-shot viewport reveals
//!
//! Each observed element starts `Pending`, moves to `Triggered` the first
//! time it is sufficiently visible, and to `Detached` once its observer has
//! let go of it. Observers can deliver several entries before unobserve
//! takes effect; only the first one starts the effect.

use std::collections::HashMap;
use std::hash::Hash;

use crate::anim::counter::Ease;
use crate::settings::RevealSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Triggered,
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealEffect {
    /// Fade/slide-in transition
    Entrance,
    /// Count from 0 to `target`
    Counter {
        target: u32,
        duration_ms: f64,
        ease: Ease,
    },
}

/// Intersection observer configuration for one kind of reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    /// Pulled in from the viewport's bottom edge
    pub root_margin_bottom_px: f64,
}

impl RevealOptions {
    pub fn entrance(settings: &RevealSettings) -> Self {
        Self {
            threshold: settings.entrance_threshold,
            root_margin_bottom_px: settings.entrance_margin_px,
        }
    }

    pub fn counter(settings: &RevealSettings) -> Self {
        Self {
            threshold: settings.counter_threshold,
            root_margin_bottom_px: 0.0,
        }
    }

    /// CSS `rootMargin` string
    pub fn root_margin(&self) -> String {
        if self.root_margin_bottom_px == 0.0 {
            return "0px".to_owned();
        }
        format!("0px 0px -{}px 0px", self.root_margin_bottom_px)
    }
}

/// The parts of an intersection entry a reveal cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl Intersection {
    /// Observers report ratios a hair under the threshold they fired for
    const RATIO_SLACK: f64 = 1e-3;

    pub fn qualifies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio + Self::RATIO_SLACK >= threshold
    }
}

#[derive(Debug)]
struct Target {
    state: RevealState,
    effect: RevealEffect,
    options: RevealOptions,
}

/// Reveal bookkeeping keyed by element identity
#[derive(Debug)]
pub struct RevealController<K> {
    targets: HashMap<K, Target>,
}

impl<K> Default for RevealController<K> {
    fn default() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> RevealController<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `key`. Registering the same key twice keeps the
    /// first registration and returns `false`.
    pub fn register(&mut self, key: K, effect: RevealEffect, options: RevealOptions) -> bool {
        if self.targets.contains_key(&key) {
            return false;
        }
        self.targets.insert(
            key,
            Target {
                state: RevealState::Pending,
                effect,
                options,
            },
        );
        true
    }

    /// An intersection entry arrived. Returns the effect to start the first
    /// time the target qualifies, `None` every other time.
    pub fn on_intersection(&mut self, key: &K, entry: Intersection) -> Option<RevealEffect> {
        let target = self.targets.get_mut(key)?;
        if target.state != RevealState::Pending || !entry.qualifies(target.options.threshold) {
            return None;
        }
        target.state = RevealState::Triggered;
        log::debug!("Reveal triggered: {:?} ({:?})", key, target.effect);
        Some(target.effect)
    }

    /// The observer no longer watches `key`. Pending targets detached this
    /// way never trigger.
    pub fn detach(&mut self, key: &K) {
        if let Some(target) = self.targets.get_mut(key) {
            target.state = RevealState::Detached;
        }
    }

    pub fn detach_all(&mut self) {
        for target in self.targets.values_mut() {
            target.state = RevealState::Detached;
        }
    }

    pub fn state(&self, key: &K) -> Option<RevealState> {
        self.targets.get(key).map(|t| t.state)
    }

    pub fn options(&self, key: &K) -> Option<RevealOptions> {
        self.targets.get(key).map(|t| t.options)
    }

    pub fn count(&self, state: RevealState) -> usize {
        self.targets.values().filter(|t| t.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE: Intersection = Intersection {
        is_intersecting: true,
        ratio: 0.6,
    };

    fn counter() -> RevealEffect {
        RevealEffect::Counter {
            target: 50,
            duration_ms: 1500.0,
            ease: Ease::OutCubic,
        }
    }

    #[test]
    fn test_repeated_entries_trigger_once() {
        let settings = RevealSettings::default();
        let mut reveals = RevealController::new();
        reveals.register("stat-1", counter(), RevealOptions::counter(&settings));

        let started: Vec<_> = (0..5)
            .filter_map(|_| reveals.on_intersection(&"stat-1", VISIBLE))
            .collect();
        assert_eq!(started, vec![counter()]);
        assert_eq!(reveals.state(&"stat-1"), Some(RevealState::Triggered));

        reveals.detach(&"stat-1");
        assert_eq!(reveals.on_intersection(&"stat-1", VISIBLE), None);
        assert_eq!(reveals.state(&"stat-1"), Some(RevealState::Detached));
    }

    #[test]
    fn test_threshold_and_intersecting_flag() {
        let settings = RevealSettings::default();
        let mut reveals = RevealController::new();
        reveals.register(1u32, counter(), RevealOptions::counter(&settings));

        let barely = Intersection {
            is_intersecting: true,
            ratio: 0.2,
        };
        assert_eq!(reveals.on_intersection(&1, barely), None);
        let leaving = Intersection {
            is_intersecting: false,
            ratio: 0.9,
        };
        assert_eq!(reveals.on_intersection(&1, leaving), None);
        assert_eq!(reveals.state(&1), Some(RevealState::Pending));

        let at_threshold = Intersection {
            is_intersecting: true,
            ratio: 0.4995,
        };
        assert_eq!(reveals.on_intersection(&1, at_threshold), Some(counter()));
    }

    #[test]
    fn test_unknown_and_duplicate_keys() {
        let settings = RevealSettings::default();
        let mut reveals = RevealController::new();
        assert!(reveals.register("a", RevealEffect::Entrance, RevealOptions::entrance(&settings)));
        assert!(!reveals.register("a", counter(), RevealOptions::counter(&settings)));
        assert_eq!(reveals.on_intersection(&"a", VISIBLE), Some(RevealEffect::Entrance));
        assert_eq!(reveals.on_intersection(&"missing", VISIBLE), None);
        assert_eq!(reveals.len(), 1);
    }

    #[test]
    fn test_detached_pending_never_triggers() {
        let settings = RevealSettings::default();
        let mut reveals = RevealController::new();
        for key in ["a", "b", "c"] {
            reveals.register(key, RevealEffect::Entrance, RevealOptions::entrance(&settings));
        }
        reveals.on_intersection(&"a", VISIBLE);
        reveals.detach_all();
        assert_eq!(reveals.count(RevealState::Detached), 3);
        assert_eq!(reveals.on_intersection(&"b", VISIBLE), None);
    }

    #[test]
    fn test_root_margin_strings() {
        let settings = RevealSettings::default();
        assert_eq!(RevealOptions::entrance(&settings).root_margin(), "0px 0px -40px 0px");
        assert_eq!(RevealOptions::counter(&settings).root_margin(), "0px");
    }
}
