//! Readiness flags and the high-water-mark progress value

use crate::consts::*;

/// One precondition for ending the loading sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    /// `document.fonts.ready` resolved
    Fonts,
    /// Window `load` fired (all sub-resources resolved)
    PageLoad,
    /// Minimum display timer expired
    MinTime,
}

impl Readiness {
    pub const ALL: [Readiness; 3] = [Readiness::Fonts, Readiness::PageLoad, Readiness::MinTime];

    /// Progress floor raised when this signal arrives
    pub fn checkpoint(self) -> u8 {
        match self {
            Readiness::Fonts => FONTS_CHECKPOINT,
            Readiness::PageLoad => PAGE_LOAD_CHECKPOINT,
            Readiness::MinTime => MIN_TIME_CHECKPOINT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Readiness::Fonts => "fonts",
            Readiness::PageLoad => "page-load",
            Readiness::MinTime => "min-time",
        }
    }
}

/// The three readiness flags. A flag never reverts once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessState {
    fonts_ready: bool,
    page_loaded: bool,
    min_time_elapsed: bool,
}

impl ReadinessState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag; returns `true` only the first time
    pub fn mark(&mut self, which: Readiness) -> bool {
        let flag = match which {
            Readiness::Fonts => &mut self.fonts_ready,
            Readiness::PageLoad => &mut self.page_loaded,
            Readiness::MinTime => &mut self.min_time_elapsed,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }

    pub fn is_ready(&self, which: Readiness) -> bool {
        match which {
            Readiness::Fonts => self.fonts_ready,
            Readiness::PageLoad => self.page_loaded,
            Readiness::MinTime => self.min_time_elapsed,
        }
    }

    pub fn all_ready(&self) -> bool {
        self.fonts_ready && self.page_loaded && self.min_time_elapsed
    }

    pub fn ready_count(&self) -> usize {
        Readiness::ALL.iter().filter(|r| self.is_ready(**r)).count()
    }

    /// Floor the periodic ticker applies on top of the time curve
    pub fn ticker_floor(&self) -> f64 {
        let mut floor: f64 = 0.0;
        if self.fonts_ready {
            floor = floor.max(TICK_FONTS_FLOOR);
        }
        if self.page_loaded {
            floor = floor.max(TICK_PAGE_LOAD_FLOOR);
        }
        if self.min_time_elapsed {
            floor = floor.max(TICK_MIN_TIME_FLOOR);
        }
        if self.fonts_ready && self.page_loaded {
            floor = floor.max(TICK_FONTS_AND_LOAD_FLOOR);
        }
        floor
    }
}

/// Loading progress in `[0, 100]`, only ever raised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgressValue(u8);

impl ProgressValue {
    pub const COMPLETE: u8 = 100;

    pub fn get(self) -> u8 {
        self.0
    }

    /// `self = max(self, candidate)`; returns whether the value moved
    pub fn raise(&mut self, candidate: u8) -> bool {
        let candidate = candidate.min(Self::COMPLETE);
        if candidate > self.0 {
            self.0 = candidate;
            true
        } else {
            false
        }
    }

    pub fn complete(&mut self) -> bool {
        self.raise(Self::COMPLETE)
    }

    pub fn is_complete(self) -> bool {
        self.0 >= Self::COMPLETE
    }
}

/// Time-based progress: linear up to `PROGRESS_CURVE_CAP` over
/// `PROGRESS_CURVE_MS`, never reaching 100 on its own
pub fn time_curve(elapsed_ms: f64) -> f64 {
    if elapsed_ms <= 0.0 {
        return 0.0;
    }
    (elapsed_ms / PROGRESS_CURVE_MS * PROGRESS_CURVE_CAP).min(PROGRESS_CURVE_CAP)
}
