//! Loading sequencer state machine
//!
//! Tracks the readiness signals, keeps the progress high-water mark, and
//! decides the single moment the loading surface goes away. The page scroll
//! lock is held from `start` until dismissal or teardown, whichever comes
//! first.

use super::readiness::{ProgressValue, Readiness, ReadinessState, time_curve};
use crate::settings::LoadingSettings;
use crate::shared::{ScrollLock, ScrollLockGuard};

/// Dash length of the progress ring (circumference of r=45)
pub const RING_CIRCUMFERENCE: f64 = 283.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingPhase {
    /// Waiting on readiness signals
    Loading,
    /// Progress hit 100, waiting out the settle delay
    Settling { since_ms: f64 },
    /// Loading surface hidden, scrolling restored
    Dismissed,
    /// Owner went away before dismissal
    TornDown,
}

/// Something observable happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Progress moved to this value
    Progress(u8),
    /// All signals are in; progress is 100 and the settle delay started
    Completed,
    /// Settle delay elapsed; hide the loading surface
    Dismissed,
}

/// What the loading surface shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingView {
    pub percent: u8,
    pub status: &'static str,
    /// `stroke-dashoffset` for the progress ring
    pub ring_dash_offset: f64,
    pub visible: bool,
}

pub fn status_text(percent: u8) -> &'static str {
    match percent {
        0..40 => "Loading fonts...",
        40..75 => "Preparing assets...",
        75..100 => "Almost ready...",
        _ => "Launching...",
    }
}

pub fn ring_dash_offset(percent: u8) -> f64 {
    let p = f64::from(percent.min(100));
    RING_CIRCUMFERENCE - p / 100.0 * RING_CIRCUMFERENCE
}

#[derive(Debug)]
pub struct LoadingSequencer {
    settings: LoadingSettings,
    started_ms: f64,
    readiness: ReadinessState,
    progress: ProgressValue,
    phase: LoadingPhase,
    lock: Option<ScrollLockGuard>,
}

impl LoadingSequencer {
    /// Start a loading sequence and freeze page scrolling
    pub fn start(now_ms: f64, settings: LoadingSettings, scroll_lock: &ScrollLock) -> Self {
        log::info!(
            "Loading sequence started (min display {} ms)",
            settings.min_display_ms
        );
        Self {
            settings,
            started_ms: now_ms,
            readiness: ReadinessState::new(),
            progress: ProgressValue::default(),
            phase: LoadingPhase::Loading,
            lock: Some(scroll_lock.acquire()),
        }
    }

    pub fn settings(&self) -> &LoadingSettings {
        &self.settings
    }

    pub fn started_ms(&self) -> f64 {
        self.started_ms
    }

    pub fn readiness(&self) -> &ReadinessState {
        &self.readiness
    }

    pub fn progress(&self) -> u8 {
        self.progress.get()
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn holds_scroll_lock(&self) -> bool {
        self.lock.is_some()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, LoadingPhase::Dismissed | LoadingPhase::TornDown)
    }

    /// A readiness signal arrived. Repeats are ignored.
    pub fn signal(&mut self, which: Readiness, now_ms: f64) -> Option<SequencerEvent> {
        if self.is_finished() {
            return None;
        }
        if !self.readiness.mark(which) {
            return None;
        }
        log::info!(
            "Readiness: {} ({}/3) at {:.0} ms",
            which.as_str(),
            self.readiness.ready_count(),
            now_ms - self.started_ms
        );

        let moved = self.progress.raise(which.checkpoint());
        // Whichever signal lands last triggers completion
        self.try_complete(now_ms)
            .or_else(|| moved.then(|| SequencerEvent::Progress(self.progress.get())))
    }

    /// Periodic progress tick: time curve plus readiness floors
    pub fn tick(&mut self, now_ms: f64) -> Option<SequencerEvent> {
        if self.phase != LoadingPhase::Loading {
            return None;
        }
        let elapsed = now_ms - self.started_ms;
        let base = time_curve(elapsed).max(self.readiness.ticker_floor());
        self.progress
            .raise(base.floor() as u8)
            .then(|| SequencerEvent::Progress(self.progress.get()))
    }

    fn try_complete(&mut self, now_ms: f64) -> Option<SequencerEvent> {
        if self.phase != LoadingPhase::Loading || !self.readiness.all_ready() {
            return None;
        }
        self.begin_settle(now_ms)
    }

    fn begin_settle(&mut self, now_ms: f64) -> Option<SequencerEvent> {
        self.progress.complete();
        self.phase = LoadingPhase::Settling { since_ms: now_ms };
        log::info!(
            "Loading complete at {:.0} ms, dismissing in {} ms",
            now_ms - self.started_ms,
            self.settings.settle_ms
        );
        Some(SequencerEvent::Completed)
    }

    /// Give up waiting on the missing signals (only with `max_wait_ms`)
    pub fn force_complete(&mut self, now_ms: f64) -> Option<SequencerEvent> {
        if self.phase != LoadingPhase::Loading {
            return None;
        }
        let missing: Vec<_> = Readiness::ALL
            .iter()
            .filter(|r| !self.readiness.is_ready(**r))
            .map(|r| r.as_str())
            .collect();
        log::warn!("Loading max wait reached, still missing: {:?}", missing);
        self.begin_settle(now_ms)
    }

    /// When the settle delay ends, if it is running
    pub fn settle_deadline(&self) -> Option<f64> {
        match self.phase {
            LoadingPhase::Settling { since_ms } => Some(since_ms + self.settings.settle_ms),
            _ => None,
        }
    }

    /// Dismiss once the settle delay has elapsed
    pub fn finish(&mut self, now_ms: f64) -> Option<SequencerEvent> {
        let deadline = self.settle_deadline()?;
        if now_ms < deadline {
            return None;
        }
        self.phase = LoadingPhase::Dismissed;
        self.lock = None;
        log::info!("Loading surface dismissed at {:.0} ms", now_ms - self.started_ms);
        Some(SequencerEvent::Dismissed)
    }

    /// Owner is going away; always gives the scroll lock back
    pub fn teardown(&mut self) {
        if !self.is_finished() {
            log::debug!("Loading sequence torn down in {:?}", self.phase);
            self.phase = LoadingPhase::TornDown;
        }
        self.lock = None;
    }

    pub fn view(&self) -> LoadingView {
        let percent = self.progress.get().min(ProgressValue::COMPLETE);
        LoadingView {
            percent,
            status: status_text(percent),
            ring_dash_offset: ring_dash_offset(percent),
            visible: !self.is_finished(),
        }
    }
}
