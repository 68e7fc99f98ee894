//! Timer-driven loading controller
//!
//! Owns the sequencer plus every timer it needs (minimum display, progress
//! ticker, settle delay, optional max wait) and pushes views onto the
//! loading surface. Pumped from the frame clock; stops itself once the
//! surface is dismissed.

use super::readiness::Readiness;
use super::sequencer::{LoadingSequencer, LoadingView, SequencerEvent};
use crate::sched::{Animator, Frame, TimerId, TimerQueue};
use crate::settings::LoadingSettings;
use crate::shared::ScrollLock;

/// Where loading progress is shown
pub trait LoadingSurface {
    fn render(&mut self, view: &LoadingView);
    /// Hide the loading surface. Called once.
    fn dismiss(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingTimer {
    MinDisplay,
    Progress,
    Settle,
    MaxWait,
}

pub struct LoadingDriver<S> {
    sequencer: LoadingSequencer,
    timers: TimerQueue<LoadingTimer>,
    progress_timer: TimerId,
    surface: S,
}

impl<S: LoadingSurface> LoadingDriver<S> {
    pub fn start(now_ms: f64, settings: LoadingSettings, scroll_lock: &ScrollLock, surface: S) -> Self {
        let mut timers = TimerQueue::new();
        timers.set_timeout(now_ms, settings.min_display_ms, LoadingTimer::MinDisplay);
        let progress_timer = timers.set_interval(now_ms, settings.tick_ms, LoadingTimer::Progress);
        if let Some(max_wait) = settings.max_wait_ms {
            timers.set_timeout(now_ms, max_wait, LoadingTimer::MaxWait);
        }

        let mut driver = Self {
            sequencer: LoadingSequencer::start(now_ms, settings, scroll_lock),
            timers,
            progress_timer,
            surface,
        };
        driver.surface.render(&driver.sequencer.view());
        driver
    }

    pub fn sequencer(&self) -> &LoadingSequencer {
        &self.sequencer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn is_finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    /// Forward an external readiness signal (fonts, window load).
    /// Timers already due by `now_ms` fire first.
    pub fn signal(&mut self, which: Readiness, now_ms: f64) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        self.fire_due(now_ms, &mut events);
        let event = self.sequencer.signal(which, now_ms);
        self.apply(event, now_ms, &mut events);
        self.present(&events);
        events
    }

    /// Fire every timer due by `now_ms`
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        self.fire_due(now_ms, &mut events);
        self.present(&events);
        events
    }

    /// Progress ticks run at their scheduled times. Anything that can
    /// complete the sequence runs at the pump time, since 100% only shows
    /// once this pump presents it.
    fn fire_due(&mut self, now_ms: f64, events: &mut Vec<SequencerEvent>) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            let event = match fired.kind {
                LoadingTimer::MinDisplay => self.sequencer.signal(Readiness::MinTime, now_ms),
                LoadingTimer::Progress => self.sequencer.tick(fired.at_ms),
                LoadingTimer::Settle => self.sequencer.finish(fired.at_ms),
                LoadingTimer::MaxWait => self.sequencer.force_complete(now_ms),
            };
            self.apply(event, now_ms, events);
        }
    }

    fn apply(&mut self, event: Option<SequencerEvent>, now_ms: f64, events: &mut Vec<SequencerEvent>) {
        let Some(event) = event else {
            return;
        };
        match event {
            SequencerEvent::Progress(_) => {}
            SequencerEvent::Completed => {
                self.timers.clear(self.progress_timer);
                let settle = self.sequencer.settings().settle_ms;
                self.timers.set_timeout(now_ms, settle, LoadingTimer::Settle);
            }
            SequencerEvent::Dismissed => {
                self.timers.clear_all();
            }
        }
        events.push(event);
    }

    fn present(&mut self, events: &[SequencerEvent]) {
        if events.is_empty() {
            return;
        }
        self.surface.render(&self.sequencer.view());
        if events.contains(&SequencerEvent::Dismissed) {
            self.surface.dismiss();
        }
    }

    /// Cancel every timer and release the scroll lock
    pub fn teardown(&mut self) {
        self.timers.clear_all();
        self.sequencer.teardown();
    }
}

impl<S: LoadingSurface> Animator for LoadingDriver<S> {
    fn tick(&mut self, frame: &Frame) {
        self.advance_to(frame.now_ms);
    }

    fn is_active(&self) -> bool {
        !self.is_finished()
    }
}
