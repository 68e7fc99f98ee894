//! Scroll coordination
//!
//! One scroll listener feeds the coordinator. However many events arrive
//! within a frame, at most one update runs, on the next frame. The update
//! writes the progress bar and comet every time and propagates the chrome
//! flags and active section only when they change.

use crate::consts::{
    ACTIVE_SECTION_OFFSET_PX, NAV_CLEARANCE_PX, SCROLL_TOP_THRESHOLD_PX, SCROLLED_THRESHOLD_PX,
};
use crate::sched::{Animator, Frame};

/// Page sections in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    /// Sections linked from the navbar, in document order
    pub const NAV: [SectionId; 4] = [
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    /// Element id of the section
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Accepts an id with or without the leading `#`
    pub fn from_str(s: &str) -> Option<Self> {
        let id = s.strip_prefix('#').unwrap_or(s);
        Self::ALL.into_iter().find(|section| section.as_str() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub progress_percent: f64,
    pub active: Option<SectionId>,
    pub scrolled: bool,
    pub show_scroll_top: bool,
}

/// Where scroll geometry is read from
pub trait ScrollSource {
    fn scroll_y(&self) -> f64;
    /// Document height minus viewport height
    fn scrollable_height(&self) -> f64;
    /// Top edge of the section relative to the viewport, if it exists
    fn section_top(&self, section: SectionId) -> Option<f64>;
}

/// Where scroll-derived state goes
pub trait ScrollSink {
    /// Progress bar and comet, every update
    fn show_progress(&mut self, percent: f64);
    fn set_scrolled(&mut self, scrolled: bool);
    fn set_active(&mut self, active: Option<SectionId>);
    fn set_scroll_top_visible(&mut self, visible: bool);
}

/// Scroll progress in `[0, 100]`; 0 for pages that cannot scroll
pub fn scroll_progress(scroll_y: f64, scrollable_height: f64) -> f64 {
    if scrollable_height <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable_height * 100.0).clamp(0.0, 100.0)
}

/// The last section (document order) whose top is at or above `offset`.
/// Scans from the bottom, so on a shared boundary the later section wins.
pub fn active_section(
    sections: &[SectionId],
    top_of: impl Fn(SectionId) -> Option<f64>,
    offset: f64,
) -> Option<SectionId> {
    sections
        .iter()
        .rev()
        .copied()
        .find(|s| top_of(*s).is_some_and(|top| top <= offset))
}

/// Scroll position that puts a section just below the navbar
pub fn anchor_scroll_top(rect_top: f64, scroll_y: f64) -> f64 {
    rect_top + scroll_y - NAV_CLEARANCE_PX
}

fn edge<T: PartialEq + Copy>(last: &mut T, next: T) -> bool {
    if *last == next {
        return false;
    }
    *last = next;
    true
}

pub struct ScrollCoordinator<Src, Snk> {
    source: Src,
    sink: Snk,
    pending: bool,
    scrolled: bool,
    active: Option<SectionId>,
    show_scroll_top: bool,
    updates: u64,
}

impl<Src: ScrollSource, Snk: ScrollSink> ScrollCoordinator<Src, Snk> {
    pub fn new(source: Src, sink: Snk) -> Self {
        Self {
            source,
            sink,
            pending: false,
            scrolled: false,
            active: None,
            show_scroll_top: false,
            updates: 0,
        }
    }

    /// A scroll event arrived. Returns `true` when this event scheduled the
    /// next-frame update, `false` when one was already pending.
    pub fn on_scroll(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    pub fn sink(&self) -> &Snk {
        &self.sink
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.source
    }

    /// Recompute everything now
    pub fn update(&mut self) -> ScrollSnapshot {
        self.pending = false;
        self.updates += 1;

        let scroll_y = self.source.scroll_y();
        let progress = scroll_progress(scroll_y, self.source.scrollable_height());
        self.sink.show_progress(progress);

        if edge(&mut self.scrolled, scroll_y > SCROLLED_THRESHOLD_PX) {
            self.sink.set_scrolled(self.scrolled);
        }

        let source = &self.source;
        let active = active_section(
            &SectionId::NAV,
            |s| source.section_top(s),
            ACTIVE_SECTION_OFFSET_PX,
        );
        if edge(&mut self.active, active) {
            log::debug!("Active section: {:?}", active.map(|s| s.as_str()));
            self.sink.set_active(active);
        }

        if edge(&mut self.show_scroll_top, scroll_y > SCROLL_TOP_THRESHOLD_PX) {
            self.sink.set_scroll_top_visible(self.show_scroll_top);
        }

        ScrollSnapshot {
            scroll_y,
            progress_percent: progress,
            active: self.active,
            scrolled: self.scrolled,
            show_scroll_top: self.show_scroll_top,
        }
    }

    /// Scroll target for a nav link; `None` if the section is missing
    pub fn anchor_target(&self, section: SectionId) -> Option<f64> {
        let top = self.source.section_top(section)?;
        Some(anchor_scroll_top(top, self.source.scroll_y()))
    }
}

impl<Src: ScrollSource, Snk: ScrollSink> Animator for ScrollCoordinator<Src, Snk> {
    fn tick(&mut self, _frame: &Frame) {
        if self.pending {
            self.update();
        }
    }

    fn is_active(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::{AnimatorHandle, FrameScheduler};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sections laid out back to back, 1000 px each, starting at `hero`
    struct FakePage {
        scroll_y: f64,
        sections: Vec<(SectionId, f64)>,
    }

    impl FakePage {
        fn new() -> Self {
            let sections = SectionId::ALL
                .iter()
                .enumerate()
                .map(|(i, s)| (*s, i as f64 * 1000.0))
                .collect();
            Self {
                scroll_y: 0.0,
                sections,
            }
        }
    }

    impl ScrollSource for FakePage {
        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn scrollable_height(&self) -> f64 {
            4000.0
        }

        fn section_top(&self, section: SectionId) -> Option<f64> {
            self.sections
                .iter()
                .find(|(s, _)| *s == section)
                .map(|(_, doc_top)| doc_top - self.scroll_y)
        }
    }

    #[derive(Default)]
    struct Chrome {
        progress: Vec<f64>,
        scrolled: Vec<bool>,
        active: Vec<Option<SectionId>>,
        scroll_top: Vec<bool>,
    }

    impl ScrollSink for Chrome {
        fn show_progress(&mut self, percent: f64) {
            self.progress.push(percent);
        }

        fn set_scrolled(&mut self, scrolled: bool) {
            self.scrolled.push(scrolled);
        }

        fn set_active(&mut self, active: Option<SectionId>) {
            self.active.push(active);
        }

        fn set_scroll_top_visible(&mut self, visible: bool) {
            self.scroll_top.push(visible);
        }
    }

    #[test]
    fn test_many_events_one_update_per_frame() {
        let coord = Rc::new(RefCell::new(ScrollCoordinator::new(FakePage::new(), Chrome::default())));
        let handle: AnimatorHandle = coord.clone();
        let mut sched = FrameScheduler::new();

        let mut scheduled = 0;
        for _ in 0..10 {
            if coord.borrow_mut().on_scroll() {
                scheduled += 1;
            }
            sched.ensure_registered("scroll", &handle);
        }
        assert_eq!(scheduled, 1);
        assert_eq!(sched.len(), 1);

        sched.run_frame(16.0);
        assert_eq!(coord.borrow().updates(), 1);
        assert!(sched.is_empty());

        // Next burst schedules again
        assert!(coord.borrow_mut().on_scroll());
    }

    #[test]
    fn test_shared_boundary_goes_to_later_section() {
        let page = FakePage::new();
        // about ends where skills starts: skills top == offset exactly
        let scroll_y = 2000.0 - ACTIVE_SECTION_OFFSET_PX;
        let top = |s: SectionId| page.section_top(s).map(|t| t + page.scroll_y - scroll_y);
        assert_eq!(
            active_section(&SectionId::NAV, top, ACTIVE_SECTION_OFFSET_PX),
            Some(SectionId::Skills)
        );
        let top = |s: SectionId| page.section_top(s).map(|t| t + page.scroll_y - scroll_y + 1.0);
        assert_eq!(
            active_section(&SectionId::NAV, top, ACTIVE_SECTION_OFFSET_PX),
            Some(SectionId::About)
        );
    }

    #[test]
    fn test_hero_only_means_no_active_section() {
        let mut coord = ScrollCoordinator::new(FakePage::new(), Chrome::default());
        let snap = coord.update();
        assert_eq!(snap.active, None);
        assert!(!snap.scrolled);
        // Nothing changed from the initial state, so nothing propagated
        assert!(coord.sink().active.is_empty());
        assert!(coord.sink().scrolled.is_empty());
        assert_eq!(coord.sink().progress, vec![0.0]);
    }

    #[test]
    fn test_chrome_is_edge_triggered() {
        let mut coord = ScrollCoordinator::new(FakePage::new(), Chrome::default());
        for y in [10.0, 60.0, 70.0, 500.0, 900.0, 1200.0, 30.0] {
            coord.source_mut().scroll_y = y;
            coord.update();
        }
        let sink = coord.sink();
        assert_eq!(sink.progress.len(), 7);
        assert_eq!(sink.scrolled, vec![true, false]);
        assert_eq!(sink.scroll_top, vec![true, false]);
        // about's top reaches 200 px once scroll_y >= 800
        assert_eq!(sink.active, vec![Some(SectionId::About), None]);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(scroll_progress(2000.0, 4000.0), 50.0);
        assert_eq!(scroll_progress(5000.0, 4000.0), 100.0);
        assert_eq!(scroll_progress(-20.0, 4000.0), 0.0);
        assert_eq!(scroll_progress(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_anchor_target_clears_navbar() {
        let mut coord = ScrollCoordinator::new(FakePage::new(), Chrome::default());
        coord.source_mut().scroll_y = 500.0;
        // projects sits at 3000 in the document
        assert_eq!(coord.anchor_target(SectionId::Projects), Some(2980.0));
        coord.source_mut().sections.retain(|(s, _)| *s != SectionId::Contact);
        assert_eq!(coord.anchor_target(SectionId::Contact), None);
    }

    #[test]
    fn test_section_ids() {
        assert_eq!(SectionId::from_str("#skills"), Some(SectionId::Skills));
        assert_eq!(SectionId::from_str("hero"), Some(SectionId::Hero));
        assert_eq!(SectionId::from_str("blog"), None);
    }
}
