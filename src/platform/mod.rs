//! Browser platform layer
//!
//! Handles the DOM side of every effect:
//! - `dom`: element lookup, RAII event listeners, intersection observers
//! - `frame_loop`: `requestAnimationFrame` driving a `FrameScheduler`
//! - `adapters`: DOM/canvas implementations of the animator output traits
//!
//! Those submodules are WASM only; native builds drive the core directly.

#[cfg(target_arch = "wasm32")]
pub mod adapters;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;

/// Element ids and selectors the page is expected to provide. Anything
/// missing disables the matching effect.
pub mod ids {
    pub const LOADING_SCREEN: &str = "loading-screen";
    pub const LOADING_PERCENT: &str = "loading-percent";
    pub const LOADING_STATUS: &str = "loading-status";
    pub const LOADING_RING: &str = "loading-ring";
    pub const CURSOR_GLOW: &str = "cursor-glow";
    pub const HERO_CANVAS: &str = "hero-canvas";
    pub const TYPING_TEXT: &str = "typing-text";
    pub const COMPANION_CANVAS: &str = "companion-canvas";
    pub const NAVBAR: &str = "navbar";
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const NAV_LINKS: &str = "nav-links";
    pub const SCROLL_PROGRESS: &str = "scroll-progress";
    pub const SCROLL_COMET: &str = "scroll-comet";
    pub const SCROLL_TOP: &str = "scroll-top";
    pub const FOOTER_YEAR: &str = "year";

    pub const NAV_LINK_SELECTOR: &str = ".nav-link";
    pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
    pub const ENTRANCE_SELECTOR: &str = ".animate-on-scroll";
    pub const COUNTER_SELECTOR: &str = ".stat-number[data-count]";
    pub const TECH_TAG_SELECTOR: &str = ".tech-tag[data-tech]";
    pub const MAGNETIC_SELECTOR: &str = ".magnetic";
    pub const TILT_SELECTOR: &str = ".tilt-card";

    /// Classes toggled by the effects
    pub const CLASS_SCROLLED: &str = "scrolled";
    pub const CLASS_ACTIVE: &str = "active";
    pub const CLASS_OPEN: &str = "open";
    pub const CLASS_VISIBLE: &str = "visible";
    pub const CLASS_HIDDEN: &str = "hidden";
    pub const CLASS_SHOW: &str = "show";
}

/// What a `pagehide` means for the running effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Going into the back/forward cache; everything resumes on restore
    Frozen,
    /// Really unloading
    Unloading,
}

impl PageHide {
    /// From `PageTransitionEvent.persisted`
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            Self::Frozen
        } else {
            Self::Unloading
        }
    }

    pub fn tears_down(self) -> bool {
        self == Self::Unloading
    }
}

/// Parse a `data-count` attribute; tolerates a trailing `+`
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().trim_end_matches('+').trim().parse().ok()
}

/// Parse `data-phrases`: a JSON array of strings
pub fn parse_phrases(raw: &str) -> crate::MotionResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("50"), Some(50));
        assert_eq!(parse_count(" 120+ "), Some(120));
        assert_eq!(parse_count("lots"), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn test_only_unloading_tears_down() {
        assert_eq!(PageHide::from_persisted(true), PageHide::Frozen);
        assert!(!PageHide::from_persisted(true).tears_down());
        assert!(PageHide::from_persisted(false).tears_down());
    }

    #[test]
    fn test_parse_phrases() {
        let phrases = parse_phrases(r#"["Full-stack developer", "Game tinkerer"]"#).unwrap();
        assert_eq!(phrases.len(), 2);
        assert!(parse_phrases("not json").is_err());
    }
}
