//! Motion settings and preferences
//!
//! Read once at start-up from an inline JSON block in the page. Nothing is
//! ever written back.

use serde::{Deserialize, Serialize};

use crate::MotionResult;
use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum hero particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 15,
            QualityPreset::Medium => 40,
            QualityPreset::High => 60,
        }
    }

    /// Companion trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }
}

/// Loading screen timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingSettings {
    /// Minimum time the loading surface stays up
    pub min_display_ms: f64,
    /// Pause after reaching 100% so the bar can finish animating
    pub settle_ms: f64,
    /// Period of the time-based progress ticker
    pub tick_ms: f64,
    /// Dismiss even if some signal never arrives. Off by default.
    pub max_wait_ms: Option<f64>,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            min_display_ms: MIN_DISPLAY_MS,
            settle_ms: SETTLE_DELAY_MS,
            tick_ms: PROGRESS_TICK_MS,
            max_wait_ms: None,
        }
    }
}

/// Viewport reveal tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Visible fraction that triggers entrance transitions
    pub entrance_threshold: f64,
    /// Bottom root margin (px) pulled in for entrance transitions
    pub entrance_margin_px: f64,
    /// Visible fraction that starts numeric counters
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    /// Ease-out exponent for counters (3 = cubic, 4 = quartic)
    pub counter_exponent: u8,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            entrance_threshold: 0.1,
            entrance_margin_px: 40.0,
            counter_threshold: 0.5,
            counter_duration_ms: 1500.0,
            counter_exponent: 3,
        }
    }
}

/// Site motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Effects ===
    pub cursor_glow: bool,
    pub particles: bool,
    /// 3D scroll companion comet
    pub companion: bool,

    // === Behaviour ===
    pub loading: LoadingSettings,
    pub reveal: RevealSettings,

    // === Accessibility ===
    /// Reduced motion (disables decorative loops)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            cursor_glow: true,
            particles: true,
            companion: true,
            loading: LoadingSettings::default(),
            reveal: RevealSettings::default(),
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Id of the `<script type="application/json">` block holding overrides
    pub const ELEMENT_ID: &'static str = "motion-settings";

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> MotionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Effective particle cap (respects toggles and reduced_motion)
    pub fn effective_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn effective_cursor_glow(&self) -> bool {
        self.cursor_glow && !self.reduced_motion
    }

    pub fn effective_companion(&self) -> bool {
        self.companion && !self.reduced_motion
    }

    /// Companion trail length after the quality multiplier
    pub fn trail_capacity(&self) -> usize {
        let scaled = TRAIL_CAPACITY as f32 * self.quality.trail_quality();
        (scaled.round() as usize).max(2)
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let inline = window
            .as_ref()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let mut settings = match inline.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded motion settings from #{}", Self::ELEMENT_ID);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring #{}: {}", Self::ELEMENT_ID, e);
                Self::default()
            }
            None => {
                log::info!("Using default motion settings");
                Self::default()
            }
        };

        let prefers_reduced = window
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
            .map(|mq| mq.matches())
            .unwrap_or(false);
        if prefers_reduced {
            log::info!("prefers-reduced-motion is set, disabling decorative loops");
            settings.reduced_motion = true;
        }

        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"quality":"high","loading":{"settle_ms":250}}"#).unwrap();
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.loading.settle_ms, 250.0);
        assert_eq!(s.loading.min_display_ms, MIN_DISPLAY_MS);
        assert_eq!(s.loading.max_wait_ms, None);
        assert!(s.particles);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json(r#"{"quality":"ultra"}"#).is_err());
    }

    #[test]
    fn test_reduced_motion_disables_loops() {
        let s = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(s.effective_particles(), 0);
        assert!(!s.effective_cursor_glow());
        assert!(!s.effective_companion());
    }

    #[test]
    fn test_trail_capacity_follows_preset() {
        let with = |quality| Settings {
            quality,
            ..Settings::default()
        };
        assert_eq!(with(QualityPreset::Medium).trail_capacity(), 30);
        assert_eq!(with(QualityPreset::Low).trail_capacity(), 15);
        assert_eq!(with(QualityPreset::High).effective_particles(), 60);
    }

    #[test]
    fn test_preset_names_are_lowercase_json() {
        let s = Settings::from_json(r#"{"quality":"low"}"#).unwrap();
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(Settings::from_json(r#"{"quality":"Low"}"#).is_err());
    }
}
