//! Technology name to icon glyph + brand colour
//!
//! Lookups never fail: unknown names get a neutral glyph and a colour
//! derived from a hash of the name, so the same tag is always tinted the
//! same way.

use std::collections::HashMap;

use serde::Deserialize;

use crate::MotionResult;

const BUILTIN_ICONS: &str = include_str!("../assets/tech_icons.json");

pub const FALLBACK_GLYPH: &str = "code";

#[derive(Debug, Clone, Deserialize)]
struct IconEntry {
    name: String,
    glyph: String,
    color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconStyle {
    pub glyph: String,
    /// Any CSS colour
    pub color: String,
    pub fallback: bool,
}

/// 32-bit FNV-1a
pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5u32, |hash, b| {
        (hash ^ u32::from(*b)).wrapping_mul(0x0100_0193)
    })
}

/// Stable hue in `[0, 360)` for a name
pub fn fallback_hue(name: &str) -> u32 {
    fnv1a(name.as_bytes()) % 360
}

pub fn fallback_color(name: &str) -> String {
    format!("hsl({}, 65%, 60%)", fallback_hue(name))
}

#[derive(Debug, Clone, Default)]
pub struct IconResolver {
    icons: HashMap<String, (String, String)>,
}

impl IconResolver {
    /// Resolver over the icon table shipped with the crate
    pub fn builtin() -> MotionResult<Self> {
        Self::from_json(BUILTIN_ICONS)
    }

    /// Table format: `[{"name": ..., "glyph": ..., "color": ...}, ...]`
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let entries: Vec<IconEntry> = serde_json::from_str(json)?;
        let icons = entries
            .into_iter()
            .map(|e| (e.name, (e.glyph, e.color)))
            .collect();
        Ok(Self { icons })
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> IconStyle {
        match self.icons.get(name) {
            Some((glyph, color)) => IconStyle {
                glyph: glyph.clone(),
                color: color.clone(),
                fallback: false,
            },
            None => {
                log::debug!("No icon for {:?}, using fallback", name);
                IconStyle {
                    glyph: FALLBACK_GLYPH.to_owned(),
                    color: fallback_color(name),
                    fallback: true,
                }
            }
        }
    }
}
