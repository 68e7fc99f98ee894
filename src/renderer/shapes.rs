//! Disc geometry for companion primitives

use glam::Vec2;

use super::vertex::{Vertex, hex_to_linear};
use crate::anim::companion::{Primitive, Slot};

/// Primitives fainter than this are not drawn
pub const MIN_VISIBLE_OPACITY: f32 = 0.002;

/// Two triangles covering a disc at `center` (NDC) with per-axis radius
/// `radius` (NDC), colour already premultiplied
pub fn disc(center: Vec2, radius: Vec2, color: [f32; 4], glow: bool) -> [Vertex; 6] {
    let glow = if glow { 1.0 } else { 0.0 };
    let corner = |sx: f32, sy: f32| {
        Vertex::new(
            [center.x + sx * radius.x, center.y + sy * radius.y],
            [sx, sy],
            color,
            glow,
        )
    };
    [
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
    ]
}

/// Quad for one companion primitive, or `None` when it would not be visible.
/// `viewport` is in the same px units as the primitive; `fade` scales the
/// whole layer.
pub fn primitive_quad(slot: Slot, prim: &Primitive, viewport: Vec2, fade: f32) -> Option<[Vertex; 6]> {
    let alpha = (prim.opacity * fade).clamp(0.0, 1.0);
    if alpha < MIN_VISIBLE_OPACITY || prim.scale <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let half = viewport / 2.0;
    let center = prim.pos / half;
    let radius = Vec2::splat(prim.scale) / half;
    let [r, g, b] = hex_to_linear(slot.color());
    Some(disc(center, radius, [r * alpha, g * alpha, b * alpha, alpha], slot.is_glow()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(x: f32, y: f32, scale: f32, opacity: f32) -> Primitive {
        Primitive {
            pos: Vec2::new(x, y),
            scale,
            opacity,
        }
    }

    #[test]
    fn test_world_to_ndc() {
        let vp = Vec2::new(1000.0, 500.0);
        let quad = primitive_quad(Slot::HeadCore, &prim(250.0, -125.0, 10.0, 1.0), vp, 1.0).unwrap();
        // Corners span center +- radius
        assert_eq!(quad[0].position, [0.5 - 0.02, -0.5 - 0.04]);
        assert_eq!(quad[2].position, [0.5 + 0.02, -0.5 + 0.04]);
        assert_eq!(quad[0].local, [-1.0, -1.0]);
        assert_eq!(quad[0].glow, 0.0);
    }

    #[test]
    fn test_color_is_premultiplied() {
        let vp = Vec2::new(100.0, 100.0);
        let quad = primitive_quad(Slot::HeadCore, &prim(0.0, 0.0, 4.0, 0.5), vp, 0.5).unwrap();
        // White at 0.25
        assert_eq!(quad[0].color, [0.25, 0.25, 0.25, 0.25]);
        let glow = primitive_quad(Slot::TrailGlow(3), &prim(0.0, 0.0, 4.0, 0.5), vp, 1.0).unwrap();
        assert_eq!(glow[0].glow, 1.0);
    }

    #[test]
    fn test_invisible_primitives_skipped() {
        let vp = Vec2::new(100.0, 100.0);
        assert!(primitive_quad(Slot::HeadCore, &prim(0.0, 0.0, 4.0, 0.9), vp, 0.0).is_none());
        assert!(primitive_quad(Slot::TrailCore(29), &prim(0.0, 0.0, 0.0, 0.5), vp, 1.0).is_none());
        assert!(primitive_quad(Slot::HeadCore, &prim(0.0, 0.0, 4.0, 0.9), Vec2::ZERO, 1.0).is_none());
    }
}
