//! Vertex type for disc rendering

use bytemuck::{Pod, Zeroable};

/// Corner of a disc quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Normalized device coordinates
    pub position: [f32; 2],
    /// Position inside the disc's unit square, `[-1, 1]` on both axes
    pub local: [f32; 2],
    /// Premultiplied RGBA
    pub color: [f32; 4],
    /// 1.0 for a soft radial glow, 0.0 for a solid disc
    pub glow: f32,
}

impl Vertex {
    pub const fn new(position: [f32; 2], local: [f32; 2], color: [f32; 4], glow: f32) -> Self {
        Self {
            position,
            local,
            color,
            glow,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            0 => Float32x2,
            1 => Float32x2,
            2 => Float32x4,
            3 => Float32,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `#rrggbb` to sRGB components in `[0, 1]`
pub fn parse_hex(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// CSS hex colour to linear RGB for an sRGB render target. Unparseable
/// colours come out white.
pub fn hex_to_linear(hex: &str) -> [f32; 3] {
    parse_hex(hex)
        .map(|rgb| rgb.map(srgb_to_linear))
        .unwrap_or([1.0; 3])
}
