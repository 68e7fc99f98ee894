//! wgpu backend for the scroll companion
//!
//! `CompanionScene` keeps the latest value of every primitive slot and
//! builds the frame's vertex list; `CompanionRenderer` adds the GPU state.

use glam::Vec2;

use super::pipeline::RenderState;
use super::shapes::primitive_quad;
use super::vertex::Vertex;
use crate::anim::companion::{FrameRenderer, Primitive, Slot};
use crate::{MotionError, MotionResult};

#[derive(Debug, Clone, Default)]
pub struct CompanionScene {
    viewport: Vec2,
    fade: f32,
    head_core: Option<Primitive>,
    head_glow: Option<Primitive>,
    trail_core: Vec<Option<Primitive>>,
    trail_glow: Vec<Option<Primitive>>,
}

impl CompanionScene {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn set_fade(&mut self, fade: f32) {
        self.fade = fade.clamp(0.0, 1.0);
    }

    pub fn set(&mut self, slot: Slot, primitive: Primitive) {
        fn put(list: &mut Vec<Option<Primitive>>, age: usize, primitive: Primitive) {
            if list.len() <= age {
                list.resize(age + 1, None);
            }
            list[age] = Some(primitive);
        }
        match slot {
            Slot::HeadCore => self.head_core = Some(primitive),
            Slot::HeadGlow => self.head_glow = Some(primitive),
            Slot::TrailCore(age) => put(&mut self.trail_core, age, primitive),
            Slot::TrailGlow(age) => put(&mut self.trail_glow, age, primitive),
        }
    }

    /// Back to front: tail glows, tail cores (oldest first), head glow, head core
    pub fn vertices(&self) -> Vec<Vertex> {
        let trail = |list: &[Option<Primitive>], make: fn(usize) -> Slot| {
            list.iter()
                .enumerate()
                .rev()
                .filter_map(move |(age, p)| p.map(|p| (make(age), p)))
                .collect::<Vec<_>>()
        };
        let mut ordered = trail(&self.trail_glow, Slot::TrailGlow);
        ordered.extend(trail(&self.trail_core, Slot::TrailCore));
        ordered.extend(self.head_glow.map(|p| (Slot::HeadGlow, p)));
        ordered.extend(self.head_core.map(|p| (Slot::HeadCore, p)));

        ordered
            .iter()
            .filter_map(|(slot, p)| primitive_quad(*slot, p, self.viewport, self.fade))
            .flatten()
            .collect()
    }
}

pub struct CompanionRenderer {
    state: RenderState,
    scene: CompanionScene,
}

impl CompanionRenderer {
    /// `viewport` is in CSS px; the render state is sized in physical px
    pub fn new(state: RenderState, viewport: Vec2) -> Self {
        Self {
            state,
            scene: CompanionScene::new(viewport),
        }
    }

    pub fn resize(&mut self, viewport: Vec2, physical: (u32, u32)) {
        self.scene.set_viewport(viewport);
        self.state.resize(physical.0, physical.1);
    }
}

impl FrameRenderer for CompanionRenderer {
    fn viewport(&self) -> Vec2 {
        self.scene.viewport()
    }

    fn set_fade(&mut self, opacity: f32) {
        self.scene.set_fade(opacity);
    }

    fn set_primitive(&mut self, slot: Slot, primitive: Primitive) {
        self.scene.set(slot, primitive);
    }

    fn present(&mut self) -> MotionResult<()> {
        let vertices = self.scene.vertices();
        match self.state.render(&vertices) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.state.size;
                self.state.resize(w, h);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(MotionError::renderer("out of memory")),
            Err(e) => {
                log::warn!("Companion frame skipped: {:?}", e);
                Ok(())
            }
        }
    }
}
