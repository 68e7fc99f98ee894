//! Hero particle field
//!
//! Drifting dots pushed away from the pointer, wrapping toroidally at the
//! canvas edges, with faint links between close neighbours. While the hero
//! is off-screen the loop keeps running but only one frame in
//! `HIDDEN_TICK_STRIDE` does any work, and links are skipped.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sched::{Animator, Frame};
use crate::shared::PointerState;
use crate::wrap_coord;

/// A decorative particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// HSL hue in degrees (blue-violet band)
    pub hue: f32,
}

impl Particle {
    /// Random particle somewhere inside `bounds`
    pub fn random(rng: &mut impl Rng, bounds: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * bounds.x,
                rng.random::<f32>() * bounds.y,
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 0.3,
                (rng.random::<f32>() - 0.5) * 0.3,
            ),
            size: rng.random::<f32>() * 2.0 + 0.5,
            opacity: rng.random::<f32>() * 0.5 + 0.1,
            hue: rng.random::<f32>() * 60.0 + 250.0,
        }
    }
}

/// Push a particle away from `pointer` when inside `REPEL_RADIUS`
pub fn repel(p: &mut Particle, pointer: Vec2) {
    let delta = p.pos - pointer;
    let dist = delta.length();
    if dist < REPEL_RADIUS && dist > f32::EPSILON {
        let force = (REPEL_RADIUS - dist) / REPEL_RADIUS;
        p.vel += delta / dist * force * REPEL_STRENGTH;
    }
}

/// Move by velocity, bleed off speed, and wrap around the canvas
pub fn integrate(p: &mut Particle, bounds: Vec2) {
    p.pos += p.vel;
    p.vel *= PARTICLE_DAMPING;
    p.pos.x = wrap_coord(p.pos.x, bounds.x);
    p.pos.y = wrap_coord(p.pos.y, bounds.y);
}

/// Opacity of the link between two particles at squared distance `dist_sq`,
/// or `None` when they are too far apart
pub fn link_alpha(dist_sq: f32) -> Option<f32> {
    (dist_sq < LINK_DISTANCE_SQ).then(|| LINK_MAX_ALPHA * (1.0 - dist_sq.sqrt() / LINK_DISTANCE))
}

/// How many particles a viewport this wide gets
pub fn particle_count(viewport_width: f32, cap: usize) -> usize {
    ((viewport_width / PARTICLE_SPACING_PX).floor().max(0.0) as usize).min(cap)
}

pub trait ParticleCanvas {
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn dot(&mut self, pos: Vec2, radius: f32, hue: f32, alpha: f32);
    fn link(&mut self, a: Vec2, b: Vec2, alpha: f32);
}

pub struct ParticleField<C> {
    canvas: C,
    particles: Vec<Particle>,
    pointer: PointerState,
    visible: bool,
    frames: u64,
    updates: u64,
    running: bool,
}

impl<C: ParticleCanvas> ParticleField<C> {
    pub fn new(canvas: C, count: usize, pointer: PointerState, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = canvas.size();
        let particles = (0..count).map(|_| Particle::random(&mut rng, bounds)).collect();
        Self::with_particles(canvas, particles, pointer)
    }

    pub fn with_particles(canvas: C, particles: Vec<Particle>, pointer: PointerState) -> Self {
        Self {
            canvas,
            particles,
            pointer,
            visible: true,
            frames: 0,
            updates: 0,
            running: true,
        }
    }

    /// Fed by the visibility observer on the canvas
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames that did real work
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Leave the frame loop for good
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// One physics + draw pass
    pub fn step(&mut self) {
        self.updates += 1;
        let bounds = self.canvas.size();
        let pointer = self.pointer.get();
        self.canvas.clear();

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            if let Some(pointer) = pointer {
                repel(p, pointer);
            }
            integrate(p, bounds);
            let p = *p;
            self.canvas.dot(p.pos, p.size, p.hue, p.opacity);

            if !self.visible {
                continue;
            }
            for other in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(p.pos.distance_squared(other.pos)) {
                    self.canvas.link(p.pos, other.pos, alpha);
                }
            }
        }
    }
}

impl<C: ParticleCanvas> Animator for ParticleField<C> {
    fn tick(&mut self, _frame: &Frame) {
        self.frames += 1;
        let stride = if self.visible {
            VISIBLE_TICK_STRIDE
        } else {
            HIDDEN_TICK_STRIDE
        };
        if self.frames % stride != 0 {
            return;
        }
        self.step();
    }

    fn is_active(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCanvas {
        dots: usize,
        links: Vec<f32>,
        clears: usize,
    }

    impl ParticleCanvas for FakeCanvas {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn dot(&mut self, _pos: Vec2, _radius: f32, _hue: f32, _alpha: f32) {
            self.dots += 1;
        }

        fn link(&mut self, _a: Vec2, _b: Vec2, alpha: f32) {
            self.links.push(alpha);
        }
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 1.0,
            opacity: 0.5,
            hue: 270.0,
        }
    }

    fn frame(index: u64) -> Frame {
        Frame {
            now_ms: index as f64 * 16.0,
            dt_ms: 16.0,
            index,
        }
    }

    #[test]
    fn test_wraps_instead_of_clamping() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut p = still(799.9, 599.9);
        p.vel = Vec2::new(0.5, 0.5);
        integrate(&mut p, bounds);
        assert!(p.pos.x.abs() < 1e-3);
        assert!(p.pos.y.abs() < 1e-3);

        let mut p = still(0.1, 0.1);
        p.vel = Vec2::new(-0.5, -0.5);
        integrate(&mut p, bounds);
        assert_eq!(p.pos, bounds);
    }

    #[test]
    fn test_repel_inside_radius_only() {
        let mut near = still(100.0, 0.0);
        repel(&mut near, Vec2::ZERO);
        // force = (150 - 100) / 150, along +x
        assert!((near.vel.x - (50.0 / 150.0) * REPEL_STRENGTH).abs() < 1e-6);
        assert_eq!(near.vel.y, 0.0);

        let mut far = still(200.0, 0.0);
        repel(&mut far, Vec2::ZERO);
        assert_eq!(far.vel, Vec2::ZERO);

        // Sitting exactly on the pointer does not produce NaN
        let mut on_top = still(0.0, 0.0);
        repel(&mut on_top, Vec2::ZERO);
        assert_eq!(on_top.vel, Vec2::ZERO);
    }

    #[test]
    fn test_velocity_decays() {
        let mut p = still(10.0, 10.0);
        p.vel = Vec2::new(1.0, 0.0);
        integrate(&mut p, Vec2::new(800.0, 600.0));
        assert_eq!(p.pos.x, 11.0);
        assert!((p.vel.x - PARTICLE_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn test_link_threshold_uses_squared_distance() {
        assert_eq!(link_alpha(LINK_DISTANCE_SQ), None);
        let alpha = link_alpha(40.0 * 40.0).unwrap();
        assert!((alpha - LINK_MAX_ALPHA * 0.5).abs() < 1e-6);
        assert!((link_alpha(0.0).unwrap() - LINK_MAX_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn test_hidden_field_works_one_frame_in_four() {
        let mut field = ParticleField::new(FakeCanvas::default(), 10, PointerState::new(), 7);
        field.set_visible(false);
        for i in 0..16 {
            field.tick(&frame(i));
        }
        assert_eq!(field.updates(), 4);
        assert!(field.canvas().links.is_empty());
        assert!(field.is_active());

        field.set_visible(true);
        for i in 16..32 {
            field.tick(&frame(i));
        }
        assert_eq!(field.updates(), 4 + 8);
    }

    #[test]
    fn test_links_only_between_close_pairs() {
        let particles = vec![still(100.0, 100.0), still(150.0, 100.0), still(500.0, 500.0)];
        let mut field = ParticleField::with_particles(FakeCanvas::default(), particles, PointerState::new());
        field.step();
        assert_eq!(field.canvas().dots, 3);
        assert_eq!(field.canvas().links.len(), 1);
        assert_eq!(field.canvas().clears, 1);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::new(FakeCanvas::default(), 12, PointerState::new(), 42);
        let b = ParticleField::new(FakeCanvas::default(), 12, PointerState::new(), 42);
        assert_eq!(a.particles(), b.particles());
        assert!(a.particles().iter().all(|p| (250.0..310.0).contains(&p.hue)));
    }

    #[test]
    fn test_particle_count_cap() {
        assert_eq!(particle_count(1920.0, 40), 40);
        assert_eq!(particle_count(375.0, 40), 15);
        assert_eq!(particle_count(0.0, 40), 0);
    }

    #[test]
    fn test_stop_leaves_loop() {
        let mut field = ParticleField::new(FakeCanvas::default(), 1, PointerState::new(), 1);
        field.stop();
        assert!(!field.is_active());
    }
}
