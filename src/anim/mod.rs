//! Frame-driven animators
//!
//! Each effect owns its state and writes through a small output trait, so
//! the same animator runs against the DOM in the browser and against
//! recording fakes in tests.

pub mod companion;
pub mod counter;
pub mod glow;
pub mod magnetic;
pub mod particles;
pub mod tilt;
pub mod trail;
pub mod typing;

pub use companion::{FrameRenderer, Primitive, ScrollCompanion, Slot};
pub use counter::{CounterAnimation, CounterSink, Ease, counter_value};
pub use glow::{CursorGlow, GlowSurface};
pub use magnetic::{MagnetSurface, MagneticButton};
pub use particles::{Particle, ParticleCanvas, ParticleField, particle_count};
pub use tilt::Tilt;
pub use trail::{TrailBuffer, trail_weight};
pub use typing::{TextSink, TypingEffect, TypingPhase};
