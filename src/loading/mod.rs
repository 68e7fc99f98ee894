//! Resource-gated loading screen
//!
//! Dismissal waits for real readiness signals (fonts, window load, minimum
//! display time), never for a guessed timer alone:
//! - `readiness`: flags and the high-water-mark progress value
//! - `sequencer`: the single-dismissal state machine
//! - `driver`: timers and surface updates around the sequencer

pub mod driver;
pub mod readiness;
pub mod sequencer;

pub use driver::{LoadingDriver, LoadingSurface};
pub use readiness::{ProgressValue, Readiness, ReadinessState, time_curve};
pub use sequencer::{
    LoadingPhase, LoadingSequencer, LoadingView, RING_CIRCUMFERENCE, SequencerEvent, status_text,
};
