//! Scheduling primitives
//!
//! Everything runs on one thread, driven by the display's frame clock:
//! - `frame`: the animator set ticked once per repaint
//! - `timers`: virtual timeouts/intervals pumped from the frame clock

pub mod frame;
pub mod timers;

pub use frame::{Animator, AnimatorHandle, Frame, FrameScheduler, FrameToken};
pub use timers::{Fired, TimerId, TimerQueue};
