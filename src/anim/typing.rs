//! Hero typing effect
//!
//! Types a phrase one character at a time, holds it, deletes it, then moves
//! on to the next phrase, forever.

use crate::sched::{Animator, Frame};

pub const TYPE_MS: f64 = 80.0;
pub const HOLD_MS: f64 = 2000.0;
pub const DELETE_MS: f64 = 50.0;

pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Holding,
    Deleting,
}

pub struct TypingEffect<S> {
    sink: S,
    phrases: Vec<String>,
    phrase: usize,
    /// Characters of the current phrase on screen
    shown: usize,
    phase: TypingPhase,
    next_ms: Option<f64>,
    running: bool,
}

impl<S: TextSink> TypingEffect<S> {
    pub fn new(sink: S, phrases: Vec<String>) -> Self {
        let running = phrases.iter().any(|p| !p.is_empty());
        if !running {
            log::debug!("Typing effect has no phrases, staying idle");
        }
        Self {
            sink,
            phrases,
            phrase: 0,
            shown: 0,
            phase: TypingPhase::Typing,
            next_ms: None,
            running,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Text currently on screen
    pub fn text(&self) -> &str {
        let current = self.current();
        let end = current
            .char_indices()
            .nth(self.shown)
            .map_or(current.len(), |(i, _)| i);
        &current[..end]
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn current(&self) -> &str {
        self.phrases.get(self.phrase).map_or("", String::as_str)
    }

    fn current_len(&self) -> usize {
        self.current().chars().count()
    }

    /// One step of the state machine; returns the delay before the next one
    fn step(&mut self) -> f64 {
        match self.phase {
            TypingPhase::Typing => {
                if self.shown < self.current_len() {
                    self.shown += 1;
                    self.flush();
                }
                if self.shown == self.current_len() {
                    self.phase = TypingPhase::Holding;
                    HOLD_MS
                } else {
                    TYPE_MS
                }
            }
            TypingPhase::Holding => {
                self.phase = TypingPhase::Deleting;
                DELETE_MS
            }
            TypingPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                self.flush();
                if self.shown == 0 {
                    self.phase = TypingPhase::Typing;
                    self.phrase = (self.phrase + 1) % self.phrases.len().max(1);
                    TYPE_MS
                } else {
                    DELETE_MS
                }
            }
        }
    }

    fn flush(&mut self) {
        let text = self.text().to_owned();
        self.sink.set_text(&text);
    }
}

impl<S: TextSink> Animator for TypingEffect<S> {
    fn tick(&mut self, frame: &Frame) {
        if !self.running {
            return;
        }
        let mut due = *self.next_ms.get_or_insert(frame.now_ms + TYPE_MS);
        // Catch up after a long frame gap without skipping characters
        while frame.now_ms >= due {
            due += self.step();
        }
        self.next_ms = Some(due);
    }

    fn is_active(&self) -> bool {
        self.running
    }
}
