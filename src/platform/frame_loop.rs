//! `requestAnimationFrame` driver for a `FrameScheduler`
//!
//! A frame is only requested while some animator is scheduled, so an idle
//! page costs nothing. At most one request is outstanding at a time.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::sched::{AnimatorHandle, FrameScheduler};

#[derive(Default)]
struct LoopInner {
    scheduler: RefCell<FrameScheduler>,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    closed: Cell<bool>,
}

#[derive(Clone, Default)]
pub struct FrameLoop {
    inner: Rc<LoopInner>,
}

impl FrameLoop {
    pub fn new() -> Self {
        let frame_loop = Self::default();
        let weak: Weak<LoopInner> = Rc::downgrade(&frame_loop.inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(inner) = weak.upgrade() {
                run(&inner, time);
            }
        });
        *frame_loop.inner.callback.borrow_mut() = Some(callback);
        frame_loop
    }

    /// Schedule an animator (once) and make sure a frame is coming
    pub fn schedule(&self, label: &'static str, animator: &AnimatorHandle) {
        if self.inner.closed.get() {
            return;
        }
        self.inner
            .scheduler
            .borrow_mut()
            .ensure_registered(label, animator);
        request(&self.inner);
    }

    /// Cancel the pending frame and every animator; later `schedule` calls
    /// are ignored
    pub fn shutdown(&self) {
        self.inner.closed.set(true);
        if let Some(id) = self.inner.pending.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
        self.inner.scheduler.borrow_mut().cancel_all();
        self.inner.callback.borrow_mut().take();
    }
}

fn request(inner: &LoopInner) {
    if inner.pending.get().is_some() || inner.closed.get() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = inner.callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => inner.pending.set(Some(id)),
        Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
    }
}

fn run(inner: &LoopInner, time: f64) {
    inner.pending.set(None);
    if inner.closed.get() {
        return;
    }
    // Animators never reach back into the loop while ticking
    let remaining = {
        let mut scheduler = inner.scheduler.borrow_mut();
        scheduler.run_frame(time);
        scheduler.len()
    };
    if remaining > 0 {
        request(inner);
    }
}
