//! Page-level state shared between independent components
//!
//! Both handles are cheap clones over the same cell and are injected into
//! the components that need them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use glam::Vec2;

#[derive(Default)]
struct LockInner {
    holders: Cell<usize>,
    observer: RefCell<Option<Box<dyn Fn(bool)>>>,
}

/// Page scroll lock. Scrolling stays frozen while any guard is alive.
#[derive(Clone, Default)]
pub struct ScrollLock {
    inner: Rc<LockInner>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock whose observer is told `true` when the first holder arrives and
    /// `false` when the last one leaves
    pub fn with_observer(observer: impl Fn(bool) + 'static) -> Self {
        let lock = Self::default();
        *lock.inner.observer.borrow_mut() = Some(Box::new(observer));
        lock
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.inner.holders.get();
        self.inner.holders.set(holders + 1);
        if holders == 0 {
            self.notify(true);
        }
        ScrollLockGuard { lock: self.clone() }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.holders.get() > 0
    }

    pub fn holders(&self) -> usize {
        self.inner.holders.get()
    }

    fn release(&self) {
        let holders = self.inner.holders.get().saturating_sub(1);
        self.inner.holders.set(holders);
        if holders == 0 {
            self.notify(false);
        }
    }

    fn notify(&self, locked: bool) {
        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            observer(locked);
        }
    }
}

impl fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("holders", &self.holders())
            .finish()
    }
}

/// One hold on the scroll lock, released on drop
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl ScrollLockGuard {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Last observed pointer position in viewport px
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pos: Rc<Cell<Option<Vec2>>>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pos: Vec2) {
        self.pos.set(Some(pos));
    }

    /// `None` until the pointer has moved at least once
    pub fn get(&self) -> Option<Vec2> {
        self.pos.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_notifies_on_edges_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let lock = ScrollLock::with_observer(move |locked| sink.borrow_mut().push(locked));

        let a = lock.acquire();
        let b = lock.acquire();
        assert!(lock.is_locked());
        assert_eq!(lock.holders(), 2);
        drop(a);
        assert!(lock.is_locked());
        b.release();
        assert!(!lock.is_locked());

        assert_eq!(*log.borrow(), vec![true, false]);
    }

    #[test]
    fn test_pointer_starts_unknown() {
        let pointer = PointerState::new();
        let shared = pointer.clone();
        assert_eq!(pointer.get(), None);
        shared.set(Vec2::new(10.0, 20.0));
        assert_eq!(pointer.get(), Some(Vec2::new(10.0, 20.0)));
    }
}
