//! DOM helpers

use js_sys::{Array, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::reveal::Intersection;
use crate::{MotionError, MotionResult};

pub fn window() -> MotionResult<Window> {
    web_sys::window().ok_or_else(|| MotionError::browser("no window"))
}

pub fn document() -> MotionResult<Document> {
    window()?
        .document()
        .ok_or_else(|| MotionError::browser("no document"))
}

/// `performance.now()`, the same clock `requestAnimationFrame` reports
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

pub fn element_by_id(id: &str) -> MotionResult<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| MotionError::missing(id))
}

/// Element by id, cast to a concrete element type
pub fn typed_by_id<T: JsCast>(id: &str, expected: &'static str) -> MotionResult<T> {
    element_by_id(id)?
        .dyn_into::<T>()
        .map_err(|_| MotionError::WrongElementType {
            id: id.to_owned(),
            expected,
        })
}

pub fn query_all(selector: &str) -> MotionResult<Vec<Element>> {
    let list = document()?.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// `(innerWidth, innerHeight)` in CSS px
pub fn viewport_size(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// `document.readyState == "complete"`
pub fn page_loaded(document: &Document) -> bool {
    Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string())
        .is_some_and(|state| state == "complete")
}

/// `document.fonts.ready`, if the browser has the Font Loading API
pub fn fonts_ready(document: &Document) -> Option<Promise> {
    let fonts = Reflect::get(document, &JsValue::from_str("fonts")).ok()?;
    if fonts.is_undefined() {
        return None;
    }
    Reflect::get(&fonts, &JsValue::from_str("ready"))
        .ok()?
        .dyn_into::<Promise>()
        .ok()
}

/// Event listener that unregisters itself when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> MotionResult<Self> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Passive listener (scroll, touch) that never calls `preventDefault`
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> MotionResult<Self> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// IntersectionObserver that disconnects when dropped
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    /// `handler` gets each entry's target and intersection, plus the
    /// observer so it can unobserve
    pub fn new(
        threshold: f64,
        root_margin: &str,
        mut handler: impl FnMut(&Element, Intersection, &IntersectionObserver) + 'static,
    ) -> MotionResult<Self> {
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let hit = Intersection {
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                handler(&entry.target(), hit, &observer);
            }
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
