//! DOM and canvas implementations of the animator output traits

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement};

use super::dom;
use super::ids;
use crate::anim::{CounterSink, GlowSurface, MagnetSurface, ParticleCanvas, TextSink, Tilt};
use crate::icons::IconResolver;
use crate::loading::{LoadingSurface, LoadingView};
use crate::scroll::{ScrollSink, ScrollSource, SectionId};
use crate::shared::ScrollLock;
use crate::{MotionError, MotionResult};

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::debug!("style {} failed: {:?}", property, e);
    }
}

fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// The `#cursor-glow` element, moved with a compositor-only transform
pub struct GlowElement {
    el: HtmlElement,
}

impl GlowElement {
    pub fn find() -> MotionResult<Self> {
        Ok(Self {
            el: dom::typed_by_id(ids::CURSOR_GLOW, "HTMLElement")?,
        })
    }
}

impl GlowSurface for GlowElement {
    fn place(&mut self, pos: Vec2) {
        set_style(
            &self.el,
            "transform",
            &format!("translate3d({}px, {}px, 0)", pos.x, pos.y),
        );
    }
}

/// Centre of an element's bounding box in viewport px
fn centre_of(el: &Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        (rect.left() + rect.width() / 2.0) as f32,
        (rect.top() + rect.height() / 2.0) as f32,
    )
}

/// A `.magnetic` wrapper shifted with a transform
pub struct MagneticElement {
    el: HtmlElement,
}

impl MagneticElement {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }

    /// Pointer offset from the element's centre
    pub fn from_centre(&self, pointer: Vec2) -> Vec2 {
        pointer - centre_of(&self.el)
    }
}

impl MagnetSurface for MagneticElement {
    fn shift(&mut self, offset: Vec2) {
        set_style(
            &self.el,
            "transform",
            &format!("translate3d({}px, {}px, 0)", offset.x, offset.y),
        );
    }
}

/// A `.tilt-card` leaning toward the pointer
#[derive(Clone)]
pub struct TiltCard {
    el: HtmlElement,
}

impl TiltCard {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }

    pub fn follow(&self, pointer: Vec2) {
        let rect = self.el.get_bounding_client_rect();
        let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);
        self.apply(Tilt::from_pointer(pointer - origin, size));
    }

    pub fn rest(&self) {
        self.apply(Tilt::REST);
    }

    fn apply(&self, tilt: Tilt) {
        set_style(&self.el, "transform", &tilt.css());
    }
}

/// 2D canvas backing the hero particle field
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn find(id: &str) -> MotionResult<Self> {
        let canvas: HtmlCanvasElement = dom::typed_by_id(id, "canvas")?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| MotionError::browser("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MotionError::browser("2d context has the wrong type"))?;
        let mut surface = Self { canvas, ctx };
        surface.fit_window();
        Ok(surface)
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the window
    pub fn fit_window(&mut self) {
        let Ok(window) = dom::window() else {
            return;
        };
        let (w, h) = dom::viewport_size(&window);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
    }
}

impl ParticleCanvas for Canvas2d {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
    }

    fn dot(&mut self, pos: Vec2, radius: f32, hue: f32, alpha: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(f64::from(pos.x), f64::from(pos.y), f64::from(radius), 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx
            .set_fill_style_str(&format!("hsla({hue}, 80%, 70%, {alpha})"));
        self.ctx.fill();
    }

    fn link(&mut self, a: Vec2, b: Vec2, alpha: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(a.x), f64::from(a.y));
        self.ctx.line_to(f64::from(b.x), f64::from(b.y));
        self.ctx
            .set_stroke_style_str(&format!("hsla(270, 60%, 60%, {alpha})"));
        self.ctx.set_line_width(0.5);
        self.ctx.stroke();
    }
}

/// Scroll geometry from the window and the section elements
pub struct WindowScroll {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WindowScroll {
    pub fn new() -> MotionResult<Self> {
        Ok(Self {
            window: dom::window()?,
            document: dom::document()?,
        })
    }
}

impl ScrollSource for WindowScroll {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scrollable_height(&self) -> f64 {
        let total = self
            .document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_height()));
        let (_, viewport) = dom::viewport_size(&self.window);
        total - viewport
    }

    fn section_top(&self, section: SectionId) -> Option<f64> {
        self.document
            .get_element_by_id(section.as_str())
            .map(|el| el.get_bounding_client_rect().top())
    }
}

/// Navbar, progress bar, comet and scroll-to-top button.
/// Each part is optional; missing ones are skipped.
pub struct NavChrome {
    navbar: Option<Element>,
    progress: Option<HtmlElement>,
    comet: Option<HtmlElement>,
    scroll_top: Option<Element>,
    links: Vec<Element>,
}

impl NavChrome {
    pub fn find() -> MotionResult<Self> {
        let html = |id: &str| dom::typed_by_id::<HtmlElement>(id, "HTMLElement").ok();
        Ok(Self {
            navbar: dom::element_by_id(ids::NAVBAR).ok(),
            progress: html(ids::SCROLL_PROGRESS),
            comet: html(ids::SCROLL_COMET),
            scroll_top: dom::element_by_id(ids::SCROLL_TOP).ok(),
            links: dom::query_all(ids::NAV_LINK_SELECTOR)?,
        })
    }
}

impl ScrollSink for NavChrome {
    fn show_progress(&mut self, percent: f64) {
        let lit = percent > 0.0;
        if let Some(bar) = &self.progress {
            set_style(bar, "width", &format!("{percent}%"));
            set_style(bar, "opacity", if lit { "1" } else { "0" });
        }
        if let Some(comet) = &self.comet {
            set_style(comet, "left", &format!("{percent}%"));
            set_style(comet, "opacity", if lit { "1" } else { "0" });
            set_style(
                comet,
                "transform",
                if lit {
                    "translateY(-50%) scale(1)"
                } else {
                    "translateY(-50%) scale(0)"
                },
            );
        }
    }

    fn set_scrolled(&mut self, scrolled: bool) {
        if let Some(nav) = &self.navbar {
            toggle_class(nav, ids::CLASS_SCROLLED, scrolled);
        }
    }

    fn set_active(&mut self, active: Option<SectionId>) {
        for link in &self.links {
            let section = link
                .get_attribute("href")
                .and_then(|href| SectionId::from_str(&href));
            toggle_class(link, ids::CLASS_ACTIVE, section.is_some() && section == active);
        }
    }

    fn set_scroll_top_visible(&mut self, visible: bool) {
        if let Some(button) = &self.scroll_top {
            toggle_class(button, ids::CLASS_SHOW, visible);
        }
    }
}

/// The loading overlay: percent label, status line and SVG ring
pub struct LoadingOverlay {
    screen: Element,
    percent: Option<Element>,
    status: Option<Element>,
    ring: Option<Element>,
}

impl LoadingOverlay {
    pub fn find() -> MotionResult<Self> {
        Ok(Self {
            screen: dom::element_by_id(ids::LOADING_SCREEN)?,
            percent: dom::element_by_id(ids::LOADING_PERCENT).ok(),
            status: dom::element_by_id(ids::LOADING_STATUS).ok(),
            ring: dom::element_by_id(ids::LOADING_RING).ok(),
        })
    }
}

impl LoadingSurface for LoadingOverlay {
    fn render(&mut self, view: &LoadingView) {
        if let Some(el) = &self.percent {
            el.set_text_content(Some(&format!("{}%", view.percent)));
        }
        if let Some(el) = &self.status {
            el.set_text_content(Some(view.status));
        }
        if let Some(el) = &self.ring {
            let _ = el.set_attribute("stroke-dashoffset", &format!("{:.2}", view.ring_dash_offset));
        }
    }

    fn dismiss(&mut self) {
        toggle_class(&self.screen, ids::CLASS_HIDDEN, true);
        let _ = self.screen.set_attribute("aria-hidden", "true");
    }
}

/// Any element whose text content is driven by an animator
pub struct TextElement {
    el: Element,
}

impl TextElement {
    pub fn new(el: Element) -> Self {
        Self { el }
    }

}

impl CounterSink for TextElement {
    fn show(&mut self, value: u32) {
        self.el.set_text_content(Some(&value.to_string()));
    }
}

impl TextSink for TextElement {
    fn set_text(&mut self, text: &str) {
        self.el.set_text_content(Some(text));
    }
}

/// Scroll lock that freezes the page with `body { overflow: hidden }`
pub fn body_overflow_lock() -> ScrollLock {
    ScrollLock::with_observer(|locked| {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            log::warn!("Scroll lock style failed: {:?}", e);
        }
    })
}

pub fn set_footer_year() -> MotionResult<()> {
    let el = dom::element_by_id(ids::FOOTER_YEAR)?;
    let year = js_sys::Date::new_0().get_full_year();
    el.set_text_content(Some(&year.to_string()));
    Ok(())
}

/// Colour every `.tech-tag[data-tech]` and stamp its glyph name.
/// Returns how many tags fell back to the generated style.
pub fn paint_tech_tags(icons: &IconResolver) -> MotionResult<usize> {
    let mut fallbacks = 0;
    for tag in dom::query_all(ids::TECH_TAG_SELECTOR)? {
        let Some(name) = tag.get_attribute("data-tech") else {
            continue;
        };
        let style = icons.resolve(&name);
        if style.fallback {
            fallbacks += 1;
        }
        let _ = tag.set_attribute("data-icon", &style.glyph);
        if let Some(tag) = tag.dyn_ref::<HtmlElement>() {
            set_style(tag, "--tech-color", &style.color);
        }
    }
    Ok(fallbacks)
}
