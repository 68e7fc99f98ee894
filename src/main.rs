//! Folio Motion entry point
//!
//! Wires the motion core to the page in the browser. Native builds replay
//! a loading sequence headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{
        Element, HtmlCanvasElement, HtmlElement, MouseEvent, PageTransitionEvent, ScrollBehavior,
        ScrollToOptions,
    };

    use folio_motion::anim::{
        CounterAnimation, CursorGlow, Ease, MagneticButton, ParticleCanvas, ParticleField,
        ScrollCompanion, TypingEffect, particle_count,
    };
    use folio_motion::icons::IconResolver;
    use folio_motion::loading::{LoadingDriver, Readiness};
    use folio_motion::platform::adapters::{
        Canvas2d, GlowElement, LoadingOverlay, MagneticElement, NavChrome, TextElement, TiltCard,
        WindowScroll, body_overflow_lock, paint_tech_tags, set_footer_year,
    };
    use folio_motion::platform::dom::{self, Listener, Observer};
    use folio_motion::platform::frame_loop::FrameLoop;
    use folio_motion::platform::{PageHide, ids, parse_count, parse_phrases};
    use folio_motion::renderer::{CompanionRenderer, RenderState};
    use folio_motion::reveal::{RevealController, RevealEffect, RevealOptions};
    use folio_motion::sched::AnimatorHandle;
    use folio_motion::scroll::{ScrollCoordinator, SectionId};
    use folio_motion::{MotionError, MotionResult, PointerState, ScrollLock, ScrollLockGuard, Settings};

    type Loading = Rc<RefCell<LoadingDriver<LoadingOverlay>>>;
    type Particles = Rc<RefCell<ParticleField<Canvas2d>>>;
    type Typing = Rc<RefCell<TypingEffect<TextElement>>>;
    type Scroll = Rc<RefCell<ScrollCoordinator<WindowScroll, NavChrome>>>;
    type Companion = Rc<RefCell<ScrollCompanion<CompanionRenderer>>>;
    type Reveals = Rc<RefCell<RevealController<u32>>>;

    /// Attribute linking an observed element to its reveal entry
    const REVEAL_KEY_ATTR: &str = "data-reveal-key";

    thread_local! {
        /// The `pagehide` listener outlives the site it tears down
        static PAGE_HIDE: RefCell<Option<Listener>> = const { RefCell::new(None) };
    }

    /// Everything the page keeps alive; `teardown` releases all of it
    struct Site {
        frame_loop: FrameLoop,
        loading: Option<Loading>,
        particles: Option<Particles>,
        typing: Option<Typing>,
        companion: Rc<RefCell<Option<Companion>>>,
        reveals: Option<Reveals>,
        menu: Option<MobileMenu>,
        listeners: Vec<Listener>,
        observers: Vec<Observer>,
    }

    impl Site {
        fn teardown(mut self) {
            log::info!("Tearing down motion effects");
            self.frame_loop.shutdown();
            if let Some(loading) = &self.loading {
                loading.borrow_mut().teardown();
            }
            if let Some(particles) = &self.particles {
                particles.borrow_mut().stop();
            }
            if let Some(typing) = &self.typing {
                typing.borrow_mut().stop();
            }
            if let Some(companion) = self.companion.borrow_mut().take() {
                companion.borrow_mut().stop();
            }
            if let Some(reveals) = &self.reveals {
                reveals.borrow_mut().detach_all();
            }
            if let Some(menu) = &self.menu {
                menu.set_open(false);
            }
            self.listeners.clear();
            self.observers.clear();
        }
    }

    /// Log a wiring failure and carry on without that effect
    fn optional<T>(what: &str, result: MotionResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("{} disabled: {}", what, e);
                None
            }
        }
    }

    /// Mobile navigation toggle; an open menu holds the scroll lock
    #[derive(Clone)]
    struct MobileMenu {
        toggle: Element,
        links: Element,
        lock: ScrollLock,
        guard: Rc<RefCell<Option<ScrollLockGuard>>>,
    }

    impl MobileMenu {
        fn find(lock: &ScrollLock) -> MotionResult<Self> {
            Ok(Self {
                toggle: dom::element_by_id(ids::NAV_TOGGLE)?,
                links: dom::element_by_id(ids::NAV_LINKS)?,
                lock: lock.clone(),
                guard: Rc::new(RefCell::new(None)),
            })
        }

        fn is_open(&self) -> bool {
            self.links.class_list().contains(ids::CLASS_OPEN)
        }

        fn set_open(&self, open: bool) {
            let _ = self.links.class_list().toggle_with_force(ids::CLASS_OPEN, open);
            let _ = self
                .toggle
                .class_list()
                .toggle_with_force(ids::CLASS_ACTIVE, open);
            let mut guard = self.guard.borrow_mut();
            match (open, guard.is_some()) {
                (true, false) => *guard = Some(self.lock.acquire()),
                (false, true) => *guard = None,
                _ => {}
            }
        }
    }

    fn smooth_scroll_to(top: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }

    fn start_loading(
        frame_loop: &FrameLoop,
        settings: &Settings,
        lock: &ScrollLock,
        listeners: &mut Vec<Listener>,
    ) -> MotionResult<Loading> {
        let overlay = LoadingOverlay::find()?;
        let now = dom::now_ms();
        let driver = Rc::new(RefCell::new(LoadingDriver::start(
            now,
            settings.loading,
            lock,
            overlay,
        )));
        let handle: AnimatorHandle = driver.clone();
        frame_loop.schedule("loading", &handle);

        let window = dom::window()?;
        let document = dom::document()?;

        match dom::fonts_ready(&document) {
            Some(ready) => {
                let driver = driver.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(ready).await {
                        log::warn!("document.fonts.ready rejected: {:?}", e);
                    }
                    driver.borrow_mut().signal(Readiness::Fonts, dom::now_ms());
                });
            }
            None => {
                log::info!("No font loading API, treating fonts as ready");
                driver.borrow_mut().signal(Readiness::Fonts, now);
            }
        }

        if dom::page_loaded(&document) {
            driver.borrow_mut().signal(Readiness::PageLoad, now);
        } else {
            let driver = driver.clone();
            listeners.push(Listener::new(&window, "load", move |_| {
                driver.borrow_mut().signal(Readiness::PageLoad, dom::now_ms());
            })?);
        }

        Ok(driver)
    }

    fn pointer_of(event: &web_sys::Event) -> Option<Vec2> {
        let event = event.dyn_ref::<MouseEvent>()?;
        Some(Vec2::new(event.client_x() as f32, event.client_y() as f32))
    }

    fn track_pointer(pointer: &PointerState, listeners: &mut Vec<Listener>) -> MotionResult<()> {
        let pointer = pointer.clone();
        listeners.push(Listener::passive(&dom::window()?, "mousemove", move |event| {
            if let Some(pos) = pointer_of(&event) {
                pointer.set(pos);
            }
        })?);
        Ok(())
    }

    fn start_cursor_glow(frame_loop: &FrameLoop, listeners: &mut Vec<Listener>) -> MotionResult<()> {
        let glow = Rc::new(RefCell::new(CursorGlow::new(GlowElement::find()?)));
        let handle: AnimatorHandle = glow.clone();
        let frame_loop = frame_loop.clone();
        listeners.push(Listener::passive(&dom::window()?, "mousemove", move |event| {
            let Some(target) = pointer_of(&event) else {
                return;
            };
            if glow.borrow_mut().set_target(target) {
                frame_loop.schedule("cursor-glow", &handle);
            }
        })?);
        Ok(())
    }

    fn start_magnetic(frame_loop: &FrameLoop, listeners: &mut Vec<Listener>) -> MotionResult<()> {
        let elements = dom::query_all(ids::MAGNETIC_SELECTOR)?;
        for el in &elements {
            let Some(el) = el.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let button = Rc::new(RefCell::new(MagneticButton::new(MagneticElement::new(el.clone()))));
            let handle: AnimatorHandle = button.clone();

            let pulled = button.clone();
            let pulled_handle = handle.clone();
            let pulled_loop = frame_loop.clone();
            listeners.push(Listener::passive(el, "mousemove", move |event| {
                let Some(pointer) = pointer_of(&event) else {
                    return;
                };
                let woke = {
                    let mut button = pulled.borrow_mut();
                    let from_centre = button.surface().from_centre(pointer);
                    button.pull(from_centre)
                };
                if woke {
                    pulled_loop.schedule("magnetic", &pulled_handle);
                }
            })?);

            let frame_loop = frame_loop.clone();
            listeners.push(Listener::new(el, "mouseleave", move |_| {
                let woke = button.borrow_mut().release();
                if woke {
                    frame_loop.schedule("magnetic", &handle);
                }
            })?);
        }
        log::info!("Magnetic buttons: {}", elements.len());
        Ok(())
    }

    fn start_tilt(listeners: &mut Vec<Listener>) -> MotionResult<()> {
        let elements = dom::query_all(ids::TILT_SELECTOR)?;
        for el in &elements {
            let Some(el) = el.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let card = TiltCard::new(el.clone());
            let moved = card.clone();
            listeners.push(Listener::passive(el, "mousemove", move |event| {
                if let Some(pointer) = pointer_of(&event) {
                    moved.follow(pointer);
                }
            })?);
            listeners.push(Listener::new(el, "mouseleave", move |_| card.rest())?);
        }
        log::info!("Tilt cards: {}", elements.len());
        Ok(())
    }

    fn start_particles(
        frame_loop: &FrameLoop,
        settings: &Settings,
        pointer: &PointerState,
        listeners: &mut Vec<Listener>,
        observers: &mut Vec<Observer>,
    ) -> MotionResult<Particles> {
        let canvas = Canvas2d::find(ids::HERO_CANVAS)?;
        let element: Element = canvas.element().clone().into();
        let count = particle_count(canvas.size().x, settings.effective_particles());
        let seed = js_sys::Date::now() as u64;
        log::info!("Particle field: {} particles (seed {})", count, seed);

        let field = Rc::new(RefCell::new(ParticleField::new(canvas, count, pointer.clone(), seed)));
        let handle: AnimatorHandle = field.clone();
        frame_loop.schedule("particles", &handle);

        let observer = {
            let field = field.clone();
            Observer::new(0.0, "0px", move |_, hit, _| {
                field.borrow_mut().set_visible(hit.is_intersecting);
            })?
        };
        observer.observe(&element);
        observers.push(observer);

        let resized = field.clone();
        listeners.push(Listener::new(&dom::window()?, "resize", move |_| {
            resized.borrow_mut().canvas_mut().fit_window();
        })?);

        Ok(field)
    }

    fn start_typing(frame_loop: &FrameLoop) -> MotionResult<Typing> {
        let el = dom::element_by_id(ids::TYPING_TEXT)?;
        let phrases = match el.get_attribute("data-phrases") {
            Some(raw) => parse_phrases(&raw)?,
            None => Vec::new(),
        };
        let typing = Rc::new(RefCell::new(TypingEffect::new(TextElement::new(el), phrases)));
        let handle: AnimatorHandle = typing.clone();
        frame_loop.schedule("typing", &handle);
        Ok(typing)
    }

    fn start_scroll(
        frame_loop: &FrameLoop,
        menu: Option<&MobileMenu>,
        listeners: &mut Vec<Listener>,
    ) -> MotionResult<Scroll> {
        let window = dom::window()?;
        let coordinator = Rc::new(RefCell::new(ScrollCoordinator::new(
            WindowScroll::new()?,
            NavChrome::find()?,
        )));
        coordinator.borrow_mut().update();

        {
            let coordinator = coordinator.clone();
            let handle: AnimatorHandle = coordinator.clone();
            let frame_loop = frame_loop.clone();
            listeners.push(Listener::passive(&window, "scroll", move |_| {
                if coordinator.borrow_mut().on_scroll() {
                    frame_loop.schedule("scroll", &handle);
                }
            })?);
        }

        for anchor in dom::query_all(ids::ANCHOR_SELECTOR)? {
            let Some(section) = anchor
                .get_attribute("href")
                .and_then(|href| SectionId::from_str(&href))
            else {
                continue;
            };
            let coordinator = coordinator.clone();
            let menu = menu.cloned();
            listeners.push(Listener::new(&anchor, "click", move |event| {
                if let Some(menu) = &menu {
                    menu.set_open(false);
                }
                let top = match section {
                    SectionId::Hero => Some(0.0),
                    _ => coordinator.borrow().anchor_target(section),
                };
                if let Some(top) = top {
                    event.prevent_default();
                    smooth_scroll_to(top);
                }
            })?);
        }

        if let Ok(button) = dom::element_by_id(ids::SCROLL_TOP) {
            listeners.push(Listener::new(&button, "click", |_| smooth_scroll_to(0.0))?);
        }

        Ok(coordinator)
    }

    fn start_menu(lock: &ScrollLock, listeners: &mut Vec<Listener>) -> MotionResult<MobileMenu> {
        let menu = MobileMenu::find(lock)?;
        let toggled = menu.clone();
        listeners.push(Listener::new(&menu.toggle, "click", move |_| {
            toggled.set_open(!toggled.is_open());
        })?);
        Ok(menu)
    }

    fn start_reveals(
        frame_loop: &FrameLoop,
        settings: &Settings,
        observers: &mut Vec<Observer>,
    ) -> MotionResult<Reveals> {
        let reveal = &settings.reveal;
        let entrance = RevealOptions::entrance(reveal);
        let counter = RevealOptions::counter(reveal);
        let ease = Ease::out_with_exponent(reveal.counter_exponent);

        let mut targets: Vec<(Element, RevealEffect, RevealOptions)> = Vec::new();
        for el in dom::query_all(ids::ENTRANCE_SELECTOR)? {
            targets.push((el, RevealEffect::Entrance, entrance));
        }
        for el in dom::query_all(ids::COUNTER_SELECTOR)? {
            let Some(target) = el.get_attribute("data-count").as_deref().and_then(parse_count) else {
                log::warn!("Counter with unreadable data-count skipped");
                continue;
            };
            let effect = RevealEffect::Counter {
                target,
                duration_ms: reveal.counter_duration_ms,
                ease,
            };
            targets.push((el, effect, counter));
        }

        let controller: Reveals = Rc::new(RefCell::new(RevealController::new()));

        // Nothing animates under reduced motion; jump to the end state
        if settings.reduced_motion {
            for (el, effect, _) in &targets {
                start_reveal(frame_loop, el, *effect, true);
            }
            return Ok(controller);
        }

        let mut by_options: Vec<(RevealOptions, Observer)> = Vec::new();
        for (key, (el, effect, options)) in (0u32..).zip(targets) {
            controller.borrow_mut().register(key, effect, options);
            let _ = el.set_attribute(REVEAL_KEY_ATTR, &key.to_string());

            if let Some((_, observer)) = by_options.iter().find(|(o, _)| *o == options) {
                observer.observe(&el);
                continue;
            }
            let observer = {
                let controller = controller.clone();
                let frame_loop = frame_loop.clone();
                Observer::new(options.threshold, &options.root_margin(), move |el, hit, observer| {
                    let Some(key) = el
                        .get_attribute(REVEAL_KEY_ATTR)
                        .and_then(|k| k.parse::<u32>().ok())
                    else {
                        return;
                    };
                    let Some(effect) = controller.borrow_mut().on_intersection(&key, hit) else {
                        return;
                    };
                    observer.unobserve(el);
                    controller.borrow_mut().detach(&key);
                    start_reveal(&frame_loop, el, effect, false);
                })?
            };
            observer.observe(&el);
            by_options.push((options, observer));
        }
        observers.extend(by_options.into_iter().map(|(_, observer)| observer));

        log::info!("Observing {} reveal targets", controller.borrow().len());
        Ok(controller)
    }

    fn start_reveal(frame_loop: &FrameLoop, el: &Element, effect: RevealEffect, instant: bool) {
        match effect {
            RevealEffect::Entrance => {
                let _ = el.class_list().add_1(ids::CLASS_VISIBLE);
            }
            RevealEffect::Counter { target, .. } if instant => {
                el.set_text_content(Some(&target.to_string()));
            }
            RevealEffect::Counter {
                target,
                duration_ms,
                ease,
            } => {
                let counter: AnimatorHandle = Rc::new(RefCell::new(CounterAnimation::new(
                    TextElement::new(el.clone()),
                    target,
                    duration_ms,
                    ease,
                    dom::now_ms(),
                )));
                frame_loop.schedule("counter", &counter);
            }
        }
    }

    /// Canvas size in CSS px and in physical px
    fn canvas_sizes(canvas: &HtmlCanvasElement) -> (Vec2, (u32, u32)) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let css = (canvas.client_width().max(1), canvas.client_height().max(1));
        let physical = (
            (f64::from(css.0) * dpr) as u32,
            (f64::from(css.1) * dpr) as u32,
        );
        (Vec2::new(css.0 as f32, css.1 as f32), physical)
    }

    async fn start_companion(settings: &Settings) -> MotionResult<(Companion, HtmlCanvasElement)> {
        let canvas: HtmlCanvasElement = dom::typed_by_id(ids::COMPANION_CANVAS, "canvas")?;
        let (viewport, (width, height)) = canvas_sizes(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| MotionError::renderer(format!("create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| MotionError::renderer(format!("request adapter: {e}")))?;

        log::info!("Companion adapter: {:?}", adapter.get_info().name);

        let state = RenderState::new(surface, &adapter, width, height).await?;
        let renderer = CompanionRenderer::new(state, viewport);
        let companion = Rc::new(RefCell::new(ScrollCompanion::new(
            renderer,
            settings.trail_capacity(),
        )));
        Ok((companion, canvas))
    }

    fn build(settings: &Settings) -> MotionResult<Site> {
        let frame_loop = FrameLoop::new();
        let lock = body_overflow_lock();
        let pointer = PointerState::new();
        let mut listeners = Vec::new();
        let mut observers = Vec::new();

        let loading = optional(
            "Loading screen",
            start_loading(&frame_loop, settings, &lock, &mut listeners),
        );
        let menu = optional("Mobile menu", start_menu(&lock, &mut listeners));
        optional(
            "Scroll chrome",
            start_scroll(&frame_loop, menu.as_ref(), &mut listeners),
        );
        let reveals = optional(
            "Reveals",
            start_reveals(&frame_loop, settings, &mut observers),
        );
        optional("Footer year", set_footer_year());
        if let Some(icons) = optional("Tech icons", IconResolver::builtin())
            && let Some(fallbacks) = optional("Tech tags", paint_tech_tags(&icons))
            && fallbacks > 0
        {
            log::info!("{} tech tags use the fallback icon", fallbacks);
        }

        let mut particles = None;
        let mut typing = None;
        if settings.reduced_motion {
            log::info!("Reduced motion: decorative loops stay off");
        } else {
            if settings.effective_cursor_glow() {
                optional("Cursor glow", start_cursor_glow(&frame_loop, &mut listeners));
            }
            if settings.effective_particles() > 0 {
                optional("Pointer tracking", track_pointer(&pointer, &mut listeners));
                particles = optional(
                    "Particles",
                    start_particles(&frame_loop, settings, &pointer, &mut listeners, &mut observers),
                );
            }
            typing = optional("Typing effect", start_typing(&frame_loop));
            optional("Magnetic buttons", start_magnetic(&frame_loop, &mut listeners));
            optional("Tilt cards", start_tilt(&mut listeners));
        }

        Ok(Site {
            frame_loop,
            loading,
            particles,
            typing,
            companion: Rc::new(RefCell::new(None)),
            reveals,
            menu,
            listeners,
            observers,
        })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Folio Motion starting...");
        let settings = Settings::load();

        let site = match build(&settings) {
            Ok(site) => Rc::new(RefCell::new(Some(site))),
            Err(e) => {
                log::error!("Motion setup failed: {}", e);
                return;
            }
        };

        // Tear everything down when the page really goes away. A page frozen
        // into the back/forward cache keeps its effects for the restore.
        let on_hide = {
            let site = site.clone();
            dom::window().and_then(|window| {
                Listener::new(&window, "pagehide", move |event| {
                    let persisted = event
                        .dyn_ref::<PageTransitionEvent>()
                        .is_some_and(|e| e.persisted());
                    let hide = PageHide::from_persisted(persisted);
                    log::debug!("pagehide: {:?}", hide);
                    if !hide.tears_down() {
                        return;
                    }
                    let taken = site.borrow_mut().take();
                    if let Some(site) = taken {
                        site.teardown();
                    }
                })
            })
        };
        if let Some(listener) = optional("Page lifecycle", on_hide) {
            PAGE_HIDE.with(|slot| *slot.borrow_mut() = Some(listener));
        }

        log::info!("Folio Motion running!");

        if !settings.effective_companion() {
            return;
        }
        let (companion, canvas) = match start_companion(&settings).await {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("Scroll companion disabled: {}", e);
                return;
            }
        };

        let mut guard = site.borrow_mut();
        let Some(site) = guard.as_mut() else {
            // Page went away while the GPU was coming up
            return;
        };
        let handle: AnimatorHandle = companion.clone();
        site.frame_loop.schedule("companion", &handle);
        *site.companion.borrow_mut() = Some(companion);

        let slot = site.companion.clone();
        let resize = dom::window().and_then(|window| {
            Listener::new(&window, "resize", move |_| {
                let (viewport, physical) = canvas_sizes(&canvas);
                canvas.set_width(physical.0);
                canvas.set_height(physical.1);
                if let Some(companion) = slot.borrow().as_ref() {
                    companion
                        .borrow_mut()
                        .renderer_mut()
                        .resize(viewport, physical);
                }
            })
        });
        if let Some(listener) = optional("Companion resize", resize) {
            site.listeners.push(listener);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_site::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Folio Motion (native) starting...");
    log::info!("The effects need a browser - build for wasm32 and serve index.html");

    replay_loading_sequence();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the loading screen against a logging surface, one 16 ms frame at a
/// time: page load at 50 ms, fonts at 100 ms.
#[cfg(not(target_arch = "wasm32"))]
fn replay_loading_sequence() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use folio_motion::loading::{LoadingDriver, LoadingSurface, LoadingView, Readiness};
    use folio_motion::sched::{AnimatorHandle, FrameScheduler};
    use folio_motion::{ScrollLock, Settings};

    #[derive(Default)]
    struct LogSurface {
        last_percent: Option<u8>,
    }

    impl LoadingSurface for LogSurface {
        fn render(&mut self, view: &LoadingView) {
            if self.last_percent != Some(view.percent) {
                log::info!("{:>3}% {}", view.percent, view.status);
                self.last_percent = Some(view.percent);
            }
        }

        fn dismiss(&mut self) {
            log::info!("Loading screen dismissed");
        }
    }

    let settings = Settings::load();
    let lock = ScrollLock::with_observer(|locked| log::info!("Scroll locked: {}", locked));
    let driver = Rc::new(RefCell::new(LoadingDriver::start(
        0.0,
        settings.loading,
        &lock,
        LogSurface::default(),
    )));
    let handle: AnimatorHandle = driver.clone();
    let mut scheduler = FrameScheduler::new();
    scheduler.register("loading", handle);

    let mut signals = vec![(100.0, Readiness::Fonts), (50.0, Readiness::PageLoad)];
    let mut now = 0.0;
    while !scheduler.is_empty() && now < 10_000.0 {
        now += 16.0;
        while let Some(&(at, which)) = signals.last() {
            if at > now {
                break;
            }
            driver.borrow_mut().signal(which, at);
            signals.pop();
        }
        scheduler.run_frame(now);
    }

    println!(
        "Loading finished at ~{:.0} ms, scroll locked: {}",
        now,
        lock.is_locked()
    );
}
