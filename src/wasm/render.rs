use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, HtmlElement, HtmlInputElement, Performance, Window};

use super::dom::{self, DomInputSource, PageElement};
use super::pipeline::{self, WebGlSurface};
use crate::clock::{Clock, FrameClock};
use crate::config::EffectConfig;
use crate::effect::{attach, Effect};
use crate::error::EffectError;
use crate::render::RenderLoop;

/// `performance.now()`: milliseconds since page load.
#[derive(Clone)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self, EffectError> {
        let performance = window
            .performance()
            .ok_or_else(|| EffectError::Js("performance API unavailable".into()))?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        self.performance.now()
    }
}

/// Frame clock driven by `requestAnimationFrame`.
pub struct AnimationFrameClock {
    window: Window,
    clock: PerformanceClock,
}

impl AnimationFrameClock {
    pub fn new(window: Window, clock: PerformanceClock) -> Self {
        Self { window, clock }
    }
}

impl Clock for AnimationFrameClock {
    fn now(&self) -> f64 {
        self.clock.now()
    }
}

impl FrameClock for AnimationFrameClock {
    async fn next_frame(&mut self) -> bool {
        let window = self.window.clone();
        let frame = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(e) = window.request_animation_frame(&resolve) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        });
        match JsFuture::from(frame).await {
            Ok(_) => true,
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                false
            }
        }
    }
}

/// Wires the page up and starts the render loop.
pub fn start() -> Result<(), EffectError> {
    let window = window().ok_or_else(|| EffectError::Js("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| EffectError::Js("no document".into()))?;

    let defaults = EffectConfig::default();
    let canvas: web_sys::HtmlCanvasElement = dom::query(&document, &defaults.canvas_selector)?;
    let (config, rejected) = defaults.with_overrides(|key| canvas.get_attribute(key));
    console_log::init_with_level(config.log_level).ok();
    for e in rejected {
        log::warn!("ignoring canvas override: {e}");
    }
    log::info!("ring shape starting");

    let page: HtmlElement = dom::query(&document, &config.page_selector)?;
    let toggle: HtmlInputElement = dom::query(&document, &config.switch_selector)?;
    let vertex_source = dom::shader_source(&document, &config.vertex_shader_id)?;
    let fragment_source = dom::shader_source(&document, &config.fragment_shader_id)?;

    let gl = match pipeline::context(&canvas) {
        Ok(gl) => gl,
        Err(e) => {
            dom::alert(&window, &e.to_string());
            return Err(e);
        }
    };
    log::info!("WebGL context acquired");
    let surface = WebGlSurface::build(gl, canvas, &vertex_source, &fragment_source)?;

    let viewport = dom::window_size(&window)?;
    let effect = Rc::new(RefCell::new(Effect::new(
        surface,
        PageElement::new(page.clone()),
        config,
        viewport,
    )));
    effect.borrow_mut().resize(viewport.width, viewport.height);

    let clock = PerformanceClock::new(&window)?;
    let mut input = DomInputSource::new(window.clone(), page, toggle);
    attach(&mut input, effect.clone(), Rc::new(clock.clone()))?;

    let mut frames = AnimationFrameClock::new(window, clock);
    spawn_local(async move {
        let mut render_loop = RenderLoop::new();
        if let Err(e) = render_loop.run(&effect, &mut frames).await {
            log::error!("{e}");
        }
    });
    Ok(())
}
