use std::cell::RefCell;
use std::rc::Rc;

use crate::clock::Clock;
use crate::config::EffectConfig;
use crate::input::{
    normalize, ClickOrigin, ClickState, EventKind, InputEvent, InputSource, PointerState, Viewport,
};
use crate::surface::{PageStyle, Surface};
use crate::uniforms::Uniform;

/// Opaque or transparent rendering, driven by the page's toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Opaque,
    Transparent,
}

impl DisplayMode {
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            DisplayMode::Transparent
        } else {
            DisplayMode::Opaque
        }
    }

    pub fn uniform_value(self) -> f32 {
        match self {
            DisplayMode::Opaque => 0.0,
            DisplayMode::Transparent => 1.0,
        }
    }

    pub fn text_color(self, config: &EffectConfig) -> &str {
        match self {
            DisplayMode::Opaque => &config.opaque_text_color,
            DisplayMode::Transparent => &config.transparent_text_color,
        }
    }
}

/// All mutable state of the effect plus the outputs it writes to.
///
/// One instance exists per page. Input handlers and the render loop share it
/// through `Rc<RefCell<_>>`; everything runs on the UI thread.
pub struct Effect<S, P> {
    surface: S,
    page: P,
    config: EffectConfig,
    pointer: PointerState,
    click: ClickState,
    viewport: Viewport,
    mode: DisplayMode,
}

impl<S: Surface, P: PageStyle> Effect<S, P> {
    pub fn new(surface: S, page: P, config: EffectConfig, viewport: Viewport) -> Self {
        Self {
            surface,
            page,
            config,
            pointer: PointerState::offscreen(viewport),
            click: ClickState::default(),
            viewport,
            mode: DisplayMode::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn click(&self) -> ClickState {
        self.click
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn handle(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::PointerMove { x, y } => self.pointer_moved(x, y),
            InputEvent::TouchMove { touches } => self.touch_moved(&touches),
            InputEvent::Click { x, y, origin } => {
                self.clicked(x, y, origin, now);
            }
            InputEvent::ToggleChange { checked } => self.toggle_changed(checked),
        }
    }

    /// Matches the canvas backing store and viewport to the window.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.surface.set_canvas_size(width as u32, height as u32);
        self.surface.viewport(0, 0, width as i32, height as i32);
        self.surface
            .set_float(Uniform::Ratio, self.viewport.aspect() as f32);
        log::debug!("resized to {width}x{height}");
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.set_target(x, y);
    }

    /// Follows the first touch; an empty touch list is ignored.
    pub fn touch_moved(&mut self, touches: &[(f64, f64)]) {
        if let Some(&(x, y)) = touches.first() {
            self.pointer.set_target(x, y);
        }
    }

    /// Records a click and moves the ripple origin there.
    ///
    /// Clicks on the mode toggle are swallowed so that flipping it does not
    /// also fire the ripple. Returns whether the click was recorded.
    pub fn clicked(&mut self, x: f64, y: f64, origin: ClickOrigin, now: f64) -> bool {
        if origin == ClickOrigin::Toggle {
            log::trace!("click on mode toggle ignored");
            return false;
        }
        self.pointer.set_target(x, y);
        let (u, v) = normalize(x, y, self.viewport);
        self.surface.set_vec2(Uniform::Click, u, v);
        self.click.record(now);
        true
    }

    pub fn toggle_changed(&mut self, checked: bool) {
        self.mode = DisplayMode::from_checked(checked);
        self.surface
            .set_float(Uniform::Transparency, self.mode.uniform_value());
        self.page.set_text_color(self.mode.text_color(&self.config));
        log::info!("display mode: {:?}", self.mode);
    }

    /// One frame: update time uniforms, draw, then ease the pointer.
    pub fn tick(&mut self, now: f64) {
        self.surface.set_float(Uniform::Time, now as f32);
        if let Some(elapsed) = self.click.elapsed(now) {
            self.surface.set_float(Uniform::ClickTime, elapsed as f32);
        }

        self.surface.clear();
        self.surface.draw_quad();

        self.pointer.ease(self.config.easing);
        let (u, v) = normalize(self.pointer.x, self.pointer.y, self.viewport);
        self.surface.set_vec2(Uniform::Pointer, u, v);
    }
}

/// Routes every event kind from `source` into `effect`, stamping each event
/// with `clock`'s current time.
pub fn attach<I, S, P, C>(
    source: &mut I,
    effect: Rc<RefCell<Effect<S, P>>>,
    clock: Rc<C>,
) -> Result<(), I::Error>
where
    I: InputSource,
    S: Surface + 'static,
    P: PageStyle + 'static,
    C: Clock + 'static,
{
    for kind in EventKind::ALL {
        let effect = effect.clone();
        let clock = clock.clone();
        source.subscribe(
            kind,
            Box::new(move |event| {
                let now = clock.now();
                effect.borrow_mut().handle(event, now);
            }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::clock::VirtualClock;
    use crate::input::Handler;
    use crate::surface::recording::{Call, RecordingPage, RecordingSurface};

    type TestEffect = Effect<RecordingSurface, RecordingPage>;

    fn effect(width: f64, height: f64) -> TestEffect {
        let mut fx = Effect::new(
            RecordingSurface::default(),
            RecordingPage::default(),
            EffectConfig::default(),
            Viewport::new(width, height),
        );
        fx.resize(width, height);
        fx.surface().take();
        fx
    }

    #[derive(Default)]
    struct ScriptedInput {
        handlers: HashMap<EventKind, Vec<Handler>>,
    }

    impl ScriptedInput {
        fn fire(&mut self, event: InputEvent) {
            for handler in self.handlers.get_mut(&event.kind()).into_iter().flatten() {
                handler(event.clone());
            }
        }
    }

    impl InputSource for ScriptedInput {
        type Error = ();

        fn subscribe(&mut self, kind: EventKind, handler: Handler) -> Result<(), ()> {
            self.handlers.entry(kind).or_default().push(handler);
            Ok(())
        }
    }

    #[test]
    fn resize_sets_canvas_viewport_and_ratio() {
        let mut fx = effect(100.0, 100.0);
        fx.resize(1920.0, 1080.0);
        assert_eq!(
            fx.surface().take(),
            vec![
                Call::CanvasSize(1920, 1080),
                Call::Viewport(0, 0, 1920, 1080),
                Call::Float(Uniform::Ratio, (1920.0f64 / 1080.0) as f32),
            ]
        );
        assert_eq!(fx.viewport(), Viewport::new(1920.0, 1080.0));
    }

    #[test]
    fn tick_runs_steps_in_order() {
        let mut fx = effect(200.0, 100.0);
        fx.pointer_moved(100.0, 50.0);
        fx.tick(16.0);
        let calls = fx.surface().take();
        assert_eq!(calls[0], Call::Float(Uniform::Time, 16.0));
        assert_eq!(calls[1], Call::Clear);
        assert_eq!(calls[2], Call::DrawQuad);
        assert!(matches!(calls[3], Call::Vec2(Uniform::Pointer, _, _)));
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn click_time_untouched_before_first_click() {
        let mut fx = effect(640.0, 480.0);
        for frame in 0..5 {
            fx.tick(frame as f64 * 16.0);
        }
        assert!(fx.surface().writes_to(Uniform::ClickTime).is_empty());
    }

    #[test]
    fn click_time_counts_from_click() {
        let mut fx = effect(640.0, 480.0);
        assert!(fx.clicked(320.0, 120.0, ClickOrigin::Page, 1000.0));
        assert_eq!(
            fx.surface().take(),
            vec![Call::Vec2(Uniform::Click, 0.5, 0.75)]
        );
        fx.tick(1337.5);
        assert_eq!(
            fx.surface().writes_to(Uniform::ClickTime),
            vec![Call::Float(Uniform::ClickTime, 337.5)]
        );
        assert_eq!(
            (fx.pointer().target_x, fx.pointer().target_y),
            (320.0, 120.0)
        );
    }

    #[test]
    fn toggle_clicks_are_ignored() {
        let mut fx = effect(640.0, 480.0);
        assert!(!fx.clicked(10.0, 10.0, ClickOrigin::Toggle, 500.0));
        assert!(fx.surface().take().is_empty());
        assert!(!fx.click().clicked);
        let before = fx.pointer();
        assert_eq!((before.target_x, before.target_y), (-320.0, 240.0));
    }

    #[test]
    fn toggle_switches_uniform_and_text_color() {
        let mut fx = effect(640.0, 480.0);
        fx.toggle_changed(true);
        assert_eq!(fx.mode(), DisplayMode::Transparent);
        assert_eq!(
            fx.surface().take(),
            vec![Call::Float(Uniform::Transparency, 1.0)]
        );
        assert_eq!(fx.page().color.borrow().as_deref(), Some("#333333"));

        fx.toggle_changed(false);
        assert_eq!(fx.mode(), DisplayMode::Opaque);
        assert_eq!(
            fx.surface().take(),
            vec![Call::Float(Uniform::Transparency, 0.0)]
        );
        assert_eq!(fx.page().color.borrow().as_deref(), Some("#eeeeee"));
    }

    #[test]
    fn touch_follows_first_finger_only() {
        let mut fx = effect(640.0, 480.0);
        fx.touch_moved(&[(30.0, 40.0), (500.0, 400.0)]);
        assert_eq!((fx.pointer().target_x, fx.pointer().target_y), (30.0, 40.0));
        fx.touch_moved(&[]);
        assert_eq!((fx.pointer().target_x, fx.pointer().target_y), (30.0, 40.0));
    }

    #[test]
    fn attach_routes_events_with_clock_time() {
        let fx = Rc::new(RefCell::new(effect(800.0, 600.0)));
        let clock = Rc::new(VirtualClock::new(2500.0, 16.0, 0));
        let mut input = ScriptedInput::default();
        attach(&mut input, fx.clone(), clock).unwrap();
        assert_eq!(input.handlers.len(), EventKind::ALL.len());

        input.fire(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        input.fire(InputEvent::Click {
            x: 400.0,
            y: 300.0,
            origin: ClickOrigin::Page,
        });
        input.fire(InputEvent::ToggleChange { checked: true });

        let fx = fx.borrow();
        assert_eq!(fx.click(), ClickState { clicked: true, timestamp: 2500.0 });
        assert_eq!((fx.pointer().target_x, fx.pointer().target_y), (400.0, 300.0));
        assert_eq!(fx.mode(), DisplayMode::Transparent);
    }
}
