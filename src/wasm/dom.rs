use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlInputElement, MouseEvent, Node, TouchEvent,
    Window,
};

use crate::error::EffectError;
use crate::input::{ClickOrigin, EventKind, Handler, InputEvent, InputSource, Viewport};
use crate::surface::PageStyle;

/// Finds the first element matching `selector` and casts it to `T`.
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, EffectError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| EffectError::ElementNotFound(selector.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| EffectError::ElementNotFound(selector.to_string()))
}

/// Shader text embedded in the page under element `id`.
pub fn shader_source(document: &Document, id: &str) -> Result<String, EffectError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| EffectError::ElementNotFound(format!("#{id}")))?;
    Ok(element.text_content().unwrap_or_default())
}

pub fn window_size(window: &Window) -> Result<Viewport, EffectError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

/// Blocking notice for faults the user has to know about.
pub fn alert(window: &Window, message: &str) {
    if let Err(e) = window.alert_with_message(message) {
        log::error!("alert failed: {e:?}");
    }
}

/// The `.page` container whose text color follows the display mode.
pub struct PageElement(HtmlElement);

impl PageElement {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl PageStyle for PageElement {
    fn set_text_color(&self, color: &str) {
        if let Err(e) = self.0.style().set_property("color", color) {
            log::warn!("could not set page text color: {e:?}");
        }
    }
}

/// A click belongs to the toggle when it hits the toggle itself or anything
/// sharing its parent, such as the label that styles it.
pub fn classify_click(toggle: &HtmlInputElement, target: Option<EventTarget>) -> ClickOrigin {
    let Some(node) = target.and_then(|t| t.dyn_into::<Node>().ok()) else {
        return ClickOrigin::Page;
    };
    if toggle.is_same_node(Some(&node)) {
        return ClickOrigin::Toggle;
    }
    match (node.parent_node(), toggle.parent_node()) {
        (Some(parent), Some(toggle_parent)) if parent.is_same_node(Some(&toggle_parent)) => {
            ClickOrigin::Toggle
        }
        _ => ClickOrigin::Page,
    }
}

fn listen<T>(target: &EventTarget, name: &str, closure: Closure<T>) -> Result<(), EffectError>
where
    T: ?Sized + WasmClosure,
{
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Translates DOM events on the window, page container and toggle into
/// [`InputEvent`]s.
pub struct DomInputSource {
    window: Window,
    page: HtmlElement,
    toggle: HtmlInputElement,
}

impl DomInputSource {
    pub fn new(window: Window, page: HtmlElement, toggle: HtmlInputElement) -> Self {
        Self {
            window,
            page,
            toggle,
        }
    }
}

impl InputSource for DomInputSource {
    type Error = EffectError;

    fn subscribe(&mut self, kind: EventKind, mut handler: Handler) -> Result<(), EffectError> {
        match kind {
            EventKind::Resize => {
                let window = self.window.clone();
                let closure = Closure::wrap(Box::new(move || match window_size(&window) {
                    Ok(Viewport { width, height }) => handler(InputEvent::Resize { width, height }),
                    Err(e) => log::warn!("resize: {e}"),
                }) as Box<dyn FnMut()>);
                listen(&self.window, "resize", closure)
            }
            EventKind::PointerMove => {
                let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                    handler(InputEvent::PointerMove {
                        x: e.page_x() as f64,
                        y: e.page_y() as f64,
                    })
                }) as Box<dyn FnMut(MouseEvent)>);
                listen(&self.window, "mousemove", closure)
            }
            EventKind::TouchMove => {
                let closure = Closure::wrap(Box::new(move |e: TouchEvent| {
                    let list = e.target_touches();
                    let touches = (0..list.length())
                        .filter_map(|i| list.get(i))
                        .map(|t| (t.page_x() as f64, t.page_y() as f64))
                        .collect();
                    handler(InputEvent::TouchMove { touches })
                }) as Box<dyn FnMut(TouchEvent)>);
                listen(&self.window, "touchmove", closure)
            }
            EventKind::Click => {
                let toggle = self.toggle.clone();
                let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                    handler(InputEvent::Click {
                        x: e.page_x() as f64,
                        y: e.page_y() as f64,
                        origin: classify_click(&toggle, e.target()),
                    })
                }) as Box<dyn FnMut(MouseEvent)>);
                listen(&self.page, "click", closure)
            }
            EventKind::ToggleChange => {
                let toggle = self.toggle.clone();
                let closure = Closure::wrap(Box::new(move |_: Event| {
                    handler(InputEvent::ToggleChange {
                        checked: toggle.checked(),
                    })
                }) as Box<dyn FnMut(Event)>);
                listen(&self.toggle, "change", closure)
            }
        }
    }
}
