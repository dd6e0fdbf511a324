use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use scout_control::pad::DEFAULT_STROKE_WIDTH;
use scout_control::{DPad, DriveController, PadBounds, SPEED_MIN_SEND_DELAY_MS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent,
};

use crate::input::{self, Disposition, InputEvent};
use crate::transport::{page_endpoint, FetchSink};

type Listener = Closure<dyn FnMut(Event)>;

/// Drive control bound to the page. Keep it alive for as long as the page
/// should drive the rover; dropping it unbinds every listener and stops the
/// tick.
#[wasm_bindgen]
pub struct App {
    controller: Rc<RefCell<DriveController>>,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
    tick: Option<(i32, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl App {
    /// Wire up the stream, the d-pad, keyboard and touch input, and the send tick.
    pub fn attach() -> Result<App, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let endpoint = page_endpoint()?;

        let stream = element(&document, "stream")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| "#stream is not an image")?;
        stream.set_src(&endpoint.stream_url());

        let dpad = element(&document, "dpad")?;
        let pad = DPad::new(stroke_width(&document));
        dpad.set_attribute("viewBox", &pad.view_box())?;
        if let Some(dead_zone) = document.get_element_by_id("deadzone") {
            dead_zone.set_attribute("r", &pad.dead_zone_radius().to_string())?;
        }
        let indicator = document.get_element_by_id("indicator");
        if let Some(indicator) = &indicator {
            indicator.set_attribute("r", &pad.indicator_radius().to_string())?;
        }

        let mut app = App {
            controller: Rc::new(RefCell::new(DriveController::new(pad))),
            listeners: Vec::new(),
            tick: None,
        };

        let pad_target: &EventTarget = dpad.as_ref();
        let doc_target: &EventTarget = document.as_ref();
        app.listen(pad_target, "mousedown", &dpad, |e| {
            mouse_position(e).map(|client| InputEvent::MouseDown { client })
        })?;
        app.listen(pad_target, "mousemove", &dpad, |e| {
            mouse_position(e).map(|client| InputEvent::MouseMove { client })
        })?;
        app.listen(doc_target, "mouseup", &dpad, |_| Some(InputEvent::MouseUp))?;
        app.listen(doc_target, "touchstart", &dpad, |e| {
            touch_position(e).map(|client| InputEvent::TouchStart { client })
        })?;
        app.listen(doc_target, "touchmove", &dpad, |e| {
            touch_position(e).map(|client| InputEvent::TouchMove { client })
        })?;
        app.listen(doc_target, "touchend", &dpad, |_| Some(InputEvent::TouchEnd))?;
        app.listen(doc_target, "keydown", &dpad, |e| {
            e.dyn_ref::<KeyboardEvent>()
                .map(|k| InputEvent::KeyDown { code: k.code() })
        })?;
        app.listen(doc_target, "keyup", &dpad, |e| {
            e.dyn_ref::<KeyboardEvent>()
                .map(|k| InputEvent::KeyUp { code: k.code() })
        })?;

        let sink = FetchSink::new(endpoint);
        let controller = Rc::clone(&app.controller);
        let tick = Closure::wrap(Box::new(move || {
            let mut ctrl = controller.borrow_mut();
            if ctrl.run_tick(js_sys::Date::now() as u64, &sink).is_some() {
                if let Some(indicator) = &indicator {
                    crate::indicator::place(indicator, &ctrl);
                }
            }
        }) as Box<dyn FnMut()>);
        let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            SPEED_MIN_SEND_DELAY_MS as i32,
        )?;
        app.tick = Some((interval, tick));

        log::info!("Drive control attached");
        Ok(app)
    }

    /// Release all inputs; the next tick sends a stop command.
    pub fn stop(&self) {
        self.controller.borrow_mut().release_all();
    }

    pub fn forward(&self) -> f64 {
        self.controller.borrow().motion().forward
    }

    pub fn steer(&self) -> f64 {
        self.controller.borrow().motion().steer
    }

    /// Unbind all listeners and stop the tick.
    pub fn detach(&mut self) {
        for (target, kind, listener) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
        if let Some((interval, _tick)) = self.tick.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(interval);
            }
        }
    }
}

impl App {
    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        dpad: &Element,
        to_input: fn(&Event) -> Option<InputEvent>,
    ) -> Result<(), JsValue> {
        let controller = Rc::clone(&self.controller);
        let dpad = dpad.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let Some(input) = to_input(&event) else {
                return;
            };
            let bounds = pad_bounds(&dpad);
            let disposition = input::apply(&mut controller.borrow_mut(), &input, &bounds);
            if disposition == Disposition::PreventDefault {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, listener));
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.detach();
    }
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{id} not found")))
}

fn stroke_width(document: &Document) -> f64 {
    document
        .get_element_by_id("padstyle")
        .and_then(|style| style.get_attribute("stroke-width"))
        .and_then(|w| w.trim().parse().ok())
        .unwrap_or(DEFAULT_STROKE_WIDTH)
}

fn pad_bounds(dpad: &Element) -> PadBounds {
    let rect = dpad.get_bounding_client_rect();
    PadBounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn mouse_position(event: &Event) -> Option<DVec2> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(DVec2::new(mouse.client_x() as f64, mouse.client_y() as f64))
}

/// Position of the first changed touch.
fn touch_position(event: &Event) -> Option<DVec2> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(DVec2::new(touch.client_x() as f64, touch.client_y() as f64))
}
