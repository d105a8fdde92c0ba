//! Enter-AR button.
//!
//! Injects a fixed button into the page that toggles an `immersive-ar`
//! session with the `hit-test` feature required. The render canvas is kept
//! hidden outside of a session.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, XrSession, XrSessionEvent, XrSessionInit,
    XrSessionMode, XrSystem,
};
use xrplace_core::XrInputQueue;

use crate::error::XrError;
use crate::session::{self, SessionHandle};

const LABEL_ENTER: &str = "ENTER AR";
const LABEL_EXIT: &str = "EXIT AR";
const LABEL_UNSUPPORTED: &str = "AR NOT SUPPORTED";
const LABEL_FAILED: &str = "AR SESSION FAILED";

/// Creates the button, wires up session start/end, and hides the canvas
/// until a session runs.
pub(crate) fn install(canvas_id: &str, queue: XrInputQueue) -> Result<(), XrError> {
    let window = web_sys::window().ok_or(XrError::Unsupported)?;
    let document = window.document().ok_or(XrError::Unsupported)?;

    hide_canvas(&document, canvas_id);

    let button: HtmlButtonElement = document
        .create_element("button")
        .map_err(XrError::dom)?
        .dyn_into()
        .map_err(XrError::dom)?;
    button.set_text_content(Some(LABEL_ENTER));
    style_button(&button)?;
    document
        .body()
        .ok_or(XrError::Unsupported)?
        .append_child(&button)
        .map_err(XrError::dom)?;

    let xr: XrSystem = window.navigator().xr();
    if xr.is_undefined() {
        disable(&button, LABEL_UNSUPPORTED);
        tracing::warn!("[xrplace] navigator.xr is unavailable");
        return Ok(());
    }

    // Async support probe; the button stays disabled until it resolves.
    button.set_disabled(true);
    {
        let xr = xr.clone();
        let button = button.clone();
        spawn_local(async move {
            let supported = JsFuture::from(xr.is_session_supported(XrSessionMode::ImmersiveAr))
                .await
                .ok()
                .and_then(|value| value.as_bool())
                .unwrap_or(false);
            if supported {
                button.set_disabled(false);
            } else {
                disable(&button, LABEL_UNSUPPORTED);
                tracing::warn!("[xrplace] immersive-ar session mode is not supported");
            }
        });
    }

    let active: Rc<RefCell<Option<SessionHandle>>> = Rc::new(RefCell::new(None));
    let canvas_id = canvas_id.to_owned();
    let button_for_click = button.clone();

    let onclick = Closure::wrap(Box::new(move || {
        // Second click exits; cleanup happens in the session's end listener.
        if let Some(handle) = active.borrow().as_ref() {
            handle.end();
            return;
        }

        let xr = xr.clone();
        let queue = queue.clone();
        let button = button_for_click.clone();
        let active = Rc::clone(&active);
        let canvas_id = canvas_id.clone();
        spawn_local(async move {
            match request_ar_session(&xr).await {
                Ok(xr_session) => {
                    tracing::info!("[xrplace] immersive-ar session started");
                    show_canvas(&canvas_id);
                    button.set_text_content(Some(LABEL_EXIT));
                    install_ui_reset(&xr_session, &button, &active, &canvas_id);
                    let handle = session::start_session(&xr_session, queue);
                    *active.borrow_mut() = Some(handle);
                }
                Err(err) => {
                    tracing::error!("[xrplace] {err}");
                    button.set_text_content(Some(LABEL_FAILED));
                }
            }
        });
    }) as Box<dyn FnMut()>);
    button
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .map_err(XrError::dom)?;
    // The button lives for the page's lifetime, so its handler does too.
    onclick.forget();

    Ok(())
}

async fn request_ar_session(xr: &XrSystem) -> Result<XrSession, XrError> {
    let init = XrSessionInit::new();
    let features = Array::new();
    features.push(&JsValue::from_str("hit-test"));
    init.set_required_features(&features);

    let session = JsFuture::from(xr.request_session_with_options(XrSessionMode::ImmersiveAr, &init))
        .await
        .map_err(XrError::session)?;
    Ok(session.unchecked_into())
}

/// Resets the button label, hides the canvas, and drops the session handle
/// when the session ends, whether via the button or the UA.
fn install_ui_reset(
    session: &XrSession,
    button: &HtmlButtonElement,
    active: &Rc<RefCell<Option<SessionHandle>>>,
    canvas_id: &str,
) {
    let button = button.clone();
    let active = Rc::clone(active);
    let canvas_id = canvas_id.to_owned();
    let on_end = Closure::wrap(Box::new(move |_event: XrSessionEvent| {
        button.set_text_content(Some(LABEL_ENTER));
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            hide_canvas(&document, &canvas_id);
        }
        active.borrow_mut().take();
    }) as Box<dyn FnMut(XrSessionEvent)>);
    let _ = session.add_event_listener_with_callback("end", on_end.as_ref().unchecked_ref());
    // Lives for the page's lifetime; sessions are rare enough that leaking
    // one listener per session is acceptable.
    on_end.forget();
}

fn disable(button: &HtmlButtonElement, label: &str) {
    button.set_disabled(true);
    button.set_text_content(Some(label));
}

fn hide_canvas(document: &Document, canvas_id: &str) {
    if let Some(canvas) = document.get_element_by_id(canvas_id) {
        if let Ok(canvas) = canvas.dyn_into::<HtmlElement>() {
            let _ = canvas.style().set_property("display", "none");
        }
    }
}

fn show_canvas(canvas_id: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if let Some(canvas) = document.get_element_by_id(canvas_id) {
        if let Ok(canvas) = canvas.dyn_into::<HtmlElement>() {
            let _ = canvas.style().set_property("display", "");
        }
    }
}

fn style_button(button: &HtmlButtonElement) -> Result<(), XrError> {
    let style = button.style();
    for (property, value) in [
        ("position", "absolute"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("padding", "12px 24px"),
        ("border", "1px solid #fff"),
        ("border-radius", "4px"),
        ("background", "rgba(0, 0, 0, 0.5)"),
        ("color", "#fff"),
        ("font", "13px sans-serif"),
        ("cursor", "pointer"),
        ("z-index", "999"),
    ] {
        style.set_property(property, value).map_err(XrError::dom)?;
    }
    Ok(())
}
