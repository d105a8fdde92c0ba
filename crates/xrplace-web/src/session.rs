//! WebXR session driver.
//!
//! Owns the XR `requestAnimationFrame` loop and the session's event
//! listeners, and translates everything into [`XrInput`] values pushed onto
//! the shared queue. Reference-space and hit-test-source acquisition runs
//! asynchronously off the first frame; until it completes, frames are still
//! forwarded (with no poses) so the app sees the session as live.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    XrFrame, XrHitTestOptionsInit, XrHitTestResult, XrHitTestSource, XrInputSourceEvent,
    XrReferenceSpace, XrReferenceSpaceType, XrRigidTransform, XrSession, XrSessionEvent,
};
use xrplace_core::{Mat4, XrInput, XrInputQueue};

use crate::error::XrError;

type RafClosure = Closure<dyn FnMut(f64, XrFrame)>;

/// Per-session WebXR handles, cleared when the session ends.
#[derive(Default)]
struct SessionState {
    session: Option<XrSession>,
    local_space: Option<XrReferenceSpace>,
    hit_test_source: Option<XrHitTestSource>,
    acquiring: bool,
}

/// Keeps a running session's closures alive and allows ending it.
///
/// Dropping the handle after the session ended releases the listeners; the
/// button layer holds it for the session's lifetime.
pub(crate) struct SessionHandle {
    state: Rc<RefCell<SessionState>>,
    _on_select: Closure<dyn FnMut(XrInputSourceEvent)>,
    _on_end: Closure<dyn FnMut(XrSessionEvent)>,
    _raf: Rc<RefCell<Option<RafClosure>>>,
}

impl SessionHandle {
    /// Ask the browser to end the session. The `end` event does the cleanup.
    pub(crate) fn end(&self) {
        if let Some(session) = self.state.borrow().session.clone() {
            let _ = session.end();
        }
    }
}

/// Wires up a freshly granted session: select/end listeners and the XR
/// frame loop.
pub(crate) fn start_session(session: &XrSession, queue: XrInputQueue) -> SessionHandle {
    let state = Rc::new(RefCell::new(SessionState {
        session: Some(session.clone()),
        ..SessionState::default()
    }));

    // Screen taps arrive as "select" input source events.
    let select_queue = queue.clone();
    let on_select = Closure::wrap(Box::new(move |_event: XrInputSourceEvent| {
        select_queue.push(XrInput::Select);
    }) as Box<dyn FnMut(XrInputSourceEvent)>);
    let _ = session.add_event_listener_with_callback("select", on_select.as_ref().unchecked_ref());

    // Covers both our own `session.end()` and the UA ending the session.
    let end_queue = queue.clone();
    let end_state = Rc::clone(&state);
    let on_end = Closure::wrap(Box::new(move |_event: XrSessionEvent| {
        tracing::info!("[xrplace] XR session ended");
        let mut state = end_state.borrow_mut();
        state.session = None;
        state.local_space = None;
        state.hit_test_source = None;
        state.acquiring = false;
        end_queue.push(XrInput::SessionEnded);
    }) as Box<dyn FnMut(XrSessionEvent)>);
    let _ = session.add_event_listener_with_callback("end", on_end.as_ref().unchecked_ref());

    // Self-rescheduling XR frame callback. The closure lives in a shared
    // slot so it can hand itself back to request_animation_frame.
    let raf: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let raf_state = Rc::clone(&state);
    let raf_slot = Rc::clone(&raf);
    *raf.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64, frame: XrFrame| {
        on_xr_frame(time, &frame, &raf_state, &raf_slot, &queue);
    }) as Box<dyn FnMut(f64, XrFrame)>));
    request_frame(session, &raf);

    SessionHandle {
        state,
        _on_select: on_select,
        _on_end: on_end,
        _raf: raf,
    }
}

fn request_frame(session: &XrSession, raf: &Rc<RefCell<Option<RafClosure>>>) {
    if let Some(callback) = raf.borrow().as_ref() {
        let _ = session.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn on_xr_frame(
    time: f64,
    frame: &XrFrame,
    state: &Rc<RefCell<SessionState>>,
    raf: &Rc<RefCell<Option<RafClosure>>>,
    queue: &XrInputQueue,
) {
    let Some(session) = state.borrow().session.clone() else {
        // Session ended between scheduling and delivery; stop the loop.
        return;
    };
    request_frame(&session, raf);

    // Kick off acquisition once, on the session's first frame.
    let needs_acquire = {
        let state = state.borrow();
        state.hit_test_source.is_none() && !state.acquiring
    };
    if needs_acquire {
        state.borrow_mut().acquiring = true;
        let state = Rc::clone(state);
        let queue = queue.clone();
        spawn_local(async move {
            match acquire_sources(&session).await {
                Ok((hit_test_source, local_space)) => {
                    tracing::info!("[xrplace] hit-test source and local space acquired");
                    {
                        let mut state = state.borrow_mut();
                        state.hit_test_source = Some(hit_test_source);
                        state.local_space = Some(local_space);
                    }
                    queue.push(XrInput::SourcesAcquired);
                }
                // Unrecoverable for this session: the reticle simply never
                // appears. Ending and re-entering AR retries from scratch.
                Err(err) => tracing::error!("[xrplace] {err}"),
            }
        });
    }

    let (local_space, hit_test_source) = {
        let state = state.borrow();
        (state.local_space.clone(), state.hit_test_source.clone())
    };

    let viewer_pose = local_space
        .as_ref()
        .and_then(|space| frame.get_viewer_pose(space))
        .map(|pose| mat4_from_transform(&pose.transform()));

    let hit_pose = match (&hit_test_source, &local_space) {
        (Some(source), Some(space)) => first_hit_pose(frame, source, space),
        _ => None,
    };

    queue.push(XrInput::Frame {
        timestamp_ms: time,
        viewer_pose,
        hit_pose,
    });
}

/// Viewer-anchored hit testing: the viewer reference space makes the ray
/// originate from the device, while results resolve against the stationary
/// local space.
async fn acquire_sources(
    session: &XrSession,
) -> Result<(XrHitTestSource, XrReferenceSpace), XrError> {
    let viewer_space: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::Viewer))
            .await
            .map_err(XrError::acquisition)?
            .unchecked_into();

    let options = XrHitTestOptionsInit::new(&viewer_space);
    let hit_test_source: XrHitTestSource =
        JsFuture::from(session.request_hit_test_source(&options))
            .await
            .map_err(XrError::acquisition)?
            .unchecked_into();

    let local_space: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::Local))
            .await
            .map_err(XrError::acquisition)?
            .unchecked_into();

    Ok((hit_test_source, local_space))
}

/// First hit-test result of the frame, as a pose in the local space.
fn first_hit_pose(
    frame: &XrFrame,
    source: &XrHitTestSource,
    space: &XrReferenceSpace,
) -> Option<Mat4> {
    let results = frame.get_hit_test_results(source);
    let first = results.get(0);
    if first.is_undefined() {
        return None;
    }
    let hit: XrHitTestResult = first.unchecked_into();
    let pose = hit.get_pose(space)?;
    Some(mat4_from_transform(&pose.transform()))
}

/// `XRRigidTransform.matrix` is column-major, same layout `Mat4` expects.
fn mat4_from_transform(transform: &XrRigidTransform) -> Mat4 {
    let matrix = transform.matrix();
    if matrix.len() == 16 {
        Mat4::from_cols_slice(&matrix)
    } else {
        Mat4::IDENTITY
    }
}
