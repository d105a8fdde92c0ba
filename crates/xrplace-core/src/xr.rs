//! XR input queue bridging the browser session to the ECS.
//!
//! The platform layer (xrplace-web) runs the WebXR session's own
//! `requestAnimationFrame` loop and pushes everything it observes into an
//! [`XrInputQueue`]. The Bevy app drains the queue non-blockingly once per
//! update, so all session state lives in explicit resources instead of
//! ambient globals.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

// Re-exported so the platform layer can build frame inputs without a direct
// bevy dependency.
pub use bevy::math::Mat4;

/// One observation from the platform's XR session.
#[derive(Debug, Clone, Copy)]
pub enum XrInput {
    /// An XR animation frame was delivered.
    ///
    /// `hit_pose` carries the first hit-test result of the frame, already
    /// resolved against the local reference space; `None` both before the
    /// hit-test source exists and when the query returned no results.
    Frame {
        /// Frame timestamp in milliseconds, as handed to the XR frame callback.
        timestamp_ms: f64,
        /// Viewer pose in the local reference space, when tracked.
        viewer_pose: Option<Mat4>,
        /// First hit-test result pose, when available.
        hit_pose: Option<Mat4>,
    },
    /// The viewer space, hit-test source, and local space were all acquired.
    SourcesAcquired,
    /// A discrete "select" input (screen tap in handheld AR).
    Select,
    /// The XR session ended; handles were cleared platform-side.
    SessionEnded,
}

/// Thread-safe queue of XR inputs for WASM interop.
///
/// Cloneable handle shared between the session driver (producer) and the
/// Bevy app (consumer). The `pump_xr_input` system drains it every update.
#[derive(Resource, Clone, Default)]
pub struct XrInputQueue {
    inner: Arc<Mutex<VecDeque<XrInput>>>,
}

impl XrInputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an input to be processed on the next update.
    pub fn push(&self, input: XrInput) {
        self.inner.lock().push_back(input);
    }

    /// Drain all pending inputs, oldest first.
    pub fn drain(&self) -> Vec<XrInput> {
        self.inner.lock().drain(..).collect()
    }

    /// Check if there are pending inputs.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all pending inputs.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order() {
        let queue = XrInputQueue::new();
        queue.push(XrInput::SourcesAcquired);
        queue.push(XrInput::Select);
        queue.push(XrInput::SessionEnded);

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert!(matches!(drained[0], XrInput::SourcesAcquired));
        assert!(matches!(drained[1], XrInput::Select));
        assert!(matches!(drained[2], XrInput::SessionEnded));
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_pending() {
        let queue = XrInputQueue::new();
        queue.push(XrInput::Select);
        queue.clear();
        assert!(queue.drain().is_empty());
    }
}
