//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `XrPlaceHeadlessPlugin` for testing scene logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::components::PlacedObject;
use crate::plugin::XrPlaceHeadlessPlugin;
use crate::resources::{HitTestPhase, HitTestSession, Reticle};
use crate::xr::{XrInput, XrInputQueue};

/// A headless Bevy app wrapper for testing.
///
/// Convenience methods push synthetic XR inputs (frames, acquisition
/// completions, selects, session end) exactly as the platform layer would.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default seed.
    pub fn new() -> Self {
        Self::with_seed(12345)
    }

    /// Create a new test app with a specific RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(XrPlaceHeadlessPlugin {
            seed,
            input_queue: None,
            scene_store: None,
        });
        // Run one update to initialize resources and startup entities.
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Push a raw XR input.
    pub fn push_input(&mut self, input: XrInput) {
        self.app.world().resource::<XrInputQueue>().push(input);
    }

    /// Push an XR animation frame with an optional hit-test pose.
    pub fn frame(&mut self, timestamp_ms: f64, hit_pose: Option<Mat4>) {
        self.push_input(XrInput::Frame {
            timestamp_ms,
            viewer_pose: None,
            hit_pose,
        });
    }

    /// Push the acquisition-complete notification.
    pub fn sources_acquired(&mut self) {
        self.push_input(XrInput::SourcesAcquired);
    }

    /// Push a select (tap) input.
    pub fn select(&mut self) {
        self.push_input(XrInput::Select);
    }

    /// Push a session-end notification.
    pub fn session_ended(&mut self) {
        self.push_input(XrInput::SessionEnded);
    }

    /// Current hit-test session phase.
    pub fn phase(&self) -> HitTestPhase {
        self.app.world().resource::<HitTestSession>().phase
    }

    /// Current reticle state.
    pub fn reticle(&self) -> Reticle {
        *self.app.world().resource::<Reticle>()
    }

    /// Number of placed objects in the world.
    pub fn placed_count(&mut self) -> usize {
        let world = self.app.world_mut();
        let mut query = world.query::<&PlacedObject>();
        query.iter(world).count()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
