//! Bevy plugins for the AR scene.
//!
//! Provides:
//! - `XrPlaceHeadlessPlugin`: logic-only plugin (no rendering/window
//!   dependencies) for headless testing
//! - `XrPlaceUnifiedPlugin`: `XrPlaceHeadlessPlugin` + rendering systems

use bevy::prelude::*;

use crate::events::{XrFrameEvent, XrSelectEvent, XrSessionEndedEvent, XrSourcesAcquiredEvent};
use crate::render;
use crate::resources::{HitTestSession, HueCycle, PlacementRng, Reticle};
use crate::state_store::SceneStore;
use crate::systems;
use crate::xr::XrInputQueue;

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all scene logic without rendering or window
/// dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to run ECS systems
/// without a windowing or rendering backend.
///
/// Excluded systems (rendering-dependent): scene setup, visual attachment,
/// reticle visual sync, material hue application, XR camera follow.
pub struct XrPlaceHeadlessPlugin {
    pub seed: u64,
    pub input_queue: Option<XrInputQueue>,
    pub scene_store: Option<SceneStore>,
}

impl Default for XrPlaceHeadlessPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            input_queue: None,
            scene_store: None,
        }
    }
}

impl Plugin for XrPlaceHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // Resources
        app.insert_resource(self.input_queue.clone().unwrap_or_default())
            .insert_resource(self.scene_store.clone().unwrap_or_default())
            .insert_resource(Reticle::default())
            .insert_resource(HitTestSession::default())
            .insert_resource(HueCycle::default())
            .insert_resource(PlacementRng::new(self.seed));

        // Messages
        app.add_message::<XrFrameEvent>()
            .add_message::<XrSourcesAcquiredEvent>()
            .add_message::<XrSelectEvent>()
            .add_message::<XrSessionEndedEvent>();

        // Logical scene content
        app.add_systems(Startup, systems::spawn_pulsing_sphere);

        // Per-frame pipeline, strictly ordered: pump inputs, drive the
        // hit-test machine, place, then animate.
        app.add_systems(
            Update,
            (
                systems::pump_xr_input,
                systems::drive_hit_test_session,
                systems::handle_select,
                systems::spin_placed_objects,
                systems::pulse_sphere,
                systems::advance_hue,
            )
                .chain(),
        );

        // WASM exit system
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, crate::wasm_entry::check_exit_system);

        // Scene-store sync for the hosting page
        app.add_systems(PostUpdate, systems::sync_scene_to_store);
    }
}

// ============================================================================
// Unified Plugin (headless + rendering)
// ============================================================================

/// Unified plugin: all scene logic plus the rendering systems that require
/// `Assets`, `StandardMaterial`, `Visibility`, and `Camera3d`.
pub struct XrPlaceUnifiedPlugin {
    pub seed: u64,
    pub input_queue: Option<XrInputQueue>,
    pub scene_store: Option<SceneStore>,
}

impl Default for XrPlaceUnifiedPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            input_queue: None,
            scene_store: None,
        }
    }
}

impl XrPlaceUnifiedPlugin {
    pub fn new(input_queue: XrInputQueue, scene_store: SceneStore) -> Self {
        Self {
            seed: 12345,
            input_queue: Some(input_queue),
            scene_store: Some(scene_store),
        }
    }
}

impl Plugin for XrPlaceUnifiedPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(XrPlaceHeadlessPlugin {
            seed: self.seed,
            input_queue: self.input_queue.clone(),
            scene_store: self.scene_store.clone(),
        });

        app.add_systems(Startup, render::setup_scene);

        app.add_systems(
            Update,
            (
                render::attach_sphere_visual,
                render::attach_placed_visuals,
                render::sync_reticle_visual,
                render::apply_sphere_hue,
                render::update_xr_camera,
            )
                .after(systems::advance_hue),
        );
    }
}
