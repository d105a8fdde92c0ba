//! WASM entry points for the AR app.
//!
//! Provides JavaScript-callable functions to start the Bevy app and poll
//! scene state. The WebXR session itself is driven by the xrplace-web
//! crate, which pushes into the shared [`XrInputQueue`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use wasm_bindgen::prelude::*;

use crate::plugin::XrPlaceUnifiedPlugin;
use crate::state_store::SceneStore;
use crate::xr::XrInputQueue;

// ============================================================================
// Global State
// ============================================================================

/// Atomic flag for signaling app shutdown (checked every frame).
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// Whether the Bevy App has been started. In WASM the event loop can only
/// be created once, so repeated start calls are ignored.
static APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Global handles shared between the Bevy app and the session driver.
struct GlobalState {
    input_queue: XrInputQueue,
    scene_store: SceneStore,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            input_queue: XrInputQueue::new(),
            scene_store: SceneStore::new(),
        }
    }
}

static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn ensure_global_state() {
    let mut guard = GLOBAL_STATE.lock().unwrap();
    if guard.is_none() {
        *guard = Some(GlobalState::new());
    }
}

/// The XR input queue the session driver pushes into.
pub fn input_queue() -> XrInputQueue {
    ensure_global_state();
    let guard = GLOBAL_STATE.lock().unwrap();
    guard.as_ref().unwrap().input_queue.clone()
}

/// The scene store polled by the hosting page.
pub fn scene_store() -> SceneStore {
    ensure_global_state();
    let guard = GLOBAL_STATE.lock().unwrap();
    guard.as_ref().unwrap().scene_store.clone()
}

/// Request the Bevy app to exit. Called before page unload.
#[wasm_bindgen]
pub fn request_app_exit() {
    tracing::info!("[xrplace] request_app_exit called");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Whether the app has been started and is not shutting down.
#[wasm_bindgen]
pub fn is_app_running() -> bool {
    APP_STARTED.load(Ordering::SeqCst) && !SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Bevy system that sends `AppExit` once an exit was requested.
pub fn check_exit_system(mut exit: MessageWriter<bevy::app::AppExit>) {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        tracing::info!("[xrplace] check_exit_system: sending AppExit");
        exit.write(bevy::app::AppExit::Success);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the Bevy app rendering into the given canvas.
///
/// The canvas stays hidden until the Enter-AR button starts a session.
#[wasm_bindgen]
pub fn start_xr_app(canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[xrplace] app already running, skipping creation");
        return Ok(());
    }

    let input_queue = input_queue();
    let scene_store = scene_store();

    tracing::info!("[xrplace] creating Bevy app for canvas: #{}", canvas_id);

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{canvas_id}")),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    app.add_plugins(XrPlaceUnifiedPlugin::new(input_queue, scene_store));

    APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[xrplace] calling app.run()");
    app.run();
    tracing::info!("[xrplace] app.run() returned");

    Ok(())
}

// ============================================================================
// State Getters (for the hosting page)
// ============================================================================

/// Get the scene state summary.
#[wasm_bindgen]
pub fn get_scene_state() -> JsValue {
    let summary = scene_store().get_summary();
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Get the scene state version (for change detection).
#[wasm_bindgen]
pub fn get_scene_version() -> u64 {
    scene_store().get_version()
}
