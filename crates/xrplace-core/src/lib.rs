//! xrplace Core Library
//!
//! AR scene logic built on Bevy ECS: a hit-test driven reticle, tap-to-place
//! object spawning, and decorative mesh animations.
//!
//! The crate is split the same way the app runs:
//! - Headless logic (resources, events, systems) that builds and tests on
//!   native without a window or GPU.
//! - Rendering systems ([`render`]) and the wasm entry ([`wasm_entry`]) that
//!   only run inside the browser app.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod events;
pub mod mesh;
pub mod plugin;
pub mod render;
pub mod resources;
pub mod state_store;
pub mod systems;
pub mod xr;

#[cfg(target_arch = "wasm32")]
pub mod wasm_entry;

#[cfg(test)]
mod test_utils;

pub use components::*;
pub use events::*;
pub use plugin::{XrPlaceHeadlessPlugin, XrPlaceUnifiedPlugin};
pub use resources::*;
pub use state_store::{SceneStore, SceneSummary};
pub use xr::{Mat4, XrInput, XrInputQueue};
