//! Shared scene store for Bevy-to-page communication.
//!
//! The hosting page polls a summary of the scene (phase, reticle, object
//! count) through `#[wasm_bindgen]` getters; a versioned store keeps the
//! polling cheap and change-detectable.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::resources::HitTestPhase;

/// Snapshot of the observable scene state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneSummary {
    /// Current hit-test session phase.
    pub hit_test_phase: HitTestPhase,
    /// Whether the reticle is currently shown on a detected surface.
    pub reticle_visible: bool,
    /// Number of objects placed so far this session.
    pub placed_objects: usize,
    /// Current hue of the pulsating sphere, in [0, 1).
    pub hue: f32,
}

#[derive(Debug, Default)]
struct SceneStoreInner {
    summary: RwLock<SceneSummary>,
    version: RwLock<u64>,
}

/// Cloneable, versioned store synced from the ECS once per update.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneStore {
    inner: Arc<SceneStoreInner>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> SceneSummary {
        self.inner.summary.read().clone()
    }

    /// Replace the summary, bumping the version only on actual change.
    pub fn set_summary(&self, summary: SceneSummary) {
        let mut guard = self.inner.summary.write();
        if *guard != summary {
            *guard = summary;
            *self.inner.version.write() += 1;
        }
    }

    pub fn get_version(&self) -> u64 {
        *self.inner.version.read()
    }
}
