//! ECS Resources for the AR scene.
//!
//! These hold the explicit application state that the original demo kept as
//! module-level globals: the reticle, the hit-test session phase, the hue
//! accumulator, and the placement RNG.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Hue advance per XR frame, in the [0, 1) hue wheel.
pub const HUE_STEP: f32 = 0.001;

/// Lifecycle of the hit-test session (one per AR session).
///
/// `Ended` carries the same semantics as `Uninitialized` for re-entry: the
/// first frame of a new AR session transitions back to `Requesting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitTestPhase {
    /// No hit-test source exists yet.
    #[default]
    Uninitialized,
    /// Async acquisition of reference spaces + hit-test source is in flight.
    /// Frames observed in this phase are not queried.
    Requesting,
    /// Source acquired; every frame's hit-test result drives the reticle.
    Ready,
    /// The AR session ended and the platform cleared its handles.
    Ended,
}

/// Hit-test session state machine.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HitTestSession {
    pub phase: HitTestPhase,
}

/// The singleton reticle: where a placed object would land.
///
/// Written every `Ready` frame by `drive_hit_test_session`; read by
/// `handle_select` to gate placement. The pose is left stale (but unused)
/// while invisible.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Reticle {
    /// True iff the most recent hit-test query returned at least one result.
    pub visible: bool,
    /// Pose copied verbatim from the first hit-test result.
    pub pose: Mat4,
}

impl Default for Reticle {
    fn default() -> Self {
        Self {
            visible: false,
            pose: Mat4::IDENTITY,
        }
    }
}

/// Hue accumulator for the pulsating sphere's material, always in [0, 1).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HueCycle {
    pub hue: f32,
}

impl HueCycle {
    /// Advance by one frame's step, wrapping mod 1.
    pub fn advance(&mut self) {
        self.hue = (self.hue + HUE_STEP) % 1.0;
    }
}

/// Deterministic RNG for placed-object colors and spin speeds.
#[derive(Resource)]
pub struct PlacementRng {
    pub rng: ChaCha8Rng,
    seed: u64,
}

impl PlacementRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PlacementRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wraps_mod_one() {
        let mut hue = HueCycle::default();
        let n = 2500;
        for _ in 0..n {
            hue.advance();
        }
        #[allow(clippy::cast_precision_loss)]
        let expected = (n as f32 * HUE_STEP) % 1.0;
        assert!(hue.hue >= 0.0 && hue.hue < 1.0);
        assert!((hue.hue - expected).abs() < 1e-3);
    }

    #[test]
    fn phase_defaults_to_uninitialized() {
        assert_eq!(HitTestSession::default().phase, HitTestPhase::Uninitialized);
    }

    #[test]
    fn reticle_starts_hidden_at_identity() {
        let reticle = Reticle::default();
        assert!(!reticle.visible);
        assert_eq!(reticle.pose, Mat4::IDENTITY);
    }

    #[test]
    fn placement_rng_resets_to_seed() {
        use rand::Rng;

        let mut rng = PlacementRng::new(42);
        let first: f32 = rng.rng.random_range(0.0..1.0);
        rng.reset();
        let again: f32 = rng.rng.random_range(0.0..1.0);
        assert_eq!(first, again);
        assert_eq!(rng.seed(), 42);
    }
}
