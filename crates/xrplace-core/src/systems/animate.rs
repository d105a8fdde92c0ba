//! Decorative animations: sphere pulse, hue cycling, scene-store sync.

use bevy::prelude::*;

use crate::components::{PlacedObject, PulsingSphere};
use crate::events::XrFrameEvent;
use crate::resources::{HitTestSession, HueCycle, Reticle};
use crate::state_store::{SceneStore, SceneSummary};

/// Baseline uniform scale of the pulsating sphere.
pub const PULSE_BASE_SCALE: f32 = 0.2;
/// Pulse amplitude added on top of the baseline.
pub const PULSE_AMPLITUDE: f32 = 0.05;
/// Pulse period divisor, in seconds.
pub const PULSE_PERIOD_SECS: f32 = 0.5;

/// Position of the pulsating sphere, above and ahead of the initial camera.
const SPHERE_POSITION: Vec3 = Vec3::new(0.0, 2.0, -1.0);

/// Spawns the logical pulsating-sphere entity at startup.
///
/// The rendering plugin attaches mesh and material to it on the first frame.
pub fn spawn_pulsing_sphere(mut commands: Commands) {
    commands.spawn((
        PulsingSphere,
        Transform::from_translation(SPHERE_POSITION).with_scale(Vec3::splat(PULSE_BASE_SCALE)),
    ));
}

/// Recomputes the sphere's uniform scale from the XR frame timestamp.
///
/// scale = baseline + amplitude * sin(t / period), t in seconds.
pub fn pulse_sphere(
    mut frames: MessageReader<XrFrameEvent>,
    mut spheres: Query<&mut Transform, With<PulsingSphere>>,
) {
    let Some(frame) = frames.read().last() else {
        return;
    };

    #[allow(clippy::cast_possible_truncation)]
    let t = (frame.timestamp_ms / 1000.0) as f32;
    let scale = PULSE_BASE_SCALE + PULSE_AMPLITUDE * (t / PULSE_PERIOD_SECS).sin();
    for mut transform in &mut spheres {
        transform.scale = Vec3::splat(scale);
    }
}

/// Advances the hue accumulator once per XR frame.
pub fn advance_hue(mut frames: MessageReader<XrFrameEvent>, mut hue: ResMut<HueCycle>) {
    for _ in frames.read() {
        hue.advance();
    }
}

/// Syncs the observable scene state to the shared store for the page.
pub fn sync_scene_to_store(
    store: Res<SceneStore>,
    session: Res<HitTestSession>,
    reticle: Res<Reticle>,
    hue: Res<HueCycle>,
    placed: Query<(), With<PlacedObject>>,
) {
    store.set_summary(SceneSummary {
        hit_test_phase: session.phase,
        reticle_visible: reticle.visible,
        placed_objects: placed.iter().count(),
        hue: hue.hue,
    });
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::{PULSE_AMPLITUDE, PULSE_BASE_SCALE, PULSE_PERIOD_SECS};
    use crate::components::PulsingSphere;
    use crate::resources::{HUE_STEP, HitTestPhase, HueCycle};
    use crate::state_store::SceneStore;
    use crate::test_utils::TestApp;

    fn sphere_scale(app: &mut TestApp) -> Vec3 {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<PulsingSphere>>();
        query.single(world).unwrap().scale
    }

    #[test]
    fn sphere_scale_follows_timestamp() {
        let mut app = TestApp::new();

        for t_ms in [250.0, 785.0, 1321.0] {
            app.frame(t_ms, None);
            app.update();

            #[allow(clippy::cast_possible_truncation)]
            let t = (t_ms / 1000.0) as f32;
            let expected = PULSE_BASE_SCALE + PULSE_AMPLITUDE * (t / PULSE_PERIOD_SECS).sin();
            let scale = sphere_scale(&mut app);
            assert!((scale.x - expected).abs() < 1e-6);
            assert_eq!(scale.x, scale.y);
            assert_eq!(scale.x, scale.z);
        }
    }

    #[test]
    fn sphere_scale_untouched_without_frames() {
        let mut app = TestApp::new();
        let before = sphere_scale(&mut app);
        app.update();
        assert_eq!(sphere_scale(&mut app), before);
    }

    #[test]
    fn hue_advances_once_per_frame() {
        let mut app = TestApp::new();
        let n = 40;
        for i in 0..n {
            app.frame(f64::from(i) * 16.0, None);
            app.update();
        }

        #[allow(clippy::cast_precision_loss)]
        let expected = (n as f32 * HUE_STEP) % 1.0;
        let hue = app.world().resource::<HueCycle>().hue;
        assert!((hue - expected).abs() < 1e-5);
    }

    #[test]
    fn store_reflects_scene_state() {
        let mut app = TestApp::new();
        let version_at_start = app.world().resource::<SceneStore>().get_version();

        app.frame(16.0, None);
        app.update();
        app.sources_acquired();
        app.frame(33.0, Some(Mat4::from_translation(Vec3::NEG_Z)));
        app.select();
        app.update();
        app.update();

        let store = app.world().resource::<SceneStore>().clone();
        let summary = store.get_summary();
        assert_eq!(summary.hit_test_phase, HitTestPhase::Ready);
        assert!(summary.reticle_visible);
        assert_eq!(summary.placed_objects, 1);
        assert!(store.get_version() > version_at_start);
    }
}
