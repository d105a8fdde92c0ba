//! Select handling and placed-object animation.

use bevy::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use crate::components::{PlacedObject, SPIN_SPEED_RANGE};
use crate::events::{XrFrameEvent, XrSelectEvent};
use crate::resources::{PlacementRng, Reticle};

/// Spawns one placed object per select event, iff the reticle is visible.
///
/// Pose is copied verbatim from the reticle; color and spin speeds are
/// drawn from the seeded RNG. The collection is append-only.
pub fn handle_select(
    mut commands: Commands,
    mut selects: MessageReader<XrSelectEvent>,
    reticle: Res<Reticle>,
    mut rng: ResMut<PlacementRng>,
) {
    for _ in selects.read() {
        if !reticle.visible {
            debug!("[xrplace] select ignored: no surface under the reticle");
            continue;
        }

        let color = Color::srgb(
            rng.rng.random_range(0.0..1.0),
            rng.rng.random_range(0.0..1.0),
            rng.rng.random_range(0.0..1.0),
        );
        let spin_x = rng.rng.random_range(SPIN_SPEED_RANGE);
        let spin_z = rng.rng.random_range(SPIN_SPEED_RANGE);

        let transform = Transform::from_matrix(reticle.pose);
        info!(
            "[xrplace] placing object at ({:.2}, {:.2}, {:.2})",
            transform.translation.x, transform.translation.y, transform.translation.z
        );

        commands.spawn((
            PlacedObject {
                spin_x,
                spin_z,
                color,
            },
            transform,
        ));
    }
}

/// Rotates every placed object by its own per-frame speeds, once per XR frame.
///
/// Accumulation is unbounded; angle wrap-around is the renderer's concern.
pub fn spin_placed_objects(
    mut frames: MessageReader<XrFrameEvent>,
    mut placed: Query<(&PlacedObject, &mut Transform)>,
) {
    let frame_count = frames.read().count();
    if frame_count == 0 {
        return;
    }

    for (object, mut transform) in &mut placed {
        for _ in 0..frame_count {
            transform.rotate_local_x(object.spin_x);
            transform.rotate_local_z(object.spin_z);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::components::{PlacedObject, SPIN_SPEED_RANGE};
    use crate::test_utils::TestApp;

    fn ready_with_pose(app: &mut TestApp, pose: Mat4) {
        app.frame(16.0, None);
        app.update();
        app.sources_acquired();
        app.frame(33.0, Some(pose));
        app.update();
    }

    #[test]
    fn select_while_visible_places_one_object_at_reticle_pose() {
        let mut app = TestApp::new();
        let pose = Mat4::from_translation(Vec3::new(0.2, 0.0, -1.5));
        ready_with_pose(&mut app, pose);

        app.select();
        app.update();

        assert_eq!(app.placed_count(), 1);
        let world = app.world_mut();
        let mut query = world.query::<(&PlacedObject, &Transform)>();
        let (object, transform) = query.single(world).unwrap();
        assert_eq!(*transform, Transform::from_matrix(pose));
        assert!(SPIN_SPEED_RANGE.contains(&object.spin_x));
        assert!(SPIN_SPEED_RANGE.contains(&object.spin_z));
    }

    #[test]
    fn select_while_hidden_places_nothing() {
        let mut app = TestApp::new();
        app.frame(16.0, None);
        app.update();
        app.sources_acquired();

        // Frame with zero hit results and a select in the same update.
        app.frame(33.0, None);
        app.select();
        app.update();

        assert_eq!(app.placed_count(), 0);
    }

    #[test]
    fn placed_objects_are_append_only() {
        let mut app = TestApp::new();
        let pose = Mat4::from_translation(Vec3::NEG_Z);
        ready_with_pose(&mut app, pose);

        let mut last = 0;
        for i in 0..5 {
            app.select();
            app.frame(50.0 + f64::from(i) * 16.0, Some(pose));
            app.update();
            let count = app.placed_count();
            assert!(count >= last);
            last = count;
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn spin_accumulates_per_frame_without_moving_position() {
        let mut app = TestApp::new();
        let pose = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0));
        ready_with_pose(&mut app, pose);
        app.select();
        app.update();

        let initial = {
            let world = app.world_mut();
            let mut query = world.query_filtered::<&Transform, With<PlacedObject>>();
            *query.single(world).unwrap()
        };

        for i in 0..10 {
            app.frame(66.0 + f64::from(i) * 16.0, Some(pose));
            app.update();
        }

        let world = app.world_mut();
        let mut query = world.query::<(&PlacedObject, &Transform)>();
        let (object, spun) = query.single(world).unwrap();
        assert_eq!(spun.translation, initial.translation);
        assert_ne!(spun.rotation, initial.rotation);

        // Ten frames of spin about local X and Z, applied in order.
        let mut expected = initial;
        for _ in 0..10 {
            expected.rotate_local_x(object.spin_x);
            expected.rotate_local_z(object.spin_z);
        }
        assert!(spun.rotation.abs_diff_eq(expected.rotation, 1e-5));
    }

    #[test]
    fn placement_is_deterministic_for_a_seed() {
        let mut colors = Vec::new();
        for _ in 0..2 {
            let mut app = TestApp::with_seed(42);
            let pose = Mat4::IDENTITY;
            ready_with_pose(&mut app, pose);
            app.select();
            app.update();

            let world = app.world_mut();
            let mut query = world.query::<&PlacedObject>();
            colors.push(query.single(world).unwrap().color);
        }
        assert_eq!(colors[0], colors[1]);
    }
}
