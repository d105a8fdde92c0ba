//! Rendering systems: scene content, visuals for logical entities, and
//! material animation.
//!
//! Everything here needs `Assets`, `StandardMaterial`, or `Visibility` and
//! is registered only by the unified plugin; the headless plugin never
//! touches it.

use bevy::prelude::*;

use crate::components::{
    DecorPiece, PlacedObject, PulsingSphere, ReticleVisual, TorusFigure, XrCamera,
};
use crate::events::XrFrameEvent;
use crate::mesh;
use crate::resources::{HueCycle, Reticle};

/// Camera configuration, matching the demo's fixed perspective setup.
pub const CAMERA_FOV_DEGREES: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 40.0;

const RETICLE_INNER_RADIUS: f32 = 0.15;
const RETICLE_OUTER_RADIUS: f32 = 0.2;
const RETICLE_SEGMENTS: u32 = 32;

const CONE_RADIUS: f32 = 0.05;
const CONE_HEIGHT: f32 = 0.2;

const DECOR_SCALE: f32 = 0.1;
const DECOR_OPACITY: f32 = 0.8;

/// Shared mesh/material handles created once at startup.
#[derive(Resource)]
pub struct SceneAssets {
    pub cone_mesh: Handle<Mesh>,
    pub sphere_mesh: Handle<Mesh>,
    pub sphere_material: Handle<StandardMaterial>,
}

/// Builds the static scene: camera, lights, decorative content, reticle
/// visual, and the shared asset handles.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera: fixed perspective until XR viewer poses take over.
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, 3.0, 3.0).with_rotation(Quat::from_rotation_x(-0.4)),
        XrCamera,
        // Ambient fill standing in, with the directional light below, for
        // the original's hemisphere light.
        AmbientLight {
            color: Color::srgb_u8(255, 255, 187),
            brightness: 120.0,
            ..default()
        },
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(0.5, 1.0, 0.25).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Three translucent decorative primitives at one-tenth scale.
    let decor = [
        (
            meshes.add(Cylinder::new(0.2, 1.0)),
            Color::srgb_u8(226, 35, 0),
            Vec3::new(-0.5, 1.5, 0.0),
        ),
        (
            meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
            Color::srgb_u8(100, 100, 255),
            Vec3::new(0.5, 1.5, 0.0),
        ),
        (
            meshes.add(Sphere::new(0.6)),
            Color::srgb_u8(0, 255, 0),
            Vec3::new(0.0, 1.5, -0.5),
        ),
    ];
    for (mesh, color, position) in decor {
        commands.spawn((
            DecorPiece,
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color.with_alpha(DECOR_OPACITY),
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(position).with_scale(Vec3::splat(DECOR_SCALE)),
        ));
    }

    // Static torus-knot figure, hot pink.
    commands.spawn((
        TorusFigure,
        Mesh3d(meshes.add(mesh::torus_knot(0.3, 0.1, 100, 16, 2, 3))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(255, 105, 180),
            ..default()
        })),
        Transform::from_xyz(1.5, 1.0, -0.5),
    ));

    // Reticle ring, hidden until a hit-test result shows it.
    commands.spawn((
        ReticleVisual,
        Mesh3d(meshes.add(mesh::flat_ring(
            RETICLE_INNER_RADIUS,
            RETICLE_OUTER_RADIUS,
            RETICLE_SEGMENTS,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        Visibility::Hidden,
    ));

    // Shared handles for visuals attached later.
    let sphere_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.insert_resource(SceneAssets {
        cone_mesh: meshes.add(Cone {
            radius: CONE_RADIUS,
            height: CONE_HEIGHT,
        }),
        sphere_mesh: meshes.add(Sphere::new(0.2)),
        sphere_material,
    });
}

/// Attaches mesh and material to the logical pulsating-sphere entity.
pub fn attach_sphere_visual(
    mut commands: Commands,
    assets: Option<Res<SceneAssets>>,
    spheres: Query<Entity, (With<PulsingSphere>, Without<Mesh3d>)>,
) {
    let Some(assets) = assets else {
        return;
    };
    for entity in spheres.iter() {
        commands.entity(entity).insert((
            Mesh3d(assets.sphere_mesh.clone()),
            MeshMaterial3d(assets.sphere_material.clone()),
        ));
    }
}

/// Attaches a cone mesh and a per-object material to new placed objects.
pub fn attach_placed_visuals(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Option<Res<SceneAssets>>,
    placed: Query<(Entity, &PlacedObject), Without<Mesh3d>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, object) in placed.iter() {
        commands.entity(entity).insert((
            Mesh3d(assets.cone_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: object.color,
                ..default()
            })),
        ));
    }
}

/// Mirrors the reticle resource onto its visual entity.
pub fn sync_reticle_visual(
    reticle: Res<Reticle>,
    mut visuals: Query<(&mut Transform, &mut Visibility), With<ReticleVisual>>,
) {
    for (mut transform, mut visibility) in &mut visuals {
        *transform = Transform::from_matrix(reticle.pose);
        *visibility = if reticle.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Applies the current hue to the sphere material (full saturation,
/// mid lightness).
pub fn apply_sphere_hue(
    hue: Res<HueCycle>,
    assets: Option<Res<SceneAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(assets) = assets else {
        return;
    };
    if let Some(material) = materials.get_mut(&assets.sphere_material) {
        material.base_color = Color::hsl(hue.hue * 360.0, 1.0, 0.5);
    }
}

/// Follows the XR viewer pose with the main camera while a session runs.
pub fn update_xr_camera(
    mut frames: MessageReader<XrFrameEvent>,
    mut cameras: Query<&mut Transform, With<XrCamera>>,
) {
    let Some(pose) = frames.read().filter_map(|frame| frame.viewer_pose).last() else {
        return;
    };
    for mut transform in &mut cameras {
        *transform = Transform::from_matrix(pose);
    }
}
