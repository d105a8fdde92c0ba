//! ECS Components for the AR scene.

use std::ops::Range;

use bevy::prelude::*;

/// Radians-per-frame spin speed range for freshly placed objects.
pub const SPIN_SPEED_RANGE: Range<f32> = 0.01..0.06;

/// A small cone placed at a reticle pose by a select (tap) input.
///
/// The pose is fixed at creation time; only the rotation is mutated
/// afterwards, by `spin_placed_objects`. Placed objects are never despawned
/// within a session.
#[derive(Component, Debug, Clone)]
pub struct PlacedObject {
    /// Per-frame rotation about the local X axis, radians.
    pub spin_x: f32,
    /// Per-frame rotation about the local Z axis, radians.
    pub spin_z: f32,
    /// Base material color, assigned uniformly at random on creation.
    pub color: Color,
}

/// The decorative sphere whose scale pulsates and whose hue cycles.
#[derive(Component, Debug, Clone, Default)]
pub struct PulsingSphere;

/// Marker for the static torus-knot figure.
#[derive(Component, Debug, Clone, Default)]
pub struct TorusFigure;

/// Marker for the three static decorative primitives.
#[derive(Component, Debug, Clone, Default)]
pub struct DecorPiece;

/// Marker for the reticle's visual ring entity.
///
/// The authoritative reticle state (pose + visibility) lives in the
/// [`crate::resources::Reticle`] resource; this entity just mirrors it.
#[derive(Component, Debug, Clone, Default)]
pub struct ReticleVisual;

/// Marker for the main camera, which follows the XR viewer pose.
#[derive(Component, Debug, Clone, Default)]
pub struct XrCamera;
