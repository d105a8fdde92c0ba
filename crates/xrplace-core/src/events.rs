//! ECS Events (Messages) for the AR scene.
//!
//! `pump_xr_input` translates the raw [`crate::xr::XrInput`] stream into
//! these typed messages once per update.

use bevy::prelude::*;

/// Message fired for each XR animation frame delivered by the session.
#[derive(Message, Debug, Clone, Copy)]
pub struct XrFrameEvent {
    /// Frame timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Viewer pose in the local reference space, when tracked.
    pub viewer_pose: Option<Mat4>,
    /// First hit-test result pose, when the query returned any.
    pub hit_pose: Option<Mat4>,
}

/// Message fired once the reference spaces and hit-test source are acquired.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct XrSourcesAcquiredEvent;

/// Message fired for each discrete "select" (tap) input.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct XrSelectEvent;

/// Message fired when the AR session ends.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct XrSessionEndedEvent;
