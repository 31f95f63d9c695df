//! Marker-based scene alignment.
//!
//! A [`MarkerSource`] reports where the tracked marker is, frame by frame.
//! [`ArSession`] applies that pose to the scene root, so every scene entity
//! follows the marker while physics keeps running in scene-local space.

use glam::{EulerRot, Quat, Vec3};
use tracing::{info, warn};

use crate::components::LocalTransform;
use crate::config::{vec3, ArConfig};
use crate::context::SimContext;
use crate::driver::FrameObserver;

/// Marker pose in camera space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPose {
    pub position: Vec3,
    pub rotation: Quat,
}

pub trait MarkerSource {
    /// Latest pose, or `None` when the marker is not visible this frame.
    fn poll(&mut self, dt: f32) -> Option<MarkerPose>;

    /// Pattern identifier, for logging.
    fn pattern(&self) -> &str;
}

/// A marker that is always visible at a configured pose.
pub struct FixedMarker {
    pattern: String,
    pose: MarkerPose,
}

impl FixedMarker {
    pub fn new(pattern: impl Into<String>, pose: MarkerPose) -> Self {
        Self {
            pattern: pattern.into(),
            pose,
        }
    }

    pub fn from_config(config: &ArConfig) -> Self {
        let [x, y, z] = config.marker_rotation_deg.map(f32::to_radians);
        Self::new(
            config.pattern.clone(),
            MarkerPose {
                position: vec3(config.marker_position),
                rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            },
        )
    }
}

impl MarkerSource for FixedMarker {
    fn poll(&mut self, _dt: f32) -> Option<MarkerPose> {
        Some(self.pose)
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Per-frame observer that keeps the scene root on the marker.
pub struct ArSession<M: MarkerSource> {
    source: M,
    found: bool,
}

impl<M: MarkerSource> ArSession<M> {
    pub fn new(source: M) -> Self {
        Self {
            source,
            found: false,
        }
    }

    pub fn update(&mut self, ctx: &mut SimContext, dt: f32) {
        let Some(pose) = self.source.poll(dt) else {
            return;
        };
        if !self.found {
            self.found = true;
            ctx.ar_locked = true;
            info!(pattern = self.source.pattern(), "marker found");
        }
        match ctx.world.get::<&mut LocalTransform>(ctx.scene_root) {
            Ok(mut root) => {
                root.position = pose.position;
                root.rotation = pose.rotation;
            }
            Err(err) => warn!(%err, "scene root has no transform, marker pose dropped"),
        }
    }
}

impl<M: MarkerSource> FrameObserver for ArSession<M> {
    fn on_frame(&mut self, ctx: &mut SimContext, delta: f32, _absolute: f32) {
        self.update(ctx, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    /// Hidden for the first `hidden_frames` polls, then fixed.
    struct LateMarker {
        hidden_frames: u32,
        pose: MarkerPose,
    }

    impl MarkerSource for LateMarker {
        fn poll(&mut self, _dt: f32) -> Option<MarkerPose> {
            if self.hidden_frames > 0 {
                self.hidden_frames -= 1;
                None
            } else {
                Some(self.pose)
            }
        }

        fn pattern(&self) -> &str {
            "test"
        }
    }

    fn context() -> SimContext {
        let mut world = World::new();
        let root = world.spawn((LocalTransform::new(Vec3::ZERO),));
        let ball = world.spawn(());
        let ramp = world.spawn(());
        SimContext::new(world, root, ball, ramp)
    }

    #[test]
    fn first_pose_locks_and_moves_root() {
        let pose = MarkerPose {
            position: Vec3::new(0.0, -1.0, -6.0),
            rotation: Quat::from_rotation_x(-0.5),
        };
        let mut session = ArSession::new(LateMarker { hidden_frames: 2, pose });
        let mut ctx = context();

        session.update(&mut ctx, 0.016);
        session.update(&mut ctx, 0.016);
        assert!(!ctx.ar_locked);
        assert_eq!(
            ctx.world.get::<&LocalTransform>(ctx.scene_root).unwrap().position,
            Vec3::ZERO
        );

        session.update(&mut ctx, 0.016);
        assert!(ctx.ar_locked);
        assert!(session.found);
        let root = *ctx.world.get::<&LocalTransform>(ctx.scene_root).unwrap();
        assert_eq!(root.position, pose.position);
        assert_eq!(root.rotation, pose.rotation);
    }

    #[test]
    fn fixed_marker_from_config_converts_degrees() {
        let config = ArConfig {
            enabled: true,
            pattern: "patt.kanji".to_string(),
            marker_position: [1.0, 2.0, 3.0],
            marker_rotation_deg: [0.0, 90.0, 0.0],
        };
        let mut marker = FixedMarker::from_config(&config);
        assert_eq!(marker.pattern(), "patt.kanji");
        let pose = marker.poll(0.0).unwrap();
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
        let turned = pose.rotation * Vec3::X;
        assert!((turned - Vec3::NEG_Z).length() < 1e-5);
    }
}
