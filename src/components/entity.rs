use glam::{Quat, Vec3};

/// Marker: the launched ball.
pub struct Projectile;

/// Marker: the Bezier ramp.
pub struct Ramp;

/// Marker: the cup the projectile should come to rest in.
pub struct Target;

/// Marker: parent of every scene entity. AR alignment moves this entity only.
pub struct SceneRoot;

/// Transform restored by `reset_position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl StartTransform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Finite-difference acceleration estimate.
///
/// `previous_velocity` is the velocity seen at the last estimate; the
/// estimate itself only changes when `kinematics_system` runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicSample {
    pub previous_velocity: Vec3,
    pub acceleration: Vec3,
}

impl KinematicSample {
    pub fn new(velocity: Vec3) -> Self {
        Self {
            previous_velocity: velocity,
            acceleration: Vec3::ZERO,
        }
    }
}
