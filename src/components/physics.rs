use glam::{Quat, Vec2, Vec3};
use hecs::Entity;

/// Physical transform of a body, owned by the physics step.
///
/// The mesh side lives in [`LocalTransform`](super::LocalTransform); the two
/// are reconciled once per frame by `body_to_mesh_system`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pub position: Vec3,
    pub rotation: Quat,
}

impl RigidBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Linear velocity in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity(pub Vec3);

/// Angular velocity as a scaled axis (radians per second).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularVelocity(pub Vec3);

/// Body mass in kilograms. Zero mass bodies should also carry [`Static`].
pub struct Mass(pub f32);

/// Marker: body is affected by gravity.
pub struct GravityAffected;

/// Per-second velocity decay, applied as `v *= (1 - coeff)^dt`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Damping {
    pub linear: f32,
    pub angular: f32,
}

impl Default for Damping {
    fn default() -> Self {
        Self {
            linear: 0.01,
            angular: 0.01,
        }
    }
}

/// Collision shape attached to a body.
#[derive(Clone, Debug)]
pub enum Collider {
    Sphere { radius: f32 },
    Plane { normal: Vec3, offset: f32 },
    /// A closed 2D outline in the body's XY plane, extruded along +Z by `depth`.
    Profile { outline: Vec<Vec2>, depth: f32 },
}

/// Marker: body is immovable (infinite mass for collision response).
pub struct Static;

/// Marker: body is asleep and skipped by integration until woken.
pub struct Sleeping;

/// Friction and restitution of a surface. Contact pairs average both values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            friction: 0.3,
            restitution: 0.3,
        }
    }
}

/// Collision contact produced by the detection phase.
pub struct CollisionEvent {
    pub entity_a: Entity,
    pub entity_b: Entity,
    pub contact_normal: Vec3,
    pub penetration_depth: f32,
}
