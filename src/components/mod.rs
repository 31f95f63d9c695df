mod entity;
mod physics;
mod render;

pub use entity::{KinematicSample, Projectile, Ramp, SceneRoot, StartTransform, Target};
pub use physics::{
    AngularVelocity, Collider, CollisionEvent, Damping, GravityAffected, Mass, RigidBody,
    Sleeping, Static, SurfaceMaterial, Velocity,
};
pub use render::{Checkerboard, Color, MeshHandle};

use glam::{Mat4, Quat, Vec3};
use hecs::{Entity, World};

/// Visual transform of a mesh (local space, relative to its parent).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Computed world-space transform matrix, updated by the propagation system.
pub struct GlobalTransform(pub Mat4);

/// Points to the parent entity in the transform hierarchy.
pub struct Parent(pub Entity);

/// Lists child entities in the transform hierarchy.
pub struct Children(pub Vec<Entity>);

/// Attach `child` under `parent` in the transform hierarchy.
pub fn add_child(world: &mut World, parent: Entity, child: Entity) {
    let pushed = match world.get::<&mut Children>(parent) {
        Ok(mut children) => {
            if !children.0.contains(&child) {
                children.0.push(child);
            }
            true
        }
        Err(_) => false,
    };
    if !pushed {
        let _ = world.insert_one(parent, Children(vec![child]));
    }

    let _ = world.insert_one(child, Parent(parent));
}
