use glam::{Quat, Vec3};
use hecs::World;
use tracing::trace;

use super::collision::collision_system;
use crate::components::{
    AngularVelocity, Damping, GravityAffected, RigidBody, Sleeping, Static, Velocity,
};

/// Advances every body in the world by a caller-chosen step.
///
/// Bodies are hecs entities carrying [`RigidBody`] and [`Collider`](crate::components::Collider);
/// adding a body is spawning one.
pub trait PhysicsBackend {
    fn step(&mut self, world: &mut World, dt: f32);
}

/// Semi-implicit Euler integration followed by impulse-based contact response.
pub struct SimplePhysics {
    pub gravity: Vec3,
}

impl SimplePhysics {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

impl PhysicsBackend for SimplePhysics {
    fn step(&mut self, world: &mut World, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        for (_entity, (body, vel, ang, gravity, damping, fixed, sleeping)) in world.query_mut::<(
            &mut RigidBody,
            &mut Velocity,
            Option<&mut AngularVelocity>,
            Option<&GravityAffected>,
            Option<&Damping>,
            Option<&Static>,
            Option<&Sleeping>,
        )>() {
            if fixed.is_some() || sleeping.is_some() {
                continue;
            }
            if gravity.is_some() {
                vel.0 += self.gravity * dt;
            }
            let damping = damping.copied().unwrap_or_default();
            vel.0 *= (1.0 - damping.linear).max(0.0).powf(dt);
            // Semi-implicit Euler: update velocity first, then position
            body.position += vel.0 * dt;

            if let Some(ang) = ang {
                ang.0 *= (1.0 - damping.angular).max(0.0).powf(dt);
                let spin = Quat::from_scaled_axis(ang.0 * dt);
                body.rotation = (spin * body.rotation).normalize();
            }
        }

        let contacts = collision_system(world, dt);
        if !contacts.is_empty() {
            trace!(count = contacts.len(), "contacts resolved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Collider;
    use approx::assert_relative_eq;

    #[test]
    fn free_fall_matches_gravity() {
        let mut world = World::new();
        let ball = world.spawn((
            RigidBody::new(Vec3::new(0.0, 10.0, 0.0)),
            Velocity(Vec3::ZERO),
            GravityAffected,
            Damping { linear: 0.0, angular: 0.0 },
        ));
        let mut physics = SimplePhysics::new(Vec3::new(0.0, -9.82, 0.0));
        physics.step(&mut world, 0.1);

        assert_relative_eq!(world.get::<&Velocity>(ball).unwrap().0.y, -0.982, epsilon = 1e-5);
        assert_relative_eq!(
            world.get::<&RigidBody>(ball).unwrap().position.y,
            10.0 - 0.0982,
            epsilon = 1e-5
        );
    }

    #[test]
    fn damping_decays_per_second() {
        let mut world = World::new();
        let ball = world.spawn((
            RigidBody::new(Vec3::ZERO),
            Velocity(Vec3::new(10.0, 0.0, 0.0)),
            Damping { linear: 0.5, angular: 0.0 },
        ));
        let mut physics = SimplePhysics::new(Vec3::ZERO);
        for _ in 0..10 {
            physics.step(&mut world, 0.1);
        }
        assert_relative_eq!(world.get::<&Velocity>(ball).unwrap().0.x, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn sleeping_and_static_bodies_do_not_move() {
        let mut world = World::new();
        let asleep = world.spawn((
            RigidBody::new(Vec3::new(0.0, 5.0, 0.0)),
            Velocity(Vec3::ZERO),
            GravityAffected,
            Sleeping,
        ));
        let fixed = world.spawn((
            RigidBody::new(Vec3::new(1.0, 5.0, 0.0)),
            Velocity(Vec3::ZERO),
            GravityAffected,
            Static,
        ));
        let mut physics = SimplePhysics::new(Vec3::new(0.0, -9.82, 0.0));
        physics.step(&mut world, 0.1);
        assert_eq!(world.get::<&RigidBody>(asleep).unwrap().position.y, 5.0);
        assert_eq!(world.get::<&RigidBody>(fixed).unwrap().position.y, 5.0);
    }

    #[test]
    fn ball_settles_on_ground() {
        let mut world = World::new();
        world.spawn((
            RigidBody::new(Vec3::ZERO),
            Collider::Plane { normal: Vec3::Y, offset: 0.0 },
            Static,
        ));
        let ball = world.spawn((
            RigidBody::new(Vec3::new(0.0, 2.0, 0.0)),
            Velocity(Vec3::ZERO),
            GravityAffected,
            Collider::Sphere { radius: 0.5 },
        ));
        let mut physics = SimplePhysics::new(Vec3::new(0.0, -9.82, 0.0));
        for _ in 0..600 {
            physics.step(&mut world, 1.0 / 60.0);
        }
        let y = world.get::<&RigidBody>(ball).unwrap().position.y;
        assert!((0.45..=0.55).contains(&y), "ball rests at {y}");
    }
}
