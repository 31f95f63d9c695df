use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{
    AngularVelocity, KinematicSample, LocalTransform, RigidBody, Sleeping, StartTransform,
    Velocity,
};

/// Copy position and orientation from the physics body to the mesh, for
/// every entity that has both. Run once per frame after the physics step.
pub fn body_to_mesh_system(world: &mut World) {
    for (_entity, (body, local)) in world.query_mut::<(&RigidBody, &mut LocalTransform)>() {
        local.position = body.position;
        local.rotation = body.rotation;
    }
}

/// Single-entity form of [`body_to_mesh_system`].
pub fn update_mesh_from_body(world: &mut World, entity: Entity) {
    if let Ok((body, local)) = world.query_one_mut::<(&RigidBody, &mut LocalTransform)>(entity) {
        local.position = body.position;
        local.rotation = body.rotation;
    }
}

/// Write `position` to both the body and the mesh.
pub fn set_position(world: &mut World, entity: Entity, position: Vec3) {
    if let Ok(mut body) = world.get::<&mut RigidBody>(entity) {
        body.position = position;
    }
    if let Ok(mut local) = world.get::<&mut LocalTransform>(entity) {
        local.position = position;
    }
}

/// Restore the start transform on body and mesh and zero both velocities.
/// The acceleration estimator restarts from rest as well.
pub fn reset_position(world: &mut World, entity: Entity) {
    let Ok(start) = world.get::<&StartTransform>(entity).map(|s| *s) else {
        return;
    };

    set_position(world, entity, start.position);
    if let Ok(mut body) = world.get::<&mut RigidBody>(entity) {
        body.rotation = start.rotation;
    }
    if let Ok(mut local) = world.get::<&mut LocalTransform>(entity) {
        local.rotation = start.rotation;
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        vel.0 = Vec3::ZERO;
    }
    if let Ok(mut ang) = world.get::<&mut AngularVelocity>(entity) {
        ang.0 = Vec3::ZERO;
    }
    if let Ok(mut sample) = world.get::<&mut KinematicSample>(entity) {
        *sample = KinematicSample::new(Vec3::ZERO);
    }
}

pub fn sleep(world: &mut World, entity: Entity) {
    let _ = world.insert_one(entity, Sleeping);
}

pub fn wake(world: &mut World, entity: Entity) {
    let _ = world.remove_one::<Sleeping>(entity);
}

/// Speed of `entity`, or 0 if it has no velocity.
pub fn velocity_module(world: &World, entity: Entity) -> f32 {
    world
        .get::<&Velocity>(entity)
        .map(|v| v.0.length())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn spawn_ball(world: &mut World, start: Vec3) -> Entity {
        world.spawn((
            RigidBody::new(start),
            LocalTransform::new(start),
            Velocity(Vec3::ZERO),
            AngularVelocity(Vec3::ZERO),
            StartTransform::at(start),
            KinematicSample::new(Vec3::ZERO),
        ))
    }

    #[test]
    fn mesh_follows_body_only_after_sync() {
        let mut world = World::new();
        let e = spawn_ball(&mut world, Vec3::ZERO);
        world.get::<&mut RigidBody>(e).unwrap().position = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(world.get::<&LocalTransform>(e).unwrap().position, Vec3::ZERO);
        update_mesh_from_body(&mut world, e);
        assert_eq!(
            world.get::<&LocalTransform>(e).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn system_copies_rotation_too() {
        let mut world = World::new();
        let e = spawn_ball(&mut world, Vec3::ZERO);
        let spin = Quat::from_rotation_z(0.7);
        world.get::<&mut RigidBody>(e).unwrap().rotation = spin;
        body_to_mesh_system(&mut world);
        assert_eq!(world.get::<&LocalTransform>(e).unwrap().rotation, spin);
    }

    #[test]
    fn reset_restores_start_from_any_state() {
        let start = Vec3::new(-4.99, 8.0, 0.0);
        let mut world = World::new();
        let e = spawn_ball(&mut world, start);

        {
            let mut body = world.get::<&mut RigidBody>(e).unwrap();
            body.position = Vec3::new(12.0, -3.0, 0.25);
            body.rotation = Quat::from_rotation_y(1.2);
        }
        world.get::<&mut Velocity>(e).unwrap().0 = Vec3::new(3.0, -9.0, 0.5);
        world.get::<&mut AngularVelocity>(e).unwrap().0 = Vec3::new(0.0, 0.0, -6.0);

        reset_position(&mut world, e);
        update_mesh_from_body(&mut world, e);

        let local = *world.get::<&LocalTransform>(e).unwrap();
        assert_eq!(local.position, start);
        assert_eq!(local.rotation, Quat::IDENTITY);
        assert_eq!(world.get::<&Velocity>(e).unwrap().0, Vec3::ZERO);
        assert_eq!(world.get::<&AngularVelocity>(e).unwrap().0, Vec3::ZERO);
        assert_eq!(velocity_module(&world, e), 0.0);
    }

    #[test]
    fn set_position_keeps_pair_coherent() {
        let mut world = World::new();
        let e = spawn_ball(&mut world, Vec3::ZERO);
        set_position(&mut world, e, Vec3::new(0.5, 0.25, -1.0));
        assert_eq!(
            world.get::<&RigidBody>(e).unwrap().position,
            world.get::<&LocalTransform>(e).unwrap().position
        );
    }

    #[test]
    fn sleep_and_wake() {
        let mut world = World::new();
        let e = spawn_ball(&mut world, Vec3::ZERO);
        assert!(world.get::<&Sleeping>(e).is_err());
        sleep(&mut world, e);
        assert!(world.get::<&Sleeping>(e).is_ok());
        wake(&mut world, e);
        assert!(world.get::<&Sleeping>(e).is_err());
    }

    #[test]
    fn reset_without_start_transform_is_a_no_op() {
        let mut world = World::new();
        let e = world.spawn((RigidBody::new(Vec3::ONE), Velocity(Vec3::X)));
        reset_position(&mut world, e);
        assert_eq!(world.get::<&RigidBody>(e).unwrap().position, Vec3::ONE);
        assert_eq!(world.get::<&Velocity>(e).unwrap().0, Vec3::X);
    }
}
