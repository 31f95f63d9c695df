use glam::{Mat4, Vec2, Vec3};
use hecs::{Entity, World};

use crate::components::*;
use crate::config::{vec3, ProjectileConfig, RampConfig, TargetConfig};
use crate::geometry::mesh::{cuboid, extrude, sphere};
use crate::geometry::{MeshData, RampShape};
use crate::renderer::MeshStore;

/// Parent of every scene entity; AR alignment moves only this.
pub fn spawn_scene_root(world: &mut World) -> Entity {
    world.spawn((
        LocalTransform::new(Vec3::ZERO),
        GlobalTransform(Mat4::IDENTITY),
        SceneRoot,
    ))
}

pub fn spawn_ground(world: &mut World, meshes: &mut MeshStore, root: Entity) -> Entity {
    const HALF_EXTENT: f32 = 50.0;
    const THICKNESS: f32 = 0.2;
    // Unit box: Y from -0.5 to +0.5 in local space.
    let ground_handle = meshes.add(cuboid(1.0, 1.0, 1.0));
    // Top face at y = 0; the plane collider ignores the body position.
    let center = Vec3::new(0.0, -THICKNESS / 2.0, 0.0);
    let mut ground_t = LocalTransform::new(center);
    ground_t.scale = Vec3::new(HALF_EXTENT * 2.0, THICKNESS, HALF_EXTENT * 2.0);
    let ground = world.spawn((
        ground_t,
        GlobalTransform(Mat4::IDENTITY),
        ground_handle,
        Color(Vec3::new(0.3, 0.6, 0.2)),
        Checkerboard(Vec3::new(0.22, 0.48, 0.15)),
        RigidBody::new(center),
        Collider::Plane { normal: Vec3::Y, offset: 0.0 },
        SurfaceMaterial { friction: 0.4, restitution: 0.2 },
        Static,
    ));
    add_child(world, root, ground);
    ground
}

/// The ball. Spawned asleep at its start position; launch wakes it.
pub fn spawn_projectile(
    world: &mut World,
    meshes: &mut MeshStore,
    root: Entity,
    config: &ProjectileConfig,
) -> Entity {
    let start = vec3(config.start);
    let handle = meshes.add(sphere(config.radius, 16, 32));
    let projectile = world.spawn((
        LocalTransform::new(start),
        GlobalTransform(Mat4::IDENTITY),
        handle,
        Color(vec3(config.color)),
        RigidBody::new(start),
        Velocity(Vec3::ZERO),
        AngularVelocity(Vec3::ZERO),
        Mass(config.mass),
        GravityAffected,
        Damping {
            linear: config.linear_damping,
            angular: config.angular_damping,
        },
        Collider::Sphere {
            radius: config.radius,
        },
        SurfaceMaterial {
            friction: config.friction,
            restitution: config.restitution,
        },
    ));
    let _ = world.insert(
        projectile,
        (
            StartTransform::at(start),
            KinematicSample::new(Vec3::ZERO),
            Projectile,
            Sleeping,
        ),
    );
    add_child(world, root, projectile);
    projectile
}

/// Collider and mesh for a ramp built from `shape`.
pub fn ramp_parts(shape: &RampShape, depth: f32) -> (Collider, MeshData) {
    let outline = shape.outline();
    debug_assert!(outline.is_closed());
    let polygon = outline.polygon();
    let mesh = extrude(&polygon, depth);
    let collider = Collider::Profile {
        outline: polygon,
        depth,
    };
    (collider, mesh)
}

pub fn spawn_ramp(
    world: &mut World,
    meshes: &mut MeshStore,
    root: Entity,
    config: &RampConfig,
    shape: &RampShape,
) -> Entity {
    let position = vec3(config.position);
    let (collider, mesh) = ramp_parts(shape, config.depth);
    let handle = meshes.add(mesh);
    let ramp = world.spawn((
        LocalTransform::new(position),
        GlobalTransform(Mat4::IDENTITY),
        handle,
        Color(vec3(config.color)),
        RigidBody::new(position),
        collider,
        SurfaceMaterial {
            friction: config.friction,
            restitution: config.restitution,
        },
        Static,
        Ramp,
    ));
    add_child(world, root, ramp);
    ramp
}

/// The cup. `mesh` is whatever the asset loader produced; the collider is
/// always the configured profile.
pub fn spawn_target(
    world: &mut World,
    meshes: &mut MeshStore,
    root: Entity,
    config: &TargetConfig,
    mesh: MeshData,
) -> Entity {
    let position = vec3(config.position);
    let handle = meshes.add(mesh);
    let outline: Vec<Vec2> = config.profile_points();
    let target = world.spawn((
        LocalTransform::new(position),
        GlobalTransform(Mat4::IDENTITY),
        handle,
        Color(vec3(config.color)),
        RigidBody::new(position),
        Collider::Profile {
            outline,
            depth: config.depth,
        },
        SurfaceMaterial {
            friction: 0.6,
            restitution: 0.1,
        },
        Static,
        Target,
    ));
    add_child(world, root, target);
    target
}
