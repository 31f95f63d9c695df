use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{Collider, LocalTransform};

/// Cast a ray against the visual sphere of `entity`, in the space its
/// `LocalTransform` lives in. Returns the distance to the nearest hit within
/// `max_distance`.
///
/// Entities without a sphere collider are never hit.
pub fn raycast_sphere(
    world: &World,
    entity: Entity,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<f32> {
    let dir = direction.try_normalize()?;
    let mut query = world
        .query_one::<(&LocalTransform, &Collider)>(entity)
        .ok()?;
    let (local, collider) = query.get()?;
    let Collider::Sphere { radius } = collider else {
        return None;
    };

    let radius = radius * local.scale.max_element();
    let t = ray_sphere_intersection(origin, dir, local.position, radius)?;
    (t <= max_distance).then_some(t)
}

fn ray_sphere_intersection(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = dir.dot(dir);
    let b = 2.0 * oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        // Origin inside the sphere
        Some(t2)
    } else {
        None
    }
}
