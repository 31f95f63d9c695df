use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use crate::components::{
    AngularVelocity, Collider, CollisionEvent, Mass, RigidBody, Sleeping, Static,
    SurfaceMaterial, Velocity,
};

const REST_VELOCITY_THRESHOLD: f32 = 0.5;

struct ColliderEntry<'a> {
    entity: Entity,
    position: Vec3,
    collider: &'a Collider,
    movable: bool,
}

fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Even-odd point-in-polygon test for a closed ring.
pub(crate) fn point_in_polygon(p: Vec2, ring: &[Vec2]) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Nearest point on the ring's boundary and its distance from `p`.
fn closest_on_ring(p: Vec2, ring: &[Vec2]) -> (Vec2, f32) {
    let mut best = (ring[0], f32::MAX);
    for i in 0..ring.len() {
        let q = closest_point_on_segment(ring[i], ring[(i + 1) % ring.len()], p);
        let d = q.distance(p);
        if d < best.1 {
            best = (q, d);
        }
    }
    best
}

/// Sphere against an outline extruded from z = 0 to z = `depth` at `origin`.
/// Returns the outward surface normal (profile toward sphere) and penetration.
pub(crate) fn sphere_profile_contact(
    center: Vec3,
    radius: f32,
    origin: Vec3,
    ring: &[Vec2],
    depth: f32,
) -> Option<(Vec3, f32)> {
    if ring.len() < 3 {
        return None;
    }
    let local = center - origin;
    let p = local.truncate();
    let inside = point_in_polygon(p, ring);
    let (edge_point, edge_dist) = closest_on_ring(p, ring);

    if (0.0..=depth).contains(&local.z) {
        if inside {
            // Centre is inside the solid: leave through the nearest wall or cap.
            let to_back = local.z;
            let to_front = depth - local.z;
            let to_cap = to_back.min(to_front);
            if to_cap < edge_dist {
                let outward = if to_back < to_front { Vec3::NEG_Z } else { Vec3::Z };
                return Some((outward, radius + to_cap));
            }
            let dir = edge_point - p;
            let outward = if dir.length_squared() > 1e-12 {
                dir.normalize().extend(0.0)
            } else {
                Vec3::Y
            };
            Some((outward, radius + edge_dist))
        } else if edge_dist < radius {
            let outward = if edge_dist > 1e-6 {
                ((p - edge_point) / edge_dist).extend(0.0)
            } else {
                Vec3::Y
            };
            Some((outward, radius - edge_dist))
        } else {
            None
        }
    } else {
        let z = local.z.clamp(0.0, depth);
        let closest = if inside { p.extend(z) } else { edge_point.extend(z) };
        let diff = local - closest;
        let dist = diff.length();
        if dist < radius && dist > 1e-6 {
            Some((diff / dist, radius - dist))
        } else {
            None
        }
    }
}

/// Contact between two colliders. Returned normals point from entity_a toward entity_b.
fn test_pair(a: &ColliderEntry, b: &ColliderEntry) -> Option<CollisionEvent> {
    let event = |entity_a, entity_b, contact_normal, penetration_depth| {
        Some(CollisionEvent {
            entity_a,
            entity_b,
            contact_normal,
            penetration_depth,
        })
    };

    match (a.collider, b.collider) {
        // Sphere(A) vs Plane(B): normal points from sphere toward plane = -plane_normal
        (Collider::Sphere { radius }, Collider::Plane { normal, offset }) => {
            let penetration = radius - (a.position.dot(*normal) - offset);
            if penetration <= 0.0 {
                return None;
            }
            event(a.entity, b.entity, -*normal, penetration)
        }
        (Collider::Plane { normal, offset }, Collider::Sphere { radius }) => {
            let penetration = radius - (b.position.dot(*normal) - offset);
            if penetration <= 0.0 {
                return None;
            }
            event(b.entity, a.entity, -*normal, penetration)
        }

        // Sphere(A) vs Sphere(B): normal = (B - A).normalize()
        (Collider::Sphere { radius: r1 }, Collider::Sphere { radius: r2 }) => {
            let diff = b.position - a.position;
            let dist = diff.length();
            let penetration = (r1 + r2) - dist;
            if penetration <= 0.0 {
                return None;
            }
            let normal = if dist > 1e-6 { diff / dist } else { Vec3::Y };
            event(a.entity, b.entity, normal, penetration)
        }

        // Sphere vs Profile: canonicalize so the sphere is entity_a
        (Collider::Sphere { radius }, Collider::Profile { outline, depth }) => {
            let (outward, penetration) =
                sphere_profile_contact(a.position, *radius, b.position, outline, *depth)?;
            event(a.entity, b.entity, -outward, penetration)
        }
        (Collider::Profile { outline, depth }, Collider::Sphere { radius }) => {
            let (outward, penetration) =
                sphere_profile_contact(b.position, *radius, a.position, outline, *depth)?;
            event(b.entity, a.entity, -outward, penetration)
        }

        // Static geometry against static geometry never moves.
        _ => None,
    }
}

/// Apply Coulomb friction: reduce tangential velocity proportional to normal impulse.
/// Clamps so friction never reverses the sliding direction.
fn apply_friction(vel: &mut Vec3, normal: Vec3, mu: f32, normal_impulse: f32, dt: f32) {
    let tangent_vel = *vel - vel.dot(normal) * normal;
    let tangent_speed = tangent_vel.length();
    if tangent_speed < 1e-6 {
        return;
    }
    let tangent_dir = tangent_vel / tangent_speed;
    let friction_impulse = (mu * normal_impulse * dt).min(tangent_speed);
    *vel -= tangent_dir * friction_impulse;
}

/// Set a resting sphere spinning as if it rolled without slipping.
/// `up` points from the surface toward the sphere centre.
fn apply_rolling(world: &World, entity: Entity, up: Vec3) {
    let radius = match world.get::<&Collider>(entity).as_deref() {
        Ok(Collider::Sphere { radius }) => *radius,
        _ => return,
    };
    let Ok(vel) = world.get::<&Velocity>(entity).map(|v| v.0) else {
        return;
    };
    if let Ok(mut ang) = world.get::<&mut AngularVelocity>(entity) {
        ang.0 = up.cross(vel) / radius;
    }
}

fn material(world: &World, entity: Entity) -> SurfaceMaterial {
    world
        .get::<&SurfaceMaterial>(entity)
        .map(|m| *m)
        .unwrap_or_default()
}

fn velocity(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<&Velocity>(entity)
        .map(|v| v.0)
        .unwrap_or(Vec3::ZERO)
}

/// Bodies without a [`Mass`] count as 1 kg.
fn inverse_mass(world: &World, entity: Entity) -> f32 {
    match world.get::<&Mass>(entity) {
        Ok(mass) if mass.0 > 0.0 => 1.0 / mass.0,
        Ok(_) => 0.0,
        Err(_) => 1.0,
    }
}

/// Push a movable body out along `push` and remove its velocity into the surface.
fn resolve_against_fixed(
    world: &mut World,
    entity: Entity,
    push: Vec3,
    depth: f32,
    e: f32,
    mu: f32,
    dt: f32,
) {
    if let Ok(mut body) = world.get::<&mut RigidBody>(entity) {
        body.position += push * depth;
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        let into_surface = -vel.0.dot(push);
        if into_surface > 0.0 {
            let normal_impulse = if into_surface < REST_VELOCITY_THRESHOLD {
                vel.0 += into_surface * push;
                into_surface
            } else {
                vel.0 += (1.0 + e) * into_surface * push;
                (1.0 + e) * into_surface
            };
            apply_friction(&mut vel.0, push, mu, normal_impulse, dt);
        }
    }
    apply_rolling(world, entity, push);
}

/// Detect collisions and apply impulse-based response.
/// contact_normal convention: always points from entity_a toward entity_b.
/// - To push A out of B: move A along -normal
/// - To push B out of A: move B along +normal
pub fn collision_system(world: &mut World, dt: f32) -> Vec<CollisionEvent> {
    let events: Vec<CollisionEvent> = {
        let mut query =
            world.query::<(&RigidBody, &Collider, Option<&Static>, Option<&Sleeping>)>();
        let entries: Vec<ColliderEntry> = query
            .iter()
            .map(|(entity, (body, collider, fixed, sleeping))| ColliderEntry {
                entity,
                position: body.position,
                collider,
                movable: fixed.is_none() && sleeping.is_none(),
            })
            .collect();

        // Broadphase: brute force O(n²)
        let mut events = Vec::new();
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                if !entries[i].movable && !entries[j].movable {
                    continue;
                }
                if let Some(event) = test_pair(&entries[i], &entries[j]) {
                    events.push(event);
                }
            }
        }
        events
    };

    for event in &events {
        let movable = |world: &World, e: Entity| {
            world.get::<&Static>(e).is_err() && world.get::<&Sleeping>(e).is_err()
        };
        let a_moves = movable(world, event.entity_a);
        let b_moves = movable(world, event.entity_b);

        let mat_a = material(world, event.entity_a);
        let mat_b = material(world, event.entity_b);
        let e = (mat_a.restitution + mat_b.restitution) * 0.5;
        let mu = (mat_a.friction + mat_b.friction) * 0.5;

        let n = event.contact_normal;
        let depth = event.penetration_depth;

        match (a_moves, b_moves) {
            (false, false) => {}
            (false, true) => resolve_against_fixed(world, event.entity_b, n, depth, e, mu, dt),
            (true, false) => resolve_against_fixed(world, event.entity_a, -n, depth, e, mu, dt),
            (true, true) => {
                // Both dynamic: the lighter body takes more of the push
                let inv_a = inverse_mass(world, event.entity_a);
                let inv_b = inverse_mass(world, event.entity_b);
                let inv_total = inv_a + inv_b;
                if inv_total <= 0.0 {
                    continue;
                }
                if let Ok(mut body) = world.get::<&mut RigidBody>(event.entity_a) {
                    body.position -= n * (depth * inv_a / inv_total);
                }
                if let Ok(mut body) = world.get::<&mut RigidBody>(event.entity_b) {
                    body.position += n * (depth * inv_b / inv_total);
                }

                let vel_a = velocity(world, event.entity_a);
                let vel_b = velocity(world, event.entity_b);
                let vel_along_n = (vel_a - vel_b).dot(n);

                // Positive = A approaching B
                if vel_along_n > 0.0 {
                    let bounce = if vel_along_n < REST_VELOCITY_THRESHOLD { 1.0 } else { 1.0 + e };
                    let impulse = bounce * vel_along_n / inv_total;
                    if let Ok(mut vel) = world.get::<&mut Velocity>(event.entity_a) {
                        vel.0 -= impulse * inv_a * n;
                        apply_friction(&mut vel.0, n, mu, impulse * inv_a, dt);
                    }
                    if let Ok(mut vel) = world.get::<&mut Velocity>(event.entity_b) {
                        vel.0 += impulse * inv_b * n;
                        apply_friction(&mut vel.0, n, mu, impulse * inv_b, dt);
                    }
                }
            }
        }
    }

    events
}
