use std::collections::VecDeque;

use glam::Mat4;
use hecs::{Entity, World};

use crate::components::{Children, GlobalTransform, LocalTransform, Parent};

/// Propagates LocalTransform down the hierarchy via BFS.
/// Roots (entities with LocalTransform but no Parent) compute GlobalTransform
/// from their own LocalTransform. Children inherit parent's GlobalTransform
/// multiplied by their own LocalTransform.
pub fn transform_propagation_system(world: &mut World) {
    let mut queue: VecDeque<(Entity, Mat4)> = VecDeque::new();

    // Phase 1: update roots and seed BFS with their children.
    let roots: Vec<(Entity, Mat4)> = world
        .query::<&LocalTransform>()
        .without::<&Parent>()
        .iter()
        .map(|(entity, local)| (entity, local.matrix()))
        .collect();

    for (entity, global_mat) in &roots {
        if let Ok(mut gt) = world.get::<&mut GlobalTransform>(*entity) {
            gt.0 = *global_mat;
        }
        if let Ok(children) = world.get::<&Children>(*entity) {
            for &child in &children.0 {
                queue.push_back((child, *global_mat));
            }
        }
    }

    // Phase 2: BFS propagation
    while let Some((entity, parent_global)) = queue.pop_front() {
        let child_global = if let Ok(local) = world.get::<&LocalTransform>(entity) {
            parent_global * local.matrix()
        } else {
            parent_global
        };

        if let Ok(mut gt) = world.get::<&mut GlobalTransform>(entity) {
            gt.0 = child_global;
        }

        if let Ok(children) = world.get::<&Children>(entity) {
            for &child in &children.0 {
                queue.push_back((child, child_global));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::add_child;
    use glam::{Quat, Vec3};

    #[test]
    fn child_inherits_root_transform() {
        let mut world = World::new();
        let root = world.spawn((
            LocalTransform {
                position: Vec3::new(0.0, 0.0, -5.0),
                rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                scale: Vec3::ONE,
            },
            GlobalTransform(Mat4::IDENTITY),
        ));
        let child = world.spawn((
            LocalTransform::new(Vec3::new(1.0, 0.0, 0.0)),
            GlobalTransform(Mat4::IDENTITY),
        ));
        add_child(&mut world, root, child);

        transform_propagation_system(&mut world);

        let world_pos = world.get::<&GlobalTransform>(child).unwrap().0.w_axis.truncate();
        assert!((world_pos - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);
    }
}
