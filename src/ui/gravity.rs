use glam::Vec3;
use tracing::info;

use crate::context::SimContext;
use crate::ui::Label;

/// Each gravity component stays within ±this many m/s².
pub const GRAVITY_LIMIT: f32 = 10.0;
/// One key press moves a component by this much.
pub const GRAVITY_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Move one component of `gravity` by `steps` increments, snapped to the
/// step grid and clamped to [`GRAVITY_LIMIT`].
pub fn nudge(gravity: Vec3, axis: Axis, steps: i32) -> Vec3 {
    let mut g = gravity;
    let component = match axis {
        Axis::X => &mut g.x,
        Axis::Y => &mut g.y,
        Axis::Z => &mut g.z,
    };
    let raw = *component + steps as f32 * GRAVITY_STEP;
    let snapped = (raw / GRAVITY_STEP).round() * GRAVITY_STEP;
    *component = snapped.clamp(-GRAVITY_LIMIT, GRAVITY_LIMIT);
    g
}

pub fn gravity_text(gravity: Vec3) -> String {
    format!("{:.1} {:.1} {:.1}", gravity.x, gravity.y, gravity.z)
}

/// Apply a nudge to the live gravity vector and show the result.
pub fn change_gravity(ctx: &mut SimContext, gravity: &mut Vec3, axis: Axis, steps: i32) {
    *gravity = nudge(*gravity, axis, steps);
    ctx.labels.set(Label::Gravity, gravity_text(*gravity));
    info!(x = gravity.x, y = gravity.y, z = gravity.z, "gravity changed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Damping, GravityAffected, RigidBody, Velocity};
    use crate::driver::FrameDriver;
    use crate::systems::SimplePhysics;
    use approx::assert_relative_eq;
    use hecs::World;

    #[test]
    fn nudge_snaps_to_tenths() {
        let g = nudge(Vec3::new(0.0, -9.82, 0.0), Axis::Y, 1);
        assert_relative_eq!(g.y, -9.7, epsilon = 1e-5);
        assert_eq!(g.x, 0.0);

        let g = nudge(g, Axis::X, -3);
        assert_relative_eq!(g.x, -0.3, epsilon = 1e-5);
    }

    #[test]
    fn nudge_clamps_at_limit() {
        let g = nudge(Vec3::new(0.0, -9.95, 0.0), Axis::Y, -2);
        assert_eq!(g.y, -GRAVITY_LIMIT);
        let g = nudge(Vec3::new(0.0, 0.0, 9.9), Axis::Z, 5);
        assert_eq!(g.z, GRAVITY_LIMIT);
    }

    #[test]
    fn text_has_one_decimal_per_axis() {
        assert_eq!(gravity_text(Vec3::new(0.0, -9.82, 1.26)), "0.0 -9.8 1.3");
    }

    #[test]
    fn change_gravity_reaches_the_running_backend() {
        let mut world = World::new();
        let root = world.spawn(());
        let ball = world.spawn((
            RigidBody::new(Vec3::ZERO),
            Velocity(Vec3::ZERO),
            GravityAffected,
            Damping { linear: 0.0, angular: 0.0 },
        ));
        let ramp = world.spawn(());
        let mut ctx = SimContext::new(world, root, ball, ramp);
        ctx.physics_enabled = true;
        let mut driver = FrameDriver::new(SimplePhysics::new(Vec3::new(0.0, -9.82, 0.0)), 0.1);

        change_gravity(&mut ctx, &mut driver.physics_mut().gravity, Axis::X, 20);
        assert_eq!(ctx.labels.get(Label::Gravity), "2.0 -9.8 0.0");

        driver.tick(&mut ctx, 0.1, 0.1);
        let vel = ctx.world.get::<&Velocity>(ball).unwrap().0;
        assert_relative_eq!(vel.x, 0.2, epsilon = 1e-5);
        assert_relative_eq!(vel.y, -0.982, epsilon = 1e-5);
    }
}
