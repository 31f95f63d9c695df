use tracing::trace;

use crate::context::{announce_target_reached, SimContext};
use crate::systems::{body_to_mesh_system, kinematics_system, AccelerationClock, PhysicsBackend};

/// Called once per tick, after the physics step and mesh sync.
pub trait FrameObserver {
    /// `delta` is this tick's simulated step, `absolute` the wall-clock
    /// seconds since the loop started.
    fn on_frame(&mut self, ctx: &mut SimContext, delta: f32, absolute: f32);
}

impl<F> FrameObserver for F
where
    F: FnMut(&mut SimContext, f32, f32),
{
    fn on_frame(&mut self, ctx: &mut SimContext, delta: f32, absolute: f32) {
        self(ctx, delta, absolute)
    }
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub dt: f32,
    pub stepped: bool,
    pub acceleration_updated: bool,
    pub target_reached: bool,
}

/// Per-frame sequencing of physics, mesh sync, acceleration sampling and observers.
/// Rendering is left to the caller.
pub struct FrameDriver<P: PhysicsBackend> {
    physics: P,
    max_step: f32,
    clock: AccelerationClock,
    observers: Vec<Box<dyn FrameObserver>>,
}

impl<P: PhysicsBackend> FrameDriver<P> {
    pub fn new(physics: P, max_step: f32) -> Self {
        Self {
            physics,
            max_step,
            clock: AccelerationClock::new(),
            observers: Vec::new(),
        }
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Drop any partially accumulated acceleration window.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Observers run in the order they were added.
    pub fn add_observer(&mut self, observer: impl FrameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn tick(&mut self, ctx: &mut SimContext, real_dt: f32, absolute: f32) -> FrameReport {
        let dt = real_dt.clamp(0.0, self.max_step);

        let stepped = ctx.physics_enabled;
        if stepped {
            self.physics.step(&mut ctx.world, dt);
        }

        body_to_mesh_system(&mut ctx.world);

        let acceleration_updated = match self.clock.advance(dt * 1000.0) {
            Some(window_ms) => {
                kinematics_system(&mut ctx.world, window_ms);
                true
            }
            None => false,
        };

        let target_reached = ctx
            .target_watch
            .check(&ctx.world, ctx.projectile, ctx.target);
        if target_reached {
            announce_target_reached(ctx);
        }

        for observer in self.observers.iter_mut() {
            observer.on_frame(ctx, dt, absolute);
        }

        trace!(dt, stepped, acceleration_updated, "frame");
        FrameReport {
            dt,
            stepped,
            acceleration_updated,
            target_reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Collider, KinematicSample, LocalTransform, RigidBody, Velocity};
    use crate::systems::acceleration;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use hecs::World;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every step size and moves bodies along their velocity.
    #[derive(Default)]
    struct RecordingPhysics {
        steps: Vec<f32>,
    }

    impl PhysicsBackend for RecordingPhysics {
        fn step(&mut self, world: &mut World, dt: f32) {
            self.steps.push(dt);
            for (_e, (body, vel)) in world.query_mut::<(&mut RigidBody, &mut Velocity)>() {
                vel.0.y -= 10.0 * dt;
                body.position += vel.0 * dt;
            }
        }
    }

    fn context() -> SimContext {
        let mut world = World::new();
        let root = world.spawn(());
        let ball = world.spawn((
            RigidBody::new(Vec3::new(0.0, 8.0, 0.0)),
            LocalTransform::new(Vec3::new(0.0, 8.0, 0.0)),
            Velocity(Vec3::ZERO),
            KinematicSample::new(Vec3::ZERO),
            Collider::Sphere { radius: 0.5 },
        ));
        let ramp = world.spawn(());
        SimContext::new(world, root, ball, ramp)
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut ctx = context();
        ctx.physics_enabled = true;
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);

        let report = driver.tick(&mut ctx, 5.0, 5.0);
        assert_eq!(report.dt, 0.1);
        driver.tick(&mut ctx, 0.016, 5.016);
        assert_eq!(driver.physics.steps, vec![0.1, 0.016]);
    }

    #[test]
    fn disabled_physics_is_not_stepped() {
        let mut ctx = context();
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);
        let report = driver.tick(&mut ctx, 0.016, 0.016);
        assert!(!report.stepped);
        assert!(driver.physics.steps.is_empty());
    }

    #[test]
    fn mesh_is_synced_after_step() {
        let mut ctx = context();
        ctx.physics_enabled = true;
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);
        driver.tick(&mut ctx, 0.1, 0.1);

        let body = ctx.world.get::<&RigidBody>(ctx.projectile).unwrap().position;
        let mesh = ctx.world.get::<&LocalTransform>(ctx.projectile).unwrap().position;
        assert_eq!(body, mesh);
        assert!(mesh.y < 8.0);
    }

    #[test]
    fn observers_run_in_registration_order() {
        let mut ctx = context();
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["labels", "ar", "recorder"] {
            let log = Rc::clone(&log);
            driver.add_observer(move |_: &mut SimContext, delta: f32, absolute: f32| {
                log.borrow_mut().push((name, delta, absolute));
            });
        }

        driver.tick(&mut ctx, 0.02, 1.5);
        assert_eq!(
            *log.borrow(),
            vec![("labels", 0.02, 1.5), ("ar", 0.02, 1.5), ("recorder", 0.02, 1.5)]
        );
    }

    #[test]
    fn acceleration_updates_every_fifty_ms() {
        let mut ctx = context();
        ctx.physics_enabled = true;
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);

        assert!(!driver.tick(&mut ctx, 0.03, 0.03).acceleration_updated);
        assert!(driver.tick(&mut ctx, 0.03, 0.06).acceleration_updated);
        assert_relative_eq!(acceleration(&ctx.world, ctx.projectile).y, -10.0, epsilon = 1e-3);
        assert!(!driver.tick(&mut ctx, 0.01, 0.07).acceleration_updated);
    }

    #[test]
    fn reset_clock_starts_a_fresh_window() {
        let mut ctx = context();
        ctx.physics_enabled = true;
        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);

        assert!(!driver.tick(&mut ctx, 0.03, 0.03).acceleration_updated);
        driver.reset_clock();
        assert!(!driver.tick(&mut ctx, 0.03, 0.06).acceleration_updated);
        assert!(driver.tick(&mut ctx, 0.03, 0.09).acceleration_updated);
    }

    #[test]
    fn target_reached_fires_once_until_rearmed() {
        let mut ctx = context();
        let cup = ctx
            .world
            .spawn((LocalTransform::new(Vec3::new(0.0, 0.0, -0.5)),));
        ctx.target = Some(cup);
        crate::systems::set_position(&mut ctx.world, ctx.projectile, Vec3::new(0.0, 0.65, 0.0));

        let mut driver = FrameDriver::new(RecordingPhysics::default(), 0.1);
        assert!(driver.tick(&mut ctx, 0.016, 0.016).target_reached);
        assert_eq!(ctx.labels.get(crate::ui::Label::Status), "TARGET REACHED!");
        assert!(!driver.tick(&mut ctx, 0.016, 0.032).target_reached);

        ctx.target_watch.arm();
        assert!(driver.tick(&mut ctx, 0.016, 0.048).target_reached);
    }
}
