use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{KinematicSample, Velocity};

/// Minimum accumulated frame time between two acceleration estimates.
pub const ACCELERATION_INTERVAL_MS: f32 = 50.0;

/// Accumulates frame time and reports when the acceleration estimate is due.
///
/// Frame intervals are variable and often far below a millisecond, so
/// differentiating velocity every frame is mostly noise.
#[derive(Debug, Default)]
pub struct AccelerationClock {
    accumulated_ms: f32,
}

impl AccelerationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta_ms`. Returns the accumulated window (and restarts it) once
    /// it has reached [`ACCELERATION_INTERVAL_MS`].
    pub fn advance(&mut self, delta_ms: f32) -> Option<f32> {
        self.accumulated_ms += delta_ms;
        if self.accumulated_ms >= ACCELERATION_INTERVAL_MS {
            let window = self.accumulated_ms;
            self.accumulated_ms = 0.0;
            Some(window)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }
}

/// Re-estimate acceleration as `(v_now - v_prev) / window` for every sampled body.
pub fn kinematics_system(world: &mut World, window_ms: f32) {
    let seconds = window_ms / 1000.0;
    if seconds <= 0.0 {
        return;
    }
    for (_entity, (vel, sample)) in world.query_mut::<(&Velocity, &mut KinematicSample)>() {
        sample.acceleration = (vel.0 - sample.previous_velocity) / seconds;
        sample.previous_velocity = vel.0;
    }
}

/// Last acceleration estimate of `entity`, or zero if it is not sampled.
pub fn acceleration(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<&KinematicSample>(entity)
        .map(|s| s.acceleration)
        .unwrap_or(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clock_fires_at_threshold_and_restarts() {
        let mut clock = AccelerationClock::new();
        assert_eq!(clock.advance(20.0), None);
        assert_eq!(clock.advance(20.0), None);
        assert_eq!(clock.advance(10.0), Some(50.0));
        assert_eq!(clock.advance(49.0), None);
    }

    #[test]
    fn recompute_count_is_bounded_by_elapsed_time() {
        // Irregular frame intervals, including sub-millisecond ones and stalls.
        let pattern = [0.3_f32, 16.7, 0.05, 33.0, 7.1, 120.0, 0.9, 49.99, 50.0, 2.0];
        let mut clock = AccelerationClock::new();
        let mut elapsed = 0.0_f32;
        let mut recomputes = 0u32;
        for i in 0..10_000 {
            let dt = pattern[i % pattern.len()];
            elapsed += dt;
            if clock.advance(dt).is_some() {
                recomputes += 1;
            }
            assert!(recomputes as f32 <= elapsed / ACCELERATION_INTERVAL_MS + 1.0);
        }
        assert!(recomputes > 0);
    }

    #[test]
    fn acceleration_is_velocity_delta_over_window() {
        let mut world = World::new();
        let e = world.spawn((Velocity(Vec3::ZERO), KinematicSample::new(Vec3::ZERO)));

        world.get::<&mut Velocity>(e).unwrap().0 = Vec3::new(0.0, -0.491, 0.0);
        kinematics_system(&mut world, 50.0);
        let a = acceleration(&world, e);
        assert_relative_eq!(a.y, -9.82, epsilon = 1e-4);
        assert_eq!(a.x, 0.0);

        // No velocity change since the last window: zero acceleration.
        kinematics_system(&mut world, 60.0);
        assert_eq!(acceleration(&world, e), Vec3::ZERO);
    }

    #[test]
    fn empty_window_leaves_estimate_untouched() {
        let mut world = World::new();
        let e = world.spawn((Velocity(Vec3::X), KinematicSample::new(Vec3::ZERO)));
        kinematics_system(&mut world, 0.0);
        assert_eq!(world.get::<&KinematicSample>(e).unwrap().previous_velocity, Vec3::ZERO);
    }
}
