use glam::Vec3;
use hecs::{Entity, World};
use tracing::info;

use crate::components::{LocalTransform, Velocity};
use crate::events::AngleListeners;
use crate::systems::raycast_sphere;
use crate::ui::{Label, LabelBoard};

/// Speed along Y below which the projectile counts as settled.
pub const SETTLED_VY: f32 = 0.1;

/// Everything a frame tick, an observer or a button press may touch.
pub struct SimContext {
    pub world: World,
    pub labels: LabelBoard,
    pub physics_enabled: bool,
    pub ar_locked: bool,
    pub scene_root: Entity,
    pub projectile: Entity,
    pub ramp: Entity,
    /// Absent until the target's model has loaded.
    pub target: Option<Entity>,
    pub angle_listeners: AngleListeners,
    pub target_watch: TargetWatch,
}

impl SimContext {
    pub fn new(world: World, scene_root: Entity, projectile: Entity, ramp: Entity) -> Self {
        Self {
            world,
            labels: LabelBoard::new(),
            physics_enabled: false,
            ar_locked: false,
            scene_root,
            projectile,
            ramp,
            target: None,
            angle_listeners: AngleListeners::default(),
            target_watch: TargetWatch::new(Vec3::new(0.0, 1.5, 0.5)),
        }
    }
}

/// One-shot "projectile came to rest in the target" detector.
///
/// A ray is cast straight down from `rim_offset` above the target origin;
/// it must hit the projectile's mesh while the projectile's vertical speed
/// is below [`SETTLED_VY`]. Fires once, then stays quiet until re-armed.
#[derive(Debug, Clone)]
pub struct TargetWatch {
    armed: bool,
    /// Ray origin relative to the target origin, in scene space.
    pub rim_offset: Vec3,
}

impl TargetWatch {
    pub fn new(rim_offset: Vec3) -> Self {
        Self {
            armed: true,
            rim_offset,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` on the frame the condition first holds.
    pub fn check(&mut self, world: &World, projectile: Entity, target: Option<Entity>) -> bool {
        if !self.armed {
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        let Ok(target_pos) = world.get::<&LocalTransform>(target).map(|t| t.position) else {
            return false;
        };
        let vy = world
            .get::<&Velocity>(projectile)
            .map(|v| v.0.y)
            .unwrap_or(0.0);
        if vy.abs() >= SETTLED_VY {
            return false;
        }

        let origin = target_pos + self.rim_offset;
        let reach = self.rim_offset.y;
        if raycast_sphere(world, projectile, origin, Vec3::NEG_Y, reach).is_none() {
            return false;
        }
        self.armed = false;
        true
    }
}

/// Raise the target-reached notification on the label board and in the log.
pub fn announce_target_reached(ctx: &mut SimContext) {
    info!("target reached");
    ctx.labels.set(Label::Status, "TARGET REACHED!");
}
