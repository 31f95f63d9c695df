use crate::components::Velocity;
use crate::context::SimContext;
use crate::systems::{acceleration, velocity_module};

/// Read-only text slots shown on the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    VelocityX,
    VelocityY,
    VelocityZ,
    AccelerationX,
    AccelerationY,
    AccelerationZ,
    Speed,
    Angle,
    Gravity,
    Status,
}

impl Label {
    pub const ALL: [Label; 10] = [
        Label::VelocityX,
        Label::VelocityY,
        Label::VelocityZ,
        Label::AccelerationX,
        Label::AccelerationY,
        Label::AccelerationZ,
        Label::Speed,
        Label::Angle,
        Label::Gravity,
        Label::Status,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            Label::VelocityX => "vx",
            Label::VelocityY => "vy",
            Label::VelocityZ => "vz",
            Label::AccelerationX => "ax",
            Label::AccelerationY => "ay",
            Label::AccelerationZ => "az",
            Label::Speed => "speed",
            Label::Angle => "angle",
            Label::Gravity => "gravity",
            Label::Status => "status",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Text sinks the simulation writes into and the HUD reads from.
#[derive(Debug, Clone)]
pub struct LabelBoard {
    values: [String; 10],
}

impl LabelBoard {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
        }
    }

    pub fn set(&mut self, label: Label, text: impl Into<String>) {
        self.values[label.index()] = text.into();
    }

    pub fn get(&self, label: Label) -> &str {
        &self.values[label.index()]
    }

    /// `(caption, value)` pairs in display order.
    pub fn lines(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Label::ALL.iter().map(|&l| (l.caption(), self.get(l)))
    }
}

impl Default for LabelBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame observer: copy the projectile's velocity, acceleration and speed
/// into the label board.
pub fn update_kinematic_labels(ctx: &mut SimContext, _delta: f32, _absolute: f32) {
    let velocity = ctx
        .world
        .get::<&Velocity>(ctx.projectile)
        .map(|v| v.0)
        .unwrap_or_default();
    let accel = acceleration(&ctx.world, ctx.projectile);
    let speed = velocity_module(&ctx.world, ctx.projectile);

    let board = &mut ctx.labels;
    board.set(Label::VelocityX, format!("{:.2}", velocity.x));
    board.set(Label::VelocityY, format!("{:.2}", velocity.y));
    board.set(Label::VelocityZ, format!("{:.2}", velocity.z));
    board.set(Label::AccelerationX, format!("{:.2}", accel.x));
    board.set(Label::AccelerationY, format!("{:.2}", accel.y));
    board.set(Label::AccelerationZ, format!("{:.2}", accel.z));
    board.set(Label::Speed, format!("{speed:.2}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hecs::World;

    #[test]
    fn board_starts_empty_and_keeps_order() {
        let mut board = LabelBoard::new();
        assert!(board.lines().all(|(_, v)| v.is_empty()));
        board.set(Label::Angle, "144.7");
        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[7], ("angle", "144.7"));
        assert_eq!(lines[8].0, "gravity");
        assert_eq!(lines[9].0, "status");
    }

    #[test]
    fn kinematic_labels_follow_projectile() {
        let mut world = World::new();
        let root = world.spawn(());
        let ball = world.spawn((Velocity(Vec3::new(3.0, -4.0, 0.0)),));
        let ramp = world.spawn(());
        let mut ctx = SimContext::new(world, root, ball, ramp);

        update_kinematic_labels(&mut ctx, 0.016, 1.0);
        assert_eq!(ctx.labels.get(Label::VelocityX), "3.00");
        assert_eq!(ctx.labels.get(Label::VelocityY), "-4.00");
        assert_eq!(ctx.labels.get(Label::Speed), "5.00");
        assert_eq!(ctx.labels.get(Label::AccelerationY), "0.00");
    }
}
