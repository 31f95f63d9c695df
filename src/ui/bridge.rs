use sdl2::keyboard::Scancode;
use tracing::{debug, info};

use crate::context::SimContext;
use crate::fsm::StateMachine;
use crate::systems::{reset_position, sleep, update_mesh_from_body, wake};
use crate::ui::{Axis, Label};

pub const LAUNCH: &str = "LAUNCH";
pub const RESET: &str = "RESET";
pub const PAUSE: &str = "PAUSE";
pub const RESUME: &str = "RESUME";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchState {
    /// Projectile asleep at its start position.
    Ready,
    Launched,
    Paused,
}

/// Something the user asked for, from a click or a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    LaunchOrReset,
    PauseOrResume,
    /// Rebuild the ramp from the preset at this index.
    Preset(usize),
    /// Move one gravity component by this many steps.
    Gravity(Axis, i32),
}

/// Keyboard shortcuts for the on-screen buttons, the ramp presets and gravity.
///
/// Gravity: Q/A raise/lower X, W/S raise/lower Y, E/D raise/lower Z.
pub fn action_for_key(key: Scancode) -> Option<UiAction> {
    match key {
        Scancode::Space => Some(UiAction::LaunchOrReset),
        Scancode::P => Some(UiAction::PauseOrResume),
        Scancode::Num1 => Some(UiAction::Preset(0)),
        Scancode::Num2 => Some(UiAction::Preset(1)),
        Scancode::Num3 => Some(UiAction::Preset(2)),
        Scancode::Q => Some(UiAction::Gravity(Axis::X, 1)),
        Scancode::A => Some(UiAction::Gravity(Axis::X, -1)),
        Scancode::W => Some(UiAction::Gravity(Axis::Y, 1)),
        Scancode::S => Some(UiAction::Gravity(Axis::Y, -1)),
        Scancode::E => Some(UiAction::Gravity(Axis::Z, 1)),
        Scancode::D => Some(UiAction::Gravity(Axis::Z, -1)),
        _ => None,
    }
}

/// Turns button presses into flag changes and resets on the context.
pub struct UiBridge {
    fsm: StateMachine<LaunchState>,
    launch_label: &'static str,
    pause_label: &'static str,
}

impl UiBridge {
    pub fn new() -> Self {
        Self {
            fsm: StateMachine::new(LaunchState::Ready),
            launch_label: LAUNCH,
            pause_label: PAUSE,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.fsm.state
    }

    pub fn launch_label(&self) -> &'static str {
        self.launch_label
    }

    pub fn pause_label(&self) -> &'static str {
        self.pause_label
    }

    pub fn tick(&mut self, dt: f32) {
        self.fsm.tick(dt);
    }

    /// Launch from `Ready`, otherwise reset. Returns the state afterwards.
    pub fn press_launch(&mut self, ctx: &mut SimContext) -> LaunchState {
        match self.fsm.state {
            LaunchState::Ready => {
                wake(&mut ctx.world, ctx.projectile);
                ctx.physics_enabled = true;
                self.launch_label = RESET;
                ctx.labels.set(Label::Status, "launched");
                info!("projectile launched");
                self.fsm.go(LaunchState::Launched);
            }
            LaunchState::Launched | LaunchState::Paused => {
                ctx.physics_enabled = false;
                reset_position(&mut ctx.world, ctx.projectile);
                update_mesh_from_body(&mut ctx.world, ctx.projectile);
                sleep(&mut ctx.world, ctx.projectile);
                if !ctx.target_watch.is_armed() {
                    debug!("target watch re-armed");
                }
                ctx.target_watch.arm();
                self.launch_label = LAUNCH;
                self.pause_label = PAUSE;
                ctx.labels.set(Label::Status, "ready");
                info!(secs_in_state = self.fsm.elapsed, "projectile reset");
                self.fsm.go(LaunchState::Ready);
            }
        }
        self.fsm.state
    }

    pub fn press_pause(&mut self, ctx: &mut SimContext) {
        match self.fsm.state {
            LaunchState::Ready => debug!("pause ignored before launch"),
            LaunchState::Launched => {
                ctx.physics_enabled = false;
                self.pause_label = RESUME;
                ctx.labels.set(Label::Status, "paused");
                self.fsm.go(LaunchState::Paused);
            }
            LaunchState::Paused => {
                ctx.physics_enabled = true;
                self.pause_label = PAUSE;
                ctx.labels.set(Label::Status, "launched");
                self.fsm.go(LaunchState::Launched);
            }
        }
    }
}

impl Default for UiBridge {
    fn default() -> Self {
        Self::new()
    }
}
