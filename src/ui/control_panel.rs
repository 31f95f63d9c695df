use glam::{Mat4, Vec3};

use crate::ui::text::{measure_text, TextRenderer, CELL_HEIGHT};
use crate::ui::{UiAction, UiBridge};

const BUTTON_W: f32 = 140.0;
const BUTTON_H: f32 = 40.0;
const BUTTON_GAP: f32 = 12.0;
const MARGIN: f32 = 16.0;
const LABEL_SCALE: f32 = 2.0;

const BUTTON_FILL: [f32; 4] = [0.1, 0.1, 0.12, 0.75];
const LAUNCH_TEXT: Vec3 = Vec3::new(1.0, 0.9, 0.2);
const PAUSE_TEXT: Vec3 = Vec3::new(0.85, 0.85, 0.85);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ButtonRect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// The two on-screen buttons, anchored to the bottom-right corner.
pub struct ControlPanel {
    launch: ButtonRect,
    pause: ButtonRect,
}

impl ControlPanel {
    pub fn new(width: f32, height: f32) -> Self {
        let mut panel = Self {
            launch: ButtonRect { x: 0.0, y: 0.0, w: BUTTON_W, h: BUTTON_H },
            pause: ButtonRect { x: 0.0, y: 0.0, w: BUTTON_W, h: BUTTON_H },
        };
        panel.layout(width, height);
        panel
    }

    /// Recompute button positions for a window of this size.
    pub fn layout(&mut self, width: f32, height: f32) {
        let y = height - MARGIN - BUTTON_H;
        self.pause.x = width - MARGIN - BUTTON_W;
        self.pause.y = y;
        self.launch.x = self.pause.x - BUTTON_GAP - BUTTON_W;
        self.launch.y = y;
    }

    /// Which button, if any, a click at window coordinates `(x, y)` pressed.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<UiAction> {
        if self.launch.contains(x, y) {
            Some(UiAction::LaunchOrReset)
        } else if self.pause.contains(x, y) {
            Some(UiAction::PauseOrResume)
        } else {
            None
        }
    }

    pub fn draw(&self, text: &mut TextRenderer, bridge: &UiBridge, projection: &Mat4) {
        draw_button(text, self.launch, bridge.launch_label(), LAUNCH_TEXT, projection);
        draw_button(text, self.pause, bridge.pause_label(), PAUSE_TEXT, projection);
    }
}

fn draw_button(
    text: &mut TextRenderer,
    rect: ButtonRect,
    label: &str,
    color: Vec3,
    projection: &Mat4,
) {
    text.draw_rect(rect.x, rect.y, rect.w, rect.h, BUTTON_FILL, projection);
    let label_w = measure_text(label, LABEL_SCALE);
    let label_x = rect.x + (rect.w - label_w) / 2.0;
    let label_y = rect.y + (rect.h - CELL_HEIGHT * LABEL_SCALE) / 2.0;
    text.draw_text(label, label_x, label_y, LABEL_SCALE, color, projection);
}
