use glam::{Mat4, Vec3};

use crate::ui::text::{TextRenderer, CELL_HEIGHT};
use crate::ui::{Label, LabelBoard};

const HUD_SCALE: f32 = 2.0;
const HUD_MARGIN: f32 = 8.0;
const LINE_HEIGHT: f32 = CELL_HEIGHT * HUD_SCALE + 4.0;
const HUD_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);
const STATUS_COLOR: Vec3 = Vec3::new(0.4, 1.0, 0.5);

const FPS_SAMPLES: usize = 60;

/// Label board readout at the top-left, plus an optional FPS line (F3).
pub struct Hud {
    show_fps: bool,
    fps_ring: [f32; FPS_SAMPLES],
    fps_index: usize,
    fps_count: usize,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            show_fps: false,
            fps_ring: [0.0; FPS_SAMPLES],
            fps_index: 0,
            fps_count: 0,
        }
    }

    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
    }

    /// Push a frame delta into the rolling FPS buffer.
    pub fn update(&mut self, dt: f32) {
        self.fps_ring[self.fps_index] = dt;
        self.fps_index = (self.fps_index + 1) % FPS_SAMPLES;
        if self.fps_count < FPS_SAMPLES {
            self.fps_count += 1;
        }
    }

    pub fn fps(&self) -> f32 {
        let sum: f32 = self.fps_ring[..self.fps_count].iter().sum();
        if sum <= 0.0 {
            0.0
        } else {
            self.fps_count as f32 / sum
        }
    }

    pub fn lines(&self, labels: &LabelBoard) -> Vec<String> {
        let mut lines: Vec<String> = labels
            .lines()
            .filter(|(caption, _)| *caption != Label::Status.caption())
            .map(|(caption, value)| format!("{caption}: {value}"))
            .collect();
        if self.show_fps {
            lines.push(format!("fps: {:.0}", self.fps()));
        }
        lines
    }

    /// Caller must set up the orthographic projection and blend state.
    pub fn draw(&self, text: &mut TextRenderer, labels: &LabelBoard, projection: &Mat4) {
        let x = HUD_MARGIN;
        let mut y = HUD_MARGIN;
        for line in self.lines(labels) {
            text.draw_text(&line, x, y, HUD_SCALE, HUD_COLOR, projection);
            y += LINE_HEIGHT;
        }

        let status = labels.get(Label::Status);
        if !status.is_empty() {
            text.draw_text(status, x, y + LINE_HEIGHT, HUD_SCALE * 1.5, STATUS_COLOR, projection);
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_skip_status_and_add_fps_when_enabled() {
        let mut board = LabelBoard::new();
        board.set(Label::Speed, "5.00");
        board.set(Label::Gravity, "0.0 -9.8 0.0");
        board.set(Label::Status, "launched");

        let mut hud = Hud::new();
        let lines = hud.lines(&board);
        assert_eq!(lines.len(), 9);
        assert!(lines.contains(&"speed: 5.00".to_string()));
        assert!(lines.contains(&"gravity: 0.0 -9.8 0.0".to_string()));

        hud.toggle_fps();
        for _ in 0..10 {
            hud.update(0.02);
        }
        let lines = hud.lines(&board);
        assert_eq!(lines.last().map(String::as_str), Some("fps: 50"));
    }

    #[test]
    fn fps_is_zero_before_any_frame() {
        assert_eq!(Hud::new().fps(), 0.0);
    }
}
