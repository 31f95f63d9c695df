use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 60.0;

/// Orbits a focus point. Drag rotates, the wheel zooms.
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    /// Degrees around +Y, measured from +Z.
    pub yaw: f32,
    /// Degrees above the horizon.
    pub pitch: f32,
    pub sensitivity: f32,
    pub zoom_step: f32,
    pub fov: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            target: Vec3::new(0.0, 2.5, 0.0),
            distance: 16.0,
            yaw: 0.0,
            pitch: 15.0,
            sensitivity: 0.3,
            zoom_step: 1.0,
            fov: 45.0,
        }
    }

    pub fn orbit(&mut self, mouse_dx: f32, mouse_dy: f32) {
        self.yaw -= mouse_dx * self.sensitivity;
        self.pitch += mouse_dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-10.0, 89.0);
    }

    /// Positive `scroll` moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * self.zoom_step).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn position(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let offset = Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, 0.1, 200.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn level_camera_sits_on_positive_z() {
        let mut cam = Camera::new();
        cam.pitch = 0.0;
        let pos = cam.position();
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(pos.z, cam.distance, epsilon = 1e-5);
        assert_relative_eq!(pos.y, cam.target.y, epsilon = 1e-5);
    }

    #[test]
    fn zoom_and_pitch_are_clamped() {
        let mut cam = Camera::new();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
        cam.orbit(0.0, 10_000.0);
        assert_eq!(cam.pitch, 89.0);
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut cam = Camera::new();
        cam.orbit(120.0, -20.0);
        assert_relative_eq!(cam.position().distance(cam.target), cam.distance, epsilon = 1e-4);
    }
}
