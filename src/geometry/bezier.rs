use glam::Vec2;

/// Planar cubic Bezier curve from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub start: Vec2,
    pub control_start: Vec2,
    pub control_end: Vec2,
    pub end: Vec2,
}

impl CubicBezier {
    pub fn new(start: Vec2, control_start: Vec2, control_end: Vec2, end: Vec2) -> Self {
        Self {
            start,
            control_start,
            control_end,
            end,
        }
    }

    /// Point at parameter `t` in `[0, 1]`, evaluated term by term in Bernstein form.
    pub fn point_at(&self, t: f32) -> Vec2 {
        Vec2::new(
            bernstein(t, self.start.x, self.control_start.x, self.control_end.x, self.end.x),
            bernstein(t, self.start.y, self.control_start.y, self.control_end.y, self.end.y),
        )
    }

    /// `divisions + 1` points at evenly spaced parameters, both endpoints included.
    pub fn points(&self, divisions: usize) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}

fn bernstein(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let k = 1.0 - t;
    k * k * k * p0 + 3.0 * k * k * t * p1 + 3.0 * k * t * t * p2 + t * t * t * p3
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_curve() -> CubicBezier {
        CubicBezier::new(
            Vec2::new(-3.0, 6.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 1.5),
        )
    }

    #[test]
    fn endpoints_are_exact() {
        let curve = demo_curve();
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
    }

    #[test]
    fn points_includes_both_ends() {
        let points = demo_curve().points(50);
        assert_eq!(points.len(), 51);
        assert_eq!(points[0], Vec2::new(-3.0, 6.0));
        assert_eq!(points[50], Vec2::new(3.0, 1.5));
    }

    #[test]
    fn midpoint_matches_closed_form() {
        // B(0.5) = (p0 + 3p1 + 3p2 + p3) / 8
        let mid = demo_curve().point_at(0.5);
        assert_relative_eq!(mid.x, (-3.0 - 3.0 + 6.0 + 3.0) / 8.0, epsilon = 1e-6);
        assert_relative_eq!(mid.y, (6.0 + 0.0 + 0.0 + 1.5) / 8.0, epsilon = 1e-6);
    }

    #[test]
    fn collinear_controls_stay_on_the_chord() {
        let a = Vec2::new(-3.0, 6.0);
        let b = Vec2::new(3.0, 1.5);
        let curve = CubicBezier::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b);
        let dir = (b - a).normalize();
        for p in curve.points(20) {
            let offset = p - a;
            assert_relative_eq!(offset.perp_dot(dir), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_divisions_still_samples_endpoints() {
        let points = demo_curve().points(0);
        assert_eq!(points.len(), 2);
    }
}
