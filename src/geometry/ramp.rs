use glam::Vec2;

use super::bezier::CubicBezier;

/// Curve samples taken between the first and last corner (51 points).
pub const CURVE_DIVISIONS: usize = 50;

/// Corner points and Bezier controls describing a ramp profile.
///
/// `corners[0]` is where the curve starts (top of the drop), `corners[3]`
/// where it ends (the launch lip). `corners[2]` and `corners[1]` close the
/// profile back to the start with straight edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampShape {
    pub corners: [Vec2; 4],
    pub controls: [Vec2; 2],
}

impl RampShape {
    pub fn new(corners: [Vec2; 4], controls: [Vec2; 2]) -> Self {
        Self { corners, controls }
    }

    /// The stock ramp: a 6 m drop curving into a 1.5 m lip.
    pub fn demo() -> Self {
        Self::new(
            [
                Vec2::new(-3.0, 6.0),
                Vec2::new(-3.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 1.5),
            ],
            [Vec2::new(-1.0, 0.0), Vec2::new(2.0, 0.0)],
        )
    }

    pub fn curve(&self) -> CubicBezier {
        let [v1, _, _, v4] = self.corners;
        CubicBezier::new(v1, self.controls[0], self.controls[1], v4)
    }

    /// Closed outline: curve samples v1..v4, then v4, v3, v2, v1.
    pub fn outline(&self) -> RampOutline {
        let [v1, v2, v3, v4] = self.corners;
        let mut points = self.curve().points(CURVE_DIVISIONS);
        points.extend_from_slice(&[v4, v3, v2, v1]);
        RampOutline { points }
    }

    /// Launch angle in degrees at the lip (see [`launch_angle`]).
    pub fn launch_angle(&self) -> f32 {
        let curve = self.curve().points(CURVE_DIVISIONS);
        let before_end = curve[curve.len() - 2];
        launch_angle(before_end, self.corners[3], self.corners[2])
    }
}

/// Signed bearing difference between the edge arriving at `lip` from
/// `curve_end` and the edge leaving `lip` toward `next_corner`, in degrees.
pub fn launch_angle(curve_end: Vec2, lip: Vec2, next_corner: Vec2) -> f32 {
    let incoming = lip - curve_end;
    let outgoing = next_corner - lip;
    (incoming.y.atan2(incoming.x) - outgoing.y.atan2(outgoing.x)).to_degrees()
}

/// Point sequence produced by [`RampShape::outline`].
#[derive(Clone, Debug, PartialEq)]
pub struct RampOutline {
    points: Vec<Vec2>,
}

impl RampOutline {
    /// The raw sequence, including the repeated lip and the closing point.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Polygon ring without consecutive duplicates or the closing repeat.
    pub fn polygon(&self) -> Vec<Vec2> {
        let mut ring: Vec<Vec2> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if ring.last().map_or(true, |last| last.distance_squared(p) > 1e-12) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring[0].distance_squared(ring[ring.len() - 1]) <= 1e-12 {
            ring.pop();
        }
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn outline_is_curve_then_corners() {
        let outline = RampShape::demo().outline();
        let points = outline.points();
        assert_eq!(points.len(), CURVE_DIVISIONS + 1 + 4);
        assert_eq!(points[CURVE_DIVISIONS], Vec2::new(3.0, 1.5));
        assert_eq!(
            &points[CURVE_DIVISIONS + 1..],
            &[
                Vec2::new(3.0, 1.5),
                Vec2::new(3.0, 0.0),
                Vec2::new(-3.0, 0.0),
                Vec2::new(-3.0, 6.0),
            ]
        );
    }

    #[test]
    fn outline_is_closed_for_arbitrary_inputs() {
        let shapes = [
            RampShape::demo(),
            RampShape::new(
                [
                    Vec2::new(0.0, 0.0),
                    Vec2::new(10.0, -4.0),
                    Vec2::new(-2.5, 7.25),
                    Vec2::new(1e3, 3.0),
                ],
                [Vec2::new(-50.0, 2.0), Vec2::new(0.1, 0.1)],
            ),
            RampShape::new([Vec2::ZERO; 4], [Vec2::ZERO; 2]),
        ];
        for shape in shapes {
            assert!(shape.outline().is_closed());
        }
    }

    #[test]
    fn polygon_drops_repeats() {
        let ring = RampShape::demo().outline().polygon();
        // 51 curve samples + v3 + v2; v4 and v1 are already in the curve.
        assert_eq!(ring.len(), CURVE_DIVISIONS + 1 + 2);
        assert_eq!(ring[0], Vec2::new(-3.0, 6.0));
        assert_eq!(ring[ring.len() - 1], Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn straight_ramp_angle_is_angle_between_edges() {
        let v1 = Vec2::new(-3.0, 6.0);
        let v3 = Vec2::new(3.0, 0.0);
        let v4 = Vec2::new(3.0, 1.5);
        let shape = RampShape::new(
            [v1, Vec2::new(-3.0, 0.0), v3, v4],
            [v1.lerp(v4, 1.0 / 3.0), v1.lerp(v4, 2.0 / 3.0)],
        );
        let incoming = v4 - v1;
        let outgoing = v3 - v4;
        let between = (incoming.dot(outgoing) / (incoming.length() * outgoing.length()))
            .acos()
            .to_degrees();
        assert_relative_eq!(shape.launch_angle(), between, epsilon = 1e-2);
        assert_relative_eq!(shape.launch_angle(), 53.130_1, epsilon = 1e-2);
    }

    #[test]
    fn angle_sign_follows_bearing_order() {
        // Arriving heading +X, leaving heading -Y: 0 - (-90) = +90.
        assert_relative_eq!(
            launch_angle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, -1.0)),
            90.0,
            epsilon = 1e-5
        );
        // Leaving heading +Y flips the sign.
        assert_relative_eq!(
            launch_angle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)),
            -90.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn demo_angle_is_reproducible() {
        let first = RampShape::demo().launch_angle();
        let second = RampShape::demo().launch_angle();
        assert_eq!(first.to_bits(), second.to_bits());
        // The lip is approached climbing toward +X+Y and left straight down.
        assert!(first > 90.0 && first < 180.0, "angle was {first}");
    }
}
