// Wordlink – a word-chain graph puzzle
// Copyright (C) 2026  Wordlink authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

// Number of samples in the coarse scan for the curve/circle crossing
const CLIP_SCAN_STEPS: u32 = 30;
// Bisection refinements after the scan has bracketed the crossing
const CLIP_BISECT_STEPS: u32 = 28;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;

    Point {
        x: u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
        y: u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
    }
}

/// Derivative of the quadratic at `t`, used to orient arrowheads.
pub fn quad_tangent(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;

    Point {
        x: 2.0 * u * (p1.x - p0.x) + 2.0 * t * (p2.x - p1.x),
        y: 2.0 * u * (p1.y - p0.y) + 2.0 * t * (p2.y - p1.y),
    }
}

/// Finds the largest parameter at which the curve is still on or
/// outside the circle around `center`, searching backward from t = 1.
/// The arrow tip drawn there lands exactly on the circle edge. Returns
/// `None` when the whole sampled curve lies inside the circle, which
/// happens for degenerate, too-short edges; such edges aren't drawn.
pub fn clip_to_circle(
    p0: Point,
    p1: Point,
    p2: Point,
    center: Point,
    radius: f64,
) -> Option<f64> {
    let mut t_hi = 1.0;
    let mut t_lo = None;

    for i in 1..=CLIP_SCAN_STEPS {
        let t = 1.0 - f64::from(i) / f64::from(CLIP_SCAN_STEPS);

        if quad_point(p0, p1, p2, t).distance(center) >= radius {
            t_lo = Some(t);
            break;
        }
    }

    let mut t_lo = t_lo?;

    for _ in 0..CLIP_BISECT_STEPS {
        let t_mid = (t_lo + t_hi) / 2.0;

        if quad_point(p0, p1, p2, t_mid).distance(center) >= radius {
            t_lo = t_mid;
        } else {
            t_hi = t_mid;
        }
    }

    Some(t_lo)
}

/// Pulls both endpoints of a segment in by `radius` so a straight
/// arrow runs between node boundaries rather than node centers.
/// `None` for segments too short to have a direction.
pub fn trim_segment(
    pa: Point,
    pb: Point,
    radius: f64,
) -> Option<(Point, Point)> {
    let dist = pa.distance(pb);

    if dist < 1e-3 {
        return None;
    }

    let ux = (pb.x - pa.x) / dist;
    let uy = (pb.y - pa.y) / dist;

    Some((
        Point::new(pa.x + ux * radius, pa.y + uy * radius),
        Point::new(pb.x - ux * radius, pb.y - uy * radius),
    ))
}

/// The three corners of an arrowhead whose tip sits at `tip` pointing
/// along `angle` radians.
pub fn arrowhead(
    tip: Point,
    angle: f64,
    head_len: f64,
    head_w: f64,
) -> [Point; 3] {
    let (sin, cos) = angle.sin_cos();

    [
        tip,
        Point::new(
            tip.x - head_len * cos + head_w * sin,
            tip.y - head_len * sin - head_w * cos,
        ),
        Point::new(
            tip.x - head_len * cos - head_w * sin,
            tip.y - head_len * sin + head_w * cos,
        ),
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn quad_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(50.0, 80.0);
        let p2 = Point::new(100.0, 0.0);

        assert_eq!(quad_point(p0, p1, p2, 0.0), p0);
        assert_eq!(quad_point(p0, p1, p2, 1.0), p2);

        let mid = quad_point(p0, p1, p2, 0.5);
        assert_close(mid.x, 50.0);
        assert_close(mid.y, 40.0);
    }

    #[test]
    fn tangent_at_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(50.0, 80.0);
        let p2 = Point::new(100.0, 0.0);

        let start = quad_tangent(p0, p1, p2, 0.0);
        assert_close(start.x, 100.0);
        assert_close(start.y, 160.0);

        let end = quad_tangent(p0, p1, p2, 1.0);
        assert_close(end.x, 100.0);
        assert_close(end.y, -160.0);
    }

    #[test]
    fn clip_straightish_curve() {
        // Control point on the chord makes the parameterisation linear
        // in x, so the crossing is at x = 100 - 22, t = 0.78
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(50.0, 0.0);
        let p2 = Point::new(100.0, 0.0);

        let t = clip_to_circle(p0, p1, p2, p2, 22.0).unwrap();
        assert!((t - 0.78).abs() < 1e-4, "t = {}", t);

        let tip = quad_point(p0, p1, p2, t);
        assert!((tip.distance(p2) - 22.0).abs() < 1e-3);
    }

    #[test]
    fn clip_curved_edge_lands_on_circle() {
        let p0 = Point::new(10.0, 200.0);
        let p1 = Point::new(150.0, 80.0);
        let p2 = Point::new(300.0, 200.0);

        let t = clip_to_circle(p0, p1, p2, p2, 22.0).unwrap();
        let tip = quad_point(p0, p1, p2, t);

        assert!((tip.distance(p2) - 22.0).abs() < 1e-3);
        assert!(t < 1.0 && t > 0.5);
    }

    #[test]
    fn clip_degenerate_curve() {
        // Curve entirely inside the node circle
        let p0 = Point::new(100.0, 100.0);
        let p1 = Point::new(105.0, 100.0);
        let p2 = Point::new(110.0, 100.0);
        let center = Point::new(105.0, 100.0);

        assert_eq!(clip_to_circle(p0, p1, p2, center, 22.0), None);
    }

    #[test]
    fn trim() {
        let (start, tip) = trim_segment(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            22.0,
        ).unwrap();

        assert_close(start.x, 22.0);
        assert_close(start.y, 0.0);
        assert_close(tip.x, 78.0);
        assert_close(tip.y, 0.0);

        assert_eq!(
            trim_segment(
                Point::new(5.0, 5.0),
                Point::new(5.0, 5.0),
                22.0,
            ),
            None,
        );
    }

    #[test]
    fn arrowhead_points_backward() {
        let [tip, left, right] =
            arrowhead(Point::new(100.0, 50.0), 0.0, 18.0, 10.0);

        assert_eq!(tip, Point::new(100.0, 50.0));
        assert_close(left.x, 82.0);
        assert_close(left.y, 40.0);
        assert_close(right.x, 82.0);
        assert_close(right.y, 60.0);
    }
}
