//! Path geometry: Catmull-Rom splines expressed as cubic Bézier segments.

use std::fmt::Write;

use crate::render::primitives::{PathCurve, trim_float};

const EPSILON: f64 = 1e-12;

/// One cubic Bézier segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: (f64, f64),
    pub control1: (f64, f64),
    pub control2: (f64, f64),
    pub end: (f64, f64),
}

impl CubicSegment {
    /// Point on the segment at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        (
            a * self.start.0 + b * self.control1.0 + c * self.control2.0 + d * self.end.0,
            a * self.start.1 + b * self.control1.1 + c * self.control2.1 + d * self.end.1,
        )
    }
}

fn distance_pow(a: (f64, f64), b: (f64, f64), alpha: f64) -> (f64, f64) {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    let two_alpha = (dx * dx + dy * dy).powf(alpha);
    (two_alpha.sqrt(), two_alpha)
}

/// Converts a Catmull-Rom spline through `points` into Bézier segments.
///
/// Uses the centripetal-family parameterization with the given `alpha`; the
/// first and last segments use their own endpoint as the missing neighbor,
/// so the curve passes through every vertex. Fewer than three points yield
/// straight segments.
#[must_use]
pub fn catmull_rom_segments(points: &[(f64, f64)], alpha: f64) -> Vec<CubicSegment> {
    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
    for (index, pair) in points.windows(2).enumerate() {
        let (p1, p2) = (pair[0], pair[1]);
        if points.len() < 3 {
            segments.push(CubicSegment {
                start: p1,
                control1: p1,
                control2: p2,
                end: p2,
            });
            continue;
        }

        let (l12_a, l12_2a) = distance_pow(p1, p2, alpha);
        let mut control1 = p1;
        if let Some(&p0) = index.checked_sub(1).and_then(|prev| points.get(prev)) {
            let (l01_a, l01_2a) = distance_pow(p0, p1, alpha);
            if l01_a > EPSILON {
                let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
                let n = 3.0 * l01_a * (l01_a + l12_a);
                control1 = (
                    (p1.0 * a - p0.0 * l12_2a + p2.0 * l01_2a) / n,
                    (p1.1 * a - p0.1 * l12_2a + p2.1 * l01_2a) / n,
                );
            }
        }

        let mut control2 = p2;
        if let Some(&p3) = points.get(index + 2) {
            let (l23_a, l23_2a) = distance_pow(p2, p3, alpha);
            if l23_a > EPSILON {
                let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
                let m = 3.0 * l23_a * (l23_a + l12_a);
                control2 = (
                    (p2.0 * b + p1.0 * l23_2a - p3.0 * l12_2a) / m,
                    (p2.1 * b + p1.1 * l23_2a - p3.1 * l12_2a) / m,
                );
            }
        }

        segments.push(CubicSegment {
            start: p1,
            control1,
            control2,
            end: p2,
        });
    }
    segments
}

fn push_point(out: &mut String, command: char, point: (f64, f64)) {
    let _ = write!(out, "{command}{},{}", trim_float(point.0), trim_float(point.1));
}

/// SVG path data for `points` drawn with `curve`. Empty input yields "".
#[must_use]
pub fn path_data(points: &[(f64, f64)], curve: PathCurve, closed: bool) -> String {
    let mut out = String::new();
    let Some(&first) = points.first() else {
        return out;
    };
    push_point(&mut out, 'M', first);

    match curve {
        PathCurve::CatmullRom { alpha } if points.len() > 2 && !closed => {
            for segment in catmull_rom_segments(points, alpha) {
                push_point(&mut out, 'C', segment.control1);
                let _ = write!(
                    out,
                    " {},{} {},{}",
                    trim_float(segment.control2.0),
                    trim_float(segment.control2.1),
                    trim_float(segment.end.0),
                    trim_float(segment.end.1)
                );
            }
        }
        _ => {
            for &point in &points[1..] {
                push_point(&mut out, 'L', point);
            }
        }
    }

    if closed {
        out.push('Z');
    }
    out
}
