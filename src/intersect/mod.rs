//! Segment-pair intersection kernels.
//!
//! Each kernel takes two segments in the same coordinate frame and returns every intersection
//! between them, under the uniform `Intersection` contract: a position, a local parameter on each
//! curve, a tangent direction on each curve, and a flag for touches that don't cross. Dispatch is
//! by segment kind, promoted to free functions since both operands vary independently in kind.

mod ellipse_ellipse;
mod line_cubic;
mod line_ellipse;
mod line_line;
mod line_quad;

use crate::consts::DEFAULT_EPSILON;
use crate::segment::Segment;
use glam::DVec2;
use smallvec::SmallVec;

/// A single intersection between two segments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
	pub position: DVec2,
	pub t_a: f64,
	pub t_b: f64,
	pub dir_a: f64,
	pub dir_b: f64,
	/// The curves touch without crossing, either because they're tangent there or because an
	/// endpoint of one lands on the other.
	pub tangent: bool,
}

/// Small inline capacity: almost every segment pair intersects 0-2 times: the exceptions are
/// tangencies and overlapping coincident curves, handled by the caller (`PathIntersection`
/// pipeline), not by widening this buffer.
pub type Intersections = SmallVec<[Intersection; 4]>;

fn direction_angle(d: DVec2) -> f64 {
	crate::point::normalize_angle(d.y.atan2(d.x))
}

/// Dispatch to the appropriate kernel for an arbitrary pair of segments. Quad-quad, cube-cube, and
/// any pairing with two elliptical arcs are not implemented directly: the path-level pipeline
/// flattens one operand before calling down to this dispatch in those cases.
pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> crate::error::PathResult<Intersections> {
	use crate::segment::SegmentKind::*;
	match (a.kind(), b.kind()) {
		(Line, Line) => Ok(line_line::intersect(a, b, eps)),
		(Line, Quadratic) => Ok(line_quad::intersect(a, b, eps)),
		(Quadratic, Line) => Ok(swap(line_quad::intersect(b, a, eps))),
		(Line, Cubic) => Ok(line_cubic::intersect(a, b, eps)),
		(Cubic, Line) => Ok(swap(line_cubic::intersect(b, a, eps))),
		(Line, Arc) => Ok(line_ellipse::intersect(a, b, eps)),
		(Arc, Line) => Ok(swap(line_ellipse::intersect(b, a, eps))),
		(Arc, Arc) => Ok(ellipse_ellipse::intersect(a, b, eps)),
		(ka, kb) => Err(crate::error::PathError::Unsupported(format!("{ka:?}/{kb:?} segment-pair intersection"))),
	}
}

fn swap(intersections: Intersections) -> Intersections {
	intersections
		.into_iter()
		.map(|i| Intersection {
			t_a: i.t_b,
			t_b: i.t_a,
			dir_a: i.dir_b,
			dir_b: i.dir_a,
			..i
		})
		.collect()
}

/// Whether `t` is within `eps` of an endpoint (`0` or `1`).
pub(crate) fn at_endpoint(t: f64, eps: f64) -> bool {
	t.abs() < eps || (t - 1.).abs() < eps
}

pub(crate) fn clamp_param(t: f64, eps: f64) -> Option<f64> {
	if t < -eps || t > 1. + eps {
		None
	} else {
		Some(t.clamp(0., 1.))
	}
}

#[allow(dead_code)]
pub(crate) const PARAM_EPS: f64 = DEFAULT_EPSILON;

/// Shared by `line_quad` and `line_cubic`: solves line/curve intersection by rotating the curve
/// onto the line's frame and root-finding the resulting polynomial in `y`, then recovers the
/// line-side parameter and both tangent directions under this module's `Intersection` contract.
pub(crate) fn line_vs_curve(line: &Segment, curve: &crate::bezier::Bezier, eps: f64) -> Intersections {
	let line_bezier = crate::bezier::Bezier::from_linear_dvec2(line.start(), line.end());
	let dir_line = line.end() - line.start();
	let line_len_sq = dir_line.length_squared();
	if line_len_sq < eps * eps {
		return Intersections::new();
	}

	curve
		.intersections(&line_bezier, None)
		.into_iter()
		.filter_map(|t_curve| {
			let position = curve.evaluate(t_curve);
			let t_line = (position - line.start()).dot(dir_line) / line_len_sq;
			let t_line = clamp_param(t_line, eps)?;
			let curve_dir = curve.tangent(t_curve);
			let (angle_a, angle_b) = (direction_angle(dir_line), direction_angle(curve_dir));
			let runs_parallel = crate::point::aligned(angle_a, angle_b, eps) || crate::point::anti_aligned(angle_a, angle_b, eps);
			Some(Intersection {
				position,
				t_a: t_line,
				t_b: t_curve,
				dir_a: angle_a,
				dir_b: angle_b,
				tangent: at_endpoint(t_line, eps) || at_endpoint(t_curve, eps) || runs_parallel,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bezier::Bezier;

	#[test]
	fn crossing_lines_report_not_tangent() {
		let a = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 0.), DVec2::new(10., 10.)));
		let b = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 10.), DVec2::new(10., 0.)));
		let hits = intersect(&a, &b, 1e-9).unwrap();
		assert_eq!(hits.len(), 1);
		assert!(!hits[0].tangent);
		assert!(hits[0].position.distance(DVec2::new(5., 5.)) < 1e-6);
	}
}
