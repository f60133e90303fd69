use super::{at_endpoint, clamp_param, direction_angle, Intersection, Intersections};
use crate::segment::Segment;

pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> Intersections {
	let mut out = Intersections::new();
	let (a0, a1) = (a.start(), a.end());
	let (b0, b1) = (b.start(), b.end());
	let d1 = a1 - a0;
	let d2 = b1 - b0;
	let denom = d1.x * d2.y - d1.y * d2.x;
	if denom.abs() < eps {
		// Parallel (or coincident, which the path-level pipeline detects as an overlap run rather
		// than a point intersection).
		return out;
	}
	let delta = b0 - a0;
	let t = (delta.x * d2.y - delta.y * d2.x) / denom;
	let s = (delta.x * d1.y - delta.y * d1.x) / denom;
	let (Some(t), Some(s)) = (clamp_param(t, eps), clamp_param(s, eps)) else {
		return out;
	};
	out.push(Intersection {
		position: a0 + d1 * t,
		t_a: t,
		t_b: s,
		dir_a: direction_angle(d1),
		dir_b: direction_angle(d2),
		tangent: at_endpoint(t, eps) || at_endpoint(s, eps),
	});
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bezier::Bezier;
	use glam::DVec2;

	#[test]
	fn parallel_lines_report_no_intersection() {
		let a = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 0.), DVec2::new(10., 0.)));
		let b = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 1.), DVec2::new(10., 1.)));
		assert!(intersect(&a, &b, 1e-9).is_empty());
	}

	#[test]
	fn endpoint_touch_is_tangent() {
		let a = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 0.), DVec2::new(10., 0.)));
		let b = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(10., 0.), DVec2::new(10., 10.)));
		let hits = intersect(&a, &b, 1e-9);
		assert_eq!(hits.len(), 1);
		assert!(hits[0].tangent);
	}
}
