use super::{line_vs_curve, Intersections};
use crate::segment::Segment;

/// `a` is the line, `b` the quadratic Bézier; see `line_vs_curve`.
pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> Intersections {
	let Segment::Bezier(curve) = b else { unreachable!("dispatch guarantees b is a Bezier") };
	line_vs_curve(a, curve, eps)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bezier::Bezier;
	use glam::DVec2;

	#[test]
	fn line_crosses_quadratic_arch() {
		let line = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(-10., 0.), DVec2::new(10., 0.)));
		let quad = Segment::Bezier(Bezier::from_quadratic_dvec2(DVec2::new(-5., -5.), DVec2::new(0., 5.), DVec2::new(5., -5.)));
		let hits = intersect(&line, &quad, 1e-9);
		assert_eq!(hits.len(), 2);
	}
}
