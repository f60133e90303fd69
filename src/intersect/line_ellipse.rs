//! Line-ellipse (and line-circle) intersection.
//!
//! The line is moved into the ellipse's canonical frame (translate by `-center`, rotate by
//! `-phi`), where the arc is simply `rx*cos(theta), ry*sin(theta)`. Substituting the line equation
//! `Cx + Dy = E` into that parametrization collapses to `A*cos(theta) + B*sin(theta) = E`, solved
//! in closed form as `R*cos(theta - delta) = E`. Equal-radius circles fall out of the same solve
//! (no separate distance-from-center formulation is needed: dividing by `rx`/`ry` doesn't lose
//! precision when they're equal).

use super::{at_endpoint, clamp_param, direction_angle, Intersection, Intersections};
use crate::arc::rotate;
use crate::segment::Segment;
use glam::DVec2;

pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> Intersections {
	let Segment::Arc(arc) = b else { unreachable!("dispatch guarantees b is an Arc") };
	let mut out = Intersections::new();

	let to_local = |p: DVec2| rotate(p - arc.center, -arc.phi);
	let p0 = to_local(a.start());
	let p1 = to_local(a.end());
	let dir = p1 - p0;

	// Line through p0, p1 in the canonical frame: C*x + D*y = E.
	let c = dir.y;
	let d = -dir.x;
	let e = c * p0.x + d * p0.y;

	// Substitute x = rx*cos(theta), y = ry*sin(theta): (C*rx)*cos(theta) + (D*ry)*sin(theta) = E.
	let coeff_cos = c * arc.rx;
	let coeff_sin = d * arc.ry;
	let r = coeff_cos.hypot(coeff_sin);
	if r < eps {
		// The line's direction, transported into the ellipse frame, degenerates (zero-length line).
		return out;
	}
	let cos_ratio = (e / r).clamp(-1., 1.);
	if (e / r).abs() > 1. + eps {
		return out;
	}
	let delta = coeff_sin.atan2(coeff_cos);
	let offset = cos_ratio.acos();

	for theta in [delta + offset, delta - offset] {
		let Some(t_b) = arc.t_for_theta(theta) else { continue };
		let local = DVec2::new(arc.rx * theta.cos(), arc.ry * theta.sin());
		let position = arc.center + rotate(local, arc.phi);
		let dir_len_sq = dir.length_squared();
		if dir_len_sq < eps * eps {
			continue;
		}
		let t_a = (position - a.start()).dot(a.end() - a.start()) / (a.end() - a.start()).length_squared();
		let Some(t_a) = clamp_param(t_a, eps) else { continue };

		// Skip a duplicate when the two closed-form roots coincide (tangent line).
		if out.iter().any(|hit: &Intersection| hit.position.distance(position) < eps) {
			continue;
		}

		let dir_b = arc.derivative(t_b);
		out.push(Intersection {
			position,
			t_a,
			t_b,
			dir_a: direction_angle(dir),
			dir_b: direction_angle(dir_b),
			tangent: at_endpoint(t_a, eps) || at_endpoint(t_b, eps) || (offset.abs() < eps),
		});
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::arc::EllipticalArc;
	use crate::bezier::Bezier;

	fn unit_circle() -> EllipticalArc {
		EllipticalArc {
			center: DVec2::ZERO,
			rx: 5.,
			ry: 5.,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::TAU,
		}
	}

	#[test]
	fn diameter_line_crosses_circle_twice() {
		let line = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(-10., 0.), DVec2::new(10., 0.)));
		let circle = Segment::Arc(unit_circle());
		let hits = intersect(&line, &circle, 1e-9);
		assert_eq!(hits.len(), 2);
		for hit in &hits {
			assert!((hit.position.length() - 5.).abs() < 1e-6);
		}
	}

	#[test]
	fn tangent_line_touches_once() {
		let line = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(-10., 5.), DVec2::new(10., 5.)));
		let circle = Segment::Arc(unit_circle());
		let hits = intersect(&line, &circle, 1e-6);
		assert_eq!(hits.len(), 1);
		assert!(hits[0].tangent);
	}

	#[test]
	fn missing_line_reports_nothing() {
		let line = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(-10., 50.), DVec2::new(10., 50.)));
		let circle = Segment::Arc(unit_circle());
		assert!(intersect(&line, &circle, 1e-9).is_empty());
	}
}
