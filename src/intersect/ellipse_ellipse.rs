//! Ellipse-ellipse intersection, restricted to equal-radius circles (general
//! ellipse-ellipse is out of scope; the path-level pipeline never needs it because curves are
//! flattened before any boolean operation, so this only has to serve arcs that intersect other
//! arcs directly, e.g. two circular strokes).

use super::{at_endpoint, clamp_param, direction_angle, Intersection, Intersections};
use crate::arc::EllipticalArc;
use crate::segment::Segment;
use glam::DVec2;

pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> Intersections {
	let (Segment::Arc(arc_a), Segment::Arc(arc_b)) = (a, b) else {
		unreachable!("dispatch guarantees both operands are Arcs")
	};
	if (arc_a.rx - arc_a.ry).abs() > eps || (arc_b.rx - arc_b.ry).abs() > eps {
		// General (non-circular) ellipse-ellipse intersection is unimplemented; callers reach this
		// path only through curves that have already been flattened to lines.
		return Intersections::new();
	}

	let d = arc_b.center.distance(arc_a.center);
	if d < eps && (arc_a.rx - arc_b.rx).abs() < eps {
		return concentric_overlap(arc_a, arc_b, eps);
	}

	let (r1, r2) = (arc_a.rx, arc_b.rx);
	if d > r1 + r2 + eps || d < (r1 - r2).abs() - eps {
		return Intersections::new();
	}

	let center_dir = (arc_b.center - arc_a.center) / d;
	let a_dist = ((r1 * r1 - r2 * r2 + d * d) / (2. * d)).clamp(-r1, r1);
	let h_sq = (r1 * r1 - a_dist * a_dist).max(0.);
	let h = h_sq.sqrt();
	let midpoint = arc_a.center + center_dir * a_dist;
	let perp = DVec2::new(-center_dir.y, center_dir.x);

	let candidates: &[DVec2] = if h < eps { &[midpoint] } else { &[midpoint + perp * h, midpoint - perp * h] };

	let mut out = Intersections::new();
	for &position in candidates {
		let Some(t_a) = angle_param(arc_a, position) else { continue };
		let Some(t_b) = angle_param(arc_b, position) else { continue };
		let (Some(t_a), Some(t_b)) = (clamp_param(t_a, eps), clamp_param(t_b, eps)) else { continue };
		let dir_a = arc_a.derivative(t_a);
		let dir_b = arc_b.derivative(t_b);
		out.push(Intersection {
			position,
			t_a,
			t_b,
			dir_a: direction_angle(dir_a),
			dir_b: direction_angle(dir_b),
			tangent: at_endpoint(t_a, eps) || at_endpoint(t_b, eps) || h < eps,
		});
	}
	out
}

/// `t` on `arc` for a point known to lie on its circle, or `None` if the point's angle falls
/// outside the arc's span.
fn angle_param(arc: &EllipticalArc, point: DVec2) -> Option<f64> {
	let local = point - arc.center;
	let theta = local.y.atan2(local.x) - arc.phi;
	arc.t_for_theta(theta)
}

/// Two arcs of the same circle: the boundary of their angular overlap, if any, is reported as 0,
/// 1, or 2 aligned tangent intersections (the arcs run parallel between them, which the
/// path-intersection pipeline's overlap-run detection takes over from here).
fn concentric_overlap(arc_a: &EllipticalArc, arc_b: &EllipticalArc, eps: f64) -> Intersections {
	let mut out = Intersections::new();
	let endpoints = [(arc_a, 0.), (arc_a, 1.), (arc_b, 0.), (arc_b, 1.)];
	for &(owner, t) in &endpoints {
		let other = if std::ptr::eq(owner, arc_a) { arc_b } else { arc_a };
		let position = owner.position(t);
		let Some(t_other) = angle_param(other, position) else { continue };
		if out.iter().any(|hit: &Intersection| hit.position.distance(position) < eps) {
			continue;
		}
		let (t_a, t_b) = if std::ptr::eq(owner, arc_a) { (t, t_other) } else { (t_other, t) };
		let dir_a = arc_a.derivative(t_a);
		let dir_b = arc_b.derivative(t_b);
		out.push(Intersection {
			position,
			t_a,
			t_b,
			dir_a: direction_angle(dir_a),
			dir_b: direction_angle(dir_b),
			tangent: true,
		});
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn circle(center: DVec2, r: f64) -> EllipticalArc {
		EllipticalArc {
			center,
			rx: r,
			ry: r,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::TAU,
		}
	}

	#[test]
	fn overlapping_circles_intersect_twice() {
		let a = Segment::Arc(circle(DVec2::new(0., 0.), 5.));
		let b = Segment::Arc(circle(DVec2::new(5., 0.), 5.));
		let hits = intersect(&a, &b, 1e-9);
		assert_eq!(hits.len(), 2);
	}

	#[test]
	fn distant_circles_do_not_intersect() {
		let a = Segment::Arc(circle(DVec2::new(0., 0.), 1.));
		let b = Segment::Arc(circle(DVec2::new(100., 0.), 1.));
		assert!(intersect(&a, &b, 1e-9).is_empty());
	}

	#[test]
	fn tangent_circles_touch_once() {
		let a = Segment::Arc(circle(DVec2::new(0., 0.), 5.));
		let b = Segment::Arc(circle(DVec2::new(10., 0.), 5.));
		let hits = intersect(&a, &b, 1e-6);
		assert_eq!(hits.len(), 1);
		assert!(hits[0].tangent);
	}
}
