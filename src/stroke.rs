//! `Path::stroke` and `Path::offset`.
//!
//! Generalizes the single-curve offset primitives — `Bezier::offset` (already subdivides at
//! scalability boundaries before scaling) and `EllipticalArc`'s radii — from a single curve to a
//! whole path, inserting join geometry between consecutive per-segment offsets and cap geometry
//! at an open subpath's two free ends.

use crate::arc::EllipticalArc;
use crate::bezier::Bezier;
use crate::path::Path;
use crate::point::{normalize_angle, PointExt};
use crate::segment::Segment;
use glam::DVec2;
use std::f64::consts::PI;

/// End-of-subpath cap shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Capper {
	/// Closes with a straight line between the two ribbon ends.
	ButtCap,
	/// Extends both ribbon ends by `halfWidth` along the path's end tangent, then closes.
	SquareCap,
	/// Closes with a half-circle arc of radius `halfWidth`, centered on the subpath's endpoint.
	RoundCap,
}

/// Corner-joining shape between two consecutive offset segments.
#[derive(Clone, Debug, PartialEq)]
pub enum Joiner {
	/// A straight line between the previous offset's end and the next offset's start.
	BevelJoin,
	/// Extends both offsets to their intersection; falls back to `fallback` when the miter length
	/// (the intersection's distance from the centerline vertex) exceeds `limit * halfWidth`.
	MiterJoin { limit: f64, fallback: Box<Joiner> },
	/// A circular arc of radius `halfWidth` centered on the centerline vertex.
	RoundJoin,
	/// Approximates extending both offsets along their own curvature arcs and clipping at the
	/// first intersection; implemented here as `RoundJoin`'s circular-arc construction, limited by
	/// the turn angle at the vertex and falling back to `fallback` past `limit` radians.
	ArcsJoin { limit: f64, fallback: Box<Joiner> },
}

impl Path {
	/// The filled ribbon of width `width` swept along every subpath, capped and joined per
	/// `capper`/`joiner`. A closed subpath strokes to an outer ring and an (oppositely wound) inner
	/// ring bounding the annulus; an open subpath strokes to a single ring running out one side and
	/// back the other, capped at both ends.
	pub fn stroke(&self, width: f64, capper: Capper, joiner: Joiner, tolerance: f64) -> Path {
		let half_width = width.abs() / 2.;
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let segments = subpath.segments();
			if segments.is_empty() {
				continue;
			}
			let left = offset_ribbon(&segments, half_width, &joiner, tolerance, closed);
			let right = offset_ribbon(&segments, -half_width, &joiner, tolerance, closed);
			if left.is_empty() || right.is_empty() {
				continue;
			}
			if closed {
				append_closed_ring(&mut out, &left);
				append_closed_ring(&mut out, &reversed(&right));
			} else {
				let mut ring = left.clone();
				let end_vertex = segments.last().unwrap().end();
				let end_tangent = segments.last().unwrap().derivative(1.).normalize();
				append_cap(&mut ring, end_vertex, left.last().unwrap().end(), right.last().unwrap().end(), end_tangent, half_width, &capper);
				ring.extend(reversed(&right));
				let start_vertex = segments[0].start();
				let start_tangent = -segments[0].derivative(0.).normalize();
				append_cap(&mut ring, start_vertex, right[0].start(), left[0].start(), start_tangent, half_width, &capper);
				append_closed_ring(&mut out, &ring);
			}
		}
		out
	}

	/// The one-sided offset of every subpath by signed distance `d` (positive offsets toward the
	/// left of the direction of travel), with no caps — equivalent to one ribbon of a
	/// `stroke(2|d|, ..)`. The source path must not self-intersect for the result to be a
	/// simple curve; self-intersections a non-simple input introduces are left for `settle`.
	pub fn offset(&self, d: f64, joiner: Joiner, tolerance: f64) -> Path {
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let segments = subpath.segments();
			if segments.is_empty() {
				continue;
			}
			let side = offset_ribbon(&segments, d, &joiner, tolerance, closed);
			if side.is_empty() {
				continue;
			}
			if closed {
				append_closed_ring(&mut out, &side);
			} else {
				append_open_chain(&mut out, &side);
			}
		}
		out
	}
}

/// The one-sided offset of a subpath's segments by signed `distance`, with join geometry inserted
/// between every pair of consecutive offset pieces (and, for a closed subpath, wrapping from the
/// last piece back to the first).
fn offset_ribbon(segments: &[Segment], distance: f64, joiner: &Joiner, tolerance: f64, closed: bool) -> Vec<Segment> {
	let n = segments.len();
	let pieces: Vec<Vec<Segment>> = segments.iter().map(|s| offset_segment(s, distance, tolerance)).collect();
	let mut ribbon: Vec<Segment> = Vec::new();
	let mut last_idx: Option<usize> = None;
	for (i, piece) in pieces.iter().enumerate() {
		if piece.is_empty() {
			continue;
		}
		if let Some(prev_i) = last_idx {
			let prev_end = ribbon.last().unwrap().end();
			let next_start = piece[0].start();
			let tangent_in = segments[prev_i].derivative(1.).normalize();
			let tangent_out = segments[i].derivative(0.).normalize();
			append_join(&mut ribbon, segments[i].start(), prev_end, next_start, distance.abs(), tangent_in, tangent_out, joiner);
		}
		ribbon.extend(piece.iter().copied());
		last_idx = Some(i);
	}
	if closed {
		if let (Some(first_i), Some(last_i)) = (pieces.iter().position(|p| !p.is_empty()), last_idx) {
			let prev_end = ribbon.last().unwrap().end();
			let next_start = ribbon[0].start();
			let tangent_in = segments[last_i].derivative(1.).normalize();
			let tangent_out = segments[first_i].derivative(0.).normalize();
			let joined_tail = append_join_detached(segments[first_i].start(), prev_end, next_start, distance.abs(), tangent_in, tangent_out, joiner);
			ribbon.extend(joined_tail);
		}
	}
	ribbon
}

/// The offset of a single segment by signed `distance`: `Bezier::offset` for Bézier segments, or
/// radii `r ± halfWidth` for an elliptical arc, collapsing to the straight chord between the two
/// offset endpoints when the offset radius would go non-positive (`halfWidth` exceeding the arc's
/// curvature radius, which would otherwise turn the arc inside out).
fn offset_segment(seg: &Segment, distance: f64, tolerance: f64) -> Vec<Segment> {
	if distance.abs() < 1e-12 {
		return vec![*seg];
	}
	match seg {
		Segment::Bezier(b) => b.offset(distance).into_iter().map(Segment::Bezier).collect(),
		Segment::Arc(a) => match offset_arc(a, distance, tolerance) {
			Some(arc) => vec![Segment::Arc(arc)],
			None => {
				let start = seg.start() + seg.normal(0.) * distance;
				let end = seg.end() + seg.normal(1.) * distance;
				vec![line(start, end)]
			}
		},
	}
}

/// `normal()` (the tangent rotated 90° CCW) points inward for a CCW (`theta` increasing) sweep and
/// outward for a CW one, so offsetting along it shrinks a CCW arc's radius and grows a CW arc's.
fn offset_arc(a: &EllipticalArc, distance: f64, tolerance: f64) -> Option<EllipticalArc> {
	let sign = if a.theta_end >= a.theta_start { 1. } else { -1. };
	let rx = a.rx - sign * distance;
	let ry = a.ry - sign * distance;
	let floor = tolerance.abs().max(1e-9) * 1e-2;
	if rx <= floor || ry <= floor {
		return None;
	}
	Some(EllipticalArc { rx, ry, ..*a })
}

fn line(a: DVec2, b: DVec2) -> Segment {
	Segment::Bezier(Bezier::from_linear_dvec2(a, b))
}

fn reversed(chain: &[Segment]) -> Vec<Segment> {
	chain.iter().rev().map(|s| s.reverse()).collect()
}

fn append_closed_ring(out: &mut Path, chain: &[Segment]) {
	if chain.is_empty() {
		return;
	}
	let start = chain[0].start();
	out.move_to(start.x, start.y);
	for segment in chain {
		segment.append_to(out);
	}
	out.close();
}

fn append_open_chain(out: &mut Path, chain: &[Segment]) {
	if chain.is_empty() {
		return;
	}
	let start = chain[0].start();
	out.move_to(start.x, start.y);
	for segment in chain {
		segment.append_to(out);
	}
}

/// Append join geometry between `from` (the end of the previous offset piece) and `to` (the start
/// of the next), both at distance `radius` from the centerline vertex `vertex`, turning from
/// `tangent_in` to `tangent_out`.
fn append_join(ribbon: &mut Vec<Segment>, vertex: DVec2, from: DVec2, to: DVec2, radius: f64, tangent_in: DVec2, tangent_out: DVec2, joiner: &Joiner) {
	ribbon.extend(append_join_detached(vertex, from, to, radius, tangent_in, tangent_out, joiner));
}

fn append_join_detached(vertex: DVec2, from: DVec2, to: DVec2, radius: f64, tangent_in: DVec2, tangent_out: DVec2, joiner: &Joiner) -> Vec<Segment> {
	match joiner {
		Joiner::BevelJoin => vec![line(from, to)],
		Joiner::RoundJoin => {
			let bulge = bulge_direction(tangent_in, tangent_out);
			vec![Segment::Arc(arc_through(vertex, from, to, radius, bulge))]
		}
		Joiner::MiterJoin { limit, fallback } => match miter_apex(from, tangent_in, to, tangent_out) {
			Some(apex) if (apex - vertex).length() <= limit * radius => vec![line(from, apex), line(apex, to)],
			_ => append_join_detached(vertex, from, to, radius, tangent_in, tangent_out, fallback),
		},
		Joiner::ArcsJoin { limit, fallback } => {
			let turn = tangent_in.dot(tangent_out).clamp(-1., 1.).acos();
			if turn <= *limit {
				let bulge = bulge_direction(tangent_in, tangent_out);
				vec![Segment::Arc(arc_through(vertex, from, to, radius, bulge))]
			} else {
				append_join_detached(vertex, from, to, radius, tangent_in, tangent_out, fallback)
			}
		}
	}
}

fn bulge_direction(tangent_in: DVec2, tangent_out: DVec2) -> DVec2 {
	let sum = tangent_in + tangent_out;
	if sum.length() > 1e-9 {
		sum.normalize()
	} else {
		tangent_in
	}
}

/// Append a cap between `from` and `to` (each at distance `half_width` from the subpath endpoint
/// `vertex`, antipodal through it), bulging in the direction of `tangent` (the path's own end
/// tangent for an end cap, its negation for a start cap).
fn append_cap(ring: &mut Vec<Segment>, vertex: DVec2, from: DVec2, to: DVec2, tangent: DVec2, half_width: f64, capper: &Capper) {
	match capper {
		Capper::ButtCap => ring.push(line(from, to)),
		Capper::SquareCap => {
			let out_from = from + tangent * half_width;
			let out_to = to + tangent * half_width;
			ring.push(line(from, out_from));
			ring.push(line(out_from, out_to));
			ring.push(line(out_to, to));
		}
		Capper::RoundCap => ring.push(Segment::Arc(arc_through(vertex, from, to, half_width, tangent))),
	}
}

/// The circular arc of `radius` centered at `vertex`, running from `from` to `to` (both assumed at
/// distance `radius` from `vertex`) by whichever of the two possible sweeps bulges toward `bulge`.
fn arc_through(vertex: DVec2, from: DVec2, to: DVec2, radius: f64, bulge: DVec2) -> EllipticalArc {
	let theta_start = (from - vertex).abs_angle();
	let theta_end_abs = (to - vertex).abs_angle();
	let ccw_sweep = normalize_angle(theta_end_abs - theta_start);
	let ccw_mid = normalize_angle(theta_start + ccw_sweep / 2.);
	let cw_mid = normalize_angle(theta_start - (2. * PI - ccw_sweep) / 2.);
	let target = bulge.abs_angle();
	let angular_distance = |a: f64, b: f64| {
		let d = (a - b).abs();
		d.min(2. * PI - d)
	};
	let theta_end = if angular_distance(ccw_mid, target) <= angular_distance(cw_mid, target) {
		theta_start + ccw_sweep
	} else {
		theta_start - (2. * PI - ccw_sweep)
	};
	EllipticalArc {
		center: vertex,
		rx: radius,
		ry: radius,
		phi: 0.,
		theta_start,
		theta_end,
	}
}

fn miter_apex(from: DVec2, tangent_in: DVec2, to: DVec2, tangent_out: DVec2) -> Option<DVec2> {
	if tangent_in.normalize().abs_diff_eq(tangent_out.normalize(), 1e-9) {
		return None;
	}
	Some(crate::utils::line_intersection(from, tangent_in, to, tangent_out))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn straight_line(length: f64) -> Path {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(length, 0.);
		p
	}

	#[test]
	fn butt_cap_bevel_join_stroke_of_a_line_is_a_rectangle() {
		let p = straight_line(10.);
		let stroked = p.stroke(2., Capper::ButtCap, Joiner::BevelJoin, 0.01);
		let b = stroked.bounds();
		assert!((b.x1 - b.x0 - 10.).abs() < 1e-6);
		assert!((b.y1 - b.y0 - 2.).abs() < 1e-6);
		assert!((stroked.length() - 24.).abs() < 1e-6);
	}

	#[test]
	fn square_cap_extends_bounds_by_half_width() {
		let p = straight_line(10.);
		let stroked = p.stroke(2., Capper::SquareCap, Joiner::BevelJoin, 0.01);
		let b = stroked.bounds();
		assert!((b.x1 - b.x0 - 11.).abs() < 1e-6);
	}

	#[test]
	fn round_cap_bulges_past_the_endpoint() {
		let p = straight_line(10.);
		let stroked = p.stroke(2., Capper::RoundCap, Joiner::BevelJoin, 0.01);
		let b = stroked.bounds();
		assert!(b.x1 > 10.);
		assert!(b.x0 < 0.);
	}

	#[test]
	fn closed_square_strokes_to_an_annulus_of_two_rings() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 10.);
		p.line_to(0., 10.);
		p.close();

		let stroked = p.stroke(2., Capper::ButtCap, Joiner::MiterJoin { limit: 4., fallback: Box::new(Joiner::BevelJoin) }, 0.01);
		assert_eq!(stroked.subpaths().len(), 2);
	}

	#[test]
	fn offset_of_a_line_is_a_parallel_line() {
		let p = straight_line(10.);
		let offset = p.offset(1., Joiner::BevelJoin, 0.01);
		let b = offset.bounds();
		assert!((b.y1 - b.y0).abs() < 1e-6);
		assert!((b.y0 - 1.).abs() < 1e-6 || (b.y0 + 1.).abs() < 1e-6);
	}
}
