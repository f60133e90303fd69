//! `Segment`: the curve-degree-polymorphic handle used by `Path` and the intersection kernels,
//! in the same spirit as `Bezier`'s own internal `BezierHandles` dispatch but one level up, since
//! a path segment may additionally be an elliptical arc.

use crate::arc::EllipticalArc;
use crate::bezier::{Bezier, BezierKind};
use crate::path::Path;
use crate::rect::Rect;
use glam::DVec2;

/// One segment of a `Path`: either a line/quadratic/cubic Bézier or an elliptical arc.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
	Bezier(Bezier),
	Arc(EllipticalArc),
}

impl Segment {
	pub fn kind(&self) -> SegmentKind {
		match self {
			Segment::Bezier(b) => match b.kind() {
				BezierKind::Linear => SegmentKind::Line,
				BezierKind::Quadratic => SegmentKind::Quadratic,
				BezierKind::Cubic => SegmentKind::Cubic,
			},
			Segment::Arc(_) => SegmentKind::Arc,
		}
	}

	pub fn start(&self) -> DVec2 {
		match self {
			Segment::Bezier(b) => b.start(),
			Segment::Arc(a) => a.position(0.),
		}
	}

	pub fn end(&self) -> DVec2 {
		match self {
			Segment::Bezier(b) => b.end(),
			Segment::Arc(a) => a.position(1.),
		}
	}

	pub fn position(&self, t: f64) -> DVec2 {
		match self {
			Segment::Bezier(b) => b.evaluate(t),
			Segment::Arc(a) => a.position(t),
		}
	}

	pub fn derivative(&self, t: f64) -> DVec2 {
		match self {
			Segment::Bezier(b) => b.tangent(t),
			Segment::Arc(a) => a.derivative(t),
		}
	}

	pub fn normal(&self, t: f64) -> DVec2 {
		match self {
			Segment::Bezier(b) => b.normal(t),
			Segment::Arc(a) => a.normal(t),
		}
	}

	pub fn length(&self) -> f64 {
		match self {
			Segment::Bezier(b) => b.length(None),
			Segment::Arc(a) => a.length(),
		}
	}

	pub fn bounds(&self) -> Rect {
		match self {
			Segment::Bezier(b) => {
				let [min, max] = b.bounding_box();
				Rect::new(min.x, min.y, max.x, max.y)
			}
			Segment::Arc(a) => a.bounds(),
		}
	}

	pub fn split(&self, t: f64) -> (Segment, Segment) {
		match self {
			Segment::Bezier(b) => {
				let [left, right] = b.split(t);
				(Segment::Bezier(left), Segment::Bezier(right))
			}
			Segment::Arc(a) => {
				let (left, right) = a.split(t);
				(Segment::Arc(left), Segment::Arc(right))
			}
		}
	}

	pub fn trim(&self, t0: f64, t1: f64) -> Segment {
		let (_, upper) = self.split(t0);
		let rescaled_t1 = (t1 - t0) / (1. - t0).max(1e-12);
		let (lower, _) = upper.split(rescaled_t1);
		lower
	}

	pub fn reverse(&self) -> Segment {
		match self {
			Segment::Bezier(b) => Segment::Bezier(match (b.handle_start(), b.handle_end()) {
				(None, None) => Bezier::from_linear_dvec2(b.end(), b.start()),
				(Some(h), None) => Bezier::from_quadratic_dvec2(b.end(), h, b.start()),
				(Some(h1), Some(h2)) => Bezier::from_cubic_dvec2(b.end(), h2, h1, b.start()),
				(None, Some(_)) => unreachable!("a Bezier with handle_end but no handle_start cannot occur"),
			}),
			Segment::Arc(a) => Segment::Arc(EllipticalArc {
				theta_start: a.theta_end,
				theta_end: a.theta_start,
				..*a
			}),
		}
	}

	/// Flatten to a polyline within `tolerance`, including the start point.
	pub fn flatten(&self, tolerance: f64) -> Vec<DVec2> {
		match self {
			Segment::Bezier(b) => b.flatten(tolerance),
			Segment::Arc(a) => a.flatten(tolerance),
		}
	}

	/// Approximate as cubic Béziers (arcs only; Béziers return a single-element vec of themselves).
	pub fn to_cubics(&self) -> Vec<Bezier> {
		match self {
			Segment::Bezier(b) => vec![b.to_cubic()],
			Segment::Arc(a) => a.to_cubics(),
		}
	}

	/// Append this segment to `path` as the appropriate builder call, starting from `path`'s
	/// current pen position (assumed already at `self.start()`).
	pub(crate) fn append_to(&self, path: &mut Path) {
		match self {
			Segment::Bezier(b) => match (b.handle_start(), b.handle_end()) {
				(None, None) => path.line_to(b.end().x, b.end().y),
				(Some(h), None) => path.quad_to(h.x, h.y, b.end().x, b.end().y),
				(Some(h1), Some(h2)) => path.cube_to(h1.x, h1.y, h2.x, h2.y, b.end().x, b.end().y),
				(None, Some(_)) => unreachable!("a Bezier with handle_end but no handle_start cannot occur"),
			},
			Segment::Arc(a) => {
				let (_, rx, ry, phi_degrees, large_arc, sweep, p1) = a.to_svg_endpoint();
				path.arc_to(rx, ry, phi_degrees, large_arc, sweep, p1.x, p1.y);
			}
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentKind {
	Line,
	Quadratic,
	Cubic,
	Arc,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn line_segment_endpoints() {
		let seg = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 0.), DVec2::new(10., 10.)));
		assert_eq!(seg.start(), DVec2::new(0., 0.));
		assert_eq!(seg.end(), DVec2::new(10., 10.));
	}

	#[test]
	fn arc_segment_split_matches_endpoints() {
		let arc = EllipticalArc {
			center: DVec2::ZERO,
			rx: 2.,
			ry: 1.,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::PI,
		};
		let seg = Segment::Arc(arc);
		let (left, right) = seg.split(0.5);
		assert!((left.end().distance(right.start())) < 1e-9);
	}

	#[test]
	fn reverse_swaps_endpoints() {
		let seg = Segment::Bezier(Bezier::from_linear_dvec2(DVec2::new(0., 0.), DVec2::new(5., 5.)));
		let reversed = seg.reverse();
		assert_eq!(reversed.start(), seg.end());
		assert_eq!(reversed.end(), seg.start());
	}
}
