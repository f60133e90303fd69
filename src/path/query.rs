//! Whole-path queries: bounds, length, orientation, containment, the segment-count
//! indexer, and the ray-intersection helper containment is built on.

use super::Path;
use crate::consts::{Config, FillRule};
use crate::pathintersect::path_intersections;
use crate::pathintersect::PathIntersection;
use crate::rect::Rect;
use glam::DVec2;

impl Path {
	/// The union of every segment's own bounds (segment extremes at `t=0`, `t=1`, plus any critical
	/// `t` where a derivative component vanishes — each segment kind's `bounds()` already accounts
	/// for this).
	pub fn bounds(&self) -> Rect {
		self.segments().into_iter().fold(Rect::EMPTY, |acc, segment| acc.add_rect(&segment.bounds()))
	}

	/// Sum of closed-form/quadrature per-segment lengths.
	pub fn length(&self) -> f64 {
		self.segments().iter().map(|s| s.length()).sum()
	}

	/// Signed area via the Shoelace formula over this path's on-curve vertices (its flattened
	/// straight-edge skeleton; curve bulge does not change a closed path's orientation).
	fn signed_area(&self) -> f64 {
		let mut area = 0.;
		for subpath in self.subpaths() {
			let points = subpath.coords();
			if points.len() < 3 {
				continue;
			}
			for i in 0..points.len() {
				let p0 = points[i];
				let p1 = points[(i + 1) % points.len()];
				area += p0.x * p1.y - p1.x * p0.y;
			}
		}
		area / 2.
	}

	/// Whether this path winds counter-clockwise in the coordinate system it's stored in. SVG's Y
	/// axis points down, so a positive Shoelace sum (counter-clockwise by the usual Y-up convention)
	/// corresponds to a clockwise sweep as drawn — hence the sign flip here.
	pub fn ccw(&self) -> bool {
		self.signed_area() < 0.
	}

	/// Every `PathIntersection` of this path with the horizontal ray from `(x, y)` to `+∞`, sorted
	/// by increasing x.
	pub fn ray_intersections(&self, x: f64, y: f64, config: &Config) -> Vec<PathIntersection> {
		let far = self.bounds().add_point(DVec2::new(x, y)).x1.max(x) + 1.;
		let mut ray = Path::new();
		ray.move_to(x, y);
		ray.line_to(far + 1., y);
		let (mut zp, _zq) = path_intersections(self, Some(&ray), config);
		zp.sort_by(|a, b| a.position.x.partial_cmp(&b.position.x).unwrap());
		zp
	}

	/// Flattens every segment, then sums the signed winding contribution of the horizontal ray to
	/// `+∞` from `(x, y)` across every subpath: `NonZero` asks for a nonzero total, `EvenOdd` for an
	/// odd one (parity doesn't care about sign, so `EvenOdd` behaves the same as the old unsigned
	/// count did, but `NonZero` now correctly cancels between oppositely-wound nested subpaths — the
	/// hole a `settle`-style ring decomposition relies on).
	pub fn interior(&self, x: f64, y: f64, fill_rule: FillRule, config: &Config) -> bool {
		fill_rule.fills(self.winding_number(x, y, config))
	}

	/// Signed ray-crossing count of the horizontal ray to `+∞` from `(x, y)` against every subpath,
	/// each edge contributing `+1` for an upward crossing and `-1` for a downward one. The winding
	/// number proper, as opposed to `ray_intersections`' raw unsigned hit list.
	pub fn winding_number(&self, x: f64, y: f64, config: &Config) -> i32 {
		let mut count = 0i32;
		for subpath in self.subpaths() {
			let mut polyline = Vec::new();
			for segment in subpath.segments() {
				let mut pts = segment.flatten(config.tolerance);
				if let Some(last) = polyline.last() {
					if pts.first().map(|p| p.distance(*last) < config.epsilon).unwrap_or(false) {
						pts.remove(0);
					}
				}
				polyline.extend(pts);
			}
			if polyline.len() < 2 {
				continue;
			}
			count += crossing_count(&polyline, x, y);
		}
		count
	}

	/// The number of drawn segments (everything but `MoveTo`) in this path.
	pub fn segment_count(&self) -> usize {
		self.segments().len()
	}

	/// The `index`th drawn segment's start/end points, for callers that want to address a segment
	/// without pulling in `crate::segment::Segment` directly.
	pub fn segment_endpoints(&self, index: usize) -> Option<(DVec2, DVec2)> {
		self.segments().get(index).map(|s| (s.start(), s.end()))
	}
}

/// Ray-casting crossing count of the closed polyline `points` against the horizontal ray from
/// `(x, y)` to `+∞`.
fn crossing_count(points: &[DVec2], x: f64, y: f64) -> i32 {
	let mut count = 0;
	let n = points.len();
	for i in 0..n {
		let a = points[i];
		let b = points[(i + 1) % n];
		if (a.y > y) != (b.y > y) {
			let t = (y - a.y) / (b.y - a.y);
			let cross_x = a.x + t * (b.x - a.x);
			if cross_x > x {
				count += if b.y > a.y { 1 } else { -1 };
			}
		}
	}
	count
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit_square() -> Path {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 10.);
		p.line_to(0., 10.);
		p.close();
		p
	}

	#[test]
	fn bounds_matches_square_extent() {
		let p = unit_square();
		let b = p.bounds();
		assert_eq!((b.x0, b.y0, b.x1, b.y1), (0., 0., 10., 10.));
	}

	#[test]
	fn length_sums_four_sides() {
		let p = unit_square();
		assert!((p.length() - 40.).abs() < 1e-9);
	}

	#[test]
	fn ccw_matches_stored_svg_orientation() {
		let p = unit_square();
		assert!(!p.ccw());
	}

	#[test]
	fn interior_point_is_inside_nonzero() {
		let p = unit_square();
		let config = Config::default();
		assert!(p.interior(5., 5., FillRule::NonZero, &config));
		assert!(!p.interior(50., 50., FillRule::NonZero, &config));
	}

	#[test]
	fn ray_intersections_sorted_by_x() {
		let p = unit_square();
		let config = Config::default();
		let hits = p.ray_intersections(-5., 5., &config);
		assert_eq!(hits.len(), 2);
		assert!(hits[0].position.x < hits[1].position.x);
	}
}
