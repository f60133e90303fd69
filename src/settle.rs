//! `settle`, the self-intersection normalizer.
//!
//! A path built up by hand, round-tripped through a lossy format, or accumulated over many edits
//! can self-overlap: two of its own subpaths can cross, or a single subpath can wind back over
//! itself. `settle` reduces every closed subpath to a set of simple, non-self-overlapping rings and
//! keeps only the ones `fill_rule` would actually paint, each re-oriented so its stored winding
//! direction agrees with what it keeps.
//!
//! A self-intersecting subpath's decomposition into simple rings is the same node-graph walk
//! `boolean` already does for `P` crossing `Q` (`graph::cut`, `graph::path_intersection_nodes`,
//! `boolean::traverse`) — here `P` and `Q` are just the two sorted views `path_intersections`
//! returns when asked to self-intersect a single path (`q = None`), so the existing ring walk is
//! reused directly rather than re-derived.

use crate::boolean::{self, Directive};
use crate::consts::{Config, FillRule};
use crate::graph;
use crate::path::{Cmd, Path};
use crate::pathintersect::path_intersections;
use glam::DVec2;
use std::collections::HashSet;

/// Reduce `path` to its simple, non-self-overlapping outline under `fill_rule`. Open subpaths carry
/// no notion of "inside", so they pass through unchanged.
pub fn settle(path: &Path, fill_rule: FillRule, config: &Config) -> Path {
	let mut out = Path::new();
	let mut closed_rings: Vec<Path> = Vec::new();

	for subpath in path.subpaths() {
		if !subpath.closed() {
			append_path(&mut out, &subpath);
			continue;
		}
		// Flattening first keeps the self-intersection pipeline's segment-pair kernels on their
		// stable line/line path and is itself a stability prerequisite for reusing those kernels at
		// all when a subpath's curves self-overlap.
		let flattened = subpath.flatten(config.tolerance);
		let (zp, zq) = path_intersections(&flattened, None, config);
		if zp.is_empty() {
			closed_rings.push(flattened);
			continue;
		}

		let p_pieces = graph::cut(&flattened, &zp);
		let q_pieces = graph::cut(&flattened, &zq);
		let nodes = graph::path_intersection_nodes(&zp, &zq, p_pieces, q_pieces);
		let directive = Directive { start_inwards: false, invert_p: false, invert_q: false };
		let mut visited = HashSet::new();
		closed_rings.extend(boolean::traverse(&nodes, directive, false, &mut visited));
	}

	for (i, ring) in closed_rings.iter().enumerate() {
		let Some(probe) = leftmost_point(ring) else { continue };
		let mut winding = 0i32;
		for (j, other) in closed_rings.iter().enumerate() {
			if i != j {
				winding += other.winding_number(probe.x, probe.y, config);
			}
		}
		// `ring`'s own contribution to the winding number at a point just left of its own leftmost
		// vertex is its orientation sign, so the region it bounds has depth `winding + self_sign`
		// under its stored orientation and `winding - self_sign` under the reversed one.
		let self_sign = if ring.ccw() { 1 } else { -1 };
		if fill_rule.fills(winding + self_sign) {
			append_path(&mut out, ring);
		} else if fill_rule.fills(winding - self_sign) {
			append_path(&mut out, &ring.reverse());
		}
	}

	out
}

fn leftmost_point(path: &Path) -> Option<DVec2> {
	path.coords().into_iter().min_by(|a, b| a.x.partial_cmp(&b.x).unwrap())
}

fn append_path(out: &mut Path, path: &Path) {
	for cmd in path.commands() {
		match cmd {
			Cmd::MoveTo(p) => out.move_to(p.x, p.y),
			Cmd::LineTo(p) => out.line_to(p.x, p.y),
			Cmd::QuadTo { control, end } => out.quad_to(control.x, control.y, end.x, end.y),
			Cmd::CubeTo { c1, c2, end } => out.cube_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y),
			Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => out.arc_to(rx, ry, phi.to_degrees(), large_arc, sweep, end.x, end.y),
			Cmd::Close { .. } => out.close(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn square(x0: f64, y0: f64, size: f64) -> Path {
		let mut p = Path::new();
		p.move_to(x0, y0);
		p.line_to(x0 + size, y0);
		p.line_to(x0 + size, y0 + size);
		p.line_to(x0, y0 + size);
		p.close();
		p
	}

	#[test]
	fn already_simple_square_passes_through_unchanged() {
		let config = Config::default();
		let p = square(0., 0., 10.);
		let settled = settle(&p, FillRule::NonZero, &config);
		assert!(settled.interior(5., 5., FillRule::NonZero, &config));
		assert!(!settled.interior(50., 50., FillRule::NonZero, &config));
	}

	#[test]
	fn nested_opposite_winding_squares_leave_a_donut_under_nonzero() {
		// An outer CW square and an inner CCW square, concatenated into one path: NonZero sees a
		// hole where the inner square cancels the outer one's winding.
		let mut p = square(0., 0., 20.);
		let inner = square(5., 5., 10.).reverse();
		append_path(&mut p, &inner);

		let config = Config::default();
		let settled = settle(&p, FillRule::NonZero, &config);
		assert!(settled.interior(1., 1., FillRule::NonZero, &config));
		assert!(!settled.interior(10., 10., FillRule::NonZero, &config));
	}

	#[test]
	fn nested_same_winding_squares_stay_fully_filled_under_nonzero() {
		let mut p = square(0., 0., 20.);
		let inner = square(5., 5., 10.);
		append_path(&mut p, &inner);

		let config = Config::default();
		let settled = settle(&p, FillRule::NonZero, &config);
		assert!(settled.interior(1., 1., FillRule::NonZero, &config));
		assert!(settled.interior(10., 10., FillRule::NonZero, &config));
	}

	#[test]
	fn disjoint_squares_both_survive() {
		let mut p = square(0., 0., 10.);
		append_path(&mut p, &square(100., 100., 10.));

		let config = Config::default();
		let settled = settle(&p, FillRule::NonZero, &config);
		assert!(settled.interior(5., 5., FillRule::NonZero, &config));
		assert!(settled.interior(105., 105., FillRule::NonZero, &config));
	}

	#[test]
	fn self_intersecting_figure_eight_settles_into_two_triangles() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 10.);
		p.line_to(10., 0.);
		p.line_to(0., 10.);
		p.close();

		let config = Config::default();
		let settled = settle(&p, FillRule::EvenOdd, &config);
		assert_eq!(settled.subpaths().len(), 2);
		assert!(settled.interior(2., 5., FillRule::EvenOdd, &config));
		assert!(settled.interior(8., 5., FillRule::EvenOdd, &config));
	}

	#[test]
	fn open_subpath_passes_through_untouched() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 10.);
		let config = Config::default();
		let settled = settle(&p, FillRule::NonZero, &config);
		assert_eq!(settled.segment_count(), 1);
	}
}
