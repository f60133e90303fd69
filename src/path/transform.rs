//! `Transform`, `Reverse`, and `SplitAt`.

use super::Path;
use crate::cheby::InverseLengthFit;
use crate::matrix::Matrix;
use crate::segment::Segment;
use glam::DVec2;

impl Path {
	/// Apply `matrix` to every stored point. Arcs are re-decomposed rather than naively
	/// re-encoded: an affine that isn't a similarity turns a circle into a genuine ellipse, so
	/// `rx`/`ry`/`phi`/`sweep` are recovered from the transformed arc's own geometry, not just its
	/// transformed endpoints.
	pub fn transform(&self, matrix: &Matrix) -> Path {
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let mut segments = subpath.segments();
			if closed {
				segments.pop();
			}
			let start = subpath.segments().first().map(|s| s.start()).unwrap_or(subpath.start_pos());
			let start = matrix.transform_point(start);
			out.move_to(start.x, start.y);
			for segment in &segments {
				transform_segment(segment, matrix).append_to(&mut out);
			}
			if closed {
				out.close();
			}
		}
		out
	}

	/// Walk commands backwards, emitting each mirrored form. Preserves closure; an `ArcTo`'s
	/// `sweep` flag inverts and a `CubeTo`'s control points swap, the same as `Segment::reverse`.
	pub fn reverse(&self) -> Path {
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let mut segments = subpath.segments();
			if closed {
				segments.pop();
			}
			if segments.is_empty() {
				let start = subpath.start_pos();
				out.move_to(start.x, start.y);
				if closed {
					out.close();
				}
				continue;
			}
			let reversed: Vec<Segment> = segments.iter().rev().map(|s| s.reverse()).collect();
			let start = reversed[0].start();
			out.move_to(start.x, start.y);
			for segment in &reversed {
				segment.append_to(&mut out);
			}
			if closed {
				out.close();
			}
		}
		out
	}

	/// Split at each arc-length position in `lengths` (ascending, each in `[0, self.length()]`),
	/// returning the pieces between consecutive cuts (plus the lead-in and trail-out pieces). Walks
	/// segment-by-segment, converting a cut's remaining distance into a local parameter via a
	/// Chebyshev inverse-length fit of that segment when the cut falls inside it.
	pub fn split_at(&self, lengths: &[f64]) -> Vec<Path> {
		let segments = self.segments();
		if segments.is_empty() || lengths.is_empty() {
			return vec![self.clone()];
		}

		let mut pieces = Vec::new();
		let mut current = Path::new();
		let first_start = segments[0].start();
		current.move_to(first_start.x, first_start.y);

		let mut traveled = 0.;
		let mut cut_iter = lengths.iter().copied().peekable();

		for segment in &segments {
			let seg_length = segment.length();
			let fit = InverseLengthFit::new(|t| segment.split(t).0.length(), seg_length);
			let mut t_start = 0.;

			while let Some(&cut) = cut_iter.peek() {
				if cut > traveled + seg_length + 1e-9 {
					break;
				}
				cut_iter.next();
				let local_length = (cut - traveled).clamp(0., seg_length);
				let t_cut = if seg_length < 1e-12 { 1. } else { fit.t_at(local_length / seg_length) };
				if t_cut > t_start + 1e-9 {
					segment.trim(t_start, t_cut).append_to(&mut current);
				}
				pieces.push(std::mem::replace(&mut current, Path::new()));
				let restart = segment.position(t_cut);
				current.move_to(restart.x, restart.y);
				t_start = t_cut;
			}

			if t_start < 1. - 1e-9 {
				segment.trim(t_start, 1.).append_to(&mut current);
			}
			traveled += seg_length;
		}

		pieces.push(current);
		pieces
	}
}

fn transform_segment(segment: &Segment, matrix: &Matrix) -> Segment {
	match segment {
		Segment::Bezier(b) => Segment::Bezier(transform_bezier(b, matrix)),
		Segment::Arc(a) => a.transform(matrix).map(Segment::Arc).unwrap_or_else(|| {
			// A singular transform collapses the ellipse to a line; fall back to the transformed chord.
			Segment::Bezier(crate::bezier::Bezier::from_linear_dvec2(matrix.transform_point(a.position(0.)), matrix.transform_point(a.position(1.))))
		}),
	}
}

fn transform_bezier(b: &crate::bezier::Bezier, matrix: &Matrix) -> crate::bezier::Bezier {
	use crate::bezier::Bezier;
	let start = matrix.transform_point(b.start());
	let end = matrix.transform_point(b.end());
	match (b.handle_start(), b.handle_end()) {
		(None, None) => Bezier::from_linear_dvec2(start, end),
		(Some(h), None) => Bezier::from_quadratic_dvec2(start, matrix.transform_point(h), end),
		(Some(h1), Some(h2)) => Bezier::from_cubic_dvec2(start, matrix.transform_point(h1), matrix.transform_point(h2), end),
		(None, Some(_)) => unreachable!("a Bezier with handle_end but no handle_start cannot occur"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transform_then_inverse_round_trips() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 10.);
		p.close();

		let m = Matrix::rotation(0.7).then(&Matrix::translation(3., -2.));
		let round_tripped = p.transform(&m).transform(&m.inverse().unwrap());

		let original: Vec<DVec2> = p.coords();
		let back: Vec<DVec2> = round_tripped.coords();
		assert_eq!(original.len(), back.len());
		for (a, b) in original.iter().zip(back.iter()) {
			assert!(a.distance(*b) < 1e-6);
		}
	}

	#[test]
	fn reverse_arc_inverts_sweep() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.arc_to(10., 10., 0., false, true, 20., 0.);
		let reversed = p.reverse();
		let cmds: Vec<_> = reversed.commands().collect();
		if let super::super::Cmd::ArcTo { sweep, .. } = cmds[1] {
			assert!(!sweep);
		} else {
			panic!("expected an ArcTo command");
		}
	}

	#[test]
	fn split_at_midpoint_bisects_length() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		let total = p.length();
		let pieces = p.split_at(&[total / 2.]);
		assert_eq!(pieces.len(), 2);
		assert!((pieces[0].length() - 5.).abs() < 1e-6);
		assert!((pieces[1].length() - 5.).abs() < 1e-6);
	}
}
