//! `GridSnap`, `VisvalingamWhyatt`, and `Clip`.

use super::{Cmd, Path};
use crate::point::PointExt;
use glam::DVec2;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

impl Path {
	/// Snap every stored coordinate (on-curve and control points alike) to the nearest multiple of
	/// `spacing`, in place. Reduces floating-point noise ahead of boolean/intersection work.
	pub fn grid_snap(&mut self, spacing: f64) {
		if spacing <= 0. {
			return;
		}
		let snap = |p: DVec2| DVec2::new((p.x / spacing).round() * spacing, (p.y / spacing).round() * spacing);
		let mut out = Vec::with_capacity(self.len());
		for cmd in self.commands() {
			let snapped = match cmd {
				Cmd::MoveTo(p) => Cmd::MoveTo(snap(p)),
				Cmd::LineTo(p) => Cmd::LineTo(snap(p)),
				Cmd::QuadTo { control, end } => Cmd::QuadTo { control: snap(control), end: snap(end) },
				Cmd::CubeTo { c1, c2, end } => Cmd::CubeTo { c1: snap(c1), c2: snap(c2), end: snap(end) },
				Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end: snap(end) },
				Cmd::Close { start } => Cmd::Close { start: snap(start) },
			};
			out.push(snapped);
		}
		*self = Path::new();
		for cmd in out {
			match cmd {
				Cmd::MoveTo(p) => self.move_to(p.x, p.y),
				Cmd::LineTo(p) => self.line_to(p.x, p.y),
				Cmd::QuadTo { control, end } => self.quad_to(control.x, control.y, end.x, end.y),
				Cmd::CubeTo { c1, c2, end } => self.cube_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y),
				Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => self.arc_to(rx, ry, phi.to_degrees(), large_arc, sweep, end.x, end.y),
				Cmd::Close { .. } => self.close(),
			}
		}
	}

	/// Simplify every subpath by repeatedly removing the vertex forming the smallest triangle with
	/// its neighbours, stopping once the smallest remaining triangle's area reaches `tolerance` or
	/// fewer than three vertices remain. `keep` protects a vertex (by its index within the subpath's
	/// vertex list) from ever being removed, regardless of its triangle's area.
	///
	/// Operates on each subpath's on-curve/control vertex list (`coords()`); curved subpaths should
	/// typically be flattened first, since triangular area over control points doesn't approximate
	/// a curve's visual contribution the way it does for a polyline.
	pub fn visvalingam_whyatt(&self, tolerance: f64, keep: Option<&dyn Fn(usize) -> bool>) -> Path {
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let verts = subpath.coords();
			let simplified = simplify_ring(&verts, closed, tolerance, keep);
			if simplified.is_empty() {
				continue;
			}
			out.move_to(simplified[0].x, simplified[0].y);
			for p in &simplified[1..] {
				out.line_to(p.x, p.y);
			}
			if closed {
				out.close();
			}
		}
		out
	}

	/// Keep only segments whose bounding box touches `(x0, y0, x1, y1)`; stitch gaps left by a
	/// dropped segment with a `LineTo` so the result still draws as closed polygons touching the
	/// rectangle's interior. `O(n)`, coarse: for an exact intersection with the rectangle, use
	/// `And` against a rectangular path instead.
	pub fn clip(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
		let clip_rect = crate::rect::Rect::new(x0, y0, x1, y1);
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let mut segments = subpath.segments();
			if closed {
				segments.pop();
			}
			let mut pen_is_set = false;
			for segment in &segments {
				if !clip_rect.touches(&segment.bounds()) {
					continue;
				}
				if !pen_is_set {
					out.move_to(segment.start().x, segment.start().y);
					pen_is_set = true;
				} else if out.position().distance(segment.start()) > 1e-9 {
					out.line_to(segment.start().x, segment.start().y);
				}
				segment.append_to(&mut out);
			}
			if closed && pen_is_set {
				out.close();
			}
		}
		out
	}
}

#[derive(Clone, Copy)]
struct Node {
	point: DVec2,
	prev: usize,
	next: usize,
	alive: bool,
}

struct HeapEntry {
	area: f64,
	index: usize,
	stamp: u64,
}

impl PartialEq for HeapEntry {
	fn eq(&self, other: &Self) -> bool {
		self.area == other.area
	}
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for HeapEntry {
	// Reversed so `BinaryHeap` (a max-heap) pops the smallest area first.
	fn cmp(&self, other: &Self) -> Ordering {
		other.area.partial_cmp(&self.area).unwrap_or(Ordering::Equal)
	}
}

fn triangle_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
	(b - a).perp_dot(c - a).abs() / 2.
}

fn simplify_ring(verts: &[DVec2], closed: bool, tolerance: f64, keep: Option<&dyn Fn(usize) -> bool>) -> Vec<DVec2> {
	let n = verts.len();
	if n < 3 {
		return verts.to_vec();
	}

	let mut nodes: Vec<Node> = (0..n)
		.map(|i| Node {
			point: verts[i],
			prev: (i + n - 1) % n,
			next: (i + 1) % n,
			alive: true,
		})
		.collect();

	let is_removable = |i: usize| -> bool {
		if keep.map(|f| f(i)).unwrap_or(false) {
			return false;
		}
		if closed {
			return true;
		}
		// Open subpaths keep their endpoints.
		i != 0 && i != n - 1
	};

	let mut stamps = vec![0u64; n];
	let mut heap = BinaryHeap::new();
	let mut alive_count = n;

	for i in 0..n {
		if is_removable(i) {
			let node = nodes[i];
			let area = triangle_area(nodes[node.prev].point, node.point, nodes[node.next].point);
			heap.push(HeapEntry { area, index: i, stamp: stamps[i] });
		}
	}

	while let Some(HeapEntry { area, index, stamp }) = heap.pop() {
		if stamp != stamps[index] || !nodes[index].alive {
			continue;
		}
		if area >= tolerance || alive_count <= (if closed { 3 } else { 2 }) {
			break;
		}
		let (prev, next) = (nodes[index].prev, nodes[index].next);
		nodes[index].alive = false;
		alive_count -= 1;
		nodes[prev].next = next;
		nodes[next].prev = prev;

		for &neighbor in &[prev, next] {
			if is_removable(neighbor) && nodes[neighbor].alive {
				stamps[neighbor] += 1;
				let nn = nodes[neighbor];
				let new_area = triangle_area(nodes[nn.prev].point, nn.point, nodes[nn.next].point);
				heap.push(HeapEntry { area: new_area, index: neighbor, stamp: stamps[neighbor] });
			}
		}
	}

	let mut out = Vec::with_capacity(alive_count);
	if let Some(start) = (0..n).find(|&i| nodes[i].alive) {
		let mut cursor = start;
		loop {
			out.push(nodes[cursor].point);
			cursor = nodes[cursor].next;
			if cursor == start {
				break;
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid_snap_rounds_coordinates() {
		let mut p = Path::new();
		p.move_to(0.4, 0.6);
		p.line_to(9.9, 0.1);
		p.grid_snap(1.);
		let coords = p.coords();
		assert_eq!(coords[0], DVec2::new(0., 1.));
		assert_eq!(coords[1], DVec2::new(10., 0.));
	}

	#[test]
	fn concrete_scenario_simplification_tolerance_2() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 4.);
		p.line_to(11., 5.);
		p.line_to(10., 6.);
		p.line_to(10., 10.);
		p.line_to(0., 10.);
		p.close();

		let simplified = p.visvalingam_whyatt(2.0, None);
		let b = simplified.bounds();
		assert_eq!((b.x0, b.y0, b.x1, b.y1), (0., 0., 10., 10.));
	}

	#[test]
	fn concrete_scenario_simplification_tolerance_50_collapses_notch() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 4.);
		p.line_to(11., 5.);
		p.line_to(10., 6.);
		p.line_to(10., 10.);
		p.line_to(0., 10.);
		p.close();

		let simplified = p.visvalingam_whyatt(50.0, None);
		assert_eq!(simplified.coords().len(), 3);
	}

	#[test]
	fn clip_drops_segments_outside_rect_and_stitches_gap() {
		let mut p = Path::new();
		p.move_to(-20., 5.);
		p.line_to(-10., 5.);
		p.line_to(5., 5.);
		p.line_to(20., 5.);
		let clipped = p.clip(0., 0., 10., 10.);
		assert!(clipped.bounds().x0 >= 0.);
	}
}
