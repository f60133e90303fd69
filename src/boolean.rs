//! Boolean operators (AND/OR/XOR/NOT/DIVIDE).
//!
//! All five share one traversal skeleton over the node graph built by `graph::path_intersection_nodes`:
//! each is just a different `(startInwards, invertP, invertQ)` directive, plus for XOR/DIVIDE a
//! second run with the roles of P and Q swapped. Subpaths that never intersected the other path are
//! handled separately by containment (the disjoint-subpath rule), and open P subpaths are sliced
//! and kept/dropped piece-by-piece rather than walked as rings.

use crate::consts::{Config, FillRule};
use crate::graph::{self, NodeKey, PathIntersectionNode};
use crate::pathintersect::path_intersections;
use crate::path::Path;
use slotmap::SlotMap;
use std::collections::HashSet;
use std::ops::Range;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoolOp {
	And,
	Or,
	Xor,
	Not,
	Divide,
}

/// One `(startInwards, invertP, invertQ)` run directive for a single traversal pass.
#[derive(Copy, Clone)]
pub(crate) struct Directive {
	pub(crate) start_inwards: bool,
	pub(crate) invert_p: bool,
	pub(crate) invert_q: bool,
}

fn directives(op: BoolOp) -> (Directive, Option<Directive>) {
	match op {
		BoolOp::And => (
			Directive { start_inwards: true, invert_p: true, invert_q: false },
			None,
		),
		BoolOp::Or => (
			Directive { start_inwards: false, invert_p: false, invert_q: true },
			None,
		),
		BoolOp::Not => (
			Directive { start_inwards: false, invert_p: false, invert_q: false },
			None,
		),
		BoolOp::Xor => (
			Directive { start_inwards: false, invert_p: false, invert_q: false },
			Some(Directive { start_inwards: false, invert_p: false, invert_q: false }),
		),
		BoolOp::Divide => (
			Directive { start_inwards: false, invert_p: false, invert_q: false },
			Some(Directive { start_inwards: true, invert_p: true, invert_q: false }),
		),
	}
}

/// `P op Q`, as a single (possibly multi-subpath) `Path`.
pub fn boolean(p: &Path, q: &Path, op: BoolOp, config: &Config) -> Path {
	let pieces = boolean_pieces(p, q, op, config);
	concat(pieces)
}

/// `p.divide(q)`: the pieces of `p` that lie inside `q` and the pieces that lie outside it, kept
/// separate rather than concatenated (unlike the other four operators, `Divide`'s contract is a
/// partition, not a single region).
pub fn divide(p: &Path, q: &Path, config: &Config) -> Vec<Path> {
	boolean_pieces(p, q, BoolOp::Divide, config)
}

fn concat(pieces: Vec<Path>) -> Path {
	let mut out = Path::new();
	for piece in pieces {
		for cmd in piece.commands() {
			append_cmd(&mut out, cmd);
		}
	}
	out
}

fn append_cmd(out: &mut Path, cmd: crate::path::Cmd) {
	use crate::path::Cmd;
	match cmd {
		Cmd::MoveTo(p) => out.move_to(p.x, p.y),
		Cmd::LineTo(p) => out.line_to(p.x, p.y),
		Cmd::QuadTo { control, end } => out.quad_to(control.x, control.y, end.x, end.y),
		Cmd::CubeTo { c1, c2, end } => out.cube_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y),
		Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => out.arc_to(rx, ry, phi.to_degrees(), large_arc, sweep, end.x, end.y),
		Cmd::Close { .. } => out.close(),
	}
}

fn boolean_pieces(p: &Path, q: &Path, op: BoolOp, config: &Config) -> Vec<Path> {
	log::debug!("boolean {op:?}: p has {} subpaths, q has {}", p.subpaths().len(), q.subpaths().len());
	let (zp, zq) = path_intersections(p, Some(q), config);

	let mut closed_rings = Vec::new();
	if !zp.is_empty() {
		let p_pieces = graph::cut(p, &zp);
		let q_pieces = graph::cut(q, &zq);
		let nodes = graph::path_intersection_nodes(&zp, &zq, p_pieces, q_pieces);

		let (run1, run2) = directives(op);
		let mut visited = HashSet::new();
		closed_rings.extend(traverse(&nodes, run1, false, &mut visited));
		if let Some(run2) = run2 {
			closed_rings.extend(traverse(&nodes, run2, true, &mut visited));
		}
	}

	let touched_p = touched_segment_ranges(&zp, &p.segment_subpath_bounds());
	let touched_q = touched_segment_ranges(&zq, &q.segment_subpath_bounds());

	let mut out = closed_rings;
	out.extend(untouched_closed_subpaths(p, q, &touched_p, op, config, Role::P));
	out.extend(untouched_closed_subpaths(q, p, &touched_q, op, config, Role::Q));
	out.extend(open_p_subpath_pieces(p, q, op, config));
	out
}

#[derive(Copy, Clone, PartialEq)]
enum Role {
	P,
	Q,
}

/// Which segment ranges (per-subpath, closed only) of `path` own at least one merged intersection.
fn touched_segment_ranges(z: &[crate::pathintersect::PathIntersection], bounds: &[(Range<usize>, bool)]) -> Vec<bool> {
	bounds
		.iter()
		.map(|(range, _)| z.iter().any(|hit| range.contains(&hit.segment_index)))
		.collect()
}

/// One physical path's (`P`'s or `Q`'s) view into a node: its own crossing flag and its forward/
/// backward links, read uniformly so `traverse` doesn't have to branch on which physical path a
/// logical role currently names.
struct PhysicalView {
	own_flag: bool,
	piece: Path,
	next: Option<NodeKey>,
	prev: Option<NodeKey>,
}

fn physical_view(node: &PathIntersectionNode, is_p: bool) -> PhysicalView {
	if is_p {
		PhysicalView { own_flag: node.into_q, piece: node.p.clone(), next: node.next_p, prev: node.prev_p }
	} else {
		PhysicalView { own_flag: node.into_p, piece: node.q.clone(), next: node.next_q, prev: node.prev_q }
	}
}

/// Walk the node graph under `directive`. `swapped` runs the traversal over `(Q, P)` instead of
/// `(P, Q)` (the second run of XOR/DIVIDE): "logical P" (the path `directive.invert_p`/
/// `start_inwards` refer to) is physical `Q` when `swapped`, physical `P` otherwise.
pub(crate) fn traverse(nodes: &SlotMap<NodeKey, PathIntersectionNode>, directive: Directive, swapped: bool, visited: &mut HashSet<NodeKey>) -> Vec<Path> {
	let mut rings = Vec::new();
	let keys: Vec<NodeKey> = nodes.keys().collect();
	// Logical P is physical P unless this is the swapped (Q, P) run.
	let logical_p_is_physical_p = !swapped;

	for &start in &keys {
		if visited.contains(&start) {
			continue;
		}
		// A node whose parallel-tangent neighbour keeps the traversal on the same side never starts
		// a new ring of its own.
		if nodes[start].tangent && nodes[start].parallel {
			continue;
		}

		let mut ring = Path::new();
		let mut current = start;
		let mut on_logical_p = directive.start_inwards ^ physical_view(&nodes[current], logical_p_is_physical_p).own_flag;
		let mut first = true;
		let mut steps = 0usize;
		let guard = nodes.len() * 4 + 4;

		loop {
			if steps > guard {
				log::warn!("boolean traversal exceeded node-graph size guard, aborting ring");
				break;
			}
			steps += 1;
			visited.insert(current);
			let node = &nodes[current];
			let is_physical_p = on_logical_p == logical_p_is_physical_p;
			let view = physical_view(node, is_physical_p);
			let invert = if on_logical_p { directive.invert_p } else { directive.invert_q };
			let forward = invert ^ view.own_flag;

			let (piece, next) = if forward {
				(Some(view.piece), view.next)
			} else {
				(view.prev.map(|k| physical_view(&nodes[k], is_physical_p).piece), view.prev)
			};
			let parallel_piece = if forward { forward_parallel(node) } else { None };

			if let Some(piece) = piece {
				if first {
					let start_point = if forward { piece.segments().first().map(|s| s.start()) } else { piece.segments().last().map(|s| s.end()) };
					if let Some(start_point) = start_point {
						ring.move_to(start_point.x, start_point.y);
					}
					first = false;
				}
				append_ring_piece(&mut ring, &piece, forward);
			}
			if let Some(run) = parallel_piece {
				append_ring_piece(&mut ring, &run, true);
			}

			let Some(next) = next else { break };
			current = next;
			on_logical_p = !on_logical_p;
			if current == start {
				break;
			}
		}

		if !ring.is_empty() {
			ring.close();
			rings.push(ring);
		}
	}
	rings
}

/// A node's parallel sub-path, emitted only when walking forward along the run in the same
/// direction the run was recorded; skipped on a reversed traversal of the run.
fn forward_parallel(node: &PathIntersectionNode) -> Option<Path> {
	if node.parallel && !node.parallel_reversed {
		node.parallel_run.clone()
	} else {
		None
	}
}

fn append_ring_piece(ring: &mut Path, piece: &Path, forward: bool) {
	let oriented = if forward { piece.clone() } else { piece.reverse() };
	for segment in oriented.segments() {
		segment.append_to(ring);
	}
}

/// Subpaths of `subject` that never intersected `other`: kept, dropped, or reversed purely by
/// containment.
fn untouched_closed_subpaths(subject: &Path, other: &Path, touched: &[bool], op: BoolOp, config: &Config, role: Role) -> Vec<Path> {
	let mut out = Vec::new();
	for (i, subpath) in subject.subpaths().into_iter().enumerate() {
		if !subpath.closed() || touched.get(i).copied().unwrap_or(false) {
			continue;
		}
		let probe = leftmost_point(&subpath);
		let inside_other = probe.map(|p| other.interior(p.x, p.y, FillRule::NonZero, config)).unwrap_or(false);

		let keep = match (op, role) {
			(BoolOp::And, Role::P) | (BoolOp::And, Role::Q) => inside_other,
			(BoolOp::Or, _) => true,
			(BoolOp::Xor, _) => true,
			(BoolOp::Not, Role::P) => true,
			(BoolOp::Not, Role::Q) => inside_other,
			(BoolOp::Divide, Role::P) => true,
			(BoolOp::Divide, Role::Q) => inside_other,
		};
		if !keep {
			continue;
		}
		let reverse = match (op, role) {
			(BoolOp::Xor, _) if inside_other => true,
			(BoolOp::Not, Role::Q) => true,
			(BoolOp::Divide, Role::Q) => true,
			_ => false,
		};
		out.push(if reverse { subpath.reverse() } else { subpath });
	}
	out
}

fn leftmost_point(subpath: &Path) -> Option<glam::DVec2> {
	subpath.coords().into_iter().min_by(|a, b| a.x.partial_cmp(&b.x).unwrap())
}

/// Slice every open subpath of `p` at its intersections with `q` (treated as closed for this
/// purpose), keeping pieces by "inside Q" vs "outside Q" per the operator.
fn open_p_subpath_pieces(p: &Path, q: &Path, op: BoolOp, config: &Config) -> Vec<Path> {
	let mut out = Vec::new();
	for subpath in p.subpaths() {
		if subpath.closed() {
			continue;
		}
		let (zp, _) = path_intersections(&subpath, Some(q), config);
		if zp.is_empty() {
			let probe = subpath.segments().first().map(|s| s.start());
			let inside = probe.map(|pt| q.interior(pt.x, pt.y, FillRule::NonZero, config)).unwrap_or(false);
			if keep_open_piece(op, inside) {
				out.push(subpath);
			}
			continue;
		}

		let mut cuts: Vec<f64> = Vec::new();
		let segments = subpath.segments();
		let mut sorted = zp.clone();
		sorted.sort_by(|a, b| (a.segment_index, a.t).partial_cmp(&(b.segment_index, b.t)).unwrap());
		for hit in &sorted {
			let mut length: f64 = segments[..hit.segment_index].iter().map(|s| s.length()).sum();
			length += segments[hit.segment_index].split(hit.t).0.length();
			cuts.push(length);
		}

		let pieces = subpath.split_at(&cuts);
		let mut inside = {
			let probe = pieces.first().and_then(|piece| piece.segments().first().map(|s| s.start()));
			probe.map(|pt| q.interior(pt.x, pt.y, FillRule::NonZero, config)).unwrap_or(false)
		};
		for (i, piece) in pieces.into_iter().enumerate() {
			let toggles = i > 0 && !sorted.get(i - 1).map(|h| h.tangent).unwrap_or(false);
			if toggles {
				inside = !inside;
			}
			if keep_open_piece(op, inside) {
				out.push(piece);
			}
		}
	}
	out
}

fn keep_open_piece(op: BoolOp, inside_q: bool) -> bool {
	match op {
		BoolOp::And => inside_q,
		BoolOp::Or | BoolOp::Xor | BoolOp::Not => !inside_q,
		BoolOp::Divide => true,
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
	fn and_of_overlapping_squares_is_nonempty_and_inside_both() {
		let a = square(0., 0., 10.);
		let b = square(5., 5., 10.);
		let config = Config::default();
		let result = boolean(&a, &b, BoolOp::And, &config);
		assert!(!result.is_empty());
		assert!(result.interior(7.5, 7.5, FillRule::NonZero, &config));
	}

	#[test]
	fn or_of_disjoint_squares_keeps_both() {
		let a = square(0., 0., 10.);
		let b = square(100., 100., 10.);
		let config = Config::default();
		let result = boolean(&a, &b, BoolOp::Or, &config);
		assert!(result.interior(5., 5., FillRule::NonZero, &config));
		assert!(result.interior(105., 105., FillRule::NonZero, &config));
	}

	#[test]
	fn not_of_fully_contained_hole_leaves_donut() {
		let outer = square(0., 0., 20.);
		let inner = square(5., 5., 10.);
		let config = Config::default();
		let result = boolean(&outer, &inner, BoolOp::Not, &config);
		assert!(result.interior(2., 2., FillRule::NonZero, &config));
		assert!(!result.interior(10., 10., FillRule::NonZero, &config));
	}

	#[test]
	fn divide_partitions_subject_into_and_and_not_pieces() {
		let a = square(0., 0., 10.);
		let b = square(5., 5., 10.);
		let config = Config::default();
		let pieces = divide(&a, &b, &config);
		assert!(!pieces.is_empty());
	}
}
