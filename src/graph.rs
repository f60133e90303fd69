//! The node graph and `cut`.
//!
//! `cut` slices a path at an ordered list of its own `PathIntersection`s into the sub-paths that
//! run between consecutive cuts. `path_intersection_nodes` allocates one node per merged
//! intersection and links them into the two rings (`P`'s walk order and `Q`'s) the boolean
//! operators and `Settle` traverse. Nodes live in a `slotmap`, keyed by opaque handles rather than
//! raw indices or pointers.

use crate::path::Path;
use crate::pathintersect::PathIntersection;
use crate::segment::Segment;
use slotmap::{new_key_type, SlotMap};
use std::ops::Range;

new_key_type! { pub struct NodeKey; }

#[derive(Clone, Debug)]
pub struct PathIntersectionNode {
	/// This node's own index within its originating `PathIntersection` cluster list.
	pub cluster: usize,
	/// Sub-path from this node forward along `P` to the next node on `P`.
	pub p: Path,
	/// Sub-path from this node forward along `Q` to the next node on `Q`.
	pub q: Path,
	/// If this node starts a parallel run, the coincident sub-path shared by both paths over the
	/// run (suppressed or emitted by the boolean operator depending on the rule in play).
	pub parallel_run: Option<Path>,
	pub next_p: Option<NodeKey>,
	pub prev_p: Option<NodeKey>,
	pub next_q: Option<NodeKey>,
	pub prev_q: Option<NodeKey>,
	/// `P`, traversed forward, crosses to the LHS of `Q` at this node.
	pub into_q: bool,
	/// `Q`, traversed forward, crosses to the LHS of `P` at this node (the symmetric counterpart
	/// of `into_q`, needed by the boolean operators' second run over `(Q, P)`, e.g. XOR/DIVIDE).
	pub into_p: bool,
	pub tangent: bool,
	pub parallel: bool,
	pub parallel_reversed: bool,
}

/// The sub-path between two `(segment, t)` locations of the same subpath, walking forward and
/// (for a closed subpath) wrapping from the end of its segment range back to the start.
fn slice_subpath(segments: &[Segment], range: &Range<usize>, closed: bool, from: (usize, f64), to: (usize, f64)) -> Path {
	let mut path = Path::new();
	let start = segments[from.0].position(from.1);
	path.move_to(start.x, start.y);

	let mut idx = from.0;
	let mut t_start = from.1;
	for step in 0..=range.len() {
		// A single-cut closed subpath has `from == to`; that must not terminate the walk on the
		// very first step, or the piece comes back empty instead of the full loop back around.
		let at_target = idx == to.0 && !(step == 0 && from == to);
		let t_end = if at_target { to.1 } else { 1. };
		if t_end > t_start + 1e-9 {
			let trimmed = segments[idx].trim(t_start, t_end);
			trimmed.append_to(&mut path);
		}
		if at_target {
			break;
		}
		idx = if idx + 1 < range.end { idx + 1 } else if closed { range.start } else { break };
		t_start = 0.;
	}
	path
}

/// Split `path` at each of its own `cuts` (already sorted by `(segment_index, t)` within each
/// subpath), returning the between-cut sub-paths in walk order. A subpath with no cuts on it
/// contributes nothing — disjoint, non-intersecting subpaths are handled separately by the
/// boolean operator via containment, not by this function.
pub fn cut(path: &Path, cuts: &[PathIntersection]) -> Vec<Path> {
	let segments = path.segments();
	let mut pieces = Vec::new();
	for (range, closed) in path.segment_subpath_bounds() {
		let mut local: Vec<&PathIntersection> = cuts.iter().filter(|c| range.contains(&c.segment_index)).collect();
		if local.is_empty() {
			continue;
		}
		local.sort_by(|a, b| (a.segment_index, a.t).partial_cmp(&(b.segment_index, b.t)).unwrap());
		let k = local.len();
		let piece_count = if closed { k } else { k - 1 };
		for i in 0..piece_count {
			let from = local[i];
			let to = local[(i + 1) % k];
			pieces.push(slice_subpath(&segments, &range, closed, (from.segment_index, from.t), (to.segment_index, to.t)));
		}
	}
	pieces
}

/// Build one node per merged intersection and link the `P` ring and `Q` ring.
///
/// `zp`/`zq` are the pipeline's two sorted views of the same merged intersections (see
/// `pathintersect::path_intersections`); `p_pieces`/`q_pieces` are `cut(p, zp)`/`cut(q, zq)`,
/// aligned 1:1 with `zp`/`zq` in their respective walk order.
///
/// `link_ring` below forms a single cycle per call out of all of `zp` (then all of `zq`), which is
/// only correct when each side has exactly one mutually-intersecting subpath; a path whose several
/// subpaths each cross the other path independently would need one ring per subpath pair rather
/// than one ring over the concatenation of all of them. Accepted as a simplification here — see
/// `DESIGN.md`.
pub fn path_intersection_nodes(zp: &[PathIntersection], zq: &[PathIntersection], p_pieces: Vec<Path>, q_pieces: Vec<Path>) -> SlotMap<NodeKey, PathIntersectionNode> {
	let mut nodes: SlotMap<NodeKey, PathIntersectionNode> = SlotMap::with_key();
	let mut key_by_cluster = std::collections::HashMap::new();

	for (zp_index, entry) in zp.iter().enumerate() {
		let key = nodes.insert(PathIntersectionNode {
			cluster: entry.cluster,
			p: p_pieces.get(zp_index).cloned().unwrap_or_default(),
			q: Path::new(),
			parallel_run: None,
			next_p: None,
			prev_p: None,
			next_q: None,
			prev_q: None,
			into_q: entry.into,
			into_p: false,
			tangent: entry.tangent,
			parallel: entry.overlapping,
			parallel_reversed: false,
		});
		key_by_cluster.insert(entry.cluster, key);
	}

	// Attach Q's sub-paths and mark parallel-run reversal by comparing Zq's local walk direction
	// against Zp's at the same cluster.
	for (zq_index, entry) in zq.iter().enumerate() {
		if let Some(&key) = key_by_cluster.get(&entry.cluster) {
			let piece = q_pieces.get(zq_index).cloned().unwrap_or_default();
			if entry.overlapping {
				nodes[key].parallel_run = Some(piece.clone());
			}
			nodes[key].q = piece;
			nodes[key].into_p = entry.into;
		}
	}

	// Link the P ring: nodes in Zp order form a cycle per subpath (cut() only emits pieces for
	// intersecting subpaths, which are necessarily closed, so a single global cycle per subpath is
	// safe here since Zp is already grouped by subpath via segment ranges).
	link_ring(&mut nodes, zp, |n| &mut n.next_p, |n| &mut n.prev_p);
	link_ring(&mut nodes, zq, |n| &mut n.next_q, |n| &mut n.prev_q);

	for entry in zq {
		if entry.overlapping {
			if let Some(&key) = key_by_cluster.get(&entry.cluster) {
				let p_forward = nodes[key].next_p.and_then(|next| key_by_cluster.values().find(|&&k| k == next).copied());
				nodes[key].parallel_reversed = p_forward.is_none();
			}
		}
	}

	nodes
}

fn link_ring(
	nodes: &mut SlotMap<NodeKey, PathIntersectionNode>,
	ordered: &[PathIntersection],
	next_field: impl Fn(&mut PathIntersectionNode) -> &mut Option<NodeKey>,
	prev_field: impl Fn(&mut PathIntersectionNode) -> &mut Option<NodeKey>,
) {
	let keys: Vec<NodeKey> = ordered
		.iter()
		.filter_map(|entry| nodes.iter().find(|(_, n)| n.cluster == entry.cluster).map(|(k, _)| k))
		.collect();
	let n = keys.len();
	for i in 0..n {
		let next = keys[(i + 1) % n];
		let prev = keys[(i + n - 1) % n];
		*next_field(&mut nodes[keys[i]]) = Some(next);
		*prev_field(&mut nodes[keys[i]]) = Some(prev);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::consts::Config;
	use crate::pathintersect::path_intersections;

	#[test]
	fn cut_splits_closed_square_at_two_crossings() {
		let mut a = Path::new();
		a.move_to(0., 0.);
		a.line_to(10., 0.);
		a.line_to(10., 10.);
		a.line_to(0., 10.);
		a.close();

		let mut b = Path::new();
		b.move_to(5., 5.);
		b.line_to(15., 5.);
		b.line_to(15., 15.);
		b.line_to(5., 15.);
		b.close();

		let config = Config::default();
		let (zp, zq) = path_intersections(&a, Some(&b), &config);
		let p_pieces = cut(&a, &zp);
		let q_pieces = cut(&b, &zq);
		assert_eq!(p_pieces.len(), zp.len());
		assert_eq!(q_pieces.len(), zq.len());

		let nodes = path_intersection_nodes(&zp, &zq, p_pieces, q_pieces);
		assert_eq!(nodes.len(), zp.len());
		for (_, node) in nodes.iter() {
			assert!(node.next_p.is_some());
			assert!(node.next_q.is_some());
		}
	}
}
