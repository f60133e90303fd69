//! Path-level intersection pipeline.
//!
//! Segment-pair kernels (`crate::intersect`) only know about two bare curves; this module walks
//! every segment of `P` against every segment of `Q` (or `P` against itself), merges the raw hits
//! that a shared endpoint necessarily reports more than once, and resolves each merged point's
//! crossing/tangent classification from the LHS angle wedge of `Q`.
//!
//! Rather than reconstructing a touched endpoint's true neighbor from possibly-incomplete raw
//! hits, this implementation looks the neighbor up directly from the path's own command
//! structure: the segment before/after the touched one is always known, whether or not it
//! happened to also register a hit. That sidesteps a whole class of missing-half-of-a-pair
//! failure modes that a post-hoc repair pass would otherwise have to patch.

use crate::consts::Config;
use crate::intersect::{self, Intersection};
use crate::path::Path;
use crate::point::{aligned, anti_aligned, angle_in_wedge, normalize_angle, PointExt};
use crate::segment::Segment;
use glam::DVec2;
use std::ops::Range;

/// One resolved intersection of a path with another (or with itself).
#[derive(Clone, Debug, PartialEq)]
pub struct PathIntersection {
	pub position: DVec2,
	pub segment_index: usize,
	pub t: f64,
	pub direction: f64,
	/// This path, traversed forward, crosses to the LHS of the other path at this point.
	pub into: bool,
	/// The paths touch without crossing.
	pub tangent: bool,
	/// The two paths run coincident from this point forward until the next `PathIntersection`.
	pub overlapping: bool,
	/// Identifies which merged intersection this is, stable across `Zp`'s and `Zq`'s independent
	/// sort orders, so the node graph can pair up a `Zp` entry with its `Zq` counterpart.
	pub cluster: usize,
}

struct RawHit {
	seg_p: usize,
	t_p: f64,
	dir_p: f64,
	seg_q: usize,
	t_q: f64,
	dir_q: f64,
	position: DVec2,
}

/// Topology helper: given a path's segments and its per-subpath `(range, closed)` bounds, find the
/// forward-tangent direction leaving a touched point, and the back-direction (reverse tangent)
/// arriving at it — looking past the touched segment's own endpoint into its real neighbor when
/// the touch point is itself a vertex.
struct Topology<'a> {
	segments: &'a [Segment],
	bounds: Vec<(Range<usize>, bool)>,
}

impl<'a> Topology<'a> {
	fn new(segments: &'a [Segment], bounds: Vec<(Range<usize>, bool)>) -> Self {
		Topology { segments, bounds }
	}

	fn subpath_of(&self, seg: usize) -> &(Range<usize>, bool) {
		self.bounds.iter().find(|(range, _)| range.contains(&seg)).expect("segment index must belong to some subpath")
	}

	fn next_segment(&self, seg: usize) -> Option<usize> {
		let (range, closed) = self.subpath_of(seg);
		if seg + 1 < range.end {
			Some(seg + 1)
		} else if *closed {
			Some(range.start)
		} else {
			None
		}
	}

	fn prev_segment(&self, seg: usize) -> Option<usize> {
		let (range, closed) = self.subpath_of(seg);
		if seg > range.start {
			Some(seg - 1)
		} else if *closed {
			Some(range.end - 1)
		} else {
			None
		}
	}

	/// Forward tangent direction leaving `(seg, t)`.
	fn outbound(&self, seg: usize, t: f64, eps: f64) -> f64 {
		if t > 1. - eps {
			if let Some(next) = self.next_segment(seg) {
				return angle(self.segments[next].derivative(0.));
			}
		}
		angle(self.segments[seg].derivative(t.clamp(0., 1.)))
	}

	/// Back-direction (reverse of the forward tangent) arriving at `(seg, t)`.
	fn inbound_back(&self, seg: usize, t: f64, eps: f64) -> f64 {
		if t < eps {
			if let Some(prev) = self.prev_segment(seg) {
				return normalize_angle(angle(self.segments[prev].derivative(1.)) + std::f64::consts::PI);
			}
		}
		normalize_angle(angle(self.segments[seg].derivative(t.clamp(0., 1.))) + std::f64::consts::PI)
	}
}

fn angle(d: DVec2) -> f64 {
	normalize_angle(d.y.atan2(d.x))
}

/// Intersect `p` against `q`. `q = None` requests self-intersection (adjacent segments of the
/// same subpath are skipped, since they necessarily share an endpoint).
///
/// Returns `(Zp, Zq)`: the same merged intersections, `Zp` sorted along `P` by `(segment, t)`,
/// `Zq` sorted along `Q` by `(segment, t)`, with matching indices naming the same geometric point.
pub fn path_intersections(p: &Path, q: Option<&Path>, config: &Config) -> (Vec<PathIntersection>, Vec<PathIntersection>) {
	let eps = config.epsilon;
	let self_intersect = q.is_none();
	let p_segments = p.segments();
	let q_segments = if let Some(q) = q { q.segments() } else { p_segments.clone() };

	let mut raw = Vec::new();
	for (i, seg_p) in p_segments.iter().enumerate() {
		for (j, seg_q) in q_segments.iter().enumerate() {
			if self_intersect && adjacent(p, i, j) {
				continue;
			}
			if self_intersect && j <= i {
				continue;
			}
			let Ok(hits) = intersect::intersect(seg_p, seg_q, eps) else { continue };
			for hit in hits {
				raw.push(RawHit {
					seg_p: i,
					t_p: hit.t_a,
					dir_p: hit.dir_a,
					seg_q: j,
					t_q: hit.t_b,
					dir_q: hit.dir_b,
					position: hit.position,
				});
			}
		}
	}

	// Step 2/3: cluster raw hits by position (an endpoint touch is reported once per adjacent
	// segment, up to four times at a mutual endpoint) and resolve each cluster to one merged pair.
	let clusters = cluster_by_position(raw, eps);

	let p_topology = Topology::new(&p_segments, p.segment_subpath_bounds());
	let q_topology = Topology::new(&q_segments, if self_intersect { p.segment_subpath_bounds() } else { q.unwrap().segment_subpath_bounds() });

	let mut merged: Vec<(PathIntersection, PathIntersection)> = clusters
		.into_iter()
		.enumerate()
		.map(|(id, cluster)| resolve_cluster(id, cluster, &p_topology, &q_topology, eps))
		.collect();

	// Step 2: stable sort by (segment, t) on each side independently.
	merged.sort_by(|a, b| cmp_seg_t(&a.0, &b.0));
	let mut zq_order: Vec<usize> = (0..merged.len()).collect();
	zq_order.sort_by(|&a, &b| cmp_seg_t(&merged[a].1, &merged[b].1));

	// Step 4: collapse parallel/overlap runs, walking in P order.
	mark_parallel_runs(&mut merged, eps);

	let zp: Vec<PathIntersection> = merged.iter().map(|(p, _)| p.clone()).collect();
	let zq: Vec<PathIntersection> = zq_order.iter().map(|&i| merged[i].1.clone()).collect();
	(zp, zq)
}

fn cmp_seg_t(a: &PathIntersection, b: &PathIntersection) -> std::cmp::Ordering {
	(a.segment_index, a.t).partial_cmp(&(b.segment_index, b.t)).unwrap_or(std::cmp::Ordering::Equal)
}

/// Whether segments `i` (in `p`) and `j` are adjacent within the same subpath of a self-intersect
/// query, and therefore share an endpoint that must not be reported as a crossing.
fn adjacent(p: &Path, i: usize, j: usize) -> bool {
	if i == j {
		return true;
	}
	let bounds = p.segment_subpath_bounds();
	let Some((range, closed)) = bounds.iter().find(|(r, _)| r.contains(&i)) else { return false };
	if !range.contains(&j) {
		return false;
	}
	if i.abs_diff(j) == 1 {
		return true;
	}
	*closed && ((i == range.start && j == range.end - 1) || (j == range.start && i == range.end - 1))
}

fn cluster_by_position(raw: Vec<RawHit>, eps: f64) -> Vec<Vec<RawHit>> {
	let mut clusters: Vec<Vec<RawHit>> = Vec::new();
	'hit: for hit in raw {
		for cluster in clusters.iter_mut() {
			if cluster[0].position.distance(hit.position) < eps.max(1e-7) {
				cluster.push(hit);
				continue 'hit;
			}
		}
		clusters.push(vec![hit]);
	}
	clusters
}

/// Pick the canonical `(segment, t)` representative for one side of a cluster: an interior touch
/// if one exists (there can only be one), else the start-of-segment form over the end-of-segment
/// form, so a vertex touch is always named by the segment it *begins*.
fn canonical_side(entries: &[(usize, f64, f64)], eps: f64) -> (usize, f64, f64) {
	if let Some(&e) = entries.iter().find(|(_, t, _)| *t > eps && *t < 1. - eps) {
		return e;
	}
	if let Some(&e) = entries.iter().find(|(_, t, _)| *t <= eps) {
		return e;
	}
	entries[0]
}

fn resolve_cluster(id: usize, cluster: Vec<RawHit>, p_topology: &Topology, q_topology: &Topology, eps: f64) -> (PathIntersection, PathIntersection) {
	let position = cluster[0].position;
	let p_entries: Vec<(usize, f64, f64)> = cluster.iter().map(|h| (h.seg_p, h.t_p, h.dir_p)).collect();
	let q_entries: Vec<(usize, f64, f64)> = cluster.iter().map(|h| (h.seg_q, h.t_q, h.dir_q)).collect();
	let (seg_p, t_p, dir_p) = canonical_side(&p_entries, eps);
	let (seg_q, t_q, dir_q) = canonical_side(&q_entries, eps);

	let p_out = p_topology.outbound(seg_p, t_p, eps);
	let p_in_back = p_topology.inbound_back(seg_p, t_p, eps);
	let q_out = q_topology.outbound(seg_q, t_q, eps);
	let q_in_back = q_topology.inbound_back(seg_q, t_q, eps);

	// LHS wedge of Q at this point: `(q_out, q_out + sweep)` where `sweep` brings `q_in_back`
	// around to coincide with `q_out` going counter-clockwise.
	let sweep = normalize_angle(q_in_back + std::f64::consts::PI - q_out);
	let p_out_inside = angle_in_wedge(p_out, q_out, sweep);
	let p_in_inside = angle_in_wedge(p_in_back, q_out, sweep);

	let any_endpoint = cluster.iter().any(|h| crate::intersect::at_endpoint(h.t_p, eps) || crate::intersect::at_endpoint(h.t_q, eps));
	let runs_parallel = aligned(p_out, q_out, 1e-6) || anti_aligned(p_out, q_out, 1e-6);
	let tangent = any_endpoint && (p_out_inside == p_in_inside || runs_parallel);
	let into = !tangent && p_out_inside;

	let p_side = PathIntersection {
		position,
		segment_index: seg_p,
		t: t_p,
		direction: dir_p,
		into,
		tangent,
		overlapping: false,
		cluster: id,
	};
	let q_side = PathIntersection {
		position,
		segment_index: seg_q,
		t: t_q,
		direction: dir_q,
		into: !into && !tangent,
		tangent,
		overlapping: false,
		cluster: id,
	};
	(p_side, q_side)
}

/// Step 4: a parallel run begins at a merged point where `P`'s and `Q`'s outbound directions are
/// aligned or anti-aligned, and continues (in `P`-order) until the first point where that ceases.
fn mark_parallel_runs(merged: &mut [(PathIntersection, PathIntersection)], _eps: f64) {
	let parallel_at = |merged: &[(PathIntersection, PathIntersection)], idx: usize| -> bool {
		aligned(merged[idx].0.direction, merged[idx].1.direction, 1e-6) || anti_aligned(merged[idx].0.direction, merged[idx].1.direction, 1e-6)
	};
	let n = merged.len();
	let mut i = 0;
	while i < n {
		let mut k = i;
		while k + 1 < n && parallel_at(merged, k) {
			k += 1;
		}
		if k > i {
			merged[i].0.overlapping = true;
			merged[i].0.tangent = true;
			merged[i].1.overlapping = true;
			merged[i].1.tangent = true;
			merged[k].0.tangent = true;
			merged[k].1.tangent = true;
			i = k + 1;
		} else {
			i += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path::Path;

	#[test]
	fn crossing_squares_report_matching_intersection_counts() {
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
		assert_eq!(zp.len(), zq.len());
		assert_eq!(zp.len(), 2);
	}

	#[test]
	fn self_intersecting_figure_eight_finds_one_crossing() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 10.);
		p.line_to(10., 0.);
		p.line_to(0., 10.);
		p.close();

		let config = Config::default();
		let (zp, _) = path_intersections(&p, None, &config);
		assert_eq!(zp.len(), 1);
	}
}
