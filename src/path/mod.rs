//! `Path`: a single contiguous buffer of binary64 tokens encoding a command sequence.
//!
//! Keeps the whole path in one `Vec<f64>`, framed so a cursor can walk it forwards or backwards
//! without an auxiliary index, the same way `Bezier`'s handles live in one small enum rather than
//! three separate structs. Submodules add behavior (builders, queries, transforms, flattening,
//! simplification, parsing, emission) the same way `bezier.rs` grows a single `impl Bezier` block
//! across concerns.

mod builder;
mod emit;
mod flatten;
mod parser;
mod query;
mod simplify;
mod transform;

pub use emit::EmitTarget;
pub use parser::MustParse;

use crate::arc::EllipticalArc;
use crate::bezier::Bezier;
use crate::error::PathResult;
use crate::segment::Segment;
use glam::DVec2;
use std::ops::Range;

const TAG_MOVE_TO: f64 = 0.;
const TAG_LINE_TO: f64 = 1.;
const TAG_QUAD_TO: f64 = 2.;
const TAG_CUBE_TO: f64 = 3.;
const TAG_ARC_TO: f64 = 4.;
const TAG_CLOSE: f64 = 5.;

/// A decoded command, independent of its position in the token buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Cmd {
	MoveTo(DVec2),
	LineTo(DVec2),
	QuadTo { control: DVec2, end: DVec2 },
	CubeTo { c1: DVec2, c2: DVec2, end: DVec2 },
	ArcTo {
		rx: f64,
		ry: f64,
		phi: f64,
		large_arc: bool,
		sweep: bool,
		end: DVec2,
	},
	Close { start: DVec2 },
}

impl Cmd {
	/// The number of tokens this command occupies in the buffer, including its framing markers.
	pub fn token_len(&self) -> usize {
		match self {
			Cmd::MoveTo(_) | Cmd::LineTo(_) | Cmd::Close { .. } => 4,
			Cmd::QuadTo { .. } => 6,
			Cmd::CubeTo { .. } => 8,
			Cmd::ArcTo { .. } => 8,
		}
	}

	/// The on-curve endpoint this command advances the pen to.
	pub fn end_point(&self) -> DVec2 {
		match *self {
			Cmd::MoveTo(p) | Cmd::LineTo(p) => p,
			Cmd::QuadTo { end, .. } | Cmd::CubeTo { end, .. } | Cmd::ArcTo { end, .. } => end,
			Cmd::Close { start } => start,
		}
	}
}

fn pack_flags(large_arc: bool, sweep: bool) -> f64 {
	(large_arc as u8 as f64) + (sweep as u8 as f64) * 2.
}

fn unpack_flags(flags: f64) -> (bool, bool) {
	let bits = flags.round() as i32;
	(bits & 1 != 0, bits & 2 != 0)
}

/// Decode the command starting at `offset`, returning it along with its token length.
fn decode_at(data: &[f64], offset: usize) -> (Cmd, usize) {
	let tag = data[offset];
	if tag == TAG_MOVE_TO {
		(Cmd::MoveTo(DVec2::new(data[offset + 1], data[offset + 2])), 4)
	} else if tag == TAG_LINE_TO {
		(Cmd::LineTo(DVec2::new(data[offset + 1], data[offset + 2])), 4)
	} else if tag == TAG_QUAD_TO {
		(
			Cmd::QuadTo {
				control: DVec2::new(data[offset + 1], data[offset + 2]),
				end: DVec2::new(data[offset + 3], data[offset + 4]),
			},
			6,
		)
	} else if tag == TAG_CUBE_TO {
		(
			Cmd::CubeTo {
				c1: DVec2::new(data[offset + 1], data[offset + 2]),
				c2: DVec2::new(data[offset + 3], data[offset + 4]),
				end: DVec2::new(data[offset + 5], data[offset + 6]),
			},
			8,
		)
	} else if tag == TAG_ARC_TO {
		let (large_arc, sweep) = unpack_flags(data[offset + 4]);
		(
			Cmd::ArcTo {
				rx: data[offset + 1],
				ry: data[offset + 2],
				phi: data[offset + 3],
				large_arc,
				sweep,
				end: DVec2::new(data[offset + 5], data[offset + 6]),
			},
			8,
		)
	} else if tag == TAG_CLOSE {
		(Cmd::Close { start: DVec2::new(data[offset + 1], data[offset + 2]) }, 4)
	} else {
		unreachable!("corrupt path buffer: unknown command tag {tag}")
	}
}

fn encode(cmd: &Cmd, out: &mut Vec<f64>) {
	match *cmd {
		Cmd::MoveTo(p) => out.extend_from_slice(&[TAG_MOVE_TO, p.x, p.y, TAG_MOVE_TO]),
		Cmd::LineTo(p) => out.extend_from_slice(&[TAG_LINE_TO, p.x, p.y, TAG_LINE_TO]),
		Cmd::QuadTo { control, end } => out.extend_from_slice(&[TAG_QUAD_TO, control.x, control.y, end.x, end.y, TAG_QUAD_TO]),
		Cmd::CubeTo { c1, c2, end } => out.extend_from_slice(&[TAG_CUBE_TO, c1.x, c1.y, c2.x, c2.y, end.x, end.y, TAG_CUBE_TO]),
		Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => {
			out.extend_from_slice(&[TAG_ARC_TO, rx, ry, phi, pack_flags(large_arc, sweep), end.x, end.y, TAG_ARC_TO]);
		}
		Cmd::Close { start } => out.extend_from_slice(&[TAG_CLOSE, start.x, start.y, TAG_CLOSE]),
	}
}

/// An event emitted while walking a `Path`, for consumers (rasterizers, debuggers) that would
/// rather not depend on the token-buffer layout directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WalkEvent {
	MoveTo(DVec2),
	LineTo(DVec2),
	QuadTo { control: DVec2, end: DVec2 },
	CubeTo { c1: DVec2, c2: DVec2, end: DVec2 },
	ArcTo {
		rx: f64,
		ry: f64,
		phi: f64,
		large_arc: bool,
		sweep: bool,
		end: DVec2,
	},
	Close,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
	data: Vec<f64>,
}

impl Path {
	pub fn new() -> Self {
		Path { data: Vec::new() }
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Parse SVG path-data syntax (the `d` attribute grammar) into a `Path`.
	pub fn parse(svg_path_data: &str) -> PathResult<Path> {
		parser::parse(svg_path_data)
	}

	/// Iterate decoded commands in forward order.
	pub fn commands(&self) -> impl Iterator<Item = Cmd> + '_ {
		let mut offset = 0;
		std::iter::from_fn(move || {
			if offset >= self.data.len() {
				return None;
			}
			let (cmd, len) = decode_at(&self.data, offset);
			offset += len;
			Some(cmd)
		})
	}

	/// Iterate decoded commands in reverse order, using each command's trailing framing marker to
	/// find its start without a forward scan.
	pub fn commands_rev(&self) -> impl Iterator<Item = Cmd> + '_ {
		let mut end = self.data.len();
		std::iter::from_fn(move || {
			if end == 0 {
				return None;
			}
			let tag = self.data[end - 1];
			let probe_len = if tag == TAG_QUAD_TO { 6 } else if tag == TAG_CUBE_TO || tag == TAG_ARC_TO { 8 } else { 4 };
			let start = end - probe_len;
			let (cmd, len) = decode_at(&self.data, start);
			debug_assert_eq!(len, probe_len);
			end = start;
			Some(cmd)
		})
	}

	/// Visit every command via `WalkEvent`, without exposing the token buffer.
	pub fn walk(&self, mut visitor: impl FnMut(WalkEvent)) {
		for cmd in self.commands() {
			let event = match cmd {
				Cmd::MoveTo(p) => WalkEvent::MoveTo(p),
				Cmd::LineTo(p) => WalkEvent::LineTo(p),
				Cmd::QuadTo { control, end } => WalkEvent::QuadTo { control, end },
				Cmd::CubeTo { c1, c2, end } => WalkEvent::CubeTo { c1, c2, end },
				Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => WalkEvent::ArcTo { rx, ry, phi, large_arc, sweep, end },
				Cmd::Close { .. } => WalkEvent::Close,
			};
			visitor(event);
		}
	}

	fn last_cmd(&self) -> Option<Cmd> {
		if self.data.is_empty() {
			return None;
		}
		let tag = *self.data.last().unwrap();
		let probe_len = if tag == TAG_QUAD_TO { 6 } else if tag == TAG_CUBE_TO || tag == TAG_ARC_TO { 8 } else { 4 };
		let start = self.data.len() - probe_len;
		Some(decode_at(&self.data, start).0)
	}

	fn truncate_last(&mut self, token_len: usize) {
		let new_len = self.data.len() - token_len;
		self.data.truncate(new_len);
	}

	fn push(&mut self, cmd: Cmd) {
		encode(&cmd, &mut self.data);
	}

	/// The current pen position (the last command's endpoint), or the origin for an empty path.
	pub fn position(&self) -> DVec2 {
		self.last_cmd().map(|c| c.end_point()).unwrap_or(DVec2::ZERO)
	}

	/// The start point of the subpath currently being built (the most recent `MoveTo`).
	pub fn start_pos(&self) -> DVec2 {
		self.current_subpath_start().unwrap_or(DVec2::ZERO)
	}

	fn current_subpath_start(&self) -> Option<DVec2> {
		self.commands_rev().find_map(|c| match c {
			Cmd::MoveTo(p) => Some(p),
			_ => None,
		})
	}

	/// The number of commands (not tokens) in the buffer.
	pub fn len(&self) -> usize {
		self.commands().count()
	}

	/// Whether the current (last) subpath ends in `Close`.
	pub fn closed(&self) -> bool {
		matches!(self.last_cmd(), Some(Cmd::Close { .. }))
	}

	/// Whether the current subpath is a `MoveTo` immediately followed by `Close`: a closed subpath
	/// that collapsed to a single point.
	pub fn point_closed(&self) -> bool {
		let mut rev = self.commands_rev();
		matches!((rev.next(), rev.next()), (Some(Cmd::Close { .. }), Some(Cmd::MoveTo(_))))
	}

	/// Token ranges of each subpath, each running from a `MoveTo` up to (and including) either the
	/// next `MoveTo` or a `Close`.
	pub(crate) fn subpath_ranges(&self) -> Vec<std::ops::Range<usize>> {
		let mut ranges = Vec::new();
		let mut offset = 0;
		let mut current_start = None;
		while offset < self.data.len() {
			let (cmd, len) = decode_at(&self.data, offset);
			if let Cmd::MoveTo(_) = cmd {
				if let Some(start) = current_start.take() {
					ranges.push(start..offset);
				}
				current_start = Some(offset);
			}
			offset += len;
			if let Cmd::Close { .. } = cmd {
				if let Some(start) = current_start.take() {
					ranges.push(start..offset);
				}
			}
		}
		if let Some(start) = current_start {
			ranges.push(start..self.data.len());
		}
		ranges
	}

	/// The subpaths of this path, as independent owned `Path`s.
	pub fn subpaths(&self) -> Vec<Path> {
		self.subpath_ranges().into_iter().map(|range| Path { data: self.data[range].to_vec() }).collect()
	}

	/// Every drawn segment (everything but `MoveTo`) together with its token range, in buffer
	/// order. This is the path's "segment index" space that `PathIntersection` addresses: a
	/// `Close` contributes the line back to its subpath's start, even when builder back-merging
	/// has already elided a redundant trailing `LineTo`.
	pub(crate) fn segment_ranges(&self) -> Vec<(Segment, Range<usize>)> {
		let mut out = Vec::new();
		let mut offset = 0;
		let mut pen = DVec2::ZERO;
		while offset < self.data.len() {
			let (cmd, len) = decode_at(&self.data, offset);
			let range = offset..offset + len;
			match cmd {
				Cmd::MoveTo(p) => pen = p,
				Cmd::LineTo(p) => {
					out.push((Segment::Bezier(Bezier::from_linear_dvec2(pen, p)), range));
					pen = p;
				}
				Cmd::QuadTo { control, end } => {
					out.push((Segment::Bezier(Bezier::from_quadratic_dvec2(pen, control, end)), range));
					pen = end;
				}
				Cmd::CubeTo { c1, c2, end } => {
					out.push((Segment::Bezier(Bezier::from_cubic_dvec2(pen, c1, c2, end)), range));
					pen = end;
				}
				Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => {
					let segment = EllipticalArc::from_svg_endpoint(pen, rx, ry, phi.to_degrees(), large_arc, sweep, end)
						.map(Segment::Arc)
						.unwrap_or_else(|| Segment::Bezier(Bezier::from_linear_dvec2(pen, end)));
					out.push((segment, range));
					pen = end;
				}
				Cmd::Close { start } => {
					out.push((Segment::Bezier(Bezier::from_linear_dvec2(pen, start)), range));
					pen = start;
				}
			}
			offset += len;
		}
		out
	}

	/// Every drawn segment of this path, in buffer order; see `segment_ranges`.
	pub(crate) fn segments(&self) -> Vec<Segment> {
		self.segment_ranges().into_iter().map(|(segment, _)| segment).collect()
	}

	/// For each subpath, the half-open range of segment indices (into `segments()`) it owns, and
	/// whether it ends in `Close` (so index wraparound at its ends represents a real join rather
	/// than an open endpoint).
	pub(crate) fn segment_subpath_bounds(&self) -> Vec<(Range<usize>, bool)> {
		let mut out = Vec::new();
		let mut segment_cursor = 0;
		for token_range in self.subpath_ranges() {
			let mut offset = token_range.start;
			let mut count = 0;
			let mut closed = false;
			while offset < token_range.end {
				let (cmd, len) = decode_at(&self.data, offset);
				if !matches!(cmd, Cmd::MoveTo(_)) {
					count += 1;
				}
				closed = matches!(cmd, Cmd::Close { .. });
				offset += len;
			}
			out.push((segment_cursor..segment_cursor + count, closed));
			segment_cursor += count;
		}
		out
	}

	/// Every on-curve and off-curve control point stored in the buffer, in order.
	pub fn coords(&self) -> Vec<DVec2> {
		let mut coords = Vec::new();
		for cmd in self.commands() {
			match cmd {
				Cmd::MoveTo(p) | Cmd::LineTo(p) => coords.push(p),
				Cmd::QuadTo { control, end } => {
					coords.push(control);
					coords.push(end);
				}
				Cmd::CubeTo { c1, c2, end } => {
					coords.push(c1);
					coords.push(c2);
					coords.push(end);
				}
				Cmd::ArcTo { end, .. } => coords.push(end),
				Cmd::Close { start } => coords.push(start),
			}
		}
		coords
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_path_has_no_commands() {
		let path = Path::new();
		assert_eq!(path.commands().count(), 0);
	}

	#[test]
	fn forward_and_backward_traversal_agree() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.line_to(1., 0.);
		path.quad_to(2., 1., 3., 0.);
		path.close();

		let forward: Vec<Cmd> = path.commands().collect();
		let mut backward: Vec<Cmd> = path.commands_rev().collect();
		backward.reverse();
		assert_eq!(forward, backward);
	}
}
