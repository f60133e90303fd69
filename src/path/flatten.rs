//! `Flatten` and `Dash`.

use super::Path;

impl Path {
	/// Replace every quadratic/cubic/arc with a polyline whose Hausdorff distance from the
	/// original is below `tolerance`. Each subpath's closure is preserved.
	pub fn flatten(&self, tolerance: f64) -> Path {
		let mut out = Path::new();
		for subpath in self.subpaths() {
			let closed = subpath.closed();
			let mut segments = subpath.segments();
			if closed {
				segments.pop();
			}
			let start = subpath.start_pos();
			out.move_to(start.x, start.y);
			for segment in &segments {
				// `flatten` includes the segment's own start point; skip it, the pen is already there.
				for point in segment.flatten(tolerance).into_iter().skip(1) {
					out.line_to(point.x, point.y);
				}
			}
			if closed {
				out.close();
			}
		}
		out
	}

	/// Dash this path per `pattern` (on/off lengths, cycling), offset by `offset` arc-length units
	/// into the pattern. An odd-length pattern is doubled first, so the on/off phase continues to
	/// alternate correctly around the cycle.
	pub fn dash(&self, offset: f64, pattern: &[f64]) -> Vec<Path> {
		if pattern.is_empty() || pattern.iter().all(|&p| p <= 0.) {
			return vec![self.clone()];
		}
		let pattern: Vec<f64> = if pattern.len() % 2 == 1 { pattern.iter().chain(pattern.iter()).copied().collect() } else { pattern.to_vec() };
		let cycle_length: f64 = pattern.iter().sum();
		if cycle_length < 1e-12 {
			return vec![self.clone()];
		}

		let mut out = Vec::new();
		for subpath in self.subpaths() {
			out.extend(dash_subpath(&subpath, offset, &pattern, cycle_length));
		}
		out
	}
}

/// Cut `subpath` at every dash-pattern boundary, then keep only the "on" pieces.
fn dash_subpath(subpath: &Path, offset: f64, pattern: &[f64], cycle_length: f64) -> Vec<Path> {
	let total_length = subpath.length();
	if total_length < 1e-12 {
		return Vec::new();
	}

	// Find the pattern stage that covers arc-length position 0 (i.e. `offset` into the cycle).
	let phase = offset.rem_euclid(cycle_length);
	let mut index = 0;
	let mut consumed = 0.;
	while consumed + pattern[index] <= phase + 1e-12 {
		consumed += pattern[index];
		index = (index + 1) % pattern.len();
	}
	let initial_on = index % 2 == 0;
	let mut remaining = consumed + pattern[index] - phase;

	let mut cuts = Vec::new();
	let mut distance = 0.;
	while distance + remaining < total_length - 1e-9 {
		distance += remaining;
		cuts.push(distance);
		index = (index + 1) % pattern.len();
		remaining = pattern[index];
	}

	let pieces = subpath.split_at(&cuts);
	let mut out = Vec::new();
	let mut is_on = initial_on;
	for piece in pieces {
		if is_on && !piece.is_empty() {
			out.push(piece);
		}
		is_on = !is_on;
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flatten_replaces_quadratic_with_polyline() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.quad_to(5., 10., 10., 0.);
		let flat = p.flatten(0.1);
		for cmd in flat.commands() {
			assert!(!matches!(cmd, super::super::Cmd::QuadTo { .. }));
		}
	}

	#[test]
	fn dash_even_pattern_produces_alternating_pieces() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(40., 0.);
		let pieces = p.dash(0., &[10., 10.]);
		assert_eq!(pieces.len(), 2);
		for piece in &pieces {
			assert!((piece.length() - 10.).abs() < 1e-6);
		}
	}

	#[test]
	fn dash_odd_pattern_is_doubled() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(30., 0.);
		// [5] doubles to [5, 5]: on for 5, off for 5, repeating.
		let pieces = p.dash(0., &[5.]);
		assert!(!pieces.is_empty());
	}
}
