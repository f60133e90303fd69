//! Chebyshev inverse-length approximation.
//!
//! `SplitAt` needs `t` as a function of arc-length fraction `s`, but a segment's length-from-0
//! function has no closed form for quadratics/cubics/arcs in general. Rather than bisect the
//! length integral on every split (cheap once, expensive across many cuts on the same segment),
//! this fits a degree-10 Chebyshev interpolant of `t(s)` by sampling `s` at the Chebyshev nodes
//! (where a bisection against the true length function is unavoidable) and reusing the fit for
//! every subsequent evaluation via barycentric interpolation — the same fixed-node-table spirit as
//! `quadrature.rs`'s Gauss-Legendre tables, just solved for the inverse relation instead of an
//! integral.

const DEGREE: usize = 10;

pub struct InverseLengthFit {
	/// `t` values at the Chebyshev nodes, ordered to match `NODES`.
	t_at_node: [f64; DEGREE + 1],
}

/// Chebyshev nodes of the second kind on `[0, 1]`: `cos(kπ/n)` remapped from `[-1, 1]`.
fn nodes() -> [f64; DEGREE + 1] {
	let mut out = [0.; DEGREE + 1];
	for (k, slot) in out.iter_mut().enumerate() {
		let x = (std::f64::consts::PI * k as f64 / DEGREE as f64).cos();
		*slot = (x + 1.) / 2.;
	}
	out
}

/// `t` such that `length_from_start(t) == target_length`, found by bisection. Used both to seed
/// the Chebyshev fit and as a direct fallback for degenerate (near-zero-length) segments.
fn bisect_t_for_length(length_from_start: impl Fn(f64) -> f64, target_length: f64) -> f64 {
	let (mut lo, mut hi) = (0., 1.);
	for _ in 0..60 {
		let mid = (lo + hi) / 2.;
		if length_from_start(mid) < target_length {
			lo = mid;
		} else {
			hi = mid;
		}
	}
	(lo + hi) / 2.
}

impl InverseLengthFit {
	/// Build the fit for a segment whose total length is `total_length` and whose length measured
	/// from its start to parameter `t` is `length_from_start(t)` (monotone nondecreasing).
	pub fn new(length_from_start: impl Fn(f64) -> f64, total_length: f64) -> Self {
		if total_length < 1e-12 {
			return InverseLengthFit { t_at_node: [0.; DEGREE + 1] };
		}
		let s_nodes = nodes();
		let mut t_at_node = [0.; DEGREE + 1];
		for (i, &s) in s_nodes.iter().enumerate() {
			t_at_node[i] = bisect_t_for_length(&length_from_start, s * total_length);
		}
		InverseLengthFit { t_at_node }
	}

	/// Evaluate `t(s)` for `s` in `[0, 1]` via barycentric Chebyshev interpolation over the fitted
	/// nodes, clamped to a valid parameter at the edges.
	pub fn t_at(&self, s: f64) -> f64 {
		let s = s.clamp(0., 1.);
		let s_nodes = nodes();

		// Barycentric weights for Chebyshev points of the second kind alternate sign and halve at
		// the endpoints.
		let weight = |k: usize| -> f64 {
			let sign = if k % 2 == 0 { 1. } else { -1. };
			let half = if k == 0 || k == DEGREE { 0.5 } else { 1. };
			sign * half
		};

		let mut numerator = 0.;
		let mut denominator = 0.;
		for k in 0..=DEGREE {
			let diff = s - s_nodes[k];
			if diff.abs() < 1e-14 {
				return self.t_at_node[k];
			}
			let w = weight(k) / diff;
			numerator += w * self.t_at_node[k];
			denominator += w;
		}
		(numerator / denominator).clamp(0., 1.)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linear_length_inverts_to_identity() {
		let fit = InverseLengthFit::new(|t| t * 10., 10.);
		for s in [0., 0.25, 0.5, 0.75, 1.] {
			assert!((fit.t_at(s) - s).abs() < 1e-6);
		}
	}

	#[test]
	fn quadratic_length_inverts_monotonically() {
		// length(t) = t^2 * 10, total 10: s=0.25 should land near t=0.5.
		let fit = InverseLengthFit::new(|t| t * t * 10., 10.);
		assert!((fit.t_at(0.25) - 0.5).abs() < 1e-3);
		assert!(fit.t_at(0.1) < fit.t_at(0.9));
	}

	#[test]
	fn degenerate_zero_length_does_not_panic() {
		let fit = InverseLengthFit::new(|_| 0., 0.);
		assert_eq!(fit.t_at(0.5), 0.);
	}
}
