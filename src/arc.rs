//! Elliptical arc segment.
//!
//! Stored in centered form (center, radii, x-axis rotation, angular span) rather than SVG's
//! endpoint form, mirroring the way `Bezier` stores its own canonical handle representation
//! rather than re-deriving it on every query. Endpoint-form conversion follows the SVG
//! implementation notes (F.6.5, F.6.6), as worked out in `nical-lyon`'s `geom::arc`.

use crate::bezier::Bezier;
use crate::matrix::Matrix;
use crate::quadrature::{self, Order};
use crate::rect::Rect;
use glam::DVec2;

/// An elliptical arc in centered form: `position(t) = center + Rot(phi) * (rx*cos(theta), ry*sin(theta))`
/// where `theta` sweeps linearly from `theta_start` to `theta_end` as `t` runs `0..1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EllipticalArc {
	pub center: DVec2,
	pub rx: f64,
	pub ry: f64,
	pub phi: f64,
	pub theta_start: f64,
	pub theta_end: f64,
}

impl EllipticalArc {
	/// Build from SVG's endpoint parameterization, correcting radii that are too small for the
	/// chord per F.6.6.2, and collapsing to `None` when the endpoints coincide (the caller should
	/// treat that as a degenerate, zero-length arc rather than constructing one).
	#[allow(clippy::too_many_arguments)]
	pub fn from_svg_endpoint(p0: DVec2, mut rx: f64, mut ry: f64, phi_degrees: f64, large_arc: bool, sweep: bool, p1: DVec2) -> Option<Self> {
		if p0 == p1 {
			return None;
		}
		rx = rx.abs();
		ry = ry.abs();
		if rx < 1e-12 || ry < 1e-12 {
			return None;
		}
		let phi = phi_degrees.to_radians();
		let (sin_phi, cos_phi) = phi.sin_cos();

		// F.6.5.1: compute (x1', y1'), the midpoint-relative coordinates in the ellipse's frame.
		let half_delta = (p0 - p1) / 2.;
		let x1_prime = cos_phi * half_delta.x + sin_phi * half_delta.y;
		let y1_prime = -sin_phi * half_delta.x + cos_phi * half_delta.y;

		// F.6.6.2/F.6.6.3: scale up radii if the chord can't fit the requested ellipse.
		let lambda = (x1_prime / rx).powi(2) + (y1_prime / ry).powi(2);
		if lambda > 1. {
			let scale = lambda.sqrt();
			rx *= scale;
			ry *= scale;
		}

		// F.6.5.2: center in the ellipse's frame.
		let rx2 = rx * rx;
		let ry2 = ry * ry;
		let x1p2 = x1_prime * x1_prime;
		let y1p2 = y1_prime * y1_prime;
		let sign = if large_arc == sweep { -1. } else { 1. };
		let numerator = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.);
		let denominator = rx2 * y1p2 + ry2 * x1p2;
		let coefficient = if denominator < 1e-20 { 0. } else { sign * (numerator / denominator).sqrt() };
		let cx_prime = coefficient * (rx * y1_prime / ry);
		let cy_prime = coefficient * (-ry * x1_prime / rx);

		// F.6.5.3: center in the original frame.
		let midpoint = (p0 + p1) / 2.;
		let center = DVec2::new(cos_phi * cx_prime - sin_phi * cy_prime + midpoint.x, sin_phi * cx_prime + cos_phi * cy_prime + midpoint.y);

		// F.6.5.4/F.6.5.5: start angle and angular span.
		let vec_angle = |ux: f64, uy: f64, vx: f64, vy: f64| -> f64 {
			let dot = ux * vx + uy * vy;
			let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
			let mut angle = (dot / len).clamp(-1., 1.).acos();
			if ux * vy - uy * vx < 0. {
				angle = -angle;
			}
			angle
		};
		let theta_start = vec_angle(1., 0., (x1_prime - cx_prime) / rx, (y1_prime - cy_prime) / ry);
		let mut delta_theta = vec_angle((x1_prime - cx_prime) / rx, (y1_prime - cy_prime) / ry, (-x1_prime - cx_prime) / rx, (-y1_prime - cy_prime) / ry);
		if !sweep && delta_theta > 0. {
			delta_theta -= std::f64::consts::TAU;
		} else if sweep && delta_theta < 0. {
			delta_theta += std::f64::consts::TAU;
		}

		Some(EllipticalArc {
			center,
			rx,
			ry,
			phi,
			theta_start,
			theta_end: theta_start + delta_theta,
		})
	}

	/// The endpoint-form parameters `(p0, rx, ry, phi_degrees, large_arc, sweep, p1)`.
	pub fn to_svg_endpoint(&self) -> (DVec2, f64, f64, f64, bool, bool, DVec2) {
		let delta = self.theta_end - self.theta_start;
		let large_arc = delta.abs() > std::f64::consts::PI;
		let sweep = delta > 0.;
		(self.position(0.), self.rx, self.ry, self.phi.to_degrees(), large_arc, sweep, self.position(1.))
	}

	fn theta(&self, t: f64) -> f64 {
		self.theta_start + t * (self.theta_end - self.theta_start)
	}

	pub fn position(&self, t: f64) -> DVec2 {
		let theta = self.theta(t);
		let local = DVec2::new(self.rx * theta.cos(), self.ry * theta.sin());
		self.center + rotate(local, self.phi)
	}

	/// Derivative with respect to `t` (not arc length), i.e. the chain rule through `theta(t)`.
	pub fn derivative(&self, t: f64) -> DVec2 {
		let theta = self.theta(t);
		let dtheta_dt = self.theta_end - self.theta_start;
		let local = DVec2::new(-self.rx * theta.sin(), self.ry * theta.cos()) * dtheta_dt;
		rotate(local, self.phi)
	}

	pub fn normal(&self, t: f64) -> DVec2 {
		let d = self.derivative(t);
		if d.length_squared() < 1e-20 {
			return DVec2::ZERO;
		}
		DVec2::new(-d.y, d.x).normalize()
	}

	/// Signed curvature radius, positive when the arc curves to the left of travel.
	pub fn curvature_radius(&self, t: f64) -> f64 {
		let theta = self.theta(t);
		let (sin, cos) = theta.sin_cos();
		let speed_sq = (self.rx * sin).powi(2) + (self.ry * cos).powi(2);
		let curvature = (self.rx * self.ry) / speed_sq.powf(1.5);
		if curvature.abs() < 1e-12 {
			f64::INFINITY
		} else {
			1. / curvature
		}
	}

	/// Arc length from `t0` to `t1`, via Gauss-Legendre quadrature of the speed `|position'(t)|`.
	pub fn length_between(&self, t0: f64, t1: f64) -> f64 {
		quadrature::integrate(|t| self.derivative(t).length(), t0, t1, Order::Seven)
	}

	pub fn length(&self) -> f64 {
		self.length_between(0., 1.)
	}

	/// Split into two arcs at parameter `t`, each reparameterized to run `0..1` over its share.
	pub fn split(&self, t: f64) -> (EllipticalArc, EllipticalArc) {
		let theta_mid = self.theta(t);
		(
			EllipticalArc {
				theta_end: theta_mid,
				..*self
			},
			EllipticalArc {
				theta_start: theta_mid,
				..*self
			},
		)
	}

	/// Tight axis-aligned bounds, found by testing the endpoints plus any axis-extremal angle
	/// (`theta` where `dx/dtheta = 0` or `dy/dtheta = 0`) that falls within the arc's span.
	pub fn bounds(&self) -> Rect {
		let mut rect = Rect::from_point(self.position(0.)).add_point(self.position(1.));
		// dx/dtheta = 0 when tan(theta) = -(ry/rx)*tan(phi); dy/dtheta = 0 when tan(theta) = ry/(rx*tan(phi)).
		// Both repeat every pi, so `bounds` also checks theta+pi via the loop below.
		let tan_phi = self.phi.tan();
		let candidates = [(-self.ry * tan_phi / self.rx).atan(), if tan_phi.abs() < 1e-30 { std::f64::consts::FRAC_PI_2 } else { (self.ry / (self.rx * tan_phi)).atan() }];
		for base in candidates {
			for k in -2..=2 {
				let theta = base + std::f64::consts::PI * k as f64;
				if let Some(t) = self.t_for_theta(theta) {
					rect = rect.add_point(self.position(t));
				}
			}
		}
		rect
	}

	/// `t` such that `theta(t) == theta` (mod 2π-aware span check), or `None` if `theta` is outside
	/// the arc's angular span. Exposed crate-wide so the intersection kernels can map a solved
	/// angle back onto this arc's parameter without duplicating the span arithmetic.
	pub(crate) fn t_for_theta(&self, theta: f64) -> Option<f64> {
		let span = self.theta_end - self.theta_start;
		if span.abs() < 1e-12 {
			return None;
		}
		let mut delta = theta - self.theta_start;
		// Bring delta within one winding of the span's direction.
		let tau = std::f64::consts::TAU;
		delta -= tau * (delta / tau).floor();
		if span < 0. && delta > 0. {
			delta -= tau;
		}
		let t = delta / span;
		if (0.0..=1.0).contains(&t) {
			Some(t)
		} else {
			None
		}
	}

	/// Transform by an arbitrary affine matrix, recovering the transformed ellipse's axes via
	/// eigen-decomposition of the conic form `Mᵀ⁻¹ · diag(1/rx², 1/ry²) · M⁻¹`.
	pub fn transform(&self, matrix: &Matrix) -> Option<EllipticalArc> {
		let linear = Matrix::new(matrix.a, matrix.b, matrix.c, matrix.d, 0., 0.);
		let inv = linear.inverse()?;

		// Conic coefficients of the untransformed ellipse in its own (rotated) frame, mapped back
		// through phi so we work directly in world axes: Q = Rot(phi) diag(1/rx^2,1/ry^2) Rot(phi)^T.
		let (sin_phi, cos_phi) = self.phi.sin_cos();
		let inv_rx2 = 1. / (self.rx * self.rx);
		let inv_ry2 = 1. / (self.ry * self.ry);
		let qa = cos_phi * cos_phi * inv_rx2 + sin_phi * sin_phi * inv_ry2;
		let qb = cos_phi * sin_phi * (inv_rx2 - inv_ry2);
		let qd = sin_phi * sin_phi * inv_rx2 + cos_phi * cos_phi * inv_ry2;

		// New conic Q' = inv^T Q inv, i.e. for point x in the new frame, x^T Q' x = x^T inv^T Q inv x.
		let inv_mat = glam::DMat2::from_cols(DVec2::new(inv.a, inv.c), DVec2::new(inv.b, inv.d));
		let q_mat = glam::DMat2::from_cols(DVec2::new(qa, qb), DVec2::new(qb, qd));
		let q_prime = inv_mat.transpose() * q_mat * inv_mat;

		let (lambda0, lambda1, eigenvector0) = Matrix::symmetric_eigen(q_prime.x_axis.x, q_prime.x_axis.y, q_prime.y_axis.y);
		if lambda0 <= 0. || lambda1 <= 0. {
			return None;
		}
		let new_rx = 1. / lambda0.sqrt();
		let new_ry = 1. / lambda1.sqrt();
		let new_phi = eigenvector0.y.atan2(eigenvector0.x);
		let new_center = matrix.transform_point(self.center);

		// Preserve the sweep direction: a reflection (negative determinant) reverses it.
		let mut theta_start = self.angle_for_new_axes(0., new_phi, new_rx, new_ry, matrix);
		let mut theta_end = self.angle_for_new_axes(1., new_phi, new_rx, new_ry, matrix);
		if matrix.determinant() < 0. {
			std::mem::swap(&mut theta_start, &mut theta_end);
		}

		Some(EllipticalArc {
			center: new_center,
			rx: new_rx,
			ry: new_ry,
			phi: new_phi,
			theta_start,
			theta_end,
		})
	}

	fn angle_for_new_axes(&self, t: f64, new_phi: f64, new_rx: f64, new_ry: f64, matrix: &Matrix) -> f64 {
		let world_point = matrix.transform_point(self.position(t)) - matrix.transform_point(self.center);
		let local = rotate(world_point, -new_phi);
		(local.y / new_ry).atan2(local.x / new_rx)
	}

	/// Polyline approximation within `tolerance`, by recursive bisection on the chord-to-arc
	/// deviation, in the manner of `Bezier::flatten`.
	pub fn flatten(&self, tolerance: f64) -> Vec<DVec2> {
		let mut points = vec![self.position(0.)];
		self.flatten_recursive(0., 1., tolerance, &mut points);
		points
	}

	fn flatten_recursive(&self, t0: f64, t1: f64, tolerance: f64, points: &mut Vec<DVec2>) {
		let p0 = self.position(t0);
		let p1 = self.position(t1);
		let mid_t = (t0 + t1) / 2.;
		let mid = self.position(mid_t);
		let chord_mid = (p0 + p1) / 2.;
		if mid.distance(chord_mid) <= tolerance || t1 - t0 < 1e-6 {
			points.push(p1);
		} else {
			self.flatten_recursive(t0, mid_t, tolerance, points);
			self.flatten_recursive(mid_t, t1, tolerance, points);
		}
	}

	/// Approximate with cubic Béziers, at most four per quadrant, using the standard
	/// `4/3 * tan(theta/4)` control-point offset.
	pub fn to_cubics(&self) -> Vec<Bezier> {
		let span = self.theta_end - self.theta_start;
		if span.abs() < 1e-12 {
			return Vec::new();
		}
		let max_segment_angle = std::f64::consts::FRAC_PI_2;
		let segment_count = (span.abs() / max_segment_angle).ceil().max(1.) as usize;
		let segment_angle = span / segment_count as f64;
		let alpha = 4. / 3. * (segment_angle / 4.).tan();

		let mut cubics = Vec::with_capacity(segment_count);
		for i in 0..segment_count {
			let theta0 = self.theta_start + segment_angle * i as f64;
			let theta1 = theta0 + segment_angle;
			let p0 = self.point_at_theta(theta0);
			let p1 = self.point_at_theta(theta1);
			let d0 = self.tangent_at_theta(theta0);
			let d1 = self.tangent_at_theta(theta1);
			let c1 = p0 + d0 * alpha;
			let c2 = p1 - d1 * alpha;
			cubics.push(Bezier::from_cubic_dvec2(p0, c1, c2, p1));
		}
		cubics
	}

	fn point_at_theta(&self, theta: f64) -> DVec2 {
		let local = DVec2::new(self.rx * theta.cos(), self.ry * theta.sin());
		self.center + rotate(local, self.phi)
	}

	fn tangent_at_theta(&self, theta: f64) -> DVec2 {
		let local = DVec2::new(-self.rx * theta.sin(), self.ry * theta.cos());
		rotate(local, self.phi)
	}
}

pub(crate) fn rotate(v: DVec2, angle: f64) -> DVec2 {
	let (sin, cos) = angle.sin_cos();
	DVec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Scale `rx`/`ry` up, preserving their ratio, so the chord `p0`-`p1` fits on an ellipse with
/// rotation `phi` — the F.6.6.2/F.6.6.3 correction, factored out so `Path`'s `ArcTo` builder can
/// apply it without constructing a full centered-form `EllipticalArc`.
pub(crate) fn correct_radii(p0: DVec2, p1: DVec2, rx: f64, ry: f64, phi: f64) -> (f64, f64) {
	let (sin_phi, cos_phi) = phi.sin_cos();
	let half_delta = (p0 - p1) / 2.;
	let x1_prime = cos_phi * half_delta.x + sin_phi * half_delta.y;
	let y1_prime = -sin_phi * half_delta.x + cos_phi * half_delta.y;
	let lambda = (x1_prime / rx).powi(2) + (y1_prime / ry).powi(2);
	if lambda > 1. {
		let scale = lambda.sqrt();
		(rx * scale, ry * scale)
	} else {
		(rx, ry)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip_endpoint_to_centered_and_back() {
		let p0 = DVec2::new(0., 0.);
		let p1 = DVec2::new(10., 0.);
		let arc = EllipticalArc::from_svg_endpoint(p0, 5., 5., 0., false, true, p1).unwrap();
		let (round_p0, _, _, _, _, _, round_p1) = arc.to_svg_endpoint();
		assert!(round_p0.distance(p0) < 1e-6);
		assert!(round_p1.distance(p1) < 1e-6);
	}

	#[test]
	fn circle_length_matches_circumference() {
		let arc = EllipticalArc {
			center: DVec2::ZERO,
			rx: 2.,
			ry: 2.,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::TAU,
		};
		let expected = 2. * std::f64::consts::PI * 2.;
		assert!((arc.length() - expected).abs() < 1e-6);
	}

	#[test]
	fn split_preserves_endpoints() {
		let arc = EllipticalArc {
			center: DVec2::ZERO,
			rx: 3.,
			ry: 1.,
			phi: 0.3,
			theta_start: 0.2,
			theta_end: 2.1,
		};
		let (left, right) = arc.split(0.4);
		assert!(left.position(0.).distance(arc.position(0.)) < 1e-9);
		assert!(left.position(1.).distance(right.position(0.)) < 1e-9);
		assert!(right.position(1.).distance(arc.position(1.)) < 1e-9);
	}

	#[test]
	fn bounds_of_quarter_circle_is_tight() {
		let arc = EllipticalArc {
			center: DVec2::ZERO,
			rx: 1.,
			ry: 1.,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::FRAC_PI_2,
		};
		let bounds = arc.bounds();
		assert!((bounds.x1 - 1.).abs() < 1e-9);
		assert!((bounds.y1 - 1.).abs() < 1e-9);
	}

	#[test]
	fn to_cubics_approximates_position() {
		let arc = EllipticalArc {
			center: DVec2::ZERO,
			rx: 4.,
			ry: 2.,
			phi: 0.,
			theta_start: 0.,
			theta_end: std::f64::consts::PI,
		};
		let cubics = arc.to_cubics();
		assert!(!cubics.is_empty());
		assert!(cubics[0].start().distance(arc.position(0.)) < 1e-9);
	}
}
