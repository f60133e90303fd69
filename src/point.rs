//! Point algebra on top of `glam::DVec2`.
//!
//! The engine represents points as `glam::DVec2` directly and adds the extra vocabulary the rest
//! of the crate needs — absolute/signed angle, perpendicular rotations, and length-normalization
//! that no-ops on a zero vector — as an extension trait.

use glam::DVec2;
use std::f64::consts::PI;

pub type Point = DVec2;

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
	let two_pi = 2. * PI;
	let wrapped = angle % two_pi;
	if wrapped < 0. {
		wrapped + two_pi
	} else {
		wrapped
	}
}

pub trait PointExt {
	/// Perpendicular dot product (a.k.a. the cross product's z-component) `self.x * other.y - self.y * other.x`.
	fn perp_dot(self, other: DVec2) -> f64;
	/// Rotate 90° counter-clockwise.
	fn rotate_90(self) -> DVec2;
	/// Rotate 90° clockwise.
	fn rotate_neg_90(self) -> DVec2;
	/// Rotate by an arbitrary angle (radians) about the origin.
	fn rotate(self, angle: f64) -> DVec2;
	/// Rotate by an arbitrary angle (radians) about `pivot`.
	fn rotate_about(self, angle: f64, pivot: DVec2) -> DVec2;
	/// The slope `dy/dx`, which is `f64::INFINITY`/`NEG_INFINITY` for a vertical vector.
	fn slope(self) -> f64;
	/// Absolute angle of this vector from the positive x-axis, in `[0, 2π)`.
	fn abs_angle(self) -> f64;
	/// Signed angle from `self` to `other`, in `(-π, π]`.
	fn signed_angle_to(self, other: DVec2) -> f64;
	/// Linearly interpolate from `self` to `other`.
	fn interpolate(self, other: DVec2, t: f64) -> DVec2;
	/// Scale this vector to the given target length. No-op (returns `self` unchanged) when `self` is the zero vector.
	fn to_length(self, length: f64) -> DVec2;
}

impl PointExt for DVec2 {
	fn perp_dot(self, other: DVec2) -> f64 {
		self.x * other.y - self.y * other.x
	}

	fn rotate_90(self) -> DVec2 {
		DVec2::new(-self.y, self.x)
	}

	fn rotate_neg_90(self) -> DVec2 {
		DVec2::new(self.y, -self.x)
	}

	fn rotate(self, angle: f64) -> DVec2 {
		let (sin, cos) = angle.sin_cos();
		DVec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
	}

	fn rotate_about(self, angle: f64, pivot: DVec2) -> DVec2 {
		pivot + (self - pivot).rotate(angle)
	}

	fn slope(self) -> f64 {
		self.y / self.x
	}

	fn abs_angle(self) -> f64 {
		normalize_angle(self.y.atan2(self.x))
	}

	fn signed_angle_to(self, other: DVec2) -> f64 {
		let angle = other.y.atan2(other.x) - self.y.atan2(self.x);
		if angle > PI {
			angle - 2. * PI
		} else if angle <= -PI {
			angle + 2. * PI
		} else {
			angle
		}
	}

	fn interpolate(self, other: DVec2, t: f64) -> DVec2 {
		self.lerp(other, t)
	}

	fn to_length(self, length: f64) -> DVec2 {
		let current_length = self.length();
		if current_length == 0. {
			self
		} else {
			self * (length / current_length)
		}
	}
}

/// Test whether two tangent directions (absolute angles in `[0, 2π)`) are aligned within `angle_epsilon`.
pub fn aligned(a: f64, b: f64, angle_epsilon: f64) -> bool {
	let diff = (normalize_angle(a) - normalize_angle(b)).abs();
	diff < angle_epsilon || (2. * PI - diff) < angle_epsilon
}

/// Test whether two tangent directions (absolute angles in `[0, 2π)`) are anti-aligned (differ by π) within `angle_epsilon`.
pub fn anti_aligned(a: f64, b: f64, angle_epsilon: f64) -> bool {
	aligned(a, normalize_angle(b + PI), angle_epsilon)
}

/// Test whether `angle` lies within the wedge `[start, start + sweep)`, where `sweep` is a non-negative
/// counter-clockwise extent (possibly greater than `2π`), all angles given in `[0, 2π)`.
pub fn angle_in_wedge(angle: f64, start: f64, sweep: f64) -> bool {
	let relative = normalize_angle(angle - start);
	relative < sweep
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn perp_dot_matches_cross_z() {
		let a = DVec2::new(1., 0.);
		let b = DVec2::new(0., 1.);
		assert_eq!(a.perp_dot(b), 1.);
		assert_eq!(b.perp_dot(a), -1.);
	}

	#[test]
	fn to_length_no_ops_on_zero() {
		let zero = DVec2::ZERO;
		assert_eq!(zero.to_length(5.), zero);
	}

	#[test]
	fn to_length_scales() {
		let v = DVec2::new(3., 4.);
		let scaled = v.to_length(10.);
		assert!((scaled.length() - 10.).abs() < 1e-9);
	}

	#[test]
	fn abs_angle_range() {
		assert!((DVec2::new(1., 0.).abs_angle() - 0.).abs() < 1e-9);
		assert!((DVec2::new(0., -1.).abs_angle() - 3. * PI / 2.).abs() < 1e-9);
	}

	#[test]
	fn aligned_detects_same_and_wrap_around() {
		assert!(aligned(0.0001, 2. * PI - 0.0001, 1e-3));
		assert!(anti_aligned(0., PI, 1e-9));
		assert!(!aligned(0., PI / 2., 1e-3));
	}
}
