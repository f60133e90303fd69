//! Affine 2×3 matrix.
//!
//! Represented as `[[a, b, tx], [c, d, ty]]` so that a point transforms as
//! `(a*x + b*y + tx, c*x + d*y + ty)`: a small `Copy` struct with constructors, composition
//! methods, and query methods.

use crate::point::PointExt;
use glam::{DMat2, DVec2};

/// An affine transformation: linear part `[[a, b], [c, d]]` plus translation `(tx, ty)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
	pub a: f64,
	pub b: f64,
	pub c: f64,
	pub d: f64,
	pub tx: f64,
	pub ty: f64,
}

/// Decomposition of a `Matrix` into `translate · rotate(θ) · scale(sx, sy) · rotate(φ)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decomposition {
	pub tx: f64,
	pub ty: f64,
	pub theta: f64,
	pub sx: f64,
	pub sy: f64,
	pub phi: f64,
}

impl Matrix {
	pub const IDENTITY: Matrix = Matrix {
		a: 1.,
		b: 0.,
		c: 0.,
		d: 1.,
		tx: 0.,
		ty: 0.,
	};

	pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
		Matrix { a, b, c, d, tx, ty }
	}

	pub fn translation(tx: f64, ty: f64) -> Self {
		Matrix { tx, ty, ..Matrix::IDENTITY }
	}

	pub fn scaling(sx: f64, sy: f64) -> Self {
		Matrix {
			a: sx,
			d: sy,
			..Matrix::IDENTITY
		}
	}

	pub fn rotation(angle: f64) -> Self {
		let (sin, cos) = angle.sin_cos();
		Matrix {
			a: cos,
			b: -sin,
			c: sin,
			d: cos,
			tx: 0.,
			ty: 0.,
		}
	}

	pub fn shear(shx: f64, shy: f64) -> Self {
		Matrix {
			a: 1.,
			b: shx,
			c: shy,
			d: 1.,
			tx: 0.,
			ty: 0.,
		}
	}

	/// Transform a single point.
	pub fn transform_point(&self, p: DVec2) -> DVec2 {
		DVec2::new(self.a * p.x + self.b * p.y + self.tx, self.c * p.x + self.d * p.y + self.ty)
	}

	/// Transform a direction vector (ignores translation).
	pub fn transform_vector(&self, v: DVec2) -> DVec2 {
		DVec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
	}

	/// Compose `self` followed by `other`: `other * self`.
	pub fn then(&self, other: &Matrix) -> Matrix {
		Matrix {
			a: other.a * self.a + other.b * self.c,
			b: other.a * self.b + other.b * self.d,
			c: other.c * self.a + other.d * self.c,
			d: other.c * self.b + other.d * self.d,
			tx: other.a * self.tx + other.b * self.ty + other.tx,
			ty: other.c * self.tx + other.d * self.ty + other.ty,
		}
	}

	pub fn post_translate(&self, tx: f64, ty: f64) -> Matrix {
		self.then(&Matrix::translation(tx, ty))
	}

	pub fn post_scale(&self, sx: f64, sy: f64) -> Matrix {
		self.then(&Matrix::scaling(sx, sy))
	}

	pub fn post_shear(&self, shx: f64, shy: f64) -> Matrix {
		self.then(&Matrix::shear(shx, shy))
	}

	pub fn post_rotate(&self, angle: f64) -> Matrix {
		self.then(&Matrix::rotation(angle))
	}

	pub fn determinant(&self) -> f64 {
		self.a * self.d - self.b * self.c
	}

	pub fn inverse(&self) -> Option<Matrix> {
		let det = self.determinant();
		if det == 0. {
			return None;
		}
		let inv_det = 1. / det;
		let a = self.d * inv_det;
		let b = -self.b * inv_det;
		let c = -self.c * inv_det;
		let d = self.a * inv_det;
		let tx = -(a * self.tx + b * self.ty);
		let ty = -(c * self.tx + d * self.ty);
		Some(Matrix { a, b, c, d, tx, ty })
	}

	/// Transpose of the linear (rotation/scale) part only; translation is dropped.
	pub fn transpose_linear(&self) -> Matrix {
		Matrix {
			a: self.a,
			b: self.c,
			c: self.b,
			d: self.d,
			tx: 0.,
			ty: 0.,
		}
	}

	pub fn linear_part(&self) -> DMat2 {
		DMat2::from_cols(DVec2::new(self.a, self.c), DVec2::new(self.b, self.d))
	}

	/// Whether this matrix preserves distances (pure rotation + translation, no reflection or scale).
	pub fn is_rigid(&self, epsilon: f64) -> bool {
		let det = self.determinant();
		if (det - 1.).abs() > epsilon {
			return false;
		}
		let linear = self.linear_part();
		let should_be_identity = linear * linear.transpose();
		(should_be_identity.x_axis - DVec2::new(1., 0.)).length() < epsilon && (should_be_identity.y_axis - DVec2::new(0., 1.)).length() < epsilon
	}

	pub fn is_translation_only(&self, epsilon: f64) -> bool {
		(self.a - 1.).abs() < epsilon && self.b.abs() < epsilon && self.c.abs() < epsilon && (self.d - 1.).abs() < epsilon
	}

	/// Decompose into `translate · rotate(θ) · scale(sx, sy) · rotate(φ)`, via the polar/SVD-like
	/// decomposition of the 2×2 linear part.
	pub fn decompose(&self) -> Decomposition {
		// Closed-form 2x2 SVD (e.g. Blinn, "Consequences of Pythagoras"): for L = [[a,b],[c,d]],
		// L = R(theta) * diag(sx, sy) * R(phi).
		let (a, b, c, d) = (self.a, self.b, self.c, self.d);
		let e = (a + d) / 2.;
		let f = (a - d) / 2.;
		let g = (c + b) / 2.;
		let h = (c - b) / 2.;
		let q = e.hypot(h);
		let r = f.hypot(g);
		let sx = q + r;
		let sy = q - r;
		let a1 = g.atan2(f);
		let a2 = h.atan2(e);
		let theta = (a2 - a1) / 2.;
		let phi = (a2 + a1) / 2.;

		Decomposition {
			tx: self.tx,
			ty: self.ty,
			theta,
			sx,
			sy,
			phi,
		}
	}

	/// Eigen-decomposition of the symmetric 2×2 matrix `self` (used to recover an ellipse's axes
	/// after an arbitrary affine transform). Returns `(eigenvalue0, eigenvalue1, eigenvector0)`;
	/// `eigenvector1` is `eigenvector0` rotated 90°.
	pub fn symmetric_eigen(a: f64, b: f64, d: f64) -> (f64, f64, DVec2) {
		// Matrix is [[a, b], [b, d]].
		if b.abs() < 1e-14 {
			return (a, d, DVec2::new(1., 0.));
		}
		let trace = a + d;
		let diff = a - d;
		let disc = (diff * diff + 4. * b * b).sqrt();
		let lambda0 = (trace + disc) / 2.;
		let lambda1 = (trace - disc) / 2.;
		let eigenvector0 = DVec2::new(b, lambda0 - a).normalize();
		(lambda0, lambda1, eigenvector0)
	}
}

impl Default for Matrix {
	fn default() -> Self {
		Matrix::IDENTITY
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_transforms_unchanged() {
		let p = DVec2::new(3., 4.);
		assert_eq!(Matrix::IDENTITY.transform_point(p), p);
	}

	#[test]
	fn inverse_undoes_transform() {
		let m = Matrix::translation(1., 2.).post_rotate(0.7).post_scale(2., 3.);
		let inv = m.inverse().unwrap();
		let p = DVec2::new(5., -2.);
		let round_trip = inv.transform_point(m.transform_point(p));
		assert!((round_trip - p).length() < 1e-9);
	}

	#[test]
	fn rigid_detects_rotation_translation() {
		let m = Matrix::translation(4., -1.).post_rotate(1.2);
		assert!(m.is_rigid(1e-9));
		let scaled = m.post_scale(2., 1.);
		assert!(!scaled.is_rigid(1e-9));
	}

	#[test]
	fn translation_only_predicate() {
		assert!(Matrix::translation(1., 2.).is_translation_only(1e-12));
		assert!(!Matrix::translation(1., 2.).post_rotate(0.1).is_translation_only(1e-12));
	}

	#[test]
	fn determinant_of_scale() {
		assert_eq!(Matrix::scaling(2., 3.).determinant(), 6.);
	}
}
