//! Axis-aligned bounding rectangle.

use crate::matrix::Matrix;
use glam::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
}

impl Rect {
	/// An empty rectangle, represented with inverted bounds so that `add_point`/`add_rect` on it
	/// behave as the identity for a union.
	pub const EMPTY: Rect = Rect {
		x0: f64::INFINITY,
		y0: f64::INFINITY,
		x1: f64::NEG_INFINITY,
		y1: f64::NEG_INFINITY,
	};

	pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
		Rect {
			x0: x0.min(x1),
			y0: y0.min(y1),
			x1: x0.max(x1),
			y1: y0.max(y1),
		}
	}

	pub fn from_point(p: DVec2) -> Self {
		Rect { x0: p.x, y0: p.y, x1: p.x, y1: p.y }
	}

	pub fn is_empty(&self) -> bool {
		self.x0 > self.x1 || self.y0 > self.y1
	}

	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}

	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}

	pub fn add_point(&self, p: DVec2) -> Rect {
		Rect {
			x0: self.x0.min(p.x),
			y0: self.y0.min(p.y),
			x1: self.x1.max(p.x),
			y1: self.y1.max(p.y),
		}
	}

	pub fn add_rect(&self, other: &Rect) -> Rect {
		if other.is_empty() {
			return *self;
		}
		if self.is_empty() {
			return *other;
		}
		Rect {
			x0: self.x0.min(other.x0),
			y0: self.y0.min(other.y0),
			x1: self.x1.max(other.x1),
			y1: self.y1.max(other.y1),
		}
	}

	/// Whether this rectangle touches (overlaps or shares a boundary with) `other`.
	pub fn touches(&self, other: &Rect) -> bool {
		!self.is_empty() && !other.is_empty() && self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
	}

	pub fn contains_point(&self, p: DVec2) -> bool {
		!self.is_empty() && p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
	}

	pub fn contains_rect(&self, other: &Rect) -> bool {
		other.is_empty() || (!self.is_empty() && other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1)
	}

	/// The tight bounding rectangle of this rectangle's four corners after applying `matrix`.
	pub fn transform(&self, matrix: &Matrix) -> Rect {
		if self.is_empty() {
			return *self;
		}
		let corners = [
			DVec2::new(self.x0, self.y0),
			DVec2::new(self.x1, self.y0),
			DVec2::new(self.x1, self.y1),
			DVec2::new(self.x0, self.y1),
		];
		corners.into_iter().map(|p| matrix.transform_point(p)).fold(Rect::EMPTY, |acc, p| acc.add_point(p))
	}
}

impl Default for Rect {
	fn default() -> Self {
		Rect::EMPTY
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_point_expands() {
		let r = Rect::EMPTY.add_point(DVec2::new(1., 2.)).add_point(DVec2::new(-1., 5.));
		assert_eq!(r, Rect::new(-1., 2., 1., 5.));
	}

	#[test]
	fn touches_shared_edge() {
		let a = Rect::new(0., 0., 10., 10.);
		let b = Rect::new(10., 0., 20., 10.);
		assert!(a.touches(&b));
	}

	#[test]
	fn contains_rect() {
		let outer = Rect::new(0., 0., 10., 10.);
		let inner = Rect::new(2., 2., 4., 4.);
		assert!(outer.contains_rect(&inner));
		assert!(!inner.contains_rect(&outer));
	}

	#[test]
	fn transform_tight_bounds() {
		let r = Rect::new(0., 0., 10., 10.);
		let rotated = r.transform(&Matrix::rotation(std::f64::consts::FRAC_PI_4));
		assert!(rotated.width() > 10.);
	}
}
