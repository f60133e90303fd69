//! Builder methods. Every append goes through here so the canonicalization rules (merge,
//! demote, scale) are applied exactly once, at the point of insertion, rather than re-derived by
//! every consumer.

use super::{Cmd, Path};
use crate::arc;
use crate::consts::DEFAULT_EPSILON;
use crate::utils::are_points_collinear;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

impl Path {
	/// If the buffer ends with a `MoveTo`, overwrite it in place; if it ends with `Close` at the
	/// same point, no-op; otherwise append a new `MoveTo`.
	pub fn move_to(&mut self, x: f64, y: f64) {
		let p = DVec2::new(x, y);
		match self.last_cmd() {
			Some(Cmd::MoveTo(_)) => {
				self.truncate_last(4);
				self.push(Cmd::MoveTo(p));
			}
			Some(Cmd::Close { start }) if start.distance(p) < DEFAULT_EPSILON => {}
			_ => self.push(Cmd::MoveTo(p)),
		}
	}

	/// Skip if equal to the current position. If the previous command is a `LineTo` and the three
	/// points (its start, its end, and this new point) are collinear, merge into it.
	pub fn line_to(&mut self, x: f64, y: f64) {
		let p = DVec2::new(x, y);
		let cur = self.position();
		if cur.distance(p) < DEFAULT_EPSILON {
			return;
		}
		if self.is_empty() {
			self.push(Cmd::MoveTo(cur));
		}
		if let Some(Cmd::LineTo(prev_end)) = self.last_cmd() {
			if let Some(prev_start) = self.second_to_last_end() {
				if are_points_collinear(prev_start, prev_end, p) {
					self.truncate_last(4);
					self.push(Cmd::LineTo(p));
					return;
				}
			}
		}
		self.push(Cmd::LineTo(p));
	}

	/// Append, demoting to `LineTo` if the control point is collinear with the chord.
	pub fn quad_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
		let start = self.position();
		let control = DVec2::new(cpx, cpy);
		let end = DVec2::new(x, y);
		if are_points_collinear(start, control, end) {
			self.line_to(x, y);
			return;
		}
		self.push(Cmd::QuadTo { control, end });
	}

	/// Append, demoting to `LineTo` if both control points are collinear with the chord.
	pub fn cube_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
		let start = self.position();
		let c1 = DVec2::new(c1x, c1y);
		let c2 = DVec2::new(c2x, c2y);
		let end = DVec2::new(x, y);
		if are_points_collinear(start, c1, end) && are_points_collinear(start, c2, end) {
			self.line_to(x, y);
			return;
		}
		self.push(Cmd::CubeTo { c1, c2, end });
	}

	/// Canonicalize (`phi` folded into `[0, π)` by swapping `rx ↔ ry` and adding `π/2` when
	/// `rx < ry`; radii scaled up if the chord overshoots the ellipse) and demote to `LineTo` on
	/// zero radii or coincident endpoints.
	pub fn arc_to(&mut self, rx: f64, ry: f64, rotation_deg: f64, large_arc: bool, sweep: bool, x: f64, y: f64) {
		let start = self.position();
		let end = DVec2::new(x, y);
		if start.distance(end) < DEFAULT_EPSILON {
			return;
		}
		let mut rx = rx.abs();
		let mut ry = ry.abs();
		if rx < DEFAULT_EPSILON || ry < DEFAULT_EPSILON {
			self.line_to(x, y);
			return;
		}
		let mut phi = rotation_deg.to_radians();
		if rx < ry {
			std::mem::swap(&mut rx, &mut ry);
			phi += FRAC_PI_2;
		}
		phi = phi.rem_euclid(PI);
		let (rx, ry) = arc::correct_radii(start, end, rx, ry, phi);
		self.push(Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end });
	}

	/// Sweep from the current position through `rx, ry, rotation_deg` from `theta0_deg` to
	/// `theta1_deg`, subdividing full-turn-scale sweeps into at most three `ArcTo`s.
	pub fn arc(&mut self, rx: f64, ry: f64, rotation_deg: f64, theta0_deg: f64, theta1_deg: f64) {
		let start = self.position();
		let phi = rotation_deg.to_radians();
		let theta0 = theta0_deg.to_radians();
		let theta1 = theta1_deg.to_radians();
		let center = start - arc::rotate(DVec2::new(rx * theta0.cos(), ry * theta0.sin()), phi);

		let total = (theta1 - theta0).clamp(-TAU, TAU);
		let segment_count = ((total.abs() / (TAU / 3.)).ceil() as usize).clamp(1, 3);
		let step = total / segment_count as f64;
		let mut theta = theta0;
		for _ in 0..segment_count {
			let next_theta = theta + step;
			let end = center + arc::rotate(DVec2::new(rx * next_theta.cos(), ry * next_theta.sin()), phi);
			let large_arc = step.abs() > PI;
			let sweep = step > 0.;
			self.arc_to(rx, ry, rotation_deg, large_arc, sweep, end.x, end.y);
			theta = next_theta;
		}
	}

	/// Append `Close, startX, startY, Close`, back-merging a preceding `LineTo` that goes straight
	/// to the start (the `Close` segment would duplicate it).
	pub fn close(&mut self) {
		let Some(start) = self.current_subpath_start() else { return };
		if let Some(Cmd::LineTo(p)) = self.last_cmd() {
			if p.distance(start) < DEFAULT_EPSILON {
				self.truncate_last(4);
			}
		}
		self.push(Cmd::Close { start });
	}

	fn second_to_last_end(&self) -> Option<DVec2> {
		let mut rev = self.commands_rev();
		rev.next();
		rev.next().map(|c| c.end_point())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn move_to_overwrites_pending_move() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.move_to(5., 5.);
		assert_eq!(path.commands().count(), 1);
		assert_eq!(path.position(), DVec2::new(5., 5.));
	}

	#[test]
	fn collinear_line_tos_merge() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.line_to(1., 0.);
		path.line_to(2., 0.);
		assert_eq!(path.commands().count(), 2);
	}

	#[test]
	fn quad_to_demotes_when_collinear() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.quad_to(5., 0., 10., 0.);
		assert!(matches!(path.commands().nth(1), Some(Cmd::LineTo(_))));
	}

	#[test]
	fn arc_to_zero_radius_demotes() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.arc_to(0., 5., 0., false, true, 10., 0.);
		assert!(matches!(path.commands().nth(1), Some(Cmd::LineTo(_))));
	}

	#[test]
	fn close_back_merges_trailing_line_to_start() {
		let mut path = Path::new();
		path.move_to(0., 0.);
		path.line_to(10., 0.);
		path.line_to(10., 10.);
		path.line_to(0., 0.);
		path.close();
		assert_eq!(path.commands().count(), 4);
	}
}
