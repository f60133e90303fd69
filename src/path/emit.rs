//! SVG/PS/PDF path-data emitters.
//!
//! PDF and HTMLCanvas lack native elliptic arcs, so those two emitters convert every `ArcTo` to
//! cubic Béziers first via `EllipticalArc::to_cubics` before serializing.

use super::{Cmd, Path};

/// Target syntax for `Path::emit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmitTarget {
	/// SVG path-data (the `d` attribute grammar), arcs emitted natively as `A`.
	Svg,
	/// PostScript/EPS path operators (`moveto`/`lineto`/`curveto`/`closepath`), arcs converted to
	/// cubics first.
	PostScript,
	/// PDF content-stream path operators (`m`/`l`/`c`/`h`), arcs converted to cubics first.
	Pdf,
}

impl Path {
	/// Serialize to `target`'s path-data syntax.
	pub fn emit(&self, target: EmitTarget) -> String {
		match target {
			EmitTarget::Svg => emit_svg(self),
			EmitTarget::PostScript => emit_postscript(self),
			EmitTarget::Pdf => emit_pdf(self),
		}
	}
}

fn fmt(n: f64) -> String {
	// Trim trailing zeros so whole numbers don't carry a spurious ".0000".
	let s = format!("{n:.6}");
	let trimmed = s.trim_end_matches('0').trim_end_matches('.');
	if trimmed.is_empty() || trimmed == "-0" {
		"0".to_string()
	} else {
		trimmed.to_string()
	}
}

fn emit_svg(path: &Path) -> String {
	let mut out = String::new();
	for cmd in path.commands() {
		match cmd {
			Cmd::MoveTo(p) => out.push_str(&format!("M{} {}", fmt(p.x), fmt(p.y))),
			Cmd::LineTo(p) => out.push_str(&format!("L{} {}", fmt(p.x), fmt(p.y))),
			Cmd::QuadTo { control, end } => out.push_str(&format!("Q{} {} {} {}", fmt(control.x), fmt(control.y), fmt(end.x), fmt(end.y))),
			Cmd::CubeTo { c1, c2, end } => out.push_str(&format!(
				"C{} {} {} {} {} {}",
				fmt(c1.x),
				fmt(c1.y),
				fmt(c2.x),
				fmt(c2.y),
				fmt(end.x),
				fmt(end.y)
			)),
			Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => out.push_str(&format!(
				"A{} {} {} {} {} {} {}",
				fmt(rx),
				fmt(ry),
				fmt(phi.to_degrees()),
				large_arc as u8,
				sweep as u8,
				fmt(end.x),
				fmt(end.y)
			)),
			Cmd::Close { .. } => out.push('Z'),
		}
	}
	out
}

/// Walk `path`'s commands, converting each `ArcTo` to its cubic approximation, and hand every
/// resulting on-curve move/line/cubic/close to `emit_segment`.
fn emit_flattened_arcs(path: &Path, mut emit_move: impl FnMut(f64, f64), mut emit_line: impl FnMut(f64, f64), mut emit_cube: impl FnMut(f64, f64, f64, f64, f64, f64), mut emit_close: impl FnMut()) {
	let mut pen = glam::DVec2::ZERO;
	for cmd in path.commands() {
		match cmd {
			Cmd::MoveTo(p) => {
				emit_move(p.x, p.y);
				pen = p;
			}
			Cmd::LineTo(p) => {
				emit_line(p.x, p.y);
				pen = p;
			}
			Cmd::QuadTo { control, end } => {
				// Lossless lift to cubic keeps the converter a single code path.
				let quad = crate::bezier::Bezier::from_quadratic_dvec2(pen, control, end);
				let cubic = quad.to_cubic();
				if let (Some(c1), Some(c2)) = (cubic.handle_start(), cubic.handle_end()) {
					emit_cube(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
				}
				pen = end;
			}
			Cmd::CubeTo { c1, c2, end } => {
				emit_cube(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
				pen = end;
			}
			Cmd::ArcTo { rx, ry, phi, large_arc, sweep, end } => {
				if let Some(arc) = crate::arc::EllipticalArc::from_svg_endpoint(pen, rx, ry, phi.to_degrees(), large_arc, sweep, end) {
					for cubic in arc.to_cubics() {
						let c1 = cubic.handle_start().unwrap_or(cubic.start());
						let c2 = cubic.handle_end().unwrap_or(cubic.end());
						let e = cubic.end();
						emit_cube(c1.x, c1.y, c2.x, c2.y, e.x, e.y);
					}
				} else {
					emit_line(end.x, end.y);
				}
				pen = end;
			}
			Cmd::Close { .. } => emit_close(),
		}
	}
}

fn emit_postscript(path: &Path) -> String {
	let mut out = String::new();
	emit_flattened_arcs(
		path,
		|x, y| out.push_str(&format!("{} {} moveto\n", fmt(x), fmt(y))),
		|x, y| out.push_str(&format!("{} {} lineto\n", fmt(x), fmt(y))),
		|c1x, c1y, c2x, c2y, x, y| out.push_str(&format!("{} {} {} {} {} {} curveto\n", fmt(c1x), fmt(c1y), fmt(c2x), fmt(c2y), fmt(x), fmt(y))),
		|| out.push_str("closepath\n"),
	);
	out
}

fn emit_pdf(path: &Path) -> String {
	let mut out = String::new();
	emit_flattened_arcs(
		path,
		|x, y| out.push_str(&format!("{} {} m\n", fmt(x), fmt(y))),
		|x, y| out.push_str(&format!("{} {} l\n", fmt(x), fmt(y))),
		|c1x, c1y, c2x, c2y, x, y| out.push_str(&format!("{} {} {} {} {} {} c\n", fmt(c1x), fmt(c1y), fmt(c2x), fmt(c2y), fmt(x), fmt(y))),
		|| out.push_str("h\n"),
	);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn square() -> Path {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.line_to(10., 0.);
		p.line_to(10., 10.);
		p.line_to(0., 10.);
		p.close();
		p
	}

	#[test]
	fn svg_round_trips_through_parser() {
		let p = square();
		let data = p.emit(EmitTarget::Svg);
		let parsed = Path::parse(&data).unwrap();
		assert!((parsed.length() - p.length()).abs() < 1e-6);
	}

	#[test]
	fn postscript_emits_moveto_and_lineto() {
		let p = square();
		let data = p.emit(EmitTarget::PostScript);
		assert!(data.contains("moveto"));
		assert!(data.contains("lineto"));
		assert!(data.contains("closepath"));
	}

	#[test]
	fn pdf_converts_arcs_to_curves() {
		let mut p = Path::new();
		p.move_to(0., 0.);
		p.arc_to(10., 10., 0., false, true, 20., 0.);
		let data = p.emit(EmitTarget::Pdf);
		assert!(data.contains(" c\n"));
		assert!(!data.contains(" a\n"));
	}
}
