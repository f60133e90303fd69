//! SVG 1.1 path-data grammar parser.
//!
//! Walks the `d` attribute grammar by hand (no external parser-combinator crate; the grammar is
//! small enough that one buys nothing), tracking a byte offset so a malformed input can report
//! exactly where it broke.

use super::Path;
use crate::error::{PathError, PathResult};
use glam::DVec2;

struct Cursor<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn new(src: &'a str) -> Self {
		Cursor { src, bytes: src.as_bytes(), pos: 0 }
	}

	fn error(&self, reason: impl Into<String>) -> PathError {
		PathError::Parse { offset: self.pos, reason: reason.into() }
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn skip_whitespace_and_commas(&mut self) {
		while let Some(b) = self.peek() {
			if b.is_ascii_whitespace() || b == b',' {
				self.pos += 1;
			} else {
				break;
			}
		}
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn at_end(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	fn peek_is_command(&self) -> bool {
		self.peek().map(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E').unwrap_or(false)
	}

	/// Whether a number could start here (sign, digit, or `.`); used to detect implicit command
	/// repetition, where a new number immediately follows the previous one's arguments.
	fn peek_is_number_start(&mut self) -> bool {
		self.skip_whitespace_and_commas();
		matches!(self.peek(), Some(b) if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+')
	}

	fn next_command(&mut self) -> Option<(u8, usize)> {
		self.skip_whitespace();
		let start = self.pos;
		let b = self.peek()?;
		if b.is_ascii_alphabetic() {
			self.pos += 1;
			Some((b, start))
		} else {
			None
		}
	}

	fn number(&mut self) -> PathResult<f64> {
		self.skip_whitespace_and_commas();
		let start = self.pos;
		if matches!(self.peek(), Some(b'+') | Some(b'-')) {
			self.pos += 1;
		}
		let mut saw_digit = false;
		while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
			self.pos += 1;
			saw_digit = true;
		}
		if self.peek() == Some(b'.') {
			self.pos += 1;
			while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
				self.pos += 1;
				saw_digit = true;
			}
		}
		if !saw_digit {
			return Err(self.error("expected a number"));
		}
		if matches!(self.peek(), Some(b'e') | Some(b'E')) {
			let mut lookahead = self.pos + 1;
			if matches!(self.bytes.get(lookahead), Some(b'+') | Some(b'-')) {
				lookahead += 1;
			}
			if matches!(self.bytes.get(lookahead), Some(b) if b.is_ascii_digit()) {
				self.pos = lookahead;
				while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
					self.pos += 1;
				}
			}
		}
		self.src[start..self.pos].parse::<f64>().map_err(|_| self.error("malformed number"))
	}

	/// A flag is a single `0` or `1` digit, optionally with no separator from the next token.
	fn flag(&mut self) -> PathResult<bool> {
		self.skip_whitespace_and_commas();
		match self.peek() {
			Some(b'0') => {
				self.pos += 1;
				Ok(false)
			}
			Some(b'1') => {
				self.pos += 1;
				Ok(true)
			}
			_ => Err(self.error("expected a flag (0 or 1)")),
		}
	}
}

/// Parse SVG path-data syntax into a `Path`, per the W3C SVG 1.1 grammar.
pub fn parse(d: &str) -> PathResult<Path> {
	let mut cursor = Cursor::new(d);
	let mut path = Path::new();

	// Tracks the previous command's kind and its final control point, for `S`/`T` control-point
	// inference and to know which commands implicitly repeat.
	let mut prev_cubic_control: Option<DVec2> = None;
	let mut prev_quad_control: Option<DVec2> = None;
	let mut prev_command: Option<u8> = None;

	cursor.skip_whitespace();
	if cursor.at_end() {
		return Ok(path);
	}

	let Some((first, offset)) = cursor.next_command() else {
		return Err(PathError::Parse { offset: cursor.pos, reason: "path data must start with a command".into() });
	};
	if !matches!(first, b'M' | b'm') {
		return Err(PathError::Parse { offset, reason: "path data must start with M or m".into() });
	}

	let mut command = first;
	loop {
		match command.to_ascii_uppercase() {
			b'M' => {
				let x = cursor.number()?;
				let y = cursor.number()?;
				let p = if command == b'm' { path.position() + DVec2::new(x, y) } else { DVec2::new(x, y) };
				path.move_to(p.x, p.y);
				// Subsequent coordinate pairs without a new command letter are implicit LineTos.
				let implicit = if command == b'm' { b'l' } else { b'L' };
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
				command = implicit;
				if !cursor.peek_is_number_start() {
					command = b'\0';
				}
			}
			b'L' => {
				let x = cursor.number()?;
				let y = cursor.number()?;
				let p = if command == b'l' { path.position() + DVec2::new(x, y) } else { DVec2::new(x, y) };
				path.line_to(p.x, p.y);
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'H' => {
				let x = cursor.number()?;
				let y = path.position().y;
				let x = if command == b'h' { path.position().x + x } else { x };
				path.line_to(x, y);
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'V' => {
				let y = cursor.number()?;
				let x = path.position().x;
				let y = if command == b'v' { path.position().y + y } else { y };
				path.line_to(x, y);
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'C' => {
				let relative = command == b'c';
				let origin = path.position();
				let mut c1 = DVec2::new(cursor.number()?, cursor.number()?);
				let mut c2 = DVec2::new(cursor.number()?, cursor.number()?);
				let mut end = DVec2::new(cursor.number()?, cursor.number()?);
				if relative {
					c1 += origin;
					c2 += origin;
					end += origin;
				}
				path.cube_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
				prev_cubic_control = Some(c2);
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'S' => {
				let relative = command == b's';
				let origin = path.position();
				let c1 = match prev_command.map(|c| c.to_ascii_uppercase()) {
					Some(b'C') | Some(b'S') => origin + (origin - prev_cubic_control.unwrap_or(origin)),
					_ => origin,
				};
				let mut c2 = DVec2::new(cursor.number()?, cursor.number()?);
				let mut end = DVec2::new(cursor.number()?, cursor.number()?);
				if relative {
					c2 += origin;
					end += origin;
				}
				path.cube_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
				prev_cubic_control = Some(c2);
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'Q' => {
				let relative = command == b'q';
				let origin = path.position();
				let mut control = DVec2::new(cursor.number()?, cursor.number()?);
				let mut end = DVec2::new(cursor.number()?, cursor.number()?);
				if relative {
					control += origin;
					end += origin;
				}
				path.quad_to(control.x, control.y, end.x, end.y);
				prev_quad_control = Some(control);
				prev_cubic_control = None;
				prev_command = Some(command);
			}
			b'T' => {
				let relative = command == b't';
				let origin = path.position();
				let control = match prev_command.map(|c| c.to_ascii_uppercase()) {
					Some(b'Q') | Some(b'T') => origin + (origin - prev_quad_control.unwrap_or(origin)),
					_ => origin,
				};
				let mut end = DVec2::new(cursor.number()?, cursor.number()?);
				if relative {
					end += origin;
				}
				path.quad_to(control.x, control.y, end.x, end.y);
				prev_quad_control = Some(control);
				prev_cubic_control = None;
				prev_command = Some(command);
			}
			b'A' => {
				let relative = command == b'a';
				let origin = path.position();
				let rx = cursor.number()?;
				let ry = cursor.number()?;
				let rotation = cursor.number()?;
				let large_arc = cursor.flag()?;
				let sweep = cursor.flag()?;
				let mut end = DVec2::new(cursor.number()?, cursor.number()?);
				if relative {
					end += origin;
				}
				path.arc_to(rx, ry, rotation, large_arc, sweep, end.x, end.y);
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
			}
			b'Z' => {
				path.close();
				prev_cubic_control = None;
				prev_quad_control = None;
				prev_command = Some(command);
			}
			0 => {}
			_ => return Err(cursor.error(format!("unknown command '{}'", command as char))),
		}

		cursor.skip_whitespace_and_commas();
		if cursor.at_end() {
			break;
		}
		if cursor.peek_is_command() {
			let (next, _) = cursor.next_command().unwrap();
			command = next;
		} else if matches!(command.to_ascii_uppercase(), b'Z') {
			// A number cannot legally follow Z without a new command letter.
			return Err(cursor.error("expected a command after 'Z'"));
		} else if cursor.peek_is_number_start() {
			// Implicit repetition of the previous command (M repeats as its implicit L).
			command = match command {
				b'M' => b'L',
				b'm' => b'l',
				other => other,
			};
		} else {
			break;
		}
	}

	Ok(path)
}

/// Parse, panicking on malformed input. For call sites with a compile-time-known-valid literal.
pub struct MustParse;

impl MustParse {
	pub fn parse(d: &str) -> Path {
		parse(d).unwrap_or_else(|e| panic!("MustParse::parse: {e}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_concrete_scenario_square() {
		let path = parse("M0 0L10 0L10 10L0 10z").unwrap();
		let b = path.bounds();
		assert_eq!((b.x0, b.y0, b.x1, b.y1), (0., 0., 10., 10.));
		assert!((path.length() - 40.).abs() < 1e-9);
	}

	#[test]
	fn implicit_line_to_after_move() {
		let path = parse("M0 0 10 10 20 0").unwrap();
		assert_eq!(path.segment_count(), 2);
	}

	#[test]
	fn relative_commands_are_offset_from_pen() {
		let absolute = parse("M0 0L10 0L10 10").unwrap();
		let relative = parse("m0 0l10 0l0 10").unwrap();
		for (a, b) in absolute.coords().iter().zip(relative.coords().iter()) {
			assert!(a.distance(*b) < 1e-9);
		}
	}

	#[test]
	fn smooth_cubic_infers_reflected_control_point() {
		let path = parse("M0 0C0 10 10 10 10 0S20 -10 20 0").unwrap();
		assert_eq!(path.segment_count(), 2);
	}

	#[test]
	fn horizontal_and_vertical_shorthands() {
		let path = parse("M0 0H10V10").unwrap();
		assert_eq!(path.position(), DVec2::new(10., 10.));
	}

	#[test]
	fn arc_command_parses_flags_without_separators() {
		let path = parse("M0 0A10 10 0 0110 0").unwrap();
		assert_eq!(path.segment_count(), 1);
	}

	#[test]
	fn missing_leading_move_to_is_an_error() {
		assert!(parse("L10 0").is_err());
	}

	#[test]
	fn malformed_number_reports_offset() {
		let err = parse("M0 0L a").unwrap_err();
		assert!(matches!(err, PathError::Parse { .. }));
	}

	#[test]
	fn must_parse_panics_on_malformed_input() {
		let result = std::panic::catch_unwind(|| MustParse::parse("not a path"));
		assert!(result.is_err());
	}
}
