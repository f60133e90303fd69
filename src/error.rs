//! Error kinds.
//!
//! Builders never fail (degenerate input is silently canonicalized or discarded) and intersection
//! kernels never fail (empty output is a valid result); only the SVG path-data parser, direct
//! curve/curve intersection requests for unsupported pairs, and truly-impossible internal states
//! surface an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
	/// The SVG path-data grammar was violated. Carries the byte offset into the source string and
	/// a human-readable reason.
	#[error("invalid path data at offset {offset}: {reason}")]
	Parse { offset: usize, reason: String },

	/// An internal impossibility was reached (e.g. a parameter fell outside an elliptic arc's
	/// angular range while splitting). This indicates a bug, not a bad input, and is fatal only to
	/// the call that raised it; a caller may retry on a grid-snapped copy of its input.
	#[error("degenerate geometry: {0}")]
	DegenerateGeometry(String),

	/// A segment-pair combination that the core intentionally does not implement (quad-quad,
	/// cube-cube, or any pairing with two elliptical arcs) was requested directly rather than
	/// reached through the flatten-before-boolean pipeline.
	#[error("unsupported segment-pair intersection: {0}")]
	Unsupported(String),
}

pub type PathResult<T> = Result<T, PathError>;
