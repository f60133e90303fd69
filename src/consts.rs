// Implementation constants

/// Constant used to determine if `f64`s are equivalent.
pub const MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-3;
/// A stricter constant used to determine if `f64`s are equivalent.
pub const STRICT_MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-6;
/// Number of distances used in search algorithm for `project`.
pub const NUM_DISTANCES: usize = 5;
/// Maximum allowed angle that the normal of the `start` or `end` point can make with the normal of the corresponding handle for a curve to be considered scalable/simple.
pub const SCALABLE_CURVE_MAX_ENDPOINT_NORMAL_ANGLE: f64 = std::f64::consts::PI / 3.;

// Method argument defaults

/// Default `t` value used for the `curve_through_points` functions.
pub const DEFAULT_T_VALUE: f64 = 0.5;
/// Default LUT step size in `compute_lookup_table` function.
pub const DEFAULT_LUT_STEP_SIZE: i32 = 10;
/// Default number of subdivisions used in `length` calculation.
pub const DEFAULT_LENGTH_SUBDIVISIONS: i32 = 1000;
/// Default step size for `reduce` function.
pub const DEFAULT_REDUCE_STEP_SIZE: f64 = 0.01;

// SVG constants
pub const SVG_ARG_CUBIC: &str = "C";
pub const SVG_ARG_LINEAR: &str = "L";
pub const SVG_ARG_MOVE: &str = "M";
pub const SVG_ARG_QUADRATIC: &str = "Q";
pub const SVG_ARG_CLOSED: &str = "Z";

/// Default flattening tolerance (in path-data units; millimetres by convention).
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Default generic numeric epsilon.
pub const DEFAULT_EPSILON: f64 = 1e-10;
/// Angular epsilon used to classify tangent directions as aligned/anti-aligned at an intersection.
pub const DEFAULT_ANGLE_EPSILON: f64 = 1e-6;

/// Rule mapping winding/crossing counts to inside/outside, shared by `Path::interior`, the boolean operators, and `Settle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FillRule {
	#[default]
	NonZero,
	EvenOdd,
}

impl FillRule {
	/// Whether a signed winding number is considered "filled" under this rule.
	pub fn fills(&self, winding: i32) -> bool {
		match self {
			FillRule::NonZero => winding != 0,
			FillRule::EvenOdd => winding % 2 != 0,
		}
	}
}

/// Tunable constants threaded explicitly through the engine rather than held as process-wide state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
	/// Maximum flattening (Hausdorff) error.
	pub tolerance: f64,
	/// Generic numeric tolerance used for point/parameter comparisons.
	pub epsilon: f64,
	/// Default fill rule used by containment and boolean queries that don't take an explicit one.
	pub fill_rule: FillRule,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			tolerance: DEFAULT_TOLERANCE,
			epsilon: DEFAULT_EPSILON,
			fill_rule: FillRule::NonZero,
		}
	}
}
