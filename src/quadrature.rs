//! Gauss–Legendre quadrature of orders 3, 5, and 7.
//!
//! Used to integrate arc-length integrands (elliptical arc length, cubic length when a closed
//! form isn't convenient) without the cost of a general-purpose adaptive integrator.

/// Quadrature order, selecting a fixed node/weight table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
	Three,
	Five,
	Seven,
}

fn nodes_weights(order: Order) -> &'static [(f64, f64)] {
	match order {
		// Nodes/weights for Gauss-Legendre quadrature on [-1, 1].
		Order::Three => &[(0., 0.8888888888888888), (-0.7745966692414834, 0.5555555555555556), (0.7745966692414834, 0.5555555555555556)],
		Order::Five => &[
			(0., 0.5688888888888889),
			(-0.5384693101056831, 0.4786286704993665),
			(0.5384693101056831, 0.4786286704993665),
			(-0.9061798459386640, 0.2369268850561891),
			(0.9061798459386640, 0.2369268850561891),
		],
		Order::Seven => &[
			(0., 0.4179591836734694),
			(-0.4058451513773972, 0.3818300505051189),
			(0.4058451513773972, 0.3818300505051189),
			(-0.7415311855993945, 0.2797053914892766),
			(0.7415311855993945, 0.2797053914892766),
			(-0.9491079123427585, 0.1294849661688697),
			(0.9491079123427585, 0.1294849661688697),
		],
	}
}

/// Integrate `f` over `[a, b]` using fixed-order Gauss-Legendre quadrature.
pub fn integrate(f: impl Fn(f64) -> f64, a: f64, b: f64, order: Order) -> f64 {
	let half_width = (b - a) / 2.;
	let midpoint = (a + b) / 2.;
	nodes_weights(order).iter().map(|&(node, weight)| weight * f(midpoint + half_width * node)).sum::<f64>() * half_width
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn integrates_polynomial_exactly() {
		// ∫_0^1 x^2 dx = 1/3, exactly representable by order-3 Gauss-Legendre.
		let result = integrate(|x| x * x, 0., 1., Order::Three);
		assert!((result - 1. / 3.).abs() < 1e-12);
	}

	#[test]
	fn integrates_sine_closely() {
		// ∫_0^π sin(x) dx = 2
		let result = integrate(|x| x.sin(), 0., std::f64::consts::PI, Order::Seven);
		assert!((result - 2.).abs() < 1e-6);
	}
}
