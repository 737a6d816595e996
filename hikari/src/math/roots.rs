use num::complex::Complex64;

use crate::hikari_trace;

/// Iteration cap for [real_roots]. Polynomials that don't settle by then are
/// treated as having no real roots.
pub const MAX_ITERATIONS: usize = 500;
// Largest root movement, relative to root magnitude, that counts as converged
const PRECISION: f64 = 1e-12;
// Largest imaginary part, relative to root magnitude, that still counts as real
const REAL_TOLERANCE: f64 = 1e-6;
// Backward error at which every estimate is as good as the arithmetic allows.
// Clustered roots stall the movement test well above PRECISION.
const BACKWARD_ERROR: f64 = 1e-14;
// Leading coefficients below this are dropped
const DEGENERATE: f64 = 1e-12;

/// Solves `a*t^2 + b*t + c = 0`, returning the real roots in ascending order.
/// Returns `None` if the roots are complex. `a` must not be zero.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let d = b * b - 4.0 * a * c;
    if d < 0.0 {
        return None;
    }
    let rd = d.sqrt();

    // Avoid cancellation by never subtracting nearly equal values
    let q = if b < 0.0 {
        -0.5 * (b - rd)
    } else {
        -0.5 * (b + rd)
    };
    if q == 0.0 {
        // b and d are both zero so c is too
        return Some((0.0, 0.0));
    }

    let mut t0 = q / a;
    let mut t1 = c / q;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

/// Finds the real roots of the polynomial with `coeffs`, highest degree first,
/// in ascending order. Roots of multiplicity are reported once per multiplicity.
///
/// Degrees above two are solved with the Durand–Kerner iteration.
pub fn real_roots(coeffs: &[f64]) -> Vec<f64> {
    let scale = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if scale == 0.0 {
        return Vec::new();
    }
    let first = coeffs
        .iter()
        .position(|c| c.abs() > DEGENERATE * scale)
        .unwrap_or(coeffs.len());
    let coeffs = &coeffs[first..];

    match coeffs.len() {
        0 | 1 => Vec::new(),
        2 => vec![-coeffs[1] / coeffs[0]],
        3 => solve_quadratic(coeffs[0], coeffs[1], coeffs[2])
            .map_or_else(Vec::new, |(t0, t1)| vec![t0, t1]),
        _ => durand_kerner(coeffs),
    }
}

fn durand_kerner(coeffs: &[f64]) -> Vec<f64> {
    let degree = coeffs.len() - 1;
    let monic: Vec<f64> = coeffs.iter().map(|c| c / coeffs[0]).collect();

    // Cauchy's bound puts every root inside this radius
    let radius = 1.0 + monic[1..].iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    let mut z: Vec<Complex64> = (0..degree)
        .map(|k| {
            let angle = std::f64::consts::TAU * (k as f64) / (degree as f64) + 0.4;
            Complex64::from_polar(radius, angle)
        })
        .collect();

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let mut max_movement = 0.0_f64;
        let mut max_error = 0.0_f64;
        for i in 0..degree {
            let numerator = eval(&monic, z[i]);
            let magnitude = eval_abs(&monic, z[i].norm());
            if magnitude > 0.0 {
                max_error = max_error.max(numerator.norm() / magnitude);
            }
            let denominator = (0..degree)
                .filter(|&j| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, j| acc * (z[i] - z[j]));
            if denominator.norm() == 0.0 {
                // Coincident estimates, nudge apart and keep going
                z[i] += Complex64::new(PRECISION, PRECISION);
                max_movement = f64::INFINITY;
                continue;
            }
            let delta = numerator / denominator;
            z[i] -= delta;
            max_movement = max_movement.max(delta.norm() / z[i].norm().max(1.0));
        }
        if max_movement < PRECISION || max_error < BACKWARD_ERROR {
            converged = true;
            break;
        }
    }

    if !converged {
        hikari_trace!("Durand-Kerner did not converge for {:?}", coeffs);
        return Vec::new();
    }

    let mut roots: Vec<f64> = z
        .iter()
        .filter(|r| r.im.abs() < REAL_TOLERANCE * r.re.abs().max(1.0))
        .map(|r| polish(&monic, r.re))
        .filter(|r| r.is_finite())
        .collect();
    roots.sort_by(f64::total_cmp);
    roots
}

// Horner's scheme
fn eval(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

// Horner's scheme over coefficient magnitudes, bounds the rounding in eval
fn eval_abs(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c.abs())
}

// A couple of real Newton steps to tighten the root that was accepted as real
fn polish(coeffs: &[f64], mut x: f64) -> f64 {
    for _ in 0..2 {
        let (p, dp) = coeffs
            .iter()
            .fold((0.0, 0.0), |(p, dp), &c| (p * x + c, dp * x + p));
        if dp.abs() < DEGENERATE {
            break;
        }
        let next = x - p / dp;
        // Don't let a flat neighbourhood throw the root away
        if (next - x).abs() > 1e-3 * x.abs().max(1.0) {
            break;
        }
        x = next;
    }
    x
}
