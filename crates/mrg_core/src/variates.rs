//! Non-uniform variates built on any source of `(0, 1)` uniforms.
//!
//! The samplers are free functions over [`UniformSource`], so simulation
//! models can swap the underlying generator (or a scripted source in tests)
//! without touching the algorithms. Each sampler consumes a data-dependent
//! number of uniforms; callers relying on common random numbers should give
//! every random input its own generator.

use std::f64::consts::E;

use crate::error::RngError;

/// Anything that can produce uniform draws in the open interval `(0, 1)`.
pub trait UniformSource {
    fn draw(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// `4 * exp(-0.5) / sqrt(2)`, the Kinderman-Monahan acceptance constant.
const NV_MAGICCONST: f64 = 1.715_527_769_921_413_5;
/// `1 + ln(4.5)`.
const SG_MAGICCONST: f64 = 2.504_077_396_776_274;
const LOG4: f64 = std::f64::consts::LN_2 * 2.0;
/// Means at or above this use the rounded normal approximation.
const POISSON_NORMAL_THRESHOLD: f64 = 35.0;

/// Uniform on `[a, b)` (or `(b, a]` when `b < a`).
pub fn uniform<S: UniformSource + ?Sized>(rng: &mut S, a: f64, b: f64) -> f64 {
    a + (b - a) * rng.draw()
}

/// Exponential with rate `lambda`.
pub fn expovariate<S: UniformSource + ?Sized>(rng: &mut S, lambda: f64) -> Result<f64, RngError> {
    if !(lambda > 0.0 && lambda.is_finite()) {
        return Err(RngError::configuration(format!(
            "exponential rate must be positive and finite, got {}",
            lambda
        )));
    }
    Ok(-(1.0 - rng.draw()).ln() / lambda)
}

/// Normal with mean `mu` and standard deviation `sigma`, by the
/// Kinderman-Monahan ratio-of-uniforms method.
pub fn normalvariate<S: UniformSource + ?Sized>(rng: &mut S, mu: f64, sigma: f64) -> f64 {
    loop {
        let u1 = rng.draw();
        let u2 = 1.0 - rng.draw();
        let z = NV_MAGICCONST * (u1 - 0.5) / u2;
        if z * z / 4.0 <= -u2.ln() {
            return mu + z * sigma;
        }
    }
}

/// Gamma with shape `alpha` and scale `beta` (mean `alpha * beta`).
///
/// Uses Cheng's rejection method for `alpha > 1`, the exponential for
/// `alpha == 1` and Ahrens-Dieter GS below one.
pub fn gammavariate<S: UniformSource + ?Sized>(
    rng: &mut S,
    alpha: f64,
    beta: f64,
) -> Result<f64, RngError> {
    if !(alpha > 0.0 && beta > 0.0 && beta.is_finite() && (2.0 * alpha - 1.0).is_finite()) {
        return Err(RngError::configuration(format!(
            "gamma shape and scale must be positive and finite, got alpha={} beta={}",
            alpha, beta
        )));
    }

    if alpha > 1.0 {
        let ainv = (2.0 * alpha - 1.0).sqrt();
        let bbb = alpha - LOG4;
        let ccc = alpha + ainv;
        loop {
            let u1 = rng.draw();
            if !(1e-7 < u1 && u1 < 0.999_999_9) {
                continue;
            }
            let u2 = 1.0 - rng.draw();
            let v = (u1 / (1.0 - u1)).ln() / ainv;
            let x = alpha * v.exp();
            let z = u1 * u1 * u2;
            let r = bbb + ccc * v - x;
            if r + SG_MAGICCONST - 4.5 * z >= 0.0 || r >= z.ln() {
                return Ok(x * beta);
            }
        }
    }

    if alpha == 1.0 {
        return Ok(-(1.0 - rng.draw()).ln() * beta);
    }

    let b = (E + alpha) / E;
    loop {
        let p = b * rng.draw();
        let x = if p <= 1.0 {
            p.powf(1.0 / alpha)
        } else {
            -((b - p) / alpha).ln()
        };
        let u1 = rng.draw();
        let accept = if p > 1.0 {
            u1 <= x.powf(alpha - 1.0)
        } else {
            u1 <= (-x).exp()
        };
        if accept {
            return Ok(x * beta);
        }
    }
}

/// Poisson with mean `lambda`.
///
/// Below 35 this multiplies uniforms until the product falls under
/// `exp(-lambda)`; above it rounds a normal approximation and clips at zero.
pub fn poissonvariate<S: UniformSource + ?Sized>(rng: &mut S, lambda: f64) -> Result<u64, RngError> {
    if !(lambda >= 0.0 && lambda.is_finite()) {
        return Err(RngError::configuration(format!(
            "poisson mean must be non-negative and finite, got {}",
            lambda
        )));
    }

    if lambda >= POISSON_NORMAL_THRESHOLD {
        let approx = (lambda + lambda.sqrt() * normalvariate(rng, 0.0, 1.0) - 0.5).ceil();
        return Ok(approx.max(0.0) as u64);
    }

    let threshold = (-lambda).exp();
    let mut n = 0;
    let mut p = rng.draw();
    while p >= threshold {
        p *= rng.draw();
        n += 1;
    }
    Ok(n)
}

/// Binomial as the number of successes in `n` Bernoulli(`p`) trials.
pub fn binomialvariate<S: UniformSource + ?Sized>(
    rng: &mut S,
    n: u64,
    p: f64,
) -> Result<u64, RngError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(RngError::configuration(format!(
            "binomial probability must lie in [0, 1], got {}",
            p
        )));
    }
    Ok((0..n).filter(|_| rng.draw() < p).count() as u64)
}

/// `k` indices drawn with replacement from `0..n`, one uniform each.
pub fn choices<S: UniformSource + ?Sized>(
    rng: &mut S,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RngError> {
    if n == 0 && k > 0 {
        return Err(RngError::configuration(
            "cannot choose from an empty population",
        ));
    }
    Ok((0..k)
        .map(|_| ((rng.draw() * n as f64) as usize).min(n - 1))
        .collect())
}
