//! Numerical routines for the estimator distributions
//!
//! Log-space evaluation of the gamma/beta special functions and the two
//! discrete distributions the upper-bound searches walk: the beta-binomial
//! (Bayesian search) and the hypergeometric (sensitivity-adjusted search).
//! Everything is computed through the log-gamma function so that population
//! sizes in the thousands stay well inside `f64` range.

use std::f64::consts::PI;

/// Log-gamma via Lanczos approximation (g=7, n=9 coefficients).
#[allow(clippy::excessive_precision)]
#[must_use]
pub fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        let lnpi_sin = (PI * x).sin().abs().ln();
        PI.ln() - lnpi_sin - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut ag = COEFFS[0];
        for (i, &c) in COEFFS[1..].iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let denom = x + (i as f64) + 1.0;
            ag += c / denom;
        }
        let t = x + 7.5;
        0.5f64.mul_add((2.0 * PI).ln(), (x + 0.5) * t.ln()) - t + ag.ln()
    }
}

/// Log of the Beta function: ln B(a, b) = ln Gamma(a) + ln Gamma(b) - ln Gamma(a+b).
#[must_use]
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Log of the binomial coefficient C(n, k).
///
/// Returns negative infinity outside the support (`k > n`), so callers can
/// treat impossible draws as zero probability mass without branching.
#[must_use]
pub fn ln_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    #[allow(clippy::cast_precision_loss)]
    let (n, k) = (n as f64, k as f64);
    ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)
}

/// Probability mass of the beta-binomial distribution at `k`.
///
/// `trials` draws with a Beta(`alpha`, `beta`) prior on the per-draw
/// probability:
///
/// P(k) = C(trials, k) * B(k + alpha, trials - k + beta) / B(alpha, beta)
#[must_use]
pub fn beta_binomial_pmf(k: u64, trials: u64, alpha: f64, beta: f64) -> f64 {
    if k > trials {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let (kf, tf) = (k as f64, trials as f64);
    let ln_pmf =
        ln_choose(trials, k) + ln_beta(kf + alpha, tf - kf + beta) - ln_beta(alpha, beta);
    ln_pmf.exp()
}

/// Probability mass of the hypergeometric distribution at `y`.
///
/// Drawing `sample` animals without replacement from a population of
/// `population` containing `marked` diseased animals:
///
/// P(y) = C(marked, y) * C(population - marked, sample - y) / C(population, sample)
#[must_use]
pub fn hypergeometric_pmf(y: u64, population: u64, marked: u64, sample: u64) -> f64 {
    if y > marked || y > sample || sample > population {
        return 0.0;
    }
    // Not enough unmarked animals to fill the rest of the sample
    if sample - y > population - marked {
        return 0.0;
    }
    let ln_pmf = ln_choose(marked, y) + ln_choose(population - marked, sample - y)
        - ln_choose(population, sample);
    ln_pmf.exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    // --- ln_gamma ---

    #[test]
    fn ln_gamma_at_one() {
        assert!((ln_gamma(1.0)).abs() < TOL);
    }

    #[test]
    fn ln_gamma_at_two() {
        assert!((ln_gamma(2.0)).abs() < TOL);
    }

    #[test]
    fn ln_gamma_at_half() {
        // Gamma(1/2) = sqrt(pi)
        let expected = PI.sqrt().ln();
        let actual = ln_gamma(0.5);
        assert!(
            (actual - expected).abs() < 1e-9,
            "ln_gamma(0.5): expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ln_gamma_at_five() {
        // Gamma(5) = 4! = 24
        let expected = 24.0f64.ln();
        let actual = ln_gamma(5.0);
        assert!(
            (actual - expected).abs() < 1e-9,
            "ln_gamma(5): expected {expected}, got {actual}"
        );
    }

    // --- ln_choose ---

    #[test]
    fn ln_choose_small_values() {
        assert!((ln_choose(5, 2).exp() - 10.0).abs() < 1e-9);
        assert!((ln_choose(10, 3).exp() - 120.0).abs() < 1e-7);
        assert!((ln_choose(4, 0).exp() - 1.0).abs() < TOL);
        assert!((ln_choose(4, 4).exp() - 1.0).abs() < TOL);
    }

    #[test]
    fn ln_choose_out_of_support() {
        assert!(ln_choose(3, 4).is_infinite());
        assert!(ln_choose(3, 4) < 0.0);
    }

    // --- beta-binomial ---

    #[test]
    fn beta_binomial_sums_to_one() {
        let (trials, a, b) = (12u64, 0.2, 1.0 / 6.0);
        let total: f64 = (0..=trials).map(|k| beta_binomial_pmf(k, trials, a, b)).sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "beta-binomial mass should sum to 1, got {total}"
        );
    }

    #[test]
    fn beta_binomial_zero_mass_closed_form() {
        // P(0) = prod_{k<m} (b + k) / (a + b + k)
        let (trials, a, b) = (7u64, 0.25, 0.2);
        let expected: f64 = (0..trials)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let k = k as f64;
                (b + k) / (a + b + k)
            })
            .product();
        let actual = beta_binomial_pmf(0, trials, a, b);
        assert!(
            (actual - expected).abs() < 1e-9,
            "P(0): expected {expected}, got {actual}"
        );
    }

    #[test]
    fn beta_binomial_outside_support() {
        assert_eq!(beta_binomial_pmf(13, 12, 0.5, 0.5), 0.0);
    }

    // --- hypergeometric ---

    #[test]
    fn hypergeometric_matches_direct_counts() {
        // Population 10, 4 marked, sample 3: P(1) = C(4,1) C(6,2) / C(10,3) = 60/120
        let actual = hypergeometric_pmf(1, 10, 4, 3);
        assert!((actual - 0.5).abs() < 1e-9, "got {actual}");
        // P(0) = C(6,3)/C(10,3) = 20/120
        let actual = hypergeometric_pmf(0, 10, 4, 3);
        assert!((actual - 20.0 / 120.0).abs() < 1e-9, "got {actual}");
    }

    #[test]
    fn hypergeometric_sums_to_one() {
        let (population, marked, sample) = (20u64, 6u64, 5u64);
        let total: f64 = (0..=sample)
            .map(|y| hypergeometric_pmf(y, population, marked, sample))
            .sum();
        assert!((total - 1.0).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn hypergeometric_outside_support() {
        // More draws requested than unmarked animals available
        assert_eq!(hypergeometric_pmf(0, 10, 8, 5), 0.0);
        assert_eq!(hypergeometric_pmf(6, 10, 4, 5), 0.0);
    }
}
