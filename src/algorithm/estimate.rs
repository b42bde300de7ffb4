//! Upper-bound prevalence estimation
//!
//! Third pipeline stage: the three numerical searches that map an eligible
//! area's (N, n, confidence[, sensitivity]) to an upper-bound prevalence
//! fraction, and the driver that runs them for every eligible area.
//!
//! All three searches walk a discrete distribution one unit at a time and
//! stop at the first index satisfying the confidence condition. Each search
//! is capped at its valid bound and fails with `DegenerateInput` when the
//! bound is exhausted without the stopping condition holding; `n >= N` is
//! rejected up front for the same reason.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::Parameters;
use crate::error::{PrevalenceError, Result};
use crate::models::{EligibleArea, EstimationResult};
use crate::stats;

/// Bayesian upper bound on undetected prevalence.
///
/// Models the number of undetected diseased animals `i` among the `N - n`
/// animals outside the negative sample with a beta-binomial distribution
/// (trials `N - n`, shapes `1/(n+2)` and `1/(n+3)`), accumulates probability
/// mass from `i = 0` and returns `i / N` at the first `i` where the
/// cumulative reaches or exceeds `confidence`.
pub fn upper_bayes(population: u64, negatives: u64, confidence: f64) -> Result<f64> {
    if negatives >= population {
        return Err(degenerate(negatives, population));
    }
    let trials = population - negatives;
    #[allow(clippy::cast_precision_loss)]
    let n = negatives as f64;
    let alpha_shape = 1.0 / (n + 2.0);
    let beta_shape = 1.0 / (n + 3.0);

    let mut cumulative = 0.0;
    for i in 0..=trials {
        cumulative += stats::beta_binomial_pmf(i, trials, alpha_shape, beta_shape);
        if cumulative >= confidence {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f64 / population as f64;
            return Ok(fraction);
        }
    }
    Err(degenerate(negatives, population))
}

/// Frequentist upper bound on undetected prevalence.
///
/// Increments `j` and recomputes `p = (N - n - j) / (N - j)` fresh from the
/// closed form until `p <= 1 - confidence`, then returns `j / N`. The ratio
/// is deliberately not a running product of per-step probabilities; the
/// source system's literal recurrence is preserved.
pub fn upper_freq(population: u64, negatives: u64, confidence: f64) -> Result<f64> {
    if negatives >= population {
        return Err(degenerate(negatives, population));
    }
    let alpha = 1.0 - confidence;
    let bound = population - negatives;

    let mut j: u64 = 0;
    let mut p = 1.0;
    while p > alpha {
        j += 1;
        if j > bound {
            return Err(degenerate(negatives, population));
        }
        #[allow(clippy::cast_precision_loss)]
        let remaining = (population - j) as f64;
        p = if remaining > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let undetected = (bound - j) as f64;
            undetected / remaining
        } else {
            0.0
        };
    }
    #[allow(clippy::cast_precision_loss)]
    let fraction = j as f64 / population as f64;
    Ok(fraction)
}

/// Frequentist upper bound adjusted for imperfect test sensitivity.
///
/// For each hypothesized count `d` of diseased-but-undetected animals,
/// computes the probability `p2` that all `n` tests came back negative: the
/// hypergeometric chance of drawing `y` diseased animals into the sample,
/// weighted by `(1 - sensitivity)^y` for all of them testing falsely
/// negative, summed over `y`. Increments `d` while `p2 > 1 - confidence` and
/// returns `d / N` once the loop exits.
pub fn upper_freq_se(
    population: u64,
    negatives: u64,
    confidence: f64,
    sensitivity: f64,
) -> Result<f64> {
    if negatives >= population {
        return Err(degenerate(negatives, population));
    }
    let alpha = 1.0 - confidence;
    let false_negative = 1.0 - sensitivity;

    let mut d: u64 = 0;
    let mut p2 = 1.0;
    while p2 > alpha {
        d += 1;
        if d > population {
            return Err(degenerate(negatives, population));
        }
        p2 = (0..=negatives.min(d))
            .map(|y| {
                #[allow(clippy::cast_possible_truncation)]
                let miss_all = false_negative.powi(y as i32);
                stats::hypergeometric_pmf(y, population, d, negatives) * miss_all
            })
            .sum();
    }
    #[allow(clippy::cast_precision_loss)]
    let fraction = d as f64 / population as f64;
    Ok(fraction)
}

/// Outcome of the per-area estimation stage.
#[derive(Debug, Clone)]
pub struct EstimationOutcome {
    /// One result per estimated area, in eligible-area order
    pub results: Vec<EstimationResult>,
    /// Eligible areas that had no demography record and were not estimated
    pub missing_demography: Vec<String>,
}

/// Run all three estimators for every eligible area.
///
/// Areas are independent, so the searches run on the rayon pool; results are
/// collected back into eligible-area order. An eligible area with no
/// demography record is skipped with a warning and reported to the caller.
///
/// # Errors
/// `DegenerateInput` (fatal to the run) when any area's search fails to
/// converge within valid bounds, including `n >= N`.
pub fn estimate_areas(
    eligible: &[EligibleArea],
    populations: &HashMap<String, u64>,
    params: &Parameters,
) -> Result<EstimationOutcome> {
    let mut missing_demography = Vec::new();
    let mut inputs = Vec::new();
    for area in eligible {
        match populations.get(&area.sub_area_id) {
            Some(&population) => inputs.push((area, population)),
            None => {
                log::warn!(
                    "No demography record for eligible sub-area {}; skipping estimation",
                    area.sub_area_id
                );
                missing_demography.push(area.sub_area_id.clone());
            }
        }
    }

    let confidence = params.confidence();
    let sensitivity = params.sensitivity;
    let results = inputs
        .par_iter()
        .map(|&(area, population)| {
            estimate_area(area, population, confidence, sensitivity)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EstimationOutcome {
        results,
        missing_demography,
    })
}

fn estimate_area(
    area: &EligibleArea,
    population: u64,
    confidence: f64,
    sensitivity: f64,
) -> Result<EstimationResult> {
    let attach = |err| attach_area(err, &area.sub_area_id);
    let bayes_upper = upper_bayes(population, area.negatives, confidence).map_err(attach)?;
    let freq_upper = upper_freq(population, area.negatives, confidence).map_err(attach)?;
    let freq_se_upper =
        upper_freq_se(population, area.negatives, confidence, sensitivity).map_err(attach)?;

    log::debug!(
        "Estimated sub-area {}: N = {population}, n = {}, bayes = {bayes_upper:.6}, freq = {freq_upper:.6}, freq.se = {freq_se_upper:.6}",
        area.sub_area_id,
        area.negatives
    );

    Ok(EstimationResult {
        sub_area_id: area.sub_area_id.clone(),
        population,
        negatives: area.negatives,
        bayes_upper,
        freq_upper,
        freq_se_upper,
    })
}

const fn degenerate(negatives: u64, population: u64) -> PrevalenceError {
    PrevalenceError::DegenerateInput {
        sub_area_id: String::new(),
        negatives,
        population,
    }
}

fn attach_area(err: PrevalenceError, area: &str) -> PrevalenceError {
    match err {
        PrevalenceError::DegenerateInput {
            negatives,
            population,
            ..
        } => PrevalenceError::DegenerateInput {
            sub_area_id: area.to_string(),
            negatives,
            population,
        },
        other => other,
    }
}
