//! Percentage shares for pie charts.
//!
//! Shares are rounded with the largest-remainder method: every bucket gets the
//! floor of its exact share in units of the chosen precision, and the units
//! left over go to the buckets with the largest fractional parts. The result
//! sums to exactly 100 whenever the total is positive.

use lens_core::{Bucket, Degradation};

const MAX_DECIMALS: u32 = 4;

/// Shares at two decimals.
#[must_use]
pub fn percentage_shares(buckets: &[Bucket]) -> Vec<Bucket> {
    percentage_shares_with(buckets, 2)
}

/// Shares at `decimals` (capped at 4) decimal places.
///
/// Negative and non-finite bucket values count as `0`. A zero total yields
/// every share `0` instead of dividing by zero.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn percentage_shares_with(buckets: &[Bucket], decimals: u32) -> Vec<Bucket> {
    let decimals = decimals.min(MAX_DECIMALS);
    let weights: Vec<f64> = buckets
        .iter()
        .map(|b| {
            if b.value.is_finite() && b.value > 0.0 {
                b.value
            } else {
                0.0
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 || !total.is_finite() {
        if !buckets.is_empty() {
            Degradation::EmptyInput.report("share total is zero");
        }
        return buckets.iter().map(|b| Bucket::new(b.label.clone(), 0.0)).collect();
    }

    let scale = 10_u64.pow(decimals);
    let units_total = 100 * scale;

    let exact: Vec<f64> = weights
        .iter()
        .map(|w| w * units_total as f64 / total)
        .collect();
    let mut units: Vec<u64> = exact.iter().map(|e| e.floor() as u64).collect();

    let assigned: u64 = units.iter().sum();
    let leftover = units_total.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..exact.len()).filter(|&i| weights[i] > 0.0).collect();
    // Stable: equal remainders favour the earlier bucket.
    let remainder = |i: usize| exact[i] - exact[i].floor();
    order.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)));
    for &idx in order.iter().take(leftover) {
        units[idx] += 1;
    }

    buckets
        .iter()
        .zip(units)
        .map(|(b, u)| Bucket::new(b.label.clone(), u as f64 / scale as f64))
        .collect()
}
