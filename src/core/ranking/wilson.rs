//! Rating Term
//!
//! Lower bound of the 95% Wilson score interval over star ratings. Each star
//! level splits one vote between a positive and a negative share, so a
//! handful of ratings is pulled toward the middle instead of letting one
//! five-star vote dominate.

use super::{clamp_term, TERM_CAP};
use crate::core::search::models::RatingCounts;

/// z for a 95% confidence interval
pub const Z: f64 = 1.96;

/// Positive share per star level 1..=5
const POSITIVE_SHARE: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Negative share per star level 1..=5
const NEGATIVE_SHARE: [f64; 5] = [1.0, 0.75, 0.5, 0.25, 0.0];

/// Weighted positive and negative vote totals.
pub fn weighted_votes(counts: &RatingCounts) -> (f64, f64) {
    counts
        .0
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(p, q), (i, &c)| {
            let c = c as f64;
            (p + c * POSITIVE_SHARE[i], q + c * NEGATIVE_SHARE[i])
        })
}

/// Wilson lower bound in [0, 1]; 0 when there are no ratings.
pub fn wilson_lower_bound(counts: &RatingCounts) -> f64 {
    let (p, q) = weighted_votes(counts);
    let n = p + q;
    if n <= 0.0 {
        return 0.0;
    }

    let z2 = Z * Z;
    let centre = (p + z2 / 2.0) / n;
    let spread = Z * ((p * q) / n + z2 / 4.0).sqrt() / n;
    (centre - spread) / (1.0 + z2 / n)
}

/// Rating term scaled to [0, 33.33].
pub fn rating_term(counts: &RatingCounts) -> f64 {
    clamp_term(wilson_lower_bound(counts) * TERM_CAP)
}
