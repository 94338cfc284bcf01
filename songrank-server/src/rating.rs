//! Elo rating math
//!
//! Pure functions, no state. Rating deltas are truncated toward zero when
//! converted back to integers, so a heavy favourite beating a weak opponent
//! can leave both ratings unchanged.

/// Maximum rating change per comparison
pub const K_FACTOR: f64 = 32.0;

/// Outcome value for "A wins"
pub const WIN: f64 = 1.0;
/// Outcome value for a draw
pub const DRAW: f64 = 0.5;
/// Outcome value for "B wins"
pub const LOSS: f64 = 0.0;

/// Probability that A is judged the stronger item
pub fn expected_score(rating_a: i64, rating_b: i64) -> f64 {
    // difference taken in f64; integer subtraction overflows at the extremes
    let diff = rating_b as f64 - rating_a as f64;
    1.0 / (1.0 + 10f64.powf(diff / 400.0))
}

/// New ratings after one comparison
///
/// `outcome` is A's actual score: 1.0 (A wins), 0.5 (draw), 0.0 (B wins).
/// Any value in [0, 1] is accepted.
pub fn update_ratings(rating_a: i64, rating_b: i64, outcome: f64) -> (i64, i64) {
    let delta_a = K_FACTOR * (outcome - expected_score(rating_a, rating_b));
    let delta_b = K_FACTOR * ((1.0 - outcome) - expected_score(rating_b, rating_a));

    // `as` truncates toward zero
    (
        rating_a.saturating_add(delta_a as i64),
        rating_b.saturating_add(delta_b as i64),
    )
}
