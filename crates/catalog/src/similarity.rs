//! Similarity ranker: weighted attribute matching against a reference car.
//!
//! The score is a sum of independent bonuses (see [`weights`]); candidates are
//! stably sorted by score, highest first, so equal scores keep the order the
//! candidates were supplied in. Zero-score candidates are never dropped, they
//! just rank last.

use crate::car::Car;

/// Bonus awarded per matching attribute.
pub mod weights {
    pub const MAKE: u32 = 30;
    pub const MODEL: u32 = 20;
    pub const PRICE_BAND: u32 = 15;
    pub const YEAR_BAND: u32 = 10;
    pub const FUEL_TYPE: u32 = 10;
    pub const TRANSMISSION: u32 = 5;
    pub const DRIVETRAIN: u32 = 5;
}

/// Price band is `1 / PRICE_BAND_DIVISOR` of the reference price (20%).
pub const PRICE_BAND_DIVISOR: u64 = 5;

/// Maximum model-year distance for the year bonus.
pub const YEAR_BAND: u32 = 3;

/// A candidate and the score it earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCar<'a> {
    pub car: &'a Car,
    pub score: u32,
}

/// `|candidate - reference| / reference <= 0.20`, in integer arithmetic.
///
/// A zero reference price never matches.
pub fn within_price_band(reference: u64, candidate: u64) -> bool {
    if reference == 0 {
        return false;
    }
    let diff = u128::from(reference.abs_diff(candidate));
    diff * u128::from(PRICE_BAND_DIVISOR) <= u128::from(reference)
}

pub fn within_year_band(reference: i32, candidate: i32) -> bool {
    reference.abs_diff(candidate) <= YEAR_BAND
}

/// Score `candidate` against `reference`. Exact comparisons are case-sensitive.
pub fn score(reference: &Car, candidate: &Car) -> u32 {
    let mut total = 0;

    if candidate.make == reference.make {
        total += weights::MAKE;
    }
    if candidate.model == reference.model {
        total += weights::MODEL;
    }
    if within_price_band(reference.price, candidate.price) {
        total += weights::PRICE_BAND;
    }
    if within_year_band(reference.year, candidate.year) {
        total += weights::YEAR_BAND;
    }
    if candidate.fuel_type == reference.fuel_type {
        total += weights::FUEL_TYPE;
    }
    if candidate.transmission == reference.transmission {
        total += weights::TRANSMISSION;
    }
    if candidate.drivetrain == reference.drivetrain {
        total += weights::DRIVETRAIN;
    }

    total
}

/// Score every candidate except the reference itself, highest first.
pub fn rank<'a, I>(reference: &Car, candidates: I) -> Vec<ScoredCar<'a>>
where
    I: IntoIterator<Item = &'a Car>,
{
    let mut scored: Vec<ScoredCar<'a>> = candidates
        .into_iter()
        .filter(|c| c.id != reference.id)
        .map(|car| ScoredCar {
            car,
            score: score(reference, car),
        })
        .collect();
    // `sort_by` is stable: ties keep candidate order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Top `limit` cars most similar to `reference`.
pub fn most_similar(reference: &Car, candidates: &[Car], limit: usize) -> Vec<Car> {
    rank(reference, candidates)
        .into_iter()
        .take(limit)
        .map(|s| s.car.clone())
        .collect()
}
