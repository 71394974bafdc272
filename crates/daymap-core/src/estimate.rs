//! Time reality projection: scaling optimistic estimates toward what work
//! actually takes.
//!
//! The projection is an injectable strategy so a fixed constant and a
//! learned multiplier (computed by an out-of-scope analytics subsystem) are
//! interchangeable implementations of the same contract. The core only
//! ships the fixed default.

/// Default correction multiplier countering systematic underestimation.
pub const DEFAULT_REALITY_MULTIPLIER: f64 = 1.8;

/// Strategy for converting an optimistic hour estimate into a realistic one.
pub trait EstimateModel {
    fn realistic(&self, optimistic_hours: f64) -> f64;
}

/// Fixed-multiplier projection. Pure and stateless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMultiplier {
    pub multiplier: f64,
}

impl FixedMultiplier {
    pub fn new(multiplier: f64) -> Self {
        FixedMultiplier { multiplier }
    }
}

impl Default for FixedMultiplier {
    fn default() -> Self {
        FixedMultiplier {
            multiplier: DEFAULT_REALITY_MULTIPLIER,
        }
    }
}

impl EstimateModel for FixedMultiplier {
    fn realistic(&self, optimistic_hours: f64) -> f64 {
        optimistic_hours * self.multiplier
    }
}

/// Project `hours` through the default fixed multiplier.
pub fn realistic_estimate(hours: f64) -> f64 {
    FixedMultiplier::default().realistic(hours)
}
