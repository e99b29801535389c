use crate::config::EngineConfig;
use crate::optimizer::constants::{
    DEFAULT_ECO_WEIGHT, DEFAULT_ELASTICITY, DEFAULT_SOCIAL_WEIGHT, MAX_SCORE,
};

/// Parameters of the CES sustainability utility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityParams {
    pub eco_weight: f64,
    pub social_weight: f64,
    pub elasticity: f64,
}

impl Default for UtilityParams {
    fn default() -> Self {
        Self {
            eco_weight: DEFAULT_ECO_WEIGHT,
            social_weight: DEFAULT_SOCIAL_WEIGHT,
            elasticity: DEFAULT_ELASTICITY,
        }
    }
}

impl From<&EngineConfig> for UtilityParams {
    fn from(config: &EngineConfig) -> Self {
        Self {
            eco_weight: config.eco_weight,
            social_weight: config.social_weight,
            elasticity: config.elasticity,
        }
    }
}

/// Normalize a 0–100 score to [0, 1], clamping out-of-range input.
#[inline]
fn normalize(score: i64) -> f64 {
    score.clamp(0, MAX_SCORE as i64) as f64 / MAX_SCORE as f64
}

/// Per-unit desirability of an item.
///
/// CES aggregate: `(eco_w * e^ρ + social_w * s^ρ)^(1/ρ)` with `e`, `s` in [0, 1].
pub fn utility(eco: i64, social: i64, params: &UtilityParams) -> f64 {
    let rho = params.elasticity;
    let e = normalize(eco);
    let s = normalize(social);

    let blend = params.eco_weight * e.powf(rho) + params.social_weight * s.powf(rho);
    if blend <= 0.0 {
        return 0.0;
    }
    blend.powf(1.0 / rho)
}
