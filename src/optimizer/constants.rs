/// Lowest and highest sub-score a catalog item can carry.
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Default CES weights (eco-leaning); they must sum to 1.
pub const DEFAULT_ECO_WEIGHT: f64 = 0.6;
pub const DEFAULT_SOCIAL_WEIGHT: f64 = 0.4;

/// Default CES elasticity ρ. Below 1 the blend is concave and rewards balance.
pub const DEFAULT_ELASTICITY: f64 = 0.5;

/// Allowed drift when checking that the weights sum to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ─────────────────────────────────────────────────────────────────────────────
// DP ceilings
// ─────────────────────────────────────────────────────────────────────────────

/// Largest budget (currency units) accepted by one DP call.
///
/// The selection table holds one flag per (line, budget) cell, so memory is
/// roughly `max_items * max_budget` bytes.
pub const DEFAULT_MAX_BUDGET: u64 = 500_000;

/// Largest number of request lines accepted by one DP call.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Hard upper bound for a configured `max_budget`.
pub const MAX_BUDGET_LIMIT: u64 = 100_000_000;

/// Most (line, budget) cells one selection table may hold.
pub const MAX_DP_CELLS: usize = 100_000_000;

// ─────────────────────────────────────────────────────────────────────────────
// Reporting
// ─────────────────────────────────────────────────────────────────────────────

/// Reason attached to every substitution suggestion.
pub const SUBSTITUTION_REASON: &str =
    "Same category with better sustainability at an equal or lower price";

/// Average eco score at or above which a basket is rated high.
pub const HIGH_SUSTAINABILITY_THRESHOLD: f64 = 70.0;

/// Average eco score at or above which a basket is rated medium.
pub const MEDIUM_SUSTAINABILITY_THRESHOLD: f64 = 40.0;
