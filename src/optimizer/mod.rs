pub mod constants;
pub mod engine;
pub mod evaluator;
pub mod pareto;
pub mod selector;
pub mod substitution;
pub mod utility;

pub use engine::{enrich_request, optimize, optimize_lines, validate_budget};
pub use evaluator::{
    average_eco_score, build_basket, evaluate, line_utility, BasketMetrics, SustainabilityLevel,
};
pub use pareto::{dominates, pareto_front, search, select_preferred};
pub use selector::{best_value, select, Candidate};
pub use substitution::{apply_substitution, find_substitutions};
pub use utility::{utility, UtilityParams};
