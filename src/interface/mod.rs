pub mod export;
pub mod prompts;
pub mod render;

pub use export::{result_json, write_basket_csv};
pub use prompts::{prompt_budget, prompt_items, prompt_quantity, prompt_substitution};
pub use render::{display_basket, display_catalog, display_result};
