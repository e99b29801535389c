mod basket;
mod item;

pub use basket::{
    Basket, EnrichedLine, Objective, OptimizationResult, RequestedLine, ShoppingRequest,
    Substitution,
};
pub use item::{CatalogItem, Category};
