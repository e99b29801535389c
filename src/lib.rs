pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod optimizer;

pub use error::{BasketError, Result};
pub use models::{Basket, CatalogItem, OptimizationResult};
