use thiserror::Error;

#[derive(Debug, Error)]
pub enum BasketError {
    #[error("Invalid budget {budget}: must be non-negative and at most {max}")]
    InvalidBudget { budget: i64, max: u64 },

    #[error("Empty selection: no requested items resolve to the catalog")]
    EmptySelection,

    #[error("Item not found in catalog: {0}")]
    UnknownItem(String),

    #[error("Invalid quantity {quantity} for item {id}")]
    InvalidQuantity { id: String, quantity: i64 },

    #[error("Too many items: {count} requested, at most {max} allowed")]
    TooManyItems { count: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BasketError {
    /// True for errors that reject a request before any optimization work.
    pub fn is_rejected_request(&self) -> bool {
        matches!(
            self,
            BasketError::InvalidBudget { .. }
                | BasketError::EmptySelection
                | BasketError::UnknownItem(_)
                | BasketError::InvalidQuantity { .. }
                | BasketError::TooManyItems { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BasketError>;
