use thiserror::Error;

#[derive(Debug, Error)]
pub enum WealthCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: String, id: String },

    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for WealthCalcError {
    fn from(e: serde_json::Error) -> Self {
        WealthCalcError::SerializationError(e.to_string())
    }
}
