#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation entry {index} must be an object with exactly one field, got {found}")]
    MalformedValidation { index: usize, found: String },

    #[error("Rules for field '{field}' must be an object")]
    MalformedRules { field: String },

    #[error("Invalid arguments for rule '{rule}' on field '{field}': {reason}")]
    InvalidRuleArgs {
        field: String,
        rule: String,
        reason: String,
    },

    #[error("Customer {index} failed validation but has no 'id'")]
    MissingCustomerId { index: usize },

    #[error("Customer {index} is not a JSON object")]
    CustomerNotAnObject { index: usize },

    #[error("Pagination has per_page of zero")]
    ZeroPerPage,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
