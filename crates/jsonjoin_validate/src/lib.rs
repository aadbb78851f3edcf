//! Rule based validation of customer records.
//!
//! Validations are a closed set of rules (`required`, `type`, `length`)
//! evaluated per field. Independent of the join engine.

pub mod errors;
pub mod page;
pub mod rules;
pub mod validate;

pub use page::{Page, Pagination};
pub use rules::{Customer, FieldType, Outcome, Rule};
pub use validate::{FieldValidation, InvalidCustomer, validate_customers, validations_from_json};
