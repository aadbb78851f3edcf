use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Result, ValidationError};
use crate::validate::{InvalidCustomer, validate_customers, validations_from_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl Pagination {
    /// Number of pages needed to hold `total` customers.
    pub fn num_pages(&self) -> Result<u64> {
        if self.per_page == 0 {
            return Err(ValidationError::ZeroPerPage);
        }
        Ok(self.total.div_ceil(self.per_page))
    }
}

/// One page of customers along with the validations to apply to them.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub customers: Vec<Value>,
    pub validations: Vec<Value>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl Page {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<Vec<InvalidCustomer>> {
        let validations = validations_from_json(&self.validations)?;
        validate_customers(&self.customers, &validations)
    }
}
