use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::errors::{Result, ValidationError};
use crate::rules::{Customer, Outcome, Rule};

/// The ordered rules for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub field: String,
    pub rules: Vec<Rule>,
}

impl FieldValidation {
    /// Parse from `{ "<field>": { "<rule>": <args>, ... } }`.
    ///
    /// Rules keep the order they appear in.
    pub fn try_from_json(index: usize, value: &Value) -> Result<Self> {
        let Some((field, rules)) = value
            .as_object()
            .filter(|obj| obj.len() == 1)
            .and_then(|obj| obj.iter().next())
        else {
            return Err(ValidationError::MalformedValidation {
                index,
                found: value.to_string(),
            });
        };

        let rules = rules
            .as_object()
            .ok_or_else(|| ValidationError::MalformedRules {
                field: field.clone(),
            })?
            .iter()
            .map(|(name, args)| Rule::try_parse(field, name, args))
            .collect::<Result<Vec<_>>>()?;

        Ok(FieldValidation {
            field: field.clone(),
            rules,
        })
    }

    /// Run rules in order, stopping at the first failure.
    pub fn check(&self, customer: &Customer) -> Outcome {
        for rule in &self.rules {
            let outcome = rule.check(&self.field, customer);
            if !outcome.is_pass() {
                return outcome;
            }
        }
        Outcome::Pass
    }
}

pub fn validations_from_json(values: &[Value]) -> Result<Vec<FieldValidation>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, v)| FieldValidation::try_from_json(idx, v))
        .collect()
}

/// A customer with at least one field failing validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidCustomer {
    pub id: Value,
    pub invalid_fields: Vec<String>,
}

/// Check every customer against every validation.
///
/// Customers are reported in input order, and their invalid fields in
/// validation order.
pub fn validate_customers(
    customers: &[Value],
    validations: &[FieldValidation],
) -> Result<Vec<InvalidCustomer>> {
    let mut invalid = Vec::new();

    for (index, customer) in customers.iter().enumerate() {
        let customer = customer
            .as_object()
            .ok_or(ValidationError::CustomerNotAnObject { index })?;

        let mut invalid_fields = Vec::new();
        for validation in validations {
            if let Outcome::Fail(reason) = validation.check(customer) {
                trace!(index, field = %validation.field, %reason, "field failed validation");
                invalid_fields.push(validation.field.clone());
            }
        }

        if !invalid_fields.is_empty() {
            let id = customer
                .get("id")
                .cloned()
                .ok_or(ValidationError::MissingCustomerId { index })?;
            invalid.push(InvalidCustomer { id, invalid_fields });
        }
    }

    debug!(
        customers = customers.len(),
        invalid = invalid.len(),
        "validated customers"
    );

    Ok(invalid)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rules::FieldType;

    fn validations() -> Vec<FieldValidation> {
        let raw = json!([
            {"name": {"required": true, "type": "string", "length": {"min": 5}}},
            {"email": {"required": true}},
            {"age": {"type": "number", "required": false}},
            {"newsletter": {"required": true, "type": "boolean"}},
        ]);
        validations_from_json(raw.as_array().unwrap()).unwrap()
    }

    #[test]
    fn parse_keeps_rule_order() {
        let v = validations();
        assert_eq!(4, v.len());
        assert_eq!("name", v[0].field);
        assert_eq!(
            vec![
                Rule::Required(true),
                Rule::Type(FieldType::String),
                Rule::Length {
                    min: Some(5),
                    max: None
                },
            ],
            v[0].rules
        );
    }

    #[test]
    fn parse_rejects_multiple_fields() {
        let err = FieldValidation::try_from_json(3, &json!({"a": {}, "b": {}})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedValidation { index: 3, .. }));

        let err = FieldValidation::try_from_json(0, &json!({"a": true})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedRules { .. }));
    }

    #[test]
    fn parse_rejects_empty_and_non_objects() {
        for value in [json!({}), json!([]), json!("name"), json!(null)] {
            let err = FieldValidation::try_from_json(1, &value).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedValidation { index: 1, .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn first_failure_stops_field() {
        let v = &validations()[0];
        assert_eq!(Outcome::Fail("missing".to_string()), v.check(&Customer::new()));
    }

    #[test]
    fn reports_invalid_customers() {
        let customers = json!([
            {"id": 1, "name": "David", "email": "d@x.com", "age": 30, "newsletter": true},
            {"id": 2, "name": "Lou", "email": "l@x.com", "newsletter": "yes"},
            {"id": 3, "name": "Rosalind", "age": true, "newsletter": false},
        ]);
        let out = validate_customers(customers.as_array().unwrap(), &validations()).unwrap();
        assert_eq!(
            vec![
                InvalidCustomer {
                    id: json!(2),
                    invalid_fields: vec!["name".to_string(), "newsletter".to_string()],
                },
                InvalidCustomer {
                    id: json!(3),
                    invalid_fields: vec!["email".to_string(), "age".to_string()],
                },
            ],
            out
        );
    }

    #[test]
    fn invalid_customer_serializes() {
        let c = InvalidCustomer {
            id: json!(7),
            invalid_fields: vec!["email".to_string()],
        };
        assert_eq!(
            r#"{"id":7,"invalid_fields":["email"]}"#,
            serde_json::to_string(&c).unwrap()
        );
    }

    #[test]
    fn missing_id_errors_only_when_invalid() {
        let customers = json!([{"name": "Valid Name", "email": "e", "newsletter": true}]);
        assert!(
            validate_customers(customers.as_array().unwrap(), &validations())
                .unwrap()
                .is_empty()
        );

        let customers = json!([{"name": "Valid Name", "newsletter": true}]);
        let err = validate_customers(customers.as_array().unwrap(), &validations()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingCustomerId { index: 0 }));
    }
}
