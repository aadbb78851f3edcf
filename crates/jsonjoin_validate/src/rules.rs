use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::{Result, ValidationError};

pub type Customer = Map<String, Value>;

/// Expected JSON type for a `type` rule.
///
/// Types follow JSON, not a numeric tower: `true` and `false` do not pass a
/// `number` rule, even though validators that treat booleans as integers
/// would accept them. `null` passes no type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Number,
    String,
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldType::Boolean, Value::Bool(_))
                | (FieldType::Number, Value::Number(_))
                | (FieldType::String, Value::String(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Number => write!(f, "number"),
            FieldType::String => write!(f, "string"),
        }
    }
}

/// A single rule applied to one customer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present when true.
    Required(bool),
    /// Field, if present, must have this type.
    Type(FieldType),
    /// Field, if present, must be a string with a char count in bounds.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// A rule name we don't know. Always fails.
    Unrecognized(String),
}

/// Result of checking a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

impl Rule {
    /// Parse a rule from its name and JSON arguments.
    pub fn try_parse(field: &str, name: &str, args: &Value) -> Result<Self> {
        let invalid = |reason: &str| ValidationError::InvalidRuleArgs {
            field: field.to_string(),
            rule: name.to_string(),
            reason: reason.to_string(),
        };

        match name {
            "required" => match args {
                Value::Bool(b) => Ok(Rule::Required(*b)),
                _ => Err(invalid("expected a boolean")),
            },
            "type" => match args.as_str() {
                Some("boolean") => Ok(Rule::Type(FieldType::Boolean)),
                Some("number") => Ok(Rule::Type(FieldType::Number)),
                Some("string") => Ok(Rule::Type(FieldType::String)),
                _ => Err(invalid("expected one of 'boolean', 'number' or 'string'")),
            },
            "length" => {
                let obj = args
                    .as_object()
                    .ok_or_else(|| invalid("expected an object with 'min' and/or 'max'"))?;
                let bound = |key: &str| -> Result<Option<usize>> {
                    match obj.get(key) {
                        None | Some(Value::Null) => Ok(None),
                        Some(v) => v
                            .as_u64()
                            .map(|n| Some(n as usize))
                            .ok_or_else(|| invalid("bounds must be non-negative integers")),
                    }
                };
                Ok(Rule::Length {
                    min: bound("min")?,
                    max: bound("max")?,
                })
            }
            other => Ok(Rule::Unrecognized(other.to_string())),
        }
    }

    /// Check `field` of `customer` against this rule.
    pub fn check(&self, field: &str, customer: &Customer) -> Outcome {
        let value = customer.get(field);

        match self {
            Rule::Required(true) if value.is_none() => Outcome::Fail("missing".to_string()),
            Rule::Required(_) => Outcome::Pass,
            Rule::Type(typ) => match value {
                Some(v) if !typ.matches(v) => Outcome::Fail(format!("expected {typ}")),
                _ => Outcome::Pass,
            },
            Rule::Length { min, max } => match value {
                None => Outcome::Pass,
                Some(Value::String(s)) => {
                    let count = s.chars().count();
                    match (min, max) {
                        (_, Some(max)) if count > *max => {
                            Outcome::Fail(format!("longer than {max} characters"))
                        }
                        (Some(min), _) if count < *min => {
                            Outcome::Fail(format!("shorter than {min} characters"))
                        }
                        _ => Outcome::Pass,
                    }
                }
                Some(_) => Outcome::Fail("length rule requires a string".to_string()),
            },
            Rule::Unrecognized(name) => {
                warn!(%field, rule = %name, "unexpected validation rule");
                Outcome::Fail(format!("unrecognized rule '{name}'"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn customer(value: Value) -> Customer {
        match value {
            Value::Object(obj) => obj,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn required() {
        let c = customer(json!({"name": "a", "email": null}));
        assert!(Rule::Required(true).check("name", &c).is_pass());
        assert!(Rule::Required(true).check("email", &c).is_pass());
        assert!(!Rule::Required(true).check("phone", &c).is_pass());
        assert!(Rule::Required(false).check("phone", &c).is_pass());
    }

    #[test]
    fn type_check() {
        let c = customer(json!({"n": 1, "b": true, "s": "x", "z": null}));
        assert!(Rule::Type(FieldType::Number).check("n", &c).is_pass());
        assert!(!Rule::Type(FieldType::Number).check("b", &c).is_pass());
        assert!(Rule::Type(FieldType::Boolean).check("b", &c).is_pass());
        assert!(!Rule::Type(FieldType::String).check("n", &c).is_pass());
        assert!(!Rule::Type(FieldType::String).check("z", &c).is_pass());
        // Absent fields are left to `required`.
        assert!(Rule::Type(FieldType::String).check("missing", &c).is_pass());
    }

    #[test]
    fn length_bounds() {
        let c = customer(json!({"s": "héllo", "n": 5}));
        let rule = |min, max| Rule::Length { min, max };

        assert!(rule(Some(5), Some(5)).check("s", &c).is_pass());
        assert_eq!(
            Outcome::Fail("longer than 4 characters".to_string()),
            rule(None, Some(4)).check("s", &c)
        );
        assert_eq!(
            Outcome::Fail("shorter than 6 characters".to_string()),
            rule(Some(6), None).check("s", &c)
        );
        assert!(!rule(None, None).check("n", &c).is_pass());
        assert!(rule(Some(100), None).check("missing", &c).is_pass());
    }

    #[test]
    fn parse_rules() {
        assert_eq!(
            Rule::Required(true),
            Rule::try_parse("f", "required", &json!(true)).unwrap()
        );
        assert_eq!(
            Rule::Type(FieldType::Boolean),
            Rule::try_parse("f", "type", &json!("boolean")).unwrap()
        );
        assert_eq!(
            Rule::Length {
                min: Some(2),
                max: None
            },
            Rule::try_parse("f", "length", &json!({"min": 2})).unwrap()
        );
        assert_eq!(
            Rule::Unrecognized("format".to_string()),
            Rule::try_parse("f", "format", &json!("email")).unwrap()
        );
    }

    #[test]
    fn parse_rejects_bad_args() {
        assert!(Rule::try_parse("f", "required", &json!("yes")).is_err());
        assert!(Rule::try_parse("f", "type", &json!("date")).is_err());
        assert!(Rule::try_parse("f", "length", &json!({"max": -1})).is_err());
        assert!(Rule::try_parse("f", "length", &json!(5)).is_err());
    }

    #[test]
    fn unrecognized_always_fails() {
        let c = customer(json!({"f": 1}));
        assert!(!Rule::Unrecognized("x".to_string()).check("f", &c).is_pass());
    }
}
