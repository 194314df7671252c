//! Field evaluation and schema-driven request validation.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::{
    AddressValidator, AppError, FieldRule, RuleKind, Surface, ValidationError, ValidationSchema,
};

/// Per-surface snapshot of request data handed to the validator.
///
/// Surfaces not populated by the transport stay empty, so their declared
/// fields evaluate as absent.
#[derive(Debug, Clone, Default)]
pub struct RequestData {
    pub params: serde_json::Map<String, Value>,
    pub query: serde_json::Map<String, Value>,
    pub body: serde_json::Map<String, Value>,
}

impl RequestData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn surface(&self, surface: Surface) -> &serde_json::Map<String, Value> {
        match surface {
            Surface::Params => &self.params,
            Surface::Query => &self.query,
            Surface::Body => &self.body,
        }
    }
}

/// Evaluate one value against one rule, yielding at most one violation.
///
/// Emptiness is checked first: absent, null, and empty-string values only
/// ever trigger the `required` rule; absent optional fields are never
/// type-checked. For present values a type error supersedes range errors,
/// and constraints run in a fixed order (integer, min, max for numbers;
/// min_length, max_length for text) with the first hit reported.
pub fn evaluate_field(
    value: Option<&Value>,
    field: &str,
    rule: &FieldRule,
    addresses: &dyn AddressValidator,
) -> Option<ValidationError> {
    let present = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    };

    let Some(value) = present else {
        if rule.required {
            return Some(ValidationError::new(field, format!("{} is required", field)));
        }
        return None;
    };

    match &rule.kind {
        RuleKind::StellarAddress => {
            if !addresses.is_valid_public_address(&coerce_text(value)) {
                return Some(ValidationError::new(
                    field,
                    format!("{} must be a valid Stellar public key", field),
                ));
            }
            None
        }
        RuleKind::Number { min, max, integer } => {
            let Some(number) = coerce_number(value) else {
                return Some(ValidationError::new(
                    field,
                    format!("{} must be a number", field),
                ));
            };
            if *integer && number.fract() != 0.0 {
                return Some(ValidationError::new(
                    field,
                    format!("{} must be an integer", field),
                ));
            }
            if let Some(min) = min {
                if number < *min {
                    return Some(ValidationError::new(
                        field,
                        format!("{} must be at least {}", field, min),
                    ));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Some(ValidationError::new(
                        field,
                        format!("{} must be at most {}", field, max),
                    ));
                }
            }
            None
        }
        RuleKind::Text {
            min_length,
            max_length,
        } => {
            let text = coerce_text(value);
            let length = text.chars().count();
            if let Some(min) = min_length {
                if length < *min {
                    return Some(ValidationError::new(
                        field,
                        format!("{} must be at least {} characters", field, min),
                    ));
                }
            }
            if let Some(max) = max_length {
                if length > *max {
                    return Some(ValidationError::new(
                        field,
                        format!("{} must be at most {} characters", field, max),
                    ));
                }
            }
            None
        }
    }
}

/// Coerce a JSON value to a finite number; booleans and compound values
/// never coerce.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        _ => None,
    }
}

/// Coerce a JSON value to text; non-string scalars and compound values use
/// their JSON rendering.
fn coerce_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Schema-bound request validator.
///
/// Immutable after construction and safe for concurrent reuse across
/// in-flight requests; evaluation allocates only the transient violation
/// list.
pub struct RequestValidator {
    schema: ValidationSchema,
    addresses: Arc<dyn AddressValidator>,
}

impl RequestValidator {
    #[must_use]
    pub fn new(schema: ValidationSchema, addresses: Arc<dyn AddressValidator>) -> Self {
        Self { schema, addresses }
    }

    /// Run every declared rule and collect all violations in declaration
    /// order. Never short-circuits: each declared field is checked exactly
    /// once even after earlier fields fail.
    #[must_use]
    pub fn check(&self, data: &RequestData) -> Vec<ValidationError> {
        let mut violations = Vec::new();
        for (surface, fields) in self.schema.iter() {
            let values = data.surface(surface);
            for (field, rule) in fields {
                if let Some(violation) =
                    evaluate_field(values.get(field), field, rule, self.addresses.as_ref())
                {
                    violations.push(violation);
                }
            }
        }
        violations
    }

    /// Pass/fail verdict for the pipeline; a non-empty violation list is
    /// returned whole, never truncated to the first failure.
    pub fn validate(&self, data: &RequestData) -> Result<(), AppError> {
        let violations = self.check(data);
        if violations.is_empty() {
            Ok(())
        } else {
            debug!(violations = violations.len(), "Request rejected by schema");
            Err(AppError::Validation(violations))
        }
    }
}
