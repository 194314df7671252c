//! Declarative field rules and per-operation validation schemas.

use std::fmt;

/// Input surface a schema can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Path parameters
    Params,
    /// Query-string parameters
    Query,
    /// JSON request body
    Body,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraints for one rule type; the tag drives evaluation dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Free-form text with optional length bounds
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// Numeric value with optional range bounds
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    /// Stellar ed25519 public key in strkey form
    StellarAddress,
}

/// One validation rule for one declared field.
///
/// Rules are immutable once built and shared read-only across all requests.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub required: bool,
    pub kind: RuleKind,
}

impl FieldRule {
    #[must_use]
    pub fn text() -> Self {
        Self {
            required: false,
            kind: RuleKind::Text {
                min_length: None,
                max_length: None,
            },
        }
    }

    #[must_use]
    pub fn number() -> Self {
        Self {
            required: false,
            kind: RuleKind::Number {
                min: None,
                max: None,
                integer: false,
            },
        }
    }

    #[must_use]
    pub fn stellar_address() -> Self {
        Self {
            required: false,
            kind: RuleKind::StellarAddress,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Lower bound for `number` rules
    #[must_use]
    pub fn min(mut self, value: f64) -> Self {
        debug_assert!(matches!(self.kind, RuleKind::Number { .. }));
        if let RuleKind::Number { ref mut min, .. } = self.kind {
            *min = Some(value);
        }
        self
    }

    /// Upper bound for `number` rules
    #[must_use]
    pub fn max(mut self, value: f64) -> Self {
        debug_assert!(matches!(self.kind, RuleKind::Number { .. }));
        if let RuleKind::Number { ref mut max, .. } = self.kind {
            *max = Some(value);
        }
        self
    }

    /// Restrict a `number` rule to whole values
    #[must_use]
    pub fn integer(mut self) -> Self {
        debug_assert!(matches!(self.kind, RuleKind::Number { .. }));
        if let RuleKind::Number {
            ref mut integer, ..
        } = self.kind
        {
            *integer = true;
        }
        self
    }

    /// Minimum length for `text` rules
    #[must_use]
    pub fn min_length(mut self, value: usize) -> Self {
        debug_assert!(matches!(self.kind, RuleKind::Text { .. }));
        if let RuleKind::Text {
            ref mut min_length, ..
        } = self.kind
        {
            *min_length = Some(value);
        }
        self
    }

    /// Maximum length for `text` rules
    #[must_use]
    pub fn max_length(mut self, value: usize) -> Self {
        debug_assert!(matches!(self.kind, RuleKind::Text { .. }));
        if let RuleKind::Text {
            ref mut max_length, ..
        } = self.kind
        {
            *max_length = Some(value);
        }
        self
    }
}

/// Declared input surfaces and field rules for one API operation.
///
/// Declaration order is preserved: violations are reported surface by
/// surface, field by field, exactly as declared. Built once per operation
/// and reused for every invocation.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    surfaces: Vec<(Surface, Vec<(String, FieldRule)>)>,
}

impl ValidationSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule for a path parameter
    #[must_use]
    pub fn param(self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.declare(Surface::Params, field, rule)
    }

    /// Declare a rule for a query parameter
    #[must_use]
    pub fn query(self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.declare(Surface::Query, field, rule)
    }

    /// Declare a rule for a body field
    #[must_use]
    pub fn body(self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.declare(Surface::Body, field, rule)
    }

    fn declare(mut self, surface: Surface, field: impl Into<String>, rule: FieldRule) -> Self {
        match self.surfaces.iter_mut().find(|(s, _)| *s == surface) {
            Some((_, fields)) => fields.push((field.into(), rule)),
            None => self.surfaces.push((surface, vec![(field.into(), rule)])),
        }
        self
    }

    /// Iterate declared surfaces in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Surface, &[(String, FieldRule)])> + '_ {
        self.surfaces
            .iter()
            .map(|(surface, fields)| (*surface, fields.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
