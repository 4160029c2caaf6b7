//! Declarative request validation.
//!
//! A [`ValidationChain`] is an ordered list of [`FieldCheck`]s, each an ordered list of
//! predicate and message pairs bound to one path parameter or body field. Running a chain
//! evaluates every check and collects every failure; nothing short-circuits.
//!
//! ```ignore
//! static RULES: LazyLock<ValidationChain> = LazyLock::new(|| {
//!     ValidationChain::new()
//!         .field(FieldCheck::body("name").not_empty("Product name cannot be empty"))
//!         .field(
//!             FieldCheck::body("price")
//!                 .is_numeric("Invalid value")
//!                 .custom(|v| coerce::to_number(v).is_some_and(|n| n > 0.0), "Invalid price"),
//!         )
//! });
//! ```

pub mod coerce;

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Where a validated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Always `"field"`
    #[serde(rename = "type")]
    #[schema(example = "field")]
    pub kind: &'static str,
    /// Offending value; omitted when the field was absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    #[schema(example = "Invalid price")]
    pub msg: String,
    #[schema(example = "price")]
    pub path: String,
    pub location: Location,
}

impl FieldViolation {
    pub fn new(
        location: Location,
        path: impl Into<String>,
        value: Option<Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}

/// Raw inputs of a request: path parameters and the parsed JSON body.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    params: HashMap<String, Value>,
    body: Value,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
            body,
        }
    }

    pub fn get(&self, location: Location, path: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(path),
            Location::Body => self.body.get(path),
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.get(Location::Params, name)
    }

    pub fn body_field(&self, name: &str) -> Option<&Value> {
        self.get(Location::Body, name)
    }
}

/// Predicate over a possibly absent value.
pub type Predicate = fn(Option<&Value>) -> bool;

#[derive(Debug, Clone)]
struct Check {
    predicate: Predicate,
    message: &'static str,
}

/// Ordered rules for a single field.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    location: Location,
    path: &'static str,
    checks: Vec<Check>,
}

impl FieldCheck {
    pub fn body(path: &'static str) -> Self {
        Self::at(Location::Body, path)
    }

    pub fn param(path: &'static str) -> Self {
        Self::at(Location::Params, path)
    }

    fn at(location: Location, path: &'static str) -> Self {
        Self {
            location,
            path,
            checks: Vec::new(),
        }
    }

    pub fn custom(mut self, predicate: Predicate, message: &'static str) -> Self {
        self.checks.push(Check { predicate, message });
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.custom(coerce::is_not_empty, message)
    }

    pub fn is_numeric(self, message: &'static str) -> Self {
        self.custom(coerce::is_numeric, message)
    }

    pub fn is_int(self, message: &'static str) -> Self {
        self.custom(coerce::is_int, message)
    }

    pub fn is_boolean(self, message: &'static str) -> Self {
        self.custom(coerce::is_boolean, message)
    }

    fn run(&self, input: &RequestInput, violations: &mut Vec<FieldViolation>) {
        let value = input.get(self.location, self.path);
        for check in &self.checks {
            if !(check.predicate)(value) {
                violations.push(FieldViolation::new(
                    self.location,
                    self.path,
                    value.cloned(),
                    check.message,
                ));
            }
        }
    }
}

/// Ordered field checks for one route.
#[derive(Debug, Clone, Default)]
pub struct ValidationChain {
    fields: Vec<FieldCheck>,
}

impl ValidationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, check: FieldCheck) -> Self {
        self.fields.push(check);
        self
    }

    /// Evaluates every rule in declaration order and returns all failures.
    pub fn run(&self, input: &RequestInput) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        for field in &self.fields {
            field.run(input, &mut violations);
        }
        violations
    }
}
