//! Condition and update expressions.
//!
//! Conditions and updates are built as plain data and rendered to DynamoDB
//! expression syntax on demand. Attribute names and values are always passed
//! through placeholders (`#n0`, `:v0`), so reserved words need no escaping.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

/// A predicate over the stored item, evaluated atomically with a write.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `attribute_exists(name)`
    AttributeExists(String),
    /// `attribute_not_exists(name)`
    AttributeNotExists(String),
    /// `name = value`
    Equals(String, AttributeValue),
    /// `left AND right`
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn attribute_exists(name: impl Into<String>) -> Self {
        Condition::AttributeExists(name.into())
    }

    pub fn attribute_not_exists(name: impl Into<String>) -> Self {
        Condition::AttributeNotExists(name.into())
    }

    pub fn equals(name: impl Into<String>, value: AttributeValue) -> Self {
        Condition::Equals(name.into(), value)
    }

    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// Renders the condition, registering its names and values in `attributes`.
    pub fn render(&self, attributes: &mut ExpressionAttributes) -> String {
        match self {
            Condition::AttributeExists(name) => {
                format!("attribute_exists({})", attributes.name(name))
            }
            Condition::AttributeNotExists(name) => {
                format!("attribute_not_exists({})", attributes.name(name))
            }
            Condition::Equals(name, value) => {
                let name = attributes.name(name);
                let value = attributes.value(value.clone());
                format!("{name} = {value}")
            }
            Condition::And(left, right) => {
                let left = left.render(attributes);
                let right = right.render(attributes);
                format!("{left} AND {right}")
            }
        }
    }
}

/// Attribute changes applied by an update.
///
/// `set` overwrites attributes; `add` adds a number to a numeric attribute,
/// starting from zero when it is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateActions {
    pub set: Vec<(String, AttributeValue)>,
    pub add: Vec<(String, AttributeValue)>,
}

impl UpdateActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `name` with `value`.
    pub fn set(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set.push((name.into(), value));
        self
    }

    /// Add the number `value` to `name`.
    pub fn add(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.add.push((name.into(), value));
        self
    }

    /// Renders the update expression, registering its names and values in
    /// `attributes`.
    pub fn render(&self, attributes: &mut ExpressionAttributes) -> String {
        let mut clauses = Vec::new();

        if !self.set.is_empty() {
            let assignments: Vec<String> = self
                .set
                .iter()
                .map(|(name, value)| {
                    let name = attributes.name(name);
                    let value = attributes.value(value.clone());
                    format!("{name} = {value}")
                })
                .collect();
            clauses.push(format!("SET {}", assignments.join(", ")));
        }

        if !self.add.is_empty() {
            let additions: Vec<String> = self
                .add
                .iter()
                .map(|(name, value)| {
                    let name = attributes.name(name);
                    let value = attributes.value(value.clone());
                    format!("{name} {value}")
                })
                .collect();
            clauses.push(format!("ADD {}", additions.join(", ")));
        }

        clauses.join(" ")
    }
}

/// Placeholder maps shared by the expressions of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionAttributes {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ExpressionAttributes {
    /// Returns the placeholder for an attribute name, reusing an existing one.
    pub fn name(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, name)| *name == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    /// Returns a fresh placeholder bound to `value`.
    pub fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// Splits into the request's name and value maps; empty maps become `None`
    /// since DynamoDB rejects empty placeholder maps.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Option<HashMap<String, String>>,
        Option<HashMap<String, AttributeValue>>,
    ) {
        let names = (!self.names.is_empty()).then_some(self.names);
        let values = (!self.values.is_empty()).then_some(self.values);
        (names, values)
    }
}
