use crate::core::FieldId;
use crate::core::context::FormValues;
use crate::core::value::Value;
use indexmap::IndexMap;

pub type ValidateFn = Box<dyn Fn(&Value, &FormValues) -> bool + Send + Sync>;
pub type MessageFn = Box<dyn Fn(&Value, &FormValues) -> String + Send + Sync>;

/// Error copy for a failed rule: fixed text, or computed from the value and
/// the rest of the form.
pub enum ErrorMessage {
    Text(String),
    Compute(MessageFn),
}

impl ErrorMessage {
    pub fn resolve(&self, value: &Value, values: &FormValues) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Compute(compute) => compute(value, values),
        }
    }
}

/// Validation behavior for one field. Fields without a rule are never
/// auto-validated and never hold a form back.
#[derive(Default)]
pub struct FieldRule {
    pub(crate) required: bool,
    pub(crate) validate: Option<ValidateFn>,
    pub(crate) message: Option<ErrorMessage>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty values fail before the predicate runs.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &FormValues) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Box::new(predicate));
        self
    }

    /// Convenience for text fields: non-text values fail the rule.
    pub fn validate_text<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validate(move |value, _| value.as_text().is_some_and(&predicate))
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(ErrorMessage::Text(text.into()));
        self
    }

    pub fn message_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&Value, &FormValues) -> String + Send + Sync + 'static,
    {
        self.message = Some(ErrorMessage::Compute(Box::new(compute)));
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Per-field rules, keyed by field id. Only configured fields take part in
/// validation.
#[derive(Default)]
pub struct FormConfig {
    rules: IndexMap<FieldId, FieldRule>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, field: impl Into<FieldId>, rule: FieldRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn has_rule(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldRule::is_required)
    }
}
