use super::Form;
use crate::core::FieldId;
use crate::core::context::FormValues;
use crate::core::field::ValidationState;
use crate::core::rule::FieldRule;
use crate::core::value::Value;

pub(super) fn validate_key(field: &str) -> String {
    format!("validate:{field}")
}

fn resolve_message(
    rule: &FieldRule,
    value: &Value,
    values: &FormValues,
    fallback: impl FnOnce() -> String,
) -> String {
    match &rule.message {
        Some(message) => message.resolve(value, values),
        None => fallback(),
    }
}

impl Form {
    /// Runs the field's configured rule against its current value.
    ///
    /// Unconfigured fields pass untouched. The required check runs before the
    /// predicate, and whichever fails resolves the rule's message (or a
    /// generic fallback) into the field. A pass clears any previous error.
    pub fn validate_field(&mut self, field: &str) -> bool {
        let Some(rule) = self.config.get(field) else {
            return true;
        };
        let Some(state) = self.fields.get(field) else {
            return true;
        };
        let value = state.value.clone();
        let values = self.values();

        let (passed, message) = if rule.required && value.is_empty() {
            let message = resolve_message(rule, &value, &values, || format!("{field} is required"));
            (false, message)
        } else if let Some(predicate) = &rule.validate
            && !predicate(&value, &values)
        {
            let message = resolve_message(rule, &value, &values, || format!("{field} is invalid"));
            (false, message)
        } else {
            (true, String::new())
        };

        let Some(entry) = self.fields.get_mut(field) else {
            return passed;
        };
        entry.error = message;
        entry.validation_state = if passed {
            ValidationState::Valid
        } else {
            ValidationState::Invalid
        };
        passed
    }

    /// Validates every configured field, marking each one touched whether or
    /// not it passes. Returns true only when all of them pass.
    pub fn validate_form(&mut self) -> bool {
        let targets: Vec<FieldId> = self
            .fields
            .keys()
            .filter(|id| self.config.has_rule(id.as_str()))
            .cloned()
            .collect();

        let mut all_valid = true;
        for id in targets {
            if let Some(entry) = self.fields.get_mut(&id) {
                entry.touched = true;
            }
            if !self.validate_field(id.as_str()) {
                all_valid = false;
            }
        }
        all_valid
    }
}
