mod validation;

use crate::core::FieldId;
use crate::core::context::FormValues;
use crate::core::field::{FieldState, ValidationState};
use crate::core::rule::FormConfig;
use crate::core::value::Value;
use crate::runtime::event::FormEvent;
use crate::runtime::scheduler::SchedulerCommand;
use indexmap::IndexMap;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// One screen's worth of fields plus their validation bookkeeping.
///
/// A form never runs timers itself: operations that defer work (change
/// validation, teardown cancellation) queue [`SchedulerCommand`]s which the
/// owning loop hands to its scheduler. Operations on unknown field names are
/// no-ops.
pub struct Form {
    fields: IndexMap<FieldId, FieldState>,
    initial: IndexMap<FieldId, Value>,
    config: FormConfig,
    validate_on_change: bool,
    debounce: Duration,
    pending_scheduler: Vec<SchedulerCommand>,
}

impl Form {
    pub fn new<I, K, V>(initial: I, config: FormConfig) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldId>,
        V: Into<Value>,
    {
        let mut fields = IndexMap::new();
        let mut initial_values = IndexMap::new();
        for (id, value) in initial {
            let id: FieldId = id.into();
            let value: Value = value.into();
            initial_values.insert(id.clone(), value.clone());
            fields.insert(id, FieldState::new(value));
        }
        Self {
            fields,
            initial: initial_values,
            config,
            validate_on_change: true,
            debounce: DEFAULT_DEBOUNCE,
            pending_scheduler: Vec::new(),
        }
    }

    pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Records an edit and marks the field touched. Validation is never run
    /// inline here; when change validation is on, a debounced
    /// [`FormEvent::ValidateField`] is queued instead, even at zero delay.
    pub fn handle_change(&mut self, field: &str, value: impl Into<Value>) {
        let Some(entry) = self.fields.get_mut(field) else {
            return;
        };
        entry.value = value.into();
        entry.touched = true;

        if self.validate_on_change {
            self.pending_scheduler.push(SchedulerCommand::Debounce {
                key: validation::validate_key(field),
                delay: self.debounce,
                event: FormEvent::validate(field),
            });
        }
    }

    /// Focus left the field: mark it touched and validate right away.
    pub fn handle_blur(&mut self, field: &str) {
        let Some(entry) = self.fields.get_mut(field) else {
            return;
        };
        entry.touched = true;
        self.validate_field(field);
    }

    /// Feedback path for events released by the scheduler.
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::ValidateField { field } => {
                self.validate_field(field.as_str());
            }
        }
    }

    /// Writes a value without touching, validating or scheduling anything.
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) {
        if let Some(entry) = self.fields.get_mut(field) {
            entry.value = value.into();
        }
    }

    /// Injects error text from outside the field's own rule (cross-field
    /// checks, server-side validation). A non-empty message marks the field
    /// invalid; an empty one clears the text but leaves the marker alone.
    pub fn set_error(&mut self, field: &str, message: impl Into<String>) {
        let Some(entry) = self.fields.get_mut(field) else {
            return;
        };
        entry.error = message.into();
        if !entry.error.is_empty() {
            entry.validation_state = ValidationState::Invalid;
        }
    }

    /// Clears the error text and returns the field to its unvalidated state.
    pub fn clear_error(&mut self, field: &str) {
        if let Some(entry) = self.fields.get_mut(field) {
            entry.error.clear();
            entry.validation_state = ValidationState::Default;
        }
    }

    /// One [`Form::set_error`] per entry, for server responses that report
    /// field-level failures.
    pub fn apply_errors<'a>(&mut self, errors: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (field, message) in errors {
            self.set_error(field, message);
        }
    }

    /// Restores every field to its initial value with cleared bookkeeping and
    /// queues cancellation of any in-flight debounced validation.
    pub fn reset(&mut self) {
        self.cancel_pending_validation();
        for (id, value) in &self.initial {
            if let Some(entry) = self.fields.get_mut(id) {
                *entry = FieldState::new(value.clone());
            }
        }
    }

    /// Queues a cancel for every field's debounce key. Owners call this on
    /// teardown so no validation fires into a dropped form.
    pub fn cancel_pending_validation(&mut self) {
        for id in self.fields.keys() {
            self.pending_scheduler.push(SchedulerCommand::Cancel {
                key: validation::validate_key(id.as_str()),
            });
        }
    }

    pub fn take_pending_scheduler_commands(&mut self) -> Vec<SchedulerCommand> {
        std::mem::take(&mut self.pending_scheduler)
    }

    pub fn field(&self, field: &str) -> Option<&FieldState> {
        self.fields.get(field)
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).map(|state| &state.value)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(Value::as_text)
    }

    pub fn touched(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|state| state.touched)
    }

    /// The field's error text, if it currently has one.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .filter(|state| state.has_error())
            .map(|state| state.error.as_str())
    }

    /// Every field that currently holds an error, in declaration order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(_, state)| state.has_error())
            .map(|(id, state)| (id.as_str(), state.error.as_str()))
    }

    /// No field holds an error, and every required field has been touched.
    /// A freshly built form is therefore valid until proven otherwise.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|state| !state.has_error())
            && self
                .fields
                .iter()
                .all(|(id, state)| state.touched || !self.config.is_required(id.as_str()))
    }

    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|(id, state)| (id.clone(), state.value.clone()))
            .collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldId, &FieldState)> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::FieldRule;

    fn email_form() -> Form {
        Form::new(
            [("email", "")],
            FormConfig::new().with_rule(
                "email",
                FieldRule::new()
                    .required()
                    .validate_text(|text| text.contains('@'))
                    .message("Please enter a valid email address"),
            ),
        )
    }

    #[test]
    fn change_records_value_and_defers_validation() {
        let mut form = email_form();
        form.handle_change("email", "nope");

        let state = form.field("email").expect("field should exist");
        assert_eq!(state.value, Value::from("nope"));
        assert!(state.touched);
        // No inline validation: the error appears only once the scheduled
        // event is applied.
        assert!(!state.has_error());

        let commands = form.take_pending_scheduler_commands();
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            SchedulerCommand::Debounce { key, delay, event } => {
                assert_eq!(key, "validate:email");
                assert_eq!(*delay, DEFAULT_DEBOUNCE);
                assert_eq!(*event, FormEvent::validate("email"));
            }
            other => panic!("expected a debounce, got {other:?}"),
        }
        assert!(form.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn zero_debounce_still_goes_through_the_scheduler() {
        let mut form = email_form().with_debounce(Duration::ZERO);
        form.handle_change("email", "nope");

        assert!(!form.field("email").expect("field should exist").has_error());
        let commands = form.take_pending_scheduler_commands();
        assert!(matches!(
            commands.as_slice(),
            [SchedulerCommand::Debounce { delay, .. }] if *delay == Duration::ZERO
        ));
    }

    #[test]
    fn change_validation_can_be_disabled() {
        let mut form = email_form().with_validate_on_change(false);
        form.handle_change("email", "nope");
        assert!(form.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn blur_validates_synchronously() {
        let mut form = email_form();
        form.handle_blur("email");

        let state = form.field("email").expect("field should exist");
        assert!(state.touched);
        assert_eq!(state.error, "Please enter a valid email address");
        assert_eq!(state.validation_state, ValidationState::Invalid);
        // Blur itself schedules nothing.
        assert!(form.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn operations_on_unknown_fields_are_no_ops() {
        let mut form = email_form();
        form.handle_change("phone", "555");
        form.handle_blur("phone");
        form.set_value("phone", "555");
        form.set_error("phone", "nope");
        form.clear_error("phone");

        assert!(form.field("phone").is_none());
        assert!(form.take_pending_scheduler_commands().is_empty());
        assert!(form.errors().next().is_none());
    }

    #[test]
    fn set_value_skips_bookkeeping() {
        let mut form = email_form();
        form.set_value("email", "a@b.c");

        let state = form.field("email").expect("field should exist");
        assert_eq!(state.value, Value::from("a@b.c"));
        assert!(!state.touched);
        assert!(form.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn set_error_marks_invalid_only_for_non_empty_text() {
        let mut form = email_form();
        form.set_error("email", "taken");
        assert_eq!(form.error("email"), Some("taken"));
        assert_eq!(
            form.field("email").expect("field should exist").validation_state,
            ValidationState::Invalid
        );

        // Clearing through set_error drops the text but keeps the marker.
        form.set_error("email", "");
        assert_eq!(form.error("email"), None);
        assert_eq!(
            form.field("email").expect("field should exist").validation_state,
            ValidationState::Invalid
        );

        form.clear_error("email");
        assert_eq!(
            form.field("email").expect("field should exist").validation_state,
            ValidationState::Default
        );
    }

    #[test]
    fn apply_errors_covers_every_entry() {
        let mut form = Form::new(
            [("email", ""), ("username", "")],
            FormConfig::new(),
        );
        form.apply_errors([
            ("email", "Email already registered"),
            ("username", "Username taken"),
        ]);
        assert_eq!(form.error("email"), Some("Email already registered"));
        assert_eq!(form.error("username"), Some("Username taken"));
    }

    #[test]
    fn reset_restores_initials_and_cancels_pending_work() {
        let mut form = email_form();
        form.handle_change("email", "nope");
        form.handle_blur("email");
        form.take_pending_scheduler_commands();

        form.reset();

        let state = form.field("email").expect("field should exist");
        assert_eq!(state.value, Value::Text(String::new()));
        assert!(!state.touched);
        assert!(!state.has_error());
        assert_eq!(state.validation_state, ValidationState::Default);

        let commands = form.take_pending_scheduler_commands();
        assert!(matches!(
            commands.as_slice(),
            [SchedulerCommand::Cancel { key }] if key == "validate:email"
        ));
    }

    #[test]
    fn scheduled_event_validates_on_apply() {
        let mut form = email_form();
        form.handle_change("email", "nope");
        form.apply(FormEvent::validate("email"));
        assert_eq!(form.error("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn validity_is_vacuous_until_fields_are_touched() {
        let form = email_form();
        assert!(form.is_valid());
    }

    #[test]
    fn validity_needs_clean_errors_and_touched_required_fields() {
        let mut form = Form::new(
            [("email", ""), ("nickname", "")],
            FormConfig::new().with_rule("email", FieldRule::new().required()),
        );

        // Untouched required field with no error: still valid by the formula.
        assert!(form.is_valid());

        form.handle_blur("email");
        assert!(!form.is_valid());

        form.handle_change("email", "a@b.c");
        form.handle_blur("email");
        // nickname is optional and untouched; that does not block validity.
        assert!(form.is_valid());

        form.set_error("nickname", "reserved");
        assert!(!form.is_valid());
    }

    #[test]
    fn values_snapshot_keeps_declaration_order() {
        let mut form = Form::new(
            [
                ("email", Value::from("a@b.c")),
                ("remember", Value::from(true)),
            ],
            FormConfig::new(),
        );
        form.handle_change("remember", false);

        let values = form.values();
        let ids: Vec<&str> = values.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["email", "remember"]);
        assert_eq!(values.bool_value("remember"), Some(false));
    }
}
