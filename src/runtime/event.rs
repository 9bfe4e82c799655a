use crate::core::FieldId;

/// Deferred work delivered back to a form by the scheduler.
///
/// Events carry the field name only, never the value that was current when
/// they were queued: the handler reads whatever the field holds at delivery
/// time, so a validation that fires after further edits still judges the
/// latest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValidateField { field: FieldId },
}

impl FormEvent {
    pub fn validate(field: impl Into<FieldId>) -> Self {
        Self::ValidateField {
            field: field.into(),
        }
    }
}
