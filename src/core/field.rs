use crate::core::value::Value;

/// How a field's last validation went. Distinct from the error text so a
/// field can carry no message while still being marked good or bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Default,
    Valid,
    Invalid,
}

/// Everything a form tracks per field. An empty `error` means no error.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    pub value: Value,
    pub error: String,
    pub touched: bool,
    pub validation_state: ValidationState,
}

impl FieldState {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}
