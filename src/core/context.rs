use crate::core::FieldId;
use crate::core::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Snapshot of every field's current value, in declaration order. Handed to
/// cross-field rules and serialized as-is for request bodies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<FieldId, Value>,
}

impl FormValues {
    pub fn new(values: IndexMap<FieldId, Value>) -> Self {
        Self { values }
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(Value::as_text)
    }

    pub fn bool_value(&self, field: &str) -> Option<bool> {
        self.value(field).and_then(Value::as_bool)
    }

    pub fn number(&self, field: &str) -> Option<i64> {
        self.value(field).and_then(Value::as_number)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FieldId, Value)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (FieldId, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
