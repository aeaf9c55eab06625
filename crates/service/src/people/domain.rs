use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request payload for adding a person. Every field is optional, may hold any
/// JSON value, and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonInput {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub affiliation: Option<Value>,
    pub role: Option<Value>,
}

/// Stored person record, kept exactly as it appears in the backing file.
///
/// Records created through [`PersonInput`] carry `name`, `email`,
/// `affiliation` and `role` in that order, absent ones as `null`. Records
/// already on disk keep whatever keys and values they had.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Person(Value);

impl Person {
    /// Field lookup; `None` when the key is absent or the record is not an object.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<PersonInput> for Person {
    fn from(input: PersonInput) -> Self {
        let mut record = Map::new();
        record.insert("name".into(), input.name.unwrap_or(Value::Null));
        record.insert("email".into(), input.email.unwrap_or(Value::Null));
        record.insert("affiliation".into(), input.affiliation.unwrap_or(Value::Null));
        record.insert("role".into(), input.role.unwrap_or(Value::Null));
        Person(Value::Object(record))
    }
}
