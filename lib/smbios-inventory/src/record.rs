// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat, named-field view of decoded records.
//!
//! Decoded records are also [serde::Serialize]; there, absent fields are
//! omitted from the output entirely rather than being rendered as null.

/// Value of a single named field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Integer(u64),
    Text(String),
    /// The firmware did not report this field.
    Absent,
}
impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! value_from_ints {
    ($($int:ty),+) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    Value::Integer(value as u64)
                }
            }
        )+
    };
}
value_from_ints!(u8, u16, u32, u64, usize);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

/// A decoded record, viewed as a row of named fields.
pub trait Record {
    /// All fields of the record, in a stable order.  Fields the firmware
    /// did not report are included as [Value::Absent].
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Look up a single field by name.  Unknown names are [Value::Absent].
    fn get(&self, name: &str) -> Value {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map_or(Value::Absent, |(_, value)| value)
    }
}
