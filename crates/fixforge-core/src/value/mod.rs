#[cfg(test)]
mod tests;

use crate::map::OrderedMap;
use derive_more::From;
use serde::ser::{Serialize, Serializer};

///
/// Fields
///
/// The structured-object payload of a `Value`: an insertion-ordered
/// field-name → value map.
///

pub type Fields = OrderedMap<Value>;

///
/// Value
///
/// Dynamic entity tree assembled by a factory.
///
/// Null   → the field is present but carries no value; constructors use it
///          for declared-but-unset fields.
/// Object → nested structure; the only variant property and computed
///          recursion descends into.
///

#[derive(Clone, Debug, From, PartialEq)]
pub enum Value {
    #[from(ignore)]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
    Object(Fields),
}

impl Value {
    /// Build a `Value::List` from anything yielding convertible items.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub const fn as_object_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a direct field of an object value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    /// Look up a dot-separated field path, descending through objects.
    #[must_use]
    pub fn at(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .try_fold(self, |value, segment| value.get(segment))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Uint(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::List(items) => serializer.collect_seq(items),
            Self::Object(fields) => fields.serialize(serializer),
        }
    }
}

impl Fields {
    /// Ensure `key` holds a structured object and return its fields.
    ///
    /// A current value that is not an object is replaced by an empty one;
    /// an existing object keeps all of its fields.
    pub fn object_mut(&mut self, key: &str) -> &mut Self {
        if !matches!(self.get(key), Some(Value::Object(_))) {
            self.insert(key, Value::Object(Self::new()));
        }

        match self.get_mut(key) {
            Some(Value::Object(fields)) => fields,
            _ => unreachable!("object slot was just ensured"),
        }
    }
}

///
/// fields
///
/// Literal syntax for a `Fields` map. Values are anything convertible
/// into `Value`, so nested `fields!` invocations work via
/// `From<Fields>`.
///

#[macro_export]
macro_rules! fields {
    () => {
        $crate::value::Fields::new()
    };
    ( $( $key:literal => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::value::Fields::new();
        $( map.insert($key, $crate::value::Value::from($value)); )+
        map
    }};
}
