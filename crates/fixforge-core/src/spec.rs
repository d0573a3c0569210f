use crate::{
    map::OrderedMap,
    value::{Fields, Value},
};
use std::fmt;

///
/// CallbackError
///
/// Opaque failure raised by caller-supplied closures (generators,
/// computed functions, entity constructors). Propagated unmodified
/// inside `BuildError`.
///

pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Zero-argument value generator, invoked fresh at each assembly.
pub type GeneratorFn = Box<dyn Fn() -> Result<Value, CallbackError>>;

/// Computed-field function; always receives the top-level entity.
pub type ComputeFn = Box<dyn Fn(&Value) -> Result<Value, CallbackError>>;

/// Maps the raw sequence counter to the stored sequence value.
pub type SequenceTransform = Box<dyn Fn(i64) -> Value>;

/// Capability producing an empty instance of the target shape.
pub type Constructor = Box<dyn Fn() -> Result<Fields, CallbackError>>;

/// Ordered field-name → property-specification map.
pub type PropertyMap = OrderedMap<Property>;

/// Ordered field-name → computed-specification map.
pub type ComputedMap = OrderedMap<Computed>;

///
/// Property
///
/// Per-field property specification.
///
/// Literal   → assigned as-is (cloned per build).
/// Generator → invoked with no arguments at every assembly, enabling
///             per-instance variation across `build_many`.
/// Nested    → recursed into against the corresponding sub-object.
///

pub enum Property {
    Literal(Value),
    Generator(GeneratorFn),
    Nested(PropertyMap),
}

impl Property {
    /// A literal property value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// An infallible generator.
    pub fn generate<V: Into<Value>>(generate: impl Fn() -> V + 'static) -> Self {
        Self::Generator(Box::new(move || Ok(generate().into())))
    }

    /// A generator whose failure aborts the build.
    pub fn try_generate<V: Into<Value>>(
        generate: impl Fn() -> Result<V, CallbackError> + 'static,
    ) -> Self {
        Self::Generator(Box::new(move || generate().map(Into::into)))
    }

    /// A nested specification applied against a sub-object.
    #[must_use]
    pub const fn nested(map: PropertyMap) -> Self {
        Self::Nested(map)
    }
}

impl<T: Into<Value>> From<T> for Property {
    fn from(value: T) -> Self {
        Self::Literal(value.into())
    }
}

impl From<PropertyMap> for Property {
    fn from(map: PropertyMap) -> Self {
        Self::Nested(map)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
            Self::Nested(map) => f.debug_tuple("Nested").field(map).finish(),
        }
    }
}

///
/// Computed
///
/// Per-field computed specification, resolved after properties so it can
/// derive from values assigned in the same pass. The function variant
/// receives the top-level entity at every nesting depth, never the local
/// sub-object.
///

pub enum Computed {
    Derive(ComputeFn),
    Nested(ComputedMap),
}

impl Computed {
    /// An infallible computed function.
    pub fn derive<V: Into<Value>>(derive: impl Fn(&Value) -> V + 'static) -> Self {
        Self::Derive(Box::new(move |entity| Ok(derive(entity).into())))
    }

    /// A computed function whose failure aborts the build.
    pub fn try_derive<V: Into<Value>>(
        derive: impl Fn(&Value) -> Result<V, CallbackError> + 'static,
    ) -> Self {
        Self::Derive(Box::new(move |entity| derive(entity).map(Into::into)))
    }

    /// A nested specification applied against a sub-object.
    #[must_use]
    pub const fn nested(map: ComputedMap) -> Self {
        Self::Nested(map)
    }
}

impl From<ComputedMap> for Computed {
    fn from(map: ComputedMap) -> Self {
        Self::Nested(map)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derive(_) => f.write_str("Derive(..)"),
            Self::Nested(map) => f.debug_tuple("Nested").field(map).finish(),
        }
    }
}

///
/// Options
///
/// Per-factory assembly options.
///

pub struct Options {
    /// Field path (dot-separated for nested targets) receiving the
    /// sequence value, if any.
    pub(crate) sequence_field: Option<String>,

    /// Custom mapping from the raw counter to the stored value.
    pub(crate) sequence_transform: Option<SequenceTransform>,

    /// Initial counter value; incremented by one per built entity.
    pub(crate) sequence_start: i64,

    /// Whether top-level `Null` fields left by the constructor are
    /// removed right after instantiation.
    pub(crate) strip_unset: bool,
}

impl Options {
    pub const DEFAULT_SEQUENCE_START: i64 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            sequence_field: None,
            sequence_transform: None,
            sequence_start: Self::DEFAULT_SEQUENCE_START,
            strip_unset: false,
        }
    }

    #[must_use]
    pub fn sequence_field(mut self, field: impl Into<String>) -> Self {
        self.sequence_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn sequence_transform(mut self, transform: impl Fn(i64) -> Value + 'static) -> Self {
        self.sequence_transform = Some(Box::new(transform));
        self
    }

    #[must_use]
    pub const fn sequence_start(mut self, start: i64) -> Self {
        self.sequence_start = start;
        self
    }

    #[must_use]
    pub const fn strip_unset(mut self) -> Self {
        self.strip_unset = true;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("sequence_field", &self.sequence_field)
            .field("sequence_transform", &self.sequence_transform.is_some())
            .field("sequence_start", &self.sequence_start)
            .field("strip_unset", &self.strip_unset)
            .finish()
    }
}

///
/// props
///
/// Literal syntax for a `PropertyMap`. Values go through
/// `Property::from`, so literals, nested `props!` maps, and explicit
/// `Property` constructors all work in place.
///

#[macro_export]
macro_rules! props {
    () => {
        $crate::spec::PropertyMap::new()
    };
    ( $( $key:literal => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::spec::PropertyMap::new();
        $( map.insert($key, $crate::spec::Property::from($value)); )+
        map
    }};
}

///
/// computed
///
/// Literal syntax for a `ComputedMap`. Values go through
/// `Computed::from`; use `Computed::derive` for the function variant and
/// a nested `computed!` map for recursion.
///

#[macro_export]
macro_rules! computed {
    () => {
        $crate::spec::ComputedMap::new()
    };
    ( $( $key:literal => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::spec::ComputedMap::new();
        $( map.insert($key, $crate::spec::Computed::from($value)); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_from_literal_and_map() {
        assert!(matches!(Property::from(42), Property::Literal(Value::Int(42))));
        assert!(matches!(Property::from("x"), Property::Literal(Value::Text(_))));
        assert!(matches!(
            Property::from(props! { "a" => 1 }),
            Property::Nested(_)
        ));
    }

    #[test]
    fn props_macro_preserves_order_and_last_wins() {
        let map = props! {
            "b" => 1,
            "a" => 2,
        };
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["b", "a"]);

        let mut map = map;
        map.insert("b", Property::value(9));
        assert!(matches!(
            map.get("b"),
            Some(Property::Literal(Value::Int(9)))
        ));
    }

    #[test]
    fn generator_wraps_infallible_closures() {
        let property = Property::generate(|| 7);
        let Property::Generator(generate) = property else {
            panic!("expected generator variant");
        };

        assert_eq!(generate().ok(), Some(Value::Int(7)));
    }

    #[test]
    fn options_defaults_match_documented_values() {
        let options = Options::new();

        assert!(options.sequence_field.is_none());
        assert!(options.sequence_transform.is_none());
        assert_eq!(options.sequence_start, Options::DEFAULT_SEQUENCE_START);
        assert!(!options.strip_unset);
    }
}
