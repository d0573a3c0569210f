use crate::{
    factory::{Blueprint, Factory},
    spec::{CallbackError, ComputedMap, Constructor, Options, Property, PropertyMap},
    value::Fields,
};

///
/// FactoryBuilder
///
/// Accumulates property, computed, mixin, and option specifications for
/// one entity type, then finalizes them into a `Factory`.
///
/// Accumulation calls preserve insertion order; registering the same
/// field twice keeps its position and replaces the specification
/// (last-write-wins at the leaf).
///

#[derive(Default)]
pub struct FactoryBuilder {
    properties: PropertyMap,
    computed: ComputedMap,
    mixins: Vec<Factory>,
    options: Options,
    constructor: Option<Constructor>,
}

impl FactoryBuilder {
    /// A builder whose entities start from an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose entities start from the constructor's shape.
    #[must_use]
    pub fn with_constructor(construct: impl Fn() -> Fields + 'static) -> Self {
        Self {
            constructor: Some(Box::new(move || Ok(construct()))),
            ..Self::default()
        }
    }

    /// A builder with a constructor that may fail; the failure surfaces
    /// unmodified as a construction error.
    #[must_use]
    pub fn with_try_constructor(
        construct: impl Fn() -> Result<Fields, CallbackError> + 'static,
    ) -> Self {
        Self {
            constructor: Some(Box::new(construct)),
            ..Self::default()
        }
    }

    /// Replace the assembly options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register a single property specification.
    #[must_use]
    pub fn prop(mut self, field: impl Into<String>, property: impl Into<Property>) -> Self {
        self.properties.insert(field, property.into());
        self
    }

    /// Register a batch of property specifications.
    #[must_use]
    pub fn props(mut self, properties: PropertyMap) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Register a batch of computed-field specifications.
    #[must_use]
    pub fn computed(mut self, computed: ComputedMap) -> Self {
        self.computed.extend(computed);
        self
    }

    /// Append mixin factories, applied in registration order before
    /// local properties.
    #[must_use]
    pub fn mixins(mut self, mixins: impl IntoIterator<Item = Factory>) -> Self {
        self.mixins.extend(mixins);
        self
    }

    /// Finalize the accumulated state into an assembly engine.
    #[must_use]
    pub fn finish(self) -> Factory {
        Factory::new(Blueprint {
            properties: self.properties,
            computed: self.computed,
            mixins: self.mixins,
            options: self.options,
            constructor: self.constructor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{props, value::Value};

    #[test]
    fn later_props_registration_wins() {
        let factory = FactoryBuilder::new()
            .props(props! { "age" => 1 })
            .props(props! { "age" => 2 })
            .finish();

        let entity = factory.build_one().unwrap();
        assert_eq!(entity.get("age"), Some(&Value::Int(2)));
    }

    #[test]
    fn prop_and_props_share_last_write_wins_semantics() {
        let factory = FactoryBuilder::new()
            .props(props! { "username" => "first", "age" => 1 })
            .prop("username", "second")
            .finish();

        let entity = factory.build_one().unwrap();
        assert_eq!(entity.get("username"), Some(&Value::from("second")));
        assert_eq!(entity.get("age"), Some(&Value::Int(1)));
    }

    #[test]
    fn prop_accepts_nested_maps() {
        let factory = FactoryBuilder::new()
            .prop("friend", props! { "username" => "a" })
            .finish();

        let entity = factory.build_one().unwrap();
        assert_eq!(entity.at("friend.username"), Some(&Value::from("a")));
    }
}
