//! Assembly engine for test-fixture objects.
//!
//! A `FactoryBuilder` accumulates property, computed, mixin, and option
//! specifications; `finish()` turns them into a `Factory` that assembles
//! entities in a fixed stage order: constructor, mixins, sequence field,
//! properties, computed fields, caller overrides. Later stages overwrite
//! earlier ones for the same field path, and overrides always win.

pub mod builder;
pub mod error;
pub mod factory;
pub mod map;
pub mod merge;
pub mod spec;
pub mod value;

// re-exports
pub use builder::FactoryBuilder;
pub use error::BuildError;
pub use factory::Factory;
pub use map::OrderedMap;
pub use spec::{CallbackError, Computed, ComputedMap, Options, Property, PropertyMap};
pub use value::{Fields, Value};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        builder::FactoryBuilder,
        computed,
        error::BuildError,
        factory::Factory,
        fields, props,
        spec::{Computed, Options, Property},
        value::{Fields, Value},
    };
}
