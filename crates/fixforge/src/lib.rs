//! fixforge: a test-fixture object factory.
//!
//! ## Crate layout
//! - `core`: the assembly engine (value model, property/computed
//!   specifications, deep merge, builder, and error types).
//!
//! The `prelude` module re-exports the surface test code uses: the
//! builder, the factory, the value tree, and the `props!`/`computed!`/
//! `fields!` specification macros.
//!
//! ```rust,ignore
//! use fixforge::prelude::*;
//!
//! let factory = FactoryBuilder::new()
//!     .options(Options::new().sequence_field("id"))
//!     .props(props! {
//!         "username" => Property::generate(|| "generated"),
//!         "age" => 18,
//!     })
//!     .computed(computed! {
//!         "months_alive" => Computed::derive(|e| match e.get("age") {
//!             Some(Value::Int(age)) => age * 12,
//!             _ => 0,
//!         }),
//!     })
//!     .finish();
//!
//! let user = factory.build_one()?;
//! ```

pub use fixforge_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use fixforge_core::{
    BuildError, CallbackError, Computed, ComputedMap, Factory, FactoryBuilder, Fields, Options,
    OrderedMap, Property, PropertyMap, Value, computed, fields, props,
};

///
/// Prelude
///

pub mod prelude {
    pub use fixforge_core::{
        BuildError, Computed, Factory, FactoryBuilder, Fields, Options, Property, Value, computed,
        fields, props,
    };
}
