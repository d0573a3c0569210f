use crate::{
    error::BuildError,
    merge::{merge_fields, set_path, set_segments},
    spec::{Computed, ComputedMap, ComputeFn, Constructor, Options, Property, PropertyMap},
    value::{Fields, Value},
};
use std::cell::Cell;

///
/// Blueprint
///
/// The finalized configuration a factory assembles from. Immutable once
/// the builder hands it over.
///

pub(crate) struct Blueprint {
    pub(crate) properties: PropertyMap,
    pub(crate) computed: ComputedMap,
    pub(crate) mixins: Vec<Factory>,
    pub(crate) options: Options,
    pub(crate) constructor: Option<Constructor>,
}

///
/// Factory
///
/// The assembly engine: produces concrete entities on demand from one
/// finalized blueprint.
///
/// The only mutable state is the sequence counter, held in a `Cell` so
/// builds take `&self`. `Cell` also makes the factory `!Sync`: one
/// engine belongs to one logical caller at a time, and concurrent
/// generation needs independent engines.
///

pub struct Factory {
    blueprint: Blueprint,
    counter: Cell<i64>,
}

impl Factory {
    pub(crate) fn new(blueprint: Blueprint) -> Self {
        let counter = Cell::new(blueprint.options.sequence_start);

        Self { blueprint, counter }
    }

    /// Assemble a single entity.
    pub fn build_one(&self) -> Result<Value, BuildError> {
        self.assemble(None).map(Value::Object)
    }

    /// Assemble a single entity, deep-merging the overrides last so the
    /// caller's fields win over mixins, properties, and computed fields.
    pub fn build_one_with(&self, overrides: &Fields) -> Result<Value, BuildError> {
        self.assemble(Some(overrides)).map(Value::Object)
    }

    /// Assemble `count` independent entities. The sequence counter is
    /// shared across the whole batch, so sequence values strictly
    /// increase. A count of zero yields an empty vector.
    pub fn build_many(&self, count: usize) -> Result<Vec<Value>, BuildError> {
        self.build_batch(count, None)
    }

    /// Assemble `count` entities with the same overrides applied to
    /// every one of them.
    pub fn build_many_with(
        &self,
        count: usize,
        overrides: &Fields,
    ) -> Result<Vec<Value>, BuildError> {
        self.build_batch(count, Some(overrides))
    }

    /// Reset the sequence counter to its configured start value.
    pub fn reset_sequence(&self) {
        self.counter.set(self.blueprint.options.sequence_start);
    }

    fn build_batch(
        &self,
        count: usize,
        overrides: Option<&Fields>,
    ) -> Result<Vec<Value>, BuildError> {
        (0..count)
            .map(|_| self.assemble(overrides).map(Value::Object))
            .collect()
    }

    /// The single assembly pass. Stage order is load-bearing: later
    /// stages overwrite earlier ones for the same field path.
    fn assemble(&self, overrides: Option<&Fields>) -> Result<Fields, BuildError> {
        let mut entity = self.instantiate()?;

        self.apply_mixins(&mut entity)?;
        self.assign_sequence(&mut entity);
        apply_properties(&mut entity, &self.blueprint.properties)?;
        apply_computed(&mut entity, &self.blueprint.computed)?;

        if let Some(overrides) = overrides {
            merge_fields(&mut entity, overrides);
        }

        Ok(entity)
    }

    fn instantiate(&self) -> Result<Fields, BuildError> {
        let mut entity = match &self.blueprint.constructor {
            Some(construct) => construct().map_err(BuildError::construction)?,
            None => Fields::new(),
        };

        if self.blueprint.options.strip_unset {
            entity.retain(|_, value| !value.is_null());
        }

        Ok(entity)
    }

    /// Shallow-merge each mixin's own build into the entity, later
    /// mixins overwriting earlier ones. Every mixin runs with its own
    /// blueprint and its own sequence counter.
    fn apply_mixins(&self, entity: &mut Fields) -> Result<(), BuildError> {
        for mixin in &self.blueprint.mixins {
            for (key, value) in mixin.assemble(None)? {
                entity.insert(key, value);
            }
        }

        Ok(())
    }

    fn assign_sequence(&self, entity: &mut Fields) {
        let Some(field) = &self.blueprint.options.sequence_field else {
            return;
        };

        let counter = self.counter.get();
        let value = match &self.blueprint.options.sequence_transform {
            Some(transform) => transform(counter),
            None => Value::Int(counter),
        };

        set_path(entity, field, value);
        self.counter.set(counter + 1);
    }
}

/// Recursively apply property specifications. Nested specifications
/// merge into an existing sub-object instead of replacing it, so fields
/// set by earlier stages survive.
fn apply_properties(entity: &mut Fields, specs: &PropertyMap) -> Result<(), BuildError> {
    for (key, spec) in specs.iter() {
        match spec {
            Property::Literal(value) => {
                entity.insert(key, value.clone());
            }

            Property::Generator(generate) => {
                let value =
                    generate().map_err(|source| BuildError::callback(source).with_field(key))?;
                entity.insert(key, value);
            }

            Property::Nested(inner) => {
                apply_properties(entity.object_mut(key), inner)
                    .map_err(|err| err.with_field(key))?;
            }
        }
    }

    Ok(())
}

/// Resolve computed specifications against the entity.
///
/// Runs in two phases so every function can borrow the whole entity:
/// flatten the nested specification into (path, function) pairs in
/// registration order, then invoke each against a snapshot taken right
/// before the call. Later functions observe earlier assignments.
fn apply_computed(entity: &mut Fields, specs: &ComputedMap) -> Result<(), BuildError> {
    // Phase 1: flatten in registration order.
    let mut flat = Vec::new();
    flatten_computed(specs, &mut Vec::new(), &mut flat);

    // Phase 2: invoke each function with the top-level entity.
    for (path, derive) in flat {
        let snapshot = Value::Object(entity.clone());
        let value = derive(&snapshot).map_err(|source| {
            path.iter()
                .rev()
                .fold(BuildError::callback(source), |err, segment| {
                    err.with_field(segment)
                })
        })?;

        set_segments(entity, &path, value);
    }

    Ok(())
}

fn flatten_computed<'a>(
    specs: &'a ComputedMap,
    prefix: &mut Vec<&'a str>,
    flat: &mut Vec<(Vec<&'a str>, &'a ComputeFn)>,
) {
    for (key, spec) in specs.iter() {
        prefix.push(key);
        match spec {
            Computed::Derive(derive) => flat.push((prefix.clone(), derive)),
            Computed::Nested(inner) => flatten_computed(inner, prefix, flat),
        }
        prefix.pop();
    }
}
