//! Runtime parameter resolution for late pruning.

use crate::ast::ParamRef;
use hashbrown::HashMap;
use prunus_core::{Error, Result, Value};

/// Resolves query parameters to values once they are known at execution.
pub trait ParamResolver {
    /// Returns the value bound to `param`.
    fn resolve(&self, param: &ParamRef) -> Result<Value>;
}

/// Parameter values keyed by parameter number.
#[derive(Clone, Debug, Default)]
pub struct ParamValues {
    values: HashMap<u32, Value>,
}

impl ParamValues {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to parameter `id`, replacing any previous binding.
    pub fn bind(&mut self, id: u32, value: impl Into<Value>) {
        self.values.insert(id, value.into());
    }

    /// Builder form of [`ParamValues::bind`].
    pub fn with(mut self, id: u32, value: impl Into<Value>) -> Self {
        self.bind(id, value);
        self
    }

    /// Returns the number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParamResolver for ParamValues {
    fn resolve(&self, param: &ParamRef) -> Result<Value> {
        let value = self
            .values
            .get(&param.id)
            .ok_or_else(|| Error::param_resolution(param.id, "no value bound"))?;

        match param.data_type {
            Some(t) if !value.is_null() && value.data_type() != Some(t) => value
                .cast_to(t)
                .map_err(|_| Error::param_resolution(param.id, "value does not match declared type")),
            _ => Ok(value.clone()),
        }
    }
}

impl FromIterator<(u32, Value)> for ParamValues {
    fn from_iter<I: IntoIterator<Item = (u32, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
