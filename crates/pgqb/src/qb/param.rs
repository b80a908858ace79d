//! Argument values for an external executor.
//!
//! Rendering only produces placeholders. [`Bindings`] holds the values, and
//! [`Rendered::bind`] lines them up with the placeholder slots of one
//! rendered statement.

use crate::context::Rendered;
use crate::error::{QbError, QbResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter value.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Box a value for binding.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// The value as a tokio-postgres parameter.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

/// Argument values keyed by tag, plus a queue for anonymous arguments.
///
/// # Example
/// ```
/// use pgqb::prelude::*;
///
/// let school = table("school");
/// let stmt = select([school.column("name")])
///     .where_(school.column("city").eq(arg("city")).and(school.column("id").gt(arg(""))));
/// let rendered = stmt.render(RenderOptions::default()).unwrap();
///
/// let params = rendered
///     .bind(&Bindings::new().set("city", "Oslo").push(10_i64))
///     .unwrap();
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    named: HashMap<String, Param>,
    anonymous: Vec<Param>,
}

impl Bindings {
    /// No values bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `tag`. Setting a tag twice keeps the last value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, tag: impl Into<String>, value: T) -> Self {
        self.named.insert(tag.into(), Param::new(value));
        self
    }

    /// Next value for an anonymous argument, in render order.
    pub fn push<T: ToSql + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.anonymous.push(Param::new(value));
        self
    }

    /// The value bound to a named tag.
    pub fn get(&self, tag: &str) -> Option<&Param> {
        self.named.get(tag)
    }

    /// Number of named and anonymous values.
    pub fn len(&self) -> usize {
        self.named.len() + self.anonymous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.anonymous.is_empty()
    }
}

impl Rendered {
    /// Resolve one value per argument slot, in slot order.
    ///
    /// Anonymous slots consume the anonymous queue front to back. A tag with
    /// no value, or more anonymous slots than queued values, is
    /// [`QbError::MissingArgument`].
    pub fn bind(&self, bindings: &Bindings) -> QbResult<Vec<Param>> {
        let mut anonymous = bindings.anonymous.iter();
        let mut out = Vec::with_capacity(self.arguments.len());
        for (slot, tag) in self.arguments.iter().enumerate() {
            let param = if tag.is_empty() {
                anonymous
                    .next()
                    .ok_or_else(|| QbError::MissingArgument(format!("anonymous argument ${}", slot + 1)))?
            } else {
                bindings
                    .get(tag)
                    .ok_or_else(|| QbError::MissingArgument(tag.clone()))?
            };
            out.push(param.clone());
        }
        Ok(out)
    }
}

/// Borrow bound parameters in the form tokio-postgres expects.
pub fn params_ref(params: &[Param]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(Param::as_ref).collect()
}
