//! Per use-site values keyed by category.

use std::fmt::Write;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{
    category::{Category, CategorySet},
    error::{ConfigError, ResolveError},
};

/// Category to optional value, in declaration order.
///
/// Not every category needs a value; lookups for a missing one fall back as
/// described on [`CategoryValueMap::resolve_index`]. At least one value is
/// required, which is checked on construction.
#[derive(Clone, Debug)]
pub struct CategoryValueMap<C, V> {
    entries: IndexMap<C, Option<V>, FxBuildHasher>,
}

impl<C: Category, V> CategoryValueMap<C, V> {
    /// Build a map from `(category, value)` pairs.
    ///
    /// A category listed twice keeps its first position and its last value.
    pub fn new(entries: impl IntoIterator<Item = (C, Option<V>)>) -> Result<Self, ConfigError> {
        let mut map = IndexMap::with_hasher(FxBuildHasher);
        for (category, value) in entries {
            map.insert(category, value);
        }
        let map = Self { entries: map };
        if map.defined().next().is_none() {
            return Err(ConfigError::EmptyValueMap {
                declared: map.describe(),
            });
        }
        Ok(map)
    }

    pub fn builder() -> CategoryValueMapBuilder<C, V> {
        CategoryValueMapBuilder::default()
    }

    pub fn get(&self, category: C) -> Option<&V> {
        self.entries.get(&category).and_then(Option::as_ref)
    }

    /// Every declared entry, empty ones included, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (C, Option<&V>)> + '_ {
        self.entries.iter().map(|(c, v)| (*c, v.as_ref()))
    }

    /// The entries that hold a value, in declaration order.
    pub fn defined(&self) -> impl Iterator<Item = (C, &V)> + '_ {
        self.entries
            .iter()
            .filter_map(|(c, v)| v.as_ref().map(|v| (*c, v)))
    }

    /// Number of declared entries, empty ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn value_at(&self, index: usize) -> Option<&V> {
        self.entries.get_index(index).and_then(|(_, v)| v.as_ref())
    }

    /// The slot whose value `category` resolves to:
    ///
    /// 1. the entry for `category` itself,
    /// 2. else the closest lower-ranked category with a value,
    /// 3. else the first value in declaration order, whatever its rank.
    pub fn resolve_index(&self, category: C) -> Result<usize, ResolveError> {
        if let Some(index) = self.defined_index_of(category) {
            return Ok(index);
        }

        let lower = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (c, v))| **c < category && v.is_some())
            .max_by_key(|(_, (c, _))| **c);
        if let Some((index, (c, _))) = lower {
            tracing::trace!(
                requested = category.name(),
                resolved = c.name(),
                "fell back to a smaller category"
            );
            return Ok(index);
        }

        if let Some(index) = self.entries.values().position(Option::is_some) {
            tracing::trace!(
                requested = category.name(),
                resolved = ?self.entries.get_index(index).map(|(c, _)| c.name()),
                "no smaller category defined, using the first declared value"
            );
            return Ok(index);
        }

        Err(self.exhausted(category))
    }

    /// The value `category` resolves to. See [`Self::resolve_index`].
    pub fn resolve(&self, category: C) -> Result<&V, ResolveError> {
        let index = self.resolve_index(category)?;
        self.value_at(index).ok_or_else(|| self.exhausted(category))
    }

    pub(crate) fn exhausted(&self, category: C) -> ResolveError {
        ResolveError::Exhausted {
            category: category.name(),
            contents: self.describe(),
        }
    }

    fn defined_index_of(&self, category: C) -> Option<usize> {
        let (index, _, value) = self.entries.get_full(&category)?;
        value.as_ref().map(|_| index)
    }

    /// `name: set` / `name: empty` for every declared entry.
    fn describe(&self) -> String {
        let mut out = String::new();
        for (i, (category, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let state = if value.is_some() { "set" } else { "empty" };
            let _ = write!(out, "{}: {state}", category.name());
        }
        out
    }
}

/// Incremental construction of a [`CategoryValueMap`].
///
/// ```rust,ignore
/// let columns = CategoryValueMap::builder()
///     .value(ScreenSize::Xs, 1)
///     .values(range(ScreenSize::Md..=ScreenSize::Lg), 2)
///     .value(ScreenSize::Xxl, 4)
///     .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct CategoryValueMapBuilder<C, V> {
    entries: Vec<(C, Option<V>)>,
}

impl<C, V> Default for CategoryValueMapBuilder<C, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C: Category, V> CategoryValueMapBuilder<C, V> {
    pub fn value(mut self, category: C, value: V) -> Self {
        self.entries.push((category, Some(value)));
        self
    }

    /// Declare `category` without a value (fixing its place in declaration
    /// order) or with one.
    pub fn optional(mut self, category: C, value: Option<V>) -> Self {
        self.entries.push((category, value));
        self
    }

    /// The same value for every category in `set`, smallest first.
    pub fn values(mut self, set: CategorySet<C>, value: V) -> Self
    where
        V: Clone,
    {
        self.entries
            .extend(set.iter().map(|category| (category, Some(value.clone()))));
        self
    }

    pub fn build(self) -> Result<CategoryValueMap<C, V>, ConfigError> {
        CategoryValueMap::new(self.entries)
    }
}

/// One-shot lookup without a cache.
pub fn resolve<C: Category, V>(
    category: C,
    map: &CategoryValueMap<C, V>,
) -> Result<&V, ResolveError> {
    map.resolve(category)
}
