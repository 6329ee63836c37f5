//! A [`CategoryValueMap`] paired with a single-slot resolution cache.

use std::cell::Cell;

use crate::{category::Category, error::ResolveError, value_map::CategoryValueMap};

/// Hit/miss counters for a [`ValueResolver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// The last category resolved and the map slot it resolved to.
struct ResolverCache<C> {
    slot: Cell<Option<(C, usize)>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<C: Copy + PartialEq> ResolverCache<C> {
    fn new() -> Self {
        Self {
            slot: Cell::new(None),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    fn lookup(&self, category: C) -> Option<usize> {
        match self.slot.get() {
            Some((cached, index)) if cached == category => {
                self.hits.set(self.hits.get() + 1);
                Some(index)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    fn store(&self, category: C, index: usize) {
        self.slot.set(Some((category, index)));
    }
}

/// Resolves values for one use-site.
///
/// Consumers tend to ask for the same category many times in a row and
/// change it rarely, so the resolver remembers only the last answer. Asking
/// for another category recomputes and overwrites it. The cache never changes
/// what [`resolve`](Self::resolve) returns.
pub struct ValueResolver<C: Category, V> {
    map: CategoryValueMap<C, V>,
    cache: ResolverCache<C>,
}

impl<C: Category, V> ValueResolver<C, V> {
    pub fn new(map: CategoryValueMap<C, V>) -> Self {
        Self {
            map,
            cache: ResolverCache::new(),
        }
    }

    pub fn map(&self) -> &CategoryValueMap<C, V> {
        &self.map
    }

    pub fn into_map(self) -> CategoryValueMap<C, V> {
        self.map
    }

    /// The value for `category`.
    ///
    /// # Panics
    ///
    /// If the map holds no value at all, which construction of
    /// [`CategoryValueMap`] rules out.
    pub fn resolve(&self, category: C) -> &V {
        match self.try_resolve(category) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_resolve(&self, category: C) -> Result<&V, ResolveError> {
        if let Some(index) = self.cache.lookup(category)
            && let Some(value) = self.map.value_at(index)
        {
            tracing::trace!(category = category.name(), "resolver cache hit");
            return Ok(value);
        }

        let index = self.map.resolve_index(category)?;
        self.cache.store(category, index);
        self.map
            .value_at(index)
            .ok_or_else(|| self.map.exhausted(category))
    }

    /// Resolve without reading or writing the cache.
    pub fn resolve_uncached(&self, category: C) -> Result<&V, ResolveError> {
        self.map.resolve(category)
    }

    /// The category currently held by the cache slot.
    pub fn cached_category(&self) -> Option<C> {
        self.cache.slot.get().map(|(category, _)| category)
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.cache.hits.get(),
            misses: self.cache.misses.get(),
        }
    }
}

impl<C: Category, V> From<CategoryValueMap<C, V>> for ValueResolver<C, V> {
    fn from(map: CategoryValueMap<C, V>) -> Self {
        Self::new(map)
    }
}

impl<C: Category, V: std::fmt::Debug> std::fmt::Debug for ValueResolver<C, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueResolver")
            .field("map", &self.map)
            .field("cached", &self.cached_category())
            .finish()
    }
}
