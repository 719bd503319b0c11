//! Per-logger cache of category sinks
//!
//! A cache belongs to one derivation family. It holds the family's base sink
//! (`source`) and, for every category requested so far, the sink that
//! `source.category(name)` returned. Entries are never stale relative to
//! `source`: replacing the source re-derives every entry in place.
//!
//! A category-logger owns a cache of its own whose source is not fixed but
//! linked upstream to `parent[name]`. Every access re-reads that link and
//! rebuilds when the parent's entry has changed, which keeps nested
//! categories fresh after the root swaps its sink.

use super::error::{LoggerError, Result};
use super::strategy::{same_strategy, LogStrategy};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) type SharedCache = Arc<RwLock<CategoryCache>>;

pub(crate) struct CategoryCache {
    source: Arc<dyn LogStrategy>,
    entries: HashMap<String, Arc<dyn LogStrategy>>,
    upstream: Option<Upstream>,
}

struct Upstream {
    cache: SharedCache,
    name: Arc<str>,
}

impl CategoryCache {
    pub(crate) fn shared(source: Arc<dyn LogStrategy>) -> SharedCache {
        Arc::new(RwLock::new(Self {
            source,
            entries: HashMap::new(),
            upstream: None,
        }))
    }

    /// Cache for a category-logger whose sink is `parent[name]`.
    ///
    /// `parent` must already hold `name`.
    pub(crate) fn linked(parent: &SharedCache, name: &str) -> Result<SharedCache> {
        let source = lookup(parent, name)?;
        Ok(Arc::new(RwLock::new(Self {
            source,
            entries: HashMap::new(),
            upstream: Some(Upstream {
                cache: Arc::clone(parent),
                name: Arc::from(name),
            }),
        })))
    }

    /// Private copy bound to `source`, carrying over the cached names.
    pub(crate) fn detached(from: &SharedCache, source: Arc<dyn LogStrategy>) -> SharedCache {
        let names: Vec<String> = from.read().entries.keys().cloned().collect();
        let entries = names
            .into_iter()
            .map(|name| {
                let sink = Arc::clone(&source).category(&name);
                (name, sink)
            })
            .collect();
        Arc::new(RwLock::new(Self {
            source,
            entries,
            upstream: None,
        }))
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn evict(&mut self, name: &str) {
        self.entries.remove(name);
    }
}

/// Swap the base sink of `cache` and re-derive every cached entry from it.
///
/// No guard is held while `source.category()` runs, so a sink may log
/// through its own family while deriving. Names that show up meanwhile are
/// derived on the next pass.
fn rebuild(cache: &SharedCache, source: Arc<dyn LogStrategy>) {
    let mut derived: HashMap<String, Arc<dyn LogStrategy>> = HashMap::new();
    loop {
        let pending: Vec<String> = cache
            .read()
            .entries
            .keys()
            .filter(|name| !derived.contains_key(*name))
            .cloned()
            .collect();
        for name in pending {
            let sink = Arc::clone(&source).category(&name);
            derived.insert(name, sink);
        }

        let mut guard = cache.write();
        if guard.entries.keys().all(|name| derived.contains_key(name)) {
            guard.entries = derived;
            guard.source = source;
            return;
        }
    }
}

/// The current base sink of `cache`, re-syncing it from upstream first.
pub(crate) fn source(cache: &SharedCache) -> Result<Arc<dyn LogStrategy>> {
    let (current, upstream) = {
        let guard = cache.read();
        let upstream = guard
            .upstream
            .as_ref()
            .map(|up| (Arc::clone(&up.cache), Arc::clone(&up.name)));
        (Arc::clone(&guard.source), upstream)
    };

    let Some((parent, name)) = upstream else {
        return Ok(current);
    };

    let fresh = lookup(&parent, &name)?;
    if !same_strategy(&current, &fresh) {
        rebuild(cache, Arc::clone(&fresh));
    }
    Ok(fresh)
}

/// The sink cached for `name`.
///
/// Absence means cache maintenance broke and is reported as
/// [`LoggerError::MissingCategory`].
pub(crate) fn lookup(cache: &SharedCache, name: &str) -> Result<Arc<dyn LogStrategy>> {
    source(cache)?;
    cache
        .read()
        .entries
        .get(name)
        .cloned()
        .ok_or_else(|| LoggerError::missing_category(name))
}

/// Populate `name`, reusing a cached sink when `use_cache` allows it.
pub(crate) fn resolve(cache: &SharedCache, name: &str, use_cache: bool) -> Result<Arc<dyn LogStrategy>> {
    let base = source(cache)?;
    if use_cache {
        let hit = cache.read().entries.get(name).cloned();
        if let Some(hit) = hit {
            return Ok(hit);
        }
    }

    // Derived without a guard held; the sink may log while it works
    let sink = Arc::clone(&base).category(name);

    let mut guard = cache.write();
    if !same_strategy(&guard.source, &base) {
        // The base was swapped while deriving; derive again from the new one
        drop(guard);
        return resolve(cache, name, use_cache);
    }
    if use_cache {
        if let Some(hit) = guard.entries.get(name) {
            return Ok(Arc::clone(hit));
        }
    }
    guard.entries.insert(name.to_string(), Arc::clone(&sink));
    Ok(sink)
}

/// Replace the base sink of an owned cache, eagerly rebuilding its entries.
///
/// Any upstream link is cut: an explicitly assigned sink is not overridden
/// by later changes to the parent.
pub(crate) fn replace_source(cache: &SharedCache, strategy: Arc<dyn LogStrategy>) {
    cache.write().upstream = None;
    rebuild(cache, strategy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sink whose categories are fresh objects sharing one derivation counter.
    struct Named {
        derived: Arc<AtomicUsize>,
    }

    impl Named {
        fn root() -> Arc<Self> {
            Arc::new(Self {
                derived: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    impl LogStrategy for Named {
        fn category(self: Arc<Self>, _name: &str) -> Arc<dyn LogStrategy> {
            self.derived.fetch_add(1, Ordering::SeqCst);
            Arc::new(Named {
                derived: Arc::clone(&self.derived),
            })
        }
        fn verbose(&self, _msg: &str) {}
        fn debug(&self, _msg: &str) {}
        fn info(&self, _msg: &str) {}
        fn warn(&self, _msg: &str, _err: Option<&dyn Error>) {}
        fn error(&self, _msg: &str, _err: Option<&dyn Error>) {}
        fn fatal(&self, _msg: &str, _err: Option<&dyn Error>) {}
    }

    #[test]
    fn test_resolve_caches_by_name() {
        let root = Named::root();
        let cache = CategoryCache::shared(root.clone());

        let first = resolve(&cache, "db", true).unwrap();
        let second = resolve(&cache, "db", true).unwrap();

        assert!(same_strategy(&first, &second));
        assert_eq!(root.derived.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_without_cache_overwrites_entry() {
        let root = Named::root();
        let cache = CategoryCache::shared(root.clone());

        let first = resolve(&cache, "db", true).unwrap();
        let fresh = resolve(&cache, "db", false).unwrap();
        let cached = lookup(&cache, "db").unwrap();

        assert!(!same_strategy(&first, &fresh));
        assert!(same_strategy(&fresh, &cached));
        assert_eq!(root.derived.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_replace_source_rebuilds_every_entry() {
        let cache = CategoryCache::shared(Named::root());
        resolve(&cache, "db", true).unwrap();
        resolve(&cache, "http", true).unwrap();

        let s2 = Named::root();
        replace_source(&cache, s2.clone());

        assert_eq!(s2.derived.load(Ordering::SeqCst), 2);
        let mut names: Vec<String> = cache.read().names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["db", "http"]);
    }

    #[test]
    fn test_linked_cache_follows_parent() {
        let parent = CategoryCache::shared(Named::root());
        resolve(&parent, "db", true).unwrap();
        let child = CategoryCache::linked(&parent, "db").unwrap();
        let before = resolve(&child, "pool", true).unwrap();

        replace_source(&parent, Named::root());

        let db_now = lookup(&parent, "db").unwrap();
        let child_source = source(&child).unwrap();
        assert!(same_strategy(&db_now, &child_source));

        let after = lookup(&child, "pool").unwrap();
        assert!(!same_strategy(&before, &after));
    }

    #[test]
    fn test_unchanged_upstream_needs_no_write() {
        let root = Named::root();
        let parent = CategoryCache::shared(root.clone());
        resolve(&parent, "db", true).unwrap();
        let child = CategoryCache::linked(&parent, "db").unwrap();
        resolve(&child, "pool", true).unwrap();
        let derived = root.derived.load(Ordering::SeqCst);

        // Would block if the steady path asked for a write guard
        let _parent_guard = parent.read();
        let _child_guard = child.read();
        for _ in 0..3 {
            source(&child).unwrap();
            lookup(&child, "pool").unwrap();
        }

        assert_eq!(root.derived.load(Ordering::SeqCst), derived);
    }

    #[test]
    fn test_lookup_missing_is_fault() {
        let cache = CategoryCache::shared(Named::root());
        let err = lookup(&cache, "nope").err().expect("missing entry");
        assert!(matches!(err, LoggerError::MissingCategory { ref name } if name == "nope"));
    }

    #[test]
    fn test_detached_copies_names_not_sinks() {
        let shared = CategoryCache::shared(Named::root());
        let old = resolve(&shared, "db", true).unwrap();

        let private = CategoryCache::detached(&shared, Named::root());
        let new = lookup(&private, "db").unwrap();

        assert!(!same_strategy(&old, &new));
        assert!(same_strategy(&old, &lookup(&shared, "db").unwrap()));
    }
}
