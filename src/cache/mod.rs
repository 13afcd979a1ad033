//! Memoization for diagram construction.
//!
//! The Shannon-expansion engine meets the same residual sub-problem (the same
//! simplified expression at the same depth of the variable order) many times.
//! [`Cache`] remembers the canonical node built for each one, so the
//! substitution and simplification work is done once per distinct sub-problem.
//!
//! # Example
//!
//! ```
//! use robdd_equiv::cache::Cache;
//!
//! let mut cache = Cache::<(u64, u64), i32>::new(4);
//! cache.insert((1, 2), 42);
//! assert_eq!(cache.get(&(1, 2)), Some(&42));
//! assert_eq!(cache.hits(), 1);
//! ```

mod hashmap;

pub use hashmap::HashMapCache;

/// Default cache implementation.
pub type Cache<K, V> = HashMapCache<K, V>;
