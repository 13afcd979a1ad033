//! Canonicalization (unique) table.
//!
//! Values live in a slot vector and are threaded into per-bucket chains by
//! [`MyHash`]. Slot 0 is a sentry: a `next` of 0 terminates a chain and a
//! bucket head of 0 means the bucket is empty.
//!
//! Slots are never moved, so an index handed out by [`Table::put`] stays valid
//! until [`Table::retain`] drops that very slot.

use std::cmp::min;
use std::ops::Index;

use crate::error::{Error, Result};
use crate::utils::MyHash;

#[derive(Clone, Default)]
struct Entry<T> {
    value: T,
    next: usize,
    occupied: bool,
}

pub struct Table<T> {
    data: Vec<Entry<T>>,

    buckets: Vec<usize>,
    bitmask: u64,

    /// Index of the first *possibly* free (non-occupied) cell.
    min_free: usize,
    /// Index of the last occupied cell.
    last_index: usize,
    /// Number of occupied cells.
    real_size: usize,
    /// Maximum number of occupied cells, if bounded.
    limit: Option<usize>,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with room for `2^bits` values before growing.
    pub fn new(bits: usize) -> Self {
        Self::with_buckets(bits, min(bits, 16), None)
    }

    /// Create a new table with `2^bucket_bits` hash chains and an optional size limit.
    pub fn with_buckets(bits: usize, bucket_bits: usize, limit: Option<usize>) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");
        assert!(bucket_bits <= 31, "Bucket bits should be in the range 0..=31");

        let capacity = 1 << bits;
        let mut data: Vec<Entry<T>> = Vec::with_capacity(capacity);
        data.resize_with(capacity.max(1), Entry::default);
        data[0].occupied = true; // Set 0th cell as occupied (sentry).

        let buckets_size = 1 << bucket_bits;

        Self {
            data,
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
            min_free: 1,
            last_index: 0,
            real_size: 0,
            limit,
        }
    }

    /// Allocate a new cell in the table and return its index.
    fn alloc(&mut self) -> Result<usize> {
        if let Some(limit) = self.limit {
            if self.real_size >= limit {
                return Err(Error::TableFull { limit });
            }
        }

        let index = (self.min_free..=self.last_index)
            .find(|&i| !self.data[i].occupied)
            .unwrap_or_else(|| {
                self.last_index += 1;
                self.last_index
            });

        if index >= self.data.len() {
            let grown = self.data.len() * 2;
            self.data.resize_with(grown, Entry::default);
        }

        self.data[index].occupied = true;
        self.min_free = index + 1;
        self.real_size += 1;

        Ok(index)
    }

    /// Add a new value to the table, outside of any chain, and return its index.
    fn add(&mut self, value: T) -> Result<usize> {
        let index = self.alloc()?;

        self.data[index].value = value;
        self.data[index].next = 0;

        Ok(index)
    }
}

impl<T> Table<T> {
    /// Get the number of allocated cells, including free ones.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
    /// Get the index of the last occupied.
    pub fn size(&self) -> usize {
        self.last_index
    }
    /// Get the number of occupied cells.
    pub fn real_size(&self) -> usize {
        self.real_size
    }
    /// Get the maximum number of occupied cells, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
    /// Get the number of hash chains.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        debug_assert!(self.data[index].occupied, "Slot {} is free", index);
        &self.data[index].value
    }

    /// Check if the cell at the given index is occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        assert_ne!(index, 0, "Index is 0");
        self.data.get(index).is_some_and(|e| e.occupied)
    }

    /// Get the index of the next cell in the same chain.
    pub fn next(&self, index: usize) -> usize {
        assert_ne!(index, 0, "Index is 0");
        self.data[index].next
    }

    /// Iterate over the indices of all occupied cells.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.last_index).filter(|&i| self.data[i].occupied)
    }

    /// Release the cell at the given index. The caller unlinks it from its chain.
    fn free(&mut self, index: usize) {
        assert_ne!(index, 0, "Index is 0");

        self.data[index].occupied = false;
        self.data[index].next = 0;
        self.min_free = min(self.min_free, index);
        self.real_size -= 1;
    }

    /// Drop every value for which `keep` returns `false` and return how many were dropped.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &T) -> bool,
    {
        let mut dropped = 0;
        for bucket in 0..self.buckets.len() {
            let mut prev = 0;
            let mut index = self.buckets[bucket];
            while index != 0 {
                let next = self.data[index].next;
                if keep(index, &self.data[index].value) {
                    prev = index;
                } else {
                    if prev == 0 {
                        self.buckets[bucket] = next;
                    } else {
                        self.data[prev].next = next;
                    }
                    self.free(index);
                    dropped += 1;
                }
                index = next;
            }
        }
        dropped
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of a value equal to `value`.
    pub fn lookup(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            if &self.data[index].value == value {
                return Some(index);
            }
            index = self.data[index].next;
        }
        None
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq + Default,
{
    /// Insert a value that is not yet present and return its index.
    pub fn insert(&mut self, value: T) -> Result<usize> {
        debug_assert!(self.lookup(&value).is_none(), "Value is already present");

        let bucket_index = self.bucket_index(&value);
        let head = self.buckets[bucket_index];
        let index = self.add(value)?;
        self.data[index].next = head;
        self.buckets[bucket_index] = index;
        Ok(index)
    }

    /// Return the index of the value equal to `value`, inserting it if absent.
    pub fn put(&mut self, value: T) -> Result<usize> {
        match self.lookup(&value) {
            Some(index) => Ok(index),
            None => self.insert(value),
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
