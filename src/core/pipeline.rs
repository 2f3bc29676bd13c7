//! Storage-neutral aggregation pipeline
//!
//! Reports are expressed as a chain of stages executed in order:
//!
//! ```text
//! filter(predicate) -> group_by(key, reducer) -> having(predicate)
//!     -> sort_by(key, direction) -> paginate(offset, limit)
//! ```
//!
//! Stages run over plain vectors, so a report can be computed from whatever a
//! record store returns, or tested against an in-memory fixture.

use super::query::{PageRequest, SortDirection};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// Per-group reducer
///
/// A fresh accumulator is created for each group and fed every row of it.
pub trait Accumulator<T>: Default {
    fn accumulate(&mut self, row: &T);
}

/// Rows that can be ordered by a named field `K`
pub trait SortableBy<K> {
    fn compare_by(&self, other: &Self, key: K) -> Ordering;
}

/// One output row of a `group_by` stage
#[derive(Debug, Clone, PartialEq)]
pub struct Group<K, A> {
    pub key: K,
    pub value: A,
}

/// Running count and total over a set of rows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally<N> {
    pub count: usize,
    pub total: N,
}

/// A sequence of rows flowing through the stages
#[derive(Debug, Clone)]
pub struct Pipeline<T> {
    rows: Vec<T>,
}

impl<T> Pipeline<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Keep rows matching the predicate
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.rows.retain(|row| predicate(row));
        self
    }

    /// Group rows by key and reduce each group
    ///
    /// Groups come out in order of first appearance.
    pub fn group_by<K, A, F>(self, key: F) -> Pipeline<Group<K, A>>
    where
        K: Hash + Eq,
        A: Accumulator<T>,
        F: Fn(&T) -> K,
    {
        let mut groups: IndexMap<K, A> = IndexMap::new();
        for row in &self.rows {
            groups.entry(key(row)).or_default().accumulate(row);
        }

        Pipeline::new(
            groups
                .into_iter()
                .map(|(key, value)| Group { key, value })
                .collect(),
        )
    }

    /// Post-group filter
    pub fn having<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.filter(predicate)
    }

    pub fn map<U, F>(self, f: F) -> Pipeline<U>
    where
        F: FnMut(T) -> U,
    {
        Pipeline::new(self.rows.into_iter().map(f).collect())
    }

    /// Sort by a named field
    ///
    /// `None` (an unknown field) leaves the rows in their current order.
    /// Rows that compare equal keep their relative order.
    pub fn sort_by<K>(self, key: Option<K>, direction: SortDirection) -> Self
    where
        K: Copy,
        T: SortableBy<K>,
    {
        match key {
            Some(key) => self.sort_with(|a, b| match direction {
                SortDirection::Ascending => a.compare_by(b, key),
                SortDirection::Descending => a.compare_by(b, key).reverse(),
            }),
            None => self,
        }
    }

    /// Sort with an explicit comparator
    pub fn sort_with<F>(mut self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.rows.sort_by(compare);
        self
    }

    /// Slice out one page
    pub fn paginate(self, page: PageRequest) -> Vec<T> {
        self.rows
            .into_iter()
            .skip(page.offset())
            .take(page.page_size)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.rows
    }
}

impl<T> From<Vec<T>> for Pipeline<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

impl<T> IntoIterator for Pipeline<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
