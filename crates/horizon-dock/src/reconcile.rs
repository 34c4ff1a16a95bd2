//! Ordered list reconciliation.
//!
//! [`ListReconciler`] compares the desired entity order with the entries
//! currently on screen and produces a [`ReconcileDiff`]: removals indexed
//! into the current list, and insertions positioned in the desired list.
//!
//! Apply the diff by performing every removal first, then every insertion
//! in ascending position order. Entries that are not removed keep their
//! identity and their relative order; only removed and inserted entries
//! move. An entity that changes position is therefore expressed as one
//! removal plus one insertion.
//!
//! The walk is a greedy two-pointer merge. Favorites change by small,
//! mostly contiguous edits, so this stays linear in the common case and
//! never tears down items that did not need to change.
//!
//! # Example
//!
//! ```
//! use horizon_dock::reconcile::{Insertion, ListReconciler};
//! use horizon_dock::VisualEntry;
//!
//! struct Item(char);
//!
//! impl VisualEntry for Item {
//!     type Entity = char;
//!     fn entity(&self) -> &char {
//!         &self.0
//!     }
//! }
//!
//! let current = vec![Item('a'), Item('b'), Item('c')];
//! let diff = ListReconciler::reconcile(&['b', 'c', 'a'][..], &current).unwrap();
//!
//! assert_eq!(diff.removals.len(), 1);
//! assert_eq!(diff.insertions, vec![Insertion { entity: 'a', position: 2 }]);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use horizon_dock_core::logging::targets;
use horizon_dock_core::{dock_debug, dock_trace};

use crate::host::VisualEntry;

/// Precondition violations detected before diffing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The desired list names the same entity twice.
    #[error("entity {entity} appears more than once in the desired list (index {index})")]
    DuplicateEntity {
        /// Debug rendering of the entity.
        entity: String,
        /// Index of the second occurrence.
        index: usize,
    },
    /// Two current entries wrap the same entity.
    #[error("entity {entity} is represented by more than one entry (index {index})")]
    DuplicateEntry {
        /// Debug rendering of the entity.
        entity: String,
        /// Index of the second entry.
        index: usize,
    },
}

/// An entity to create and insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion<E> {
    /// The entity to create an entry for.
    pub entity: E,
    /// Index in the desired list, which is where the entry lands once all
    /// removals and all earlier insertions have been applied.
    pub position: usize,
}

/// A current entry to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<E> {
    /// Index of the entry in the current list, before any removal.
    pub index: usize,
    /// The entity the removed entry represents.
    pub entity: E,
}

/// The edits that turn the current list into the desired one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileDiff<E> {
    /// Entities to insert, in ascending position order.
    pub insertions: Vec<Insertion<E>>,
    /// Entries to remove, in ascending index order.
    pub removals: Vec<Removal<E>>,
}

impl<E> Default for ReconcileDiff<E> {
    fn default() -> Self {
        Self {
            insertions: Vec::new(),
            removals: Vec::new(),
        }
    }
}

impl<E> ReconcileDiff<E> {
    /// Returns `true` if the lists already match.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.removals.is_empty()
    }

    /// Total number of insertions and removals.
    pub fn edit_count(&self) -> usize {
        self.insertions.len() + self.removals.len()
    }

    /// Remove every scheduled entry from `current`.
    ///
    /// Returns the removed entries in their original order.
    ///
    /// # Panics
    ///
    /// Panics if a removal index is out of bounds, which only happens when
    /// `current` is not the list this diff was computed against.
    pub fn take_removed<V>(&self, current: &mut Vec<V>) -> Vec<V>
    where
        V: VisualEntry<Entity = E>,
        E: PartialEq,
    {
        let mut removed: Vec<V> = self
            .removals
            .iter()
            .rev()
            .map(|removal| {
                debug_assert!(
                    current
                        .get(removal.index)
                        .is_some_and(|entry| *entry.entity() == removal.entity),
                    "removal at {} does not match the diffed list",
                    removal.index
                );
                current.remove(removal.index)
            })
            .collect();
        removed.reverse();
        removed
    }

    /// Create and insert every scheduled entry into `current`.
    ///
    /// Call after [`take_removed`](Self::take_removed).
    pub fn insert_created<V, F>(&self, current: &mut Vec<V>, mut create: F)
    where
        F: FnMut(&Insertion<E>) -> V,
    {
        for insertion in &self.insertions {
            let entry = create(insertion);
            current.insert(insertion.position, entry);
        }
    }

    /// Apply the whole diff: removals first, then insertions.
    pub fn apply<V, C, D>(&self, current: &mut Vec<V>, create: C, destroy: D)
    where
        V: VisualEntry<Entity = E>,
        E: PartialEq,
        C: FnMut(&Insertion<E>) -> V,
        D: FnMut(V),
    {
        self.take_removed(current).into_iter().for_each(destroy);
        self.insert_created(current, create);
    }
}

/// Computes minimal-in-practice diffs between ordered entity lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListReconciler;

impl ListReconciler {
    /// Diff `current` against `desired`.
    ///
    /// Fails if either list names an entity twice.
    pub fn reconcile<E, V>(desired: &[E], current: &[V]) -> Result<ReconcileDiff<E>, ReconcileError>
    where
        E: Eq + Hash + Clone + fmt::Debug,
        V: VisualEntry<Entity = E>,
    {
        let desired_index = index_unique(desired.iter(), |entity, index| {
            ReconcileError::DuplicateEntity { entity, index }
        })?;
        let current_index = index_unique(current.iter().map(V::entity), |entity, index| {
            ReconcileError::DuplicateEntry { entity, index }
        })?;

        let mut diff = ReconcileDiff::default();
        let mut removed: HashSet<&E> = HashSet::new();
        let mut old_index = 0;
        let mut new_index = 0;

        while old_index < current.len() || new_index < desired.len() {
            let old = current.get(old_index).map(V::entity);
            let new = desired.get(new_index);

            // Still wanted at or after the new cursor.
            let cursor = new_index;
            let wanted_later = |entity: &E| desired_index.get(entity).is_some_and(|&i| i >= cursor);

            let insert = match (old, new) {
                (Some(o), Some(n)) if o == n => {
                    old_index += 1;
                    new_index += 1;
                    continue;
                }
                (Some(o), _) if !wanted_later(o) => false,
                (_, Some(n)) if !current_index.contains_key(n) => true,
                (Some(o), Some(n)) => {
                    // Both exist on both sides but out of order.
                    let o_is_next = desired.get(new_index + 1) == Some(o);
                    o_is_next || removed.contains(n)
                }
                // The entry for `n` was removed earlier in this pass.
                (None, Some(_)) => true,
                (Some(_), None) => false,
                (None, None) => break,
            };

            if insert {
                let entity = &desired[new_index];
                dock_trace!(targets::RECONCILE, ?entity, position = new_index, "insert");
                diff.insertions.push(Insertion {
                    entity: entity.clone(),
                    position: new_index,
                });
                new_index += 1;
            } else {
                let entity = current[old_index].entity();
                dock_trace!(targets::RECONCILE, ?entity, index = old_index, "remove");
                removed.insert(entity);
                diff.removals.push(Removal {
                    index: old_index,
                    entity: entity.clone(),
                });
                old_index += 1;
            }
        }

        dock_debug!(
            targets::RECONCILE,
            desired = desired.len(),
            current = current.len(),
            insertions = diff.insertions.len(),
            removals = diff.removals.len(),
            "reconciled"
        );
        Ok(diff)
    }
}

fn index_unique<'a, E, I, F>(entities: I, duplicate: F) -> Result<HashMap<&'a E, usize>, ReconcileError>
where
    E: Eq + Hash + fmt::Debug + 'a,
    I: Iterator<Item = &'a E>,
    F: Fn(String, usize) -> ReconcileError,
{
    let mut index = HashMap::new();
    for (i, entity) in entities.enumerate() {
        if index.insert(entity, i).is_some() {
            return Err(duplicate(format!("{entity:?}"), i));
        }
    }
    Ok(index)
}
