//! Weighted items and the groups that hold them.
//!
//! Items live in a caller-owned slice. Groups never own or borrow items;
//! they hold [`ItemId`] handles into that slice, so moving an item between
//! groups is just moving an index.

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};

/// Anything that exposes a metric to balance on.
pub trait Weighted {
    fn metric(&self) -> f64;

    /// Caller-assigned identity used when reporting members.
    fn tag(&self) -> Option<usize> {
        None
    }
}

impl Weighted for f64 {
    fn metric(&self) -> f64 {
        *self
    }
}

impl<W: Weighted + ?Sized> Weighted for &W {
    fn metric(&self) -> f64 {
        (**self).metric()
    }

    fn tag(&self) -> Option<usize> {
        (**self).tag()
    }
}

/// A weighted element with an optional caller-assigned tag.
///
/// The tag is carried for traceability in reports only; the algorithm never
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    metric: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl Item {
    pub fn new(metric: f64) -> Self {
        Self {
            metric,
            index: None,
        }
    }

    pub fn with_index(metric: f64, index: usize) -> Self {
        Self {
            metric,
            index: Some(index),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl Weighted for Item {
    fn metric(&self) -> f64 {
        self.metric
    }

    fn tag(&self) -> Option<usize> {
        self.index
    }
}

/// Handle to an item: its position in the item slice given to the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl ItemId {
    pub fn get(self) -> usize {
        self.0
    }
}

/// An ordered, mutable list of item handles.
///
/// Member order carries no meaning beyond deterministic iteration. The total
/// is recomputed on every call since leveling changes membership constantly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: usize,
    members: Vec<ItemId>,
}

impl Group {
    /// Create an empty group. `id` is its creation position.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn members(&self) -> &[ItemId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member metrics, 0.0 for an empty group.
    ///
    /// Panics if a member handle is out of range for `items`; groups built by
    /// [`crate::Partition`] always index the slice they were built from.
    pub fn total<T: Weighted>(&self, items: &[T]) -> f64 {
        self.members
            .iter()
            .fold(0.0, |sum, id| sum + items[id.0].metric())
    }

    /// Add an item. No duplicate check; the caller keeps the partition intact.
    pub fn append(&mut self, item: ItemId) {
        self.members.push(item);
    }

    /// Remove the first occurrence of `item`.
    pub fn remove(&mut self, item: ItemId) -> Result<()> {
        let pos = self
            .members
            .iter()
            .position(|&m| m == item)
            .ok_or(PartitionError::MemberNotFound {
                item: item.0,
                group: self.id,
            })?;
        self.members.remove(pos);
        Ok(())
    }

    /// Replace `out` with `incoming`. Fails without mutating if `out` is absent.
    pub fn swap(&mut self, out: ItemId, incoming: ItemId) -> Result<()> {
        self.remove(out)?;
        self.append(incoming);
        Ok(())
    }
}
