//! Ordered job containers.
//!
//! `JobCollection` is a doubly linked list laid out in an arena: nodes live
//! in a `Vec` and link to each other by slot index, so detaching a node by
//! handle is O(1) and freed slots are reused by later inserts.
//!
//! `JobStore` is the capability set the scheduler needs from its input
//! (insert, remove by handle, scan, size, reorder). It is implemented by
//! `JobCollection` and by a plain `Vec<Job>`, where removal shifts the tail.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::Job;
use crate::error::{Result, ScheduleError};

/// Handle to a live node of a `JobCollection`.
///
/// Handles stay valid until their node is removed or the collection is
/// reordered with `sort_by`. A handle outliving its node is rejected even
/// after the slot has been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

impl NodeId {
    /// Arena slot of the node.
    pub fn slot(self) -> usize {
        self.slot
    }
}

#[derive(Debug, Clone)]
struct Node {
    job: Job,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Arena cell. The generation is bumped every time its node is detached.
#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// An ordered sequence of jobs.
///
/// For unscheduled input the order carries no meaning. For scheduler output
/// it is the machine processing order.
///
/// # Example
/// ```
/// use jackson_schedule::models::{Job, JobCollection};
///
/// let mut jobs = JobCollection::new();
/// let first = jobs.push_back(Job::new(1, 3, 2, 1));
/// jobs.push_back(Job::new(2, 4, 1, 5));
///
/// let removed = jobs.remove(first).unwrap();
/// assert_eq!(removed.id(), 1);
/// assert_eq!(jobs.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Job>", into = "Vec<Job>")]
pub struct JobCollection {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl JobCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with room for `capacity` jobs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a job at the end and returns its handle.
    pub fn push_back(&mut self, job: Job) -> NodeId {
        let node = Node {
            job,
            prev: self.tail,
            next: None,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                let cell = &mut self.slots[slot];
                cell.node = Some(node);
                NodeId {
                    slot,
                    generation: cell.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    slot: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Detaches the node behind `handle`, closing the gap.
    pub fn remove(&mut self, handle: NodeId) -> Result<Job> {
        if self.is_empty() {
            return Err(ScheduleError::EmptyCollection);
        }
        let node = self
            .slots
            .get_mut(handle.slot)
            .filter(|cell| cell.generation == handle.generation)
            .and_then(|cell| {
                let node = cell.node.take()?;
                cell.generation = cell.generation.wrapping_add(1);
                Some(node)
            })
            .ok_or(ScheduleError::InvalidHandle(handle.slot))?;

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.node_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.node_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.free.push(handle.slot);
        self.len -= 1;
        Ok(node.job)
    }

    /// Detaches the job at position `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Job> {
        let handle = self.handle_at(index)?;
        self.remove(handle)
    }

    /// Job at position `index`.
    pub fn get(&self, index: usize) -> Result<&Job> {
        let handle = self.handle_at(index)?;
        self.node(handle)
            .map(|n| &n.job)
            .ok_or(ScheduleError::InvalidHandle(handle.slot))
    }

    /// Job behind a handle, if the node is still live.
    pub fn job(&self, handle: NodeId) -> Option<&Job> {
        self.node(handle).map(|n| &n.job)
    }

    /// Handle of the node at position `index`.
    ///
    /// Walks from whichever end is closer.
    pub fn handle_at(&self, index: usize) -> Result<NodeId> {
        if self.is_empty() {
            return Err(ScheduleError::EmptyCollection);
        }
        if index >= self.len {
            return Err(ScheduleError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let found = if index <= self.len / 2 {
            self.entries().nth(index).map(|(id, _)| id)
        } else {
            let mut cursor = self.tail;
            for _ in 0..(self.len - 1 - index) {
                cursor = cursor.and_then(|id| self.node(id)).and_then(|n| n.prev);
            }
            cursor
        };
        found.ok_or(ScheduleError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn front(&self) -> Option<&Job> {
        self.head.and_then(|h| self.job(h))
    }

    pub fn back(&self) -> Option<&Job> {
        self.tail.and_then(|t| self.job(t))
    }

    pub fn pop_front(&mut self) -> Option<Job> {
        let head = self.head?;
        self.remove(head).ok()
    }

    pub fn pop_back(&mut self) -> Option<Job> {
        let tail = self.tail?;
        self.remove(tail).ok()
    }

    /// Jobs in collection order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// `(handle, job)` pairs in collection order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            collection: self,
            cursor: self.head,
        }
    }

    /// Stable in-place reorder. Invalidates every outstanding handle.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Job, &Job) -> Ordering,
    {
        let mut jobs = Vec::with_capacity(self.len);
        while let Some(job) = self.pop_front() {
            jobs.push(job);
        }
        jobs.sort_by(compare);
        self.extend(jobs);
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.slot)
            .filter(|cell| cell.generation == id.generation)
            .and_then(|cell| cell.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.slot)
            .filter(|cell| cell.generation == id.generation)
            .and_then(|cell| cell.node.as_mut())
    }
}

impl PartialEq for JobCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for JobCollection {}

impl FromIterator<Job> for JobCollection {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<Job> for JobCollection {
    fn extend<I: IntoIterator<Item = Job>>(&mut self, iter: I) {
        for job in iter {
            self.push_back(job);
        }
    }
}

impl From<Vec<Job>> for JobCollection {
    fn from(jobs: Vec<Job>) -> Self {
        jobs.into_iter().collect()
    }
}

impl From<JobCollection> for Vec<Job> {
    fn from(collection: JobCollection) -> Self {
        collection.into_iter().collect()
    }
}

/// Borrowing iterator over a `JobCollection`.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    collection: &'a JobCollection,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Job;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.collection.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.job)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.collection.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.job)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over `(handle, job)` pairs of a `JobCollection`.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    collection: &'a JobCollection,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (NodeId, &'a Job);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.collection.node(id)?;
        self.cursor = node.next;
        Some((id, &node.job))
    }
}

/// Owning iterator over a `JobCollection`.
#[derive(Debug, Clone)]
pub struct IntoIter(JobCollection);

impl Iterator for IntoIter {
    type Item = Job;

    fn next(&mut self) -> Option<Job> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Job> {
        self.0.pop_back()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for JobCollection {
    type Item = Job;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter(self)
    }
}

impl<'a> IntoIterator for &'a JobCollection {
    type Item = &'a Job;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// The container capabilities the scheduler relies on.
///
/// A handle returned by `entries` is valid for `remove` until the store is
/// mutated.
pub trait JobStore {
    /// Reference to one stored job.
    type Handle: Copy + std::fmt::Debug;

    /// Iterator over `(handle, job)` pairs in store order.
    type Entries<'a>: Iterator<Item = (Self::Handle, &'a Job)>
    where
        Self: 'a;

    /// Appends a job.
    fn insert(&mut self, job: Job) -> Self::Handle;

    /// Detaches the job behind `handle`.
    fn remove(&mut self, handle: Self::Handle) -> Result<Job>;

    fn entries(&self) -> Self::Entries<'_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reorders the stored jobs in place.
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Job, &Job) -> Ordering;
}

impl JobStore for JobCollection {
    type Handle = NodeId;
    type Entries<'a> = Entries<'a>;

    fn insert(&mut self, job: Job) -> NodeId {
        self.push_back(job)
    }

    fn remove(&mut self, handle: NodeId) -> Result<Job> {
        JobCollection::remove(self, handle)
    }

    fn entries(&self) -> Entries<'_> {
        JobCollection::entries(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Job, &Job) -> Ordering,
    {
        JobCollection::sort_by(self, compare)
    }
}

impl JobStore for Vec<Job> {
    type Handle = usize;
    type Entries<'a> = std::iter::Enumerate<std::slice::Iter<'a, Job>>;

    fn insert(&mut self, job: Job) -> usize {
        self.push(job);
        self.len() - 1
    }

    fn remove(&mut self, handle: usize) -> Result<Job> {
        if self.is_empty() {
            return Err(ScheduleError::EmptyCollection);
        }
        if handle >= self.len() {
            return Err(ScheduleError::IndexOutOfRange {
                index: handle,
                len: self.len(),
            });
        }
        Ok(Vec::remove(self, handle))
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter().enumerate()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Job, &Job) -> Ordering,
    {
        self.as_mut_slice().sort_by(compare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(collection: &JobCollection) -> Vec<u32> {
        collection.iter().map(|j| j.id()).collect()
    }

    fn sample(n: u32) -> JobCollection {
        (1..=n).map(|i| Job::new(i, 0, 1, i as i64)).collect()
    }

    #[test]
    fn test_push_back_preserves_order() {
        let c = sample(4);
        assert_eq!(c.len(), 4);
        assert_eq!(ids(&c), vec![1, 2, 3, 4]);
        assert_eq!(c.front().unwrap().id(), 1);
        assert_eq!(c.back().unwrap().id(), 4);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut c = JobCollection::new();
        let h1 = c.push_back(Job::new(1, 0, 1, 0));
        let h2 = c.push_back(Job::new(2, 0, 1, 0));
        let h3 = c.push_back(Job::new(3, 0, 1, 0));
        let h4 = c.push_back(Job::new(4, 0, 1, 0));

        assert_eq!(c.remove(h2).unwrap().id(), 2);
        assert_eq!(ids(&c), vec![1, 3, 4]);
        assert_eq!(c.remove(h1).unwrap().id(), 1);
        assert_eq!(ids(&c), vec![3, 4]);
        assert_eq!(c.remove(h4).unwrap().id(), 4);
        assert_eq!(ids(&c), vec![3]);
        assert_eq!(c.remove(h3).unwrap().id(), 3);
        assert!(c.is_empty());
        assert!(c.front().is_none());
        assert!(c.back().is_none());
    }

    #[test]
    fn test_remove_from_empty() {
        let mut c = JobCollection::new();
        let h = c.push_back(Job::new(1, 0, 1, 0));
        c.remove(h).unwrap();
        assert_eq!(c.remove(h), Err(ScheduleError::EmptyCollection));
        assert_eq!(c.remove_at(0), Err(ScheduleError::EmptyCollection));
    }

    #[test]
    fn test_stale_handle() {
        let mut c = sample(2);
        let h = c.handle_at(0).unwrap();
        c.remove(h).unwrap();
        assert_eq!(c.remove(h), Err(ScheduleError::InvalidHandle(h.slot())));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut c = JobCollection::new();
        let h1 = c.push_back(Job::new(1, 0, 1, 0));
        c.push_back(Job::new(2, 0, 1, 0));
        c.remove(h1).unwrap();
        let h3 = c.push_back(Job::new(3, 0, 1, 0));
        assert_eq!(h3.slot(), h1.slot());

        assert_eq!(c.job(h1), None);
        assert_eq!(c.remove(h1), Err(ScheduleError::InvalidHandle(h1.slot())));
        assert_eq!(ids(&c), vec![2, 3]);
        assert_eq!(c.remove(h3).unwrap().id(), 3);
    }

    #[test]
    fn test_sort_invalidates_handles() {
        let mut c = sample(3);
        let h = c.handle_at(0).unwrap();
        c.sort_by(|a, b| b.id().cmp(&a.id()));
        assert_eq!(ids(&c), vec![3, 2, 1]);
        assert_eq!(c.job(h), None);
        assert!(c.remove(h).is_err());
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_remove_at_and_get() {
        let mut c = sample(5);
        assert_eq!(c.get(3).unwrap().id(), 4);
        assert_eq!(c.remove_at(3).unwrap().id(), 4);
        assert_eq!(c.get(3).unwrap().id(), 5);
        assert_eq!(c.remove_at(0).unwrap().id(), 1);
        assert_eq!(ids(&c), vec![2, 3, 5]);
        assert_eq!(
            c.get(3),
            Err(ScheduleError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_slots_are_reused() {
        let mut c = sample(3);
        let h = c.handle_at(1).unwrap();
        c.remove(h).unwrap();
        let reused = c.push_back(Job::new(9, 0, 1, 0));
        assert_eq!(reused.slot(), h.slot());
        assert_eq!(ids(&c), vec![1, 3, 9]);
    }

    #[test]
    fn test_iter_both_directions() {
        let c = sample(4);
        let backwards: Vec<u32> = c.iter().rev().map(|j| j.id()).collect();
        assert_eq!(backwards, vec![4, 3, 2, 1]);

        let mut it = c.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next().unwrap().id(), 1);
        assert_eq!(it.next_back().unwrap().id(), 4);
        assert_eq!(it.next().unwrap().id(), 2);
        assert_eq!(it.next_back().unwrap().id(), 3);
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }

    #[test]
    fn test_iter_is_restartable() {
        let c = sample(3);
        assert_eq!(c.iter().count(), 3);
        assert_eq!(c.iter().count(), 3);
    }

    #[test]
    fn test_sort_by_relinks() {
        let mut c = sample(4);
        c.sort_by(|a, b| b.delivery().cmp(&a.delivery()));
        assert_eq!(ids(&c), vec![4, 3, 2, 1]);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_into_iter_and_vec_conversion() {
        let c = sample(3);
        let v: Vec<Job> = c.clone().into();
        assert_eq!(v.len(), 3);
        let back = JobCollection::from(v);
        assert_eq!(back, c);
    }

    #[test]
    fn test_serde_as_array() {
        let c: JobCollection = vec![Job::new(1, 3, 2, 1)].into();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"[{"id":1,"release":3,"processing":2,"delivery":1}]"#);
        let back: JobCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_vec_store_errors() {
        let mut v: Vec<Job> = Vec::new();
        assert_eq!(JobStore::remove(&mut v, 0), Err(ScheduleError::EmptyCollection));
        JobStore::insert(&mut v, Job::new(1, 0, 1, 0));
        assert_eq!(
            JobStore::remove(&mut v, 1),
            Err(ScheduleError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(JobStore::remove(&mut v, 0).unwrap().id(), 1);
    }
}
