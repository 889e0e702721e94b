//! Slot arena owning every entry of a map.
//!
//! Entries refer to each other through [`NodeId`] handles instead of
//! pointers. Freed slots are recycled through a free list, so a handle is
//! only meaningful while the entry it was issued for is alive.

use std::fmt::{Debug, Formatter};

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.slots[id.0] = Some(value);
            id
        } else {
            let id = NodeId(self.slots.len());
            self.slots.push(Some(value));
            id
        }
    }

    /// Takes the value out of its slot and recycles the slot.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id);
        Some(value)
    }

    // Handles are only produced by `alloc` and dropped on `free`, so a live
    // handle always names an occupied slot.
    pub(crate) fn get(&self, id: NodeId) -> &T {
        match self.slots[id.0].as_ref() {
            Some(value) => value,
            None => panic!("dangling node handle {:?}", id),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots[id.0].as_mut() {
            Some(value) => value,
            None => panic!("dangling node handle {:?}", id),
        }
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}
