//! Stack node pool - many LIFO stacks in one growable slab
//!
//! Instead of one heap allocation per node, every stack draws its nodes from
//! a single `Vec` and links them by slot handle. Popped nodes are threaded
//! onto a free list inside the same slab and recycled before the slab ever
//! grows, so a busy push/pop workload settles into zero allocator traffic.
//!
//! Design:
//! - One `Vec<Node<T>>` backs every stack in the pool
//! - Node links are 1-based [`StackHandle`]s, never pointers, so slab growth
//!   cannot invalidate them
//! - The free list reuses the nodes' own `next` fields; no side table
//! - `free_head` one past the end of the slab means "grow, don't recycle"
//!
//! ```text
//! slab:      [ n1 ][ n2 ][ n3 ][ n4 ][ n5 ]
//!                                            stack A: h5 -> h2 -> EMPTY
//!                                            stack B: h4 -> EMPTY
//!                                            free:    h3 -> h1 -> (grow)
//! ```
//!
//! Handles carry no liveness tag: a handle kept across a pop names whatever
//! the slot holds now. That is the documented contract (single owner, no
//! generation counters), and every accessor fails fast on the sentinel or an
//! out-of-range handle instead of reading undefined memory.

use crate::error::PoolError;
use crate::handle::StackHandle;
use crate::iter::{StackIter, StackIterMut};
use std::fmt;

/// Hard cap on slab slots so every slot (and the one-past-end grow signal)
/// stays addressable by a `u32` handle.
const MAX_SLOTS: usize = (u32::MAX - 1) as usize;

/// One slab slot: an element plus the handle of the node below it.
///
/// `next` is the stack link while the node is live, and the free-list link
/// while it is not. The slot itself never learns which state it is in.
struct Node<T> {
    value: T,
    next: StackHandle,
}

/// Pool of singly-linked LIFO stacks sharing one growable slab.
///
/// Callers hold [`StackHandle`]s, not references: a stack is the handle of
/// its top node, and every operation returns the updated handle. Any number
/// of independent stacks can live in one pool; nodes freed from one stack
/// are recycled into whichever stack pushes next.
///
/// ```
/// use stackpool_core::StackPool;
///
/// let mut pool = StackPool::new();
/// let stack = pool.new_stack();
/// let stack = pool.push(10, stack);
/// let stack = pool.push(20, stack);
///
/// assert_eq!(pool.iter(stack).copied().collect::<Vec<_>>(), vec![20, 10]);
///
/// let (stack, top) = pool.pop(stack);
/// assert_eq!(top, 20);
/// assert_eq!(*pool.value(stack), 10);
/// ```
pub struct StackPool<T> {
    /// The slab. A node's 1-based position in this vector is its handle.
    nodes: Vec<Node<T>>,

    /// First node of the free list, or one past the end of the slab when
    /// the free list is empty (the grow-don't-recycle signal).
    free_head: StackHandle,

    /// Number of nodes currently on the free list.
    free_len: usize,
}

impl<T> StackPool<T> {
    /// Create a pool with no storage reserved.
    pub fn new() -> Self {
        StackPool {
            nodes: Vec::new(),
            free_head: StackHandle::from_slot(0),
            free_len: 0,
        }
    }

    /// Create a pool with room for `n` nodes before the slab must grow.
    pub fn with_capacity(n: usize) -> Self {
        StackPool {
            nodes: Vec::with_capacity(n),
            free_head: StackHandle::from_slot(0),
            free_len: 0,
        }
    }

    /// Handle of a new, empty stack. Touches no storage.
    ///
    /// Every stack starts as the sentinel; the first [`push`](Self::push)
    /// gives it a node.
    #[inline]
    pub fn new_stack(&self) -> StackHandle {
        StackHandle::EMPTY
    }

    /// Push `value` on top of the stack headed by `head`.
    ///
    /// Reuses the front of the free list when it has a node (fast path, no
    /// allocator traffic); otherwise appends a fresh slot to the slab.
    /// Returns the handle that is now the stack's head. Handles of other
    /// live nodes are positional and stay valid across slab growth.
    ///
    /// Panics if the pool already holds `u32::MAX - 1` slots; see
    /// [`try_push`](Self::try_push) for the checked variant.
    pub fn push(&mut self, value: T, head: StackHandle) -> StackHandle {
        let new_head = self.free_head;
        if new_head.slot() >= self.nodes.len() {
            // Free list exhausted - claim a fresh slot and advance the grow
            // signal past it.
            assert!(self.nodes.len() < MAX_SLOTS, "push: pool slot limit reached");
            self.nodes.push(Node { value, next: head });
            self.free_head = StackHandle::from_slot(self.nodes.len());
        } else {
            // Recycle: unhook the front free node, then overwrite it.
            self.free_head = self.nodes[new_head.slot()].next;
            self.free_len -= 1;
            self.nodes[new_head.slot()] = Node { value, next: head };
        }
        new_head
    }

    /// Fallible [`push`](Self::push): surfaces slab growth failure as a
    /// [`PoolError`] instead of aborting, and the slot limit as an error
    /// instead of a panic. Recycling never fails.
    pub fn try_push(&mut self, value: T, head: StackHandle) -> Result<StackHandle, PoolError> {
        if self.free_head.slot() >= self.nodes.len() {
            if self.nodes.len() >= MAX_SLOTS {
                return Err(PoolError::SlotLimit);
            }
            self.nodes.try_reserve(1)?;
        }
        Ok(self.push(value, head))
    }

    /// Pop the top node of the stack headed by `head`.
    ///
    /// Returns the handle of the remaining stack and the value that was on
    /// top. The popped slot is reset to `T::default()` (which is what lets
    /// the stored value move out) and becomes the new front of the free
    /// list, to be handed back by the next push.
    ///
    /// `head` must be a live, non-sentinel handle: check
    /// [`StackHandle::is_empty`] first, or the call panics.
    pub fn pop(&mut self, head: StackHandle) -> (StackHandle, T)
    where
        T: Default,
    {
        assert!(!head.is_empty(), "pop: empty stack handle");
        let free_head = self.free_head;
        let node = &mut self.nodes[head.slot()];
        let rest = node.next;
        let value = std::mem::take(&mut node.value);
        node.next = free_head;
        self.free_head = head;
        self.free_len += 1;
        (rest, value)
    }

    /// Pop every node of the stack headed by `head` back onto the free list.
    ///
    /// O(stack length). Returns the sentinel, so the idiom is
    /// `stack = pool.free_stack(stack);`.
    pub fn free_stack(&mut self, head: StackHandle) -> StackHandle
    where
        T: Default,
    {
        let mut head = head;
        while !head.is_empty() {
            head = self.pop(head).0;
        }
        head
    }

    /// The value stored at `handle`.
    ///
    /// Fails fast (panic) on the sentinel or an out-of-range handle - the
    /// bounds check is the price of not handing out reads of undefined
    /// slots. [`get`](Self::get) is the non-panicking variant.
    #[inline]
    pub fn value(&self, handle: StackHandle) -> &T {
        assert!(!handle.is_empty(), "value: empty stack handle");
        &self.nodes[handle.slot()].value
    }

    /// Mutable access to the value stored at `handle`.
    ///
    /// Same contract as [`value`](Self::value).
    #[inline]
    pub fn value_mut(&mut self, handle: StackHandle) -> &mut T {
        assert!(!handle.is_empty(), "value_mut: empty stack handle");
        &mut self.nodes[handle.slot()].value
    }

    /// The value at `handle`, or `None` for the sentinel or an out-of-range
    /// handle.
    ///
    /// In-range liveness is not tracked: a handle freed by
    /// [`pop`](Self::pop) still resolves, to whatever the slot holds now.
    #[inline]
    pub fn get(&self, handle: StackHandle) -> Option<&T> {
        if handle.is_empty() {
            return None;
        }
        self.nodes.get(handle.slot()).map(|node| &node.value)
    }

    /// Mutable variant of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, handle: StackHandle) -> Option<&mut T> {
        if handle.is_empty() {
            return None;
        }
        self.nodes.get_mut(handle.slot()).map(|node| &mut node.value)
    }

    /// Handle of the node below `handle` in its stack, or the sentinel if
    /// `handle` is the stack's bottom.
    ///
    /// Same contract as [`value`](Self::value).
    #[inline]
    pub fn next(&self, handle: StackHandle) -> StackHandle {
        assert!(!handle.is_empty(), "next: empty stack handle");
        self.nodes[handle.slot()].next
    }

    /// Number of nodes in the stack headed by `head`. O(stack length).
    pub fn stack_len(&self, head: StackHandle) -> usize {
        let mut len = 0;
        let mut current = head;
        while !current.is_empty() {
            current = self.next(current);
            len += 1;
        }
        len
    }

    /// Forward iterator over the stack headed by `head`, top to bottom.
    pub fn iter(&self, head: StackHandle) -> StackIter<'_, T> {
        StackIter::new(self, head)
    }

    /// Mutable forward iterator over the stack headed by `head`, top to
    /// bottom.
    pub fn iter_mut(&mut self, head: StackHandle) -> StackIterMut<'_, T> {
        StackIterMut::new(self, head)
    }

    /// Reserve room for at least `additional` more nodes.
    ///
    /// Note this is Rust's "additional" convention, not an absolute slot
    /// count.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Fallible [`reserve`](Self::reserve): allocation failure comes back as
    /// [`PoolError::Alloc`] instead of aborting the process.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), PoolError> {
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Number of nodes the slab can hold before growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// True if the pool has never reserved any storage.
    ///
    /// This is a property of the pool, not of any stack in it; an empty
    /// *stack* is [`StackHandle::is_empty`].
    #[inline]
    pub fn is_storage_empty(&self) -> bool {
        self.nodes.capacity() == 0
    }

    /// Drop every node and reset the free list.
    ///
    /// Invalidates every handle this pool has ever issued. Capacity is
    /// retained, so the slab refills without allocator traffic.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_head = StackHandle::from_slot(0);
        self.free_len = 0;
    }

    /// Current occupancy counters. O(1).
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            live_nodes: self.nodes.len() - self.free_len,
            free_nodes: self.free_len,
            slots: self.nodes.len(),
            capacity: self.nodes.capacity(),
        }
    }
}

impl<T> Default for StackPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Occupancy only - a pool can hold millions of nodes across thousands of
// stacks, and it has no record of which handles callers still hold.
impl<T> fmt::Debug for StackPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("StackPool")
            .field("live_nodes", &stats.live_nodes)
            .field("free_nodes", &stats.free_nodes)
            .field("capacity", &stats.capacity)
            .finish()
    }
}

/// Pool occupancy counters, from [`StackPool::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Nodes currently belonging to some stack.
    pub live_nodes: usize,
    /// Nodes currently on the free list.
    pub free_nodes: usize,
    /// Total slots in the slab (live + free).
    pub slots: usize,
    /// Slots the slab can hold before growing.
    pub capacity: usize,
}
