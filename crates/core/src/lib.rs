//! stackpool-core: many LIFO stacks, one growable slab
//!
//! This crate provides a fixed-slot memory pool that stores the nodes of any
//! number of independent singly-linked stacks in a single contiguous backing
//! store, addressed by small integer handles instead of pointers.
//!
//! Key design principles:
//! - StackHandle: a stack *is* the handle of its top node; handle 0 is the
//!   shared "no node" sentinel
//! - StackPool: one `Vec` of (value, next-handle) slots backs every stack;
//!   popped slots are threaded onto an in-slab free list and recycled before
//!   the slab grows
//! - Handles are positional, so slab growth never invalidates them - the
//!   reason this design exists at all, versus handing out raw node pointers
//!
//! Single-threaded by design: one owner, no locking, no atomics. Contract
//! violations (using the sentinel as a live handle, replaying a handle from
//! another pool) fail fast with a panic; storage exhaustion surfaces as
//! [`PoolError`].
//!
//! # Modules
//!
//! - `handle`: the `StackHandle` reference type and its sentinel
//! - `pool`: the slab, the free list, and all stack operations
//! - `iter`: forward iterators over one stack's nodes
//! - `error`: resource-exhaustion errors for fallible storage calls

pub mod error;
pub mod handle;
pub mod iter;
pub mod pool;

pub use error::PoolError;
pub use handle::StackHandle;
pub use iter::{StackIter, StackIterMut};
pub use pool::{PoolStats, StackPool};
