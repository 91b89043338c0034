//! Stack handles - integer references into the pool's slab
//!
//! A `StackHandle` identifies one node slot in a [`StackPool`], and doubles
//! as the public reference to a whole stack: a stack *is* the handle of its
//! top node. Handle value 0 is the reserved sentinel meaning "no node" - it
//! is both the empty stack and the terminator below every stack's bottom
//! node. Non-zero handles map to slab slots 1-based (slot index = handle - 1),
//! so the sentinel never indexes into the slab.
//!
//! Handles are positional, not addresses: they stay valid when the slab
//! reallocates during growth. They carry no pool identity - a handle is only
//! meaningful against the pool that issued it.

use std::fmt;

/// Reference to a node slot in a [`StackPool`], or the empty-stack sentinel.
///
/// Obtained from [`StackPool::new_stack`] and [`StackPool::push`]; consumed by
/// every other pool operation. `Default` is the sentinel.
///
/// [`StackPool`]: crate::pool::StackPool
/// [`StackPool::new_stack`]: crate::pool::StackPool::new_stack
/// [`StackPool::push`]: crate::pool::StackPool::push
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StackHandle(u32);

impl StackHandle {
    /// The sentinel: an empty stack, and the `next` of every bottom node.
    pub const EMPTY: StackHandle = StackHandle(0);

    /// True if this handle is the sentinel (the stack it names has no nodes).
    ///
    /// This is a property of the handle alone; contrast
    /// [`StackPool::is_storage_empty`], which asks whether the *pool* has
    /// ever reserved storage.
    ///
    /// [`StackPool::is_storage_empty`]: crate::pool::StackPool::is_storage_empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Handle for the slot at `slot` (0-based position in the slab).
    #[inline]
    pub(crate) fn from_slot(slot: usize) -> StackHandle {
        StackHandle(slot as u32 + 1)
    }

    /// 0-based slab position of this handle.
    ///
    /// Must not be called on the sentinel; the sentinel has no slot.
    #[inline]
    pub(crate) fn slot(self) -> usize {
        debug_assert!(self.0 != 0, "slot: empty stack handle");
        (self.0 - 1) as usize
    }
}

impl fmt::Debug for StackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "StackHandle(EMPTY)")
        } else {
            write!(f, "StackHandle({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_empty() {
        assert!(StackHandle::EMPTY.is_empty());
        assert_eq!(StackHandle::default(), StackHandle::EMPTY);
    }

    #[test]
    fn test_slot_round_trip() {
        let h = StackHandle::from_slot(0);
        assert!(!h.is_empty());
        assert_eq!(h.slot(), 0);

        let h = StackHandle::from_slot(41);
        assert_eq!(h.slot(), 41);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", StackHandle::EMPTY), "StackHandle(EMPTY)");
        assert_eq!(format!("{:?}", StackHandle::from_slot(2)), "StackHandle(3)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_handle_serializes_as_bare_integer() {
        // Handles are stable positional indices, so external systems see a
        // plain integer, not a struct wrapper.
        let h = StackHandle::from_slot(2);
        assert_eq!(serde_json::to_string(&h).unwrap(), "3");

        let back: StackHandle = serde_json::from_str("3").unwrap();
        assert_eq!(back, h);

        assert_eq!(serde_json::to_string(&StackHandle::EMPTY).unwrap(), "0");
    }
}
