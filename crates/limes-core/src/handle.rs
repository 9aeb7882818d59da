//! Expression handles.
//!
//! A handle is a 32-bit index into an [`ExprArena`](crate::ExprArena).
//! Because every node is hash-consed, two handles from the same arena are
//! equal exactly when the expressions they name are structurally equal.

use std::fmt;

/// A handle to a canonical expression stored in an arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprHandle(u32);

impl ExprHandle {
    /// Wraps a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_identity() {
        assert_eq!(ExprHandle::new(7), ExprHandle::new(7));
        assert_ne!(ExprHandle::new(7), ExprHandle::new(8));
        assert!(ExprHandle::new(1) < ExprHandle::new(2));
    }

    #[test]
    fn test_handle_is_one_word() {
        assert_eq!(std::mem::size_of::<ExprHandle>(), std::mem::size_of::<u32>());
        assert_eq!(format!("{:?}", ExprHandle::new(3)), "#3");
    }
}
