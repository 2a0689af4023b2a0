//! Page identifier type.

use std::fmt;

/// Identifies a virtual page in a reference trace.
///
/// Pages are opaque to the simulator: only identity matters, never contents.
/// `u32` comfortably covers the page ranges the trace generators produce
/// (the default experiment uses pages 1..=1500).
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page_id = PageId::new(42);
/// assert_eq!(page_id.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_new() {
        let pid = PageId::new(42);
        assert_eq!(pid.0, 42);
    }

    #[test]
    fn test_page_id_equality() {
        assert_eq!(PageId::new(5), PageId::new(5));
        assert_ne!(PageId::new(5), PageId::new(6));
    }

    #[test]
    fn test_page_id_ordering() {
        assert!(PageId::new(1) < PageId::new(2));
        assert!(PageId::new(5) > PageId::new(3));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
    }
}
