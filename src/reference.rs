use std::fmt::{Display, Formatter};

/// Handle to a canonical node in a [`Robdd`][crate::robdd::Robdd] table.
///
/// Two handles from the same table are equal iff they denote the same
/// canonical node, so `==` is the diagram-level identity test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(u32);

impl Ref {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the table index of the reference.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<Ref> for usize {
    fn from(node: Ref) -> Self {
        node.index()
    }
}
