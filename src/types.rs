//! Variable identifiers and the name interner.
//!
//! Diagrams refer to variables through the [`Var`] newtype; the owning
//! [`Robdd`][crate::robdd::Robdd] keeps a [`VarTable`] mapping ids back to the
//! names that appeared in the source expressions.

use std::collections::HashMap;
use std::fmt;

/// A variable identifier (1-indexed).
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is reserved for terminals)
/// - IDs are assigned in first-registration order and say nothing about the
///   position of the variable in a diagram's ordering
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// Interner for variable names.
#[derive(Debug, Default, Clone)]
pub struct VarTable {
    names: Vec<String>,
    ids: HashMap<String, Var>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, registering it on first use.
    pub fn intern(&mut self, name: &str) -> Var {
        if let Some(&var) = self.ids.get(name) {
            return var;
        }
        let var = Var::new(self.names.len() as u32 + 1);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), var);
        var
    }

    /// Id of `name`, if it was ever registered.
    pub fn get(&self, name: &str) -> Option<Var> {
        self.ids.get(name).copied()
    }

    /// Name of a registered variable.
    pub fn name(&self, var: Var) -> &str {
        &self.names[var.id() as usize - 1]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_creation() {
        let v1 = Var::new(1);
        let v2 = Var::new(2);
        assert_eq!(v1.id(), 1);
        assert_eq!(v2.id(), 2);
        assert!(v1 < v2);
        assert_eq!(v2.to_string(), "x2");
    }

    #[test]
    #[should_panic(expected = "Variable IDs must be >= 1")]
    fn test_var_zero_panics() {
        Var::new(0);
    }

    #[test]
    fn test_intern() {
        let mut vars = VarTable::new();
        let b = vars.intern("B");
        let a = vars.intern("A");
        assert_eq!(b, Var::new(1));
        assert_eq!(a, Var::new(2));
        assert_eq!(vars.intern("B"), b);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.name(a), "A");
        assert_eq!(vars.get("A"), Some(a));
        assert_eq!(vars.get("C"), None);
    }
}
