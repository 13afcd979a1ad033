//! Structural equivalence of diagrams up to a renaming of variables.
//!
//! Two diagrams are walked in lock step. At every pair of decision nodes the
//! variable of the left node is bound to the variable of the right node; the
//! binding must stay one-to-one for the whole walk. Terminals must agree in
//! value, and a terminal never matches a decision node.
//!
//! Because diagrams are reduced, two functions that are equal after renaming
//! variables (with orders that correspond under that renaming) have
//! isomorphic diagrams, and the walk finds the isomorphism.

use std::collections::{HashMap, HashSet};
use std::ptr;

use log::debug;

use crate::node::Node;
use crate::reference::Ref;
use crate::robdd::Robdd;
use crate::types::Var;

/// A one-to-one variable correspondence built up during a walk.
#[derive(Debug, Default)]
struct Correspondence {
    forward: HashMap<Var, Var>,
    backward: HashMap<Var, Var>,
    /// Node pairs already shown to match under the current bindings.
    matched: HashSet<(Ref, Ref)>,
}

impl Correspondence {
    /// Bind `x` to `y`, or confirm an existing binding.
    fn bind(&mut self, x: Var, y: Var) -> bool {
        match (self.forward.get(&x), self.backward.get(&y)) {
            (Some(&bound), _) if bound != y => false,
            (_, Some(&bound)) if bound != x => false,
            (Some(_), Some(_)) => true,
            _ => {
                self.forward.insert(x, y);
                self.backward.insert(y, x);
                true
            }
        }
    }

    fn walk(&mut self, lhs: &Robdd, a: Ref, rhs: &Robdd, b: Ref) -> bool {
        if self.matched.contains(&(a, b)) {
            return true;
        }

        let ok = match (lhs.node(a), rhs.node(b)) {
            (Node::Terminal(x), Node::Terminal(y)) => {
                if x != y {
                    debug!("compare: terminal {} vs terminal {}", x as u8, y as u8);
                }
                x == y
            }
            (Node::Terminal(_), Node::Decision { .. }) | (Node::Decision { .. }, Node::Terminal(_)) => {
                debug!("compare: terminal vs decision node ({} vs {})", a, b);
                false
            }
            (
                Node::Decision {
                    variable: x,
                    low: a_low,
                    high: a_high,
                },
                Node::Decision {
                    variable: y,
                    low: b_low,
                    high: b_high,
                },
            ) => {
                if !self.bind(x, y) {
                    debug!(
                        "compare: cannot map `{}` to `{}`, conflicting binding",
                        lhs.var_name(x),
                        rhs.var_name(y)
                    );
                    return false;
                }
                self.walk(lhs, a_high, rhs, b_high) && self.walk(lhs, a_low, rhs, b_low)
            }
        };

        if ok {
            self.matched.insert((a, b));
        }
        ok
    }
}

impl Robdd {
    /// Check whether the diagrams rooted at `a` and `b` (both owned by this
    /// manager) are the same up to a one-to-one renaming of variables.
    ///
    /// The renaming is checked in both directions. A walk that only kept the
    /// left-to-right map would let two left variables land on the same right
    /// variable, so `W ? X : !Y` would match `W ? Z : !Z` one way and not the
    /// other; here that pair is rejected both ways, and the answer is symmetric.
    ///
    /// ```
    /// use robdd_equiv::robdd::Robdd;
    ///
    /// let bdd = Robdd::default();
    /// let f = bdd.build_str("A & !B").unwrap();
    /// let g = bdd.build_str("X & !Y").unwrap();
    /// let h = bdd.build_str("X | !Y").unwrap();
    /// assert!(bdd.equivalent(f, g));
    /// assert!(!bdd.equivalent(f, h));
    /// ```
    pub fn equivalent(&self, a: Ref, b: Ref) -> bool {
        self.equivalent_between(a, self, b)
    }

    /// Like [`equivalent`][Robdd::equivalent], for `b` owned by `other`.
    pub fn equivalent_between(&self, a: Ref, other: &Robdd, b: Ref) -> bool {
        debug!("equivalent(a = {}, b = {})", a, b);

        // Same canonical node: the identity renaming works.
        if ptr::eq(self, other) && a == b {
            debug!("compare: {} is shared by both sides", a);
            return true;
        }

        let mut correspondence = Correspondence::default();
        let res = correspondence.walk(self, a, other, b);
        debug!(
            "compare: {} after {} matched pairs, {} bindings",
            if res { "equivalent" } else { "not equivalent" },
            correspondence.matched.len(),
            correspondence.forward.len()
        );
        res
    }
}
