//! Debug utilities for inspecting diagram structure.
//!
//! This module provides helpers for exploring diagrams and checking that they
//! are ordered and reduced. These are primarily useful in tests and during
//! development.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Formatter, Write as _};

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::robdd::Robdd;
use crate::truth_table::MAX_VARIABLES;

/// Detailed information about a single diagram node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub node_ref: Ref,
    /// Variable name (None for terminals)
    pub variable: Option<String>,
    pub low: Option<Ref>,
    pub high: Option<Ref>,
    /// Terminal value (None for decision nodes)
    pub value: Option<bool>,
}

impl Display for NodeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.value, &self.variable, self.low, self.high) {
            (Some(true), ..) => write!(f, "ONE"),
            (Some(false), ..) => write!(f, "ZERO"),
            (None, Some(var), Some(low), Some(high)) => {
                write!(f, "{}(var={}, low={}, high={})", self.node_ref, var, low, high)
            }
            _ => write!(f, "{}(?)", self.node_ref),
        }
    }
}

/// All nodes of one diagram, for printing.
#[derive(Debug, Clone)]
pub struct DiagramTree {
    pub root: Ref,
    pub nodes: Vec<NodeInfo>,
}

impl Display for DiagramTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROBDD (root = {}):", self.root)?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}

/// A broken structural property.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Violation {
    /// A decision node tests a variable missing from the order.
    UnknownVariable { node: Ref, variable: String },
    /// A child tests a variable that does not come strictly after its parent's.
    Unordered { parent: Ref, child: Ref },
    /// A decision node whose successors coincide.
    RedundantTest { node: Ref },
    /// Two distinct nodes with the same `(variable, low, high)` triple.
    Duplicate { first: Ref, second: Ref },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownVariable { node, variable } => {
                write!(f, "{} tests `{}`, which is not in the order", node, variable)
            }
            Violation::Unordered { parent, child } => write!(f, "{} is not below {} in the order", child, parent),
            Violation::RedundantTest { node } => write!(f, "{} has identical successors", node),
            Violation::Duplicate { first, second } => write!(f, "{} and {} are the same node", first, second),
        }
    }
}

impl Robdd {
    /// Get detailed information about a single node.
    pub fn node_info(&self, node_ref: Ref) -> NodeInfo {
        match self.node(node_ref) {
            Node::Terminal(value) => NodeInfo {
                node_ref,
                variable: None,
                low: None,
                high: None,
                value: Some(value),
            },
            Node::Decision { variable, low, high } => NodeInfo {
                node_ref,
                variable: Some(self.var_name(variable)),
                low: Some(low),
                high: Some(high),
                value: None,
            },
        }
    }

    /// Get a tree representation of a diagram for debugging.
    ///
    /// Returns all nodes reachable from the root in depth-first order,
    /// terminals last.
    pub fn debug_tree(&self, root: Ref) -> DiagramTree {
        let mut nodes = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(node_ref) = stack.pop() {
            if !visited.insert(node_ref) {
                continue;
            }

            let info = self.node_info(node_ref);
            if let (Some(low), Some(high)) = (info.low, info.high) {
                stack.push(low);
                stack.push(high);
            }
            nodes.push(info);
        }

        nodes.sort_by_key(|n| n.value.is_some());

        DiagramTree { root, nodes }
    }

    /// Print a compact representation of a diagram.
    pub fn debug_string(&self, root: Ref) -> String {
        let tree = self.debug_tree(root);
        let mut result = format!("ROBDD {} (size={}):\n", root, tree.nodes.len());
        for node in &tree.nodes {
            // Writing to a String cannot fail.
            let _ = writeln!(result, "  {}", node);
        }
        result
    }

    /// Check that the diagram rooted at `root` is ordered by `order` and reduced.
    ///
    /// Returns every violation found; an empty list means the diagram is a
    /// proper ROBDD.
    pub fn check_invariants<S: AsRef<str>>(&self, root: Ref, order: &[S]) -> Vec<Violation> {
        let position: HashMap<&str, usize> = order.iter().enumerate().map(|(i, name)| (name.as_ref(), i)).collect();
        let rank = |node: Ref| match self.node(node) {
            Node::Terminal(_) => Some(usize::MAX),
            Node::Decision { variable, .. } => position.get(self.var_name(variable).as_str()).copied(),
        };

        let mut violations = Vec::new();
        let mut seen: HashMap<Node, Ref> = HashMap::new();

        let mut nodes: Vec<Ref> = self.descendants([root]).into_iter().collect();
        nodes.sort();

        for node in nodes {
            let Node::Decision { variable, low, high } = self.node(node) else {
                continue;
            };

            match rank(node) {
                None => violations.push(Violation::UnknownVariable {
                    node,
                    variable: self.var_name(variable),
                }),
                Some(parent_rank) => {
                    for child in [low, high] {
                        if rank(child).is_some_and(|child_rank| child_rank <= parent_rank) {
                            violations.push(Violation::Unordered { parent: node, child });
                        }
                    }
                }
            }

            if low == high {
                violations.push(Violation::RedundantTest { node });
            }

            if let Some(&first) = seen.get(&self.node(node)) {
                violations.push(Violation::Duplicate { first, second: node });
            } else {
                seen.insert(self.node(node), node);
            }
        }

        violations
    }

    /// Compare the diagram against `expr` on every assignment of `variables`.
    ///
    /// Returns the assignments where they differ, as `(values, expected, actual)`.
    /// If either side tests a variable outside `variables`, the evaluation error
    /// is returned instead of a verdict.
    pub fn verify_against(&self, root: Ref, expr: &Expr, variables: &[&str]) -> Result<Vec<(Vec<bool>, bool, bool)>> {
        let n = variables.len();
        if n > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                count: n,
                limit: MAX_VARIABLES,
            });
        }

        let mut failures = Vec::new();
        for bits in 0..(1usize << n) {
            let values: Vec<bool> = (0..n).map(|i| (bits >> i) & 1 == 1).collect();
            let env: HashMap<&str, bool> = variables.iter().copied().zip(values.iter().copied()).collect();
            let lookup = |v: &str| env.get(v).copied();

            let expected = expr.eval(lookup)?;
            let actual = self.evaluate(root, lookup)?;
            if actual != expected {
                failures.push((values, expected, actual));
            }
        }

        Ok(failures)
    }
}
