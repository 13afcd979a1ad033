use std::collections::HashMap;

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::robdd::Robdd;

impl Robdd {
    /// Follow the diagram from `node` under `assignment` and return the terminal reached.
    ///
    /// Only the variables actually tested on the path need to be bound; an
    /// unbound one fails with [`Error::UndefinedEvaluation`], naming the node
    /// that tests it.
    pub fn evaluate<F>(&self, node: Ref, assignment: F) -> Result<bool>
    where
        F: Fn(&str) -> Option<bool>,
    {
        let mut current = node;
        loop {
            match self.node(current) {
                Node::Terminal(value) => return Ok(value),
                Node::Decision { variable, low, high } => {
                    let name = self.var_name(variable);
                    current = match assignment(&name) {
                        Some(true) => high,
                        Some(false) => low,
                        None => {
                            return Err(Error::UndefinedEvaluation {
                                expr: format!("node {}", current),
                                variable: name,
                            })
                        }
                    };
                }
            }
        }
    }

    /// Returns one satisfying assignment for the diagram, if any exists.
    ///
    /// The assignment lists the variables tested on one path to the true
    /// terminal, root first. Variables not listed are free.
    ///
    /// Returns `None` if the diagram is the constant false function.
    pub fn one_sat(&self, node: Ref) -> Option<Vec<(String, bool)>> {
        if self.is_zero(node) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = node;

        // In a reduced diagram every non-zero node reaches the true terminal.
        while let Node::Decision { variable, low, high } = self.node(current) {
            let name = self.var_name(variable);
            if !self.is_zero(high) {
                path.push((name, true));
                current = high;
            } else {
                path.push((name, false));
                current = low;
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments over `num_vars` variables.
    ///
    /// `num_vars` must cover every variable the diagram depends on.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << num_vars;
        self.sat_count_rec(node, &max, &mut cache)
    }

    fn sat_count_rec(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        let (low, high) = match self.node(node) {
            Node::Terminal(false) => return BigUint::ZERO,
            Node::Terminal(true) => return max.clone(),
            Node::Decision { low, high, .. } => (low, high),
        };

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        // Each branch fixes one variable, halving the share of the assignment space.
        let count_low = self.sat_count_rec(low, max, cache);
        let count_high = self.sat_count_rec(high, max, cache);
        let count: BigUint = (count_low + count_high) >> 1;

        cache.insert(node, count.clone());
        count
    }
}
