//! The ROBDD manager.
//!
//! [`Robdd`] owns the canonicalization table: every diagram node is created
//! through [`Robdd::mk_node`], which enforces the two reduction rules.
//!
//! 1. A test whose `low` and `high` successors are the same node is redundant;
//!    the shared successor is returned instead.
//! 2. A `(variable, low, high)` triple that already exists is returned as is,
//!    so structurally equal sub-diagrams are one node and diagrams are DAGs.
//!
//! Because children are canonical before their parent is built, comparing two
//! [`Ref`]s from the same manager compares the functions they denote (under the
//! same variable order).
//!
//! One manager is meant to be shared by all diagrams of a run, so sub-diagrams
//! that coincide across expressions are literally the same node.
//!
//! # Example
//!
//! ```
//! use robdd_equiv::robdd::Robdd;
//!
//! let bdd = Robdd::default();
//! let a = bdd.var("A");
//! let b_node = bdd.mk_var("B").unwrap();
//!
//! // A test with identical successors is eliminated.
//! assert_eq!(bdd.mk_node(a, b_node, b_node).unwrap(), b_node);
//!
//! // Identical triples are shared.
//! let f = bdd.mk_node(a, bdd.zero, b_node).unwrap();
//! let g = bdd.mk_node(a, bdd.zero, b_node).unwrap();
//! assert_eq!(f, g);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Debug;

use log::debug;

use crate::error::Result;
use crate::node::Node;
use crate::reference::Ref;
use crate::table::Table;
use crate::types::{Var, VarTable};

/// Manager configuration.
///
/// ```
/// use robdd_equiv::robdd::{Robdd, RobddConfig};
///
/// let bdd = Robdd::with_config(RobddConfig::default().with_capacity_bits(12).with_max_nodes(1 << 16));
/// assert_eq!(bdd.num_nodes(), 2); // just the terminals
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RobddConfig {
    /// Initial node storage, `2^capacity_bits` slots. Storage grows on demand.
    pub capacity_bits: usize,
    /// Number of hash chains in the table, `2^bucket_bits`.
    pub bucket_bits: usize,
    /// Upper bound on live nodes (terminals included); `None` means unbounded.
    pub max_nodes: Option<usize>,
    /// Initial capacity of the per-build memo, `2^cache_bits` entries.
    pub cache_bits: usize,
}

impl Default for RobddConfig {
    fn default() -> Self {
        Self {
            capacity_bits: 10,
            bucket_bits: 12,
            max_nodes: None,
            cache_bits: 8,
        }
    }
}

impl RobddConfig {
    pub fn with_capacity_bits(mut self, bits: usize) -> Self {
        self.capacity_bits = bits;
        self
    }

    pub fn with_bucket_bits(mut self, bits: usize) -> Self {
        self.bucket_bits = bits;
        self
    }

    /// Bound the table. Building past the bound fails with
    /// [`Error::TableFull`][crate::error::Error::TableFull].
    ///
    /// # Panics
    ///
    /// Panics if `limit < 2`: the two terminals always occupy the table.
    pub fn with_max_nodes(mut self, limit: usize) -> Self {
        assert!(limit >= 2, "Node limit must leave room for the two terminals");
        self.max_nodes = Some(limit);
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }
}

pub struct Robdd {
    storage: RefCell<Table<Node>>,
    vars: RefCell<VarTable>,
    config: RobddConfig,
    pub zero: Ref,
    pub one: Ref,
}

impl Robdd {
    pub fn with_config(config: RobddConfig) -> Self {
        if let Some(limit) = config.max_nodes {
            assert!(limit >= 2, "Node limit must leave room for the two terminals");
        }

        let mut storage = Table::with_buckets(config.capacity_bits, config.bucket_bits, config.max_nodes);

        // Allocate the terminal nodes:
        let zero = storage.put(Node::Terminal(false)).expect("room for terminals");
        let one = storage.put(Node::Terminal(true)).expect("room for terminals");
        assert_eq!(zero, 1); // Make sure the false terminal is (1).
        assert_eq!(one, 2); // Make sure the true terminal is (2).

        Self {
            storage: RefCell::new(storage),
            vars: RefCell::new(VarTable::new()),
            config,
            zero: Ref::new(zero as u32),
            one: Ref::new(one as u32),
        }
    }

    pub fn config(&self) -> &RobddConfig {
        &self.config
    }
}

impl Default for Robdd {
    fn default() -> Self {
        Robdd::with_config(RobddConfig::default())
    }
}

impl Debug for Robdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Robdd")
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .field("real_size", &storage.real_size())
            .field("vars", &self.vars.borrow().len())
            .finish()
    }
}

// Variables
impl Robdd {
    /// Id of the variable `name`, registering it on first use.
    pub fn var(&self, name: &str) -> Var {
        self.vars.borrow_mut().intern(name)
    }

    /// Id of the variable `name`, if it was ever registered.
    pub fn lookup_var(&self, name: &str) -> Option<Var> {
        self.vars.borrow().get(name)
    }

    pub fn var_name(&self, var: Var) -> String {
        self.vars.borrow().name(var).to_string()
    }

    /// Number of registered variables.
    pub fn num_vars(&self) -> usize {
        self.vars.borrow().len()
    }
}

// Nodes
impl Robdd {
    pub fn node(&self, node: Ref) -> Node {
        self.storage.borrow()[node.index()]
    }

    pub fn terminal(&self, value: bool) -> Ref {
        if value {
            self.one
        } else {
            self.zero
        }
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        self.is_zero(node) || self.is_one(node)
    }

    /// Value of a terminal node.
    pub fn terminal_value(&self, node: Ref) -> Option<bool> {
        match self.node(node) {
            Node::Terminal(value) => Some(value),
            Node::Decision { .. } => None,
        }
    }

    pub fn variable(&self, node: Ref) -> Option<Var> {
        self.node(node).variable()
    }
    pub fn low(&self, node: Ref) -> Option<Ref> {
        match self.node(node) {
            Node::Decision { low, .. } => Some(low),
            Node::Terminal(_) => None,
        }
    }
    pub fn high(&self, node: Ref) -> Option<Ref> {
        match self.node(node) {
            Node::Decision { high, .. } => Some(high),
            Node::Terminal(_) => None,
        }
    }

    /// Find the canonical node equal to `node`, if it exists.
    pub fn lookup(&self, node: &Node) -> Option<Ref> {
        self.storage.borrow().lookup(node).map(|i| Ref::new(i as u32))
    }

    /// Register `node` as canonical. It must not be present yet.
    pub fn insert(&self, node: Node) -> Result<Ref> {
        let i = self.storage.borrow_mut().insert(node)?;
        Ok(Ref::new(i as u32))
    }

    /// Reduce a candidate node to its canonical representative.
    ///
    /// The children of a decision candidate must already be canonical.
    pub fn canonicalize(&self, candidate: Node) -> Result<Ref> {
        let (variable, low, high) = match candidate {
            Node::Terminal(value) => return Ok(self.terminal(value)),
            Node::Decision { variable, low, high } => (variable, low, high),
        };

        // Rule 1: redundant test
        if low == high {
            debug!("mk: redundant test on {} ({} == {})", variable, low, high);
            return Ok(low);
        }

        // Rule 2: shared sub-diagram
        if let Some(existing) = self.lookup(&candidate) {
            debug!("mk: reusing {} for ({}, {}, {})", existing, variable, low, high);
            return Ok(existing);
        }

        let res = self.insert(candidate)?;
        debug!("mk: new node {} = ({}, {}, {})", res, variable, low, high);
        Ok(res)
    }

    pub fn mk_node(&self, v: Var, low: Ref, high: Ref) -> Result<Ref> {
        debug!("mk(v = {}, low = {}, high = {})", v, low, high);
        debug_assert!(self.storage.borrow().is_occupied(low.index()), "Dangling low child {}", low);
        debug_assert!(self.storage.borrow().is_occupied(high.index()), "Dangling high child {}", high);
        self.canonicalize(Node::Decision { variable: v, low, high })
    }

    /// The diagram of a single variable.
    pub fn mk_var(&self, name: &str) -> Result<Ref> {
        let v = self.var(name);
        self.mk_node(v, self.zero, self.one)
    }

    /// Number of live nodes in the table, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().real_size()
    }
}

// Traversals
impl Robdd {
    /// All nodes reachable from `nodes`, the nodes themselves included.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(nodes);

        while let Some(node) = queue.pop_front() {
            if visited.insert(node) {
                if let Node::Decision { low, high, .. } = self.node(node) {
                    queue.push_back(low);
                    queue.push_back(high);
                }
            }
        }

        visited
    }

    /// Number of nodes in the diagram rooted at `f`, terminals included.
    pub fn size(&self, f: Ref) -> usize {
        let size = self.descendants([f]).len();
        debug!("size({}) = {}", f, size);
        size
    }

    /// Variables tested somewhere in the diagram rooted at `f`.
    pub fn support(&self, f: Ref) -> BTreeSet<Var> {
        self.descendants([f]).into_iter().filter_map(|node| self.variable(node)).collect()
    }

    /// Drop every node not reachable from `roots`. Surviving handles stay valid.
    ///
    /// Returns the number of dropped nodes.
    pub fn collect_garbage(&self, roots: &[Ref]) -> usize {
        debug!("Collecting garbage...");

        let alive = self.descendants(roots.iter().copied().chain([self.zero, self.one]));
        debug!("Alive nodes: {}", alive.len());

        let dropped = self
            .storage
            .borrow_mut()
            .retain(|i, _| alive.contains(&Ref::new(i as u32)));
        debug!("Dropped {} nodes", dropped);
        dropped
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        match self.node(node) {
            Node::Terminal(value) => format!("({})", value as u8),
            Node::Decision { variable, low, high } => format!(
                "{}:({}, {}, {})",
                node,
                self.var_name(variable),
                self.to_bracket_string(high),
                self.to_bracket_string(low)
            ),
        }
    }
}
