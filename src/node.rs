use crate::reference::Ref;
use crate::types::Var;
use crate::utils::{pairing3, MyHash};

/// A diagram node: either a fixed outcome or a test on one variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Terminal(bool),
    Decision {
        variable: Var,
        /// Successor when `variable` is false.
        low: Ref,
        /// Successor when `variable` is true.
        high: Ref,
    },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    pub fn variable(&self) -> Option<Var> {
        match self {
            Node::Terminal(_) => None,
            Node::Decision { variable, .. } => Some(*variable),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Terminal(false)
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match *self {
            Node::Terminal(value) => value as u64,
            Node::Decision { variable, low, high } => {
                pairing3(variable.id() as u64, low.get() as u64, high.get() as u64)
            }
        }
    }
}
