//! Diagram export: a node/edge listing and DOT (Graphviz) rendering.
//!
//! [`Robdd::export_graph`] walks a diagram depth-first, low branch before high
//! branch, and numbers nodes in the order they are first reached. The root is
//! always node 0. Shared nodes are listed once, so the listing has exactly one
//! entry per node of the diagram and two edges per decision node.
//!
//! [`Robdd::to_dot`] renders that listing:
//! - **Terminal nodes** are boxes labelled `0` and `1`
//! - **Decision nodes** are labelled with their variable name
//! - **Edges**: dashed `0` edges lead to the low successor, solid `1` edges to the high one
//!
//! # Examples
//!
//! ```
//! use robdd_equiv::robdd::Robdd;
//!
//! let bdd = Robdd::default();
//! let f = bdd.build_str("A & B").unwrap();
//!
//! let dot = bdd.to_dot(f).unwrap();
//! assert!(dot.starts_with("digraph ROBDD {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter, Write as _};

use crate::node::Node;
use crate::reference::Ref;
use crate::robdd::Robdd;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeLabel {
    Terminal(bool),
    Variable(String),
}

impl Display for NodeLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Terminal(value) => write!(f, "{}", *value as u8),
            NodeLabel::Variable(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GraphNode {
    /// Position in first-visit order.
    pub id: usize,
    pub label: NodeLabel,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    /// `false` for the low edge, `true` for the high edge.
    pub branch: bool,
}

/// Nodes and edges of one diagram, sharing one id namespace.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Configuration options for DOT output generation.
///
/// ```
/// use robdd_equiv::dot::DotConfig;
/// use robdd_equiv::robdd::Robdd;
///
/// let bdd = Robdd::default();
/// let x = bdd.mk_var("x").unwrap();
/// let config = DotConfig {
///     node_shape: "circle",
///     ..DotConfig::default()
/// };
///
/// let dot = bdd.to_dot_with_config(x, &config).unwrap();
/// assert!(dot.contains("shape=circle"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Name of the emitted `digraph` (default: "ROBDD")
    pub graph_name: &'static str,
    /// Shape for decision nodes (default: "ellipse")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "box")
    pub terminal_shape: &'static str,
    /// Style for high edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low edges (default: "dashed")
    pub low_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            graph_name: "ROBDD",
            node_shape: "ellipse",
            terminal_shape: "box",
            high_edge_style: "solid",
            low_edge_style: "dashed",
        }
    }
}

impl Robdd {
    /// List the nodes and edges of the diagram rooted at `root`.
    ///
    /// Deterministic: the same diagram always yields the same listing.
    pub fn export_graph(&self, root: Ref) -> Graph {
        let mut graph = Graph::default();
        let mut ids = HashMap::new();
        self.export_node(root, &mut ids, &mut graph);
        graph
    }

    fn export_node(&self, node: Ref, ids: &mut HashMap<Ref, usize>, graph: &mut Graph) -> usize {
        if let Some(&id) = ids.get(&node) {
            return id;
        }

        let id = graph.nodes.len();
        ids.insert(node, id);

        match self.node(node) {
            Node::Terminal(value) => {
                graph.nodes.push(GraphNode {
                    id,
                    label: NodeLabel::Terminal(value),
                });
            }
            Node::Decision { variable, low, high } => {
                graph.nodes.push(GraphNode {
                    id,
                    label: NodeLabel::Variable(self.var_name(variable)),
                });

                let low_id = self.export_node(low, ids, graph);
                graph.edges.push(GraphEdge {
                    from: id,
                    to: low_id,
                    branch: false,
                });

                let high_id = self.export_node(high, ids, graph);
                graph.edges.push(GraphEdge {
                    from: id,
                    to: high_id,
                    branch: true,
                });
            }
        }

        id
    }

    /// Converts a diagram to DOT (Graphviz) format.
    pub fn to_dot(&self, root: Ref) -> Result<String, fmt::Error> {
        self.to_dot_with_config(root, &DotConfig::default())
    }

    /// Converts a diagram to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, root: Ref, config: &DotConfig) -> Result<String, fmt::Error> {
        let graph = self.export_graph(root);

        let mut dot = String::new();
        writeln!(dot, "digraph {} {{", config.graph_name)?;

        for node in &graph.nodes {
            let shape = match node.label {
                NodeLabel::Terminal(_) => config.terminal_shape,
                NodeLabel::Variable(_) => config.node_shape,
            };
            writeln!(dot, "node{} [label=\"{}\", shape={}];", node.id, node.label, shape)?;
        }

        for edge in &graph.edges {
            let style = if edge.branch {
                config.high_edge_style
            } else {
                config.low_edge_style
            };
            writeln!(
                dot,
                "node{} -> node{} [label=\"{}\", style={}];",
                edge.from, edge.to, edge.branch as u8, style
            )?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn edge(from: usize, to: usize, branch: bool) -> GraphEdge {
        GraphEdge { from, to, branch }
    }

    #[test]
    fn test_export_graph_first_visit_order() {
        let bdd = Robdd::default();
        let f = bdd.build_str("A & !B").unwrap();

        let graph = bdd.export_graph(f);
        let labels: Vec<String> = graph.nodes.iter().map(|n| n.label.to_string()).collect();
        // B is reached through the high edge of A, after A's low terminal.
        assert_eq!(labels, vec!["A", "0", "B", "1"]);
        assert_eq!(
            graph.edges,
            vec![edge(0, 1, false), edge(2, 3, false), edge(2, 1, true), edge(0, 2, true)]
        );
    }

    #[test]
    fn test_export_graph_terminal() {
        let bdd = Robdd::default();
        let graph = bdd.export_graph(bdd.one);
        assert_eq!(
            graph.nodes,
            vec![GraphNode {
                id: 0,
                label: NodeLabel::Terminal(true),
            }]
        );
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_export_graph_shares_nodes() {
        let bdd = Robdd::default();
        let f = bdd.build_str("(A & C) | (B & C)").unwrap();
        let graph = bdd.export_graph(f);
        assert_eq!(graph.nodes.len(), bdd.size(f));
        assert_eq!(graph.edges.len(), 2 * (graph.nodes.len() - 2));
        assert_eq!(bdd.export_graph(f), graph);
    }

    #[test]
    fn test_to_dot() {
        let bdd = Robdd::default();
        let f = bdd.build_str("A | B").unwrap();

        let dot = bdd.to_dot(f).unwrap();
        let expected = "\
digraph ROBDD {
node0 [label=\"A\", shape=ellipse];
node1 [label=\"B\", shape=ellipse];
node2 [label=\"0\", shape=box];
node3 [label=\"1\", shape=box];
node1 -> node2 [label=\"0\", style=dashed];
node1 -> node3 [label=\"1\", style=solid];
node0 -> node1 [label=\"0\", style=dashed];
node0 -> node3 [label=\"1\", style=solid];
}
";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_to_dot_with_config() {
        let bdd = Robdd::default();
        let x = bdd.mk_var("x").unwrap();

        let config = DotConfig {
            graph_name: "G",
            terminal_shape: "square",
            ..DotConfig::default()
        };

        let dot = bdd.to_dot_with_config(x, &config).unwrap();
        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("node1 [label=\"0\", shape=square];"));
        assert!(dot.ends_with("}\n"));
    }
}
