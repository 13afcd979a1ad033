//! # robdd-equiv: Boolean expression equivalence with ROBDDs
//!
//! **`robdd-equiv`** decides whether two boolean expressions, written as infix
//! strings, denote the same function. It does so two ways:
//!
//! - by building a **Reduced Ordered Binary Decision Diagram** for each
//!   expression and comparing the diagrams up to a renaming of variables, and
//! - by tabulating both expressions over every assignment and comparing the
//!   result columns.
//!
//! ## What is an ROBDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed
//! acyclic graph of variable tests. Once the variables are tested in a fixed
//! order and the graph is *reduced* (no test with identical successors, no two
//! identical sub-graphs), every function has exactly one diagram. Equivalence
//! then becomes a structural question.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All nodes go through the [`Robdd`][crate::robdd::Robdd]
//!   manager, which owns the canonicalization table, so sub-diagrams are shared
//!   between every expression built with it.
//! - **Lightweight handles**: nodes are referenced through copyable [`Ref`][crate::reference::Ref]
//!   handles; comparing two handles compares the functions they denote.
//! - **Shannon expansion without evaluation tricks**: cofactors are computed
//!   directly on the expression tree, with constant folding and memoization.
//!
//! ## Operators
//!
//! | Operator | Syntax                 | Precedence |
//! |----------|------------------------|------------|
//! | NOT      | `~a`, `!a`             | highest    |
//! | XOR      | `a ^ b`                |            |
//! | AND/NAND | `a & b`, `a &~ b`      | lowest     |
//! | OR/NOR   | `a \| b`, `a \|~ b`    | lowest     |
//!
//! `&~` and `|~` are NAND and NOR unless disabled with
//! [`ParseOptions`][crate::parser::ParseOptions].
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd_equiv::parser::{extract_variables, parse};
//! use robdd_equiv::robdd::Robdd;
//!
//! // 1. Initialize the manager
//! let bdd = Robdd::default();
//!
//! // 2. Parse and build, testing variables in sorted order
//! let text = "(A & !B) | (!A & B)";
//! let f = bdd.build(&parse(text).unwrap(), &extract_variables(text)).unwrap();
//! let g = bdd.build_str("X ^ Y").unwrap();
//!
//! // 3. Compare up to renaming
//! assert!(bdd.equivalent(f, g));
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]**: `chumsky` lexer and precedence grammar producing [`ast::Expr`].
//! - **[`robdd`]**: the [`Robdd`][crate::robdd::Robdd] manager and node canonicalization.
//! - **[`shannon`]**: diagram construction by Shannon expansion.
//! - **[`compare`]**: equivalence up to variable renaming.
//! - **[`truth_table`]** and **[`checker`]**: brute-force cross-check and reporting.
//! - **[`dot`]**: graph export and Graphviz rendering.
//! - **[`sat`]**: evaluation, witnesses and model counting.

pub mod ast;
pub mod cache;
pub mod checker;
pub mod compare;
pub mod debug;
pub mod dot;
pub mod error;
pub mod node;
pub mod parser;
pub mod reference;
pub mod robdd;
pub mod sat;
pub mod shannon;
pub mod table;
pub mod truth_table;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use parser::{extract_variables, parse};
