//! Diagram construction by Shannon expansion.
//!
//! ```text
//! f = (!x & f[x := 0]) | (x & f[x := 1])
//! ```
//!
//! The expression is split on the variables of the order one at a time. Each
//! cofactor is computed directly on the tree ([`Expr::restrict`]), with
//! constant folding, so a branch stops as soon as its residual expression
//! collapses to a literal. Results are memoized per `(depth, residual)` pair:
//! distinct paths that reach the same residual share one sub-diagram, and the
//! work of building it is done once.

use log::debug;

use crate::ast::Expr;
use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::parser::{extract_variables, parse_with, ParseOptions};
use crate::reference::Ref;
use crate::robdd::Robdd;
use crate::types::Var;

type BuildCache = Cache<(usize, Expr), Ref>;

impl Robdd {
    /// Build the diagram of `expr`, testing variables in the given `order`.
    ///
    /// The first variable of `order` is tested at the root. Every variable of
    /// `expr` must appear in `order`; otherwise the expansion runs out of
    /// variables with a non-constant residual, and the build fails with
    /// [`Error::UndefinedEvaluation`]. Variables of `order` that `expr` does not
    /// depend on are skipped by the reduction.
    ///
    /// ```
    /// use robdd_equiv::parser::parse;
    /// use robdd_equiv::robdd::Robdd;
    ///
    /// let bdd = Robdd::default();
    /// let f = bdd.build(&parse("A & B").unwrap(), &["A", "B"]).unwrap();
    /// let g = bdd.build(&parse("B & A").unwrap(), &["A", "B"]).unwrap();
    /// assert_eq!(f, g);
    /// ```
    pub fn build<S: AsRef<str>>(&self, expr: &Expr, order: &[S]) -> Result<Ref> {
        let names: Vec<&str> = order.iter().map(|name| name.as_ref()).collect();
        debug!("build(expr = {}, order = {:?})", expr, names);

        let order: Vec<(Var, &str)> = names.into_iter().map(|name| (self.var(name), name)).collect();

        let mut cache = BuildCache::new(self.config().cache_bits);
        let res = self.build_rec(expr.simplify(), &order, 0, &mut cache);
        debug!(
            "build: {} distinct sub-problems, {} cache hits, {} misses",
            cache.len(),
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn build_rec(&self, expr: Expr, order: &[(Var, &str)], depth: usize, cache: &mut BuildCache) -> Result<Ref> {
        if let Some(value) = expr.as_const() {
            return Ok(self.terminal(value));
        }

        let Some(&(var, name)) = order.get(depth) else {
            let variable = expr.variables().into_iter().next().map(str::to_string).unwrap_or_default();
            return Err(Error::UndefinedEvaluation {
                expr: expr.to_string(),
                variable,
            });
        };

        let key = (depth, expr);
        if let Some(&res) = cache.get(&key) {
            debug!("build: cache hit at depth {} for {}", depth, key.1);
            return Ok(res);
        }

        let high = self.build_rec(key.1.restrict(name, true), order, depth + 1, cache)?;
        let low = self.build_rec(key.1.restrict(name, false), order, depth + 1, cache)?;
        let res = self.mk_node(var, low, high)?;

        cache.insert(key, res);
        Ok(res)
    }

    /// Build the diagram of `expr` under the sorted order of its own variables.
    pub fn build_expr(&self, expr: &Expr) -> Result<Ref> {
        let order: Vec<&str> = expr.variables().into_iter().collect();
        self.build(expr, &order)
    }

    /// Parse `text` and build its diagram under the sorted order of the
    /// identifiers it mentions.
    pub fn build_str(&self, text: &str) -> Result<Ref> {
        self.build_str_with(text, ParseOptions::default())
    }

    pub fn build_str_with(&self, text: &str, options: ParseOptions) -> Result<Ref> {
        let expr = parse_with(text, options)?;
        self.build(&expr, &extract_variables(text))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::node::Node;
    use crate::parser::parse;
    use crate::robdd::RobddConfig;

    #[test]
    fn test_build_and_not() {
        let bdd = Robdd::default();
        let f = bdd.build_str("A&!B").unwrap();

        let a = bdd.lookup_var("A").unwrap();
        let b = bdd.lookup_var("B").unwrap();
        let Node::Decision { variable, low, high } = bdd.node(f) else {
            panic!("expected a decision node at the root");
        };
        assert_eq!(variable, a);
        assert_eq!(low, bdd.zero);
        assert_eq!(
            bdd.node(high),
            Node::Decision {
                variable: b,
                low: bdd.one,
                high: bdd.zero,
            }
        );
        assert_eq!(bdd.size(f), 4);
    }

    #[test]
    fn test_build_constant() {
        let bdd = Robdd::default();
        assert_eq!(bdd.build_str("A|!A").unwrap(), bdd.one);
        assert_eq!(bdd.build_str("A&!A").unwrap(), bdd.zero);
        assert_eq!(bdd.build_expr(&Expr::constant(true)).unwrap(), bdd.one);
    }

    #[test]
    fn test_redundant_variable_skipped() {
        let bdd = Robdd::default();
        let f = bdd.build_str("A | (B & !B)").unwrap();
        assert_eq!(f, bdd.mk_var("A").unwrap());
    }

    #[test]
    fn test_order_matters_for_shape() {
        let bdd = Robdd::default();
        let e = parse("(A & B) | (C & D)").unwrap();
        let good = bdd.build(&e, &["A", "B", "C", "D"]).unwrap();
        let bad = bdd.build(&e, &["A", "C", "B", "D"]).unwrap();
        assert_ne!(good, bad);
        assert!(bdd.size(good) < bdd.size(bad));
    }

    #[test]
    fn test_build_is_idempotent() {
        let bdd = Robdd::default();
        let f = bdd.build_str("(A ^ B) | C").unwrap();
        let n = bdd.num_nodes();
        let g = bdd.build_str("(A ^ B) | C").unwrap();
        assert_eq!(f, g);
        assert_eq!(bdd.num_nodes(), n);
    }

    #[test]
    fn test_shared_across_expressions() {
        let bdd = Robdd::default();
        let f = bdd.build_str("A & B").unwrap();
        let g = bdd.build_str("!(!A | !B)").unwrap();
        assert_eq!(f, g);
    }

    #[test]
    fn test_missing_variable_in_order() {
        let bdd = Robdd::default();
        let e = parse("A & B").unwrap();
        let err = bdd.build(&e, &["A"]).unwrap_err();
        assert_eq!(
            err,
            Error::UndefinedEvaluation {
                expr: "B".to_string(),
                variable: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_syntax_error_propagates() {
        let bdd = Robdd::default();
        let err = bdd.build_str("A &").unwrap_err();
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn test_table_full_propagates() {
        let bdd = Robdd::with_config(RobddConfig::default().with_max_nodes(3));
        assert_eq!(bdd.build_str("A ^ B"), Err(Error::TableFull { limit: 3 }));
    }
}
