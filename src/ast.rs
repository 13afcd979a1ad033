//! Boolean expression trees.
//!
//! [`Expr`] is the structured form produced by the [parser][crate::parser].
//! Leaves are variables or, once a variable has been decided, boolean literals.
//!
//! Traversals are written once, as a [`fold`][Expr::fold] over single-layer
//! views ([`ExprF`]), and the evaluation / substitution / simplification
//! routines are all expressed in terms of it.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};

/// Binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl BinaryOp {
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            BinaryOp::Nand => !(a & b),
            BinaryOp::Nor => !(a | b),
        }
    }

    /// Infix symbol, as accepted by the parser.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Nand => "&~",
            BinaryOp::Nor => "|~",
        }
    }

    /// Function-call name, used by the alternate (`{:#}`) formatting.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::Nand => "NAND",
            BinaryOp::Nor => "NOR",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr {
    Const(bool),
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
    Nand(Box<Expr>, Box<Expr>),
    Nor(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::Xor(Box::new(lhs), Box::new(rhs))
    }

    pub fn nand(lhs: Self, rhs: Self) -> Self {
        Expr::Nand(Box::new(lhs), Box::new(rhs))
    }

    pub fn nor(lhs: Self, rhs: Self) -> Self {
        Expr::Nor(Box::new(lhs), Box::new(rhs))
    }

    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        match op {
            BinaryOp::And => Expr::and(lhs, rhs),
            BinaryOp::Or => Expr::or(lhs, rhs),
            BinaryOp::Xor => Expr::xor(lhs, rhs),
            BinaryOp::Nand => Expr::nand(lhs, rhs),
            BinaryOp::Nor => Expr::nor(lhs, rhs),
        }
    }

    /// Split a binary node into its connective and operands.
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self.layer() {
            ExprF::Binary(op, a, b) => Some((op, a, b)),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<bool> {
        match self {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_const(&self) -> bool {
        self.as_const().is_some()
    }
}

// Folding constructors: never build a connective over a literal operand.
impl Expr {
    /// Negation with constant folding and double-negation elimination.
    pub fn mk_not(value: Self) -> Self {
        match value {
            Expr::Const(b) => Expr::Const(!b),
            Expr::Not(inner) => *inner,
            _ => Expr::not(value),
        }
    }

    /// Binary connective with constant folding.
    ///
    /// All five connectives are commutative, so a literal on either side is
    /// absorbed the same way.
    pub fn mk_binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        match (lhs.as_const(), rhs.as_const()) {
            (Some(a), Some(b)) => Expr::Const(op.apply(a, b)),
            (Some(c), None) => Self::absorb(op, c, rhs),
            (None, Some(c)) => Self::absorb(op, c, lhs),
            (None, None) => Expr::binary(op, lhs, rhs),
        }
    }

    fn absorb(op: BinaryOp, c: bool, other: Self) -> Self {
        match (op, c) {
            (BinaryOp::And, true) | (BinaryOp::Or, false) | (BinaryOp::Xor, false) => other,
            (BinaryOp::And, false) | (BinaryOp::Nor, true) => Expr::Const(false),
            (BinaryOp::Or, true) | (BinaryOp::Nand, false) => Expr::Const(true),
            (BinaryOp::Xor, true) | (BinaryOp::Nand, true) | (BinaryOp::Nor, false) => Expr::mk_not(other),
        }
    }
}

/// A single layer of [`Expr`] whose children have been replaced by `R`.
#[derive(Debug)]
pub enum ExprF<'a, R> {
    Const(bool),
    Var(&'a str),
    Not(R),
    Binary(BinaryOp, R, R),
}

impl<'a, A> ExprF<'a, A> {
    #[inline(always)]
    pub fn fmap<B, F>(self, mut f: F) -> ExprF<'a, B>
    where
        F: FnMut(A) -> B,
    {
        match self {
            ExprF::Const(b) => ExprF::Const(b),
            ExprF::Var(name) => ExprF::Var(name),
            ExprF::Not(a) => ExprF::Not(f(a)),
            ExprF::Binary(op, a, b) => ExprF::Binary(op, f(a), f(b)),
        }
    }
}

impl Expr {
    /// View the top node as a single layer whose children are still expressions.
    pub fn layer(&self) -> ExprF<'_, &Expr> {
        match self {
            Expr::Const(b) => ExprF::Const(*b),
            Expr::Var(name) => ExprF::Var(name.as_str()),
            Expr::Not(a) => ExprF::Not(&**a),
            Expr::And(a, b) => ExprF::Binary(BinaryOp::And, &**a, &**b),
            Expr::Or(a, b) => ExprF::Binary(BinaryOp::Or, &**a, &**b),
            Expr::Xor(a, b) => ExprF::Binary(BinaryOp::Xor, &**a, &**b),
            Expr::Nand(a, b) => ExprF::Binary(BinaryOp::Nand, &**a, &**b),
            Expr::Nor(a, b) => ExprF::Binary(BinaryOp::Nor, &**a, &**b),
        }
    }

    /// Bottom-up fold: `collapse` sees every node once, after its children.
    pub fn fold<'a, R, F>(&'a self, collapse: &mut F) -> R
    where
        F: FnMut(ExprF<'a, R>) -> R,
    {
        let layer = self.layer().fmap(|child| child.fold(collapse));
        collapse(layer)
    }

    /// Replace every occurrence of `name` with the literal `value`, without simplifying.
    pub fn substitute(&self, name: &str, value: bool) -> Expr {
        self.fold(&mut |layer| match layer {
            ExprF::Const(b) => Expr::Const(b),
            ExprF::Var(v) if v == name => Expr::Const(value),
            ExprF::Var(v) => Expr::var(v),
            ExprF::Not(a) => Expr::not(a),
            ExprF::Binary(op, a, b) => Expr::binary(op, a, b),
        })
    }

    /// Fold all constant sub-expressions.
    pub fn simplify(&self) -> Expr {
        self.fold(&mut |layer| match layer {
            ExprF::Const(b) => Expr::Const(b),
            ExprF::Var(v) => Expr::var(v),
            ExprF::Not(a) => Expr::mk_not(a),
            ExprF::Binary(op, a, b) => Expr::mk_binary(op, a, b),
        })
    }

    /// Cofactor: substitute `name := value` and fold constants in one pass.
    pub fn restrict(&self, name: &str, value: bool) -> Expr {
        self.fold(&mut |layer| match layer {
            ExprF::Const(b) => Expr::Const(b),
            ExprF::Var(v) if v == name => Expr::Const(value),
            ExprF::Var(v) => Expr::var(v),
            ExprF::Not(a) => Expr::mk_not(a),
            ExprF::Binary(op, a, b) => Expr::mk_binary(op, a, b),
        })
    }

    /// Evaluate under an assignment.
    ///
    /// Fails with [`Error::UndefinedEvaluation`] if a variable is unbound; an
    /// unbound variable is never coerced to a default value.
    pub fn eval<F>(&self, assignment: F) -> Result<bool>
    where
        F: Fn(&str) -> Option<bool>,
    {
        let res: std::result::Result<bool, &str> = self.fold(&mut |layer: ExprF<'_, std::result::Result<bool, &str>>| match layer {
            ExprF::Const(b) => Ok(b),
            ExprF::Var(v) => assignment(v).ok_or(v),
            ExprF::Not(a) => a.map(|a| !a),
            ExprF::Binary(op, a, b) => Ok(op.apply(a?, b?)),
        });
        res.map_err(|variable| Error::UndefinedEvaluation {
            expr: self.to_string(),
            variable: variable.to_string(),
        })
    }

    /// The set of variable names occurring in the expression, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        self.fold(&mut |layer| {
            if let ExprF::Var(name) = layer {
                vars.insert(name);
            }
        });
        vars
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.fold(&mut |layer| match layer {
            ExprF::Const(_) | ExprF::Var(_) => 1,
            ExprF::Not(a) => a + 1,
            ExprF::Binary(_, a, b) => a + b + 1,
        })
    }
}

/// `{}` renders fully parenthesised infix that the parser reads back to the
/// same tree; `{:#}` renders the function-call form, e.g. `AND(A, NOT(B))`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some((op, a, b)) = self.as_binary() {
            return if f.alternate() {
                write!(f, "{}({:#}, {:#})", op.name(), a, b)
            } else {
                write!(f, "({} {} {})", a, op.symbol(), b)
            };
        }
        match self {
            Expr::Const(b) if f.alternate() => write!(f, "{}", if *b { "True" } else { "False" }),
            Expr::Const(b) => write!(f, "{}", *b as u8),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Not(a) if f.alternate() => write!(f, "NOT({:#})", a),
            // `!` never merges with a preceding `&`/`|` into NAND/NOR.
            Expr::Not(a) => write!(f, "!{}", a),
            _ => unreachable!("binary nodes are handled above"),
        }
    }
}
