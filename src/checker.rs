//! End-to-end equivalence check of two expression strings.
//!
//! Both expressions are parsed, built into one shared [`Robdd`] and tabulated.
//! The [`Report`] carries the diagram verdict (equivalence up to renaming) and
//! the truth-table verdict (positional comparison of result columns). The two
//! usually agree; they differ when the renaming that matches the diagrams does
//! not preserve the sorted position of the variables.
//!
//! Tabulation is skipped past [`MAX_VARIABLES`]; the diagram verdict is still
//! reported, and the truth-table verdict is `None`.

use std::fmt::{self, Display, Formatter};

use log::{info, warn};

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::parser::{extract_variables, parse_with, ParseOptions};
use crate::reference::Ref;
use crate::robdd::Robdd;
use crate::truth_table::{TruthTable, MAX_VARIABLES};

/// One of the two expressions of a [`Report`].
#[derive(Debug, Clone)]
pub struct Side {
    pub text: String,
    pub expr: Expr,
    /// Sorted variables, the order used for both the diagram and the table.
    pub variables: Vec<String>,
    pub root: Ref,
    /// Nodes in the diagram, terminals included.
    pub size: usize,
    /// `None` when there are too many variables to enumerate.
    pub table: Option<TruthTable>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub lhs: Side,
    pub rhs: Side,
    pub robdd_equivalent: bool,
    /// `None` when either side was not tabulated.
    pub truth_table_equivalent: Option<bool>,
}

impl Report {
    /// Whether both methods reached the same verdict. A skipped truth table
    /// disagrees with nothing.
    pub fn verdicts_agree(&self) -> bool {
        self.truth_table_equivalent
            .map_or(true, |verdict| verdict == self.robdd_equivalent)
    }
}

#[derive(Debug, Default)]
pub struct EquivalenceChecker {
    bdd: Robdd,
    options: ParseOptions,
}

impl EquivalenceChecker {
    pub fn new(options: ParseOptions) -> Self {
        Self::with_robdd(Robdd::default(), options)
    }

    pub fn with_robdd(bdd: Robdd, options: ParseOptions) -> Self {
        Self { bdd, options }
    }

    /// The manager holding the diagrams of every checked expression.
    pub fn robdd(&self) -> &Robdd {
        &self.bdd
    }

    fn side(&self, text: &str) -> Result<Side> {
        let expr = parse_with(text, self.options)?;
        let variables = extract_variables(text);
        let root = self.bdd.build(&expr, &variables)?;
        let table = match TruthTable::from_expr(&expr, variables.clone()) {
            Ok(table) => Some(table),
            Err(Error::TooManyVariables { count, limit }) => {
                warn!(
                    "check: not tabulating {:?}: {} variables, at most {} are enumerated",
                    text, count, limit
                );
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Side {
            text: text.to_string(),
            size: self.bdd.size(root),
            expr,
            variables,
            root,
            table,
        })
    }

    /// Check `lhs` and `rhs` both ways.
    ///
    /// ```
    /// use robdd_equiv::checker::EquivalenceChecker;
    ///
    /// let checker = EquivalenceChecker::default();
    /// let report = checker.check("A & !B", "X & !Y").unwrap();
    /// assert!(report.robdd_equivalent);
    /// assert_eq!(report.truth_table_equivalent, Some(true));
    /// ```
    pub fn check(&self, lhs: &str, rhs: &str) -> Result<Report> {
        let lhs = self.side(lhs)?;
        let rhs = self.side(rhs)?;

        let robdd_equivalent = self.bdd.equivalent(lhs.root, rhs.root);
        let truth_table_equivalent = match (&lhs.table, &rhs.table) {
            (Some(t1), Some(t2)) => Some(t1.compare(t2)),
            _ => None,
        };

        info!(
            "check: {:?} ({} nodes) vs {:?} ({} nodes): robdd = {}, truth table = {:?}",
            lhs.text, lhs.size, rhs.text, rhs.size, robdd_equivalent, truth_table_equivalent
        );

        let report = Report {
            lhs,
            rhs,
            robdd_equivalent,
            truth_table_equivalent,
        };
        if !report.verdicts_agree() {
            warn!(
                "ROBDD verdict ({}) and truth-table verdict ({:?}) disagree for {:?} and {:?}",
                report.robdd_equivalent, report.truth_table_equivalent, report.lhs.text, report.rhs.text
            );
        }
        Ok(report)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "------------ Equivalence Checker Report ------------")?;
        writeln!(f)?;
        for (title, side) in [("First", &self.lhs), ("Second", &self.rhs)] {
            writeln!(f, "{} Function: {:#}", title, side.expr)?;
            match &side.table {
                Some(table) => writeln!(f, "{}", table)?,
                None => writeln!(
                    f,
                    "(truth table skipped: {} variables, at most {})\n",
                    side.variables.len(),
                    MAX_VARIABLES
                )?,
            }
        }
        if self.robdd_equivalent {
            writeln!(f, "- The ROBDDs are equivalent.")?;
        } else {
            writeln!(f, "- The ROBDDs are not equivalent.")?;
        }
        match self.truth_table_equivalent {
            Some(true) => writeln!(f, "- The expressions are equivalent formally."),
            Some(false) => writeln!(f, "- The expressions are not equivalent formally."),
            None => writeln!(f, "- The truth tables were not compared."),
        }
    }
}
