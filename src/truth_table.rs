//! Brute-force truth tables, used to cross-check diagram verdicts.
//!
//! Rows enumerate `{0, 1}^n` in binary-counter order over the sorted variable
//! list: the first variable is the most significant bit, the last one varies
//! fastest.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::parser::{extract_variables, parse_with, ParseOptions};

/// Largest variable count [`TruthTable`] will enumerate.
pub const MAX_VARIABLES: usize = 24;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Row {
    /// One value per variable, in table order.
    pub values: Vec<bool>,
    pub result: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Parse `text` and tabulate it over the identifiers it mentions.
    ///
    /// ```
    /// use robdd_equiv::truth_table::TruthTable;
    ///
    /// let table = TruthTable::generate("A & !B").unwrap();
    /// let results: Vec<bool> = table.rows().iter().map(|row| row.result).collect();
    /// assert_eq!(results, [false, false, true, false]);
    /// ```
    pub fn generate(text: &str) -> Result<Self> {
        Self::generate_with(text, ParseOptions::default())
    }

    pub fn generate_with(text: &str, options: ParseOptions) -> Result<Self> {
        let expr = parse_with(text, options)?;
        Self::from_expr(&expr, extract_variables(text))
    }

    /// Tabulate `expr` over `variables`, which must cover every variable of `expr`.
    pub fn from_expr(expr: &Expr, variables: Vec<String>) -> Result<Self> {
        let n = variables.len();
        if n > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                count: n,
                limit: MAX_VARIABLES,
            });
        }

        let mut rows = Vec::with_capacity(1 << n);
        for index in 0..(1usize << n) {
            let values = row_values(n, index);
            let env: HashMap<&str, bool> = variables.iter().map(String::as_str).zip(values.iter().copied()).collect();
            let result = expr.eval(|v| env.get(v).copied())?;
            rows.push(Row { values, result });
        }

        Ok(Self { variables, rows })
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The assignment of row `index` as `(variable, value)` pairs.
    pub fn assignment(&self, index: usize) -> Vec<(&str, bool)> {
        self.variables
            .iter()
            .map(String::as_str)
            .zip(self.rows[index].values.iter().copied())
            .collect()
    }

    /// Compare the result columns position by position.
    ///
    /// Tables of different length never match. Variable names are not
    /// compared, only positions.
    pub fn compare(&self, other: &TruthTable) -> bool {
        self.len() == other.len() && self.rows.iter().zip(&other.rows).all(|(a, b)| a.result == b.result)
    }

    /// Number of rows evaluating to true.
    pub fn true_count(&self) -> usize {
        self.rows.iter().filter(|row| row.result).count()
    }
}

fn row_values(n: usize, index: usize) -> Vec<bool> {
    (0..n).map(|j| (index >> (n - 1 - j)) & 1 == 1).collect()
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | Result", self.variables.join(" "))?;
        writeln!(f, "{}", "-".repeat(self.variables.len() * 2 + 8))?;
        for row in &self.rows {
            let values: Vec<&str> = row.values.iter().map(|&v| if v { "1" } else { "0" }).collect();
            writeln!(f, "{} | {}", values.join(" "), row.result as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn results(table: &TruthTable) -> Vec<u8> {
        table.rows().iter().map(|row| row.result as u8).collect()
    }

    #[test]
    fn test_binary_counter_order() {
        let table = TruthTable::generate("A ^ (B & C)").unwrap();
        assert_eq!(table.variables(), ["A", "B", "C"]);
        assert_eq!(table.len(), 8);
        assert_eq!(table.rows()[1].values, vec![false, false, true]);
        assert_eq!(table.rows()[6].values, vec![true, true, false]);
        assert_eq!(results(&table), vec![0, 0, 0, 1, 1, 1, 1, 0]);
        assert_eq!(table.assignment(3), vec![("A", false), ("B", true), ("C", true)]);
        assert_eq!(table.true_count(), 4);
    }

    #[test]
    fn test_display() {
        let table = TruthTable::generate("A & !B").unwrap();
        let expected = "\
A B | Result
------------
0 0 | 0
0 1 | 0
1 0 | 1
1 1 | 0
";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_compare() {
        let a = TruthTable::generate("A & B").unwrap();
        let b = TruthTable::generate("!(!X | !Y)").unwrap();
        let c = TruthTable::generate("A | B").unwrap();
        let d = TruthTable::generate("A & B & C").unwrap();
        assert!(a.compare(&b));
        assert!(!a.compare(&c));
        assert!(!a.compare(&d));
    }

    #[test]
    fn test_no_variables() {
        let table = TruthTable::from_expr(&Expr::constant(true), vec![]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.to_string(), " | Result\n--------\n | 1\n");
    }

    #[test]
    fn test_unbound_variable() {
        let expr = Expr::and(Expr::var("A"), Expr::var("B"));
        let err = TruthTable::from_expr(&expr, vec!["A".to_string()]).unwrap_err();
        assert!(matches!(err, Error::UndefinedEvaluation { .. }));
    }

    #[test]
    fn test_too_many_variables() {
        let text = (0..=MAX_VARIABLES).map(|i| format!("v{}", i)).collect::<Vec<_>>().join(" | ");
        assert_eq!(
            TruthTable::generate(&text),
            Err(Error::TooManyVariables {
                count: MAX_VARIABLES + 1,
                limit: MAX_VARIABLES,
            })
        );
    }
}
