/// Abstract Syntax Tree (AST) node types for CQL queries
///
/// Every leaf is a comparison and every inner node a boolean connective.
/// Nodes own their children, so a tree never shares or aliases sub-trees.
use std::fmt;

use super::tree::{write_float, write_quoted, write_tree, BooleanTree, Shape};

/// Boolean expression over workflow metadata
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// left AND right
    And(Box<Expr>, Box<Expr>),
    /// left OR right
    Or(Box<Expr>, Box<Expr>),
    /// NOT operand
    Not(Box<Expr>),
    /// field op literal
    Comparison(Comparison),
}

impl Expr {
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn compare(field: impl Into<String>, op: ComparisonOp, literal: Literal) -> Self {
        Expr::Comparison(Comparison {
            field: field.into(),
            op,
            literal,
        })
    }
}

/// A single `field op literal` test
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Dotted field path as written, e.g. `generic_info.priority`
    pub field: String,
    pub op: ComparisonOp,
    pub literal: Literal,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,   // =
    Neq,  // !=
    Like, // LIKE
}

/// Literal values in queries
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
}

impl Literal {
    /// Convert a lexed number. `None` only for text the lexer already
    /// reported as invalid.
    pub fn from_number_text(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Literal::Float)
        } else {
            text.parse::<i64>().ok().map(Literal::Integer)
        }
    }
}

// Display renders canonical CQL: parentheses only where precedence needs
// them, `NOT` directly before its operand, double-quoted strings and floats
// always carrying a decimal point. The output parses back to an equal tree.

impl BooleanTree for Expr {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Expr::And(left, right) => Shape::And(left, right),
            Expr::Or(left, right) => Shape::Or(left, right),
            Expr::Not(operand) => Shape::Not(operand),
            Expr::Comparison(_) => Shape::Leaf,
        }
    }

    fn write_leaf(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison(comparison) => write!(f, "{}", comparison),
            _ => write_tree(f, self),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.literal)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "="),
            ComparisonOp::Neq => write!(f, "!="),
            ComparisonOp::Like => write!(f, "LIKE"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write_quoted(f, s),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(fl) => write_float(f, *fl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_only_where_needed() {
        let expr = Expr::or(
            Expr::compare("a", ComparisonOp::Eq, Literal::Integer(1)),
            Expr::and(
                Expr::compare("b", ComparisonOp::Neq, Literal::Float(2.0)),
                Expr::not(Expr::compare(
                    "c",
                    ComparisonOp::Like,
                    Literal::String("x%".to_string()),
                )),
            ),
        );

        assert_eq!(
            expr.to_string(),
            r#"a = 1 OR b != 2.0 AND NOT c LIKE "x%""#
        );
    }

    #[test]
    fn test_display_groups_lower_precedence_and_right_nesting() {
        let a = || Expr::compare("a", ComparisonOp::Eq, Literal::Integer(1));
        let b = || Expr::compare("b", ComparisonOp::Eq, Literal::Integer(2));

        assert_eq!(Expr::and(Expr::or(a(), b()), a()).to_string(), "(a = 1 OR b = 2) AND a = 1");
        assert_eq!(Expr::or(a(), Expr::or(b(), a())).to_string(), "a = 1 OR (b = 2 OR a = 1)");
        assert_eq!(Expr::or(Expr::or(a(), b()), a()).to_string(), "a = 1 OR b = 2 OR a = 1");
        assert_eq!(Expr::not(Expr::and(a(), b())).to_string(), "NOT (a = 1 AND b = 2)");
        assert_eq!(Expr::not(Expr::not(a())).to_string(), "NOT NOT a = 1");
    }

    #[test]
    fn test_string_literal_escaping() {
        let literal = Literal::String(r#"say "hi" \o/"#.to_string());
        assert_eq!(literal.to_string(), r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(Literal::Float(3.0).to_string(), "3.0");
        assert_eq!(Literal::Float(-0.5).to_string(), "-0.5");
        assert_eq!(Literal::Float(1e21).to_string(), "1000000000000000000000.0");
    }

    #[test]
    fn test_from_number_text() {
        assert_eq!(Literal::from_number_text("42"), Some(Literal::Integer(42)));
        assert_eq!(Literal::from_number_text("-1.5"), Some(Literal::Float(-1.5)));
        assert_eq!(Literal::from_number_text("99999999999999999999"), None);
    }
}
