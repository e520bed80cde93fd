//! Traversal and canonical printing shared by [`Expr`] and [`Predicate`]
//!
//! A left-associative chain of one connective, `Or(Or(a, b), c)`, is handled
//! as a single level with operands `[a, b, c]`. Its spine is walked with a
//! loop, so printing and serialization only recurse where the connective
//! changes, and parentheses appear only where precedence needs them.
//!
//! [`Expr`]: super::ast::Expr
//! [`Predicate`]: super::predicate::Predicate
use std::fmt;

/// One node of a boolean tree, as seen by the shared traversal
pub(crate) enum Shape<'a, T> {
    And(&'a T, &'a T),
    Or(&'a T, &'a T),
    Not(&'a T),
    Leaf,
}

pub(crate) trait BooleanTree: Sized {
    fn shape(&self) -> Shape<'_, Self>;

    fn write_leaf(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

const OR: u8 = 1;
const AND: u8 = 2;
const UNARY: u8 = 3;

fn precedence<T: BooleanTree>(node: &T) -> u8 {
    match node.shape() {
        Shape::Or(..) => OR,
        Shape::And(..) => AND,
        Shape::Not(_) | Shape::Leaf => UNARY,
    }
}

/// Split a connective chain into its first operand and the operands that
/// follow it, in source order. Any other node is its own first operand.
pub(crate) fn chain<T: BooleanTree>(node: &T) -> (&T, Vec<&T>) {
    let is_and = matches!(node.shape(), Shape::And(..));
    let mut rest = Vec::new();
    let mut current = node;

    loop {
        match current.shape() {
            Shape::And(left, right) if is_and => {
                rest.push(right);
                current = left;
            }
            Shape::Or(left, right) if !is_and => {
                rest.push(right);
                current = left;
            }
            _ => break,
        }
    }

    rest.reverse();
    (current, rest)
}

/// Write `node` as canonical CQL
pub(crate) fn write_tree<T: BooleanTree>(f: &mut fmt::Formatter<'_>, node: &T) -> fmt::Result {
    let keyword = match node.shape() {
        Shape::And(..) => "AND",
        Shape::Or(..) => "OR",
        Shape::Not(operand) => {
            f.write_str("NOT ")?;
            return write_operand(f, operand, precedence(operand) < UNARY);
        }
        Shape::Leaf => return node.write_leaf(f),
    };

    // The first operand is never the same connective, so one rule covers
    // both sides: group anything that does not bind tighter.
    let own = precedence(node);
    let (first, rest) = chain(node);
    write_operand(f, first, precedence(first) <= own)?;
    for operand in rest {
        write!(f, " {} ", keyword)?;
        write_operand(f, operand, precedence(operand) <= own)?;
    }
    Ok(())
}

fn write_operand<T: BooleanTree>(
    f: &mut fmt::Formatter<'_>,
    operand: &T,
    grouped: bool,
) -> fmt::Result {
    if grouped {
        f.write_str("(")?;
        write_tree(f, operand)?;
        f.write_str(")")
    } else {
        write_tree(f, operand)
    }
}

/// Write `s` double-quoted, escaping backslashes and double quotes
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        if ch == '\\' || ch == '"' {
            write!(f, "\\")?;
        }
        write!(f, "{}", ch)?;
    }
    write!(f, "\"")
}

/// Write a float so that it lexes back as a float, never as an integer
pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let text = value.to_string();
    if text.contains('.') {
        write!(f, "{}", text)
    } else {
        write!(f, "{}.0", text)
    }
}
