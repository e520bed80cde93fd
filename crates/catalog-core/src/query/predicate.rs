/// Storage-facing predicate tree
///
/// The compiled form of a query. Field paths are already resolved to
/// attribute descriptors, so a storage adapter can evaluate the tree by
/// matching on its variants without knowing anything about CQL syntax.
///
/// In memory `And`/`Or` are binary, mirroring the AST. On the wire a chain
/// of one connective is a single node with an `operands` list:
///
/// ```json
/// {"type": "or", "operands": [{"type": "compare", ...}, ...]}
/// ```
///
/// so JSON nesting follows the query's grouping, not its length.
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::tree::{chain, write_float, write_quoted, write_tree, BooleanTree, Shape};

/// Boolean predicate over workflow metadata
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Or {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Not {
        operand: Box<Predicate>,
    },
    Compare {
        attribute: Attribute,
        operator: Operator,
        value: Value,
    },
}

/// Fieldless mirror of the [`Predicate`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    And,
    Or,
    Not,
    Compare,
}

/// What a comparison reads from the entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attribute {
    /// A fixed column of the entity schema, e.g. `bucket.name`
    WellKnown { name: String },
    /// A generic metadata lookup keyed by the field path as written
    Generic { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Neq,
    Like,
}

/// Typed comparison operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
}

/// A borrowed comparison leaf, see [`Predicate::comparisons`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareRef<'a> {
    pub attribute: &'a Attribute,
    pub operator: Operator,
    pub value: &'a Value,
}

impl Predicate {
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Predicate) -> Self {
        Predicate::Not {
            operand: Box::new(operand),
        }
    }

    pub fn compare(attribute: Attribute, operator: Operator, value: Value) -> Self {
        Predicate::Compare {
            attribute,
            operator,
            value,
        }
    }

    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::And { .. } => PredicateKind::And,
            Predicate::Or { .. } => PredicateKind::Or,
            Predicate::Not { .. } => PredicateKind::Not,
            Predicate::Compare { .. } => PredicateKind::Compare,
        }
    }

    /// All comparison leaves, left to right
    pub fn comparisons(&self) -> Vec<CompareRef<'_>> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Predicate::And { left, right } | Predicate::Or { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
                Predicate::Not { operand } => stack.push(operand),
                Predicate::Compare {
                    attribute,
                    operator,
                    value,
                } => leaves.push(CompareRef {
                    attribute,
                    operator: *operator,
                    value,
                }),
            }
        }
        leaves
    }
}

impl Attribute {
    /// The field path this attribute was written as
    pub fn path(&self) -> &str {
        match self {
            Attribute::WellKnown { name } => name,
            Attribute::Generic { key } => key,
        }
    }

    pub fn is_well_known(&self) -> bool {
        matches!(self, Attribute::WellKnown { .. })
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireRef<'a> {
    And {
        operands: Vec<&'a Predicate>,
    },
    Or {
        operands: Vec<&'a Predicate>,
    },
    Not {
        operand: &'a Predicate,
    },
    Compare {
        attribute: &'a Attribute,
        operator: Operator,
        value: &'a Value,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Wire {
    And {
        operands: Vec<Predicate>,
    },
    Or {
        operands: Vec<Predicate>,
    },
    Not {
        operand: Box<Predicate>,
    },
    Compare {
        attribute: Attribute,
        operator: Operator,
        value: Value,
    },
}

fn operands(node: &Predicate) -> Vec<&Predicate> {
    let (first, rest) = chain(node);
    std::iter::once(first).chain(rest).collect()
}

fn fold_operands<E: de::Error>(
    operands: Vec<Predicate>,
    build: fn(Predicate, Predicate) -> Predicate,
) -> Result<Predicate, E> {
    let count = operands.len();
    match operands.into_iter().reduce(build) {
        Some(predicate) if count >= 2 => Ok(predicate),
        _ => Err(E::invalid_length(count, &"at least two operands")),
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Predicate::And { .. } => WireRef::And {
                operands: operands(self),
            },
            Predicate::Or { .. } => WireRef::Or {
                operands: operands(self),
            },
            Predicate::Not { operand } => WireRef::Not { operand },
            Predicate::Compare {
                attribute,
                operator,
                value,
            } => WireRef::Compare {
                attribute,
                operator: *operator,
                value,
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Predicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::And { operands } => fold_operands(operands, Predicate::and),
            Wire::Or { operands } => fold_operands(operands, Predicate::or),
            Wire::Not { operand } => Ok(Predicate::Not { operand }),
            Wire::Compare {
                attribute,
                operator,
                value,
            } => Ok(Predicate::Compare {
                attribute,
                operator,
                value,
            }),
        }
    }
}

// Display prints canonical CQL, the same form the AST prints. Recompiling
// it against the same schema gives back an equal predicate.

impl BooleanTree for Predicate {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Predicate::And { left, right } => Shape::And(left, right),
            Predicate::Or { left, right } => Shape::Or(left, right),
            Predicate::Not { operand } => Shape::Not(operand),
            Predicate::Compare { .. } => Shape::Leaf,
        }
    }

    fn write_leaf(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare {
                attribute,
                operator,
                value,
            } => write!(f, "{} {} {}", attribute.path(), operator, value),
            _ => write_tree(f, self),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Neq => write!(f, "!="),
            Operator::Like => write!(f, "LIKE"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write_quoted(f, s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write_float(f, *fl),
        }
    }
}
