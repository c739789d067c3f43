//! Predicate expression AST definitions.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use prunus_core::{Collation, DataType, Value};

/// Reference to a column in a table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table name (or alias).
    pub table: String,
    /// Column name.
    pub column: String,
    /// Column index in the table schema.
    pub index: usize,
}

impl ColumnRef {
    /// Creates a new column reference.
    pub fn new(table: impl Into<String>, column: impl Into<String>, index: usize) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            index,
        }
    }
}

/// Reference to a query parameter whose value is only known at execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamRef {
    /// Parameter number (`$1` is 1).
    pub id: u32,
    /// Declared parameter type, if known.
    pub data_type: Option<DataType>,
}

impl ParamRef {
    /// Creates a new parameter reference.
    pub fn new(id: u32, data_type: Option<DataType>) -> Self {
        Self { id, data_type }
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // String/Pattern
    Like,
}

/// Boolean connectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    IsNull,
    IsNotNull,
}

/// Quantifier of an array comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    /// `x op ANY(array)`: true if any element matches.
    Any,
    /// `x op ALL(array)`: true if every element matches.
    All,
}

/// Expression AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Column reference.
    Column(ColumnRef),
    /// Literal value.
    Literal(Value),
    /// Query parameter.
    Param(ParamRef),
    /// Explicit type cast.
    Cast { expr: Box<Expr>, to: DataType },
    /// Explicit collation.
    Collate {
        expr: Box<Expr>,
        collation: Collation,
    },
    /// Binary operation.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// N-ary AND / OR.
    Logical { op: LogicalOp, args: Vec<Expr> },
    /// Unary operation.
    UnaryOp { op: UnaryOp, expr: Box<Expr> },
    /// IN expression.
    In { expr: Box<Expr>, list: Vec<Expr> },
    /// `expr op ANY|ALL(array)`.
    ArrayOp {
        expr: Box<Expr>,
        op: BinaryOp,
        quantifier: Quantifier,
        array: Box<Expr>,
    },
    /// Function call.
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Creates a column reference expression.
    pub fn column(table: impl Into<String>, column: impl Into<String>, index: usize) -> Self {
        Expr::Column(ColumnRef::new(table, column, index))
    }

    /// Creates a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Creates a parameter reference expression.
    pub fn param(id: u32, data_type: Option<DataType>) -> Self {
        Expr::Param(ParamRef::new(id, data_type))
    }

    /// Creates a cast expression.
    pub fn cast(expr: Expr, to: DataType) -> Self {
        Expr::Cast {
            expr: Box::new(expr),
            to,
        }
    }

    /// Creates a COLLATE expression.
    pub fn collate(expr: Expr, collation: Collation) -> Self {
        Expr::Collate {
            expr: Box::new(expr),
            collation,
        }
    }

    /// Creates a binary operation.
    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    pub fn eq(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Eq, right)
    }

    /// Creates a not-equal expression.
    pub fn ne(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Ne, right)
    }

    /// Creates a less-than expression.
    pub fn lt(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Lt, right)
    }

    /// Creates a less-than-or-equal expression.
    pub fn le(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Le, right)
    }

    /// Creates a greater-than expression.
    pub fn gt(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Gt, right)
    }

    /// Creates a greater-than-or-equal expression.
    pub fn ge(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Ge, right)
    }

    /// Creates a two-argument AND expression.
    pub fn and(left: Expr, right: Expr) -> Self {
        Self::and_all(alloc::vec![left, right])
    }

    /// Creates a two-argument OR expression.
    pub fn or(left: Expr, right: Expr) -> Self {
        Self::or_all(alloc::vec![left, right])
    }

    /// Creates an AND over any number of arguments.
    pub fn and_all(args: Vec<Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            args,
        }
    }

    /// Creates an OR over any number of arguments.
    pub fn or_all(args: Vec<Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            args,
        }
    }

    /// Creates a NOT expression.
    pub fn not(expr: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::Not,
            expr: Box::new(expr),
        }
    }

    /// Creates an IS NULL expression.
    pub fn is_null(expr: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::IsNull,
            expr: Box::new(expr),
        }
    }

    /// Creates an IS NOT NULL expression.
    pub fn is_not_null(expr: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::IsNotNull,
            expr: Box::new(expr),
        }
    }

    /// Creates an IN expression over literal values.
    pub fn in_list(expr: Expr, values: Vec<Value>) -> Self {
        Expr::In {
            expr: Box::new(expr),
            list: values.into_iter().map(Expr::Literal).collect(),
        }
    }

    /// Creates `expr op ANY(array)`.
    pub fn any(expr: Expr, op: BinaryOp, array: Expr) -> Self {
        Expr::ArrayOp {
            expr: Box::new(expr),
            op,
            quantifier: Quantifier::Any,
            array: Box::new(array),
        }
    }

    /// Creates `expr op ALL(array)`.
    pub fn all(expr: Expr, op: BinaryOp, array: Expr) -> Self {
        Expr::ArrayOp {
            expr: Box::new(expr),
            op,
            quantifier: Quantifier::All,
            array: Box::new(array),
        }
    }

    /// Creates a function call.
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    /// Returns the literal value if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expr::Literal(v) => Some(v),
            _ => None,
        }
    }
}
