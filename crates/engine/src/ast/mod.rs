//! AST module for pruning predicates.

mod expr;

pub use expr::{BinaryOp, ColumnRef, Expr, LogicalOp, ParamRef, Quantifier, UnaryOp};
