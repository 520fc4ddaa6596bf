use super::expr::Expression;

/// An ordered sequence of top-level statements -- the parser's final output.
pub type Program = Vec<Statement>;

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let NAME = VALUE;`
    Let { name: String, value: Expression },
    /// `return VALUE;`
    Return { value: Expression },
    /// A bare expression followed by an optional `;`.
    Expr(Expression),
    /// `{ STMT* }`, used for `if`/`fn` bodies.
    Block(BlockStatement),
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}
