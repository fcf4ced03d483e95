use std::fmt::{self, Display, Formatter};

pub use sprout_common::types::{Span, Spanned};

pub use crate::lexer::Number;

pub type StmtS = Spanned<Stmt>;
pub type ExprS = Spanned<Expr>;

/// A parsed program. An empty program is valid and does nothing.
#[derive(Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<StmtS>,
}

#[remain::sorted]
#[derive(Debug, PartialEq)]
pub enum Stmt {
    Assign(StmtAssign),
    Expr(StmtExpr),
    If(Box<StmtIf>),
    Print(StmtPrint),
    While(Box<StmtWhile>),
}

#[derive(Debug, PartialEq)]
pub struct StmtAssign {
    pub name: String,
    pub value: ExprS,
}

/// An expression statement evaluates an expression and discards the result,
/// unless it is the only statement of the program.
#[derive(Debug, PartialEq)]
pub struct StmtExpr {
    pub value: ExprS,
}

#[derive(Debug, Default, PartialEq)]
pub struct StmtBlock {
    pub stmts: Vec<StmtS>,
}

#[derive(Debug, PartialEq)]
pub struct StmtIf {
    pub cond: ExprS,
    pub then: StmtBlock,
    pub else_: Option<StmtBlock>,
}

#[derive(Debug, PartialEq)]
pub struct StmtPrint {
    pub value: Option<ExprS>,
}

#[derive(Debug, PartialEq)]
pub struct StmtWhile {
    pub cond: ExprS,
    pub body: StmtBlock,
}

#[remain::sorted]
#[derive(Debug, PartialEq)]
pub enum Expr {
    Infix(Box<ExprInfix>),
    Literal(Number),
    Prefix(Box<ExprPrefix>),
    Variable(ExprVariable),
}

#[derive(Debug, PartialEq)]
pub struct ExprInfix {
    pub lt: ExprS,
    pub op: OpInfix,
    pub rt: ExprS,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpInfix {
    /// Logical OR. Both operands are evaluated unless short-circuiting is on.
    LogicOr,
    /// Logical AND. Both operands are evaluated unless short-circuiting is on.
    LogicAnd,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for OpInfix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = match self {
            OpInfix::LogicOr => "||",
            OpInfix::LogicAnd => "&&",
            OpInfix::Equal => "==",
            OpInfix::NotEqual => "!=",
            OpInfix::Greater => ">",
            OpInfix::GreaterEqual => ">=",
            OpInfix::Less => "<",
            OpInfix::LessEqual => "<=",
            OpInfix::Add => "+",
            OpInfix::Subtract => "-",
            OpInfix::Multiply => "*",
            OpInfix::Divide => "/",
        };
        write!(f, "{op}")
    }
}

#[derive(Debug, PartialEq)]
pub struct ExprPrefix {
    pub op: OpPrefix,
    pub rt: ExprS,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpPrefix {
    Negate,
    Not,
}

impl Display for OpPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = match self {
            OpPrefix::Negate => "-",
            OpPrefix::Not => "!",
        };
        write!(f, "{op}")
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ExprVariable {
    pub name: String,
}
