use crate::types::Span;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{self, SimpleFile};
use codespan_reporting::term;
use termcolor::WriteColor;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("ArithmeticError: {0}")]
    ArithmeticError(ArithmeticError),
    #[error("InternalError: {0}")]
    InternalError(InternalError),
    #[error("IOError: {0}")]
    IoError(IoError),
    #[error("NameError: {0}")]
    NameError(NameError),
    #[error("SyntaxError: {0}")]
    SyntaxError(SyntaxError),
    #[error("TypeError: {0}")]
    TypeError(TypeError),
}

impl Error {
    /// The source range the error points at.
    pub fn span(&self) -> &Span {
        match self {
            Error::ArithmeticError(e) => e.span(),
            Error::InternalError(InternalError::UnknownOperator { span, .. }) => span,
            Error::IoError(IoError::WriteError { span, .. }) => span,
            Error::NameError(NameError::UndefinedIdentifier { span, .. }) => span,
            Error::SyntaxError(e) => e.span(),
            Error::TypeError(e) => e.span(),
        }
    }
}

impl AsDiagnostic for Error {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            Error::ArithmeticError(e) => e.as_diagnostic(),
            Error::InternalError(e) => e.as_diagnostic(),
            Error::IoError(e) => e.as_diagnostic(),
            Error::NameError(e) => e.as_diagnostic(),
            Error::SyntaxError(e) => e.as_diagnostic(),
            Error::TypeError(e) => e.as_diagnostic(),
        }
    }
}

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("integer overflow in {op}")]
    Overflow { op: String, span: Span },
}

impl ArithmeticError {
    fn span(&self) -> &Span {
        match self {
            ArithmeticError::DivisionByZero { span } | ArithmeticError::Overflow { span, .. } => {
                span
            }
        }
    }
}

impl AsDiagnostic for ArithmeticError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_code("ArithmeticError")
            .with_message(self.to_string())
            .with_labels(vec![Label::primary((), self.span().clone())])
    }
}

/// Raised when the parser and the evaluator disagree about the operator set.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum InternalError {
    #[error("unknown operator {op:?}")]
    UnknownOperator { op: String, span: Span },
}

impl AsDiagnostic for InternalError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            InternalError::UnknownOperator { span, .. } => Diagnostic::bug()
                .with_code("InternalError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum IoError {
    #[error("unable to write to file: {file:?}")]
    WriteError { file: String, span: Span },
}

impl AsDiagnostic for IoError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            IoError::WriteError { span, .. } => Diagnostic::error()
                .with_code("IOError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum NameError {
    #[error("name {name:?} is not defined")]
    UndefinedIdentifier { name: String, span: Span },
}

impl AsDiagnostic for NameError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            NameError::UndefinedIdentifier { span, .. } => Diagnostic::error()
                .with_code("NameError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
        }
    }
}

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SyntaxError {
    #[error("cannot assign to expression here")]
    InvalidAssignmentTarget { span: Span },
    #[error("number {literal:?} is too large")]
    InvalidNumber { literal: String, span: Span },
    #[error("nesting exceeds the limit of {max} levels")]
    NestingTooDeep { max: usize, span: Span },
    #[error("expected {}, found {found} at position {}", one_of(.expected), .span.start)]
    UnexpectedToken { expected: Vec<String>, found: String, span: Span },
    #[error("unrecognized character {character:?}")]
    UnrecognizedCharacter { character: char, span: Span },
}

impl SyntaxError {
    fn span(&self) -> &Span {
        match self {
            SyntaxError::InvalidAssignmentTarget { span }
            | SyntaxError::InvalidNumber { span, .. }
            | SyntaxError::NestingTooDeep { span, .. }
            | SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::UnrecognizedCharacter { span, .. } => span,
        }
    }
}

impl AsDiagnostic for SyntaxError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            SyntaxError::InvalidAssignmentTarget { span }
            | SyntaxError::InvalidNumber { span, .. }
            | SyntaxError::NestingTooDeep { span, .. }
            | SyntaxError::UnrecognizedCharacter { span, .. } => Diagnostic::error()
                .with_code("SyntaxError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
            SyntaxError::UnexpectedToken { expected, found, span } => Diagnostic::error()
                .with_code("SyntaxError")
                .with_message(format!("unexpected {found}"))
                .with_labels(vec![Label::primary((), span.clone())])
                .with_notes(vec![format!("expected: {}", one_of(expected))]),
        }
    }
}

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum TypeError {
    #[error("condition must be a bool, not {type_:?}")]
    NonBoolCondition { type_: String, span: Span },
    #[error("unsupported operand type(s) for {op}: {lt_type:?} and {rt_type:?}")]
    UnsupportedOperandInfix { op: String, lt_type: String, rt_type: String, span: Span },
    #[error("unsupported operand type for {op}: {rt_type:?}")]
    UnsupportedOperandPrefix { op: String, rt_type: String, span: Span },
}

impl TypeError {
    fn span(&self) -> &Span {
        match self {
            TypeError::NonBoolCondition { span, .. }
            | TypeError::UnsupportedOperandInfix { span, .. }
            | TypeError::UnsupportedOperandPrefix { span, .. } => span,
        }
    }
}

impl AsDiagnostic for TypeError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_code("TypeError")
            .with_message(self.to_string())
            .with_labels(vec![Label::primary((), self.span().clone())])
    }
}

trait AsDiagnostic {
    fn as_diagnostic(&self) -> Diagnostic<()>;
}

fn one_of(tokens: &[String]) -> String {
    let (token_last, tokens) = match tokens.split_last() {
        Some((token_last, &[])) => return token_last.to_string(),
        Some((token_last, tokens)) => (token_last, tokens),
        None => return "nothing".to_string(),
    };

    let mut output = String::new();
    for token in tokens {
        output.push_str(token);
        output.push_str(", ");
    }
    output.push_str("or ");
    output.push_str(token_last);
    output
}

pub fn report_err(
    writer: &mut dyn WriteColor,
    name: &str,
    source: &str,
    e: &Error,
) -> Result<(), files::Error> {
    let file = SimpleFile::new(name, source);
    let config = term::Config::default();
    let diagnostic = e.as_diagnostic();
    term::emit(writer, &config, &file, &diagnostic)
}
