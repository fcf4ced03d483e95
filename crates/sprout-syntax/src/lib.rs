pub mod ast;
pub mod lexer;
pub mod parser;

use sprout_common::error::Result;

use crate::ast::Program;
use crate::lexer::Lexer;

pub use crate::lexer::{tokenize, Keywords};
pub use crate::parser::parse;

pub fn parse_source(source: &str) -> Result<Program> {
    parse_source_with(source, Keywords::default())
}

pub fn parse_source_with(source: &str, keywords: Keywords) -> Result<Program> {
    let tokens = Lexer::new(source).with_keywords(keywords).tokenize()?;
    parse(&tokens)
}
