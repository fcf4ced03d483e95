use logos::Logos;
use sprout_common::error::{Error, Result, SyntaxError};
use sprout_common::types::Span;

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals.
    Identifier(String),
    Number(Number),

    // Single-character tokens.
    LtParen,
    RtParen,
    LtBrace,
    RtBrace,
    Semicolon,
    Plus,
    Minus,
    Asterisk,
    Slash,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    AmpAmp,
    PipePipe,

    Keyword(Keyword),

    /// Always the last token of a stream.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            TokenKind::Identifier(name) => return write!(f, "identifier {name:?}"),
            TokenKind::Number(Number::Int(n)) => return write!(f, "number {n}"),
            TokenKind::Number(Number::Float(n)) => return write!(f, "number {n:?}"),
            TokenKind::Keyword(keyword) => return write!(f, "{:?}", keyword.as_str()),
            TokenKind::Eof => return write!(f, "end of input"),
            TokenKind::LtParen => "(",
            TokenKind::RtParen => ")",
            TokenKind::LtBrace => "{",
            TokenKind::RtBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
        };
        write!(f, "{symbol:?}")
    }
}

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Keyword {
    And,
    Do,
    Else,
    Function,
    If,
    Not,
    Or,
    Print,
    Return,
    While,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::And,
        Keyword::Do,
        Keyword::Else,
        Keyword::Function,
        Keyword::If,
        Keyword::Not,
        Keyword::Or,
        Keyword::Print,
        Keyword::Return,
        Keyword::While,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Not => "not",
            Keyword::Or => "or",
            Keyword::Print => "print",
            Keyword::Return => "return",
            Keyword::While => "while",
        }
    }
}

/// The reserved words that are tagged as keywords rather than identifiers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Keywords {
    words: Vec<Keyword>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self::all()
    }
}

impl Keywords {
    pub fn all() -> Self {
        Self { words: Keyword::ALL.to_vec() }
    }

    /// Only `print` is reserved; every other word is an ordinary identifier.
    pub fn print_only() -> Self {
        Self { words: vec![Keyword::Print] }
    }

    pub fn classify(&self, word: &str) -> Option<Keyword> {
        self.words.iter().copied().find(|keyword| keyword.as_str() == word)
    }
}

/// Lexical rules.
///
/// logos always takes the longest match, so `<=` and `&&` win over `<` and a
/// stray `&`, and `//` starts a comment rather than two slashes. Keywords are
/// not rules of their own: every word goes through `Word` and is classified
/// against the keyword set after the scan.
#[derive(Clone, Copy, Debug, Logos, PartialEq)]
enum Rule {
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("(")]
    LtParen,
    #[token(")")]
    RtParen,
    #[token("{")]
    LtBrace,
    #[token("}")]
    RtBrace,
    #[token(";")]
    Semicolon,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equal,
    #[token("!")]
    Bang,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+")]
    Number,
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"[ \r\n\t\f]+", logos::skip)]
    #[error]
    Error,
}

pub struct Lexer<'a> {
    source: &'a str,
    keywords: Keywords,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, keywords: Keywords::default() }
    }

    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn tokenize(&self) -> Result<Vec<Token>> {
        let mut scanned = Vec::new();
        let mut rules = Rule::lexer(self.source);
        while let Some(rule) = rules.next() {
            let span = rules.span();
            if rule == Rule::Error {
                let character = self.source[span.start..]
                    .chars()
                    .next()
                    .unwrap_or_else(|| unreachable!("lexer error at end of input"));
                return Err(Error::SyntaxError(SyntaxError::UnrecognizedCharacter {
                    character,
                    span: span.start..span.start + character.len_utf8(),
                }));
            }
            scanned.push((rule, span));
        }

        let mut tokens = scanned
            .into_iter()
            .map(|(rule, span)| {
                let kind = self.convert(rule, &self.source[span.clone()], &span)?;
                Ok(Token { kind, span })
            })
            .collect::<Result<Vec<_>>>()?;

        let end = self.source.len();
        tokens.push(Token { kind: TokenKind::Eof, span: end..end });
        Ok(tokens)
    }

    fn convert(&self, rule: Rule, slice: &str, span: &Span) -> Result<TokenKind> {
        let kind = match rule {
            Rule::AmpAmp => TokenKind::AmpAmp,
            Rule::PipePipe => TokenKind::PipePipe,
            Rule::EqualEqual => TokenKind::EqualEqual,
            Rule::BangEqual => TokenKind::BangEqual,
            Rule::LessEqual => TokenKind::LessEqual,
            Rule::GreaterEqual => TokenKind::GreaterEqual,
            Rule::Plus => TokenKind::Plus,
            Rule::Minus => TokenKind::Minus,
            Rule::Asterisk => TokenKind::Asterisk,
            Rule::Slash => TokenKind::Slash,
            Rule::LtParen => TokenKind::LtParen,
            Rule::RtParen => TokenKind::RtParen,
            Rule::LtBrace => TokenKind::LtBrace,
            Rule::RtBrace => TokenKind::RtBrace,
            Rule::Semicolon => TokenKind::Semicolon,
            Rule::Less => TokenKind::Less,
            Rule::Greater => TokenKind::Greater,
            Rule::Equal => TokenKind::Equal,
            Rule::Bang => TokenKind::Bang,
            Rule::Number => TokenKind::Number(lex_number(slice, span)?),
            Rule::Word => match self.keywords.classify(slice) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier(slice.to_string()),
            },
            Rule::Error => unreachable!("lexer errors are reported during the scan"),
        };
        Ok(kind)
    }
}

fn lex_number(slice: &str, span: &Span) -> Result<Number> {
    let invalid = || {
        Error::SyntaxError(SyntaxError::InvalidNumber {
            literal: slice.to_string(),
            span: span.clone(),
        })
    };
    if slice.contains('.') {
        slice.parse::<f64>().map(Number::Float).map_err(|_| invalid())
    } else {
        slice.parse::<i64>().map(Number::Int).map_err(|_| invalid())
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}
