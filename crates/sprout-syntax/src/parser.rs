//! Recursive-descent parser.
//!
//! ```text
//! program           := statement_list EOF
//! statement_list    := [ statement { ";" statement } [";"] ]
//! statement         := "print" "(" [boolean_expr] ")"
//!                    | "if" "(" boolean_expr ")" block [ "else" ( block | if ) ]
//!                    | "while" "(" boolean_expr ")" block
//!                    | identifier "=" boolean_expr
//!                    | boolean_expr
//! block             := "{" statement_list "}"
//! boolean_expr      := comparison_expr { ("&&" | "||" | "and" | "or") comparison_expr }
//! comparison_expr   := arithmetic_expr [ ("==" | "!=" | "<" | ">" | "<=" | ">=") arithmetic_expr ]
//! arithmetic_expr   := term { ("+" | "-") term }
//! term              := factor { ("*" | "/") factor }
//! factor            := simple_expression
//! simple_expression := number | identifier | "(" boolean_expr ")"
//!                    | "-" simple_expression | ("!" | "not") simple_expression
//! ```
//!
//! Every rule takes the remaining tokens as a slice and returns the node it
//! built together with the tokens left after it. The slice always ends with
//! [`TokenKind::Eof`], and no rule consumes that token.
//!
//! Rules also take the current nesting depth. Parentheses, prefix operators,
//! infix operators, blocks and `else if` each add a level, and parsing stops
//! with [`SyntaxError::NestingTooDeep`] past [`MAX_DEPTH`]. This bounds the
//! recursion of the parser as well as that of the evaluator walking the tree.

use sprout_common::error::{Error, InternalError, Result, SyntaxError};

use crate::ast::{
    Expr, ExprInfix, ExprPrefix, ExprS, ExprVariable, OpInfix, OpPrefix, Program, Stmt,
    StmtAssign, StmtBlock, StmtExpr, StmtIf, StmtPrint, StmtS, StmtWhile,
};
use crate::lexer::{Keyword, Token, TokenKind};

type ParseResult<'t, T> = Result<(T, &'t [Token])>;

pub const MAX_DEPTH: usize = 128;

const BOOLEAN_OPS: &[TokenKind] = &[
    TokenKind::AmpAmp,
    TokenKind::PipePipe,
    TokenKind::Keyword(Keyword::And),
    TokenKind::Keyword(Keyword::Or),
];
const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::EqualEqual,
    TokenKind::BangEqual,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEqual,
    TokenKind::GreaterEqual,
];
const ARITHMETIC_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const TERM_OPS: &[TokenKind] = &[TokenKind::Asterisk, TokenKind::Slash];

const EXPECTED_EXPRESSION: &str = "expression";

pub fn parse(tokens: &[Token]) -> Result<Program> {
    match tokens.last() {
        Some(Token { kind: TokenKind::Eof, .. }) => {}
        last => {
            let end = last.map_or(0, |token| token.span.end);
            return Err(Error::SyntaxError(SyntaxError::UnexpectedToken {
                expected: vec![TokenKind::Eof.to_string()],
                found: "unterminated token stream".to_string(),
                span: end..end,
            }));
        }
    }

    let (stmts, tokens) = parse_statement_list(tokens, &TokenKind::Eof, 0)?;
    let token = peek(tokens);
    if token.kind != TokenKind::Eof {
        return Err(unexpected(token, &[&TokenKind::Semicolon, &TokenKind::Eof]));
    }
    Ok(Program { stmts })
}

fn parse_statement_list<'t>(
    tokens: &'t [Token],
    end: &TokenKind,
    depth: usize,
) -> ParseResult<'t, Vec<StmtS>> {
    let mut stmts = Vec::new();
    if peek(tokens).kind == *end {
        return Ok((stmts, tokens));
    }

    let (stmt, mut tokens) = parse_statement(tokens, depth)?;
    stmts.push(stmt);
    while peek(tokens).kind == TokenKind::Semicolon {
        tokens = &tokens[1..];
        if peek(tokens).kind == *end {
            break;
        }
        let (stmt, rest) = parse_statement(tokens, depth)?;
        stmts.push(stmt);
        tokens = rest;
    }
    Ok((stmts, tokens))
}

fn parse_statement(tokens: &[Token], depth: usize) -> ParseResult<StmtS> {
    match peek(tokens).kind {
        TokenKind::Keyword(Keyword::Print) => parse_print(tokens, depth),
        TokenKind::Keyword(Keyword::If) => parse_if(tokens, depth),
        TokenKind::Keyword(Keyword::While) => parse_while(tokens, depth),
        _ => parse_assignment(tokens, depth),
    }
}

fn parse_print(tokens: &[Token], depth: usize) -> ParseResult<StmtS> {
    let start = peek(tokens).span.start;
    let (_, tokens) = expect(&tokens[1..], &TokenKind::LtParen)?;
    let (value, tokens) = if peek(tokens).kind == TokenKind::RtParen {
        (None, tokens)
    } else {
        let (value, tokens) = parse_boolean_expr(tokens, depth)?;
        (Some(value), tokens)
    };
    let (close, tokens) = expect(tokens, &TokenKind::RtParen)?;
    Ok(((Stmt::Print(StmtPrint { value }), start..close.span.end), tokens))
}

fn parse_if(tokens: &[Token], depth: usize) -> ParseResult<StmtS> {
    let start = peek(tokens).span.start;
    let (cond, tokens) = parse_condition(&tokens[1..], depth)?;
    let (then, mut end, tokens) = parse_block(tokens, depth)?;

    let (else_, tokens) = if peek(tokens).kind == TokenKind::Keyword(Keyword::Else) {
        let tokens = &tokens[1..];
        let token = peek(tokens);
        if token.kind == TokenKind::Keyword(Keyword::If) {
            let (stmt, tokens) = parse_if(tokens, descend(token, depth)?)?;
            end = stmt.1.end;
            (Some(StmtBlock { stmts: vec![stmt] }), tokens)
        } else {
            let (block, block_end, tokens) = parse_block(tokens, depth)?;
            end = block_end;
            (Some(block), tokens)
        }
    } else {
        (None, tokens)
    };

    let stmt = Stmt::If(Box::new(StmtIf { cond, then, else_ }));
    Ok(((stmt, start..end), tokens))
}

fn parse_while(tokens: &[Token], depth: usize) -> ParseResult<StmtS> {
    let start = peek(tokens).span.start;
    let (cond, tokens) = parse_condition(&tokens[1..], depth)?;
    let (body, end, tokens) = parse_block(tokens, depth)?;
    let stmt = Stmt::While(Box::new(StmtWhile { cond, body }));
    Ok(((stmt, start..end), tokens))
}

fn parse_condition(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    let (_, tokens) = expect(tokens, &TokenKind::LtParen)?;
    let (cond, tokens) = parse_boolean_expr(tokens, depth)?;
    let (_, tokens) = expect(tokens, &TokenKind::RtParen)?;
    Ok((cond, tokens))
}

/// Returns the block along with the offset just past its closing brace.
fn parse_block(tokens: &[Token], depth: usize) -> Result<(StmtBlock, usize, &[Token])> {
    let (open, tokens) = expect(tokens, &TokenKind::LtBrace)?;
    let depth = descend(open, depth)?;
    let (stmts, tokens) = parse_statement_list(tokens, &TokenKind::RtBrace, depth)?;
    let token = peek(tokens);
    if token.kind != TokenKind::RtBrace {
        return Err(unexpected(token, &[&TokenKind::Semicolon, &TokenKind::RtBrace]));
    }
    Ok((StmtBlock { stmts }, token.span.end, &tokens[1..]))
}

fn parse_assignment(tokens: &[Token], depth: usize) -> ParseResult<StmtS> {
    let token = peek(tokens);
    if let TokenKind::Identifier(name) = &token.kind {
        // An identifier is never the last token, so the lookahead is in bounds.
        if tokens[1].kind == TokenKind::Equal {
            let (value, rest) = parse_boolean_expr(&tokens[2..], depth)?;
            let span = token.span.start..value.1.end;
            let stmt = Stmt::Assign(StmtAssign { name: name.clone(), value });
            return Ok(((stmt, span), rest));
        }
    }

    let (value, tokens) = parse_boolean_expr(tokens, depth)?;
    if peek(tokens).kind == TokenKind::Equal {
        return Err(Error::SyntaxError(SyntaxError::InvalidAssignmentTarget { span: value.1 }));
    }
    let span = value.1.clone();
    Ok(((Stmt::Expr(StmtExpr { value }), span), tokens))
}

fn parse_boolean_expr(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    parse_infix_left(tokens, depth, BOOLEAN_OPS, parse_comparison_expr)
}

/// Comparisons do not chain: at most one operator per level.
fn parse_comparison_expr(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    let (lt, tokens) = parse_arithmetic_expr(tokens, depth)?;
    let token = peek(tokens);
    if !COMPARISON_OPS.contains(&token.kind) {
        return Ok((lt, tokens));
    }
    let op = infix_op(token)?;
    let (rt, tokens) = parse_arithmetic_expr(&tokens[1..], descend(token, depth)?)?;
    Ok((infix(lt, op, rt), tokens))
}

fn parse_arithmetic_expr(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    parse_infix_left(tokens, depth, ARITHMETIC_OPS, parse_term)
}

fn parse_term(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    parse_infix_left(tokens, depth, TERM_OPS, parse_factor)
}

fn parse_factor(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    parse_simple_expr(tokens, depth)
}

fn parse_simple_expr(tokens: &[Token], depth: usize) -> ParseResult<ExprS> {
    let token = peek(tokens);
    let rest = &tokens[1..];
    match &token.kind {
        TokenKind::Number(number) => Ok(((Expr::Literal(*number), token.span.clone()), rest)),
        TokenKind::Identifier(name) => {
            let expr = Expr::Variable(ExprVariable { name: name.clone() });
            Ok(((expr, token.span.clone()), rest))
        }
        TokenKind::LtParen => {
            let ((expr, _), rest) = parse_boolean_expr(rest, descend(token, depth)?)?;
            let (close, rest) = expect(rest, &TokenKind::RtParen)?;
            Ok(((expr, token.span.start..close.span.end), rest))
        }
        TokenKind::Minus => parse_prefix(token, OpPrefix::Negate, rest, depth),
        TokenKind::Bang | TokenKind::Keyword(Keyword::Not) => {
            parse_prefix(token, OpPrefix::Not, rest, depth)
        }
        _ => Err(Error::SyntaxError(SyntaxError::UnexpectedToken {
            expected: vec![EXPECTED_EXPRESSION.to_string()],
            found: token.kind.to_string(),
            span: token.span.clone(),
        })),
    }
}

fn parse_prefix<'t>(
    token: &Token,
    op: OpPrefix,
    tokens: &'t [Token],
    depth: usize,
) -> ParseResult<'t, ExprS> {
    let (rt, tokens) = parse_simple_expr(tokens, descend(token, depth)?)?;
    let span = token.span.start..rt.1.end;
    Ok(((Expr::Prefix(Box::new(ExprPrefix { op, rt })), span), tokens))
}

/// Folds `operand { op operand }` into a left-leaning tree.
///
/// Each fold deepens the tree by one, so a long chain counts against the
/// nesting limit the same way parentheses do.
fn parse_infix_left<'t>(
    tokens: &'t [Token],
    depth: usize,
    ops: &[TokenKind],
    operand: fn(&'t [Token], usize) -> ParseResult<'t, ExprS>,
) -> ParseResult<'t, ExprS> {
    let (mut lt, mut tokens) = operand(tokens, depth)?;
    let mut depth = depth;
    loop {
        let token = peek(tokens);
        if !ops.contains(&token.kind) {
            return Ok((lt, tokens));
        }
        let op = infix_op(token)?;
        depth = descend(token, depth)?;
        let (rt, rest) = operand(&tokens[1..], depth)?;
        lt = infix(lt, op, rt);
        tokens = rest;
    }
}

fn infix(lt: ExprS, op: OpInfix, rt: ExprS) -> ExprS {
    let span = lt.1.start..rt.1.end;
    (Expr::Infix(Box::new(ExprInfix { lt, op, rt })), span)
}

fn infix_op(token: &Token) -> Result<OpInfix> {
    let op = match token.kind {
        TokenKind::AmpAmp | TokenKind::Keyword(Keyword::And) => OpInfix::LogicAnd,
        TokenKind::PipePipe | TokenKind::Keyword(Keyword::Or) => OpInfix::LogicOr,
        TokenKind::EqualEqual => OpInfix::Equal,
        TokenKind::BangEqual => OpInfix::NotEqual,
        TokenKind::Greater => OpInfix::Greater,
        TokenKind::GreaterEqual => OpInfix::GreaterEqual,
        TokenKind::Less => OpInfix::Less,
        TokenKind::LessEqual => OpInfix::LessEqual,
        TokenKind::Plus => OpInfix::Add,
        TokenKind::Minus => OpInfix::Subtract,
        TokenKind::Asterisk => OpInfix::Multiply,
        TokenKind::Slash => OpInfix::Divide,
        _ => {
            return Err(Error::InternalError(InternalError::UnknownOperator {
                op: token.kind.to_string(),
                span: token.span.clone(),
            }))
        }
    };
    Ok(op)
}

/// Returns the depth of a construct opened by `token` inside `depth`.
fn descend(token: &Token, depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(Error::SyntaxError(SyntaxError::NestingTooDeep {
            max: MAX_DEPTH,
            span: token.span.clone(),
        }));
    }
    Ok(depth + 1)
}

fn peek(tokens: &[Token]) -> &Token {
    tokens.first().unwrap_or_else(|| unreachable!("parser advanced past end of input"))
}

fn expect<'t>(tokens: &'t [Token], kind: &TokenKind) -> ParseResult<'t, &'t Token> {
    let token = peek(tokens);
    if token.kind == *kind {
        Ok((token, &tokens[1..]))
    } else {
        Err(unexpected(token, &[kind]))
    }
}

fn unexpected(token: &Token, expected: &[&TokenKind]) -> Error {
    Error::SyntaxError(SyntaxError::UnexpectedToken {
        expected: expected.iter().map(|kind| kind.to_string()).collect(),
        found: token.kind.to_string(),
        span: token.span.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ast::Number;
    use crate::lexer::{tokenize, Keywords, Lexer};

    use pretty_assertions::assert_eq;

    fn parse_str(source: &str) -> Result<Program> {
        parse(&tokenize(source).unwrap())
    }

    fn parse_expr(source: &str) -> ExprS {
        let tokens = tokenize(source).unwrap();
        let (expr, rest) = parse_boolean_expr(&tokens, 0).unwrap();
        assert_eq!(rest.len(), 1, "unconsumed input in {source:?}");
        expr
    }

    fn int(n: i64, span: std::ops::Range<usize>) -> ExprS {
        (Expr::Literal(Number::Int(n)), span)
    }

    fn var(name: &str, span: std::ops::Range<usize>) -> ExprS {
        (Expr::Variable(ExprVariable { name: name.to_string() }), span)
    }

    fn syntax_err(e: Error) -> SyntaxError {
        match e {
            Error::SyntaxError(e) => e,
            e => panic!("expected a syntax error, got {e:?}"),
        }
    }

    #[test]
    fn parse_literals() {
        assert_eq!(parse_expr("2"), int(2, 0..1));
        assert_eq!(parse_expr("4.25"), (Expr::Literal(Number::Float(4.25)), 0..4));
        assert_eq!(parse_expr("x"), var("x", 0..1));
        assert_eq!(parse_expr("(2)"), int(2, 0..3));
    }

    #[test]
    fn parse_negation() {
        let exp = (
            Expr::Prefix(Box::new(ExprPrefix {
                op: OpPrefix::Negate,
                rt: (
                    Expr::Prefix(Box::new(ExprPrefix { op: OpPrefix::Negate, rt: int(3, 2..3) })),
                    1..3,
                ),
            })),
            0..3,
        );
        assert_eq!(parse_expr("--3"), exp);

        let exp = (
            Expr::Prefix(Box::new(ExprPrefix { op: OpPrefix::Negate, rt: int(2, 1..4) })),
            0..4,
        );
        assert_eq!(parse_expr("-(2)"), exp);
    }

    #[test]
    fn parse_not_binds_to_simple_expression() {
        let exp = infix(
            (Expr::Prefix(Box::new(ExprPrefix { op: OpPrefix::Not, rt: var("a", 4..5) })), 0..5),
            OpInfix::LogicAnd,
            var("b", 10..11),
        );
        assert_eq!(parse_expr("not a and b"), exp);
    }

    #[test]
    fn parse_term_left_assoc() {
        let exp = infix(
            infix(infix(int(2, 0..1), OpInfix::Multiply, int(3, 2..3)), OpInfix::Divide, int(4, 4..5)),
            OpInfix::Multiply,
            int(5, 6..7),
        );
        assert_eq!(parse_expr("2*3/4*5"), exp);
    }

    #[test]
    fn parse_precedence() {
        let exp = infix(
            infix(int(2, 0..1), OpInfix::Add, infix(int(3, 2..3), OpInfix::Multiply, int(4, 4..5))),
            OpInfix::Add,
            int(5, 6..7),
        );
        assert_eq!(parse_expr("2+3*4+5"), exp);
    }

    #[test]
    fn parse_comparisons() {
        for (source, op) in [
            ("2<3", OpInfix::Less),
            ("2>3", OpInfix::Greater),
            ("2==3", OpInfix::Equal),
            ("2!=3", OpInfix::NotEqual),
        ] {
            assert_eq!(parse_expr(source), infix(int(2, 0..1), op, int(3, source.len() - 1..source.len())));
        }
        for (source, op) in [("2<=3", OpInfix::LessEqual), ("2>=3", OpInfix::GreaterEqual)] {
            assert_eq!(parse_expr(source), infix(int(2, 0..1), op, int(3, 3..4)));
        }
    }

    #[test]
    fn parse_comparison_does_not_chain() {
        let e = syntax_err(parse_str("1<2<3").unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["\";\"".to_string(), "end of input".to_string()],
                found: "\"<\"".to_string(),
                span: 3..4,
            }
        );
    }

    #[test]
    fn parse_boolean_levels() {
        let exp = infix(
            infix(
                infix(infix(int(1, 0..1), OpInfix::Multiply, int(2, 2..3)), OpInfix::Less, infix(int(3, 4..5), OpInfix::Multiply, int(4, 6..7))),
                OpInfix::LogicOr,
                infix(int(5, 9..10), OpInfix::Greater, int(6, 11..12)),
            ),
            OpInfix::LogicAnd,
            int(7, 14..15),
        );
        assert_eq!(parse_expr("1*2<3*4||5>6&&7"), exp);
    }

    #[test]
    fn parse_assignment() {
        let program = parse_str("x = x + 1").unwrap();
        let exp = Program {
            stmts: vec![(
                Stmt::Assign(StmtAssign {
                    name: "x".to_string(),
                    value: infix(var("x", 4..5), OpInfix::Add, int(1, 8..9)),
                }),
                0..9,
            )],
        };
        assert_eq!(program, exp);
    }

    #[test]
    fn parse_invalid_assignment_target() {
        for (source, span) in [("3 = 4", 0..1), ("x + 1 = 2", 0..5), ("(x) = 1", 0..3)] {
            let e = syntax_err(parse_str(source).unwrap_err());
            assert_eq!(e, SyntaxError::InvalidAssignmentTarget { span });
        }
    }

    #[test]
    fn parse_print() {
        let program = parse_str("print(); print(50+7)").unwrap();
        let exp = Program {
            stmts: vec![
                (Stmt::Print(StmtPrint { value: None }), 0..7),
                (
                    Stmt::Print(StmtPrint {
                        value: Some(infix(int(50, 15..17), OpInfix::Add, int(7, 18..19))),
                    }),
                    9..20,
                ),
            ],
        };
        assert_eq!(program, exp);
    }

    #[test]
    fn parse_statement_list() {
        let program = parse_str("1;2;print(4);x=6;").unwrap();
        assert_eq!(program.stmts.len(), 4);
        assert!(matches!(program.stmts[0].0, Stmt::Expr(_)));
        assert!(matches!(program.stmts[2].0, Stmt::Print(_)));
        assert!(matches!(program.stmts[3].0, Stmt::Assign(_)));
    }

    #[test]
    fn parse_empty_program() {
        assert_eq!(parse_str(""), Ok(Program::default()));
        assert_eq!(parse_str("   // nothing here"), Ok(Program::default()));
    }

    #[test]
    fn parse_unterminated_paren() {
        let e = syntax_err(parse_str("(2+3").unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["\")\"".to_string()],
                found: "end of input".to_string(),
                span: 4..4,
            }
        );
    }

    #[test]
    fn parse_missing_operand() {
        let e = syntax_err(parse_str("2 +").unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["expression".to_string()],
                found: "end of input".to_string(),
                span: 3..3,
            }
        );
    }

    #[test]
    fn parse_reserved_keyword() {
        let e = syntax_err(parse_str("return 1").unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["expression".to_string()],
                found: "\"return\"".to_string(),
                span: 0..6,
            }
        );
    }

    #[test]
    fn parse_if_else() {
        let program = parse_str("if (x < 1) { y = 1 } else if (x < 2) { y = 2 } else { y = 3; }").unwrap();
        let (stmt, span) = &program.stmts[0];
        assert_eq!(span, &(0..62));
        let if_ = match stmt {
            Stmt::If(if_) => if_,
            stmt => panic!("expected if statement, got {stmt:?}"),
        };
        assert_eq!(if_.cond, infix(var("x", 4..5), OpInfix::Less, int(1, 8..9)));
        assert_eq!(if_.then.stmts.len(), 1);
        let else_ = if_.else_.as_ref().unwrap();
        match &else_.stmts[..] {
            [(Stmt::If(nested), _)] => {
                assert_eq!(nested.else_.as_ref().unwrap().stmts.len(), 1);
            }
            stmts => panic!("expected nested if, got {stmts:?}"),
        }
    }

    #[test]
    fn parse_while() {
        let program = parse_str("while (i < 3) { print(i); i = i + 1 }").unwrap();
        match &program.stmts[..] {
            [(Stmt::While(while_), span)] => {
                assert_eq!(span, &(0..37));
                assert_eq!(while_.body.stmts.len(), 2);
            }
            stmts => panic!("expected while statement, got {stmts:?}"),
        }
    }

    #[test]
    fn parse_unclosed_block() {
        let e = syntax_err(parse_str("while (1) { x = 1").unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["\";\"".to_string(), "\"}\"".to_string()],
                found: "end of input".to_string(),
                span: 17..17,
            }
        );
    }

    #[test]
    fn parse_requires_eof() {
        let tokens = tokenize("1").unwrap();
        let e = syntax_err(parse(&tokens[..1]).unwrap_err());
        assert!(matches!(e, SyntaxError::UnexpectedToken { span, .. } if span == (1..1)));
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn infix_op_rejects_non_operators() {
        let token = Token { kind: TokenKind::Semicolon, span: 0..1 };
        assert_eq!(
            infix_op(&token),
            Err(Error::InternalError(InternalError::UnknownOperator {
                op: "\";\"".to_string(),
                span: 0..1,
            }))
        );
    }

    #[test]
    fn parse_nesting_limit_parens() {
        let source = "(".repeat(10_000) + "2+3";
        let e = syntax_err(parse_str(&source).unwrap_err());
        assert_eq!(e, SyntaxError::NestingTooDeep { max: MAX_DEPTH, span: MAX_DEPTH..MAX_DEPTH + 1 });
    }

    #[test]
    fn parse_nesting_limit_prefix() {
        let source = "-".repeat(10_000) + "1";
        let e = syntax_err(parse_str(&source).unwrap_err());
        assert_eq!(e, SyntaxError::NestingTooDeep { max: MAX_DEPTH, span: MAX_DEPTH..MAX_DEPTH + 1 });
    }

    #[test]
    fn parse_nesting_limit_infix_chain() {
        let source = vec!["1"; 1_000].join("+");
        let e = syntax_err(parse_str(&source).unwrap_err());
        let at = 2 * MAX_DEPTH + 1;
        assert_eq!(e, SyntaxError::NestingTooDeep { max: MAX_DEPTH, span: at..at + 1 });
    }

    #[test]
    fn parse_nesting_limit_blocks() {
        let source = "while (x) {".repeat(1_000);
        let e = syntax_err(parse_str(&source).unwrap_err());
        let at = MAX_DEPTH * "while (x) {".len() + "while (x) ".len();
        assert_eq!(e, SyntaxError::NestingTooDeep { max: MAX_DEPTH, span: at..at + 1 });
    }

    #[test]
    fn parse_nesting_below_limit() {
        let source = "(".repeat(100) + "1" + &")".repeat(100);
        assert_eq!(parse_expr(&source), int(1, 0..201));
    }

    #[test]
    fn parse_print_only_keywords() {
        let lex = |source: &str| Lexer::new(source).with_keywords(Keywords::print_only()).tokenize().unwrap();

        let program = parse(&lex("while = 1; print(while)")).unwrap();
        match &program.stmts[..] {
            [(Stmt::Assign(assign), _), (Stmt::Print(print), _)] => {
                assert_eq!(assign.name, "while");
                assert_eq!(print.value, Some(var("while", 17..22)));
            }
            stmts => panic!("expected assignment and print, got {stmts:?}"),
        }

        let e = syntax_err(parse(&lex("if (1 < 2) { print(1) }")).unwrap_err());
        assert_eq!(
            e,
            SyntaxError::UnexpectedToken {
                expected: vec!["\";\"".to_string(), "end of input".to_string()],
                found: "\"(\"".to_string(),
                span: 3..4,
            }
        );
    }
}
