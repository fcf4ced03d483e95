use crate::env::Env;
use crate::value::Value;

use sprout_common::error::{ArithmeticError, Error, IoError, NameError, Result, TypeError};
use sprout_syntax::ast::{Expr, ExprS, OpInfix, OpPrefix, Program, Span, Stmt, StmtBlock, StmtS};

use std::io::Write;

/// How `&&` and `||` treat their right operand.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Logic {
    /// Both operands are always evaluated, so errors on the right are raised
    /// even when the left operand already decides the result.
    #[default]
    Eager,
    /// The right operand is skipped when the left operand decides the result.
    ShortCircuit,
}

#[derive(Debug)]
pub struct Interpreter<Stdout> {
    stdout: Stdout,
    logic: Logic,
}

impl<Stdout: Write> Interpreter<Stdout> {
    pub fn new(stdout: Stdout) -> Self {
        Self { stdout, logic: Logic::default() }
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    pub fn into_inner(self) -> Stdout {
        self.stdout
    }

    /// Runs the program against `env`.
    ///
    /// A program made of a single expression statement yields the value of
    /// that expression. Every other program yields nothing.
    pub fn run(&mut self, program: &Program, env: &mut Env) -> Result<Option<Value>> {
        if let [(Stmt::Expr(expr), _)] = program.stmts.as_slice() {
            return self.run_expr(env, &expr.value).map(Some);
        }
        for stmt in &program.stmts {
            self.run_stmt(env, stmt)?;
        }
        Ok(None)
    }

    fn run_block(&mut self, env: &mut Env, block: &StmtBlock) -> Result<()> {
        for stmt in &block.stmts {
            self.run_stmt(env, stmt)?;
        }
        Ok(())
    }

    fn run_stmt(&mut self, env: &mut Env, stmt_s: &StmtS) -> Result<()> {
        let (stmt, span) = stmt_s;
        match stmt {
            Stmt::Assign(assign) => {
                let value = self.run_expr(env, &assign.value)?;
                env.set(&assign.name, value);
                Ok(())
            }
            Stmt::Expr(expr) => {
                self.run_expr(env, &expr.value)?;
                Ok(())
            }
            Stmt::If(if_) => {
                if self.run_cond(env, &if_.cond)? {
                    self.run_block(env, &if_.then)
                } else if let Some(else_) = &if_.else_ {
                    self.run_block(env, else_)
                } else {
                    Ok(())
                }
            }
            Stmt::Print(print) => {
                let result = match &print.value {
                    Some(value) => {
                        let value = self.run_expr(env, value)?;
                        writeln!(self.stdout, "{value}")
                    }
                    None => writeln!(self.stdout),
                };
                result.map_err(|_| {
                    Error::IoError(IoError::WriteError {
                        file: "stdout".to_string(),
                        span: span.clone(),
                    })
                })
            }
            Stmt::While(while_) => {
                while self.run_cond(env, &while_.cond)? {
                    self.run_block(env, &while_.body)?;
                }
                Ok(())
            }
        }
    }

    fn run_cond(&self, env: &Env, cond: &ExprS) -> Result<bool> {
        match self.run_expr(env, cond)? {
            Value::Bool(bool) => Ok(bool),
            value => Err(Error::TypeError(TypeError::NonBoolCondition {
                type_: value.type_().to_string(),
                span: cond.1.clone(),
            })),
        }
    }

    fn run_expr(&self, env: &Env, expr_s: &ExprS) -> Result<Value> {
        let (expr, span) = expr_s;
        match expr {
            Expr::Infix(infix) => {
                let lt = self.run_expr(env, &infix.lt)?;
                if self.logic == Logic::ShortCircuit {
                    match (infix.op, lt) {
                        (OpInfix::LogicAnd, Value::Bool(false)) => return Ok(lt),
                        (OpInfix::LogicOr, Value::Bool(true)) => return Ok(lt),
                        _ => {}
                    }
                }
                let rt = self.run_expr(env, &infix.rt)?;
                run_infix(infix.op, lt, rt, span)
            }
            Expr::Literal(number) => Ok(Value::from(*number)),
            Expr::Prefix(prefix) => {
                let rt = self.run_expr(env, &prefix.rt)?;
                match (prefix.op, rt) {
                    (OpPrefix::Negate, Value::Int(number)) => {
                        number.checked_neg().map(Value::Int).ok_or_else(|| overflow(prefix.op, span))
                    }
                    (OpPrefix::Negate, Value::Float(number)) => Ok(Value::Float(-number)),
                    (OpPrefix::Not, Value::Bool(bool)) => Ok(Value::Bool(!bool)),
                    (op, rt) => Err(Error::TypeError(TypeError::UnsupportedOperandPrefix {
                        op: op.to_string(),
                        rt_type: rt.type_().to_string(),
                        span: span.clone(),
                    })),
                }
            }
            Expr::Variable(var) => env.get(&var.name).ok_or_else(|| {
                Error::NameError(NameError::UndefinedIdentifier {
                    name: var.name.clone(),
                    span: span.clone(),
                })
            }),
        }
    }
}

fn run_infix(op: OpInfix, lt: Value, rt: Value, span: &Span) -> Result<Value> {
    let value = match (lt, rt) {
        (Value::Bool(a), Value::Bool(b)) => match op {
            OpInfix::LogicAnd => Value::Bool(a && b),
            OpInfix::LogicOr => Value::Bool(a || b),
            OpInfix::Equal => Value::Bool(a == b),
            OpInfix::NotEqual => Value::Bool(a != b),
            _ => return Err(unsupported_infix(op, lt, rt, span)),
        },
        (Value::Int(a), Value::Int(b)) => {
            let checked = |result: Option<i64>| result.map(Value::Int).ok_or_else(|| overflow(op, span));
            match op {
                OpInfix::Add => checked(a.checked_add(b))?,
                OpInfix::Subtract => checked(a.checked_sub(b))?,
                OpInfix::Multiply => checked(a.checked_mul(b))?,
                OpInfix::Divide if b == 0 => return Err(division_by_zero(span)),
                OpInfix::Divide => Value::Float(a as f64 / b as f64),
                OpInfix::Equal => Value::Bool(a == b),
                OpInfix::NotEqual => Value::Bool(a != b),
                OpInfix::Greater => Value::Bool(a > b),
                OpInfix::GreaterEqual => Value::Bool(a >= b),
                OpInfix::Less => Value::Bool(a < b),
                OpInfix::LessEqual => Value::Bool(a <= b),
                OpInfix::LogicAnd | OpInfix::LogicOr => {
                    return Err(unsupported_infix(op, lt, rt, span))
                }
            }
        }
        _ => match (lt.as_f64(), rt.as_f64()) {
            (Some(a), Some(b)) => match op {
                OpInfix::Add => Value::Float(a + b),
                OpInfix::Subtract => Value::Float(a - b),
                OpInfix::Multiply => Value::Float(a * b),
                OpInfix::Divide if b == 0.0 => return Err(division_by_zero(span)),
                OpInfix::Divide => Value::Float(a / b),
                OpInfix::Equal => Value::Bool(a == b),
                OpInfix::NotEqual => Value::Bool(a != b),
                OpInfix::Greater => Value::Bool(a > b),
                OpInfix::GreaterEqual => Value::Bool(a >= b),
                OpInfix::Less => Value::Bool(a < b),
                OpInfix::LessEqual => Value::Bool(a <= b),
                OpInfix::LogicAnd | OpInfix::LogicOr => {
                    return Err(unsupported_infix(op, lt, rt, span))
                }
            },
            _ => return Err(unsupported_infix(op, lt, rt, span)),
        },
    };
    Ok(value)
}

fn unsupported_infix(op: OpInfix, lt: Value, rt: Value, span: &Span) -> Error {
    Error::TypeError(TypeError::UnsupportedOperandInfix {
        op: op.to_string(),
        lt_type: lt.type_().to_string(),
        rt_type: rt.type_().to_string(),
        span: span.clone(),
    })
}

fn division_by_zero(span: &Span) -> Error {
    Error::ArithmeticError(ArithmeticError::DivisionByZero { span: span.clone() })
}

fn overflow(op: impl ToString, span: &Span) -> Error {
    Error::ArithmeticError(ArithmeticError::Overflow { op: op.to_string(), span: span.clone() })
}
