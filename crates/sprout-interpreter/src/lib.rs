mod env;
mod interpreter;
mod value;

pub use crate::env::Env;
pub use crate::interpreter::{Interpreter, Logic};
pub use crate::value::Value;

use sprout_common::error::Result;
use sprout_syntax::ast::Program;

use std::io;

/// Runs `program` against `env`, printing to stdout.
pub fn evaluate(program: &Program, env: &mut Env) -> Result<Option<Value>> {
    Interpreter::new(io::stdout()).run(program, env)
}
