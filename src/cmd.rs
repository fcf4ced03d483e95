use anyhow::{Context, Result};
use clap::{Args, Parser};
use sprout_common::error::{self, Error};
use sprout_interpreter::{Env, Interpreter, Logic, Value};
use sprout_syntax::Keywords;
use termcolor::{ColorChoice, StandardStream};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[clap(about, author, disable_help_subcommand = true, propagate_version = true, version)]
pub enum Cmd {
    /// Read statements from stdin, one line at a time.
    Repl {
        #[clap(flatten)]
        opts: Opts,
    },
    /// Run a script file.
    Run {
        path: PathBuf,
        #[clap(flatten)]
        opts: Opts,
    },
}

#[derive(Args, Debug)]
pub struct Opts {
    /// Skip the right operand of && and || when the left one decides the result.
    #[clap(long)]
    short_circuit: bool,
    /// Only reserve `print`; if, while and the rest become plain identifiers.
    #[clap(long)]
    no_keywords: bool,
}

impl Cmd {
    pub fn run(&self) -> Result<ExitCode> {
        match self {
            Cmd::Repl { opts } => repl(Session::new(opts)),
            Cmd::Run { path, opts } => run(path, Session::new(opts)),
        }
    }
}

/// One environment shared by every input of an invocation.
struct Session {
    env: Env,
    keywords: Keywords,
    logic: Logic,
}

impl Session {
    fn new(opts: &Opts) -> Self {
        let keywords = if opts.no_keywords { Keywords::print_only() } else { Keywords::all() };
        let logic = if opts.short_circuit { Logic::ShortCircuit } else { Logic::Eager };
        Self { env: Env::new(), keywords, logic }
    }

    fn eval(&mut self, source: &str) -> Result<Option<Value>, Error> {
        let program = sprout_syntax::parse_source_with(source, self.keywords.clone())?;
        Interpreter::new(io::stdout()).with_logic(self.logic).run(&program, &mut self.env)
    }
}

fn run(path: &Path, mut session: Session) -> Result<ExitCode> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read file: {}", path.display()))?;
    match session.eval(&source) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            let mut stderr = StandardStream::stderr(ColorChoice::Auto);
            error::report_err(&mut stderr, &path.display().to_string(), &source, &e)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn repl(mut session: Session) -> Result<ExitCode> {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut lines = io::stdin().lock().lines();
    loop {
        print!(">> ");
        io::stdout().flush().context("could not flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("could not read from stdin")?,
            None => break,
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        match session.eval(&line) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(e) => error::report_err(&mut stderr, "<stdin>", &line, &e)?,
        }
    }
    Ok(ExitCode::SUCCESS)
}
