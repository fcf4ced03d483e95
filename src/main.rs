mod cmd;

use crate::cmd::Cmd;

use anyhow::Result;
use clap::Parser;

use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    human_panic::setup_panic!();
    Cmd::parse().run()
}
