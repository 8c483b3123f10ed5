mod command_line;
mod config;
mod contracts;
mod deploy;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use command_line::CommandLine;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cmd = match CommandLine::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => return ExitCode::from(parse_error_status(&err)),
    };
    ExitCode::from(exit_status(cmd.execute().await))
}

/// `--help` and `--version` exit cleanly, any other parse error is a failure.
fn parse_error_status(err: &clap::Error) -> u8 {
    let _ = err.print();
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{:?}", err);
            1
        }
    }
}
