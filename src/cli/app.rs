//! The argfeed command line tool
//!
//! Concatenates standard input, or the files given as arguments, to
//! standard output.

use crate::collect::Collected;
use crate::error::{ArgfeedError, CollectResult};
use crate::program::Program;
use crate::registry::{OptionType, Value};
use crate::VERSION;
use anyhow::{Context as _, Result};
use clap_complete::Shell;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn parse_shell(raw: &str) -> std::result::Result<Value, String> {
    raw.parse::<Shell>()
        .map(|shell| Value::String(shell.to_string()))
}

/// Declare the tool's options
pub fn build_program(args: Vec<String>) -> Program {
    Program::new(args)
        .version(VERSION)
        .option("upper", ("-u", "Uppercase the output", OptionType::Boolean))
        .option("number", ("-n", "Number the output lines", OptionType::Boolean))
        .option(
            "completions",
            ("Print a completion script for the given shell", OptionType::custom(parse_shell)),
        )
        .on_help(|out| {
            writeln!(out, "  Examples:")?;
            writeln!(out)?;
            writeln!(out, "    argfeed notes.txt todo.txt")?;
            writeln!(out, "    echo hello | argfeed -u")?;
            writeln!(out)
        })
}

/// Apply the output options to the collected text
pub fn render(contents: &str, upper: bool, number: bool) -> String {
    let text = if upper {
        contents.to_uppercase()
    } else {
        contents.to_string()
    };

    if !number {
        return text;
    }

    text.split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| format!("{:>6}\t{}", i + 1, line))
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run the tool with the process arguments
pub async fn run() -> Result<()> {
    init_tracing();

    let mut program = build_program(std::env::args().collect());
    let parsed = match program.parse().await {
        Ok(outcome) => outcome.or_exit(),
        // clap renders its own usage error and exits with status 2
        Err(ArgfeedError::Parse(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    if let Some(shell) = parsed.get_str("completions") {
        let shell: Shell = shell.parse().map_err(anyhow::Error::msg)?;
        program.completions(shell, &mut io::stdout());
        return Ok(());
    }

    let slot: Rc<RefCell<Option<CollectResult<Collected>>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    program
        .collect(move |result| *sink.borrow_mut() = Some(result))
        .await;

    let collected = match slot.borrow_mut().take() {
        Some(result) => result.context("failed to collect input")?,
        None => return Ok(()),
    };

    let text = render(&collected.contents, parsed.flag("upper"), parsed.flag("number"));
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
