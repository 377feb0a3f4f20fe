//! Dispatches between the interactive and piped front-ends based on whether
//! stdin is a terminal, and drives the shared statement dispatch loop
//! either way.

mod history;
mod piped;
mod prompt;

use std::io::{self, IsTerminal};

use crate::errors::Error;
use crate::statement::{self, MetaCommand};
use crate::table::Table;

pub const PROMPT: &str = "tdb > ";

pub fn start(db_path: &str) -> Result<(), Error> {
    let table = Table::open(db_path)?;

    if io::stdin().is_terminal() {
        run_interactive(table)
    } else {
        run_piped(table)
    }
}

enum LoopAction {
    Continue,
    Exit,
}

fn dispatch_line(table: &mut Table, line: &str) -> Result<LoopAction, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LoopAction::Continue);
    }

    if let Some(meta) = trimmed.strip_prefix('.').map(|_| trimmed) {
        return Ok(match statement::parse_meta_command(meta) {
            MetaCommand::Exit => LoopAction::Exit,
            MetaCommand::Constants => {
                statement::print_constants().iter().for_each(|l| println!("{l}"));
                LoopAction::Continue
            }
            MetaCommand::Btree => {
                match statement::print_btree(table) {
                    Ok(lines) => lines.iter().for_each(|l| println!("{l}")),
                    Err(e) if e.is_fatal() => return Err(e.to_string()),
                    Err(e) => println!("{e}"),
                }
                LoopAction::Continue
            }
            MetaCommand::Unrecognized(cmd) => {
                println!("{}", Error::UnrecognizedMetaCommand(cmd));
                LoopAction::Continue
            }
        });
    }

    match statement::parse_statement(trimmed).and_then(|stmt| statement::execute_statement(table, stmt)) {
        Ok(lines) => {
            lines.iter().for_each(|l| println!("{l}"));
            Ok(LoopAction::Continue)
        }
        Err(e) if e.is_fatal() => Err(e.to_string()),
        Err(e) => {
            println!("{e}");
            Ok(LoopAction::Continue)
        }
    }
}

fn run_piped(mut table: Table) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut locked = stdin.lock();
    loop {
        let line = match piped::read_line(PROMPT, &mut locked)? {
            Some(line) => line,
            // EOF on stdin behaves like `.exit`: close cleanly.
            None => return table.close(),
        };
        match dispatch_line(&mut table, &line) {
            Ok(LoopAction::Continue) => continue,
            Ok(LoopAction::Exit) => return table.close(),
            Err(fatal) => {
                eprintln!("{fatal}");
                std::process::exit(1);
            }
        }
    }
}

fn run_interactive(mut table: Table) -> Result<(), Error> {
    raw_mode::enable()?;
    let mut prompt = prompt::Prompt::new();

    let outcome = loop {
        match prompt.readline(PROMPT) {
            Ok(prompt::ReadOutcome::Line(line)) => match dispatch_line(&mut table, &line) {
                Ok(LoopAction::Continue) => continue,
                Ok(LoopAction::Exit) => break Ok(()),
                Err(fatal) => break Err(Error::Fatal(fatal)),
            },
            Ok(prompt::ReadOutcome::Interrupted) | Ok(prompt::ReadOutcome::Eof) => break Ok(()),
            Err(e) => break Err(Error::Io(e)),
        }
    };

    raw_mode::disable();

    outcome.and_then(|()| table.close())
}

mod raw_mode {
    use crate::errors::Error;

    pub fn enable() -> Result<(), Error> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn disable() {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
