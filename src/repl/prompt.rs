//! Raw-mode line editor for interactive sessions: left/right movement,
//! backspace, and up/down history recall. Trimmed of the teacher's
//! multi-line SQL buffer, status bar, and tab-completion, since this grammar
//! is one statement per line.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::path::PathBuf;

const HISTORY_FILE: &str = ".tdb_history";

pub enum ReadOutcome {
    Line(String),
    Eof,
    Interrupted,
}

pub struct Prompt {
    history: Vec<String>,
    history_path: Option<PathBuf>,
    history_index: usize,
}

impl Prompt {
    /// A missing or undeterminable home directory disables history
    /// persistence for the session rather than failing it; history is an
    /// ambient nicety, not a condition the database needs to run.
    pub fn new() -> Self {
        let history_path = match super::history::get_home_file(HISTORY_FILE.to_string()) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("history disabled: {e}");
                None
            }
        };
        let history = history_path
            .as_ref()
            .map(super::history::load_history)
            .unwrap_or_default();
        let history_index = history.len();
        Prompt {
            history,
            history_path,
            history_index,
        }
    }

    fn remember(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.history.push(line.to_string());
            self.history_index = self.history.len();
            if let Some(path) = &self.history_path {
                if let Err(e) = super::history::append_history(line, path) {
                    tracing::warn!("failed to append history: {e}");
                }
            }
        }
    }

    /// Prints the prompt, reads one line with editing enabled, and returns it.
    pub fn readline(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        let mut buffer = String::new();
        let mut cursor_pos = 0usize;
        self.history_index = self.history.len();

        print!("{prompt}");
        io::stdout().flush()?;

        loop {
            let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            else {
                continue;
            };

            match code {
                KeyCode::Enter => {
                    println!();
                    self.remember(&buffer);
                    return Ok(ReadOutcome::Line(buffer));
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    println!();
                    return Ok(ReadOutcome::Interrupted);
                }
                KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                    println!();
                    return Ok(ReadOutcome::Eof);
                }
                KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => {}
                KeyCode::Char(c) => {
                    buffer.insert(cursor_pos, c);
                    cursor_pos += 1;
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                KeyCode::Backspace => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        buffer.remove(cursor_pos);
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                KeyCode::Left => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        execute!(io::stdout(), cursor::MoveLeft(1))?;
                    }
                }
                KeyCode::Right => {
                    if cursor_pos < buffer.len() {
                        cursor_pos += 1;
                        execute!(io::stdout(), cursor::MoveRight(1))?;
                    }
                }
                KeyCode::Up => {
                    if self.history_index > 0 {
                        self.history_index -= 1;
                        buffer = self.history[self.history_index].clone();
                        cursor_pos = buffer.len();
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                KeyCode::Down => {
                    if self.history_index + 1 < self.history.len() {
                        self.history_index += 1;
                        buffer = self.history[self.history_index].clone();
                    } else {
                        self.history_index = self.history.len();
                        buffer.clear();
                    }
                    cursor_pos = buffer.len();
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                _ => {}
            }
        }
    }

    fn redraw(&self, prompt: &str, buffer: &str, cursor_pos: usize) -> io::Result<()> {
        execute!(
            io::stdout(),
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine),
        )?;
        print!("{prompt}{buffer}");
        io::stdout().flush()?;
        execute!(
            io::stdout(),
            cursor::MoveToColumn((prompt.len() + cursor_pos) as u16)
        )
    }
}
