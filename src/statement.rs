//! Parses one input line into either a meta-command or a statement, and
//! formats statement results back into the REPL's result-message protocol.
//!
//! This replaces the teacher's general SQL parser: the language here is
//! fixed to `insert <id> <username> <email>` and `select`.

use crate::errors::Error;
use crate::node;
use crate::row::{Row, COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE};
use crate::table::Table;

pub enum MetaCommand {
    Exit,
    Constants,
    Btree,
    Unrecognized(String),
}

pub enum Statement {
    Insert(Row),
    Select,
}

/// Parses a line starting with `.` into a meta-command. Does not touch the
/// table; callers decide what each command does.
pub fn parse_meta_command(line: &str) -> MetaCommand {
    match line {
        ".exit" => MetaCommand::Exit,
        ".constants" => MetaCommand::Constants,
        ".btree" => MetaCommand::Btree,
        other => MetaCommand::Unrecognized(other.to_string()),
    }
}

/// Parses a non-meta-command line into a statement. Parses a copy of the
/// input so the original line can still be quoted in error messages.
pub fn parse_statement(line: &str) -> Result<Statement, Error> {
    let line = line.to_string();
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().ok_or_else(|| Error::Syntax(line.clone()))?;

    match keyword {
        "insert" => {
            let rest: Vec<&str> = tokens.collect();
            let [id_str, username, email] = rest.as_slice() else {
                return Err(Error::Syntax(line));
            };

            let id: i64 = id_str.parse().map_err(|_| Error::Syntax(line.clone()))?;
            if id < 0 {
                return Err(Error::IdMustBePositive);
            }
            let id: u32 = id.try_into().map_err(|_| Error::Syntax(line.clone()))?;
            if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
                return Err(Error::StringTooLong);
            }

            Ok(Statement::Insert(Row::new(id, *username, *email)?))
        }
        "select" => Ok(Statement::Select),
        _ => Err(Error::UnrecognizedKeyword(line)),
    }
}

/// Runs a parsed statement against the table and returns the lines to print.
pub fn execute_statement(table: &mut Table, statement: Statement) -> Result<Vec<String>, Error> {
    match statement {
        Statement::Insert(row) => {
            table.insert_row(&row)?;
            Ok(vec!["Executed.".to_string()])
        }
        Statement::Select => {
            let mut lines: Vec<String> = table
                .select_rows()?
                .into_iter()
                .map(|row| row.to_string())
                .collect();
            lines.push("Executed.".to_string());
            Ok(lines)
        }
    }
}

pub fn print_constants() -> Vec<String> {
    vec![
        "Constants:".to_string(),
        format!("ROW_SIZE: {}", crate::row::ROW_SIZE),
        format!("COMMON_NODE_HEADER_SIZE: {}", node::COMMON_NODE_HEADER_SIZE),
        format!("LEAF_NODE_HEADER_SIZE: {}", node::LEAF_NODE_HEADER_SIZE),
        format!("LEAF_NODE_CELL_SIZE: {}", node::LEAF_NODE_CELL_SIZE),
        format!(
            "LEAF_NODE_SPACE_FOR_CELLS: {}",
            node::LEAF_NODE_SPACE_FOR_CELLS
        ),
        format!("LEAF_NODE_MAX_CELLS: {}", node::LEAF_NODE_MAX_CELLS),
    ]
}

pub fn print_btree(table: &mut Table) -> Result<Vec<String>, Error> {
    let root_page_num = table.root_page_num;
    let page = table.pager.get_page(root_page_num)?;
    let n = node::num_cells(page);
    let mut lines = vec![format!("leaf (size {n})")];
    for i in 0..n {
        lines.push(format!("  - {i} : {}", node::key(page, i as usize)?));
    }
    Ok(lines)
}
