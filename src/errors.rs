//! Error taxonomy: user-input and execution errors are reported inline by the
//! REPL and do not unwind the process; `Fatal` and `Io` terminate it.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Statement could not be parsed at all.
    Syntax(String),
    /// A string field exceeded its fixed on-disk width.
    StringTooLong,
    /// An id was supplied that is not a positive integer.
    IdMustBePositive,
    /// The leading keyword of a line did not match any known statement.
    UnrecognizedKeyword(String),
    /// A `.`-command did not match any known meta-command.
    UnrecognizedMetaCommand(String),
    /// The leaf root has no room for another cell.
    TableFull,
    /// An insert's key already exists in the table.
    DuplicateKey,
    /// A core invariant was violated; the process must terminate.
    Fatal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{e}"),
            Error::Syntax(_) => write!(f, "Syntax error. Failed to parse statement."),
            Error::StringTooLong => write!(f, "String is too long."),
            Error::IdMustBePositive => write!(f, "ID must be positive."),
            Error::UnrecognizedKeyword(input) => {
                write!(f, "Unrecognized keyword at start of '{input}'.")
            }
            Error::UnrecognizedMetaCommand(cmd) => write!(f, "Unrecognized command: '{cmd}'"),
            Error::TableFull => write!(f, "Error: Table is full."),
            Error::DuplicateKey => write!(f, "Error: Duplicate key."),
            Error::Fatal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl Error {
    /// Fatal errors are the only ones that should terminate the process
    /// without attempting a clean close.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Fatal(_) | Error::Io(_))
    }
}
