//! Command language for the watched command file.
//!
//! A command is one line of text such as `rename the file ./a.txt to ./b.txt`.
//! [`CommandParser`] normalizes the raw snapshot and matches it against the
//! ordered [`CommandGrammar`], producing a typed [`Operation`] whose path
//! fields are still raw strings.

mod error;
mod grammar;
mod operation;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use grammar::{CommandGrammar, GrammarEntry, ParseRule};
pub use operation::Operation;
pub use parser::{CommandParser, normalize};
