//! Parse failures for command text.

use thiserror::Error;

/// Why a command could not be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("command is empty")]
    Empty,

    #[error("unknown command")]
    UnknownCommand,

    #[error("malformed rename, expected `rename the file <old> to <new>`")]
    MalformedRenameSyntax,

    #[error("malformed copy, expected `copy the file <src> to <dest>`")]
    MalformedCopySyntax,

    #[error("malformed append, expected `add to the file <path> this content: <text>`")]
    MalformedAppendSyntax,
}

/// A command that failed to parse, with the input that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}: {raw_input:?}")]
pub struct ParseError {
    pub raw_input: String,
    pub reason: ParseErrorKind,
}

impl ParseError {
    pub fn new(raw_input: impl Into<String>, reason: ParseErrorKind) -> Self {
        Self {
            raw_input: raw_input.into(),
            reason,
        }
    }

    /// True for the malformed-syntax family of failures.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.reason,
            ParseErrorKind::MalformedRenameSyntax
                | ParseErrorKind::MalformedCopySyntax
                | ParseErrorKind::MalformedAppendSyntax
        )
    }
}
