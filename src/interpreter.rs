//! Parse, execute and report one command.
//!
//! Shared by the change loop and the one-shot `run` command so both report
//! outcomes the same way: exactly one sink line per outcome, plus the list of
//! recognized commands when the verb is unknown.

use crate::command::{CommandParser, Operation, ParseError, ParseErrorKind};
use crate::executor::{OperationExecutor, Outcome};
use crate::fs::FileSystemPort;
use crate::logging::LogSink;

/// What happened to one command.
#[derive(Debug)]
pub enum Interpretation {
    Executed { operation: Operation, outcome: Outcome },
    Rejected(ParseError),
}

impl Interpretation {
    /// True unless the command failed to parse or its execution failed.
    /// Warn-level no-ops count as success.
    pub fn is_ok(&self) -> bool {
        match self {
            Interpretation::Executed { outcome, .. } => !outcome.is_failure(),
            Interpretation::Rejected(_) => false,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Interpretation::Rejected(_))
    }
}

/// Parser, executor and sink bundled for a single sandbox.
pub struct Interpreter<F, S> {
    parser: CommandParser,
    executor: OperationExecutor<F>,
    sink: S,
}

impl<F: FileSystemPort, S: LogSink> Interpreter<F, S> {
    pub fn new(executor: OperationExecutor<F>, sink: S) -> Self {
        Self {
            parser: CommandParser::default(),
            executor,
            sink,
        }
    }

    pub fn executor(&self) -> &OperationExecutor<F> {
        &self.executor
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Parse and execute `text`, reporting the outcome to the sink.
    pub async fn interpret(&self, text: &str) -> Interpretation {
        let operation = match self.parser.parse(text) {
            Ok(operation) => operation,
            Err(err) => {
                self.report_rejection(&err);
                return Interpretation::Rejected(err);
            }
        };

        crate::debug_event!("command", "parsed", "{operation}");
        let outcome = self.executor.execute(&operation).await;
        self.report_outcome(&operation, &outcome);

        Interpretation::Executed { operation, outcome }
    }

    fn report_outcome(&self, operation: &Operation, outcome: &Outcome) {
        match outcome {
            Outcome::Success(message) => self.sink.success(message),
            Outcome::Skipped(message) => self.sink.warn(message),
            Outcome::Failed(err) => self
                .sink
                .error(&format!("{} failed", operation.name()), Some(err)),
        }
    }

    fn report_rejection(&self, err: &ParseError) {
        self.sink.error("could not parse command", Some(err));

        if err.reason == ParseErrorKind::UnknownCommand {
            let mut usage = String::from("available commands:");
            for entry in self.parser.grammar().entries() {
                usage.push_str("\n  ");
                usage.push_str(entry.usage);
            }
            self.sink.info(&usage);
        }
    }
}
