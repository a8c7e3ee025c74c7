//! Turns raw command-file text into an [`Operation`].

use super::{CommandGrammar, Operation, ParseError, ParseErrorKind};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalize a raw snapshot for matching.
///
/// Strips a leading byte-order mark, folds CRLF to LF and drops leading
/// whitespace and control characters. Trailing text is left alone here; the
/// parser decides per rule how much of it is meaningful.
pub fn normalize(raw: &str) -> String {
    let without_bom = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    without_bom
        .replace("\r\n", "\n")
        .trim_start_matches(is_noise)
        .to_string()
}

fn is_noise(c: char) -> bool {
    c.is_whitespace() || c.is_control() || c == BYTE_ORDER_MARK
}

/// Stateless parser over a [`CommandGrammar`].
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    grammar: &'static CommandGrammar,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(CommandGrammar::standard())
    }
}

impl CommandParser {
    pub fn new(grammar: &'static CommandGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'static CommandGrammar {
        self.grammar
    }

    /// Parse one command.
    ///
    /// Payload rules receive the text up to a single trailing newline (the
    /// one editors add on save); every other rule sees the fully trimmed
    /// input.
    pub fn parse(&self, raw: &str) -> Result<Operation, ParseError> {
        let normalized = normalize(raw);
        let trimmed = normalized.trim_end_matches(is_noise);

        if trimmed.is_empty() {
            return Err(ParseError::new(raw, ParseErrorKind::Empty));
        }

        let (entry, rest) = self
            .grammar
            .find(trimmed)
            .ok_or_else(|| ParseError::new(raw, ParseErrorKind::UnknownCommand))?;

        let rest = if entry.rule.preserves_tail() {
            let tail = normalized.strip_suffix('\n').unwrap_or(&normalized);
            // The phrase matched `trimmed`, which shares its start with `tail`.
            &tail[entry.phrase.len()..]
        } else {
            rest
        };

        entry.rule.apply(rest, raw)
    }
}
