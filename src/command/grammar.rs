//! Ordered table of verb phrases and their argument rules.

use std::sync::LazyLock;

use super::{Operation, ParseError, ParseErrorKind};

/// Separator between the two paths of a rename or copy.
pub const PATH_SEPARATOR: &str = " to ";

/// Separator between the path and the payload of an append.
pub const CONTENT_SEPARATOR: &str = " this content: ";

static STANDARD: LazyLock<CommandGrammar> = LazyLock::new(CommandGrammar::build_standard);

/// How the text after a verb phrase becomes operation arguments.
#[derive(Debug, Clone, Copy)]
pub enum ParseRule {
    /// The trimmed remainder is the path.
    SinglePath(fn(String) -> Operation),

    /// Like `SinglePath`, but an empty remainder means `default`.
    OptionalPath {
        default: &'static str,
        build: fn(String) -> Operation,
    },

    /// Two trimmed paths joined by `separator`.
    PathPair {
        separator: &'static str,
        malformed: ParseErrorKind,
        build: fn(String, String) -> Operation,
    },

    /// A trimmed path, `separator`, then a payload taken verbatim.
    PathPlusPayload {
        separator: &'static str,
        malformed: ParseErrorKind,
        build: fn(String, String) -> Operation,
    },
}

impl ParseRule {
    /// Whether the rule needs the input's trailing whitespace left intact.
    pub fn preserves_tail(&self) -> bool {
        matches!(self, ParseRule::PathPlusPayload { .. })
    }

    /// Apply the rule to `rest`, the text following the verb phrase.
    pub fn apply(&self, rest: &str, raw_input: &str) -> Result<Operation, ParseError> {
        match *self {
            ParseRule::SinglePath(build) => Ok(build(rest.trim().to_string())),
            ParseRule::OptionalPath { default, build } => {
                let path = rest.trim();
                let path = if path.is_empty() { default } else { path };
                Ok(build(path.to_string()))
            }
            ParseRule::PathPair {
                separator,
                malformed,
                build,
            } => {
                let (left, right) = rest
                    .split_once(separator)
                    .ok_or_else(|| ParseError::new(raw_input, malformed))?;
                Ok(build(left.trim().to_string(), right.trim().to_string()))
            }
            ParseRule::PathPlusPayload {
                separator,
                malformed,
                build,
            } => {
                let (left, payload) = rest
                    .split_once(separator)
                    .ok_or_else(|| ParseError::new(raw_input, malformed))?;
                Ok(build(left.trim().to_string(), payload.to_string()))
            }
        }
    }
}

/// One recognized verb phrase.
#[derive(Debug, Clone)]
pub struct GrammarEntry {
    pub phrase: &'static str,
    pub usage: &'static str,
    pub rule: ParseRule,
}

impl GrammarEntry {
    /// Returns the text after the phrase when `input` starts with it on a
    /// word boundary.
    pub fn strip<'a>(&self, input: &'a str) -> Option<&'a str> {
        let rest = input.strip_prefix(self.phrase)?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if c.is_whitespace() => Some(rest),
            Some(_) => None,
        }
    }
}

/// Verb phrases in match priority order.
///
/// Entries are kept sorted longest phrase first, so a phrase that is a prefix
/// of another is only tried after the more specific one.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    entries: Vec<GrammarEntry>,
}

impl CommandGrammar {
    /// The shared grammar of the command file protocol.
    pub fn standard() -> &'static CommandGrammar {
        &STANDARD
    }

    /// Build a grammar from arbitrary entries, ordering them by priority.
    pub fn new(mut entries: Vec<GrammarEntry>) -> Self {
        // Stable sort keeps declaration order among equal lengths.
        entries.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
        Self { entries }
    }

    pub fn entries(&self) -> &[GrammarEntry] {
        &self.entries
    }

    /// First entry whose phrase matches `input`, with the remaining text.
    pub fn find<'a>(&self, input: &'a str) -> Option<(&GrammarEntry, &'a str)> {
        self.entries
            .iter()
            .find_map(|entry| entry.strip(input).map(|rest| (entry, rest)))
    }

    pub fn phrases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.phrase)
    }

    fn build_standard() -> Self {
        Self::new(vec![
            GrammarEntry {
                phrase: "create a file",
                usage: "create a file <path>",
                rule: ParseRule::SinglePath(|path| Operation::CreateFile { path }),
            },
            GrammarEntry {
                phrase: "delete the file",
                usage: "delete the file <path>",
                rule: ParseRule::SinglePath(|path| Operation::DeleteFile { path }),
            },
            GrammarEntry {
                phrase: "rename the file",
                usage: "rename the file <old> to <new>",
                rule: ParseRule::PathPair {
                    separator: PATH_SEPARATOR,
                    malformed: ParseErrorKind::MalformedRenameSyntax,
                    build: |old_path, new_path| Operation::RenameFile { old_path, new_path },
                },
            },
            GrammarEntry {
                phrase: "add to the file",
                usage: "add to the file <path> this content: <text>",
                rule: ParseRule::PathPlusPayload {
                    separator: CONTENT_SEPARATOR,
                    malformed: ParseErrorKind::MalformedAppendSyntax,
                    build: |path, content| Operation::AppendToFile { path, content },
                },
            },
            GrammarEntry {
                phrase: "read the file",
                usage: "read the file <path>",
                rule: ParseRule::SinglePath(|path| Operation::ReadFile { path }),
            },
            GrammarEntry {
                phrase: "copy the file",
                usage: "copy the file <src> to <dest>",
                rule: ParseRule::PathPair {
                    separator: PATH_SEPARATOR,
                    malformed: ParseErrorKind::MalformedCopySyntax,
                    build: |src_path, dest_path| Operation::CopyFile {
                        src_path,
                        dest_path,
                    },
                },
            },
            GrammarEntry {
                phrase: "list the directory",
                usage: "list the directory [path]",
                rule: ParseRule::OptionalPath {
                    default: ".",
                    build: |path| Operation::ListDirectory { path },
                },
            },
            GrammarEntry {
                phrase: "file info",
                usage: "file info <path>",
                rule: ParseRule::SinglePath(|path| Operation::FileInfo { path }),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grammar_has_all_verbs() {
        let phrases: Vec<_> = CommandGrammar::standard().phrases().collect();
        assert_eq!(phrases.len(), 8);
        for expected in [
            "create a file",
            "delete the file",
            "rename the file",
            "add to the file",
            "read the file",
            "copy the file",
            "list the directory",
            "file info",
        ] {
            assert!(phrases.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_longer_phrases_are_tried_first() {
        let grammar = CommandGrammar::new(vec![
            GrammarEntry {
                phrase: "read",
                usage: "read <path>",
                rule: ParseRule::SinglePath(|path| Operation::ReadFile { path }),
            },
            GrammarEntry {
                phrase: "read info",
                usage: "read info <path>",
                rule: ParseRule::SinglePath(|path| Operation::FileInfo { path }),
            },
        ]);

        let (entry, rest) = grammar.find("read info a.txt").unwrap();
        assert_eq!(entry.phrase, "read info");
        assert_eq!(rest, " a.txt");
    }

    #[test]
    fn test_phrase_requires_word_boundary() {
        let grammar = CommandGrammar::standard();
        assert!(grammar.find("file infos a.txt").is_none());
        assert!(grammar.find("list the directoryfoo").is_none());
        assert!(grammar.find("list the directory").is_some());
    }

    #[test]
    fn test_path_pair_requires_separator() {
        let rule = ParseRule::PathPair {
            separator: PATH_SEPARATOR,
            malformed: ParseErrorKind::MalformedCopySyntax,
            build: |src_path, dest_path| Operation::CopyFile {
                src_path,
                dest_path,
            },
        };

        let err = rule.apply(" a.txt b.txt", "copy the file a.txt b.txt").unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::MalformedCopySyntax);
        assert_eq!(err.raw_input, "copy the file a.txt b.txt");
    }

    #[test]
    fn test_payload_is_not_trimmed() {
        let rule = ParseRule::PathPlusPayload {
            separator: CONTENT_SEPARATOR,
            malformed: ParseErrorKind::MalformedAppendSyntax,
            build: |path, content| Operation::AppendToFile { path, content },
        };

        let op = rule.apply("  a.txt  this content:  hi  ", "").unwrap();
        assert_eq!(
            op,
            Operation::AppendToFile {
                path: "a.txt".to_string(),
                content: " hi  ".to_string(),
            }
        );
    }
}
