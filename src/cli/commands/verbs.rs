//! Verbs command - list the recognized command phrases.

use crate::command::CommandGrammar;

/// Render the grammar as help text, in match priority order.
pub fn render_verbs(grammar: &CommandGrammar) -> String {
    let mut out = String::from("Recognized commands:\n");
    for entry in grammar.entries() {
        out.push_str("  ");
        out.push_str(entry.usage);
        out.push('\n');
    }
    out
}

/// Run verbs command.
pub fn run_verbs() {
    print!("{}", render_verbs(CommandGrammar::standard()));
}
