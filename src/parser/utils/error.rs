use nom_supreme::error::{GenericErrorTree, StackContext};

use super::io::{PError, Span};

/// Picks the error that went the furthest into the input, with its description.
fn furthest<'input>(error: &PError<'input>) -> Option<(Span<'input>, String)> {
    match error {
        GenericErrorTree::Base { location, kind } => Some((*location, kind.to_string())),
        GenericErrorTree::Stack { base, contexts } => {
            let (location, description) = furthest(base)?;
            let context = contexts.iter().find_map(|(_, context)| match context {
                StackContext::Context(context) => Some(*context),
                StackContext::Kind(_) => None,
            });
            match context {
                Some(context) => Some((location, format!("{context} ({description})"))),
                None => Some((location, description)),
            }
        }
        GenericErrorTree::Alt(siblings) => siblings
            .iter()
            .filter_map(furthest)
            .max_by_key(|(location, _)| location.location_offset()),
    }
}

pub fn generate_error_report(source: &str, error: &PError) -> String {
    let Some((location, description)) = furthest(error) else {
        return "invalid trace dump".to_string();
    };
    let line = location.location_line();
    let column = location.get_utf8_column();
    let source_line = source.lines().nth(line as usize - 1).unwrap_or_default();
    format!(
        "invalid trace dump at line {line}, column {column}: {description}\n{source_line}\n{:>column$}",
        "^"
    )
}
