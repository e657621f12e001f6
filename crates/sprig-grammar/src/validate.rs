use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::GrammarError;
use crate::lexer::{Token, TokenKind};

/// Finds every `Name =` in declaration order and rejects names defined
/// twice. Maps each name to the offset of its definition.
pub(crate) fn collect_definitions(tokens: &[Token]) -> Result<IndexMap<String, usize>, GrammarError> {
    let mut definitions = IndexMap::new();

    for pair in tokens.windows(2) {
        let [name, eq] = pair else { continue };
        let (TokenKind::Ident(text), TokenKind::Eq) = (&name.kind, &eq.kind) else { continue };

        match definitions.entry(text.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(name.offset);
            }
            Entry::Occupied(entry) => {
                return Err(GrammarError::DuplicateRule {
                    name: text.clone(),
                    first: *entry.get(),
                    offset: name.offset,
                });
            }
        }
    }

    Ok(definitions)
}
