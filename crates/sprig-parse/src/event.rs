//! The parser records what it saw as a flat list of events; this module
//! replays them into a [`Builder`], interleaving the trivia the parser never
//! looked at.

use std::mem;

use sprig_syntax::{Builder, GreenNode, SyntaxError, SyntaxErrorKind, SyntaxKind};
use sprig_tokenizer::Token;
use text_size::{TextRange, TextSize};

#[derive(Debug)]
pub(crate) enum Event {
    /// Opens a node. `forward_parent` is the distance to the `Start` of a
    /// node that was started later but must wrap this one.
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    /// Glues `n_raw_tokens` lexer tokens into one token of `kind`.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },
    Finish,
    Error { kind: SyntaxErrorKind, message: String },
}

impl Event {
    pub(crate) const TOMBSTONE: Self =
        Self::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) fn build_tree(
    tokens: &[Token<'_>],
    mut events: Vec<Event>,
) -> (GreenNode, Vec<SyntaxError>) {
    let mut sink = Sink::new(tokens);
    let mut forward_parents = Vec::new();

    for i in 0..events.len() {
        match mem::replace(&mut events[i], Event::TOMBSTONE) {
            Event::Start { kind, forward_parent } => {
                if kind == SyntaxKind::TOMBSTONE {
                    continue;
                }

                forward_parents.push(kind);
                let mut idx = i;
                let mut fp = forward_parent;
                while let Some(fwd) = fp {
                    idx += fwd as usize;

                    fp = match mem::replace(&mut events[idx], Event::TOMBSTONE) {
                        Event::Start { kind, forward_parent } => {
                            if kind != SyntaxKind::TOMBSTONE {
                                forward_parents.push(kind);
                            }
                            forward_parent
                        }
                        _ => unreachable!("forward parent must point at a node start"),
                    };
                }

                for kind in forward_parents.drain(..).rev() {
                    sink.enter(kind);
                }
            }
            Event::Finish => sink.exit(),
            Event::Token { kind, n_raw_tokens } => sink.token(kind, n_raw_tokens),
            Event::Error { kind, message } => sink.error(kind, message),
        }
    }

    sink.finish()
}

enum State {
    /// Nothing has been entered yet.
    PendingStart,
    Normal,
    /// A node was exited; finishing it is delayed so that trailing trivia of
    /// the last node end up in the root.
    PendingFinish,
}

struct Sink<'t> {
    tokens: &'t [Token<'t>],
    pos: usize,
    state: State,
    builder: Builder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'t> Sink<'t> {
    fn new(tokens: &'t [Token<'t>]) -> Self {
        Self {
            tokens,
            pos: 0,
            state: State::PendingStart,
            builder: Builder::new(),
            errors: Vec::new(),
        }
    }

    fn enter(&mut self, kind: SyntaxKind) {
        match mem::replace(&mut self.state, State::Normal) {
            State::PendingStart => {
                self.builder.start_node(kind);
                return;
            }
            State::PendingFinish => self.builder.finish_node(),
            State::Normal => {}
        }

        let tokens = self.tokens;
        let n_trivias = tokens[self.pos..].iter().take_while(|token| token.kind.is_trivia()).count();
        let leading = &tokens[self.pos..self.pos + n_trivias];
        let n_attached = n_attached_trivias(kind, leading.iter().rev());

        self.eat_n_trivias(n_trivias - n_attached);
        self.builder.start_node(kind);
        self.eat_n_trivias(n_attached);
    }

    fn exit(&mut self) {
        match mem::replace(&mut self.state, State::PendingFinish) {
            State::PendingStart => unreachable!("exit before enter"),
            State::PendingFinish => self.builder.finish_node(),
            State::Normal => {}
        }
    }

    fn token(&mut self, kind: SyntaxKind, n_raw_tokens: u8) {
        match mem::replace(&mut self.state, State::Normal) {
            State::PendingStart => unreachable!("token before the root node"),
            State::PendingFinish => self.builder.finish_node(),
            State::Normal => {}
        }
        self.eat_trivias();

        let tokens = self.tokens;
        let n_raw_tokens = n_raw_tokens as usize;
        let raw = &tokens[self.pos..self.pos + n_raw_tokens];
        self.pos += n_raw_tokens;

        if let [token] = raw {
            self.lexer_error(token);
            self.builder.token(kind, token.text);
            return;
        }
        let text: String = raw.iter().map(|token| token.text).collect();
        self.builder.token(kind, &text);
    }

    fn error(&mut self, kind: SyntaxErrorKind, message: String) {
        let range = self.tokens[self.pos..]
            .iter()
            .find(|token| !token.kind.is_trivia())
            .map_or_else(|| TextRange::empty(self.text_end()), Token::range);
        self.push_error(SyntaxError::new(kind, message, range));
    }

    fn finish(mut self) -> (GreenNode, Vec<SyntaxError>) {
        match mem::replace(&mut self.state, State::Normal) {
            State::PendingFinish => {
                self.eat_trivias();
                self.builder.finish_node();
            }
            State::PendingStart | State::Normal => unreachable!("the root node was not finished"),
        }

        (self.builder.finish(), self.errors)
    }

    fn eat_trivias(&mut self) {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.trivia(token);
        }
    }

    fn eat_n_trivias(&mut self, n: usize) {
        let tokens = self.tokens;
        for _ in 0..n {
            let token = &tokens[self.pos];
            debug_assert!(token.kind.is_trivia());
            self.trivia(token);
        }
    }

    fn trivia(&mut self, token: &Token<'_>) {
        self.lexer_error(token);
        self.builder.token(token.kind, token.text);
        self.pos += 1;
    }

    fn lexer_error(&mut self, token: &Token<'_>) {
        if let Some(error) = token.error {
            self.push_error(SyntaxError::new(error.kind, error.message, token.range()));
        }
    }

    /// Keeps the first diagnostic reported at any given offset.
    fn push_error(&mut self, error: SyntaxError) {
        let start = error.range().start();
        if self.errors.iter().all(|seen| seen.range().start() != start) {
            self.errors.push(error);
        }
    }

    fn text_end(&self) -> TextSize {
        self.tokens
            .iter()
            .rev()
            .find(|token| token.kind != SyntaxKind::EOF)
            .map_or(TextSize::from(0), |token| token.range().end())
    }
}

/// Number of trivia tokens directly preceding an item that belong to it:
/// comments not separated from the item by a blank line.
fn n_attached_trivias<'a>(
    kind: SyntaxKind,
    trivias: impl Iterator<Item = &'a Token<'a>>,
) -> usize {
    use SyntaxKind::*;

    if !matches!(
        kind,
        CONST
            | ENUM
            | FN
            | IMPL
            | MODULE
            | RECORD_FIELD
            | STATIC
            | STRUCT
            | TRAIT
            | TYPE_ALIAS
            | USE
            | VARIANT
    ) {
        return 0;
    }

    let mut attached = 0;
    for (i, token) in trivias.enumerate() {
        match token.kind {
            WHITESPACE if token.text.contains("\n\n") => break,
            COMMENT if token.text.starts_with("//!") || token.text.starts_with("/*!") => break,
            COMMENT => attached = i + 1,
            _ => {}
        }
    }
    attached
}
