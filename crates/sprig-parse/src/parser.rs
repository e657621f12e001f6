use std::cell::Cell;

use drop_bomb::DropBomb;
use sprig_syntax::SyntaxKind::{self, EOF, ERROR, TOMBSTONE};
use sprig_syntax::{SyntaxErrorKind, SyntaxSet, T};

use crate::event::Event;
use crate::input::Input;

/// Lookahead calls allowed without consuming a token. Exceeding it means a
/// grammar function loops without making progress.
const PARSER_STEP_LIMIT: u32 = 15_000_000;

/// Nesting levels of expressions, types, patterns and item lists the parser
/// descends into. The grammar is recursive, so this bounds the stack.
pub(crate) const NESTING_LIMIT: u32 = 128;

/// Recursive descent driver. It only sees non-trivia token kinds and records
/// its decisions as [`Event`]s; the tree is built afterwards.
pub(crate) struct Parser<'input> {
    input: &'input Input,
    pos: usize,
    events: Vec<Event>,
    steps: Cell<u32>,
    depth: u32,
}

impl<'input> Parser<'input> {
    pub(crate) fn new(input: &'input Input) -> Self {
        Self { input, pos: 0, events: Vec::new(), steps: Cell::new(0), depth: 0 }
    }

    pub(crate) fn finish(self) -> Vec<Event> {
        self.events
    }

    /// Number of raw tokens consumed so far.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        assert!(n <= 3);

        let steps = self.steps.get();
        assert!(steps <= PARSER_STEP_LIMIT, "the parser seems stuck");
        self.steps.set(steps + 1);

        self.input.kind(self.pos + n)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.nth_at(0, kind)
    }

    /// Checks the `n`th raw token. Composite punctuation matches only when
    /// its pieces are written without trivia in between.
    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        match kind {
            T![-=] => self.at_composite2(n, T![-], T![=]),
            T![->] => self.at_composite2(n, T![-], T![>]),
            T![::] => self.at_composite2(n, T![:], T![:]),
            T![!=] => self.at_composite2(n, T![!], T![=]),
            T![..] => self.at_composite2(n, T![.], T![.]),
            T![*=] => self.at_composite2(n, T![*], T![=]),
            T![/=] => self.at_composite2(n, T![/], T![=]),
            T![&&] => self.at_composite2(n, T![&], T![&]),
            T![&=] => self.at_composite2(n, T![&], T![=]),
            T![%=] => self.at_composite2(n, T![%], T![=]),
            T![^=] => self.at_composite2(n, T![^], T![=]),
            T![+=] => self.at_composite2(n, T![+], T![=]),
            T![<<] => self.at_composite2(n, T![<], T![<]),
            T![<=] => self.at_composite2(n, T![<], T![=]),
            T![==] => self.at_composite2(n, T![=], T![=]),
            T![=>] => self.at_composite2(n, T![=], T![>]),
            T![>=] => self.at_composite2(n, T![>], T![=]),
            T![>>] => self.at_composite2(n, T![>], T![>]),
            T![|=] => self.at_composite2(n, T![|], T![=]),
            T![||] => self.at_composite2(n, T![|], T![|]),

            T![...] => self.at_composite3(n, T![.], T![.], T![.]),
            T![..=] => self.at_composite3(n, T![.], T![.], T![=]),
            T![<<=] => self.at_composite3(n, T![<], T![<], T![=]),
            T![>>=] => self.at_composite3(n, T![>], T![>], T![=]),

            _ => self.input.kind(self.pos + n) == kind,
        }
    }

    fn at_composite2(&self, n: usize, k1: SyntaxKind, k2: SyntaxKind) -> bool {
        self.input.kind(self.pos + n) == k1
            && self.input.kind(self.pos + n + 1) == k2
            && self.input.is_joint(self.pos + n)
    }

    fn at_composite3(&self, n: usize, k1: SyntaxKind, k2: SyntaxKind, k3: SyntaxKind) -> bool {
        self.input.kind(self.pos + n) == k1
            && self.input.kind(self.pos + n + 1) == k2
            && self.input.kind(self.pos + n + 2) == k3
            && self.input.is_joint(self.pos + n)
            && self.input.is_joint(self.pos + n + 1)
    }

    pub(crate) fn at_ts(&self, kinds: SyntaxSet) -> bool {
        kinds.contains(self.current())
    }

    /// Consumes the next token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        let n_raw_tokens = match kind {
            T![...] | T![..=] | T![<<=] | T![>>=] => 3,
            T![-=]
            | T![->]
            | T![::]
            | T![!=]
            | T![..]
            | T![*=]
            | T![/=]
            | T![&&]
            | T![&=]
            | T![%=]
            | T![^=]
            | T![+=]
            | T![<<]
            | T![<=]
            | T![==]
            | T![=>]
            | T![>=]
            | T![>>]
            | T![|=]
            | T![||] => 2,
            _ => 1,
        };
        self.do_bump(kind, n_raw_tokens);
        true
    }

    /// Consumes the next token, which must be `kind`.
    pub(crate) fn bump(&mut self, kind: SyntaxKind) {
        assert!(self.eat(kind), "expected {kind:?}, found {:?}", self.current());
    }

    /// Consumes the next raw token whatever it is.
    pub(crate) fn bump_any(&mut self) {
        let kind = self.nth(0);
        if kind == EOF {
            return;
        }
        self.do_bump(kind, 1);
    }

    fn do_bump(&mut self, kind: SyntaxKind, n_raw_tokens: u8) {
        self.pos += n_raw_tokens as usize;
        self.steps.set(0);
        self.push_event(Event::Token { kind, n_raw_tokens });
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.push_event(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.push_event(Event::Error {
            kind: SyntaxErrorKind::UnexpectedToken,
            message: message.into(),
        });
    }

    /// Consumes `kind` or reports it missing. A missing closing delimiter
    /// means the enclosing construct is unterminated.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }

        let error_kind = match kind {
            T![')'] | T![']'] | T!['}'] | T![>] => SyntaxErrorKind::UnterminatedConstruct,
            _ => SyntaxErrorKind::UnexpectedToken,
        };
        let spelling = kind.spelling().unwrap_or_else(|| kind.name());
        self.push_event(Event::Error { kind: error_kind, message: format!("expected `{spelling}`") });
        false
    }

    /// Reports an error and skips the current token into an `ERROR` node,
    /// unless it is a brace or in `recovery`, where the caller resumes.
    pub(crate) fn err_recover(&mut self, message: &str, recovery: SyntaxSet) {
        if matches!(self.current(), T!['{'] | T!['}'] | EOF) || self.at_ts(recovery) {
            self.error(message);
            return;
        }

        let m = self.start();
        self.error(message);
        self.bump_any();
        m.complete(self, ERROR);
    }

    pub(crate) fn err_and_bump(&mut self, message: &str) {
        self.err_recover(message, SyntaxSet::EMPTY);
    }

    /// Runs `f` one nesting level deeper. Past [`NESTING_LIMIT`] it reports
    /// an error instead and skips the rest of the construct.
    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if self.depth >= NESTING_LIMIT {
            self.err_too_deep();
            return None;
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        Some(res)
    }

    /// Skips tokens into an `ERROR` node up to the end of the input or the
    /// first closing delimiter without an opening one, which belongs to an
    /// enclosing construct.
    fn err_too_deep(&mut self) {
        let m = self.start();
        self.error("nesting is too deep");

        let mut open = 0u32;
        loop {
            match self.current() {
                EOF => break,
                T!['('] | T!['['] | T!['{'] => open += 1,
                T![')'] | T![']'] | T!['}'] => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.bump_any();
        }

        m.complete(self, ERROR);
    }

    fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

pub(crate) struct Marker {
    pos: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Self { pos, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.pos as usize] {
            Event::Start { kind: slot, .. } => *slot = kind,
            _ => unreachable!(),
        }

        p.push_event(Event::Finish);
        CompletedMarker { pos: self.pos, kind }
    }

    /// Drops the node; its events become children of the enclosing node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        let idx = self.pos as usize;
        if idx == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Start { kind: TOMBSTONE, forward_parent: None }) => {}
                _ => unreachable!(),
            }
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pos: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    /// Starts a node that will wrap this one, for constructs recognised only
    /// after their first child: `a + b` once the `+` is seen.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.pos - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }

    pub(crate) fn kind(self) -> SyntaxKind {
        self.kind
    }
}
