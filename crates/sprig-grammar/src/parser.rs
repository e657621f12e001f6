use indexmap::{IndexMap, IndexSet};

use crate::lexer::{Token, TokenKind};
use crate::model::{Grammar, Node, NodeData, Rule};
use crate::{GrammarError, validate};

/// Parses grammar text into a [`Grammar`].
///
/// Definitions are collected up front so that rule references can be
/// resolved while bodies are parsed; recursion needs no special casing.
pub(crate) fn parse(text: &str) -> Result<Grammar, GrammarError> {
    let tokens = crate::lexer::tokenize(text)?;
    let definitions = validate::collect_definitions(&tokens)?;

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        definitions: &definitions,
        current_rule: "",
        token_names: IndexSet::new(),
        end: text.len(),
    };

    let mut nodes = IndexMap::with_capacity(definitions.len());
    while !parser.at_eof() {
        let (name, data) = parser.definition()?;
        nodes.insert(name, data);
    }

    Ok(Grammar { nodes, tokens: parser.token_names })
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    definitions: &'a IndexMap<String, usize>,
    current_rule: &'a str,
    token_names: IndexSet<String>,
    /// Offset reported for errors at end of input.
    end: usize,
}

impl<'a> Parser<'a> {
    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a TokenKind> {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos + n).map(|token| &token.kind)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |token| token.offset)
    }

    fn bump(&mut self) -> &'a Token {
        let token = &self.tokens[self.pos];
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), GrammarError> {
        if self.peek() == Some(kind) {
            self.bump();
            Ok(())
        } else {
            Err(GrammarError::UnexpectedToken { expected, offset: self.offset() })
        }
    }

    /// True at `Name =`, the start of the next definition.
    fn at_definition(&self) -> bool {
        matches!(self.peek(), Some(TokenKind::Ident(_))) && self.nth(1) == Some(&TokenKind::Eq)
    }

    fn definition(&mut self) -> Result<(String, NodeData), GrammarError> {
        let offset = self.offset();
        let Some(TokenKind::Ident(name)) = self.peek() else {
            return Err(GrammarError::UnexpectedToken { expected: "rule name", offset });
        };
        self.bump();
        self.expect(&TokenKind::Eq, "`=`")?;
        self.current_rule = name;

        if self.at_eof() || self.at_definition() {
            return Err(GrammarError::MissingBody { rule: name.clone(), offset });
        }
        let rule = self.alt()?;
        if !self.at_eof() && !self.at_definition() {
            return Err(GrammarError::UnexpectedToken {
                expected: "rule definition",
                offset: self.offset(),
            });
        }

        Ok((name.clone(), NodeData { name: name.clone(), rule, offset }))
    }

    fn alt(&mut self) -> Result<Rule, GrammarError> {
        let mut alternatives = vec![self.seq()?];
        while self.peek() == Some(&TokenKind::Pipe) {
            self.bump();
            alternatives.push(self.seq()?);
        }
        Ok(if alternatives.len() == 1 { alternatives.swap_remove(0) } else { Rule::Alt(alternatives) })
    }

    fn seq(&mut self) -> Result<Rule, GrammarError> {
        let mut rules = Vec::new();
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Pipe | TokenKind::RightParen => break,
                _ if self.at_definition() => break,
                _ => rules.push(self.postfix()?),
            }
        }

        match rules.len() {
            0 => Err(GrammarError::UnexpectedToken { expected: "rule", offset: self.offset() }),
            1 => Ok(rules.swap_remove(0)),
            _ => Ok(Rule::Seq(rules)),
        }
    }

    fn postfix(&mut self) -> Result<Rule, GrammarError> {
        let mut rule = self.atom()?;
        loop {
            rule = match self.peek() {
                Some(TokenKind::Star) => Rule::Rep(Box::new(rule)),
                Some(TokenKind::QuestionMark) => Rule::Opt(Box::new(rule)),
                _ => return Ok(rule),
            };
            self.bump();
        }
    }

    fn atom(&mut self) -> Result<Rule, GrammarError> {
        let offset = self.offset();
        if self.at_eof() {
            return Err(GrammarError::UnexpectedToken { expected: "rule", offset });
        }
        let token = self.bump();
        match &token.kind {
            TokenKind::Ident(label) if self.peek() == Some(&TokenKind::Colon) => {
                self.bump();
                let rule = self.postfix()?;
                Ok(Rule::Labeled { label: label.clone(), rule: Box::new(rule) })
            }
            TokenKind::Ident(name) => match self.definitions.get_index_of(name) {
                Some(index) => Ok(Rule::Node(Node(index))),
                None => Err(GrammarError::UndefinedRule {
                    name: name.clone(),
                    referenced_from: self.current_rule.to_owned(),
                    offset,
                }),
            },
            TokenKind::Literal(spelling) => {
                let (index, _) = self.token_names.insert_full(spelling.clone());
                Ok(Rule::Token(crate::model::Token(index)))
            }
            TokenKind::LeftParen => {
                let rule = self.alt()?;
                self.expect(&TokenKind::RightParen, "`)`")?;
                Ok(rule)
            }
            _ => Err(GrammarError::UnexpectedToken { expected: "rule", offset }),
        }
    }
}
