use std::ops::Index;

use indexmap::{IndexMap, IndexSet};

/// Reference to a rule of a [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(pub(crate) usize);

/// Reference to a terminal of a [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Labeled { label: String, rule: Box<Rule> },
    Node(Node),
    Token(Token),
    Seq(Vec<Rule>),
    Alt(Vec<Rule>),
    Opt(Box<Rule>),
    Rep(Box<Rule>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub name: String,
    pub rule: Rule,
    /// Byte offset of the definition in the grammar text.
    pub offset: usize,
}

/// A parsed and validated grammar. Rules keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) nodes: IndexMap<String, NodeData>,
    pub(crate) tokens: IndexSet<String>,
}

/// A grammar name without a counterpart in the kind table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingKind {
    Rule(String),
    Token(String),
}

impl Grammar {
    /// All rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.nodes.len()).map(Node)
    }

    /// All distinct terminals in order of first use.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        (0..self.tokens.len()).map(Token)
    }

    pub fn node(&self, name: &str) -> Option<Node> {
        self.nodes.get_index_of(name).map(Node)
    }

    pub fn token_name(&self, token: Token) -> &str {
        &self.tokens[token.0]
    }

    /// A rule whose whole body is an alternation of bare rule references.
    pub fn is_enum(&self, node: Node) -> bool {
        match &self[node].rule {
            Rule::Alt(alternatives) => alternatives.iter().all(|rule| matches!(rule, Rule::Node(_))),
            _ => false,
        }
    }

    /// Checks that every non-enum rule and every terminal has a kind.
    pub fn check_kinds(
        &self,
        has_rule: impl Fn(&str) -> bool,
        has_token: impl Fn(&str) -> bool,
    ) -> Vec<MissingKind> {
        let rules = self
            .iter()
            .filter(|&node| !self.is_enum(node))
            .map(|node| self[node].name.as_str())
            .filter(|name| !has_rule(name))
            .map(|name| MissingKind::Rule(name.to_owned()));
        let tokens = self
            .tokens
            .iter()
            .filter(|name| !has_token(name))
            .map(|name| MissingKind::Token(name.clone()));
        rules.chain(tokens).collect()
    }
}

impl Index<Node> for Grammar {
    type Output = NodeData;

    fn index(&self, node: Node) -> &NodeData {
        &self.nodes[node.0]
    }
}
