use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::ast::AstNode;
use crate::green::GreenNode;
use crate::{SyntaxError, SyntaxNode};

/// The result of parsing: a green tree, its diagnostics, and the typed root
/// it is expected to cast to.
///
/// `Parse` is `Send + Sync`; red nodes are only materialised on request.
pub struct Parse<T> {
    green: GreenNode,
    errors: Option<Arc<[SyntaxError]>>,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Parse<T> {
    pub fn new(green: GreenNode, errors: Vec<SyntaxError>) -> Self {
        let errors = if errors.is_empty() { None } else { Some(errors.into()) };
        Self { green, errors, _ty: PhantomData }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn ok(&self) -> bool {
        self.errors.is_none()
    }

    /// Tree dump followed by one line per diagnostic.
    pub fn debug_dump(&self) -> String {
        let mut buf = self.syntax_node().debug_dump();
        for error in self.errors() {
            buf.push_str(&format!("error {:?}: {}\n", error.range(), error.message()));
        }
        buf
    }
}

impl<T: AstNode> Parse<T> {
    pub fn tree(&self) -> T {
        T::cast(self.syntax_node()).expect("root node has the kind of the parse entry point")
    }
}

impl<T> Clone for Parse<T> {
    fn clone(&self) -> Self {
        Self { green: self.green.clone(), errors: self.errors.clone(), _ty: PhantomData }
    }
}

impl<T> PartialEq for Parse<T> {
    fn eq(&self, other: &Self) -> bool {
        self.green == other.green && self.errors() == other.errors()
    }
}

impl<T> Eq for Parse<T> {}

impl<T> fmt::Debug for Parse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parse")
            .field("green", &self.green)
            .field("errors", &self.errors())
            .finish()
    }
}
