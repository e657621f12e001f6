//! Lossless syntax tree with structural sharing.
//!
//! Green nodes are immutable, interned and position-independent; red nodes
//! are cheap cursors over them that know their parent and offset. Every byte
//! of the input, trivia and garbage included, lives in exactly one token.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod cursor;
mod green;
mod interner;
mod parse;
mod red;
mod syntax_error;
mod syntax_kind;
mod syntax_set;
mod text_edit;
mod utility_types;

pub use text_size::{TextRange, TextSize};

/// Incremental builder for constructing green trees.
pub use builder::{Builder, Checkpoint};
pub use cursor::{Preorder, PreorderWithTokens};
pub use green::{GreenElement, GreenNode, GreenToken};
pub use interner::NodeCache;
pub use parse::Parse;
pub use red::{SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxNodeChildren, SyntaxToken};
pub use syntax_error::{SyntaxError, SyntaxErrorKind};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_edit::Indel;
pub use utility_types::{NodeOrToken, TokenAtOffset, WalkEvent};

/// The grammar the AST wrappers in [`ast`] are generated from.
pub const GRAMMAR: &str = include_str!("../rust.ungram");
