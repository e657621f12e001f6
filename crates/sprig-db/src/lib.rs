//! Incremental queries over source files.

use salsa::{Accumulator as _, Database};
pub use sprig_errors::Diagnostic;
pub use sprig_inputs::File;
use sprig_syntax::Parse;
use sprig_syntax::ast::SourceFile;

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl Database for RootDatabase {}

#[salsa::tracked(returns(ref))]
pub fn parse_file(db: &dyn Database, file: File) -> Parse<SourceFile> {
    tracing::debug!(path = %file.path(db), "parsing file");
    sprig_parse::parse(file.text(db))
}

/// Reports the syntax errors of `file` as [`Diagnostic`]s.
#[salsa::tracked]
pub fn check_file(db: &dyn Database, file: File) {
    for error in parse_file(db, file).errors() {
        Diagnostic::from(error).accumulate(db);
    }
}
